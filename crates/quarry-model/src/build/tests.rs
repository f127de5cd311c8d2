use super::*;
use crate::model::{FieldOrigin, ModelType, RelationKind};
use proptest::prelude::*;
use quarry_schema::parse_document;

fn build(source: &str) -> Result<Model, ModelError> {
    let doc = parse_document(source, "test").unwrap();

    build_model(&doc)
}

const INTERFACES: &str = r#"
enum Status { ACTIVE INACTIVE }

interface MembershipEvent @entity {
    handle: String!
    status: Status
}

type MembershipEvent1 implements MembershipEvent @entity {
    handle: String! @fulltext(query: "handles")
    status: Status
    extra: Int
}

type MembershipEvent2 implements MembershipEvent @entity {
    handle: String!
    status: Status
}

type Unrelated @entity {
    name: String @unique
}
"#;

#[test]
fn id_field_is_never_materialized() {
    let model = build("type Post @entity { id: ID! title: String }").unwrap();
    let post = model.lookup_entity("Post").unwrap();

    assert!(!post.has_field("id"));
    assert_eq!(post.fields.len(), 1);
}

#[test]
fn explicit_id_field_option() {
    let doc = parse_document("type Post @entity { id: ID! key: ID! title: String }", "test").unwrap();
    let model = ModelBuilder::new(&doc)
        .with_options(BuildOptions {
            id_field: "key".to_string(),
        })
        .build()
        .unwrap();
    let post = model.lookup_entity("Post").unwrap();

    assert!(post.has_field("id"));
    assert!(!post.has_field("key"));
}

#[test]
fn forward_references_resolve() {
    let model = build(
        "type Post @entity { author: Author status: Status meta: Meta }
         type Author @entity { name: String }
         enum Status { DRAFT }
         type Meta @jsonField { words: Int }",
    )
    .unwrap();

    let post = model.lookup_entity("Post").unwrap();
    let kinds: Vec<_> = post
        .fields
        .iter()
        .map(|f| f.model_type.unwrap())
        .collect();
    assert_eq!(
        kinds,
        vec![ModelType::Entity, ModelType::Enum, ModelType::Json]
    );
}

#[test]
fn undefined_type_names_owner_and_field() {
    let err = build("type Post @entity { author: Writer }").unwrap_err();

    assert!(matches!(err, ModelError::UndefinedType { ref name, .. } if name == "Writer"));
    assert!(err.to_string().contains("Post.author"));
}

#[test]
fn custom_scalars_are_unsupported() {
    assert!(build("scalar DateTime\ntype A @entity { at: DateTime }").is_ok());
    assert!(matches!(
        build("scalar Money\ntype A @entity { amount: Money }"),
        Err(ModelError::UnsupportedType { .. })
    ));
}

#[test]
fn unmarked_types_are_ignored() {
    let model = build("type Post @entity { title: String }\ntype Draft { body: String }").unwrap();

    assert!(model.lookup_object("Draft").is_err());
    assert_eq!(model.entities().len(), 1);
}

#[test]
fn multiple_interfaces_are_rejected() {
    let err = build(
        "interface A @entity { x: Int }
         interface B @entity { y: Int }
         type C implements A & B @entity { x: Int y: Int }",
    )
    .unwrap_err();

    assert!(matches!(err, ModelError::MultipleInterfaces { ref interfaces, .. } if interfaces.len() == 2));
}

#[test]
fn undeclared_interface_is_undefined() {
    let err = build("type C implements Missing @entity { x: Int }").unwrap_err();

    assert!(matches!(err, ModelError::UndefinedType { ref name, .. } if name == "Missing"));
}

#[test]
fn interface_discriminator_enum() {
    let model = build(INTERFACES).unwrap();

    let options = model.lookup_enum("MembershipEventTypeOptions").unwrap();
    assert!(options.synthesized);
    assert_eq!(
        options.value_names(),
        vec!["MembershipEvent1", "MembershipEvent2"]
    );

    let iface = model.lookup_interface("MembershipEvent").unwrap();
    assert_eq!(iface.implementers, vec!["MembershipEvent1", "MembershipEvent2"]);

    let discriminator = iface.field("type").unwrap();
    assert_eq!(discriminator.origin, FieldOrigin::Discriminator);
    assert_eq!(discriminator.ty, "MembershipEventTypeOptions");
    assert!(!discriminator.nullable);

    let subclasses: Vec<_> = model
        .subclasses("MembershipEvent")
        .into_iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(subclasses, vec!["MembershipEvent1", "MembershipEvent2"]);
}

#[test]
fn discriminator_clash_with_user_enum() {
    let err = build(
        "enum EventTypeOptions { A }
         interface Event @entity { x: Int }",
    )
    .unwrap_err();

    assert!(matches!(err, ModelError::DuplicateName { kind: ItemKind::Enum, .. }));
}

#[test]
fn fulltext_query_clauses() {
    let model = build(
        r#"type Membership @entity {
             handle: String! @fulltext(query: "members")
             about: String @fulltext(query: "members")
           }
           type Post @entity { title: String @fulltext(query: "posts") }"#,
    )
    .unwrap();

    let members = model.lookup_query("members").unwrap();
    let fields: Vec<_> = members.clauses.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["handle", "about"]);
    assert_eq!(model.lookup_query("posts").unwrap().clauses.len(), 1);
    assert!(model.lookup_query("other").is_err());
}

#[test]
fn fulltext_on_non_string_field_is_rejected() {
    let err = build(r#"type Post @entity { views: Int @fulltext(query: "q") }"#).unwrap_err();

    assert!(matches!(err, ModelError::InvalidFullText { ref field, .. } if field == "views"));
}

#[test]
fn fulltext_on_variant_is_rejected() {
    let err = build(r#"type Note @variant { text: String @fulltext(query: "q") }"#).unwrap_err();

    assert!(matches!(err, ModelError::InvalidFullText { .. }));
}

#[test]
fn fulltext_scales_to_many_entities() {
    let mut source = String::new();
    for i in 0..5000 {
        source.push_str(&format!(
            "type Entity{i} @entity {{ name: String @fulltext(query: \"test\") }}\n"
        ));
    }

    let model = build(&source).unwrap();

    assert_eq!(model.entities().len(), 5000);
    assert_eq!(model.lookup_query("test").unwrap().clauses.len(), 5000);
    assert!(model.lookup_entity("Entity4999").is_ok());
}

#[test]
fn unique_flag_is_kept() {
    let model = build(INTERFACES).unwrap();

    assert!(model.lookup_field("Unrelated", "name").unwrap().unique);
}

#[test]
fn builder_is_idempotent() {
    let doc = parse_document(INTERFACES, "test").unwrap();
    let a = build_model(&doc).unwrap();
    let b = build_model(&doc).unwrap();

    assert_eq!(a.relationships(), b.relationships());
    assert_eq!(
        a.enums().names().collect::<Vec<_>>(),
        b.enums().names().collect::<Vec<_>>()
    );
}

//
// property tests
//

// (target entity, is list) per reference field
fn arb_schema() -> impl Strategy<Value = Vec<Vec<(usize, bool)>>> {
    (1usize..6).prop_flat_map(|n| {
        prop::collection::vec(
            prop::collection::vec((0..n, any::<bool>()), 0..4),
            n,
        )
    })
}

fn render(schema: &[Vec<(usize, bool)>]) -> String {
    let mut out = String::new();
    for (i, refs) in schema.iter().enumerate() {
        out.push_str(&format!("type E{i} @entity {{\n  name: String\n"));
        for (j, (target, list)) in refs.iter().enumerate() {
            if *list {
                out.push_str(&format!("  r{j}: [E{target}!]\n"));
            } else {
                out.push_str(&format!("  r{j}: E{target}\n"));
            }
        }
        out.push_str("}\n");
    }

    out
}

fn field_names(model: &Model) -> Vec<Vec<String>> {
    model
        .entities()
        .iter()
        .map(|e| e.fields.iter().map(|f| f.name.clone()).collect())
        .collect()
}

proptest! {
    #[test]
    fn relation_inference_is_deterministic(schema in arb_schema()) {
        let source = render(&schema);
        let a = build(&source).unwrap();
        let b = build(&source).unwrap();

        prop_assert_eq!(a.relationships(), b.relationships());
        prop_assert_eq!(field_names(&a), field_names(&b));
    }

    #[test]
    fn one_relationship_per_reference(schema in arb_schema()) {
        let model = build(&render(&schema)).unwrap();
        let refs: usize = schema.iter().map(Vec::len).sum();

        prop_assert_eq!(model.relationships().len(), refs);

        for rel in model.relationships() {
            let back = model
                .lookup_field(&rel.related_entity, &rel.related_field)
                .unwrap()
                .relation
                .clone()
                .unwrap();
            prop_assert_eq!(back.kind, rel.kind.inverse());
            prop_assert_eq!(&back.related_field, &rel.field);
        }

        for entity in model.entities() {
            prop_assert!(!entity.dependencies().contains(entity.name.as_str()));
        }
    }
}

#[test]
fn many_to_one_kind_for_foreign_keys() {
    let model = build("type A @entity { b: B }\ntype B @entity { name: String }").unwrap();

    assert_eq!(model.relationships()[0].kind, RelationKind::ManyToOne);
}
