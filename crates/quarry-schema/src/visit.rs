use crate::{
    ast::{Directive, Document, EnumValueDefinition, FieldDefinition, TypeDefinition},
    directive::DirectiveKind,
};
use std::collections::BTreeMap;

// ============================================================================
// Path
// ============================================================================

///
/// SchemaNode
/// One segment of the ancestor path handed to a directive visitor.
///

#[derive(Clone, Copy, Debug)]
pub enum SchemaNode<'a> {
    Type(&'a TypeDefinition),
    Field(&'a FieldDefinition),
    EnumValue(&'a EnumValueDefinition),
    Directive(&'a Directive),
}

impl<'a> SchemaNode<'a> {
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::Type(def) => def.name(),
            Self::Field(field) => &field.name,
            Self::EnumValue(value) => &value.name,
            Self::Directive(directive) => &directive.name,
        }
    }
}

/// Names of every node on the path, outermost first.
#[must_use]
pub fn path_names<'a>(path: &[SchemaNode<'a>]) -> Vec<&'a str> {
    path.iter().map(SchemaNode::name).collect()
}

// ============================================================================
// DirectiveVisitor
// ============================================================================

/// Called once per occurrence of the directive it is registered for.
///
/// `path` runs from the enclosing type down to the directive itself, e.g.
/// `[Membership, handle, fulltext]`.
pub trait DirectiveVisitor<E> {
    fn visit(&mut self, path: &[SchemaNode<'_>]) -> Result<(), E>;
}

impl<E, F> DirectiveVisitor<E> for F
where
    F: FnMut(&[SchemaNode<'_>]) -> Result<(), E>,
{
    fn visit(&mut self, path: &[SchemaNode<'_>]) -> Result<(), E> {
        self(path)
    }
}

///
/// Visitors
/// Registered directive visitors, at most one per directive kind.
///

pub struct Visitors<'v, E> {
    by_kind: BTreeMap<DirectiveKind, &'v mut dyn DirectiveVisitor<E>>,
}

impl<'v, E> Visitors<'v, E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_kind: BTreeMap::new(),
        }
    }

    /// Register `visitor` for `kind`, replacing any earlier registration.
    #[must_use]
    pub fn on(mut self, kind: DirectiveKind, visitor: &'v mut dyn DirectiveVisitor<E>) -> Self {
        self.by_kind.insert(kind, visitor);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_kind.is_empty()
    }
}

impl<E> Default for Visitors<'_, E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Walk
// ============================================================================

struct Walker<'d, 'v, 'r, E> {
    visitors: &'r mut Visitors<'v, E>,
    path: Vec<SchemaNode<'d>>,
}

impl<'d, E> Walker<'d, '_, '_, E> {
    fn push(&mut self, node: SchemaNode<'d>) {
        self.path.push(node);
    }

    fn pop(&mut self) {
        self.path.pop();
    }

    fn directives(&mut self, directives: &'d [Directive]) -> Result<(), E> {
        for directive in directives {
            let Some(kind) = directive.kind() else {
                continue;
            };
            let Some(visitor) = self.visitors.by_kind.get_mut(&kind) else {
                continue;
            };

            self.path.push(SchemaNode::Directive(directive));
            let result = visitor.visit(&self.path);
            self.path.pop();
            result?;
        }

        Ok(())
    }

    fn definition(&mut self, def: &'d TypeDefinition) -> Result<(), E> {
        self.push(SchemaNode::Type(def));
        self.directives(def.directives())?;

        match def {
            TypeDefinition::Object(object) | TypeDefinition::Interface(object) => {
                for field in &object.fields {
                    self.push(SchemaNode::Field(field));
                    self.directives(&field.directives)?;
                    self.pop();
                }
            }
            TypeDefinition::Enum(def) => {
                for value in &def.values {
                    self.push(SchemaNode::EnumValue(value));
                    self.directives(&value.directives)?;
                    self.pop();
                }
            }
            TypeDefinition::Union(_) | TypeDefinition::Scalar(_) => {}
        }

        self.pop();

        Ok(())
    }
}

impl Document {
    /// Depth-first walk over every definition, calling the registered
    /// visitor for each matching directive occurrence.
    ///
    /// The first visitor error stops the walk and is returned unchanged.
    pub fn walk<E>(&self, visitors: &mut Visitors<'_, E>) -> Result<(), E> {
        if visitors.is_empty() {
            return Ok(());
        }

        let mut walker = Walker {
            visitors,
            path: Vec::with_capacity(3),
        };
        for def in self.definitions() {
            walker.definition(def)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_document;

    #[test]
    fn fulltext_visitor_receives_ancestor_path() {
        let doc = parse_document(
            r#"
            type Membership @entity {
                handle: String! @fulltext(query: "handles")
                about: String @fulltext(query: "handles")
            }
            "#,
            "test.graphql",
        )
        .unwrap();

        let mut seen: Vec<Vec<String>> = Vec::new();
        let mut visitor = |path: &[SchemaNode<'_>]| -> Result<(), ()> {
            seen.push(path_names(path).into_iter().map(str::to_string).collect());
            Ok(())
        };
        doc.walk(&mut Visitors::new().on(DirectiveKind::FullText, &mut visitor))
            .unwrap();

        assert_eq!(
            seen,
            vec![
                vec!["Membership", "handle", "fulltext"],
                vec!["Membership", "about", "fulltext"],
            ]
        );
    }

    #[test]
    fn type_level_directives_have_two_segment_paths() {
        let doc = parse_document(
            "type A @entity { f: Int }\ntype B @variant { f: Int }",
            "test.graphql",
        )
        .unwrap();

        let mut entities = Vec::new();
        let mut visitor = |path: &[SchemaNode<'_>]| -> Result<(), ()> {
            entities.push(path_names(path).join("."));
            Ok(())
        };
        doc.walk(&mut Visitors::new().on(DirectiveKind::Entity, &mut visitor))
            .unwrap();

        assert_eq!(entities, vec!["A.entity"]);
    }

    #[test]
    fn visitor_error_stops_the_walk() {
        let doc = parse_document(
            "type A @entity { a: Int @unique b: Int @unique }",
            "test.graphql",
        )
        .unwrap();

        let mut calls = 0;
        let mut visitor = |_: &[SchemaNode<'_>]| -> Result<(), String> {
            calls += 1;
            Err("stop".to_string())
        };
        let result = doc.walk(&mut Visitors::new().on(DirectiveKind::Unique, &mut visitor));

        assert_eq!(result, Err("stop".to_string()));
        assert_eq!(calls, 1);
    }
}
