//! Naming helpers shared by the model builder and downstream generators.
//!
//! Everything here is deterministic: synthesized names are part of the
//! model's public contract and must not change between runs.

pub mod case;

pub use case::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};

/// Suffix of the synthesized discriminator enum attached to every interface.
pub const INTERFACE_ENUM_SUFFIX: &str = "TypeOptions";

/// Name of the synthesized discriminator field attached to every interface.
pub const DISCRIMINATOR_FIELD: &str = "type";

/// Name of the inverse field synthesized on the target of `owner.field`.
///
/// `camelCase(lowercase(owner) + field)`. Digit runs start a new word, so
/// `Event.inExtrinsic` yields `eventinExtrinsic` and
/// `MembershipEvent1.extrinsic` yields `membershipevent1Extrinsic`.
#[must_use]
pub fn inverse_field_name(owner: &str, field: &str) -> String {
    let mut name = owner.to_lowercase();
    name.push_str(field);

    to_camel_case(&name)
}

/// Name of the discriminator enum synthesized for an interface.
#[must_use]
pub fn interface_enum_name(interface: &str) -> String {
    format!("{interface}{INTERFACE_ENUM_SUFFIX}")
}

/// Join table for the many-to-many relation owned by `owner.field`.
#[must_use]
pub fn join_table_name(owner: &str, field: &str) -> String {
    format!("{}_{}", to_snake_case(owner), to_snake_case(field))
}

/// Foreign-key column referencing `entity` from a join table.
#[must_use]
pub fn join_column_name(entity: &str) -> String {
    format!("{}_id", to_snake_case(entity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverse_name_lowercases_owner_and_keeps_field() {
        assert_eq!(inverse_field_name("Event", "inExtrinsic"), "eventinExtrinsic");
        assert_eq!(inverse_field_name("Post", "author"), "postauthor");
        assert_eq!(inverse_field_name("BlogPost", "relatedTags"), "blogpostrelatedTags");
    }

    #[test]
    fn inverse_name_breaks_words_at_digits() {
        assert_eq!(
            inverse_field_name("MembershipExtrinsicOnlyEvent1", "extrinsic"),
            "membershipextrinsiconlyevent1Extrinsic"
        );
        assert_eq!(inverse_field_name("Node12", "next"), "node12Next");
        assert_eq!(inverse_field_name("Post", "author_id"), "postauthorId");
    }

    #[test]
    fn interface_enum_name_appends_suffix() {
        assert_eq!(interface_enum_name("MembershipEvent"), "MembershipEventTypeOptions");
    }

    #[test]
    fn join_names_are_snake_cased() {
        assert_eq!(join_table_name("BlogPost", "relatedTags"), "blog_post_related_tags");
        assert_eq!(join_column_name("BlogPost"), "blog_post_id");
    }
}
