use derive_more::Display;
use serde::Serialize;

///
/// RelationKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum RelationKind {
    #[display("many-to-many")]
    ManyToMany,
    #[display("many-to-one")]
    ManyToOne,
    #[display("one-to-many")]
    OneToMany,
    #[display("one-to-one")]
    OneToOne,
}

impl RelationKind {
    /// The kind seen from the other side of the relation.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::ManyToOne => Self::OneToMany,
            Self::OneToMany => Self::ManyToOne,
            other => other,
        }
    }

    /// Whether this side holds a collection of related entities.
    #[must_use]
    pub const fn is_to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }
}

///
/// JoinTable
/// Link table owned by the declaring side of a many-to-many relation.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct JoinTable {
    pub table_name: String,
    pub join_column: String,
    pub inverse_join_column: String,
}

///
/// Relation
/// Attached to a field by relationship inference, never changed afterwards.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Relation {
    pub kind: RelationKind,
    pub nullable: bool,

    /// This side stores the foreign-key column.
    pub join_column: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_table: Option<JoinTable>,

    pub related_entity: String,
    pub related_field: String,
}

///
/// EntityRelationship
/// One per owning field: a foreign key or the declaring side of a many-to-many.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityRelationship {
    pub entity: String,
    pub field: String,
    pub related_entity: String,
    pub related_field: String,
    pub kind: RelationKind,
}
