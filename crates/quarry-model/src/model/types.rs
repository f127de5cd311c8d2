use crate::model::Named;
use serde::Serialize;

///
/// Enum
///

#[derive(Clone, Debug, Serialize)]
pub struct Enum {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub values: Vec<EnumValue>,

    /// Generated by the compiler rather than declared in the schema.
    pub synthesized: bool,
}

impl Enum {
    #[must_use]
    pub fn value_names(&self) -> Vec<&str> {
        self.values.iter().map(|v| v.name.as_str()).collect()
    }
}

impl Named for Enum {
    fn name(&self) -> &str {
        &self.name
    }
}

///
/// EnumValue
///

#[derive(Clone, Debug, Serialize)]
pub struct EnumValue {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

///
/// Union
///

#[derive(Clone, Debug, Serialize)]
pub struct Union {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Member variant names, in declaration order.
    pub members: Vec<String>,
}

impl Named for Union {
    fn name(&self) -> &str {
        &self.name
    }
}

///
/// FtsQuery
/// A named full-text search over one or more entity text fields.
///

#[derive(Clone, Debug, Serialize)]
pub struct FtsQuery {
    pub name: String,

    /// Clause order is the column concatenation order.
    pub clauses: Vec<FtsClause>,
}

impl FtsQuery {
    /// Distinct entities searched by the query, in first-seen order.
    #[must_use]
    pub fn entities(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for clause in &self.clauses {
            if !out.contains(&clause.entity.as_str()) {
                out.push(&clause.entity);
            }
        }

        out
    }
}

impl Named for FtsQuery {
    fn name(&self) -> &str {
        &self.name
    }
}

///
/// FtsClause
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FtsClause {
    pub entity: String,
    pub field: String,
}
