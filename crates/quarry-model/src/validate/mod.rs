//! Model-wide consistency checks.
//!
//! Each pass runs at a fixed point of the build and returns the first
//! violation it finds.

pub(crate) mod derived;
pub(crate) mod interface;
pub(crate) mod json;
pub(crate) mod variant;

#[cfg(test)]
fn build_err(source: &str) -> crate::ModelError {
    let doc = quarry_schema::parse_document(source, "test").expect("schema parses");

    crate::build_model(&doc).expect_err("build should fail")
}
