use convert_case::{Case, Casing};

// to_pascal_case
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    s.to_case(Case::Pascal)
}

// to_camel_case
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    s.to_case(Case::Camel)
}

// to_snake_case
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    s.to_case(Case::Snake)
}

// to_kebab_case
#[must_use]
pub fn to_kebab_case(s: &str) -> String {
    s.to_case(Case::Kebab)
}
