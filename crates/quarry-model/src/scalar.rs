/// Scalars every schema may use without declaring them.
pub const BUILTIN_SCALARS: &[&str] = &[
    "ID",
    "String",
    "Int",
    "Float",
    "Boolean",
    "DateTime",
    "BigInt",
    "BigDecimal",
    "Bytes",
];

// is_builtin_scalar
#[must_use]
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins() {
        assert!(is_builtin_scalar("BigDecimal"));
        assert!(is_builtin_scalar("ID"));
        assert!(!is_builtin_scalar("Date"));
        assert!(!is_builtin_scalar("string"));
    }
}
