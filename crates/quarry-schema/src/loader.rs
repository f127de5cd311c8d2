use crate::{
    ast::{Document, TypeDefinition},
    directive::{DirectiveLocation, DirectiveValidator},
    error::SchemaError,
    parser::Parser,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, trace};

/// File extensions picked up when a directory is loaded.
pub const DEFAULT_EXTENSIONS: &[&str] = &["graphql", "gql"];

/// Parse a single in-memory document.
///
/// `source_name` only labels error messages.
pub fn parse_document(source: &str, source_name: &str) -> Result<Document, SchemaError> {
    let mut doc = Document::new();
    parse_into(&mut doc, source, source_name)?;

    Ok(doc)
}

/// Load a schema file, or every schema file in a directory, into one document.
pub fn load_path(path: impl AsRef<Path>) -> Result<Document, SchemaError> {
    load_paths(&[path.as_ref()], DEFAULT_EXTENSIONS)
}

/// Load and merge several files or directories, in the order given.
///
/// Directory entries are read in file-name order and filtered by
/// `extensions`; explicitly named files are always read.
pub fn load_paths<P, S>(paths: &[P], extensions: &[S]) -> Result<Document, SchemaError>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let mut doc = Document::new();

    for path in paths {
        for file in schema_files(path.as_ref(), extensions)? {
            let source = fs::read_to_string(&file).map_err(|source| SchemaError::Io {
                path: file.clone(),
                source,
            })?;
            trace!(file = %file.display(), bytes = source.len(), "parsing schema file");

            parse_into(&mut doc, &source, &file.display().to_string())?;
        }
    }
    debug!(definitions = doc.len(), "schema loaded");

    Ok(doc)
}

// schema_files
fn schema_files<S: AsRef<str>>(path: &Path, extensions: &[S]) -> Result<Vec<PathBuf>, SchemaError> {
    if !path.exists() {
        return Err(SchemaError::NotFound {
            path: path.to_path_buf(),
        });
    }
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let io_err = |source| SchemaError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(path).map_err(io_err)? {
        let file = entry.map_err(io_err)?.path();
        let matches = file
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|want| want.as_ref() == ext));

        if file.is_file() && matches {
            files.push(file);
        }
    }
    files.sort();

    Ok(files)
}

// parse_into
// parses, validates directives, then merges; nothing is merged on failure
fn parse_into(doc: &mut Document, source: &str, source_name: &str) -> Result<(), SchemaError> {
    let definitions = Parser::new(source, source_name)?.parse_definitions()?;

    let validator = DirectiveValidator { source_name };
    for def in &definitions {
        validate_definition(&validator, def)?;
    }

    for def in definitions {
        let name = def.name().to_string();
        let position = def.position();

        if doc.insert(def).is_err() {
            return Err(SchemaError::DuplicateType {
                source_name: source_name.to_string(),
                position,
                name,
            });
        }
    }

    Ok(())
}

fn validate_definition(
    validator: &DirectiveValidator<'_>,
    def: &TypeDefinition,
) -> Result<(), SchemaError> {
    validator.validate(def.directives(), def.location())?;

    match def {
        TypeDefinition::Object(object) | TypeDefinition::Interface(object) => {
            for field in &object.fields {
                validator.validate(&field.directives, DirectiveLocation::FieldDefinition)?;
            }
        }
        TypeDefinition::Enum(def) => {
            for value in &def.values {
                validator.validate(&value.directives, DirectiveLocation::EnumValue)?;
            }
        }
        TypeDefinition::Union(_) | TypeDefinition::Scalar(_) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_and_indexes_definitions() {
        let doc = parse_document(
            "type Post @entity { title: String }\nenum Status { DRAFT LIVE }",
            "inline",
        )
        .unwrap();

        assert_eq!(doc.len(), 2);
        assert!(matches!(doc.get("Post"), Some(TypeDefinition::Object(_))));
        assert!(matches!(doc.get("Status"), Some(TypeDefinition::Enum(_))));
        assert!(doc.get("Missing").is_none());
    }

    #[test]
    fn directive_misuse_is_reported_with_location() {
        let err = parse_document("type Post @unique { title: String }", "inline").unwrap_err();

        assert!(matches!(err, SchemaError::DirectiveLocation { .. }));
        assert!(err.to_string().starts_with("inline:1:11:"));
    }

    #[test]
    fn unknown_directive_on_enum_value() {
        let err = parse_document("enum Status { DRAFT @deprecated }", "inline").unwrap_err();

        assert!(matches!(err, SchemaError::UnknownDirective { .. }));
    }

    #[test]
    fn entity_directive_on_union_is_rejected() {
        let err = parse_document("union U @entity = A | B", "inline").unwrap_err();

        assert!(err.to_string().contains("may not be used on UNION"));
    }

    #[test]
    fn duplicate_type_names_are_rejected() {
        let err = parse_document(
            "type Post @entity { a: Int }\ntype Post @entity { b: Int }",
            "inline",
        )
        .unwrap_err();

        assert!(matches!(err, SchemaError::DuplicateType { ref name, .. } if name == "Post"));
    }

    #[test]
    fn loads_directory_in_file_name_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.graphql"), "type B @entity { f: Int }").unwrap();
        fs::write(dir.path().join("a.gql"), "type A @entity { f: Int }").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a schema").unwrap();

        let doc = load_path(dir.path()).unwrap();
        let names: Vec<_> = doc.definitions().map(TypeDefinition::name).collect();

        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn duplicates_across_files_are_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.graphql"), "type A @entity { f: Int }").unwrap();
        fs::write(dir.path().join("b.graphql"), "type A @entity { g: Int }").unwrap();

        assert!(matches!(
            load_path(dir.path()),
            Err(SchemaError::DuplicateType { .. })
        ));
    }

    #[test]
    fn custom_extensions() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.sdl"), "type A @entity { f: Int }").unwrap();
        fs::write(dir.path().join("b.graphql"), "type B @entity { f: Int }").unwrap();

        let doc = load_paths(&[dir.path()], &["sdl"]).unwrap();

        assert_eq!(doc.len(), 1);
        assert!(doc.get("A").is_some());
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempdir().unwrap();

        assert!(matches!(
            load_path(dir.path().join("nope")),
            Err(SchemaError::NotFound { .. })
        ));
    }
}
