//! Recursive-descent parser over the token stream produced by the lexer.

use crate::{
    ast::{
        Argument, ConstValue, Directive, EnumTypeDefinition, EnumValueDefinition,
        FieldDefinition, ObjectTypeDefinition, ScalarTypeDefinition, TypeDefinition, TypeRef,
        UnionTypeDefinition,
    },
    error::SchemaError,
    lexer::{Lexer, Punctuation, Token},
    position::{SourcePosition, Spanning},
};
use derive_more::Display;

///
/// ExpectedToken
/// The kind of token the parser was looking for when it failed.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
enum ExpectedToken {
    #[display("a definition")]
    Definition,
    #[display("a name")]
    Name,
    #[display("\"{_0}\"")]
    Punctuation(Punctuation),
    #[display("a type")]
    Type,
    #[display("a value")]
    Value,
}

///
/// Keyword
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
enum Keyword {
    #[display("enum")]
    Enum,
    #[display("implements")]
    Implements,
    #[display("interface")]
    Interface,
    #[display("scalar")]
    Scalar,
    #[display("type")]
    Type,
    #[display("union")]
    Union,
}

impl Keyword {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "enum" => Some(Self::Enum),
            "implements" => Some(Self::Implements),
            "interface" => Some(Self::Interface),
            "scalar" => Some(Self::Scalar),
            "type" => Some(Self::Type),
            "union" => Some(Self::Union),
            _ => None,
        }
    }
}

// Definition keywords that are valid SDL but outside the supported subset.
const UNSUPPORTED_DEFINITIONS: &[&str] = &["directive", "extend", "input", "schema"];

// Nesting allowed in list types and constant values.
const RECURSION_LIMIT: usize = 64;

pub(crate) type Result<T> = core::result::Result<T, SchemaError>;

///
/// Parser
///

pub(crate) struct Parser<'a> {
    source_name: &'a str,
    tokens: Vec<Spanning<Token>>,
    pos: usize,
    recursion_limit: usize,
}

impl<'a> Parser<'a> {
    /// Tokenize `source` up front; lexer failures surface as syntax errors.
    pub(crate) fn new(source: &str, source_name: &'a str) -> Result<Self> {
        let tokens = Lexer::new(source)
            .tokenize()
            .map_err(|err| SchemaError::Syntax {
                source_name: source_name.to_string(),
                position: err.position,
                message: err.message,
            })?;

        Ok(Self {
            source_name,
            tokens,
            pos: 0,
            recursion_limit: RECURSION_LIMIT,
        })
    }

    /// Parse every definition in the source, in order.
    pub(crate) fn parse_definitions(mut self) -> Result<Vec<TypeDefinition>> {
        let mut definitions = Vec::new();
        while self.peek().is_some() {
            definitions.push(self.parse_definition()?);
        }

        Ok(definitions)
    }

    //
    // token helpers
    //

    fn peek(&self) -> Option<&Spanning<Token>> {
        self.tokens.get(self.pos)
    }

    fn is_next_punctuation(&self, p: Punctuation) -> bool {
        matches!(self.peek(), Some(t) if t.item == Token::Punctuation(p))
    }

    fn is_next_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.peek(), Some(Spanning { item: Token::Name(name), .. }) if Keyword::from_name(name) == Some(keyword))
    }

    fn end_position(&self) -> SourcePosition {
        self.tokens.last().map(|t| t.end).unwrap_or_default()
    }

    fn syntax_error(&self, position: SourcePosition, message: impl Into<String>) -> SchemaError {
        SchemaError::Syntax {
            source_name: self.source_name.to_string(),
            position,
            message: message.into(),
        }
    }

    fn unexpected<T>(&self, expected: ExpectedToken, found: Option<&Spanning<Token>>) -> Result<T> {
        Err(match found {
            Some(token) => self.syntax_error(
                token.start,
                format!("expected {expected}, found \"{}\"", token.item),
            ),
            None => self.syntax_error(
                self.end_position(),
                format!("expected {expected}, found end of file"),
            ),
        })
    }

    fn expect_punctuation(&mut self, p: Punctuation) -> Result<SourcePosition> {
        match self.peek() {
            Some(t) if t.item == Token::Punctuation(p) => {
                let start = t.start;
                self.pos += 1;
                Ok(start)
            }
            other => self.unexpected(ExpectedToken::Punctuation(p), other),
        }
    }

    // limit_recursion
    // runs `parse` one nesting level deeper, failing once the limit is spent
    fn limit_recursion<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.recursion_limit == 0 {
            let position = self.peek().map_or_else(|| self.end_position(), |t| t.start);
            return Err(self.syntax_error(position, "recursion limit exceeded"));
        }

        self.recursion_limit -= 1;
        let result = parse(self);
        self.recursion_limit += 1;

        result
    }

    fn skip_punctuation(&mut self, p: Punctuation) -> bool {
        if self.is_next_punctuation(p) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_name(&mut self) -> Result<Spanning<String>> {
        match self.peek() {
            Some(Spanning {
                item: Token::Name(name),
                start,
                end,
            }) => {
                if name.starts_with("__") {
                    return Err(self.syntax_error(
                        *start,
                        format!("name \"{name}\" must not begin with \"__\", which is reserved"),
                    ));
                }
                let spanned = Spanning::start_end(*start, *end, name.clone());
                self.pos += 1;
                Ok(spanned)
            }
            other => self.unexpected(ExpectedToken::Name, other),
        }
    }

    fn parse_description(&mut self) -> Option<String> {
        match self.peek() {
            Some(Spanning {
                item: Token::String(s) | Token::BlockString(s),
                ..
            }) => {
                let description = s.clone();
                self.pos += 1;
                Some(description)
            }
            _ => None,
        }
    }

    /// Parse `open item* close`, requiring at least one item.
    fn parse_delimited_nonempty<T, F>(
        &mut self,
        open: Punctuation,
        close: Punctuation,
        mut parse: F,
    ) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        self.expect_punctuation(open)?;
        let mut items = vec![parse(self)?];
        while !self.skip_punctuation(close) {
            if self.peek().is_none() {
                return self.unexpected(ExpectedToken::Punctuation(close), None);
            }
            items.push(parse(self)?);
        }

        Ok(items)
    }

    //
    // definitions
    //

    fn parse_definition(&mut self) -> Result<TypeDefinition> {
        let description = self.parse_description();

        let (keyword, start) = match self.peek() {
            Some(Spanning {
                item: Token::Name(name),
                start,
                ..
            }) => match Keyword::from_name(name) {
                Some(keyword) if keyword != Keyword::Implements => (keyword, *start),
                _ if UNSUPPORTED_DEFINITIONS.contains(&name.as_str()) => {
                    return Err(self.syntax_error(
                        *start,
                        format!("\"{name}\" definitions are not supported"),
                    ));
                }
                _ => return self.unexpected(ExpectedToken::Definition, self.peek()),
            },
            other => return self.unexpected(ExpectedToken::Definition, other),
        };
        self.pos += 1;

        let def = match keyword {
            Keyword::Type => TypeDefinition::Object(self.parse_object(description, start)?),
            Keyword::Interface => {
                TypeDefinition::Interface(self.parse_object(description, start)?)
            }
            Keyword::Union => TypeDefinition::Union(self.parse_union(description, start)?),
            Keyword::Enum => TypeDefinition::Enum(self.parse_enum(description, start)?),
            Keyword::Scalar => TypeDefinition::Scalar(ScalarTypeDefinition {
                description,
                name: self.parse_name()?.item,
                directives: self.parse_directives()?,
                position: start,
            }),
            Keyword::Implements => return self.unexpected(ExpectedToken::Definition, None),
        };

        Ok(def)
    }

    fn parse_object(
        &mut self,
        description: Option<String>,
        position: SourcePosition,
    ) -> Result<ObjectTypeDefinition> {
        let name = self.parse_name()?.item;
        let implements = self.parse_implements()?;
        let directives = self.parse_directives()?;

        let fields = if self.is_next_punctuation(Punctuation::BraceL) {
            self.parse_delimited_nonempty(Punctuation::BraceL, Punctuation::BraceR, Self::parse_field)?
        } else {
            Vec::new()
        };

        Ok(ObjectTypeDefinition {
            description,
            name,
            implements,
            directives,
            fields,
            position,
        })
    }

    fn parse_implements(&mut self) -> Result<Vec<String>> {
        if !self.is_next_keyword(Keyword::Implements) {
            return Ok(Vec::new());
        }
        self.pos += 1;

        self.skip_punctuation(Punctuation::Amp);
        let mut names = vec![self.parse_name()?.item];
        while self.skip_punctuation(Punctuation::Amp) {
            names.push(self.parse_name()?.item);
        }

        Ok(names)
    }

    fn parse_field(&mut self) -> Result<FieldDefinition> {
        let description = self.parse_description();
        let name = self.parse_name()?;

        if self.is_next_punctuation(Punctuation::ParenL) {
            let position = self.peek().map_or(name.end, |t| t.start);
            return Err(self.syntax_error(
                position,
                format!("field \"{}\" declares arguments, which are not supported", name.item),
            ));
        }

        self.expect_punctuation(Punctuation::Colon)?;
        let ty = self.parse_type()?;
        let directives = self.parse_directives()?;

        Ok(FieldDefinition {
            description,
            name: name.item,
            ty,
            directives,
            position: name.start,
        })
    }

    fn parse_type(&mut self) -> Result<TypeRef> {
        self.limit_recursion(Self::parse_type_ref)
    }

    fn parse_type_ref(&mut self) -> Result<TypeRef> {
        let base = match self.peek() {
            Some(t) if t.item == Token::Punctuation(Punctuation::BracketL) => {
                self.pos += 1;
                let inner = self.parse_type()?;
                self.expect_punctuation(Punctuation::BracketR)?;
                TypeRef::List(Box::new(inner))
            }
            Some(Spanning {
                item: Token::Name(_),
                ..
            }) => TypeRef::Named(self.parse_name()?.item),
            other => return self.unexpected(ExpectedToken::Type, other),
        };

        if self.skip_punctuation(Punctuation::Bang) {
            Ok(TypeRef::NonNull(Box::new(base)))
        } else {
            Ok(base)
        }
    }

    fn parse_union(
        &mut self,
        description: Option<String>,
        position: SourcePosition,
    ) -> Result<UnionTypeDefinition> {
        let name = self.parse_name()?.item;
        let directives = self.parse_directives()?;

        let mut members = Vec::new();
        if self.skip_punctuation(Punctuation::Equals) {
            self.skip_punctuation(Punctuation::Pipe);
            members.push(self.parse_name()?.item);
            while self.skip_punctuation(Punctuation::Pipe) {
                members.push(self.parse_name()?.item);
            }
        }

        Ok(UnionTypeDefinition {
            description,
            name,
            directives,
            members,
            position,
        })
    }

    fn parse_enum(
        &mut self,
        description: Option<String>,
        position: SourcePosition,
    ) -> Result<EnumTypeDefinition> {
        let name = self.parse_name()?.item;
        let directives = self.parse_directives()?;

        let values = if self.is_next_punctuation(Punctuation::BraceL) {
            self.parse_delimited_nonempty(
                Punctuation::BraceL,
                Punctuation::BraceR,
                Self::parse_enum_value,
            )?
        } else {
            Vec::new()
        };

        Ok(EnumTypeDefinition {
            description,
            name,
            directives,
            values,
            position,
        })
    }

    fn parse_enum_value(&mut self) -> Result<EnumValueDefinition> {
        let description = self.parse_description();
        let name = self.parse_name()?;

        if matches!(name.item.as_str(), "true" | "false" | "null") {
            return Err(self.syntax_error(
                name.start,
                format!("\"{}\" cannot be used as an enum value", name.item),
            ));
        }

        Ok(EnumValueDefinition {
            description,
            name: name.item,
            directives: self.parse_directives()?,
            position: name.start,
        })
    }

    //
    // directives & values
    //

    fn parse_directives(&mut self) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();
        while self.is_next_punctuation(Punctuation::At) {
            let position = self.expect_punctuation(Punctuation::At)?;
            let name = self.parse_name()?.item;
            let arguments = if self.is_next_punctuation(Punctuation::ParenL) {
                self.parse_delimited_nonempty(
                    Punctuation::ParenL,
                    Punctuation::ParenR,
                    Self::parse_argument,
                )?
            } else {
                Vec::new()
            };

            directives.push(Directive {
                name,
                arguments,
                position,
            });
        }

        Ok(directives)
    }

    fn parse_argument(&mut self) -> Result<Argument> {
        let name = self.parse_name()?;
        self.expect_punctuation(Punctuation::Colon)?;
        let value = self.parse_const_value()?;

        Ok(Argument {
            name: name.item,
            value,
            position: name.start,
        })
    }

    fn parse_const_value(&mut self) -> Result<ConstValue> {
        self.limit_recursion(Self::parse_value)
    }

    fn parse_value(&mut self) -> Result<ConstValue> {
        let Some(token) = self.peek() else {
            return self.unexpected(ExpectedToken::Value, None);
        };

        let value = match &token.item {
            Token::Int(n) => ConstValue::Int(n.clone()),
            Token::Float(n) => ConstValue::Float(n.clone()),
            Token::String(s) | Token::BlockString(s) => ConstValue::String(s.clone()),
            Token::Name(name) => match name.as_str() {
                "true" => ConstValue::Boolean(true),
                "false" => ConstValue::Boolean(false),
                "null" => ConstValue::Null,
                _ => ConstValue::Enum(name.clone()),
            },
            Token::Punctuation(Punctuation::BracketL) => return self.parse_list_value(),
            Token::Punctuation(Punctuation::BraceL) => return self.parse_object_value(),
            Token::Punctuation(Punctuation::Dollar) => {
                return Err(self.syntax_error(
                    token.start,
                    "variables are not allowed in a schema document",
                ));
            }
            Token::Punctuation(_) => return self.unexpected(ExpectedToken::Value, Some(token)),
        };
        self.pos += 1;

        Ok(value)
    }

    fn parse_list_value(&mut self) -> Result<ConstValue> {
        self.expect_punctuation(Punctuation::BracketL)?;
        let mut items = Vec::new();
        while !self.skip_punctuation(Punctuation::BracketR) {
            items.push(self.parse_const_value()?);
        }

        Ok(ConstValue::List(items))
    }

    fn parse_object_value(&mut self) -> Result<ConstValue> {
        self.expect_punctuation(Punctuation::BraceL)?;
        let mut entries = Vec::new();
        while !self.skip_punctuation(Punctuation::BraceR) {
            let name = self.parse_name()?.item;
            self.expect_punctuation(Punctuation::Colon)?;
            entries.push((name, self.parse_const_value()?));
        }

        Ok(ConstValue::Object(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Vec<TypeDefinition>> {
        Parser::new(source, "test.graphql")?.parse_definitions()
    }

    fn object(def: &TypeDefinition) -> &ObjectTypeDefinition {
        match def {
            TypeDefinition::Object(o) | TypeDefinition::Interface(o) => o,
            other => panic!("expected object, got {other:?}"),
        }
    }

    #[test]
    fn parses_entity_with_fields() {
        let defs = parse(
            r#"
            "A blog post"
            type Post @entity {
                id: ID!
                title: String! @fulltext(query: "search")
                tags: [String!]
                author: Author
            }
            "#,
        )
        .unwrap();

        assert_eq!(defs.len(), 1);
        let post = object(&defs[0]);
        assert_eq!(post.name, "Post");
        assert_eq!(post.description.as_deref(), Some("A blog post"));
        assert_eq!(post.directives[0].name, "entity");
        assert_eq!(post.fields.len(), 4);
        assert_eq!(post.fields[1].ty.to_string(), "String!");
        assert_eq!(
            post.fields[1].directives[0].string_argument("query"),
            Some("search")
        );
        assert_eq!(post.fields[2].ty.list_depth(), 1);
        assert_eq!(post.position, SourcePosition::new(3, 13));
    }

    #[test]
    fn parses_implements_union_enum_and_scalar() {
        let defs = parse(
            r"
            interface Event @entity { name: String }
            type Transfer implements & Event & Other @entity { name: String }
            union Shape = | Circle | Square
            enum Color { RED GREEN, BLUE }
            scalar DateTime
            ",
        )
        .unwrap();

        assert!(matches!(defs[0], TypeDefinition::Interface(_)));
        assert_eq!(object(&defs[1]).implements, vec!["Event", "Other"]);

        let TypeDefinition::Union(shape) = &defs[2] else {
            panic!("expected union");
        };
        assert_eq!(shape.members, vec!["Circle", "Square"]);

        let TypeDefinition::Enum(color) = &defs[3] else {
            panic!("expected enum");
        };
        let values: Vec<_> = color.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(values, vec!["RED", "GREEN", "BLUE"]);

        assert!(matches!(&defs[4], TypeDefinition::Scalar(s) if s.name == "DateTime"));
    }

    #[test]
    fn parses_nested_lists_for_later_rejection() {
        let defs = parse("type Matrix @jsonField { rows: [[Int!]!]! }").unwrap();

        assert_eq!(object(&defs[0]).fields[0].ty.list_depth(), 2);
    }

    #[test]
    fn parses_const_values() {
        let defs = parse(r#"type A @x(a: 1, b: 2.5, c: true, d: null, e: RED, f: [1 2], g: {k: "v"}) { f: Int }"#)
            .unwrap();
        let args = &object(&defs[0]).directives[0].arguments;

        assert_eq!(args[0].value, ConstValue::Int("1".into()));
        assert_eq!(args[1].value, ConstValue::Float("2.5".into()));
        assert_eq!(args[2].value, ConstValue::Boolean(true));
        assert_eq!(args[3].value, ConstValue::Null);
        assert_eq!(args[4].value, ConstValue::Enum("RED".into()));
        assert!(matches!(&args[5].value, ConstValue::List(items) if items.len() == 2));
        assert!(matches!(&args[6].value, ConstValue::Object(entries) if entries[0].0 == "k"));
    }

    #[test]
    fn rejects_unknown_definition() {
        let err = parse("_type Cat @entity { name: String }").unwrap_err();

        assert!(matches!(err, SchemaError::Syntax { .. }));
        assert!(err.to_string().contains("syntax error"));
    }

    #[test]
    fn rejects_unsupported_definitions() {
        for source in [
            "input Filter { name: String }",
            "schema { query: Query }",
            "extend type Post { title: String }",
            "directive @foo on OBJECT",
        ] {
            assert!(
                matches!(parse(source), Err(SchemaError::Syntax { .. })),
                "{source}"
            );
        }
    }

    #[test]
    fn rejects_field_arguments() {
        let err = parse("type Query { posts(first: Int): [Post] }").unwrap_err();

        assert!(err.to_string().contains("arguments"));
    }

    #[test]
    fn rejects_reserved_names() {
        assert!(matches!(
            parse("type __Post { title: String }"),
            Err(SchemaError::Syntax { .. })
        ));
    }

    #[test]
    fn reports_position_of_unexpected_token() {
        let err = parse("type Post {\n  title String\n}").unwrap_err();

        assert_eq!(err.position(), Some(SourcePosition::new(2, 9)));
    }

    #[test]
    fn unexpected_end_of_file() {
        let err = parse("type Post { title: ").unwrap_err();

        assert!(err.to_string().contains("end of file"));
    }

    #[test]
    fn lexer_errors_become_syntax_errors() {
        assert!(matches!(
            parse("type Post { title: String ? }"),
            Err(SchemaError::Syntax { .. })
        ));
    }

    #[test]
    fn deeply_nested_list_type_is_a_syntax_error() {
        let depth = 10_000;
        let source = format!("type Cube {{ cells: {}Int{} }}", "[".repeat(depth), "]".repeat(depth));
        let err = parse(&source).unwrap_err();

        assert!(matches!(err, SchemaError::Syntax { .. }));
        assert!(err.to_string().contains("recursion limit exceeded"));
    }

    #[test]
    fn deeply_nested_value_is_a_syntax_error() {
        let depth = 10_000;
        let source = format!(
            "type Post {{ title: String @fulltext(query: {}\"q\"{}) }}",
            "[".repeat(depth),
            "]".repeat(depth)
        );

        assert!(matches!(parse(&source), Err(SchemaError::Syntax { .. })));
    }

    #[test]
    fn nesting_below_the_limit_parses() {
        let source = format!("type Cube {{ cells: {}Int{} }}", "[".repeat(32), "]".repeat(32));

        assert_eq!(object(&parse(&source).unwrap()[0]).fields[0].ty.list_depth(), 32);
    }
}
