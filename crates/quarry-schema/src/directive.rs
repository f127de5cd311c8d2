//! The closed set of directives a schema may use.
//!
//! Every directive occurrence is checked against its declaration here at
//! parse time, so later stages only ever see well-formed annotations.

use crate::{
    ast::{ConstValue, Directive},
    error::SchemaError,
};
use derive_more::Display;

///
/// DirectiveKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum DirectiveKind {
    #[display("derivedFrom")]
    DerivedFrom,
    #[display("entity")]
    Entity,
    #[display("fulltext")]
    FullText,
    #[display("jsonField")]
    JsonField,
    #[display("unique")]
    Unique,
    #[display("variant")]
    Variant,
}

impl DirectiveKind {
    pub const ALL: [Self; 6] = [
        Self::DerivedFrom,
        Self::Entity,
        Self::FullText,
        Self::JsonField,
        Self::Unique,
        Self::Variant,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DerivedFrom => "derivedFrom",
            Self::Entity => "entity",
            Self::FullText => "fulltext",
            Self::JsonField => "jsonField",
            Self::Unique => "unique",
            Self::Variant => "variant",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Element kinds the directive may decorate.
    #[must_use]
    pub const fn locations(self) -> &'static [DirectiveLocation] {
        match self {
            Self::Entity => &[DirectiveLocation::Object, DirectiveLocation::Interface],
            Self::Variant | Self::JsonField => &[DirectiveLocation::Object],
            Self::Unique | Self::DerivedFrom | Self::FullText => {
                &[DirectiveLocation::FieldDefinition]
            }
        }
    }

    /// Declared arguments, all of them required.
    #[must_use]
    pub const fn arguments(self) -> &'static [ArgumentSpec] {
        match self {
            Self::DerivedFrom => &[DERIVED_FROM_FIELD],
            Self::FullText => &[FULLTEXT_QUERY],
            Self::Entity | Self::JsonField | Self::Unique | Self::Variant => &[],
        }
    }
}

///
/// DirectiveLocation
/// Element kinds a directive may be attached to.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[remain::sorted]
pub enum DirectiveLocation {
    #[display("ENUM")]
    Enum,
    #[display("ENUM_VALUE")]
    EnumValue,
    #[display("FIELD_DEFINITION")]
    FieldDefinition,
    #[display("INTERFACE")]
    Interface,
    #[display("OBJECT")]
    Object,
    #[display("SCALAR")]
    Scalar,
    #[display("UNION")]
    Union,
}

///
/// ArgumentSpec
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ArgumentSpec {
    pub name: &'static str,
    pub ty: ArgumentType,
}

impl ArgumentSpec {
    const fn string(name: &'static str) -> Self {
        Self {
            name,
            ty: ArgumentType::String,
        }
    }
}

const DERIVED_FROM_FIELD: ArgumentSpec = ArgumentSpec::string("field");
const FULLTEXT_QUERY: ArgumentSpec = ArgumentSpec::string("query");

///
/// ArgumentType
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ArgumentType {
    #[display("String!")]
    String,
}

impl ArgumentType {
    const fn accepts(self, value: &ConstValue) -> bool {
        match self {
            Self::String => matches!(value, ConstValue::String(_)),
        }
    }
}

///
/// DirectiveValidator
/// Checks every directive attached to one element.
///

pub(crate) struct DirectiveValidator<'a> {
    pub source_name: &'a str,
}

impl DirectiveValidator<'_> {
    pub(crate) fn validate(
        &self,
        directives: &[Directive],
        location: DirectiveLocation,
    ) -> Result<(), SchemaError> {
        let mut seen: Vec<DirectiveKind> = Vec::with_capacity(directives.len());

        for directive in directives {
            let kind = self.validate_one(directive, location)?;

            if seen.contains(&kind) {
                return Err(SchemaError::DuplicateDirective {
                    source_name: self.source_name.to_string(),
                    position: directive.position,
                    directive: directive.name.clone(),
                });
            }
            seen.push(kind);
        }

        Ok(())
    }

    fn validate_one(
        &self,
        directive: &Directive,
        location: DirectiveLocation,
    ) -> Result<DirectiveKind, SchemaError> {
        let Some(kind) = directive.kind() else {
            return Err(SchemaError::UnknownDirective {
                source_name: self.source_name.to_string(),
                position: directive.position,
                directive: directive.name.clone(),
            });
        };

        if !kind.locations().contains(&location) {
            return Err(SchemaError::DirectiveLocation {
                source_name: self.source_name.to_string(),
                position: directive.position,
                directive: directive.name.clone(),
                location,
            });
        }

        // Phase 1: every supplied argument must be declared with a matching type
        for arg in &directive.arguments {
            let Some(spec) = kind.arguments().iter().find(|spec| spec.name == arg.name) else {
                return Err(self.argument_error(
                    directive,
                    &arg.name,
                    format!("unknown argument \"{}\"", arg.name),
                ));
            };

            if !spec.ty.accepts(&arg.value) {
                return Err(self.argument_error(
                    directive,
                    &arg.name,
                    format!(
                        "argument \"{}\" of type \"{}\" cannot be {}",
                        spec.name,
                        spec.ty,
                        arg.value.kind_name()
                    ),
                ));
            }
        }

        // Phase 2: required arguments must be present
        for spec in kind.arguments() {
            if directive.argument(spec.name).is_none() {
                return Err(self.argument_error(
                    directive,
                    spec.name,
                    format!(
                        "argument \"{}\" of type \"{}\" is required",
                        spec.name, spec.ty
                    ),
                ));
            }
        }

        Ok(kind)
    }

    fn argument_error(&self, directive: &Directive, argument: &str, message: String) -> SchemaError {
        SchemaError::Argument {
            source_name: self.source_name.to_string(),
            position: directive.position,
            directive: directive.name.clone(),
            argument: argument.to_string(),
            message,
        }
    }
}
