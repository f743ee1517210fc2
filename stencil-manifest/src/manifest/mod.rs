//! Manifest types and parsing for stencil.toml files.

mod file;
mod parse;
mod validate;

use std::path::PathBuf;

use indexmap::IndexMap;
use miette::Diagnostic;
pub use file::StencilToml;
pub use parse::parse_manifest;
use serde::Deserialize;
use stencil_codegen::{
    GenerationUnit, Literal, LiteralError, TypeDesc, TypeNameFormatter, TypeParseError,
    WriterOptions,
};
use stencil_core::Constants;
use thiserror::Error;
pub use validate::ParseContext;

/// Root manifest for stencil.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Run-wide generation settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Output formatting
    #[serde(default)]
    pub writer: WriterOptions,

    /// Templates by name
    #[serde(default)]
    pub templates: IndexMap<String, TemplateConfig>,

    /// Generated types by name, in declaration order
    #[serde(default)]
    pub types: IndexMap<String, TypeConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Output directory, relative to the manifest.
    pub output: PathBuf,
    /// Appended to each hint name to form the file name.
    pub extension: String,
    /// Constants enabled for every type.
    pub constants: Vec<String>,
    /// Namespaces whose types are written unqualified.
    pub usings: Vec<String>,
    /// Lines written at the top of every generated file.
    pub header: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("Generated"),
            extension: ".cs".to_string(),
            constants: Vec::new(),
            usings: Vec::new(),
            header: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Template file, relative to the manifest.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeConfig {
    #[serde(default)]
    pub namespace: String,
    pub template: String,
    pub value_type: Option<String>,
    pub behavior: Option<String>,
    #[serde(default)]
    pub constants: Vec<String>,
    #[serde(default)]
    pub replace: IndexMap<String, String>,
    #[serde(default)]
    pub literals: IndexMap<String, toml::Value>,
}

/// Why a type entry could not be turned into a [`GenerationUnit`].
#[derive(Debug, Error, Diagnostic)]
pub enum UnitConfigError {
    #[error("invalid value_type: {0}")]
    #[diagnostic(
        code(stencil::manifest::value_type),
        help("value_type takes a type descriptor such as `System.Guid` or `List<int>`")
    )]
    ValueType(#[source] TypeParseError),

    #[error("invalid behavior: {0}")]
    #[diagnostic(
        code(stencil::manifest::behavior),
        help("behavior takes a type descriptor such as `Shop.Ids.GuidBehavior`")
    )]
    Behavior(#[source] TypeParseError),

    #[error("invalid literal '{key}': {source}")]
    #[diagnostic(
        code(stencil::manifest::literal),
        help("literals may be booleans, integers, strings, or `{{ null = true }}`, `{{ type = \"..\" }}` and `{{ enum = \"..\", member = \"..\" }}` tables")
    )]
    Literal {
        key: String,
        #[source]
        source: LiteralError,
    },
}

impl TypeConfig {
    pub fn value_type(&self) -> Option<Result<TypeDesc, TypeParseError>> {
        self.value_type.as_deref().map(TypeDesc::parse)
    }

    pub fn behavior(&self) -> Option<Result<TypeDesc, TypeParseError>> {
        self.behavior.as_deref().map(TypeDesc::parse)
    }

    /// Build the generation unit for the type named `name`.
    pub fn unit(&self, name: &str) -> Result<GenerationUnit, UnitConfigError> {
        let mut unit = GenerationUnit::new(&self.namespace, name);
        unit.value_type = self
            .value_type()
            .transpose()
            .map_err(UnitConfigError::ValueType)?;
        unit.behavior = self
            .behavior()
            .transpose()
            .map_err(UnitConfigError::Behavior)?;
        unit.constants = self.constants.iter().cloned().collect();
        unit.replacements = self.replace.clone();
        for (key, value) in &self.literals {
            let literal = Literal::try_from(value).map_err(|source| UnitConfigError::Literal {
                key: key.clone(),
                source,
            })?;
            unit.literals.insert(key.clone(), literal);
        }
        Ok(unit)
    }
}

impl Manifest {
    /// Constants enabled for every type.
    pub fn constants(&self) -> Constants {
        self.generator.constants.iter().cloned().collect()
    }

    /// A formatter treating the configured usings as available.
    pub fn formatter(&self) -> TypeNameFormatter {
        TypeNameFormatter::new().with_available_namespaces(self.generator.usings.iter().cloned())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}
