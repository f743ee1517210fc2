//! `stencil.toml` parsing and validation.
//!
//! A manifest declares the templates of a generation run and the types each
//! template is applied to. Parsing validates names, namespaces, template
//! references, type descriptors and literals, and reports failures as
//! [`miette`] diagnostics pointing into the manifest source.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    GeneratorConfig, Manifest, ParseContext, StencilToml, TemplateConfig, TypeConfig,
    UnitConfigError, parse_manifest,
};
