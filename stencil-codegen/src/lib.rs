//! Output side of the Stencil source generator.
//!
//! # Module Organization
//!
//! - [`writer`] - Indented text output with scope guards ([`CodeWriter`])
//! - [`type_name`] - Type descriptors and their rendering ([`TypeNameFormatter`])
//! - [`literal`] - Source literals for placeholder values ([`Literal`])
//! - [`unit`] - One template applied to one type ([`SourceGenerator`])

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod literal;
pub mod type_name;
pub mod unit;
pub mod writer;

pub use literal::{Literal, LiteralError};
pub use type_name::{
    NamedType, Primitive, TypeDesc, TypeNameCache, TypeNameFormatter, TypeNameMode,
    TypeParseError,
};
pub use unit::{GeneratedSource, GenerationUnit, SourceGenerator, UnitError};
pub use writer::{
    CodeWriter, Indent, NamespaceStyle, Newline, Scope, WriterError, WriterOptions,
};
