//! Conditional template engine for the Stencil source generator.
//!
//! Templates are plain text whose lines may carry conditional directives.
//! A directive only drives generation when it carries the trailing live
//! marker (`// exec`); directive-shaped lines without it are content and are
//! copied to the generated output like any other line.
//!
//! # Module Organization
//!
//! - [`snippet`] - Immutable line sequences ([`Snippet`])
//! - [`constants`] - Feature flags enabled for a run ([`Constants`])
//! - [`directive`] - Lexical classification of a single line ([`Directive`])
//! - [`state`] - The single-level conditional automaton ([`ConditionalState`])
//! - [`transform`] - Line filtering driven by the above ([`transform()`])
//! - [`substitute`] - Placeholder replacement ([`Substitutions`])
//! - [`template`] - Named templates with source-located diagnostics ([`Template`])
//!
//! # Example
//!
//! ```
//! use stencil_core::{Constants, Snippet};
//!
//! let snippet: Snippet = "#if A // exec\nalpha\n#else // exec\nbeta\n#endif // exec"
//!     .parse()
//!     .unwrap();
//!
//! let enabled = snippet.transform(&Constants::from_iter(["A"])).unwrap();
//! assert_eq!(enabled.lines(), ["alpha"]);
//!
//! let disabled = snippet.transform(&Constants::new()).unwrap();
//! assert_eq!(disabled.lines(), ["beta"]);
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod constants;
pub mod directive;
mod error;
pub mod snippet;
pub mod state;
pub mod substitute;
pub mod template;
pub mod transform;

pub use constants::Constants;
pub use directive::{Directive, Keyword, is_constant_name};
pub use error::{Error, Result};
pub use snippet::Snippet;
pub use state::{ConditionalState, IllegalTransition, Mode};
pub use substitute::Substitutions;
pub use template::Template;
pub use transform::transform;
