//! Core operations.
//!
//! This module contains the business logic for stencil commands,
//! separated from CLI argument parsing and output rendering.

pub mod bake;
pub mod check;
mod units;

pub use bake::{BakeOptions, bake};
pub use check::check;
