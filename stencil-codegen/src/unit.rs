//! Generation units: one template applied to one type.

use indexmap::IndexMap;
use miette::Diagnostic;
use stencil_core::{Constants, Substitutions, Template};
use thiserror::Error;
use tracing::debug;

use crate::{
    literal::Literal,
    type_name::{TypeDesc, TypeNameFormatter},
    writer::{CodeWriter, WriterError, WriterOptions},
};

/// Per-type parameters of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationUnit {
    /// Simple name of the generated type.
    pub type_name: String,
    /// Namespace of the generated type. Empty for the global namespace.
    pub namespace: String,
    pub value_type: Option<TypeDesc>,
    pub behavior: Option<TypeDesc>,
    /// Constants enabled for this type in addition to the run-wide set.
    pub constants: Constants,
    /// Extra `$key$` replacements, applied in order.
    pub replacements: IndexMap<String, String>,
    /// Extra `$key$` replacements rendered as source literals.
    pub literals: IndexMap<String, Literal>,
}

impl GenerationUnit {
    pub fn new(namespace: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn with_value_type(mut self, ty: TypeDesc) -> Self {
        self.value_type = Some(ty);
        self
    }

    pub fn with_behavior(mut self, ty: TypeDesc) -> Self {
        self.behavior = Some(ty);
        self
    }

    pub fn with_constant(mut self, name: impl Into<String>) -> Self {
        self.constants.insert(name);
        self
    }

    pub fn with_replacement(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.replacements.insert(key.into(), value.into());
        self
    }

    pub fn with_literal(mut self, key: impl Into<String>, literal: Literal) -> Self {
        self.literals.insert(key.into(), literal);
        self
    }

    /// The unique key of the generated source, `{namespace}.{typeName}.g`.
    pub fn hint_name(&self) -> String {
        if self.namespace.is_empty() {
            format!("{}.g", self.type_name)
        } else {
            format!("{}.{}.g", self.namespace, self.type_name)
        }
    }
}

/// Output of one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub hint_name: String,
    pub content: String,
}

#[derive(Debug, Error, Diagnostic)]
pub enum UnitError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Template(stencil_core::Error),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Writer(#[from] WriterError),
}

impl From<Box<stencil_core::Error>> for UnitError {
    fn from(error: Box<stencil_core::Error>) -> Self {
        Self::Template(*error)
    }
}

/// Runs templates for generation units with shared run-wide settings.
#[derive(Debug, Clone, Default)]
pub struct SourceGenerator {
    options: WriterOptions,
    header: Vec<String>,
    constants: Constants,
    formatter: TypeNameFormatter,
}

impl SourceGenerator {
    pub fn new(options: WriterOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Lines written verbatim at the top of every generated source.
    pub fn with_header<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Constants enabled for every unit.
    pub fn with_constants(mut self, constants: Constants) -> Self {
        self.constants = constants;
        self
    }

    pub fn with_formatter(mut self, formatter: TypeNameFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn formatter(&self) -> &TypeNameFormatter {
        &self.formatter
    }

    /// Placeholder values for `unit`.
    pub fn substitutions(&self, unit: &GenerationUnit) -> Substitutions {
        let mut substitutions = Substitutions::new()
            .with("TypeName", &unit.type_name)
            .with("Namespace", &unit.namespace);
        if let Some(ty) = &unit.value_type {
            substitutions.insert("ValueType", self.formatter.qualified(ty));
        }
        if let Some(ty) = &unit.behavior {
            substitutions.insert("BehaviorType", self.formatter.qualified(ty));
        }
        for (key, value) in &unit.replacements {
            substitutions.insert(key, value);
        }
        for (key, literal) in &unit.literals {
            substitutions.insert(key, literal.render(&self.formatter));
        }
        substitutions
    }

    /// Apply `template` to `unit`.
    pub fn generate(
        &self,
        template: &Template,
        unit: &GenerationUnit,
    ) -> Result<GeneratedSource, UnitError> {
        let hint_name = unit.hint_name();
        let constants = self.constants.union(&unit.constants);
        debug!(%hint_name, template = template.name(), %constants, "generating unit");

        let body = template
            .render(&constants)?
            .substitute(&self.substitutions(unit));

        let mut writer = CodeWriter::new(self.options.clone());
        if !self.header.is_empty() {
            writer.lines(&self.header).blank_line();
        }
        if unit.namespace.is_empty() {
            writer.lines(body.iter());
        } else {
            let mut scope = writer.enter_namespace(&unit.namespace);
            scope.lines(body.iter());
        }

        Ok(GeneratedSource {
            hint_name,
            content: writer.finish()?,
        })
    }
}
