//! Running every generation unit of a manifest.

use std::collections::{HashMap, hash_map::Entry};

use stencil_codegen::{GeneratedSource, GenerationUnit, SourceGenerator, TypeNameCache};
use stencil_core::Template;
use stencil_manifest::{StencilToml, TypeConfig};
use tracing::{info, warn};

/// Result of one type's generation.
pub struct UnitOutcome {
    pub type_name: String,
    pub template: String,
    pub hint_name: String,
    pub result: Result<GeneratedSource, miette::Report>,
}

/// Run every declared type through its template.
///
/// A failing unit is recorded and the run continues with the next one.
pub fn run_units(file: &StencilToml) -> Vec<UnitOutcome> {
    let manifest = file.manifest();
    let generator = SourceGenerator::new(manifest.writer.clone())
        .with_header(manifest.generator.header.iter().cloned())
        .with_constants(manifest.constants())
        .with_formatter(manifest.formatter().with_cache(TypeNameCache::shared()));

    let mut templates = HashMap::new();
    manifest
        .types
        .iter()
        .map(|(name, config)| {
            let result = run_unit(file, &generator, &mut templates, name, config);
            let hint_name = GenerationUnit::new(&config.namespace, name).hint_name();
            match &result {
                Ok(_) => info!(%hint_name, "generated"),
                Err(report) => warn!(%hint_name, error = %report, "generation failed"),
            }
            UnitOutcome {
                type_name: name.clone(),
                template: config.template.clone(),
                hint_name,
                result,
            }
        })
        .collect()
}

fn run_unit(
    file: &StencilToml,
    generator: &SourceGenerator,
    templates: &mut HashMap<String, Template>,
    name: &str,
    config: &TypeConfig,
) -> Result<GeneratedSource, miette::Report> {
    let unit = config.unit(name).map_err(miette::Report::new)?;

    let template = match templates.entry(config.template.clone()) {
        Entry::Occupied(entry) => entry.into_mut(),
        Entry::Vacant(entry) => {
            let path = file
                .template_path(&config.template)
                .ok_or_else(|| miette::miette!("template '{}' is not declared", config.template))?;
            let template = Template::open(&path).map_err(|e| miette::Report::new(*e))?;
            entry.insert(template)
        }
    };

    generator
        .generate(template, &unit)
        .map_err(miette::Report::new)
}
