use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// A stencil.toml file with both raw content and parsed manifest.
#[derive(Debug)]
pub struct StencilToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl StencilToml {
    /// Open and parse a stencil.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let manifest = Manifest::from_str_with_filename(&content, &path.display().to_string())?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory that relative paths in the manifest are resolved against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Resolve a manifest-relative path.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.base_dir().join(relative)
    }

    /// Path of the template declared as `name`.
    pub fn template_path(&self, name: &str) -> Option<PathBuf> {
        self.manifest
            .templates
            .get(name)
            .map(|template| self.resolve(&template.path))
    }

    /// The configured output directory, unless overridden.
    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => self.resolve(&self.manifest.generator.output),
        }
    }
}
