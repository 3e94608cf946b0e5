//! Manifest parsing and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// wiregen.toml manifest structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub generator: GeneratorSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Declaration source files to run the generator over.
    pub sources: Vec<String>,

    /// Output directory for generated units (default: `generated`).
    #[serde(default)]
    pub output: Option<String>,

    /// When non-empty, only candidates in these namespaces (or nested under
    /// them) are generated.
    #[serde(default)]
    pub namespace_allow: Vec<String>,
}

impl Manifest {
    /// Load a manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse a manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        let manifest: Manifest = toml::from_str(content).context("Failed to parse manifest")?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        if self.generator.sources.is_empty() {
            anyhow::bail!("Manifest lists no sources");
        }
        for source in &self.generator.sources {
            if source.is_empty() {
                anyhow::bail!("Source paths cannot be empty");
            }
        }
        if let Some(output) = &self.generator.output {
            if output.is_empty() {
                anyhow::bail!("Output directory cannot be empty");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "manifest/manifest_tests.rs"]
mod manifest_tests;
