//! Project file parsing and validation

use anyhow::{Context, Result};
use schemabind_codegen::generate_report;
use schemabind_core::{Bundle, GeneratorConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// Project file looked up when no path is given.
pub const DEFAULT_CONFIG: &str = "schemabind.toml";

/// schemabind.toml structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub input: InputSection,
    pub output: OutputSection,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSection {
    /// Bundle JSON produced by the schema loader
    pub bundle: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Root directory of the generated units
    pub directory: PathBuf,
}

impl ProjectConfig {
    /// Load a project file; relative paths are taken relative to its directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file: {path:?}"))?;

        let config = Self::parse(&content)?;
        Ok(match path.parent() {
            Some(base) => config.relative_to(base),
            None => config,
        })
    }

    /// Parse a project file from a string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse project file")
    }

    /// Resolve relative input and output paths against `base`
    #[must_use]
    pub fn relative_to(mut self, base: &Path) -> Self {
        if self.input.bundle.is_relative() && !self.input.bundle.as_os_str().is_empty() {
            self.input.bundle = base.join(&self.input.bundle);
        }
        if self.output.directory.is_relative() && !self.output.directory.as_os_str().is_empty() {
            self.output.directory = base.join(&self.output.directory);
        }
        self
    }

    /// Validate the project file
    pub fn validate(&self) -> Result<()> {
        if self.input.bundle.as_os_str().is_empty() {
            anyhow::bail!("[input] bundle cannot be empty");
        }

        if self.output.directory.as_os_str().is_empty() {
            anyhow::bail!("[output] directory cannot be empty");
        }

        let generator = &self.generator;
        if generator.title.is_empty() {
            anyhow::bail!("[generator] title cannot be empty");
        }

        if generator.jobs == Some(0) {
            anyhow::bail!("[generator] jobs must be at least 1");
        }

        let containers = &generator.containers;
        for (key, name) in [
            ("option", &containers.option),
            ("list", &containers.list),
            ("map", &containers.map),
            ("string", &containers.string),
            ("bytes", &containers.bytes),
        ] {
            if name.trim().is_empty() {
                anyhow::bail!("[generator.containers] {key} cannot be empty");
            }
        }

        Ok(())
    }

    /// Read and index the input bundle
    pub fn load_bundle(&self) -> Result<Bundle> {
        let path = &self.input.bundle;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read bundle: {path:?}"))?;

        let bundle = Bundle::from_json(&content)
            .with_context(|| format!("Invalid bundle: {path:?}"))?;
        debug!(
            types = bundle.types().len(),
            enums = bundle.enums().len(),
            "loaded bundle"
        );
        Ok(bundle)
    }
}

/// Check command implementation
pub fn check(config_path: Option<String>) -> Result<()> {
    let path = config_path.unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    println!("Checking project: {path}");

    let config = ProjectConfig::from_file(&path)?;
    config.validate()?;
    let bundle = config.load_bundle()?;

    println!("✓ Types: {}", bundle.top_level_types().count());
    println!("✓ Enums: {}", bundle.top_level_enums().count());

    let report = generate_report(&bundle, &config.generator);
    if !report.is_success() {
        for failure in &report.failures {
            error!(code = failure.error_code(), "{failure}");
            println!("✗ {failure}");
        }
        anyhow::bail!(
            "generation would fail for {} type(s)",
            report.failures.len()
        );
    }

    println!("✓ Units: {}", report.files.len());
    println!("\nProject is valid!");

    Ok(())
}
