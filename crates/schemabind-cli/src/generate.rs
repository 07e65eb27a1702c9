//! Generate command implementation

use crate::config::{DEFAULT_CONFIG, ProjectConfig};
use anyhow::{Context, Result};
use schemabind_codegen::{GeneratedFile, generate_report};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Command line values that take precedence over the project file
#[derive(Debug, Default)]
pub struct Overrides {
    pub bundle: Option<String>,
    pub output: Option<String>,
    pub jobs: Option<usize>,
}

impl Overrides {
    fn apply(self, config: &mut ProjectConfig) {
        if let Some(bundle) = self.bundle {
            config.input.bundle = PathBuf::from(bundle);
        }
        if let Some(output) = self.output {
            config.output.directory = PathBuf::from(output);
        }
        if let Some(jobs) = self.jobs {
            config.generator.jobs = Some(jobs);
        }
    }
}

pub fn run(config_path: Option<String>, overrides: Overrides) -> Result<()> {
    let path = config_path.unwrap_or_else(|| DEFAULT_CONFIG.to_string());

    let mut config = ProjectConfig::from_file(&path)?;
    overrides.apply(&mut config);
    config.validate()?;

    let bundle = config.load_bundle()?;
    let report = generate_report(&bundle, &config.generator);

    if !report.is_success() {
        for failure in &report.failures {
            error!(code = failure.error_code(), "{failure}");
            eprintln!("✗ {failure}");
        }
        anyhow::bail!("generation failed for {} type(s)", report.failures.len());
    }

    let written = write_files(&config.output.directory, &report.files)?;
    info!(
        written,
        unchanged = report.files.len() - written,
        directory = ?config.output.directory,
        "wrote generated units"
    );
    println!(
        "✓ Generated {} file(s) in {}",
        report.files.len(),
        config.output.directory.display()
    );

    Ok(())
}

/// Write every unit under `root`, skipping files whose contents are unchanged.
///
/// Returns the number of files written.
pub fn write_files(root: &Path, files: &[GeneratedFile]) -> Result<usize> {
    let mut written = 0;

    for file in files {
        let path = root.join(&file.path);

        if std::fs::read_to_string(&path).is_ok_and(|existing| existing == file.contents) {
            debug!(path = %file.path, "unchanged");
            continue;
        }

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {parent:?}"))?;
        }
        std::fs::write(&path, &file.contents)
            .with_context(|| format!("Failed to write {path:?}"))?;
        debug!(path = %file.path, bytes = file.contents.len(), "wrote");
        written += 1;
    }

    Ok(written)
}
