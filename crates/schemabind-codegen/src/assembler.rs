//! File assembly.
//!
//! Produces one declaration unit and one definition unit per top-level type,
//! one declaration unit per top-level enum and the fixed helper units. Top-level
//! types are independent of each other and are generated on scoped worker
//! threads; output order does not depend on scheduling.

use crate::emitter::Emitter;
use crate::helpers::{HELPER_FUNCTIONS_HEADER, INTERFACE_HEADER, MAP_EQUALS_HEADER, helper_units};
use crate::naming::{check_member_names, class_name, header_path, relative_root, source_path};
use crate::resolver::resolve;
use crate::text::{banner, close_namespaces, open_namespaces};
use schemabind_core::{Bundle, EnumDefinition, GenerateError, GenerateResult, GeneratorConfig};
use tracing::{debug, error, info};

/// A generated unit: path relative to the output root and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub contents: String,
}

impl GeneratedFile {
    fn new(path: impl Into<String>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}

/// Outcome of a run that keeps going past failed types.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Helper units, then type units, then enum units.
    pub files: Vec<GeneratedFile>,
    /// One entry per failed top-level type, sorted by type name.
    pub failures: Vec<GenerateError>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Generate every unit of a bundle, failing if any type failed.
pub fn generate_files(bundle: &Bundle, config: &GeneratorConfig) -> GenerateResult<Vec<GeneratedFile>> {
    let report = generate_report(bundle, config);
    if report.is_success() {
        Ok(report.files)
    } else {
        Err(GenerateError::Failed(report.failures))
    }
}

/// Generate every unit of a bundle, collecting per-type failures.
pub fn generate_report(bundle: &Bundle, config: &GeneratorConfig) -> GenerationReport {
    let mut names: Vec<&str> = bundle
        .top_level_types()
        .map(|ty| ty.qualified_name.as_str())
        .collect();
    names.sort_unstable();

    let workers = config.worker_count(names.len());
    debug!(types = names.len(), workers, "generating top-level types");

    let mut results: Vec<(&str, GenerateResult<Vec<GeneratedFile>>)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let names = &names;
                scope.spawn(move || {
                    names
                        .iter()
                        .skip(worker)
                        .step_by(workers)
                        .map(|&name| (name, generate_type(bundle, config, name)))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| match handle.join() {
                Ok(results) => results,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    });
    results.sort_by(|a, b| a.0.cmp(b.0));

    let mut report = GenerationReport::default();
    report.files.extend(
        helper_units(config)
            .into_iter()
            .map(|(path, contents)| GeneratedFile::new(path, contents)),
    );

    for (name, result) in results {
        match result {
            Ok(files) => report.files.extend(files),
            Err(err) => {
                error!(type_name = name, error = %err, "failed to generate type");
                report.failures.push(err);
            }
        }
    }

    let mut enums: Vec<&EnumDefinition> = bundle.top_level_enums().collect();
    enums.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));
    report
        .files
        .extend(enums.into_iter().map(|def| generate_enum(bundle, config, def)));

    info!(
        files = report.files.len(),
        failures = report.failures.len(),
        "generation finished"
    );
    report
}

/// Declaration and definition units of one top-level type.
pub fn generate_type(
    bundle: &Bundle,
    config: &GeneratorConfig,
    qualified_name: &str,
) -> GenerateResult<Vec<GeneratedFile>> {
    let ty = bundle
        .type_description(qualified_name)
        .filter(|_| !bundle.is_nested(qualified_name))
        .ok_or_else(|| GenerateError::UnknownType(qualified_name.to_string()))?;

    let resolved = resolve(ty, bundle)?;
    for local in &resolved.ordered_types {
        check_member_names(local)?;
    }

    let emitter = Emitter::new(bundle, config);
    let namespaces = bundle.namespace_of(qualified_name);
    let up = relative_root(qualified_name);

    let mut header = banner(config);
    header.push_str("#pragma once\n\n");
    header.push_str(&format!("#include \"{up}{INTERFACE_HEADER}\"\n"));
    header.push_str(&format!("#include \"{up}{HELPER_FUNCTIONS_HEADER}\"\n"));
    for path in resolved.include_paths() {
        header.push_str(&format!("#include \"{path}\"\n"));
    }
    header.push('\n');

    let mut declarations = Vec::new();
    for def in &resolved.nested_enums {
        declarations.push(emitter.define_enum(def));
    }
    declarations.push(
        resolved
            .ordered_types
            .iter()
            .map(|local| format!("class {};", emitter.class_name(local)))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    declarations.push(
        resolved
            .ordered_types
            .iter()
            .map(|local| emitter.declare_hash(local))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    for local in &resolved.ordered_types {
        declarations.push(emitter.declare_record(local));
    }
    header.push_str(&wrap_namespaces(&namespaces, &declarations.join("\n\n")));

    let mut source = banner(config);
    source.push_str(&format!(
        "#include \"{}/{}\"\n",
        config.include_prefix,
        header_path(qualified_name)
    ));
    source.push_str(&format!(
        "#include \"{}/{MAP_EQUALS_HEADER}\"\n\n",
        config.include_prefix
    ));
    let definitions: Vec<String> = resolved
        .ordered_types
        .iter()
        .map(|local| emitter.define_record(local))
        .collect();
    source.push_str(&wrap_namespaces(&namespaces, &definitions.join("\n\n")));

    debug!(
        type_name = qualified_name,
        class = %class_name(bundle, qualified_name),
        types = resolved.ordered_types.len(),
        "emitted type units"
    );

    Ok(vec![
        GeneratedFile::new(header_path(qualified_name), header),
        GeneratedFile::new(source_path(qualified_name), source),
    ])
}

/// Declaration unit of a top-level enum.
pub fn generate_enum(bundle: &Bundle, config: &GeneratorConfig, def: &EnumDefinition) -> GeneratedFile {
    let emitter = Emitter::new(bundle, config);
    let up = relative_root(&def.qualified_name);

    let mut header = banner(config);
    header.push_str("#pragma once\n\n");
    header.push_str(&format!("#include \"{up}{INTERFACE_HEADER}\"\n\n"));
    header.push_str(&wrap_namespaces(
        &bundle.namespace_of(&def.qualified_name),
        &emitter.define_enum(def),
    ));

    debug!(enum_name = %def.qualified_name, "emitted enum unit");
    GeneratedFile::new(header_path(&def.qualified_name), header)
}

fn wrap_namespaces(namespaces: &[String], body: &str) -> String {
    if namespaces.is_empty() {
        return format!("{body}\n");
    }
    format!(
        "{}\n\n{body}\n\n{}\n",
        open_namespaces(namespaces),
        close_namespaces(namespaces)
    )
}
