//! The generate/check pipeline: parse sources, bind the model, drive the
//! engine, write units, and report diagnostics.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use wiregen_codegen::{Engine, Severity};
use wiregen_symbols::{Declaration, SemanticModel, SourceUnit};

use crate::manifest::Manifest;

/// Resolved pipeline options, after merging CLI arguments over the manifest.
#[derive(Debug)]
pub struct Options {
    pub sources: Vec<PathBuf>,
    pub output: PathBuf,
    pub namespace_allow: Vec<String>,
    pub report: Option<PathBuf>,
    /// Check mode: report only, write nothing.
    pub dry_run: bool,
}

impl Options {
    /// Merge explicit arguments over the manifest. Explicit sources win; a
    /// missing manifest is only an error when it was named explicitly.
    pub fn resolve(
        sources: Vec<String>,
        output: Option<String>,
        manifest_path: Option<String>,
        report: Option<String>,
        dry_run: bool,
    ) -> Result<Self> {
        let manifest = match &manifest_path {
            Some(path) => Some(Manifest::from_file(path)?),
            None if sources.is_empty() && std::path::Path::new("wiregen.toml").exists() => {
                Some(Manifest::from_file("wiregen.toml")?)
            }
            None => None,
        };

        let sources: Vec<PathBuf> = if sources.is_empty() {
            manifest
                .as_ref()
                .map(|m| m.generator.sources.iter().map(PathBuf::from).collect())
                .unwrap_or_default()
        } else {
            sources.into_iter().map(PathBuf::from).collect()
        };
        if sources.is_empty() {
            anyhow::bail!("No sources given; pass source files or a wiregen.toml manifest");
        }

        let output = output
            .or_else(|| manifest.as_ref().and_then(|m| m.generator.output.clone()))
            .unwrap_or_else(|| "generated".to_string());

        Ok(Self {
            sources,
            output: PathBuf::from(output),
            namespace_allow: manifest
                .map(|m| m.generator.namespace_allow)
                .unwrap_or_default(),
            report: report.map(PathBuf::from),
            dry_run,
        })
    }
}

/// Run the pipeline. Returns false when any error-severity diagnostic was
/// recorded, so the driver can exit nonzero.
pub fn run(options: &Options) -> Result<bool> {
    let mut model = SemanticModel::new();
    let mut units: Vec<SourceUnit> = Vec::new();

    for path in &options.sources {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source: {}", path.display()))?;
        let mut unit = wiregen_parser::parse_source(&path.display().to_string(), &text)
            .context("Failed to parse source")?;
        if !options.namespace_allow.is_empty() {
            retain_allowed(&mut unit, &options.namespace_allow);
        }
        model
            .bind_unit(&unit)
            .context("Failed to bind declarations")?;
        units.push(unit);
    }

    let mut engine = Engine::new();
    for unit in &units {
        engine.visit_unit(unit, &model);
    }
    let generated = engine.compile(&model);

    if !options.dry_run {
        fs::create_dir_all(&options.output)
            .with_context(|| format!("Failed to create directory: {}", options.output.display()))?;
        for unit in &generated {
            let path = options.output.join(&unit.hint_name);
            fs::write(&path, &unit.source)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(unit = %unit.hint_name, "wrote generated unit");
        }
    }

    let diagnostics = engine.take_diagnostics();
    for diagnostic in &diagnostics {
        let location = diagnostic
            .locations
            .first()
            .map(ToString::to_string)
            .unwrap_or_else(|| "<unknown>".to_string());
        eprintln!(
            "{location}: {}: {}",
            diagnostic.id.as_str(),
            diagnostic.message()
        );
    }
    if let Some(report) = &options.report {
        let json =
            serde_json::to_string_pretty(&diagnostics).context("Failed to encode report")?;
        fs::write(report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
    }

    println!(
        "{} unit(s) from {} source(s), {} diagnostic(s)",
        generated.len(),
        options.sources.len(),
        diagnostics.len()
    );

    Ok(diagnostics
        .iter()
        .all(|d| d.severity != Severity::Error))
}

/// Keep only namespaces named by the allow list (exact or dotted-prefix).
fn retain_allowed(unit: &mut SourceUnit, allow: &[String]) {
    unit.declarations.retain(|declaration| match declaration {
        Declaration::Namespace(ns) => allow
            .iter()
            .any(|a| ns.name == *a || ns.name.starts_with(&format!("{a}."))),
        _ => true,
    });
}
