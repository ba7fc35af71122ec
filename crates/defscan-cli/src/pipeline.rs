//! Command implementations shared by the binary and its tests.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use defscan_core::{ProcessContext, policy_for};
use defscan_ingest::{
    LoadedManifest, list_xml_files, load_document, load_manifest, load_packages,
    reports_dir_from_env,
};
use defscan_model::{DuplicateReport, Origin, PolicyKind};

use crate::types::{PackageSummary, ScanResult};

/// Options common to every scanning command.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Takes precedence over the environment and the manifest.
    pub reports_dir: Option<PathBuf>,
    /// Takes precedence over the manifest.
    pub policy: Option<PolicyKind>,
    /// Ignore `DEFSCAN_REPORTS_DIR`.
    pub ignore_env: bool,
}

impl ScanOptions {
    fn env_reports_dir(&self) -> Option<PathBuf> {
        if self.ignore_env {
            None
        } else {
            reports_dir_from_env()
        }
    }
}

/// Loads every package of a manifest and writes duplicate reports.
pub fn scan_manifest(manifest_path: &Path, options: &ScanOptions) -> Result<ScanResult> {
    let manifest = load_manifest(manifest_path)
        .with_context(|| format!("load manifest {}", manifest_path.display()))?;
    let reports_dir = manifest.reports_dir(options.reports_dir.as_deref(), options.env_reports_dir());
    let policy = options.policy.unwrap_or_else(|| manifest.policy());

    let load_span = info_span!("load", manifest = %manifest_path.display());
    let load_start = Instant::now();
    let set = load_span
        .in_scope(|| load_packages(&manifest))
        .context("load packages")?;
    info!(
        packages = set.packages.len(),
        definitions = set.definition_count(),
        duration_ms = load_start.elapsed().as_millis() as u64,
        "loaded definitions"
    );

    let mut context = ProcessContext::new(&reports_dir).with_boxed_policy(policy_for(policy));
    let summary = context
        .run(&set.document, &set.lookup)
        .context("create duplicate reports")?;

    let packages = set
        .packages
        .iter()
        .map(|package| PackageSummary {
            origin: package.origin.clone(),
            defs_dir: package_defs_dir(&manifest, &package.origin),
            files: package.files.len(),
            definitions: Some(package.definitions),
        })
        .collect();
    Ok(ScanResult {
        source: manifest_path.to_path_buf(),
        policy: policy.to_string(),
        packages,
        definitions: set.definition_count(),
        summary,
        duplicates: context.duplicates().to_vec(),
    })
}

/// Scans a single merged document. Every definition is attributed to the
/// core origin.
pub fn scan_document(document_path: &Path, options: &ScanOptions) -> Result<ScanResult> {
    let document = info_span!("load", document = %document_path.display())
        .in_scope(|| load_document(document_path))
        .with_context(|| format!("load document {}", document_path.display()))?;
    let reports_dir = options
        .reports_dir
        .clone()
        .or_else(|| options.env_reports_dir())
        .unwrap_or_else(|| default_reports_dir(document_path));
    let policy = options.policy.unwrap_or_default();

    let mut context = ProcessContext::new(&reports_dir).with_boxed_policy(policy_for(policy));
    let summary = context
        .run(&document, &defscan_model::NoLookup)
        .context("create duplicate reports")?;

    Ok(ScanResult {
        source: document_path.to_path_buf(),
        policy: policy.to_string(),
        packages: Vec::new(),
        definitions: document.top_level_elements().count(),
        summary,
        duplicates: context.duplicates().to_vec(),
    })
}

/// Lists the manifest's packages and their definition files without parsing
/// them.
pub fn list_packages(manifest_path: &Path) -> Result<Vec<PackageSummary>> {
    let manifest = load_manifest(manifest_path)
        .with_context(|| format!("load manifest {}", manifest_path.display()))?;
    let mut packages = Vec::with_capacity(manifest.packages().len());
    for entry in manifest.packages() {
        let origin = Origin::new(entry.id.clone(), entry.display_name())
            .with_root(manifest.package_root(entry));
        let defs_dir = package_defs_dir(&manifest, &origin);
        let files = list_xml_files(&defs_dir)
            .with_context(|| format!("list definitions of package {}", entry.id))?;
        packages.push(PackageSummary {
            origin,
            defs_dir,
            files: files.len(),
            definitions: None,
        });
    }
    Ok(packages)
}

/// The latest run's reports as pretty JSON.
pub fn duplicates_json(duplicates: &[DuplicateReport]) -> Result<String> {
    serde_json::to_string_pretty(duplicates).context("serialize duplicate reports")
}

fn package_defs_dir(manifest: &LoadedManifest, origin: &Origin) -> PathBuf {
    let root = origin.root.clone().unwrap_or_else(|| manifest.base_dir.clone());
    root.join(manifest.defs_dir())
}

fn default_reports_dir(document_path: &Path) -> PathBuf {
    document_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("reports"), |parent| parent.join("reports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_reports_dir_sits_next_to_the_document() {
        assert_eq!(
            default_reports_dir(Path::new("data/Merged.xml")),
            PathBuf::from("data/reports")
        );
        assert_eq!(
            default_reports_dir(Path::new("Merged.xml")),
            PathBuf::from("reports")
        );
    }
}
