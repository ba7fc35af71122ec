//! Merges package definition files into one document plus an origin lookup.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use defscan_model::{AssetLookup, Document, Node, Origin, SourceAsset};

use crate::discovery::list_xml_files;
use crate::error::{IngestError, Result};
use crate::manifest::LoadedManifest;
use crate::xml::DocumentParser;

/// Tag of the merged document's root.
pub const MERGED_ROOT: &str = "Defs";

/// Summary of one loaded package.
#[derive(Debug, Clone)]
pub struct LoadedPackage {
    pub origin: Origin,
    pub files: Vec<PathBuf>,
    pub definitions: usize,
}

/// Everything the scanner needs: the merged tree and who contributed what.
#[derive(Debug)]
pub struct PackageSet {
    pub document: Document,
    pub lookup: AssetLookup,
    pub packages: Vec<LoadedPackage>,
}

impl PackageSet {
    pub fn definition_count(&self) -> usize {
        self.packages.iter().map(|package| package.definitions).sum()
    }
}

/// Loads every package of the manifest in manifest order.
///
/// Inside a package, files are loaded in path order. The element children
/// of each file's root are appended to a single `<Defs>` root and bound to
/// the file's asset in the lookup.
pub fn load_packages(manifest: &LoadedManifest) -> Result<PackageSet> {
    let mut parser = DocumentParser::new();
    let mut merged = parser.new_element(MERGED_ROOT);
    let mut lookup = AssetLookup::new();
    let mut packages = Vec::with_capacity(manifest.packages().len());

    for entry in manifest.packages() {
        let root = absolute(&manifest.package_root(entry))?;
        let origin = Origin::new(entry.id.clone(), entry.display_name()).with_root(&root);
        let files = list_xml_files(&root.join(manifest.defs_dir()))?;

        let mut definitions = 0usize;
        for file in &files {
            let document = parser.parse_file(file)?;
            let handle = lookup.add_asset(SourceAsset::new(origin.clone(), file.clone()));
            let mut file_root = document.into_root();
            let mut file_definitions = 0usize;
            for child in file_root.take_children() {
                if let Node::Element(element) = child {
                    lookup.bind(element.id(), handle);
                    merged.push_child(Node::Element(element));
                    file_definitions += 1;
                }
            }
            debug!(
                package = %entry.id,
                file = %file.display(),
                root = file_root.name(),
                definitions = file_definitions,
                "loaded definition file"
            );
            definitions += file_definitions;
        }

        info!(
            package = %entry.id,
            file_count = files.len(),
            definitions,
            "package loaded"
        );
        packages.push(LoadedPackage {
            origin,
            files,
            definitions,
        });
    }

    Ok(PackageSet {
        document: Document::new(merged),
        lookup,
        packages,
    })
}

/// Parses a single, already merged document. No origins are known.
pub fn load_document(path: &Path) -> Result<Document> {
    DocumentParser::new().parse_file(path)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|source| IngestError::DirectoryRead {
        path: path.to_path_buf(),
        source,
    })
}
