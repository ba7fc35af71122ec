//! Definition loading for defscan.
//!
//! Turns package folders described by a `defscan.toml` manifest into a
//! single merged [`defscan_model::Document`] and the
//! [`defscan_model::AssetLookup`] that attributes each top-level definition
//! to the package and file it came from.

pub mod discovery;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod xml;

pub use discovery::list_xml_files;
pub use error::{IngestError, Result};
pub use loader::{LoadedPackage, MERGED_ROOT, PackageSet, load_document, load_packages};
pub use manifest::{
    LoadedManifest, Manifest, PackageEntry, REPORTS_DIR_ENV_VAR, ScanSettings, load_manifest,
    reports_dir_from_env,
};
pub use xml::{DocumentParser, MAX_DEPTH};
