//! Error types for definition loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading definitions.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === XML Errors ===
    /// The reader rejected the input.
    #[error("malformed XML in {input} at byte {position}: {message}")]
    Xml {
        input: String,
        position: u64,
        message: String,
    },

    /// Entity reference other than the predefined or numeric ones.
    #[error("unknown entity '&{entity};' in {input}")]
    UnknownEntity { input: String, entity: String },

    /// The document has no root element.
    #[error("no root element in {input}")]
    MissingRoot { input: String },

    /// A second top-level element follows the root.
    #[error("more than one root element in {input} (found <{element}>)")]
    MultipleRoots { input: String, element: String },

    /// End of input reached with open elements.
    #[error("unclosed element <{element}> in {input}")]
    UnclosedElement { input: String, element: String },

    /// Elements nested deeper than the parser accepts.
    #[error("element <{element}> in {input} is nested deeper than {limit} levels")]
    TooDeep {
        input: String,
        element: String,
        limit: usize,
    },

    // === Manifest Errors ===
    /// Failed to parse the TOML manifest.
    #[error("failed to parse manifest {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Manifest parsed but is not usable.
    #[error("invalid manifest {path}: {message}")]
    InvalidManifest { path: PathBuf, message: String },

    /// Two packages share an id.
    #[error("duplicate package id in manifest: {id}")]
    DuplicatePackage { id: String },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;
