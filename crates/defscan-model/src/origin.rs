//! Where a definition came from.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::document::NodeId;

/// Package id of the built-in default origin.
pub const CORE_PACKAGE_ID: &str = "core";

/// Display name of the built-in default origin.
pub const CORE_PACKAGE_NAME: &str = "Core";

/// Identity of the package that contributed a definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Origin {
    pub package_id: String,
    pub name: String,
    /// Package root folder, when the package was loaded from disk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl Origin {
    pub fn new(package_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            name: name.into(),
            root: None,
        }
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// The default origin assigned to nodes the lookup does not know about.
    pub fn core() -> Self {
        Self::new(CORE_PACKAGE_ID, CORE_PACKAGE_NAME)
    }

    pub fn is_core(&self) -> bool {
        self.package_id == CORE_PACKAGE_ID && self.root.is_none()
    }
}

/// A loaded file: the package it belongs to and its absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceAsset {
    pub origin: Origin,
    pub file_path: PathBuf,
}

impl SourceAsset {
    pub fn new(origin: Origin, file_path: impl Into<PathBuf>) -> Self {
        Self {
            origin,
            file_path: file_path.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

/// Resolves a node to the asset that contributed it.
pub trait OriginLookup {
    fn resolve(&self, node: NodeId) -> Option<&SourceAsset>;
}

/// Map-backed lookup built while loading packages.
#[derive(Debug, Clone, Default)]
pub struct AssetLookup {
    assets: Vec<SourceAsset>,
    by_node: HashMap<NodeId, usize>,
}

impl AssetLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an asset and returns its handle for [`AssetLookup::bind`].
    pub fn add_asset(&mut self, asset: SourceAsset) -> usize {
        self.assets.push(asset);
        self.assets.len() - 1
    }

    /// Attributes `node` to a previously added asset.
    ///
    /// # Panics
    ///
    /// Panics if `asset` was not returned by [`AssetLookup::add_asset`].
    pub fn bind(&mut self, node: NodeId, asset: usize) {
        assert!(asset < self.assets.len(), "unknown asset handle {asset}");
        self.by_node.insert(node, asset);
    }

    pub fn insert(&mut self, node: NodeId, asset: SourceAsset) {
        let handle = self.add_asset(asset);
        self.bind(node, handle);
    }

    pub fn assets(&self) -> &[SourceAsset] {
        &self.assets
    }

    /// Number of nodes with a known origin.
    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}

impl OriginLookup for AssetLookup {
    fn resolve(&self, node: NodeId) -> Option<&SourceAsset> {
        self.by_node
            .get(&node)
            .and_then(|&index| self.assets.get(index))
    }
}

/// Lookup that knows nothing; every node resolves to the core origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLookup;

impl OriginLookup for NoLookup {
    fn resolve(&self, _node: NodeId) -> Option<&SourceAsset> {
        None
    }
}
