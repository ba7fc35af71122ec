//! Shared types for defscan: the document tree handed to the scanner, the
//! origins that contributed its nodes, and the duplicate reports produced
//! from them.

#![deny(unsafe_code)]

pub mod document;
pub mod origin;
pub mod policy;
pub mod report;

pub use document::{Attribute, Document, Element, Node, NodeId};
pub use origin::{AssetLookup, CORE_PACKAGE_ID, NoLookup, Origin, OriginLookup, SourceAsset};
pub use policy::PolicyKind;
pub use report::{DuplicateReport, DuplicationRecord};
