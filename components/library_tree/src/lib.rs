// components/library_tree/src/lib.rs
//! Directory tree of a generated library
//!
//! [`LibraryTree::materialize`] walks every track of a [`fake_library::Library`]
//! once and lays out its paths as directories and song nodes, each with a
//! small, unique [`NodeId`]. With the `fuse` feature the tree can be mounted
//! as a read-only filesystem.

mod error;
#[cfg(feature = "fuse")]
pub mod fuse;
mod tree;

pub use error::TreeError;
pub use tree::{DirEntry, EntryKind, IdAllocator, LibraryTree, Node, NodeId, NodeKind, TreeStats};
