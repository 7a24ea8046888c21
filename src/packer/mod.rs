//! Packing a repository snapshot into a single markup document.
//!
//! - [`tree`] models the snapshot as [`TreeNode`]s
//! - [`git`] loads that model from the HEAD commit
//! - [`policy`] holds the ignore rules and limits
//! - [`sanitize`] decodes, screens, strips and escapes file content
//! - [`serializer`] walks the tree and emits the document

pub mod git;
pub mod policy;
pub mod sanitize;
pub mod serializer;
pub mod tree;

pub use git::GitSnapshot;
pub use policy::{SerializerPolicy, SerializerPolicyBuilder};
pub use serializer::{
    Document, EntryKind, FileOutcome, SerializeReport, SkipReason, SkippedEntry, TreeSerializer,
};
pub use tree::{BlobReader, DirectoryNode, FileNode, InMemoryBlob, TreeNode};
