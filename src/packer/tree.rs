// Copyright (c) 2025-2026 the gitscribe contributors
// SPDX-License-Identifier: Apache-2.0

//! Snapshot tree model consumed by the serializer.
//!
//! A [`TreeNode`] graph is built once per run from a snapshot source (see
//! [`crate::packer::git`]) and dropped after the document is produced. File
//! nodes hold a [`BlobReader`] rather than their bytes so content is read one
//! file at a time, and a failed read only affects that file.

use crate::utils::error::GitscribeError;
use std::fmt;

/// Source of a single file's raw content.
pub trait BlobReader: fmt::Debug {
    /// Read the complete byte content of the blob.
    fn read_bytes(&self) -> Result<Vec<u8>, GitscribeError>;
}

/// Blob whose content is already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBlob(Vec<u8>);

impl InMemoryBlob {
    pub fn new(content: impl Into<Vec<u8>>) -> Self {
        Self(content.into())
    }
}

impl BlobReader for InMemoryBlob {
    fn read_bytes(&self) -> Result<Vec<u8>, GitscribeError> {
        Ok(self.0.clone())
    }
}

/// A node in the snapshot tree.
#[derive(Debug)]
pub enum TreeNode {
    Directory(DirectoryNode),
    File(FileNode),
}

/// A directory and its children in snapshot order.
#[derive(Debug, Default)]
pub struct DirectoryNode {
    pub name: String,
    pub children: Vec<TreeNode>,
}

/// A file leaf.
#[derive(Debug)]
pub struct FileNode {
    pub name: String,
    blob: Box<dyn BlobReader>,
}

impl TreeNode {
    /// Name of the node as it appears in its parent directory.
    pub fn name(&self) -> &str {
        match *self {
            TreeNode::Directory(ref dir) => &dir.name,
            TreeNode::File(ref file) => &file.name,
        }
    }

    /// Convenience constructor for a directory node.
    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        TreeNode::Directory(DirectoryNode::new(name, children))
    }

    /// Convenience constructor for a file with in-memory content.
    pub fn file(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        TreeNode::File(FileNode::new(name, InMemoryBlob::new(content)))
    }
}

impl DirectoryNode {
    pub fn new(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }

    /// Root of a snapshot. The root has no name of its own.
    pub fn root(children: Vec<TreeNode>) -> Self {
        Self::new(String::new(), children)
    }
}

impl FileNode {
    pub fn new(name: impl Into<String>, blob: impl BlobReader + 'static) -> Self {
        Self {
            name: name.into(),
            blob: Box::new(blob),
        }
    }

    /// Read the file's bytes from its blob source.
    pub fn read_bytes(&self) -> Result<Vec<u8>, GitscribeError> {
        self.blob.read_bytes()
    }
}

/// Join a parent path and a child name with `/`.
pub fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "src"), "src");
        assert_eq!(join_path("src", "main.rs"), "src/main.rs");
        assert_eq!(join_path("a/b", "c"), "a/b/c");
    }

    #[test]
    fn test_in_memory_file_reads_content() {
        let node = FileNode::new("a.txt", InMemoryBlob::new("hello"));
        assert_eq!(node.read_bytes().unwrap(), b"hello");
    }

    #[test]
    fn test_node_name() {
        let tree = TreeNode::directory("src", vec![TreeNode::file("lib.rs", "")]);
        assert_eq!(tree.name(), "src");
        if let TreeNode::Directory(dir) = tree {
            assert_eq!(dir.children.len(), 1);
            assert_eq!(dir.children[0].name(), "lib.rs");
        } else {
            panic!("expected directory");
        }
    }
}
