//! Snapshot access through libgit2.
//!
//! Only the tree of the commit `HEAD` points to is read. Uncommitted edits in
//! the working directory never reach the document.

use super::tree::{BlobReader, DirectoryNode, FileNode, TreeNode};
use crate::utils::error::GitscribeError;
use git2::{ObjectType, Oid, Repository, Tree};
use std::path::Path;
use std::rc::Rc;

pub fn is_git_repo<P: AsRef<Path>>(path: P) -> bool {
    Repository::open(path).is_ok()
}

/// An opened repository whose HEAD snapshot can be loaded.
pub struct GitSnapshot {
    repo: Rc<Repository>,
}

impl std::fmt::Debug for GitSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitSnapshot")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl GitSnapshot {
    /// Open the repository rooted at `path`; parent directories are not searched.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GitscribeError> {
        let repo = Repository::open(path.as_ref())?;
        Ok(Self {
            repo: Rc::new(repo),
        })
    }

    /// Build the tree of the commit `HEAD` resolves to.
    pub fn head_tree(&self) -> Result<DirectoryNode, GitscribeError> {
        let commit = self.repo.head()?.peel_to_commit()?;
        tracing::debug!(commit = %commit.id(), "Loading snapshot");
        let tree = commit.tree()?;
        let children = self.load_children(&tree)?;
        Ok(DirectoryNode::root(children))
    }

    fn load_children(&self, tree: &Tree<'_>) -> Result<Vec<TreeNode>, GitscribeError> {
        let mut children = Vec::with_capacity(tree.len());

        for entry in tree.iter() {
            let name = String::from_utf8_lossy(entry.name_bytes()).into_owned();
            match entry.kind() {
                Some(ObjectType::Tree) => {
                    let subtree = self.repo.find_tree(entry.id())?;
                    let grandchildren = self.load_children(&subtree)?;
                    children.push(TreeNode::directory(name, grandchildren));
                }
                Some(ObjectType::Blob) => {
                    let blob = GitBlob {
                        repo: Rc::clone(&self.repo),
                        oid: entry.id(),
                    };
                    children.push(TreeNode::File(FileNode::new(name, blob)));
                }
                Some(ObjectType::Commit) => {
                    tracing::debug!("Skipping submodule: {}", name);
                }
                other => {
                    tracing::debug!("Skipping tree entry {} of kind {:?}", name, other);
                }
            }
        }

        Ok(children)
    }
}

/// Lazily read blob stored in the object database.
struct GitBlob {
    repo: Rc<Repository>,
    oid: Oid,
}

impl std::fmt::Debug for GitBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitBlob").field("oid", &self.oid).finish()
    }
}

impl BlobReader for GitBlob {
    fn read_bytes(&self) -> Result<Vec<u8>, GitscribeError> {
        let blob = self.repo.find_blob(self.oid)?;
        Ok(blob.content().to_vec())
    }
}
