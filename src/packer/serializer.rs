// Copyright (c) 2025-2026 the gitscribe contributors
// SPDX-License-Identifier: Apache-2.0

//! Repository-to-document serializer.
//!
//! Walks a [`DirectoryNode`] depth-first in snapshot order and emits one
//! markup document:
//!
//! ```text
//! <repository>
//! <directory name='src'>
//! <file name='main.rs'>
//! fn main() {}
//!
//! </file>
//! </directory>
//! </repository>
//! ```
//!
//! Every file yields a [`FileOutcome`]. Skips and read failures are collected
//! in the [`SerializeReport`] and logged; none of them stops the traversal.
//!
//! # Example
//!
//! ```
//! use gitscribe::packer::{DirectoryNode, SerializerPolicy, TreeNode, TreeSerializer};
//!
//! let root = DirectoryNode::root(vec![
//!     TreeNode::file("main.rs", "fn main() {}"),
//!     TreeNode::file("logo.png", vec![0x89, 0x50]),
//! ]);
//! let serializer = TreeSerializer::new(SerializerPolicy::default()).unwrap();
//! let document = serializer.serialize_repository(&root);
//!
//! assert!(document.text.contains("<file name='main.rs'>"));
//! assert_eq!(document.report.files_included, 1);
//! assert_eq!(document.report.skipped.len(), 1);
//! ```

use super::policy::SerializerPolicy;
use super::sanitize::{
    CommentStripper, ContentCheck, check_content, decode_lossy, escape_attribute, escape_content,
};
use super::tree::{DirectoryNode, FileNode, TreeNode, join_path};
use crate::utils::error::GitscribeError;
use serde::Serialize;
use std::fmt;

/// Why a directory or file was left out of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    IgnoredDirectory,
    IgnoredFileName,
    IgnoredExtension,
    ExcludedByPattern,
    Binary,
    Oversized { chars: usize, limit: usize },
    ReadFailed(String),
}

impl SkipReason {
    /// Policy exclusions are expected outcomes; read failures are not.
    pub fn is_error(&self) -> bool {
        matches!(*self, SkipReason::ReadFailed(_))
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IgnoredDirectory => write!(f, "ignored directory"),
            Self::IgnoredFileName => write!(f, "ignored file name"),
            Self::IgnoredExtension => write!(f, "ignored extension"),
            Self::ExcludedByPattern => write!(f, "excluded by pattern"),
            Self::Binary => write!(f, "binary"),
            Self::Oversized { chars, limit } => {
                write!(f, "too large: {} chars > {} limit", chars, limit)
            }
            Self::ReadFailed(ref message) => write!(f, "read failed: {}", message),
        }
    }
}

/// Result of processing a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Escaped content ready to embed in a `<file>` element.
    Included(String),
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Directory,
    File,
}

/// A node left out of the document, with its slash path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub path: String,
    pub kind: EntryKind,
    pub reason: SkipReason,
}

/// Aggregated outcomes of one serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SerializeReport {
    pub directories_included: usize,
    pub files_included: usize,
    pub skipped: Vec<SkippedEntry>,
}

impl SerializeReport {
    /// Skipped entries caused by read failures.
    pub fn failures(&self) -> impl Iterator<Item = &SkippedEntry> {
        self.skipped.iter().filter(|entry| entry.reason.is_error())
    }

    fn skip(&mut self, path: String, kind: EntryKind, reason: SkipReason) {
        self.skipped.push(SkippedEntry { path, kind, reason });
    }
}

/// The serialized repository and how it was produced.
#[derive(Debug, Clone)]
pub struct Document {
    pub text: String,
    pub report: SerializeReport,
}

/// Serializes snapshot trees under a fixed [`SerializerPolicy`].
#[derive(Debug, Clone)]
pub struct TreeSerializer {
    policy: SerializerPolicy,
    stripper: CommentStripper,
}

impl TreeSerializer {
    pub fn new(policy: SerializerPolicy) -> Result<Self, GitscribeError> {
        let stripper = CommentStripper::new(policy.comment_markers())?;
        Ok(Self { policy, stripper })
    }

    pub fn policy(&self) -> &SerializerPolicy {
        &self.policy
    }

    /// Serialize the whole snapshot wrapped in a `<repository>` element.
    pub fn serialize_repository(&self, root: &DirectoryNode) -> Document {
        let (body, report) = self.serialize_subtree(root, "");

        let mut text = String::with_capacity(body.len() + 32);
        text.push_str("<repository>\n");
        text.push_str(&body);
        text.push_str("</repository>");

        tracing::debug!(
            directories = report.directories_included,
            files = report.files_included,
            skipped = report.skipped.len(),
            "Serialized repository"
        );

        Document { text, report }
    }

    /// Serialize the children of `dir` without a wrapping element.
    ///
    /// `prefix` is the slash path of `dir` and only affects diagnostics and
    /// exclude-pattern matching.
    pub fn serialize_subtree(&self, dir: &DirectoryNode, prefix: &str) -> (String, SerializeReport) {
        let mut out = String::new();
        let mut report = SerializeReport::default();
        self.serialize_directory(dir, prefix, &mut out, &mut report);
        (out, report)
    }

    fn serialize_directory(
        &self,
        dir: &DirectoryNode,
        path: &str,
        out: &mut String,
        report: &mut SerializeReport,
    ) {
        for child in &dir.children {
            match *child {
                TreeNode::Directory(ref sub) => {
                    let dir_path = join_path(path, &sub.name);

                    let skip = if self.policy.is_ignored_directory(&sub.name) {
                        Some(SkipReason::IgnoredDirectory)
                    } else if self.policy.is_excluded_path(&dir_path) {
                        Some(SkipReason::ExcludedByPattern)
                    } else {
                        None
                    };
                    if let Some(reason) = skip {
                        tracing::info!("Skipping directory: {}", dir_path);
                        report.skip(dir_path, EntryKind::Directory, reason);
                        continue;
                    }

                    tracing::debug!("Entering directory: {}", dir_path);
                    out.push_str("<directory name='");
                    out.push_str(&escape_attribute(&sub.name));
                    out.push_str("'>\n");
                    self.serialize_directory(sub, &dir_path, out, report);
                    out.push_str("</directory>\n");
                    report.directories_included += 1;
                }
                TreeNode::File(ref file) => {
                    let file_path = join_path(path, &file.name);
                    match self.process_file(file, &file_path) {
                        FileOutcome::Included(content) => {
                            out.push_str("<file name='");
                            out.push_str(&escape_attribute(&file.name));
                            out.push_str("'>\n");
                            out.push_str(&content);
                            out.push_str("\n</file>\n");
                            report.files_included += 1;
                        }
                        FileOutcome::Skipped(reason) => {
                            if let SkipReason::ReadFailed(ref message) = reason {
                                tracing::warn!("Error processing file {}: {}", file_path, message);
                            } else {
                                tracing::info!("Skipping file ({}): {}", reason, file_path);
                            }
                            report.skip(file_path, EntryKind::File, reason);
                        }
                    }
                }
            }
        }
    }

    /// Apply the file policy and sanitize one file's content.
    ///
    /// The file's bytes live only for the duration of this call.
    pub fn process_file(&self, file: &FileNode, path: &str) -> FileOutcome {
        if self.policy.is_ignored_file_name(&file.name) {
            return FileOutcome::Skipped(SkipReason::IgnoredFileName);
        }
        if self.policy.is_ignored_extension(&file.name) {
            return FileOutcome::Skipped(SkipReason::IgnoredExtension);
        }
        if self.policy.is_excluded_path(path) {
            return FileOutcome::Skipped(SkipReason::ExcludedByPattern);
        }

        tracing::debug!("Processing file: {}", path);

        let bytes = match file.read_bytes() {
            Ok(bytes) => bytes,
            Err(e) => return FileOutcome::Skipped(SkipReason::ReadFailed(e.to_string())),
        };
        let text = decode_lossy(&bytes);

        let limit = self.policy.max_file_chars();
        match check_content(&text, limit) {
            ContentCheck::Binary => return FileOutcome::Skipped(SkipReason::Binary),
            ContentCheck::Oversized { chars } => {
                return FileOutcome::Skipped(SkipReason::Oversized { chars, limit });
            }
            ContentCheck::Text => {}
        }

        let stripped = self.stripper.strip(&text);
        FileOutcome::Included(escape_content(&stripped).into_owned())
    }
}
