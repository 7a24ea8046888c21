// Copyright (c) 2025-2026 the gitscribe contributors
// SPDX-License-Identifier: Apache-2.0

//! Inclusion and exclusion policy applied by the serializer.

use crate::utils::error::GitscribeError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::Path;

/// Directory names skipped wherever they appear in the tree.
pub const DEFAULT_IGNORED_DIRECTORIES: &[&str] = &["node_modules", ".git", ".github"];

/// File names skipped on exact match.
pub const DEFAULT_IGNORED_FILES: &[&str] = &["LICENSE", "LICENSE.txt", "LICENSE.md", ".gitignore"];

/// Binary image extensions, lowercase and without the dot.
pub const DEFAULT_IGNORED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "bmp", "ico"];

/// Line-comment markers stripped from file content, applied in order.
pub const DEFAULT_COMMENT_MARKERS: &[&str] = &["#", "//"];

/// Files whose decoded text is longer than this many characters are skipped.
pub const DEFAULT_MAX_FILE_CHARS: usize = 100_000;

/// Immutable policy consulted for every node during serialization.
#[derive(Debug, Clone)]
pub struct SerializerPolicy {
    ignored_directories: BTreeSet<String>,
    ignored_files: BTreeSet<String>,
    ignored_extensions: BTreeSet<String>,
    exclude_patterns: Vec<String>,
    exclude: GlobSet,
    comment_markers: Vec<String>,
    max_file_chars: usize,
}

impl Default for SerializerPolicy {
    fn default() -> Self {
        Self {
            ignored_directories: to_set(DEFAULT_IGNORED_DIRECTORIES),
            ignored_files: to_set(DEFAULT_IGNORED_FILES),
            ignored_extensions: to_set(DEFAULT_IGNORED_EXTENSIONS),
            exclude_patterns: Vec::new(),
            exclude: GlobSet::empty(),
            comment_markers: DEFAULT_COMMENT_MARKERS
                .iter()
                .map(|m| (*m).to_string())
                .collect(),
            max_file_chars: DEFAULT_MAX_FILE_CHARS,
        }
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl SerializerPolicy {
    /// Start from the default policy.
    pub fn builder() -> SerializerPolicyBuilder {
        SerializerPolicyBuilder {
            policy: Self::default(),
            exclude_patterns: Vec::new(),
        }
    }

    pub fn is_ignored_directory(&self, name: &str) -> bool {
        self.ignored_directories.contains(name)
    }

    /// Exact file-name match; `LICENSE.header` is not matched by `LICENSE`.
    pub fn is_ignored_file_name(&self, name: &str) -> bool {
        self.ignored_files.contains(name)
    }

    /// Case-insensitive match on the text after the last dot.
    ///
    /// Dot-files such as `.png` have no extension and never match.
    pub fn is_ignored_extension(&self, name: &str) -> bool {
        Path::new(name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.ignored_extensions.contains(&ext))
    }

    /// Whether a slash-joined path matches one of the exclude globs.
    pub fn is_excluded_path(&self, path: &str) -> bool {
        !self.exclude.is_empty() && self.exclude.is_match(path)
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude_patterns
    }

    pub fn comment_markers(&self) -> &[String] {
        &self.comment_markers
    }

    pub fn max_file_chars(&self) -> usize {
        self.max_file_chars
    }
}

/// Builder layering configuration on top of the default policy.
#[derive(Debug)]
pub struct SerializerPolicyBuilder {
    policy: SerializerPolicy,
    exclude_patterns: Vec<String>,
}

impl SerializerPolicyBuilder {
    pub fn ignore_directories<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy
            .ignored_directories
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn ignore_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy
            .ignored_files
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Extensions are normalized to lowercase with any leading dot removed.
    pub fn ignore_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy
            .ignored_extensions
            .extend(extensions.into_iter().map(|ext| {
                let ext: String = ext.into();
                ext.trim_start_matches('.').to_lowercase()
            }));
        self
    }

    pub fn exclude<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Replace the comment markers. An empty list disables stripping.
    pub fn comment_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.policy.comment_markers = markers
            .into_iter()
            .map(|m| -> String { m.into() })
            .filter(|m| !m.is_empty())
            .collect();
        self
    }

    pub fn max_file_chars(mut self, limit: usize) -> Self {
        self.policy.max_file_chars = limit;
        self
    }

    /// Compile exclude globs and produce the policy.
    pub fn build(mut self) -> Result<SerializerPolicy, GitscribeError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.exclude_patterns {
            let glob =
                Glob::new(pattern).map_err(|e| GitscribeError::invalid_glob(pattern, e))?;
            builder.add(glob);
        }
        self.policy.exclude = builder
            .build()
            .map_err(|e| GitscribeError::Config(format!("Failed to build glob set: {}", e)))?;
        self.policy.exclude_patterns = self.exclude_patterns;
        Ok(self.policy)
    }
}
