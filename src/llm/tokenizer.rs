// Copyright (c) 2025-2026 the gitscribe contributors
// SPDX-License-Identifier: Apache-2.0

//! Token counting for prompts.
//!
//! The encoding is chosen from the model identifier the prompt is priced for.
//!
//! # Example
//!
//! ```
//! use gitscribe::llm::tokenizer::{TiktokenTokenizer, Tokenizer};
//!
//! let tokenizer = TiktokenTokenizer::for_model("claude-3-sonnet-20240229").unwrap();
//! let count = tokenizer.count_tokens("Hello, world!");
//! assert!(count > 0);
//! ```

use crate::utils::error::GitscribeError;
use tiktoken_rs::{cl100k_base, o200k_base};

/// Counts tokens in text.
pub trait Tokenizer {
    fn count_tokens(&self, text: &str) -> usize;
}

/// BPE encoding families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerModel {
    /// GPT-4, GPT-3.5-turbo (cl100k_base)
    Gpt4,
    /// GPT-4o, GPT-4o-mini, o1 (o200k_base)
    Gpt4o,
    /// Claude models (cl100k_base as approximation)
    Claude,
}

impl TokenizerModel {
    /// Pick the encoding family for a model identifier.
    ///
    /// Unknown models fall back to cl100k_base.
    pub fn from_model_name(model: &str) -> Self {
        let model_lower = model.to_lowercase();

        if model_lower.contains("gpt-4o") || model_lower.starts_with("o1") {
            return Self::Gpt4o;
        }

        if model_lower.contains("claude") {
            return Self::Claude;
        }

        Self::Gpt4
    }

    pub fn encoding_name(self) -> &'static str {
        match self {
            Self::Gpt4 | Self::Claude => "cl100k_base",
            Self::Gpt4o => "o200k_base",
        }
    }
}

/// Tokenizer backed by tiktoken encodings.
pub struct TiktokenTokenizer {
    model: TokenizerModel,
    encoding: tiktoken_rs::CoreBPE,
}

impl std::fmt::Debug for TiktokenTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenTokenizer")
            .field("encoding", &self.model.encoding_name())
            .finish()
    }
}

impl TiktokenTokenizer {
    /// # Errors
    ///
    /// Returns an error if the encoding cannot be loaded.
    pub fn new(model: TokenizerModel) -> Result<Self, GitscribeError> {
        let encoding = match model {
            TokenizerModel::Gpt4 | TokenizerModel::Claude => cl100k_base(),
            TokenizerModel::Gpt4o => o200k_base(),
        }
        .map_err(|e| GitscribeError::Tokenizer(e.to_string()))?;

        Ok(Self { model, encoding })
    }

    /// Tokenizer for a model identifier such as `claude-3-sonnet-20240229`.
    pub fn for_model(model_name: &str) -> Result<Self, GitscribeError> {
        Self::new(TokenizerModel::from_model_name(model_name))
    }

    pub fn model(&self) -> TokenizerModel {
        self.model
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        self.encoding.encode_with_special_tokens(text).len()
    }
}
