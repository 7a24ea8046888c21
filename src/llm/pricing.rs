// Copyright (c) 2025-2026 the gitscribe contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-model pricing table.
//!
//! Prices are USD per 1,000 tokens. The built-in table covers common hosted
//! models; configuration can override entries or add new ones.

use crate::utils::error::GitscribeError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    pub input_per_1k: f64,
    #[serde(default)]
    pub output_per_1k: f64,
}

/// A pricing entry as written in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelPricing {
    pub model: String,
    #[serde(flatten)]
    pub pricing: Pricing,
}

const BUILTIN_PRICES: &[(&str, f64, f64)] = &[
    ("claude-3-opus-20240229", 0.015, 0.075),
    ("claude-3-sonnet-20240229", 0.003, 0.015),
    ("claude-3-haiku-20240307", 0.000_25, 0.001_25),
    ("claude-3-5-sonnet-20240620", 0.003, 0.015),
    ("claude-3-5-sonnet-20241022", 0.003, 0.015),
    ("claude-3-5-haiku-20241022", 0.000_8, 0.004),
    ("gpt-4", 0.03, 0.06),
    ("gpt-4-turbo", 0.01, 0.03),
    ("gpt-4o", 0.002_5, 0.01),
    ("gpt-4o-mini", 0.000_15, 0.000_6),
    ("gpt-3.5-turbo", 0.000_5, 0.001_5),
];

/// Lookup table from model identifier to pricing.
#[derive(Debug, Clone, Default)]
pub struct PricingTable {
    models: BTreeMap<String, Pricing>,
}

impl PricingTable {
    pub fn builtin() -> Self {
        let models = BUILTIN_PRICES
            .iter()
            .map(|&(model, input_per_1k, output_per_1k)| {
                (
                    model.to_string(),
                    Pricing {
                        input_per_1k,
                        output_per_1k,
                    },
                )
            })
            .collect();
        Self { models }
    }

    /// Add or replace entries; later entries win.
    pub fn with_overrides(mut self, overrides: &[ModelPricing]) -> Self {
        for entry in overrides {
            self.models.insert(entry.model.clone(), entry.pricing);
        }
        self
    }

    /// # Errors
    ///
    /// Returns a validation error naming the known models if `model` is absent.
    pub fn lookup(&self, model: &str) -> Result<Pricing, GitscribeError> {
        self.models.get(model).copied().ok_or_else(|| {
            let known: Vec<&str> = self.models.keys().map(String::as_str).collect();
            GitscribeError::unknown_model(model, &known)
        })
    }

    pub fn models(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_is_priced() {
        let pricing = PricingTable::builtin().lookup(DEFAULT_MODEL).unwrap();
        assert!((pricing.input_per_1k - 0.003).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_model_is_validation_error() {
        let err = PricingTable::builtin().lookup("made-up-model").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("made-up-model"));
        assert!(msg.contains("gpt-4o"));
    }

    #[test]
    fn test_overrides_add_and_replace() {
        let table = PricingTable::builtin().with_overrides(&[
            ModelPricing {
                model: "local-llama".to_string(),
                pricing: Pricing {
                    input_per_1k: 0.0,
                    output_per_1k: 0.0,
                },
            },
            ModelPricing {
                model: "gpt-4o".to_string(),
                pricing: Pricing {
                    input_per_1k: 1.0,
                    output_per_1k: 2.0,
                },
            },
        ]);
        assert!(table.lookup("local-llama").is_ok());
        assert!((table.lookup("gpt-4o").unwrap().input_per_1k - 1.0).abs() < f64::EPSILON);
        assert!(table.models().any(|m| m == "claude-3-opus-20240229"));
    }

    #[test]
    fn test_model_pricing_deserializes_flat() {
        let entry: ModelPricing =
            serde_json::from_str(r#"{"model": "m", "input_per_1k": 0.5}"#).unwrap();
        assert_eq!(entry.model, "m");
        assert!((entry.pricing.input_per_1k - 0.5).abs() < f64::EPSILON);
        assert!((entry.pricing.output_per_1k).abs() < f64::EPSILON);
    }
}
