//! Cost estimation for prompts.
//!
//! # Example
//!
//! ```
//! use gitscribe::llm::cost::CostCalculator;
//! use gitscribe::llm::pricing::Pricing;
//!
//! let calculator = CostCalculator::new(Pricing {
//!     input_per_1k: 0.003,
//!     output_per_1k: 0.015,
//! });
//!
//! // 2,000 prompt tokens at $0.003 per 1K
//! let estimate = calculator.estimate_prompt_cost(2000);
//! assert!((estimate.total_cost - 0.006).abs() < 1e-12);
//! ```

use crate::llm::pricing::Pricing;
use serde::{Deserialize, Serialize};

/// Cost estimate for a single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Estimated cost for input tokens in dollars.
    pub input_cost: f64,
    /// Estimated cost for output tokens in dollars.
    pub output_cost: f64,
    /// Total estimated cost in dollars.
    pub total_cost: f64,
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl CostEstimate {
    #[must_use]
    pub fn new(
        input_cost: f64,
        output_cost: f64,
        input_tokens: usize,
        output_tokens: usize,
    ) -> Self {
        Self {
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            input_tokens,
            output_tokens,
        }
    }

    #[must_use]
    pub fn total_tokens(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

/// Calculator for costs based on per-1K-token pricing.
#[derive(Debug, Clone)]
pub struct CostCalculator {
    pricing: Pricing,
}

impl CostCalculator {
    #[must_use]
    pub fn new(pricing: Pricing) -> Self {
        Self { pricing }
    }

    #[must_use]
    pub fn pricing(&self) -> &Pricing {
        &self.pricing
    }

    /// Input cost = (input_tokens / 1000) * input_per_1k
    #[must_use]
    pub fn calculate_input_cost(&self, input_tokens: usize) -> f64 {
        (input_tokens as f64 / 1000.0) * self.pricing.input_per_1k
    }

    #[must_use]
    pub fn calculate_output_cost(&self, output_tokens: usize) -> f64 {
        (output_tokens as f64 / 1000.0) * self.pricing.output_per_1k
    }

    #[must_use]
    pub fn estimate_cost(
        &self,
        input_tokens: usize,
        estimated_output_tokens: usize,
    ) -> CostEstimate {
        CostEstimate::new(
            self.calculate_input_cost(input_tokens),
            self.calculate_output_cost(estimated_output_tokens),
            input_tokens,
            estimated_output_tokens,
        )
    }

    /// Cost of sending a prompt, without any completion.
    #[must_use]
    pub fn estimate_prompt_cost(&self, prompt_tokens: usize) -> CostEstimate {
        self.estimate_cost(prompt_tokens, 0)
    }
}
