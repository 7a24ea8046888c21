pub mod cost;
pub mod pricing;
pub mod tokenizer;

pub use cost::{CostCalculator, CostEstimate};
pub use pricing::{DEFAULT_MODEL, ModelPricing, Pricing, PricingTable};
pub use tokenizer::{TiktokenTokenizer, Tokenizer, TokenizerModel};
