pub mod prompts;

pub use prompts::build_analysis_prompt;
