// Copyright (c) 2025-2026 the gitscribe contributors
// SPDX-License-Identifier: Apache-2.0

//! Prompt generation for repository analysis.
//!
//! # Example
//!
//! ```
//! use gitscribe::generator::prompts::build_analysis_prompt;
//!
//! let prompt = build_analysis_prompt("<repository>\n</repository>");
//! assert!(prompt.contains("<repository>\n</repository>"));
//! ```

/// Placeholder replaced by the serialized repository.
const REPOSITORY_PLACEHOLDER: &str = "{{repository}}";

/// Load the analysis prompt template.
pub fn analysis_prompt() -> &'static str {
    include_str!("../../prompts/analysis.md")
}

/// Interpolate a serialized repository into the analysis template.
///
/// The template asks for a project summary, a directory-structure overview,
/// architectural observations and improvement suggestions.
pub fn build_analysis_prompt(document: &str) -> String {
    analysis_prompt().replacen(REPOSITORY_PLACEHOLDER, document, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_single_placeholder() {
        assert_eq!(analysis_prompt().matches(REPOSITORY_PLACEHOLDER).count(), 1);
    }

    #[test]
    fn test_build_analysis_prompt_embeds_document() {
        let document = "<repository>\n<file name='a.rs'>\nfn a() {}\n</file>\n</repository>";
        let prompt = build_analysis_prompt(document);

        assert!(prompt.starts_with("\nPlease analyze the following Git repository content"));
        assert!(prompt.contains(&format!("hierarchy:\n\n{}\n\nBased on", document)));
        assert!(!prompt.contains(REPOSITORY_PLACEHOLDER));
        assert!(prompt.ends_with("optimization, if any.\n"));
    }

    #[test]
    fn test_prompt_requests_four_sections() {
        let prompt = build_analysis_prompt("");
        assert!(prompt.contains("1. A brief summary of the project"));
        assert!(prompt.contains("2. An overview of the project's directory structure"));
        assert!(prompt.contains("3. Any notable patterns"));
        assert!(prompt.contains("4. Potential areas for improvement"));
    }

    #[test]
    fn test_placeholder_inside_document_is_not_expanded() {
        let prompt = build_analysis_prompt("literal {{repository}} text");
        assert_eq!(prompt.matches(REPOSITORY_PLACEHOLDER).count(), 1);
    }
}
