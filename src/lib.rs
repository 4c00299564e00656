//! # css-cascade-dedupe
//!
//! Removes declarations that `@media` overrides restate from the cascade.
//!
//! A stylesheet is read into a model of contexts (`base`, then each media query
//! in first-seen order), selectors and declarations. Each media context then
//! drops every declaration the context before it already supplies with the same
//! value, selectors left empty are pruned, and the model is written back as CSS.
//!
//! ```
//! let outcome = css_cascade_dedupe::dedupe(
//!     ".a{color:red;font-size:12px} @media (min-width:600px){.a{color:red;font-size:14px}}",
//! );
//! assert!(outcome.css.contains("@media (min-width:600px){\n    .a {\n    font-size: 14px;\n    }\n}"));
//! assert_eq!(outcome.report.removals.len(), 1);
//! ```
//!
//! ## Core Systems
//!
//! - **[`css`]** — Splitter, rule parser, stylesheet model, dedup pass, serializer
//! - **[`pipeline`]** — Whole-file read, transform and write with error reporting

// Engine
pub mod css;

// File I/O
pub mod pipeline;

use crate::css::dedup::DedupReport;
use crate::css::model::Stylesheet;
use crate::css::parser::parse_stylesheet;
use crate::css::warning::ParseWarning;

/// Result of one in-memory transform.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The model after dedup and pruning.
    pub stylesheet: Stylesheet,
    /// Generated CSS text.
    pub css: String,
    /// Input the parser dropped.
    pub warnings: Vec<ParseWarning>,
    /// What the dedup pass removed.
    pub report: DedupReport,
}

/// Parse, deduplicate, prune and serialize a stylesheet.
pub fn dedupe(input: &str) -> Outcome {
    let parsed = parse_stylesheet(input);
    let mut stylesheet = parsed.stylesheet;
    let report = stylesheet.dedupe();
    let css = stylesheet.to_string();

    Outcome {
        stylesheet,
        css,
        warnings: parsed.warnings,
        report,
    }
}
