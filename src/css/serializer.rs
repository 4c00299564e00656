//! CSS text output.
//!
//! Layout is fixed, whatever the input looked like:
//!
//! ```text
//!     .a {
//!     color: red;
//!     }
//!
//! @media (min-width: 600px){
//!     .a {
//!     color: blue;
//!     }
//! }
//! ```
//!
//! Base rules are emitted unwrapped; each media context wraps its rules in
//! `<header>{ ... }`. Contexts follow model order, separated by a blank line.

use std::fmt;

use crate::css::model::{Context, Declarations, Stylesheet};

const INDENT: &str = "    ";

/// Render the whole stylesheet. Non-empty output ends with a newline.
pub fn to_css(stylesheet: &Stylesheet) -> String {
    let chunks: Vec<String> = stylesheet
        .contexts()
        .filter(|context| !(context.key().is_base() && context.is_empty()))
        .map(render_context)
        .collect();

    if chunks.is_empty() {
        return String::new();
    }

    let mut css = chunks.join("\n\n");
    css.push('\n');
    css
}

fn render_context(context: &Context) -> String {
    let rules = context
        .selectors()
        .iter()
        .map(|(selector, declarations)| render_rule(selector, declarations))
        .collect::<Vec<_>>()
        .join("\n\n");

    if context.key().is_base() {
        rules
    } else {
        format!("{}{{\n{rules}\n}}", context.key())
    }
}

/// Render one rule: selector line, one declaration per line, closing brace.
pub fn render_rule(selector: &str, declarations: &Declarations) -> String {
    let body = declarations
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect::<Vec<_>>()
        .join("\n    ");

    format!("{INDENT}{selector} {{\n{INDENT}{body}\n{INDENT}}}")
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_css(self))
    }
}
