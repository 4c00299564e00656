//! Diagnostics for input the parser had to drop.
//!
//! Parsing never fails. Anything it cannot place in the model is skipped and
//! reported as a [`ParseWarning`] so callers can surface the loss.

use crate::css::model::ContextKey;

/// Something the parser skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseWarning {
    #[error("{context}: rule `{fragment}` has no selector or no `{{`; dropped")]
    MalformedRule { context: ContextKey, fragment: String },

    #[error("{context}: rule `{selector}` contains a nested block; dropped")]
    NestedBlock { context: ContextKey, selector: String },

    #[error("{context}: `{selector}` declaration `{text}` has no `:`; dropped")]
    MissingColon {
        context: ContextKey,
        selector: String,
        text: String,
    },

    #[error("{context}: `{selector}` declaration `{text}` has an empty property or value; dropped")]
    EmptyDeclaration {
        context: ContextKey,
        selector: String,
        text: String,
    },

    #[error("{context}: selector `{selector}` defined again; earlier declarations replaced")]
    RedefinedSelector { context: ContextKey, selector: String },

    #[error("{context}: header repeated; earlier rule for `{selector}` discarded")]
    RedefinedContext { context: ContextKey, selector: String },

    #[error("`{header}` is not followed by a block; dropped")]
    HeaderWithoutBlock { header: String },

    #[error("`{header}` block is never closed; dropped")]
    UnterminatedBlock { header: String },

    #[error("top-level content after the first @media is outside every block: `{text}`; dropped")]
    StrayContent { text: String },
}
