//! Rule parser and model builder.
//!
//! Turns stylesheet text into a [`Stylesheet`]. Regions come from
//! [`crate::css::tokenizer::split`]; each region is cut at every `}` into one
//! fragment per flat `selector { declarations }` rule. Nothing here fails:
//! fragments that cannot be parsed are dropped and reported as
//! [`ParseWarning`]s.

use crate::css::model::{ContextKey, Declarations, Stylesheet};
use crate::css::tokenizer::{self, Dropped};
use crate::css::warning::ParseWarning;

/// A built model together with everything dropped while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStylesheet {
    pub stylesheet: Stylesheet,
    pub warnings: Vec<ParseWarning>,
}

/// Parse stylesheet text into a [`Stylesheet`].
pub fn parse_stylesheet(input: &str) -> ParsedStylesheet {
    let split = tokenizer::split(input);
    let mut builder = Builder {
        stylesheet: Stylesheet::new(),
        warnings: Vec::new(),
    };

    builder.parse_region(0, &ContextKey::Base, split.base);

    for media in &split.media {
        let key = ContextKey::media(media.header);
        let (position, discarded) = builder.stylesheet.reset_context(key.clone());
        for selector in discarded.into_keys() {
            builder.warnings.push(ParseWarning::RedefinedContext {
                context: key.clone(),
                selector,
            });
        }
        builder.parse_region(position, &key, media.body);
    }

    for dropped in split.dropped {
        builder.warnings.push(match dropped {
            Dropped::HeaderWithoutBlock(header) => ParseWarning::HeaderWithoutBlock {
                header: header.to_string(),
            },
            Dropped::UnterminatedBlock(header) => ParseWarning::UnterminatedBlock {
                header: header.to_string(),
            },
            Dropped::Stray(text) => ParseWarning::StrayContent {
                text: text.to_string(),
            },
        });
    }

    ParsedStylesheet {
        stylesheet: builder.stylesheet,
        warnings: builder.warnings,
    }
}

/// One rule cut out of a region.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub selector: String,
    pub declarations: Declarations,
}

/// Parse one `selector { declarations` fragment (closing brace already cut).
///
/// Returns `None` for whitespace-only fragments and for fragments that were
/// dropped; drops push a warning.
pub fn parse_rule(
    fragment: &str,
    context: &ContextKey,
    warnings: &mut Vec<ParseWarning>,
) -> Option<Rule> {
    let trimmed = fragment.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Some((name, body)) = trimmed.split_once('{') else {
        warnings.push(ParseWarning::MalformedRule {
            context: context.clone(),
            fragment: trimmed.to_string(),
        });
        return None;
    };

    let selector = name.trim();
    if selector.is_empty() {
        warnings.push(ParseWarning::MalformedRule {
            context: context.clone(),
            fragment: trimmed.to_string(),
        });
        return None;
    }

    if body.contains('{') {
        warnings.push(ParseWarning::NestedBlock {
            context: context.clone(),
            selector: selector.to_string(),
        });
        return None;
    }

    let declarations = parse_declarations(body, context, selector, warnings);
    Some(Rule {
        selector: selector.to_string(),
        declarations,
    })
}

/// Parse a declaration body: `prop: value; prop: value`.
///
/// Only the first `:` of each declaration separates property from value.
/// A property declared twice keeps its first position and its last value.
pub fn parse_declarations(
    body: &str,
    context: &ContextKey,
    selector: &str,
    warnings: &mut Vec<ParseWarning>,
) -> Declarations {
    let mut declarations = Declarations::new();

    for segment in body.split(';') {
        let text = segment.trim();
        if text.is_empty() {
            continue;
        }

        let Some((property, value)) = text.split_once(':') else {
            warnings.push(ParseWarning::MissingColon {
                context: context.clone(),
                selector: selector.to_string(),
                text: text.to_string(),
            });
            continue;
        };

        let (property, value) = (property.trim(), value.trim());
        if property.is_empty() || value.is_empty() {
            warnings.push(ParseWarning::EmptyDeclaration {
                context: context.clone(),
                selector: selector.to_string(),
                text: text.to_string(),
            });
            continue;
        }

        declarations.insert(property.to_string(), value.to_string());
    }

    declarations
}

/// Model-building state.
struct Builder {
    stylesheet: Stylesheet,
    warnings: Vec<ParseWarning>,
}

impl Builder {
    /// Parse every rule of a region into the context at `position`.
    fn parse_region(&mut self, position: usize, key: &ContextKey, region: &str) {
        for fragment in region.split('}') {
            let Some(rule) = parse_rule(fragment, key, &mut self.warnings) else {
                continue;
            };
            let replaced = self
                .stylesheet
                .insert_rule(position, rule.selector.clone(), rule.declarations);
            if replaced.is_some() {
                self.warnings.push(ParseWarning::RedefinedSelector {
                    context: key.clone(),
                    selector: rule.selector,
                });
            }
        }
    }
}
