//! Cascade-aware duplicate elimination and pruning.
//!
//! Media contexts are visited in first-seen order. Each one drops every
//! declaration whose value the preceding context already supplies for the same
//! selector and property; the first media context is additionally checked
//! against `base`. Removals happen in place, so a context is always compared
//! against its predecessor's already-deduplicated declarations.
//!
//! Only the first media context is compared against `base`; later contexts see
//! `base` only through the chain. This matches the established output of the
//! tool and is kept for compatibility.

use log::debug;

use crate::css::model::{ContextKey, Declarations, Stylesheet};

/// A declaration removed because an earlier context already supplies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub context: ContextKey,
    pub selector: String,
    pub property: String,
    pub value: String,
    /// The context whose identical declaration made this one redundant.
    pub duplicate_of: ContextKey,
}

/// A selector deleted because no declarations were left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pruned {
    pub context: ContextKey,
    pub selector: String,
}

/// Everything one elimination pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DedupReport {
    pub removals: Vec<Removal>,
    pub pruned: Vec<Pruned>,
}

impl Stylesheet {
    /// Remove declarations that restate an earlier context's value.
    pub fn eliminate_duplicates(&mut self) -> Vec<Removal> {
        let mut removals = Vec::new();

        for i in 1..self.contexts.len() {
            let (earlier, rest) = self.contexts.split_at_mut(i);
            let current = &mut rest[0];
            let base = &earlier[0];
            let previous = &earlier[i - 1];
            let key = current.key().clone();

            for (selector, declarations) in current.selectors.iter_mut() {
                let mut against = |other: &ContextKey, removed: Vec<(String, String)>| {
                    removals.extend(removed.into_iter().map(|(property, value)| Removal {
                        context: key.clone(),
                        selector: selector.clone(),
                        property,
                        value,
                        duplicate_of: other.clone(),
                    }));
                };

                if i == 1 {
                    if let Some(other) = base.get(selector) {
                        against(base.key(), strip_matching(declarations, other));
                    }
                }

                if let Some(other) = previous.get(selector) {
                    against(previous.key(), strip_matching(declarations, other));
                }
            }
        }

        for removal in &removals {
            debug!(
                "{}: removed `{}: {}` from `{}`, same in {}",
                removal.context,
                removal.property,
                removal.value,
                removal.selector,
                removal.duplicate_of
            );
        }

        removals
    }

    /// Delete selectors with no declarations left. Contexts are kept.
    pub fn prune(&mut self) -> Vec<Pruned> {
        let mut pruned = Vec::new();

        for context in &mut self.contexts {
            let key = context.key().clone();
            context.selectors.retain(|selector, declarations| {
                if declarations.is_empty() {
                    pruned.push(Pruned {
                        context: key.clone(),
                        selector: selector.clone(),
                    });
                    false
                } else {
                    true
                }
            });
        }

        for entry in &pruned {
            debug!("{}: pruned empty selector `{}`", entry.context, entry.selector);
        }

        pruned
    }

    /// Eliminate duplicates, then prune.
    pub fn dedupe(&mut self) -> DedupReport {
        let removals = self.eliminate_duplicates();
        let pruned = self.prune();
        DedupReport { removals, pruned }
    }
}

/// Remove from `declarations` every property whose value equals `other`'s,
/// returning the removed pairs.
fn strip_matching(declarations: &mut Declarations, other: &Declarations) -> Vec<(String, String)> {
    let mut removed = Vec::new();
    declarations.retain(|property, value| {
        if other.get(property) == Some(&*value) {
            removed.push((property.clone(), value.clone()));
            false
        } else {
            true
        }
    });
    removed
}
