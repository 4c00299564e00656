//! Stylesheet model: contexts, selector blocks, declaration sets.
//!
//! A [`Stylesheet`] is an ordered list of [`Context`]s plus a lookup index.
//! The `base` context always sits at position 0; media contexts follow in the
//! order their headers were first seen. That order drives the cascade pass in
//! [`crate::css::dedup`], so it is kept as an explicit `Vec` rather than left
//! to the iteration order of a map.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

/// Property name → value, in first-declared order.
pub type Declarations = IndexMap<String, String>;

/// Selector name → declarations, in first-defined order.
pub type SelectorBlock = IndexMap<String, Declarations>;

/// Identifies a context: the top-level rules or one media query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextKey {
    /// Rules outside any `@media` block.
    Base,
    /// An `@media` block, keyed by its header with outer whitespace trimmed.
    Media(String),
}

impl ContextKey {
    /// Build a media key from raw header text.
    pub fn media(header: &str) -> Self {
        ContextKey::Media(header.trim().to_string())
    }

    /// Returns `true` for the base context.
    pub fn is_base(&self) -> bool {
        matches!(self, ContextKey::Base)
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKey::Base => f.write_str("base"),
            ContextKey::Media(header) => f.write_str(header),
        }
    }
}

/// One context and its rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Context {
    key: ContextKey,
    pub(crate) selectors: SelectorBlock,
}

impl Context {
    fn new(key: ContextKey) -> Self {
        Self {
            key,
            selectors: SelectorBlock::new(),
        }
    }

    pub fn key(&self) -> &ContextKey {
        &self.key
    }

    pub fn selectors(&self) -> &SelectorBlock {
        &self.selectors
    }

    /// Declarations for `selector`, if this context defines it.
    pub fn get(&self, selector: &str) -> Option<&Declarations> {
        self.selectors.get(selector)
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// The whole stylesheet, contexts in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    pub(crate) contexts: Vec<Context>,
    index: HashMap<ContextKey, usize>,
}

impl Stylesheet {
    /// Create a stylesheet holding only an empty base context.
    pub fn new() -> Self {
        let mut index = HashMap::new();
        index.insert(ContextKey::Base, 0);
        Self {
            contexts: vec![Context::new(ContextKey::Base)],
            index,
        }
    }

    /// Position of `key`, appending an empty context if it is new.
    pub fn context_or_insert(&mut self, key: ContextKey) -> usize {
        if let Some(&position) = self.index.get(&key) {
            return position;
        }
        let position = self.contexts.len();
        self.index.insert(key.clone(), position);
        self.contexts.push(Context::new(key));
        position
    }

    /// Position of `key` with its rules cleared, appending an empty context if
    /// it is new. A repeated header keeps its first-seen position; the rules it
    /// held before are returned.
    pub(crate) fn reset_context(&mut self, key: ContextKey) -> (usize, SelectorBlock) {
        let position = self.context_or_insert(key);
        let discarded = std::mem::take(&mut self.contexts[position].selectors);
        (position, discarded)
    }

    /// Store a rule in the context at `position`, which must come from
    /// [`Stylesheet::context_or_insert`].
    ///
    /// A selector already present keeps its place but has its declarations
    /// replaced; the old set is returned.
    pub(crate) fn insert_rule(
        &mut self,
        position: usize,
        selector: impl Into<String>,
        declarations: Declarations,
    ) -> Option<Declarations> {
        self.contexts[position]
            .selectors
            .insert(selector.into(), declarations)
    }

    /// The base context.
    pub fn base(&self) -> &Context {
        &self.contexts[0]
    }

    pub fn get(&self, key: &ContextKey) -> Option<&Context> {
        self.index.get(key).map(|&position| &self.contexts[position])
    }

    /// Contexts in first-seen order, base first.
    pub fn contexts(&self) -> impl Iterator<Item = &Context> {
        self.contexts.iter()
    }

    /// Number of contexts, base included.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Returns `true` when no context holds any rule.
    pub fn is_empty(&self) -> bool {
        self.contexts.iter().all(Context::is_empty)
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decls(pairs: &[(&str, &str)]) -> Declarations {
        pairs
            .iter()
            .map(|(p, v)| (p.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_new_has_only_base() {
        let sheet = Stylesheet::new();
        assert_eq!(sheet.len(), 1);
        assert!(sheet.base().key().is_base());
        assert!(sheet.is_empty());
    }

    #[test]
    fn test_context_order_is_first_seen() {
        let mut sheet = Stylesheet::new();
        let wide = sheet.context_or_insert(ContextKey::media("@media (min-width: 900px)"));
        let narrow = sheet.context_or_insert(ContextKey::media("@media (min-width: 600px)"));
        let again = sheet.context_or_insert(ContextKey::media("@media (min-width: 900px) "));

        assert_eq!((wide, narrow, again), (1, 2, 1));
        let keys: Vec<String> = sheet.contexts().map(|c| c.key().to_string()).collect();
        assert_eq!(
            keys,
            vec!["base", "@media (min-width: 900px)", "@media (min-width: 600px)"]
        );
    }

    #[test]
    fn test_base_key_is_reserved() {
        let mut sheet = Stylesheet::new();
        assert_eq!(sheet.context_or_insert(ContextKey::Base), 0);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn test_media_key_keeps_inner_whitespace() {
        let key = ContextKey::media("  @media  screen and (x)\n");
        assert_eq!(key, ContextKey::Media("@media  screen and (x)".into()));
    }

    #[test]
    fn test_insert_rule_replaces_and_keeps_position() {
        let mut sheet = Stylesheet::new();
        assert!(sheet.insert_rule(0, ".a", decls(&[("color", "red")])).is_none());
        sheet.insert_rule(0, ".b", decls(&[("margin", "0")]));

        let old = sheet.insert_rule(0, ".a", decls(&[("color", "blue")]));
        assert_eq!(old, Some(decls(&[("color", "red")])));

        let names: Vec<&String> = sheet.base().selectors().keys().collect();
        assert_eq!(names, vec![".a", ".b"]);
        assert_eq!(sheet.base().get(".a"), Some(&decls(&[("color", "blue")])));
    }

    #[test]
    fn test_reset_context_keeps_position() {
        let mut sheet = Stylesheet::new();
        let a = sheet.context_or_insert(ContextKey::media("@media (a)"));
        sheet.insert_rule(a, ".x", decls(&[("p", "1")]));
        sheet.context_or_insert(ContextKey::media("@media (b)"));

        let (position, discarded) = sheet.reset_context(ContextKey::media("@media (a)"));
        assert_eq!(position, a);
        assert_eq!(discarded.keys().collect::<Vec<_>>(), vec![".x"]);
        assert!(sheet.get(&ContextKey::media("@media (a)")).expect("context").is_empty());
        assert_eq!(sheet.len(), 3);
    }

    #[test]
    fn test_reset_new_context_discards_nothing() {
        let mut sheet = Stylesheet::new();
        let (position, discarded) = sheet.reset_context(ContextKey::media("@media print"));
        assert_eq!(position, 1);
        assert!(discarded.is_empty());
    }

    #[test]
    fn test_headers_differing_in_outer_whitespace_share_a_context() {
        let mut sheet = Stylesheet::new();
        let plain = sheet.context_or_insert(ContextKey::media("@media (a)"));
        let padded = sheet.context_or_insert(ContextKey::media("\n@media (a) "));
        let spaced = sheet.context_or_insert(ContextKey::media("@media  (a)"));

        assert_eq!(plain, padded);
        assert_ne!(plain, spaced);
    }

    #[test]
    fn test_get_by_key() {
        let mut sheet = Stylesheet::new();
        let key = ContextKey::media("@media print");
        let position = sheet.context_or_insert(key.clone());
        sheet.insert_rule(position, "body", decls(&[("color", "black")]));

        let context = sheet.get(&key).expect("context exists");
        assert_eq!(context.get("body").map(|d| d.len()), Some(1));
        assert!(sheet.get(&ContextKey::media("@media screen")).is_none());
        assert!(!sheet.is_empty());
    }
}
