//! Token classification against a dialect's descriptor tables.

use std::sync::Arc;

use crate::cache::KnownTokenCache;
use crate::descriptor::{Dialect, DialectDescriptor, StatementGroup};

/// Answers validity, ordering, aggregation and aliasing questions for the
/// tokens a fluent builder emits.
///
/// Classification is a pure function of `(dialect, group, token)`; every
/// operation is total for string inputs. Unknown tokens come back as
/// `false`/`None`, never as errors — the builder decides whether that is a
/// problem.
#[derive(Debug, Clone)]
pub struct TokenClassifier {
    descriptor: Arc<DialectDescriptor>,
}

impl TokenClassifier {
    /// Classifier for a built-in dialect.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            descriptor: dialect.descriptor(),
        }
    }

    /// Classifier over a custom descriptor.
    pub fn with_descriptor(descriptor: Arc<DialectDescriptor>) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &DialectDescriptor {
        &self.descriptor
    }

    /// Canonical name for `token`: the alias target if one exists, the token
    /// itself otherwise. The alias map is flat, so resolution is one hop.
    pub fn resolve_alias<'a>(&self, token: &'a str) -> &'a str {
        match self.descriptor.alias_target(token) {
            Some(canonical) => canonical,
            None => token,
        }
    }

    /// Whether the dialect's executor can act on `token` within `group`.
    ///
    /// Groups with an ordering entry check membership there; a group without
    /// one carries no ordering constraint and falls back to the relevant set.
    pub fn is_relevant(&self, group: StatementGroup, token: &str) -> bool {
        let canonical = self.resolve_alias(token);
        match self.descriptor.ordering(group) {
            Some(sequence) => sequence.contains(&canonical),
            None => self.descriptor.relevant().contains(canonical),
        }
    }

    /// Whether `token` may be supplied repeatedly but collapses into a single
    /// logical clause occurrence.
    pub fn is_aggregate(&self, token: &str) -> bool {
        self.descriptor.is_aggregate(self.resolve_alias(token))
    }

    /// Position of `token` in the canonical clause order of `group`.
    ///
    /// Reports position only; tokens supplied out of order are the caller's
    /// concern, the stream is never reordered here.
    pub fn ordering_index(&self, group: StatementGroup, token: &str) -> Option<usize> {
        let canonical = self.resolve_alias(token);
        self.descriptor
            .ordering(group)?
            .iter()
            .position(|entry| *entry == canonical)
    }

    /// Infix symbol joining multiple parameters of `token`, or `None` when
    /// the parameters must be rendered as a list.
    pub fn join_operator(&self, token: &str) -> Option<&'static str> {
        self.descriptor.operator(self.resolve_alias(token))
    }

    /// Memoized relevance check through the process-wide known-token cache.
    pub fn is_known(&self, group: StatementGroup, token: &str) -> bool {
        self.is_known_in(KnownTokenCache::global(), group, token)
    }

    /// Memoized relevance check against a specific cache.
    pub fn is_known_in(
        &self,
        cache: &KnownTokenCache,
        group: StatementGroup,
        token: &str,
    ) -> bool {
        cache.is_known(self.descriptor.name(), group, token, || {
            self.is_relevant(group, token)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sqlite() -> TokenClassifier {
        TokenClassifier::new(Dialect::Sqlite)
    }

    #[test]
    fn test_resolve_alias_one_hop() {
        let classifier = sqlite();
        assert_eq!(classifier.resolve_alias("left_join"), "join");
        assert_eq!(classifier.resolve_alias("where"), "where");
        assert_eq!(classifier.resolve_alias("no_such_token"), "no_such_token");
    }

    #[test]
    fn test_alias_and_canonical_agree_on_relevance() {
        let classifier = sqlite();
        for alias in ["left_join", "right_join", "full_join", "inner_join"] {
            assert_eq!(
                classifier.is_relevant(StatementGroup::Select, alias),
                classifier.is_relevant(StatementGroup::Select, "join"),
            );
        }
    }

    #[test]
    fn test_relevance_within_ordered_group() {
        let classifier = sqlite();
        assert!(classifier.is_relevant(StatementGroup::Select, "where"));
        assert!(classifier.is_relevant(StatementGroup::Select, "order_by"));
        // values belongs to the insert family, not select
        assert!(!classifier.is_relevant(StatementGroup::Select, "values"));
        assert!(classifier.is_relevant(StatementGroup::Insert, "values"));
        assert!(!classifier.is_relevant(StatementGroup::Select, "no_such_token"));
    }

    #[test]
    fn test_group_without_ordering_falls_back_to_relevant() {
        let classifier = sqlite();
        assert!(classifier.is_relevant(StatementGroup::Commit, "select"));
        assert!(classifier.is_relevant(StatementGroup::Begin, "commit"));
        assert!(!classifier.is_relevant(StatementGroup::Commit, "no_such_token"));
    }

    #[test]
    fn test_aggregate_membership() {
        let classifier = sqlite();
        for token in ["select", "where", "group_by", "having", "order_by", "set"] {
            assert!(classifier.is_aggregate(token), "{token} should aggregate");
        }
        for token in ["from", "join", "limit", "values", "no_such_token"] {
            assert!(!classifier.is_aggregate(token), "{token} should not aggregate");
        }
    }

    #[test]
    fn test_select_ordering_monotonic() {
        let classifier = sqlite();
        let select = classifier
            .ordering_index(StatementGroup::Select, "select")
            .unwrap();
        let from = classifier
            .ordering_index(StatementGroup::Select, "from")
            .unwrap();
        let where_ = classifier
            .ordering_index(StatementGroup::Select, "where")
            .unwrap();
        assert!(select < from);
        assert!(from < where_);
    }

    #[test]
    fn test_ordering_index_resolves_aliases() {
        let classifier = sqlite();
        assert_eq!(
            classifier.ordering_index(StatementGroup::Select, "left_join"),
            classifier.ordering_index(StatementGroup::Select, "join"),
        );
        assert_eq!(
            classifier.ordering_index(StatementGroup::Select, "no_such_token"),
            None
        );
        // group with no ordering entry
        assert_eq!(classifier.ordering_index(StatementGroup::Commit, "select"), None);
    }

    #[test]
    fn test_join_operator() {
        let classifier = sqlite();
        assert_eq!(classifier.join_operator("and"), Some("AND"));
        assert_eq!(classifier.join_operator("or"), Some("OR"));
        assert_eq!(classifier.join_operator("select"), None);
    }

    #[test]
    fn test_is_known_memoizes() {
        let classifier = sqlite();
        let cache = KnownTokenCache::new();

        assert!(classifier.is_known_in(&cache, StatementGroup::Select, "where"));
        assert!(classifier.is_known_in(&cache, StatementGroup::Select, "where"));
        assert!(!classifier.is_known_in(&cache, StatementGroup::Select, "no_such_token"));

        let (hits, misses) = cache.stats();
        assert_eq!(hits, 1);
        assert_eq!(misses, 2);
    }
}
