//! Tag tokens and the corpus-wide tag universe.
//!
//! Tags are stored exactly as written (minus the leading `@`) but compared
//! ASCII case-insensitively. A tag containing a colon is namespaced: the text
//! before the first colon is the namespace and the remainder its value, so
//! `severity:high` and `story:ABC:12` both split only once.

use std::collections::BTreeSet;
use std::collections::btree_set;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([\w:.-]+)").unwrap_or_else(|_| unreachable!()));

/// A single tag token as written in a feature file, without the `@`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(String);

impl Tag {
    /// Wrap a raw token. A leading `@` is not stripped.
    ///
    /// # Examples
    /// ```
    /// use cuke_sheets::Tag;
    ///
    /// let tag = Tag::new("severity:high");
    /// assert_eq!(tag.as_str(), "severity:high");
    /// ```
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The token as stored.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split a namespaced tag at its first colon.
    ///
    /// # Examples
    /// ```
    /// use cuke_sheets::Tag;
    ///
    /// assert_eq!(Tag::new("story:ABC:12").namespace(), Some(("story", "ABC:12")));
    /// assert_eq!(Tag::new("smoke").namespace(), None);
    /// ```
    #[must_use]
    pub fn namespace(&self) -> Option<(&str, &str)> {
        self.0.split_once(':')
    }

    /// Whether this tag equals `token`, ignoring ASCII case.
    #[must_use]
    pub fn is(&self, token: &str) -> bool {
        self.0.eq_ignore_ascii_case(token)
    }

    /// The value suffix when this tag lives in `namespace`.
    ///
    /// # Examples
    /// ```
    /// use cuke_sheets::Tag;
    ///
    /// assert_eq!(Tag::new("severity:low").value_in("severity"), Some("low"));
    /// assert_eq!(Tag::new("team:core").value_in("severity"), None);
    /// ```
    #[must_use]
    pub fn value_in(&self, namespace: &str) -> Option<&str> {
        let (prefix, value) = self.namespace()?;
        prefix.eq_ignore_ascii_case(namespace).then_some(value)
    }

    /// Whether this tag is namespaced under `namespace`.
    #[must_use]
    pub fn in_namespace(&self, namespace: &str) -> bool {
        self.value_in(namespace).is_some()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Tag {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Extract every `@tag` token from a line, left to right.
///
/// A token is `@` followed by letters, digits, underscores, colons, periods
/// or hyphens. Anything else ends the token.
///
/// # Examples
/// ```
/// use cuke_sheets::extract_tags;
///
/// let tags: Vec<_> = extract_tags("@smoke @severity:high,@wip").collect();
/// let tokens: Vec<_> = tags.iter().map(|t| t.as_str()).collect();
/// assert_eq!(tokens, ["smoke", "severity:high", "wip"]);
/// ```
pub fn extract_tags(line: &str) -> impl Iterator<Item = Tag> + '_ {
    TAG_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|token| Tag::new(token.as_str()))
}

/// Every distinct tag token seen across a run.
///
/// Iteration is in case-sensitive lexicographic order of the tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagUniverse(BTreeSet<Tag>);

impl TagUniverse {
    /// Create an empty universe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any observed tag equals `token`, ignoring ASCII case.
    #[must_use]
    pub fn contains_token(&self, token: &str) -> bool {
        self.0.iter().any(|tag| tag.is(token))
    }

    /// Whether any observed tag lives in `namespace`.
    #[must_use]
    pub fn contains_namespace(&self, namespace: &str) -> bool {
        self.0.iter().any(|tag| tag.in_namespace(namespace))
    }

    /// Iterate over the distinct tags in sorted order.
    pub fn iter(&self) -> btree_set::Iter<'_, Tag> {
        self.0.iter()
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no tag has been observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> Extend<&'a Tag> for TagUniverse {
    fn extend<I: IntoIterator<Item = &'a Tag>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().cloned());
    }
}

impl Extend<Tag> for TagUniverse {
    fn extend<I: IntoIterator<Item = Tag>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl FromIterator<Tag> for TagUniverse {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TagUniverse {
    type Item = &'a Tag;
    type IntoIter = btree_set::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn tokens(line: &str) -> Vec<String> {
        extract_tags(line).map(|tag| tag.as_str().to_owned()).collect()
    }

    #[rstest]
    #[case("@smoke", &["smoke"])]
    #[case("@a @b   @c", &["a", "b", "c"])]
    #[case("@my-feature @v1.2 @snake_case", &["my-feature", "v1.2", "snake_case"])]
    #[case("@story:ABC:12", &["story:ABC:12"])]
    #[case("@wip,@slow;@fast", &["wip", "slow", "fast"])]
    #[case("@", &[])]
    #[case("no tags here", &[])]
    fn extracts_tag_tokens(#[case] line: &str, #[case] expected: &[&str]) {
        assert_eq!(tokens(line), expected);
    }

    #[test]
    fn tags_after_a_comment_marker_are_still_extracted() {
        assert_eq!(tokens("@a # @b"), ["a", "b"]);
    }

    #[rstest]
    #[case("automated", "automated", true)]
    #[case("Automated", "automated", true)]
    #[case("SMOKE", "smoke", true)]
    #[case("smoke-test", "smoke", false)]
    fn compares_tokens_case_insensitively(
        #[case] token: &str,
        #[case] other: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(Tag::new(token).is(other), expected);
    }

    #[test]
    fn namespace_splits_on_first_colon_only() {
        let tag = Tag::new("platform:web:chrome");
        assert_eq!(tag.namespace(), Some(("platform", "web:chrome")));
        assert_eq!(tag.value_in("PLATFORM"), Some("web:chrome"));
        assert!(!tag.in_namespace("web"));
    }

    #[test]
    fn universe_collapses_duplicates_and_sorts() {
        let universe: TagUniverse = ["smoke", "Beta", "alpha", "smoke"]
            .into_iter()
            .map(Tag::from)
            .collect();
        let order: Vec<_> = universe.iter().map(Tag::as_str).collect();
        assert_eq!(order, ["Beta", "alpha", "smoke"]);
        assert_eq!(universe.len(), 3);
    }

    #[test]
    fn universe_membership_ignores_case() {
        let universe: TagUniverse = [Tag::new("Regression"), Tag::new("severity:high")]
            .into_iter()
            .collect();
        assert!(universe.contains_token("regression"));
        assert!(universe.contains_namespace("severity"));
        assert!(!universe.contains_namespace("team"));
        assert!(!TagUniverse::new().contains_token("regression"));
    }
}
