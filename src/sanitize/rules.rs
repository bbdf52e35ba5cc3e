//! The sanitization rule set
//!
//!     A fixed catalog, built once and shared read-only:
//!
//!     - tag renames: the [`TAG_ALIASES`] table (`b` → `strong`, `i` → `em`, `u` → `span`)
//!     - tag removals: scripts, styles, metadata and any namespaced office tag (`o:p`, `w:sdt`)
//!     - attribute removals: inline `style`, vendor class tokens, event handlers, script URLs
//!     - pruning: attribute-less empty spans and blank paragraphs (applied by the walker)

use crate::error::RuleError;
use crate::mapping::{tag_alias, EventHandlerPolicy, TAG_ALIASES};
use once_cell::sync::Lazy;
use regex::Regex;

/// Class tokens emitted by word processors and browsers' rich-text clipboards.
pub const DEFAULT_VENDOR_CLASS_PATTERN: &str = "(?i)^(mso|wordsection|apple-)";

/// Elements dropped together with everything inside them.
const REMOVED_TAGS: &[&str] = &[
    "script", "style", "meta", "link", "title", "base", "xml", "noscript", "template", "iframe",
    "object",
];

static STANDARD: Lazy<SanitizationRules> = Lazy::new(SanitizationRules::new);

/// What the sanitizer does with an element, keyed by tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    /// Drop the element and its subtree.
    Remove,
    /// Replace the element with one of a different name, keeping attributes and children.
    Rename(&'static str),
    Keep,
}

#[derive(Debug, Clone)]
pub struct SanitizationRules {
    vendor_class: Regex,
    pub event_handlers: EventHandlerPolicy,
    pub strip_script_urls: bool,
}

impl SanitizationRules {
    /// The default rule set.
    pub fn new() -> Self {
        SanitizationRules {
            vendor_class: Regex::new(DEFAULT_VENDOR_CLASS_PATTERN)
                .expect("default vendor class pattern is valid"),
            event_handlers: EventHandlerPolicy::default(),
            strip_script_urls: true,
        }
    }

    /// Shared instance of the default rule set.
    pub fn standard() -> &'static SanitizationRules {
        &STANDARD
    }

    /// Replace the vendor class pattern. Matching is up to the pattern; use `(?i)` for
    /// case-insensitivity.
    pub fn with_vendor_pattern(mut self, pattern: &str) -> Result<Self, RuleError> {
        self.vendor_class =
            Regex::new(pattern).map_err(|source| RuleError::InvalidVendorPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(self)
    }

    pub fn with_event_handlers(mut self, policy: EventHandlerPolicy) -> Self {
        self.event_handlers = policy;
        self
    }

    pub fn with_script_urls_stripped(mut self, strip: bool) -> Self {
        self.strip_script_urls = strip;
        self
    }

    pub fn vendor_pattern(&self) -> &str {
        self.vendor_class.as_str()
    }

    pub fn tag_action(&self, tag: &str) -> TagAction {
        let tag = tag.to_ascii_lowercase();
        if tag.contains(':') || REMOVED_TAGS.contains(&tag.as_str()) {
            return TagAction::Remove;
        }
        match tag_alias(&tag) {
            Some(alias) => TagAction::Rename(alias),
            None => TagAction::Keep,
        }
    }

    pub fn is_vendor_class(&self, token: &str) -> bool {
        self.vendor_class.is_match(token)
    }

    /// Drop vendor tokens from a class attribute value.
    ///
    /// Returns `None` when nothing is left, meaning the attribute should go.
    pub fn filter_classes(&self, value: &str) -> Option<String> {
        let kept: Vec<&str> = value
            .split_whitespace()
            .filter(|token| !self.is_vendor_class(token))
            .collect();
        if kept.is_empty() {
            None
        } else {
            Some(kept.join(" "))
        }
    }

    /// Renamed tags, for documentation and tests.
    pub fn renames(&self) -> &'static [(&'static str, &'static str)] {
        TAG_ALIASES
    }
}

impl Default for SanitizationRules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("script", TagAction::Remove)]
    #[case("STYLE", TagAction::Remove)]
    #[case("meta", TagAction::Remove)]
    #[case("o:p", TagAction::Remove)]
    #[case("w:sdtpr", TagAction::Remove)]
    #[case("st1:place", TagAction::Remove)]
    #[case("b", TagAction::Rename("strong"))]
    #[case("i", TagAction::Rename("em"))]
    #[case("u", TagAction::Rename("span"))]
    #[case("p", TagAction::Keep)]
    #[case("strong", TagAction::Keep)]
    fn test_tag_actions(#[case] tag: &str, #[case] expected: TagAction) {
        assert_eq!(SanitizationRules::standard().tag_action(tag), expected);
    }

    #[test]
    fn test_filter_classes() {
        let rules = SanitizationRules::standard();
        assert_eq!(
            rules.filter_classes("MsoNormal lead msoListParagraph"),
            Some("lead".to_string())
        );
        assert_eq!(rules.filter_classes("MsoNormal"), None);
        assert_eq!(rules.filter_classes("   "), None);
        assert_eq!(
            rules.filter_classes("Apple-converted-space note"),
            Some("note".to_string())
        );
    }

    #[test]
    fn test_custom_vendor_pattern() {
        let rules = SanitizationRules::new()
            .with_vendor_pattern("^gdocs-")
            .unwrap();
        assert!(rules.is_vendor_class("gdocs-heading"));
        assert!(!rules.is_vendor_class("MsoNormal"));
    }

    #[test]
    fn test_invalid_vendor_pattern() {
        let err = SanitizationRules::new()
            .with_vendor_pattern("(unclosed")
            .unwrap_err();
        assert!(err.to_string().contains("(unclosed"));
    }
}
