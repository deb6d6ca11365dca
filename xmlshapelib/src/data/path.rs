//! Path keys: how element and attribute positions are named.
//!
//! A structural path is the chain of local tag names from the document root,
//! joined with `/` (e.g. `mods/titleInfo/title`). Attribute paths extend it
//! with `@name`, and optionally with the attribute's normalized value
//! (e.g. `mods/titleInfo/@type/alternative`).
//!
//! Attribute values that reference a controlled-vocabulary term carry a
//! numeric term id. [`ValueNormalizer`] wildcards that id so that every term
//! of a vocabulary collapses into a single path key.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use roxmltree::{Attribute, Node};

use crate::error::XmlShapeError;
use crate::query::options::AttributeKeys;
use crate::Result;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// Marker put in front of attribute names in a path key.
pub const ATTRIBUTE_MARKER: char = '@';

/// Replaces the variable part of a collapsed vocabulary URI.
pub const WILDCARD: &str = "*";

/// Getty Art & Architecture Thesaurus term pages.
pub const GETTY_AAT_PREFIX: &str = "http://vocab.getty.edu/page/aat/";

static GETTY_AAT_TERM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http://vocab\.getty\.edu/page/aat/\d+").unwrap());

/// Strip a namespace from a tag written in `{uri}local` or `prefix:local`
/// form, keeping only the local name.
pub fn local_name(tag: &str) -> &str {
    if let Some(idx) = tag.rfind('}') {
        return &tag[idx + 1..];
    }
    match tag.rsplit_once(':') {
        Some((_, local)) => local,
        None => tag,
    }
}

/// Append a segment to a path. The root segment has no leading separator.
pub fn join_path(ancestor: &str, segment: &str) -> String {
    if ancestor.is_empty() {
        segment.to_string()
    } else {
        format!("{}{}{}", ancestor, PATH_SEPARATOR, segment)
    }
}

/// Local tag name of an element node.
pub fn element_name<'a, 'input>(node: &Node<'a, 'input>) -> &'input str {
    local_name(node.tag_name().name())
}

/// Name of an attribute as it appears in a path key.
///
/// Attributes in a namespace are written in `{uri}name` form so that
/// `xlink:href` and a bare `href` remain distinct.
pub fn attribute_name(attr: &Attribute<'_, '_>) -> String {
    match attr.namespace() {
        Some(ns) => format!("{{{}}}{}", ns, attr.name()),
        None => attr.name().to_string(),
    }
}

/// Trimmed text directly inside an element, if any.
///
/// Only the text before the first child element counts. Comments and
/// processing instructions in that stretch are dropped and the text around
/// them is joined.
pub fn element_text(node: &Node<'_, '_>) -> Option<String> {
    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            break;
        }
        if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == text.len() {
        Some(text)
    } else {
        Some(trimmed.to_string())
    }
}

/// Build the path key for an attribute of the element at `element_path`.
pub fn attribute_key(
    element_path: &str,
    name: &str,
    normalized_value: &str,
    keys: AttributeKeys,
) -> String {
    match keys {
        AttributeKeys::Valued => format!(
            "{}{}{}{}{}{}",
            element_path, PATH_SEPARATOR, ATTRIBUTE_MARKER, name, PATH_SEPARATOR, normalized_value
        ),
        AttributeKeys::Named => format!(
            "{}{}{}{}",
            element_path, PATH_SEPARATOR, ATTRIBUTE_MARKER, name
        ),
    }
}

/// A single substitution applied to attribute values.
#[derive(Debug, Clone)]
struct CollapseRule {
    pattern: Regex,
    replacement: String,
}

/// Rewrites attribute values before they are folded into a path key.
///
/// Rules are applied in order; each replaces every match in the value.
#[derive(Debug, Clone)]
pub struct ValueNormalizer {
    rules: Vec<CollapseRule>,
}

impl Default for ValueNormalizer {
    /// Collapses Getty AAT term URIs.
    fn default() -> Self {
        Self {
            rules: vec![CollapseRule {
                pattern: GETTY_AAT_TERM.clone(),
                replacement: format!("{}{}", GETTY_AAT_PREFIX, WILDCARD),
            }],
        }
    }
}

impl ValueNormalizer {
    /// A normalizer that leaves every value untouched.
    pub fn none() -> Self {
        Self { rules: Vec::new() }
    }

    /// Collapse `prefix` followed by a numeric id into `prefix*`.
    pub fn with_prefix(self, prefix: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(XmlShapeError::InvalidPattern {
                pattern: prefix.to_string(),
                message: "prefix must not be empty".to_string(),
            });
        }
        let pattern = format!(r"{}\d+", regex::escape(prefix));
        self.with_pattern(&pattern, &format!("{}{}", prefix, WILDCARD))
    }

    /// Replace every match of a regular expression with a literal string.
    pub fn with_pattern(mut self, pattern: &str, replacement: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| XmlShapeError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.rules.push(CollapseRule {
            pattern: regex,
            replacement: replacement.to_string(),
        });
        Ok(self)
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is configured.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply all rules to a value.
    pub fn normalize<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let mut out = Cow::Borrowed(value);
        for rule in &self.rules {
            let replaced = match rule.pattern.replace_all(&out, NoExpand(&rule.replacement)) {
                Cow::Owned(replaced) => Some(replaced),
                Cow::Borrowed(_) => None,
            };
            if let Some(replaced) = replaced {
                out = Cow::Owned(replaced);
            }
        }
        out
    }
}
