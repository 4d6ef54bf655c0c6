//! First-match element lookup over parsed documents.
//!
//! Extractors assume stable page layouts, so a missing element is an error
//! rather than an empty result: [`find_tag`] logs the miss and returns
//! [`ParserError::TagNotFound`].

use itertools::Itertools;
use regex::Regex;
use scraper::ElementRef;
use std::fmt;
use tracing::error;

use crate::error::ParserError;

/// One attribute constraint of a lookup.
#[derive(Debug, Clone)]
pub enum Attr<'a> {
    /// Attribute equals the value.
    Exact(&'a str, &'a str),
    /// Every whitespace-separated class in the value is present.
    Classes(&'a str),
    /// Attribute value matches the pattern.
    Matches(&'a str, &'a Regex),
    /// Attribute is present with any value.
    Has(&'a str),
}

impl Attr<'_> {
    fn accepts(&self, element: &ElementRef<'_>) -> bool {
        let value = element.value();
        match self {
            Attr::Exact(key, expected) => value.attr(key) == Some(*expected),
            Attr::Classes(wanted) => wanted
                .split_whitespace()
                .all(|class| value.classes().any(|c| c == class)),
            Attr::Matches(key, pattern) => value.attr(key).is_some_and(|v| pattern.is_match(v)),
            Attr::Has(key) => value.attr(key).is_some(),
        }
    }
}

impl fmt::Display for Attr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Exact(key, value) => write!(f, "{key}={value:?}"),
            Attr::Classes(value) => write!(f, "class={value:?}"),
            Attr::Matches(key, pattern) => write!(f, "{key}~/{}/", pattern.as_str()),
            Attr::Has(key) => write!(f, "{key}"),
        }
    }
}

fn matches(element: &ElementRef<'_>, tag: &str, attrs: &[Attr<'_>]) -> bool {
    element.value().name().eq_ignore_ascii_case(tag) && attrs.iter().all(|a| a.accepts(element))
}

/// All elements below `root` (excluding `root` itself) matching `tag` and
/// every constraint, in document order.
pub fn find_all<'a, 'b>(
    root: ElementRef<'a>,
    tag: &'b str,
    attrs: &'b [Attr<'b>],
) -> impl Iterator<Item = ElementRef<'a>> + 'b
where
    'a: 'b,
{
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| matches(el, tag, attrs))
}

/// First element below `root` matching `tag` and every constraint.
pub fn find_first<'a>(root: ElementRef<'a>, tag: &str, attrs: &[Attr<'_>]) -> Option<ElementRef<'a>> {
    root.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| matches(el, tag, attrs))
}

/// Like [`find_first`], but a miss is logged and reported as an error.
pub fn find_tag<'a>(
    root: ElementRef<'a>,
    tag: &str,
    attrs: &[Attr<'_>],
) -> Result<ElementRef<'a>, ParserError> {
    find_first(root, tag, attrs).ok_or_else(|| {
        let attrs = if attrs.is_empty() {
            "no attributes".to_string()
        } else {
            attrs.iter().join(", ")
        };
        error!(tag, %attrs, "Tag not found");
        ParserError::TagNotFound {
            tag: tag.to_string(),
            attrs,
        }
    })
}

/// First following sibling element named `tag` that satisfies `attrs`.
pub fn next_sibling_tag<'a>(
    element: ElementRef<'a>,
    tag: &str,
    attrs: &[Attr<'_>],
) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| matches(el, tag, attrs))
}

/// Value of `href` on an element located with [`Attr::Has`]`("href")`.
pub fn href<'a>(element: ElementRef<'a>) -> &'a str {
    element.value().attr("href").unwrap_or_default()
}

/// Concatenated text of every descendant text node.
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}
