//! Compound CSS selectors.
//!
//! Only the subset the page markup relies on is accepted: an optional tag
//! name followed by any number of `#id`, `.class`, `[attr]`, `[attr="v"]`
//! and `[attr*="v"]` parts. The browser hands the source text straight to
//! `querySelectorAll`; the in-memory page matches the parsed parts.

use std::fmt;

use chumsky::prelude::*;

use crate::error::SelectorError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeMatch {
    Present,
    Equals(String),
    Contains(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Id(String),
    Class(String),
    Attribute { name: String, matcher: AttributeMatch },
}

/// Anything a selector can be tested against.
pub trait Matchable {
    fn tag_name(&self) -> &str;
    fn attribute(&self, name: &str) -> Option<&str>;
    fn has_class(&self, class: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    tag: Option<String>,
    parts: Vec<SimpleSelector>,
}

type Parsed<'src> = (Option<&'src str>, Vec<SimpleSelector>);

fn parser<'src>() -> impl Parser<'src, &'src str, Parsed<'src>, extra::Err<Rich<'src, char>>> {
    let ident = any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .repeated()
        .at_least(1)
        .to_slice();

    let double_quoted = none_of("\"")
        .repeated()
        .to_slice()
        .delimited_by(just('"'), just('"'));
    let single_quoted = none_of("'")
        .repeated()
        .to_slice()
        .delimited_by(just('\''), just('\''));
    let value = choice((double_quoted, single_quoted, ident.clone()));

    let operator = choice((
        just("*=").to(true),
        just('=').to(false),
    ));

    let attribute = ident
        .clone()
        .then(operator.then(value).or_not())
        .delimited_by(just('['), just(']'))
        .map(|(name, matcher): (&str, Option<(bool, &str)>)| SimpleSelector::Attribute {
            name: name.to_ascii_lowercase(),
            matcher: match matcher {
                None => AttributeMatch::Present,
                Some((true, value)) => AttributeMatch::Contains(value.to_string()),
                Some((false, value)) => AttributeMatch::Equals(value.to_string()),
            },
        });

    let part = choice((
        just('#').ignore_then(ident.clone()).map(|id: &str| SimpleSelector::Id(id.to_string())),
        just('.')
            .ignore_then(ident.clone())
            .map(|class: &str| SimpleSelector::Class(class.to_string())),
        attribute,
    ));

    ident
        .or_not()
        .then(part.repeated().collect::<Vec<_>>())
        .then_ignore(end())
}

impl Selector {
    pub fn parse(source: &str) -> Result<Self, SelectorError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(SelectorError::Empty);
        }
        let (tag, parts) = parser().parse(source).into_result().map_err(|errors| {
            let (position, found) = errors
                .first()
                .map(|error| {
                    let found = match error.found() {
                        Some(c) => format!("'{c}'"),
                        None => "end of input".to_string(),
                    };
                    (error.span().start, found)
                })
                .unwrap_or((0, "input".to_string()));
            SelectorError::Syntax {
                selector: source.to_string(),
                position,
                found,
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            tag: tag.map(str::to_ascii_lowercase),
            parts,
        })
    }

    /// The selector text, as accepted by `querySelectorAll`.
    pub fn as_css(&self) -> &str {
        &self.source
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn parts(&self) -> &[SimpleSelector] {
        &self.parts
    }

    pub fn matches(&self, element: &impl Matchable) -> bool {
        if let Some(tag) = &self.tag {
            if !element.tag_name().eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.parts.iter().all(|part| match part {
            SimpleSelector::Id(id) => element.attribute("id") == Some(id.as_str()),
            SimpleSelector::Class(class) => element.has_class(class),
            SimpleSelector::Attribute { name, matcher } => {
                match (element.attribute(name), matcher) {
                    (None, _) => false,
                    (Some(_), AttributeMatch::Present) => true,
                    (Some(actual), AttributeMatch::Equals(expected)) => actual == expected,
                    // An empty needle never matches, same as in browsers.
                    (Some(actual), AttributeMatch::Contains(needle)) => {
                        !needle.is_empty() && actual.contains(needle.as_str())
                    }
                }
            }
        })
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.source)
    }
}
