//! Article lookups shared by the tag, glossary and search listings.
//!
//! Every filter keeps the input order and never fails: a missing field simply
//! does not match.

use crate::article::Article;
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_\s]").unwrap();
}

/// A named matching policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleFilter {
    /// Exact tag equality
    Tag(String),
    /// Exact, case-sensitive glossary term (route lookup)
    GlossaryTerm(String),
    /// Case-insensitive glossary term (search box lookup)
    GlossaryTermIgnoreCase(String),
    /// Punctuation and case insensitive title containment
    TitleContains(String),
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            ArticleFilter::Tag(tag) => article.tags().iter().any(|t| t == tag),
            ArticleFilter::GlossaryTerm(term) => {
                article.glossary().iter().any(|entry| &entry.term == term)
            }
            ArticleFilter::GlossaryTermIgnoreCase(term) => {
                let term = term.to_lowercase();
                article
                    .glossary()
                    .iter()
                    .any(|entry| entry.term.to_lowercase() == term)
            }
            ArticleFilter::TitleContains(query) => {
                let query = normalize_title(query);
                title_contains(article, &query)
            }
        }
    }

    pub fn apply<'a>(&self, articles: &'a [Article]) -> Vec<&'a Article> {
        match self {
            // normalize the query once for the whole collection
            ArticleFilter::TitleContains(query) => {
                let query = normalize_title(query);
                articles
                    .iter()
                    .filter(|a| title_contains(a, &query))
                    .collect()
            }
            _ => articles.iter().filter(|a| self.matches(a)).collect(),
        }
    }
}

fn title_contains(article: &Article, normalized_query: &str) -> bool {
    match article.title.as_deref() {
        Some(title) => normalize_title(title).contains(normalized_query),
        None => false,
    }
}

/// Lower-cases and drops everything that is neither an ASCII word character
/// nor whitespace.
pub fn normalize_title(text: &str) -> String {
    NON_WORD.replace_all(&text.to_lowercase(), "").into_owned()
}

/// Percent-decodes a tag or term taken from a page route. Malformed escapes
/// leave the segment as it was.
pub fn decode_route_segment(segment: &str) -> Cow<'_, str> {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("Route segment {:?} is not valid UTF-8 once decoded: {}", segment, e);
            Cow::Borrowed(segment)
        }
    }
}

pub fn filter_by_tag<'a>(articles: &'a [Article], tag: &str) -> Vec<&'a Article> {
    ArticleFilter::Tag(tag.to_string()).apply(articles)
}

pub fn filter_by_route_tag<'a>(articles: &'a [Article], segment: &str) -> Vec<&'a Article> {
    filter_by_tag(articles, &decode_route_segment(segment))
}

pub fn filter_by_glossary_term<'a>(articles: &'a [Article], term: &str) -> Vec<&'a Article> {
    ArticleFilter::GlossaryTerm(term.to_string()).apply(articles)
}

pub fn filter_by_route_term<'a>(articles: &'a [Article], segment: &str) -> Vec<&'a Article> {
    filter_by_glossary_term(articles, &decode_route_segment(segment))
}

pub fn filter_by_glossary_term_ignore_case<'a>(
    articles: &'a [Article],
    term: &str,
) -> Vec<&'a Article> {
    ArticleFilter::GlossaryTermIgnoreCase(term.to_string()).apply(articles)
}

pub fn filter_by_title_substring<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    ArticleFilter::TitleContains(query.to_string()).apply(articles)
}

pub fn find_by_id<'a>(articles: &'a [Article], id: &str) -> Option<&'a Article> {
    articles.iter().find(|a| a.id == id)
}
