use crate::sanitize::sanitize;
use crate::site::page_name;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct GlossaryEntry {
    #[serde(default)]
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
}

impl GlossaryEntry {
    pub fn definition_text(&self) -> &str {
        match self.definition.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "Definition not available",
        }
    }
}

/// An article record as served by `GET /api/articles`.
///
/// Everything except `id` may be missing or `null` in the API response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct Article {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub blog_content: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub glossary: Option<Vec<GlossaryEntry>>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pdf_url: Option<String>,
}

impl Article {
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    pub fn glossary(&self) -> &[GlossaryEntry] {
        self.glossary.as_deref().unwrap_or_default()
    }

    pub fn display_title(&self) -> String {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => sanitize(Some(t)),
            _ => "Untitled".to_string(),
        }
    }

    pub fn excerpt(&self) -> Option<String> {
        self.blog_content
            .as_deref()
            .map(|body| body.chars().take(EXCERPT_CHARS).collect())
    }

    pub fn body_html(&self) -> String {
        match self.blog_content.as_deref() {
            Some(body) if !body.is_empty() => body.replace('\n', "<br>"),
            _ => "No content available.".to_string(),
        }
    }

    pub fn published_date(&self) -> Option<NaiveDate> {
        self.published_at.as_deref().and_then(parse_date)
    }

    /// e.g. `March 7, 2025`
    pub fn published_on(&self) -> String {
        match self.published_date() {
            Some(date) => date.format("%B %-d, %Y").to_string(),
            None => "Date unavailable".to_string(),
        }
    }

    pub fn pdf_file_name(&self) -> Option<&str> {
        self.pdf_url
            .as_deref()
            .and_then(|u| u.rsplit('/').next())
            .filter(|name| !name.is_empty())
    }

    pub fn summary(&self) -> ArticleSummary {
        ArticleSummary {
            id: self.id.clone(),
            title: self.display_title(),
            published_on: self.published_on(),
            excerpt: self.excerpt(),
            tags: self.tags().to_vec(),
            path: format!("articles/{}", page_name(&self.id)),
        }
    }

    pub fn detail(&self) -> ArticleDetail {
        ArticleDetail {
            id: self.id.clone(),
            title: self.display_title(),
            published_on: self.published_on(),
            body_html: self.body_html(),
            tags: self.tags().to_vec(),
            glossary: self
                .glossary()
                .iter()
                .map(|entry| GlossaryView {
                    term: entry.term.clone(),
                    definition: entry.definition_text().to_string(),
                })
                .collect(),
            citation: self
                .citation
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "No citation available.".to_string()),
            url: self.url.clone(),
            pdf_file: self.pdf_file_name().map(str::to_string),
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Listing card for index, tag and glossary pages.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub published_on: String,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub path: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct GlossaryView {
    pub term: String,
    pub definition: String,
}

#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct ArticleDetail {
    pub id: String,
    pub title: String,
    pub published_on: String,
    pub body_html: String,
    pub tags: Vec<String>,
    pub glossary: Vec<GlossaryView>,
    pub citation: String,
    pub url: Option<String>,
    pub pdf_file: Option<String>,
}
