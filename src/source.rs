use crate::article::Article;
use crate::error::{SiteError, SiteResult};
use std::path::PathBuf;
use std::time::Duration;

/// Query parameters understood by `GET /api/articles`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArticleQuery {
    pub id: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ArticleQuery {
    pub fn all() -> Self {
        Self::default()
    }

    /// One page of `limit` articles, pages counted from 1.
    pub fn page(page: u32, limit: u32) -> Self {
        ArticleQuery {
            id: None,
            limit: Some(limit),
            offset: Some(page.max(1).saturating_sub(1).saturating_mul(limit)),
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![];
        if let Some(id) = &self.id {
            params.push(("id", id.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

pub trait ArticleSource {
    fn fetch(&self, query: &ArticleQuery) -> SiteResult<Vec<Article>>;
}

#[derive(Debug)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> SiteResult<HttpSource> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(HttpSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/articles", self.base_url)
    }
}

impl ArticleSource for HttpSource {
    fn fetch(&self, query: &ArticleQuery) -> SiteResult<Vec<Article>> {
        let url = self.endpoint();
        tracing::info!("Fetching {} {:?}", url, query);
        let response = self.client.get(&url).query(&query.params()).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SiteError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let articles: Vec<Article> = response.json()?;
        tracing::info!("Fetched {} articles", articles.len());
        Ok(articles)
    }
}

/// A JSON snapshot of the `/api/articles` response saved on disk.
///
/// The query is applied locally so a snapshot behaves like the live endpoint.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: PathBuf) -> FileSource {
        FileSource { path }
    }
}

impl ArticleSource for FileSource {
    fn fetch(&self, query: &ArticleQuery) -> SiteResult<Vec<Article>> {
        tracing::info!("Reading {}", self.path.display());
        let json = std::fs::read_to_string(&self.path)?;
        let articles = parse_articles(&json)?;
        Ok(apply_query(articles, query))
    }
}

pub fn parse_articles(json: &str) -> SiteResult<Vec<Article>> {
    Ok(serde_json::from_str(json)?)
}

fn apply_query(articles: Vec<Article>, query: &ArticleQuery) -> Vec<Article> {
    let offset = query.offset.unwrap_or(0) as usize;
    let limit = query.limit.map_or(usize::MAX, |l| l as usize);
    articles
        .into_iter()
        .filter(|a| query.id.as_ref().map_or(true, |id| &a.id == id))
        .skip(offset)
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SNAPSHOT: &str = r#"[
        {"id": "1", "title": "One"},
        {"id": "2", "title": "Two", "tags": ["fusion"]},
        {"id": "3", "title": "Three", "tags": null}
    ]"#;

    #[test]
    fn test_page_offsets() {
        assert_eq!(ArticleQuery::page(1, 10).offset, Some(0));
        assert_eq!(ArticleQuery::page(3, 10).offset, Some(20));
        assert_eq!(ArticleQuery::page(0, 10).offset, Some(0));
    }

    #[test]
    fn test_params() {
        let query = ArticleQuery {
            id: Some("abc".into()),
            ..ArticleQuery::page(2, 5)
        };
        assert_eq!(
            query.params(),
            vec![
                ("id", "abc".to_string()),
                ("limit", "5".to_string()),
                ("offset", "5".to_string())
            ]
        );
        assert!(ArticleQuery::all().params().is_empty());
    }

    #[test]
    fn test_file_source_applies_query() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();
        let source = FileSource::new(file.path().to_path_buf());

        assert_eq!(source.fetch(&ArticleQuery::all()).unwrap().len(), 3);

        let page: Vec<String> = source
            .fetch(&ArticleQuery::page(2, 2))
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(page, vec!["3"]);

        let by_id = ArticleQuery {
            id: Some("2".into()),
            ..Default::default()
        };
        assert_eq!(source.fetch(&by_id).unwrap()[0].tags(), ["fusion"]);
    }

    #[test]
    fn test_invalid_snapshot() {
        assert!(matches!(
            parse_articles("{\"id\": 1}"),
            Err(SiteError::Json(_))
        ));
        let missing = FileSource::new(PathBuf::from("/nonexistent/articles.json"));
        assert!(matches!(
            missing.fetch(&ArticleQuery::all()),
            Err(SiteError::Io(_))
        ));
    }

    #[test]
    fn test_endpoint_trims_slash() {
        let source = HttpSource::new("https://api.example.org/").unwrap();
        assert_eq!(source.endpoint(), "https://api.example.org/api/articles");
    }
}
