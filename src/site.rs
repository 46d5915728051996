use crate::article::Article;
use crate::error::SiteResult;
use crate::matcher::ArticleFilter;
use crate::tree::PageNode;
use serde::Serialize;
use serde_json::json;
use sha1::{Digest, Sha1};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

// below the common 255-byte file name limit, with room for ".json"
const MAX_NAME_BYTES: usize = 200;

/// Writes the JSON data files the front end reads instead of calling the API
/// on every page view.
#[derive(Debug)]
pub struct Site {
    dest: PathBuf,
}

impl Site {
    pub fn new(dest: PathBuf) -> Site {
        Site { dest }
    }

    fn write_json<T: Serialize + ?Sized>(&self, relative: &Path, value: &T) -> SiteResult<()> {
        let dest_path = self.dest.join(relative);
        if let Some(parent) = dest_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        tracing::info!("Writing {}", dest_path.display());
        std::fs::write(dest_path.as_path(), serde_json::to_string(value)?)?;
        Ok(())
    }

    fn process_article(&self, article: &Article) -> SiteResult<PageNode> {
        let summary = article.summary();
        let path = PathBuf::from(&summary.path);
        self.write_json(&json_file(&path), &article.detail())?;
        Ok(PageNode::Article(path, article.published_date(), summary))
    }

    /// One listing file per distinct key under `<dir>/`, plus `<dir>.json`
    /// naming them.
    fn process_listing(
        &self,
        dir: &str,
        key: &str,
        keys: Vec<String>,
        articles: &[Article],
        filter: impl Fn(String) -> ArticleFilter,
    ) -> SiteResult<PageNode> {
        let mut res = vec![];
        let mut entries = vec![];

        for value in keys {
            let path = PathBuf::from(dir).join(page_name(&value));
            let found: Vec<_> = filter(value.clone())
                .apply(articles)
                .into_iter()
                .map(Article::summary)
                .collect();
            tracing::debug!("{} {:?}: {} articles", key, value, found.len());

            self.write_json(
                &json_file(&path),
                &json! {
                    {
                        key: value,
                        "articles": found
                    }
                },
            )?;
            entries.push(json! {
                {
                    key: value,
                    "count": found.len(),
                    "path": path
                }
            });
            res.push(PageNode::Listing(
                path,
                found
                    .into_iter()
                    .map(|s| PageNode::Article(PathBuf::from(&s.path), None, s))
                    .collect(),
            ));
        }

        self.write_json(&json_file(Path::new(dir)), &json! { { dir: entries } })?;

        Ok(PageNode::Listing(PathBuf::from(dir), res))
    }

    pub fn build(&self, articles: &[Article]) -> SiteResult<PageNode> {
        std::fs::create_dir_all(&self.dest)?;
        let mut res = vec![];
        let mut written = HashSet::new();

        for article in articles {
            // the first record wins, like `find_by_id`
            if !written.insert(article.id.as_str()) {
                tracing::warn!("Skipping duplicate article id {:?}", article.id);
                continue;
            }
            res.push(self.process_article(article)?);
        }
        res.push(self.process_listing(
            "tags",
            "tag",
            distinct(articles.iter().flat_map(|a| a.tags().iter().cloned())),
            articles,
            ArticleFilter::Tag,
        )?);
        res.push(self.process_listing(
            "glossary",
            "term",
            distinct(
                articles
                    .iter()
                    .flat_map(|a| a.glossary().iter().map(|g| g.term.clone())),
            ),
            articles,
            ArticleFilter::GlossaryTerm,
        )?);

        res.sort();

        let mut summaries = vec![];
        let mut indexes = vec![];

        for x in res.iter() {
            match x {
                PageNode::Listing(..) => indexes.push(json_file(x.path())),
                PageNode::Article(_, _, summary) => summaries.push(summary),
            }
        }

        self.write_json(
            Path::new("index.json"),
            &json! {
                {
                    "articles": summaries,
                    "indexes": indexes
                }
            },
        )?;

        Ok(PageNode::Listing(PathBuf::new(), res))
    }
}

// ids and tags may contain dots, so no `with_extension`
fn json_file(path: &Path) -> PathBuf {
    let mut file = path.as_os_str().to_owned();
    file.push(".json");
    PathBuf::from(file)
}

/// File stem for a tag, term or article id: the percent-encoded value, or a
/// truncated prefix plus the SHA-1 of the value when that gets too long.
pub fn page_name(value: &str) -> String {
    let encoded = urlencoding::encode(value);
    if encoded.len() <= MAX_NAME_BYTES {
        return encoded.into_owned();
    }

    let digest = hex::encode(Sha1::digest(value.as_bytes()));
    let budget = MAX_NAME_BYTES - digest.len() - 1;
    let mut prefix = String::new();
    // whole characters only, so the prefix still decodes
    for c in value.chars() {
        let mut buf = [0u8; 4];
        let piece = urlencoding::encode(c.encode_utf8(&mut buf));
        if prefix.len() + piece.len() > budget {
            break;
        }
        prefix.push_str(&piece);
    }
    format!("{}-{}", prefix, digest)
}

/// Non-empty values in first-seen order.
fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distinct() {
        let values = ["b", "a", "", "b", "c", "a"].iter().map(|s| s.to_string());
        assert_eq!(distinct(values), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_page_name_short_values() {
        assert_eq!(page_name("fusion"), "fusion");
        assert_eq!(page_name("energy policy"), "energy%20policy");
        assert_eq!(page_name("index"), "index");
    }

    #[test]
    fn test_page_name_bounds_long_values() {
        let long = "é".repeat(50);
        let name = page_name(&long);
        assert!(name.len() <= MAX_NAME_BYTES);
        assert!(name.starts_with("%C3%A9"));
        let (prefix, digest) = name.rsplit_once('-').unwrap();
        assert_eq!(digest.len(), 40);
        assert!(urlencoding::decode(prefix).is_ok());
        assert_eq!(prefix.len() % 6, 0);

        let other = format!("{}x", long);
        assert_ne!(page_name(&other), name);
        assert_eq!(page_name(&long), name);
    }

    #[test]
    fn test_json_file_keeps_dots() {
        assert_eq!(
            json_file(Path::new("tags/v1.5")),
            PathBuf::from("tags/v1.5.json")
        );
    }
}
