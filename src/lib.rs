pub mod article;
pub mod config;
pub mod error;
pub mod matcher;
pub mod sanitize;
pub mod site;
pub mod source;
pub mod tree;

pub use article::{Article, ArticleDetail, ArticleSummary, GlossaryEntry};
pub use error::{SiteError, SiteResult};
pub use matcher::{
    filter_by_glossary_term, filter_by_glossary_term_ignore_case, filter_by_route_tag,
    filter_by_route_term, filter_by_tag, filter_by_title_substring, find_by_id, ArticleFilter,
};
pub use sanitize::sanitize;
