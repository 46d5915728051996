use crate::article::ArticleSummary;
use chrono::NaiveDate;
use std::cmp::{Ord, Ordering, PartialOrd};
use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PageNode {
    Listing(PathBuf, Vec<PageNode>),
    Article(PathBuf, Option<NaiveDate>, ArticleSummary),
}

impl PageNode {
    pub fn path(&self) -> &PathBuf {
        match self {
            PageNode::Listing(path, _) | PageNode::Article(path, _, _) => path,
        }
    }
}

impl PartialOrd for PageNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PageNode {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PageNode::Listing(path1, _), PageNode::Listing(path2, _)) => path1.cmp(path2),
            // articles come before listings
            (PageNode::Listing(..), PageNode::Article(..)) => Ordering::Greater,
            (PageNode::Article(..), PageNode::Listing(..)) => Ordering::Less,
            (PageNode::Article(path1, date1, _), PageNode::Article(path2, date2, _)) => {
                // newest first, undated last
                let by_date = match (date1, date2) {
                    (Some(d1), Some(d2)) => d2.cmp(d1),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                by_date.then_with(|| path1.cmp(path2))
            }
        }
    }
}
