use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "https://veritystack.onrender.com";

#[derive(Debug, Parser)]
#[command(name = "commons-ssg", version, about = "Article index generator and lookup tool")]
pub struct Cli {
    /// Base URL of the articles API
    #[arg(long, env = "API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Read articles from a JSON snapshot instead of the API
    #[arg(long, global = true)]
    pub input: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write index.json plus per-article, per-tag and per-term files
    Build { dest: PathBuf },
    /// Search article titles, ignoring case and punctuation
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long)]
        page: Option<u32>,
    },
    /// List articles for a tag as it appears in a page route
    Tag { tag: String },
    /// List articles carrying a glossary term
    Term {
        term: String,
        #[arg(long)]
        ignore_case: bool,
    },
    /// Print one article as JSON
    Show { id: String },
}
