use clap::Parser;
use commons_ssg::config::{Cli, Command};
use commons_ssg::matcher;
use commons_ssg::site::Site;
use commons_ssg::source::{ArticleQuery, ArticleSource, FileSource, HttpSource};
use commons_ssg::{Article, SiteError, SiteResult};
use std::borrow::Cow;
use tracing_subscriber::EnvFilter;

fn print_listing(heading: &str, found: &[&Article], empty: &str) {
    println!("{}", heading);
    if found.is_empty() {
        println!("{}", empty);
        return;
    }
    for article in found {
        println!(
            "{}\t{}\t{}",
            article.id,
            article.display_title(),
            article.published_on()
        );
    }
}

/// Route tags arrive percent-encoded and are decoded once for both the
/// lookup and the heading.
fn tag_lookup<'a>(articles: &'a [Article], segment: &str) -> (String, Vec<&'a Article>) {
    let tag = matcher::decode_route_segment(segment);
    let found = matcher::filter_by_tag(articles, &tag);
    (format!("Articles tagged with \"{}\"", tag), found)
}

fn term_lookup<'a>(
    articles: &'a [Article],
    term: &str,
    ignore_case: bool,
) -> (String, Vec<&'a Article>) {
    // search-box terms are typed, not taken from a route
    let (term, found) = if ignore_case {
        let found = matcher::filter_by_glossary_term_ignore_case(articles, term);
        (Cow::Borrowed(term), found)
    } else {
        let term = matcher::decode_route_segment(term);
        let found = matcher::filter_by_glossary_term(articles, &term);
        (term, found)
    };
    (format!("Articles with glossary term \"{}\"", term), found)
}

fn run(cli: Cli) -> SiteResult<()> {
    let source: Box<dyn ArticleSource> = match &cli.input {
        Some(path) => Box::new(FileSource::new(path.clone())),
        None => Box::new(HttpSource::new(&cli.api_url)?),
    };

    match cli.command {
        Command::Build { dest } => {
            let articles = source.fetch(&ArticleQuery::all())?;
            let site = Site::new(dest);
            site.build(&articles)?;
            tracing::info!("Built index for {} articles", articles.len());
        }
        Command::Search { query, limit, page } => {
            let request = match page {
                Some(page) => ArticleQuery::page(page, limit),
                None => ArticleQuery::all(),
            };
            let articles = source.fetch(&request)?;
            let found = matcher::filter_by_title_substring(&articles, &query);
            print_listing(
                &format!("Articles matching \"{}\"", query),
                &found,
                "No articles found.",
            );
        }
        Command::Tag { tag } => {
            let articles = source.fetch(&ArticleQuery::all())?;
            let (heading, found) = tag_lookup(&articles, &tag);
            print_listing(&heading, &found, "No articles found for this tag.");
        }
        Command::Term { term, ignore_case } => {
            let articles = source.fetch(&ArticleQuery::all())?;
            let (heading, found) = term_lookup(&articles, &term, ignore_case);
            print_listing(&heading, &found, "No articles found for this term.");
        }
        Command::Show { id } => {
            let articles = source.fetch(&ArticleQuery::all())?;
            let article =
                matcher::find_by_id(&articles, &id).ok_or_else(|| SiteError::NotFound(id))?;
            println!("{}", serde_json::to_string_pretty(&article.detail())?);
        }
    }

    Ok(())
}

fn main() -> SiteResult<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run(Cli::parse())
}
