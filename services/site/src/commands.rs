use crate::infra::resolve_location;
use clap::{Args, ValueEnum};
use math_reviews::config::AppConfig;
use math_reviews::error::AppError;
use math_reviews::reviews::page::card_ids;
use math_reviews::reviews::summary::{summary_rows, write_csv, SummaryRow};
use math_reviews::reviews::{
    build_listing, DisclosureStates, HttpReviewSource, ListingHtml, PageOptions, ReviewDocument,
    ReviewLoader,
};
use math_reviews::telemetry;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Args, Debug, Default)]
pub(crate) struct RenderArgs {
    /// Review data file path or http(s) URL (overrides REVIEWS_DATA)
    #[arg(long)]
    pub(crate) data: Option<String>,
    /// Write the page to this file instead of stdout
    #[arg(long)]
    pub(crate) out: Option<PathBuf>,
    /// Render every card with its details open
    #[arg(long)]
    pub(crate) expand_all: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SummaryArgs {
    /// Review data file path or http(s) URL (overrides REVIEWS_DATA)
    #[arg(long)]
    pub(crate) data: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub(crate) format: SummaryFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum SummaryFormat {
    #[default]
    Text,
    Csv,
}

pub(crate) async fn run_render(args: RenderArgs) -> Result<(), AppError> {
    let RenderArgs {
        data,
        out,
        expand_all,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let document = load_document(data.as_deref(), &config).await?;
    let options = PageOptions::new(config.site.title.clone());
    let html = render_page(&document, expand_all, &options);

    match out {
        Some(path) => {
            std::fs::write(&path, html)?;
            info!(path = %path.display(), "wrote reviews page");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}

pub(crate) async fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let document = load_document(args.data.as_deref(), &config).await?;
    let rows = summary_rows(&document);

    match args.format {
        SummaryFormat::Csv => write_csv(&rows, std::io::stdout().lock())?,
        SummaryFormat::Text => {
            if rows.is_empty() {
                println!("No reviews available yet.");
            }
            for row in &rows {
                println!("{}", text_line(row));
            }
        }
    }

    Ok(())
}

async fn load_document(
    flag: Option<&str>,
    config: &AppConfig,
) -> Result<Arc<ReviewDocument>, AppError> {
    let location = resolve_location(flag, &config.site.data);
    let loader = ReviewLoader::new(HttpReviewSource::default());
    Ok(loader.load(&location).await?)
}

fn render_page(document: &ReviewDocument, expand_all: bool, options: &PageOptions) -> String {
    let states = if expand_all {
        DisclosureStates::all_expanded(card_ids(document))
    } else {
        DisclosureStates::default()
    };
    ListingHtml(&build_listing(document, &states, options)).to_string()
}

fn text_line(row: &SummaryRow) -> String {
    format!(
        "{} [{}] overall {} {} ({}★) | informal {} | formal {} | transfer {}",
        row.title,
        row.domain,
        row.overall,
        row.band,
        row.stars,
        row.informal,
        row.formal,
        row.transferability
    )
}
