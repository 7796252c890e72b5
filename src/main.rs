use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tutormatch::search::{run_search, Outcome, Phase, SearchClient, SearchCriteria, SearchFlow};
use tutormatch::search::NO_TEACHER_MESSAGE;
use tutormatch::SearchConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tutormatch=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let criteria_path = args
        .next()
        .context("usage: tutormatch <criteria.json> [config.json]")?;

    let mut config = match args.next() {
        Some(path) => SearchConfig::load_from_file(Path::new(&path))
            .map_err(|e| anyhow!("Failed to load config {}: {}", path, e))?,
        None => SearchConfig::default(),
    };
    if let Ok(base_url) = std::env::var("TUTORMATCH_BASE_URL") {
        config.base_url = base_url;
    }

    let content = fs::read_to_string(&criteria_path)
        .with_context(|| format!("Failed to read criteria file {}", criteria_path))?;
    let criteria: SearchCriteria =
        serde_json::from_str(&content).context("Failed to parse search criteria")?;

    info!(base_url = %config.base_url, "Searching for available teachers");

    let client = SearchClient::with_config(config)?;
    let flow = run_search(SearchFlow::with_criteria(criteria), &client).await;

    match flow.phase() {
        Phase::Blocked => {
            for (field, error) in flow.validation().iter() {
                eprintln!("{}: {}", field, error);
            }
            bail!("Search criteria are incomplete");
        }
        Phase::ResultsShown(Outcome::Empty) => {
            println!("{}", NO_TEACHER_MESSAGE);
        }
        Phase::ResultsShown(Outcome::Teachers(teachers)) => {
            println!("Available Teachers");
            for teacher in teachers {
                println!(
                    "  {} <{}>",
                    teacher.name.as_deref().unwrap_or("(unnamed)"),
                    teacher.email.as_deref().unwrap_or("no email"),
                );
            }
        }
        Phase::Failed(err) => {
            if err.is_retryable() {
                bail!("Search failed: {}. Try again in a moment.", err);
            }
            bail!("Search failed: {}", err);
        }
        phase => bail!("Search ended in an unexpected state: {:?}", phase),
    }

    Ok(())
}
