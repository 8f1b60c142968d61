use anyhow::Context;
use clap::Parser;
use feed_relay::{
    default_providers, FeedRelay, FetchConfig, Fetcher, LlmTranslator, RelayError, RelayPaths,
    TranslatorConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// feed-relay - merge the newest WordPress release, video and blog posts into one RSS feed
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding data/ and feed.xml (default: current directory)
    #[arg(long, env = "FEED_RELAY_ROOT")]
    root: Option<PathBuf>,

    /// Timeout in seconds for each feed request
    #[arg(long, default_value_t = 15)]
    timeout_seconds: u64,

    /// Abort instead of resetting a corrupt state.json or entries.json
    #[arg(long)]
    strict_state: bool,

    /// Never translate, even when an API key is configured
    #[arg(long)]
    no_translate: bool,

    /// API key for the translation endpoint; translation is off without one
    #[arg(long, env = "FEED_RELAY_TRANSLATE_API_KEY", hide_env_values = true)]
    translate_api_key: Option<String>,

    #[arg(long, env = "FEED_RELAY_TRANSLATE_API_BASE", default_value = "https://api.openai.com/v1")]
    translate_api_base: String,

    #[arg(long, env = "FEED_RELAY_TRANSLATE_MODEL", default_value = "gpt-4o-mini")]
    translate_model: String,

    /// Target language for translated entries
    #[arg(long, env = "FEED_RELAY_TRANSLATE_LANGUAGE", default_value = "German")]
    translate_language: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(updated) => {
            if updated {
                println!("update detected");
            } else {
                println!("no update detected");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            match e.downcast_ref::<RelayError>() {
                Some(RelayError::AllProvidersFailed { first, .. }) => eprintln!("{}", first),
                _ => eprintln!("{:#}", e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("cannot determine working directory")?,
    };

    let fetch_config = FetchConfig {
        timeout_seconds: args.timeout_seconds,
        ..FetchConfig::default()
    };
    let fetcher = Fetcher::new(fetch_config).context("failed to create HTTP client")?;

    let mut relay = FeedRelay::new(RelayPaths::from_root(&root), default_providers(), Box::new(fetcher))
        .with_strict_state(args.strict_state);

    match args.translate_api_key.filter(|key| !key.trim().is_empty()) {
        Some(api_key) if !args.no_translate => {
            let translator = LlmTranslator::new(TranslatorConfig {
                api_base: args.translate_api_base,
                api_key,
                model: args.translate_model,
                language: args.translate_language,
                ..TranslatorConfig::default()
            })
            .context("failed to create translation client")?;
            relay = relay.with_translator(Box::new(translator));
        }
        _ => info!("Translation disabled"),
    }

    info!("Writing feed to {}", relay.paths().feed.display());

    let report = relay.run().await?;
    if !report.failures.is_empty() {
        warn!("{} providers failed, feed rebuilt from the rest", report.failures.len());
    }
    Ok(report.updated)
}
