use std::error::Error;

use llm_service::{LlmModelConfig, OpenAiService};
use pr_reviewer::event::ChangeEvent;
use pr_reviewer::filter::ExcludeRules;
use pr_reviewer::platform::{GitHubClient, GithubConfig};
use pr_reviewer::{BotConfig, run_review};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load environment variables from .env file for local runs; the Actions
    // environment provides the real variables, so a missing file is fine.
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cfg = BotConfig::from_env()?;

    let event = match ChangeEvent::from_file(&cfg.event_path)? {
        Some(event) => event,
        None => {
            info!("unsupported event action, nothing to review");
            return Ok(());
        }
    };

    let rules = ExcludeRules::from_raw(&cfg.exclude_patterns)?;
    let api = GitHubClient::from_config(GithubConfig {
        base_api: cfg.github_api_url,
        token: cfg.github_token,
    })?;
    let model = OpenAiService::new(LlmModelConfig::from_env()?)?;

    run_review(&api, &model, &event, &rules).await?;

    Ok(())
}
