use llm_extraction::prompt::SAMPLE_ANNOUNCEMENT;
use llm_extraction::record::print_event_summary_schema;
use llm_extraction::{config, extract_event_summary, logging, ClientConfig, CompletionClient};
use tracing::info;

const SITE_TITLE: &str = "Structured Extraction Demo";

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    logging::init();
    config::load_dotenv();

    print_event_summary_schema();

    let client = CompletionClient::new(ClientConfig::from_env(SITE_TITLE));
    let summary = extract_event_summary(&client, SAMPLE_ANNOUNCEMENT).await?;
    info!("Extracted {} talks", summary.talks.len());

    let output = serde_json::to_string_pretty(&summary)
        .map_err(|e| miette::miette!("Failed to serialize event summary: {}", e))?;
    println!("{}", output);
    Ok(())
}
