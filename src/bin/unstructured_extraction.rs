use llm_extraction::prompt::SAMPLE_ANNOUNCEMENT;
use llm_extraction::{config, extract_event_text, logging, ClientConfig, CompletionClient};

const SITE_TITLE: &str = "Unstructured Extraction Demo";

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    logging::init();
    config::load_dotenv();

    let client = CompletionClient::new(ClientConfig::from_env(SITE_TITLE));
    let response = extract_event_text(&client, SAMPLE_ANNOUNCEMENT).await?;
    println!("{}", response);
    Ok(())
}
