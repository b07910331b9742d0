//! `askhound ask` — Answer a single question from the command line.

use askhound_agent::QueryAgent;
use askhound_completion::AzureOpenAiClient;
use askhound_config::AppConfig;
use askhound_store::DocumentStore;
use std::path::Path;
use std::sync::Arc;

pub async fn run(
    config_path: Option<&Path>,
    query: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        AppConfig::load_with(config_path).map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for credentials early — give a clear error
    if !config.completion.is_configured() {
        eprintln!();
        eprintln!("  ERROR: Azure OpenAI is not configured!");
        eprintln!();
        eprintln!("  Set these environment variables:");
        eprintln!("    AZURE_OPENAI_ENDPOINT        = 'https://<resource>.openai.azure.com'");
        eprintln!("    AZURE_OPENAI_KEY             = '<api key>'");
        eprintln!("    AZURE_OPENAI_DEPLOYMENT_NAME = 'gpt-4'   (optional)");
        eprintln!();
        eprintln!("  Or add them to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No Azure OpenAI credentials found. See above for setup instructions.".into());
    }

    let store = Arc::new(DocumentStore::new());
    store.load(Path::new(&config.documents.dir)).await;

    let client = Arc::new(
        AzureOpenAiClient::new(
            &config.completion.endpoint,
            &config.completion.api_key,
            &config.completion.deployment,
        )
        .with_api_version(&config.completion.api_version),
    );

    let agent = QueryAgent::new(store, client, &config.completion.deployment)
        .with_temperature(config.completion.temperature)
        .with_max_tokens(config.completion.max_tokens);

    eprint!("  Thinking...");
    let package = agent.answer(query, &[], "cli").await?;
    eprint!("\r              \r");

    println!("{}", package.answer);
    if !package.sources.is_empty() {
        println!();
        println!("  Sources: {}", package.sources.join(", "));
    }

    Ok(())
}
