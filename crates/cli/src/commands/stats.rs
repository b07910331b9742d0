//! `askhound stats` — Show document corpus statistics.

use askhound_config::AppConfig;
use askhound_store::DocumentStore;
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config =
        AppConfig::load_with(config_path).map_err(|e| format!("Failed to load config: {e}"))?;

    let store = DocumentStore::new();
    store.load(Path::new(&config.documents.dir)).await;
    let stats = store.stats().await;

    println!("🐾 Askhound Corpus");
    println!("==================");
    println!("  Directory:   {}", config.documents.dir);
    println!("  Documents:   {}", stats.total_documents);
    println!("  Characters:  {}", stats.total_characters);
    if stats.sources.is_empty() {
        println!("  Sources:     (none)");
    } else {
        println!("  Sources:");
        for source in &stats.sources {
            println!("    - {source}");
        }
    }

    Ok(())
}
