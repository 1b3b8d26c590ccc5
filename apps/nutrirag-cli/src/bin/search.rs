use std::env;

use nutrirag_core::config::Settings;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <query> [top_k]", args[0]);
        eprintln!("Example: {} 'is brown rice a good source of selenium' 5", args[0]);
        std::process::exit(1);
    }
    let query = &args[1];
    let top_k = args
        .get(2)
        .map(|s| s.parse::<usize>())
        .transpose()?
        .unwrap_or_else(|| Settings::default().top_k);

    let settings = Settings::load()?;
    tracing::info!(corpus = %settings.corpus_path.display(), "starting retrieval");
    let engine = nutrirag_hybrid::open(&settings)?;

    let results = engine.retrieve(query, top_k)?;
    if results.is_empty() {
        println!("No grounding found for: \"{query}\"");
        return Ok(());
    }
    println!("Top {} passages for: \"{query}\"", results.len());
    for (i, result) in results.iter().enumerate() {
        let locator = result.locator.as_deref().unwrap_or("-");
        println!("\n  {}. score={:.4}  page={}", i + 1, result.score, locator);
        println!("     {}", result.text);
    }
    Ok(())
}
