//! Minimal end-to-end run of the retrieval pipeline.
//!
//! This example shows how to:
//! - Load a plain-text document from disk and chunk it on sentence boundaries
//! - Build a [`ragprobe::engine::RagEngine`] with the deterministic mock provider
//! - Answer queries and inspect ranked matches with scores
//!
//! Running This Demo:
//! ```bash
//! cargo run --example quickstart
//! ```

use std::sync::Arc;

use ragprobe::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), RagError> {
    init_tracing();

    // 80 characters keeps each sentence of the sample document in its own
    // chunk; drop the call to pack neighbouring sentences together instead.
    let engine = RagEngine::builder()
        .with_provider(Arc::new(MockEmbeddingProvider::new()))
        .with_max_chars(80)
        .build_from_path("demos/data/knowledge.txt")
        .await?;

    println!(
        "Corpus ready: {} chunks, {}-dimensional embeddings\n",
        engine.corpus().len(),
        engine.corpus().dimension()
    );

    for question in [
        "Venus is the hottest planet in the Solar System.",
        "Neptune is the farthest planet from the Sun.",
    ] {
        let answer = engine.answer(question).await?;
        println!("Q: {question}");
        println!("A: {answer}\n");
    }

    println!("=== Top matches for a free-form query ===");
    let query = "Which planet is known for its rings?";
    println!("Q: {query}");
    for (chunk, score) in engine.search(query, 3).await? {
        println!("{score:>7.4} | [{}] {}", chunk.index, chunk.text);
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,ragprobe=debug"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}
