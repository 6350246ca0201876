//! Golden-set evaluation of the retrieval pipeline.
//!
//! This example shows how to:
//! - Load golden cases from a JSON file
//! - Replay every golden through a [`ragprobe::engine::RagEngine`]
//! - Score the answers with the token-F1 judge and print the report
//!
//! The final golden asks a paraphrased question. Hash-based mock embeddings
//! carry no semantics, so it retrieves the wrong chunk and lands in the
//! failed-cases section, which is the part of the report worth seeing.
//!
//! Running This Demo:
//! ```bash
//! cargo run --example eval_run
//! ```

use std::sync::Arc;

use ragprobe::prelude::*;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), EvalError> {
    init_tracing();

    let engine = RagEngine::builder()
        .with_provider(Arc::new(MockEmbeddingProvider::new()))
        .with_max_chars(80)
        .build_from_path("demos/data/knowledge.txt")
        .await?;

    let harness = EvalHarness::new(engine, Arc::new(LexicalJudge::default()));
    let report = harness.run_file("demos/data/goldens.json").await?;

    println!("{}", report.format_summary());
    if report.all_passed() {
        println!("✓ every golden passed");
    } else {
        println!("✗ {} of {} goldens failed", report.summary.failed, report.summary.total);
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
