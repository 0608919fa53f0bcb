//! Verification runner binary.
//!
//! Drives a headless browser through the fixed interaction sequence against
//! the locally served game and writes one screenshot for manual inspection.
//! Takes no flags and reads no environment variables; any step error is
//! printed and the process exits non-zero.
//!
//! Usage:
//!   cargo run --release

use canvas_verify::{Result, VerificationRunner, VerifyConfig};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let runner = VerificationRunner::new(VerifyConfig::default());
    runner.execute().await
}

/// Initialize tracing/logging with a fixed filter.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("canvas_verify=info"))
        .with_target(false)
        .init();
}
