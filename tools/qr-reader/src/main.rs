//! Physical QR reader process.
//!
//! Scanners that act as keyboards type one payload per line; pipe them in:
//!
//! ```bash
//! READER_TOKEN=... qr-reader --access-url http://localhost:3114 --locker-id 7
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;

use bodegix_client::AccessClient;
use bodegix_core::tracing::{LogFormat, init_tracing};
use bodegix_domain::id::LockerId;

#[derive(Parser)]
#[command(about = "Forward scanned QR payloads to the access service")]
struct Args {
    /// Access service base URL
    #[arg(long, env = "ACCESS_URL", default_value = "http://localhost:3114")]
    access_url: String,

    /// Bearer token of the reader account (carries the reader's tenant)
    #[arg(long, env = "READER_TOKEN", hide_env_values = true)]
    token: String,

    /// Locker this reader is mounted on; scans for other lockers are refused
    #[arg(long, env = "READER_LOCKER_ID")]
    locker_id: Option<i32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(LogFormat::Text, "info");
    let args = Args::parse();

    let client =
        AccessClient::new(&args.access_url, args.token).context("failed to build HTTP client")?;
    let locker_id = args.locker_id.map(LockerId);

    tracing::info!(access_url = client.base_url(), ?locker_id, "scanning, waiting for input");
    let stats = qr_reader::run_reader(BufReader::new(tokio::io::stdin()), &client, locker_id)
        .await
        .context("failed to read scanner input")?;

    tracing::info!(
        granted = stats.granted,
        refused = stats.refused,
        skipped = stats.skipped,
        "input closed"
    );
    Ok(())
}
