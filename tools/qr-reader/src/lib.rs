//! Reader loop: one scanned payload per input line, forwarded to the access
//! service as a scan.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use bodegix_client::{AccessClient, ClientError, ScanGrant};
use bodegix_domain::id::LockerId;
use bodegix_domain::qr_code::extract_code;

/// Destination for extracted codes.
pub trait ScanSink {
    fn submit(
        &self,
        code: &str,
        locker_id: Option<LockerId>,
    ) -> impl Future<Output = Result<ScanGrant, ClientError>>;
}

impl ScanSink for AccessClient {
    fn submit(
        &self,
        code: &str,
        locker_id: Option<LockerId>,
    ) -> impl Future<Output = Result<ScanGrant, ClientError>> {
        self.scan(code, locker_id)
    }
}

#[derive(Debug)]
pub enum LineOutcome {
    /// Nothing recognisable on the line; no request was made.
    Skipped,
    Granted(ScanGrant),
    Refused(ClientError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReaderStats {
    pub granted: usize,
    pub refused: usize,
    pub skipped: usize,
}

pub async fn process_line<S: ScanSink>(
    sink: &S,
    raw: &str,
    locker_id: Option<LockerId>,
) -> LineOutcome {
    let code = extract_code(raw);
    if code.is_empty() {
        tracing::warn!(raw = raw.trim(), "no code in scanned payload");
        return LineOutcome::Skipped;
    }

    tracing::info!(%code, "code read");
    match sink.submit(&code, locker_id).await {
        Ok(grant) => {
            tracing::info!(
                locker_id = %grant.locker_id,
                user_id = %grant.user_id,
                "access granted"
            );
            LineOutcome::Granted(grant)
        }
        Err(e) => {
            tracing::warn!(kind = e.kind().unwrap_or("TRANSPORT"), error = %e, "access refused");
            LineOutcome::Refused(e)
        }
    }
}

/// Read lines until EOF. Blank lines are ignored without logging.
pub async fn run_reader<R, S>(
    input: R,
    sink: &S,
    locker_id: Option<LockerId>,
) -> std::io::Result<ReaderStats>
where
    R: AsyncBufRead + Unpin,
    S: ScanSink,
{
    let mut stats = ReaderStats::default();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match process_line(sink, &line, locker_id).await {
            LineOutcome::Skipped => stats.skipped += 1,
            LineOutcome::Granted(_) => stats.granted += 1,
            LineOutcome::Refused(_) => stats.refused += 1,
        }
    }
    Ok(stats)
}
