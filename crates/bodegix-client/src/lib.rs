//! HTTP client for the access service and the client-side status poller.

pub mod client;
pub mod poller;

pub use client::{AccessClient, ClientError, IssueRequest, IssuedQrSession, ScanGrant};
pub use poller::{PollConfig, PollHandle, PollOutcome, StatusSource, spawn_status_poll};
