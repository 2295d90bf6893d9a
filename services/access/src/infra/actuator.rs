use anyhow::Context as _;

use bodegix_domain::id::LockerId;

use crate::domain::repository::UnlockActuator;
use crate::error::AccessServiceError;

/// Sends the unlock signal to the locker controller over HTTP:
/// `POST {base_url}/lockers/{id}/unlock`. Any non-2xx response is a failure.
#[derive(Clone)]
pub struct HttpUnlockActuator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUnlockActuator {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn unlock_url(&self, locker_id: LockerId) -> String {
        format!("{}/lockers/{}/unlock", self.base_url, locker_id)
    }
}

impl UnlockActuator for HttpUnlockActuator {
    async fn unlock(&self, locker_id: LockerId) -> Result<(), AccessServiceError> {
        self.client
            .post(self.unlock_url(locker_id))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .with_context(|| format!("unlock locker {locker_id}"))?;
        Ok(())
    }
}

/// Used when no controller is configured: logs the unlock and succeeds.
#[derive(Clone, Default)]
pub struct LogUnlockActuator;

impl UnlockActuator for LogUnlockActuator {
    async fn unlock(&self, locker_id: LockerId) -> Result<(), AccessServiceError> {
        tracing::info!(%locker_id, "unlock signal (no controller configured)");
        Ok(())
    }
}

#[derive(Clone)]
pub enum Actuator {
    Http(HttpUnlockActuator),
    Log(LogUnlockActuator),
}

impl Actuator {
    pub fn from_url(unlock_url: Option<&str>) -> Self {
        match unlock_url {
            Some(url) => Self::Http(HttpUnlockActuator::new(reqwest::Client::new(), url)),
            None => Self::Log(LogUnlockActuator),
        }
    }
}

impl UnlockActuator for Actuator {
    async fn unlock(&self, locker_id: LockerId) -> Result<(), AccessServiceError> {
        match self {
            Self::Http(a) => a.unlock(locker_id).await,
            Self::Log(a) => a.unlock(locker_id).await,
        }
    }
}
