use crate::core::{AccountId, Credentials, GlucoseReading, SessionId, ShareService};
use crate::utils::error::Result;
use std::io::Write;

#[derive(Debug, Clone)]
pub struct FlowOutput {
    pub account_id: AccountId,
    pub session_id: SessionId,
    pub readings: Vec<GlucoseReading>,
}

/// Runs authenticate, login and read in order, reporting each result as it arrives.
pub struct ShareFlow<S: ShareService> {
    service: S,
}

impl<S: ShareService> ShareFlow<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn account_id<W: Write>(
        &self,
        credentials: &Credentials,
        out: &mut W,
    ) -> Result<AccountId> {
        tracing::info!("Authenticating publisher account for {}", credentials.username);
        let account_id = self.service.authenticate(credentials).await?;
        writeln!(out, "{}", account_id)?;

        Ok(account_id)
    }

    pub async fn run<W: Write>(
        &self,
        credentials: &Credentials,
        out: &mut W,
    ) -> Result<FlowOutput> {
        tracing::info!("Authenticating publisher account for {}", credentials.username);
        let account_id = self.service.authenticate(credentials).await?;
        writeln!(out, "Account id = {}", account_id)?;

        tracing::info!("Logging in to obtain a session");
        let session_id = self
            .service
            .login(&account_id, &credentials.password)
            .await?;
        writeln!(out, "Session id = {}", session_id)?;

        tracing::info!("Reading latest glucose values");
        let readings = self.service.read_glucose(&session_id).await?;
        tracing::info!("Received {} readings", readings.len());
        writeln!(out, "{}", serde_json::to_string_pretty(&readings)?)?;

        Ok(FlowOutput {
            account_id,
            session_id,
            readings,
        })
    }
}
