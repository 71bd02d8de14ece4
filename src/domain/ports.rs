use crate::domain::model::{AccountId, Credentials, GlucoseReading, SessionId};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn server_url(&self) -> &str;
    fn application_id(&self) -> &str;
    fn minutes(&self) -> u32;
    fn max_count(&self) -> u32;
}

/// The three calls of the Share publisher API.
#[async_trait]
pub trait ShareService: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccountId>;
    async fn login(&self, account_id: &AccountId, password: &str) -> Result<SessionId>;
    async fn read_glucose(&self, session_id: &SessionId) -> Result<Vec<GlucoseReading>>;
}
