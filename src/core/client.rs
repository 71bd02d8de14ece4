use crate::core::{
    AccountId, ConfigProvider, Credentials, GlucoseReading, SessionId, ShareService, ShareStep,
};
use crate::domain::model::{
    AuthenticateRequest, LoginRequest, ReadingsQuery, ShareFault, NIL_IDENTIFIER,
};
use crate::utils::error::{Result, ShareError};
use reqwest::header::{ACCEPT, CONTENT_LENGTH};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;

/// `ShareService` over HTTP.
pub struct ShareClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> ShareClient<C> {
    pub fn new(config: C) -> Self {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: C, client: Client) -> Self {
        Self { config, client }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    fn endpoint(&self, step: ShareStep) -> String {
        format!(
            "{}/{}",
            self.config.server_url().trim_end_matches('/'),
            step.path()
        )
    }

    async fn send(&self, step: ShareStep, request: RequestBuilder) -> Result<Value> {
        let response = request.header(ACCEPT, "application/json").send().await?;
        let status = response.status();
        tracing::debug!("{} response status: {}", step, status);

        let body = response.text().await?;

        if !status.is_success() {
            return Err(classify_failure(step, status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|_| ShareError::UnexpectedResponseError { step, body })
    }
}

fn classify_failure(step: ShareStep, status: u16, body: String) -> ShareError {
    match serde_json::from_str::<ShareFault>(&body) {
        Ok(fault) => ShareError::ServiceError {
            step,
            status,
            message: fault.message.unwrap_or_else(|| fault.code.clone()),
            code: fault.code,
            body,
        },
        Err(_) => ShareError::HttpStatusError { step, status, body },
    }
}

fn identifier(step: ShareStep, value: Value) -> Result<String> {
    match value {
        Value::String(id) if id == NIL_IDENTIFIER => Err(ShareError::NilIdentifierError { step }),
        Value::String(id) => Ok(id),
        other => Err(ShareError::UnexpectedResponseError {
            step,
            body: other.to_string(),
        }),
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider> ShareService for ShareClient<C> {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccountId> {
        let step = ShareStep::Authenticate;
        let url = self.endpoint(step);
        tracing::debug!("Making API request to: {}", url);

        let body = AuthenticateRequest {
            account_name: &credentials.username,
            password: &credentials.password,
            application_id: self.config.application_id(),
        };
        let value = self.send(step, self.client.post(&url).json(&body)).await?;

        identifier(step, value).map(AccountId)
    }

    async fn login(&self, account_id: &AccountId, password: &str) -> Result<SessionId> {
        let step = ShareStep::Login;
        let url = self.endpoint(step);
        tracing::debug!("Making API request to: {}", url);

        let body = LoginRequest {
            account_id: account_id.as_str(),
            password,
            application_id: self.config.application_id(),
        };
        let value = self.send(step, self.client.post(&url).json(&body)).await?;

        identifier(step, value).map(SessionId)
    }

    async fn read_glucose(&self, session_id: &SessionId) -> Result<Vec<GlucoseReading>> {
        let step = ShareStep::ReadGlucose;
        let url = self.endpoint(step);
        tracing::debug!(
            "Making API request to: {} (minutes={}, maxCount={})",
            url,
            self.config.minutes(),
            self.config.max_count()
        );

        let query = ReadingsQuery {
            session_id: session_id.as_str(),
            minutes: self.config.minutes(),
            max_count: self.config.max_count(),
        };
        let request = self
            .client
            .post(&url)
            .query(&query)
            .header(CONTENT_LENGTH, "0");

        match self.send(step, request).await? {
            Value::Array(items) => Ok(items.into_iter().map(GlucoseReading).collect()),
            other => Err(ShareError::UnexpectedResponseError {
                step,
                body: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ShareConfig, APPLICATION_ID};
    use httpmock::prelude::*;
    use serde_json::json;

    const BASE: &str = "/ShareWebServices/Services";
    const ACCOUNT_ID: &str = "8f6b1c3e-2f4a-4a5e-9c1d-0a1b2c3d4e5f";
    const SESSION_ID: &str = "1d2e3f40-5a6b-4c7d-8e9f-a0b1c2d3e4f5";

    fn client_for(server: &MockServer) -> ShareClient<ShareConfig> {
        ShareClient::new(ShareConfig::with_server_url(server.url(BASE)))
    }

    #[tokio::test]
    async fn test_authenticate_sends_exact_body() {
        let server = MockServer::start();
        let auth_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/ShareWebServices/Services/General/AuthenticatePublisherAccount")
                .json_body(json!({
                    "accountName": "alice",
                    "password": "secret",
                    "applicationId": APPLICATION_ID
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!(ACCOUNT_ID));
        });

        let client = client_for(&server);
        let account_id = client
            .authenticate(&Credentials::new("alice", "secret"))
            .await
            .unwrap();

        auth_mock.assert();
        assert_eq!(account_id, AccountId(ACCOUNT_ID.to_string()));
    }

    #[tokio::test]
    async fn test_login_passes_account_id_unmodified() {
        let server = MockServer::start();
        let login_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/ShareWebServices/Services/General/LoginPublisherAccountById")
                .json_body(json!({
                    "accountId": ACCOUNT_ID,
                    "password": "secret",
                    "applicationId": APPLICATION_ID
                }));
            then.status(200).json_body(json!(SESSION_ID));
        });

        let client = client_for(&server);
        let session_id = client
            .login(&AccountId(ACCOUNT_ID.to_string()), "secret")
            .await
            .unwrap();

        login_mock.assert();
        assert_eq!(session_id.as_str(), SESSION_ID);
    }

    #[tokio::test]
    async fn test_read_glucose_sends_query_and_keeps_records() {
        let server = MockServer::start();
        let readings = json!([
            {
                "WT": "Date(1700000300000)",
                "ST": "Date(1700000300000)",
                "DT": "Date(1700000300000+0000)",
                "Value": 112,
                "Trend": "Flat"
            },
            {
                "WT": "Date(1700000000000)",
                "ST": "Date(1700000000000)",
                "DT": "Date(1700000000000+0000)",
                "Value": 109,
                "Trend": "FortyFiveUp"
            }
        ]);
        let read_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/ShareWebServices/Services/Publisher/ReadPublisherLatestGlucoseValues")
                .query_param("sessionId", SESSION_ID)
                .query_param("minutes", "1440")
                .query_param("maxCount", "10");
            then.status(200).json_body(readings.clone());
        });

        let client = client_for(&server);
        let result = client
            .read_glucose(&SessionId(SESSION_ID.to_string()))
            .await
            .unwrap();

        read_mock.assert();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].0, readings[0]);
        assert_eq!(result[1].0["Trend"], "FortyFiveUp");
    }

    #[tokio::test]
    async fn test_service_fault_becomes_service_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/ShareWebServices/Services/General/AuthenticatePublisherAccount");
            then.status(500).json_body(json!({
                "Code": "AccountPasswordInvalid",
                "Message": "Publisher account password failed"
            }));
        });

        let client = client_for(&server);
        let err = client
            .authenticate(&Credentials::new("alice", "wrong"))
            .await
            .unwrap_err();

        match err {
            ShareError::ServiceError {
                step,
                status,
                code,
                message,
                body,
            } => {
                assert_eq!(step, ShareStep::Authenticate);
                assert_eq!(status, 500);
                assert_eq!(code, "AccountPasswordInvalid");
                assert_eq!(message, "Publisher account password failed");
                let raw: serde_json::Value = serde_json::from_str(&body).unwrap();
                assert_eq!(raw["Code"], "AccountPasswordInvalid");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_failure_keeps_raw_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/ShareWebServices/Services/General/LoginPublisherAccountById");
            then.status(503).body("Service Unavailable");
        });

        let client = client_for(&server);
        let err = client
            .login(&AccountId(ACCOUNT_ID.to_string()), "secret")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ShareError::HttpStatusError { step: ShareStep::Login, status: 503, ref body }
                if body == "Service Unavailable"
        ));
    }

    #[tokio::test]
    async fn test_nil_identifier_is_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/ShareWebServices/Services/General/LoginPublisherAccountById");
            then.status(200).json_body(json!(NIL_IDENTIFIER));
        });

        let client = client_for(&server);
        let err = client
            .login(&AccountId(ACCOUNT_ID.to_string()), "secret")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ShareError::NilIdentifierError {
                step: ShareStep::Login
            }
        ));
    }

    #[tokio::test]
    async fn test_readings_must_be_an_array() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/ShareWebServices/Services/Publisher/ReadPublisherLatestGlucoseValues");
            then.status(200).json_body(json!({"Value": 100}));
        });

        let client = client_for(&server);
        let err = client
            .read_glucose(&SessionId(SESSION_ID.to_string()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ShareError::UnexpectedResponseError {
                step: ShareStep::ReadGlucose,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_server_url() {
        let server = MockServer::start();
        let auth_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/ShareWebServices/Services/General/AuthenticatePublisherAccount");
            then.status(200).json_body(json!(ACCOUNT_ID));
        });

        let client = ShareClient::new(ShareConfig::with_server_url(
            server.url("/ShareWebServices/Services/"),
        ));
        client
            .authenticate(&Credentials::new("alice", "secret"))
            .await
            .unwrap();

        auth_mock.assert();
    }
}
