use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the service uses in place of a real one when it rejects credentials.
pub const NIL_IDENTIFIER: &str = "00000000-0000-0000-0000-000000000000";

#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One reading record exactly as the service returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlucoseReading(pub serde_json::Value);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareStep {
    Authenticate,
    Login,
    ReadGlucose,
}

impl ShareStep {
    /// Path relative to the service base URL.
    pub fn path(&self) -> &'static str {
        match self {
            ShareStep::Authenticate => "General/AuthenticatePublisherAccount",
            ShareStep::Login => "General/LoginPublisherAccountById",
            ShareStep::ReadGlucose => "Publisher/ReadPublisherLatestGlucoseValues",
        }
    }
}

impl fmt::Display for ShareStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShareStep::Authenticate => "authenticate account",
            ShareStep::Login => "login session",
            ShareStep::ReadGlucose => "read glucose values",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateRequest<'a> {
    pub account_name: &'a str,
    pub password: &'a str,
    pub application_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub account_id: &'a str,
    pub password: &'a str,
    pub application_id: &'a str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingsQuery<'a> {
    pub session_id: &'a str,
    pub minutes: u32,
    pub max_count: u32,
}

/// Error body the service sends with non-success statuses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShareFault {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
}
