pub mod client;
pub mod flow;

pub use crate::domain::model::{AccountId, Credentials, GlucoseReading, SessionId, ShareStep};
pub use crate::domain::ports::{ConfigProvider, ShareService};
pub use crate::utils::error::Result;
