pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::ShareConfig;
pub use crate::core::{client::ShareClient, flow::ShareFlow};
pub use utils::error::{Result, ShareError};
