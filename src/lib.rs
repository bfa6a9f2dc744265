pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub mod app;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{toml_config::TomlConfig, ClientSettings};
pub use crate::core::client::{ApiClient, Hydrate};
pub use crate::domain::model::{Company, ComputerModel};
pub use crate::domain::ports::{ComputerDatabase, ConfigProvider};
pub use crate::utils::error::{CdbError, Result};
