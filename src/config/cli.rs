use crate::config::toml_config::TomlConfig;
use crate::config::{ClientSettings, DEFAULT_CONCURRENT_REQUESTS};
use crate::domain::model::{Company, ComputerModel};
use crate::utils::error::{CdbError, Result};
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cdb")]
#[command(about = "Client for the computer database REST API")]
pub struct CliConfig {
    #[arg(long, help = "API root, e.g. http://localhost:8080/api/v1")]
    pub base_url: Option<String>,

    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Computer models fetched at once when loading a company")]
    pub concurrent_requests: Option<usize>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a company, with its computer models embedded
    CreateCompany(CompanyArgs),
    /// Fetch a company and its computer models
    GetCompany { id: String },
    /// Replace a company, with its computer models embedded
    UpdateCompany(CompanyArgs),
    DeleteCompany { id: String },
    /// Create a computer model under an existing company
    CreateComputerModel {
        #[arg(long)]
        company_id: String,
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        release: String,
    },
    /// Fetch a computer model and its company
    GetComputerModel { company_id: String, model_id: String },
    DeleteComputerModel { company_id: String, model_id: String },
}

#[derive(Debug, Clone, Args)]
pub struct CompanyArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "global")]
    pub location: String,

    #[arg(
        long = "model",
        value_parser = parse_computer_model,
        help = "Computer model as id:name:release (repeatable)"
    )]
    pub models: Vec<ComputerModel>,
}

impl CompanyArgs {
    pub fn to_company(&self) -> Company {
        Company::new(self.id.clone(), self.name.clone(), self.location.clone())
            .with_computer_models(self.models.clone())
    }
}

/// Parses `id:name:release`; the release label may itself contain colons.
pub fn parse_computer_model(value: &str) -> std::result::Result<ComputerModel, String> {
    let mut parts = value.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(id), Some(name), Some(release)) if !id.is_empty() && !name.is_empty() => {
            Ok(ComputerModel::new(id, name, release))
        }
        _ => Err(format!(
            "expected id:name:release, got '{}'",
            value
        )),
    }
}

impl CliConfig {
    /// Loads and validates the `--config` file, if one was given.
    pub fn load_file(&self) -> Result<Option<TomlConfig>> {
        let Some(path) = &self.config else {
            return Ok(None);
        };
        let file = TomlConfig::from_file(path)?;
        file.validate()?;
        Ok(Some(file))
    }

    /// Merges file settings with command-line flags; flags win.
    pub fn settings(&self, file: Option<&TomlConfig>) -> Result<ClientSettings> {
        let base = file.map(TomlConfig::settings);

        let base_url = self
            .base_url
            .clone()
            .or_else(|| base.as_ref().map(|s| s.base_url.clone()))
            .ok_or_else(|| CdbError::MissingConfigError {
                field: "base_url (--base-url or [api].base_url)".to_string(),
            })?;

        Ok(ClientSettings {
            base_url,
            timeout_seconds: self
                .timeout_seconds
                .or_else(|| base.as_ref().and_then(|s| s.timeout_seconds)),
            headers: base.as_ref().and_then(|s| s.headers.clone()),
            concurrent_requests: self
                .concurrent_requests
                .or_else(|| base.as_ref().map(|s| s.concurrent_requests))
                .unwrap_or(DEFAULT_CONCURRENT_REQUESTS),
        })
    }

    pub fn verbose(&self, file: Option<&TomlConfig>) -> bool {
        self.verbose || file.map_or(false, TomlConfig::verbose)
    }

    pub fn log_format(&self, file: Option<&TomlConfig>) -> LogFormat {
        match (self.log_format, file.and_then(TomlConfig::log_format)) {
            (Some(format), _) => format,
            (None, Some("json")) => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}
