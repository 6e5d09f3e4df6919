// src/config.rs
use crate::api::WalkOptions;
use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT_SECS, MAX_WALK_CONCURRENCY, NOTION_API_BASE_URL, NOTION_API_VERSION,
};
use crate::error::NotionError;
use crate::types::{ApiBaseUrl, ApiKey, BlockId, ValidationError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the HTTP transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: ApiBaseUrl,
    pub notion_version: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            notion_version: NOTION_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn default_base_url() -> ApiBaseUrl {
    ApiBaseUrl::parse(NOTION_API_BASE_URL).expect("NOTION_API_BASE_URL is a valid base URL")
}

impl ClientConfig {
    /// Point the client at another API root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ValidationError> {
        self.base_url = ApiBaseUrl::parse(base_url)?;
        Ok(self)
    }

    pub fn with_notion_version(mut self, version: impl Into<String>) -> Self {
        self.notion_version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// What the CLI fetches for the given ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FetchMode {
    /// The block itself
    Block,
    /// The block, with table rows attached when it is a table
    WithChildren,
    /// Direct children as a flat list
    Children,
    /// Children with every nested table hydrated
    Tables,
    /// Children with every nested level fetched
    Tree,
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion block/page URL or ID (e.g., "https://www.notion.so/...")
    pub notion_input: String,

    /// What to fetch
    #[arg(short, long, value_enum, default_value_t = FetchMode::Tree)]
    pub mode: FetchMode,

    /// Number of sibling blocks descended concurrently (max 32)
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,

    /// Write the JSON to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Emit compact JSON instead of pretty-printed
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// API root URL
    #[arg(long, default_value = NOTION_API_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,
}

/// Resolved CLI configuration, validated and ready to run.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub block_id: BlockId,
    pub api_key: ApiKey,
    pub mode: FetchMode,
    pub walk: WalkOptions,
    pub client: ClientConfig,
    pub output: Option<PathBuf>,
    pub compact: bool,
    pub verbose: bool,
}

impl CliConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, NotionError> {
        let api_key = std::env::var("NOTION_API_KEY").map_err(|_| {
            NotionError::MissingConfiguration(
                "NOTION_API_KEY environment variable not set".to_string(),
            )
        })?;
        Self::resolve_with_key(cli, api_key)
    }

    /// Same as [`CliConfig::resolve`] with the API key supplied directly.
    pub fn resolve_with_key(
        cli: CommandLineInput,
        api_key: impl Into<String>,
    ) -> Result<Self, NotionError> {
        let api_key = ApiKey::new(api_key)?;
        let block_id = BlockId::parse(&cli.notion_input)?;

        if cli.concurrency == 0 || cli.concurrency > MAX_WALK_CONCURRENCY {
            return Err(ValidationError::OutOfBounds {
                value: u32::try_from(cli.concurrency).unwrap_or(u32::MAX),
                min: 1,
                max: MAX_WALK_CONCURRENCY as u32,
            }
            .into());
        }

        let client = ClientConfig::default()
            .with_base_url(&cli.base_url)?
            .with_timeout(Duration::from_secs(cli.timeout));

        let walk = WalkOptions {
            expand_nested: cli.mode == FetchMode::Tree,
            concurrency: cli.concurrency,
        };

        Ok(CliConfig {
            block_id,
            api_key,
            mode: cli.mode,
            walk,
            client,
            output: cli.output.map(PathBuf::from),
            compact: cli.compact,
            verbose: cli.verbose,
        })
    }
}
