// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_blocks::{
    Block, BlockTreeWalker, CliConfig, CommandLineInput, FetchMode, NotionHttpClient,
};
use serde::Serialize;
use std::fs;

/// Sets up logging configuration.
///
/// The console appender writes to stderr so stdout carries only JSON.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_blocks.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// The fetched content: one block or a list of them.
#[derive(Serialize)]
#[serde(untagged)]
enum Fetched {
    One(Block),
    Many(Vec<Block>),
}

impl Fetched {
    fn block_count(&self) -> usize {
        match self {
            Fetched::One(block) => block.subtree_len(),
            Fetched::Many(blocks) => blocks.iter().map(Block::subtree_len).sum(),
        }
    }
}

async fn fetch(config: &CliConfig) -> anyhow::Result<Fetched> {
    let client = NotionHttpClient::new(&config.api_key, config.client.clone())
        .context("Failed to build the HTTP client")?;
    let walker = BlockTreeWalker::with_options(&client, config.walk);
    let id = &config.block_id;

    let fetched = match config.mode {
        FetchMode::Block => Fetched::One(walker.get_block(id).await?),
        FetchMode::WithChildren => Fetched::One(walker.get_block_with_children(id).await?),
        FetchMode::Children => Fetched::Many(walker.get_all_block_children(id).await?),
        FetchMode::Tables => Fetched::Many(walker.get_block_children_with_tables(id).await?),
        FetchMode::Tree => Fetched::Many(walker.get_block_tree(id).await?),
    };
    Ok(fetched)
}

fn write_output(config: &CliConfig, fetched: &Fetched) -> anyhow::Result<()> {
    let json = if config.compact {
        serde_json::to_string(fetched)
    } else {
        serde_json::to_string_pretty(fetched)
    }
    .context("Failed to encode blocks as JSON")?;

    match &config.output {
        Some(path) => {
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Wrote {} blocks to {}", fetched.block_count(), path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();
    setup_logging(cli.verbose).context("Failed to initialize logging")?;

    let config = CliConfig::resolve(cli).context("Invalid configuration")?;
    log::debug!("Resolved configuration: {:?}", config);

    let fetched = fetch(&config)
        .await
        .with_context(|| format!("Failed to fetch {}", config.block_id))?;
    log::info!("Fetched {} blocks", fetched.block_count());

    write_output(&config, &fetched)
}
