//! wordtrie CLI - build and compress word tries from the command line
//!
//! Loads a dictionary file (one word per line), compresses it, and answers
//! queries against the compressed trie.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wordtrie::{
    dictionary, CompressedNode, CompressedTrie, CompressionPolicy, Compressor, Config, NodeRef,
    RawTrie,
};

#[derive(Parser)]
#[command(name = "wordtrie")]
#[command(about = "Build, compress and query word tries")]
#[command(version)]
struct Cli {
    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Path to a config file (defaults to the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Which nodes get merged during compression (overrides the config)
    #[arg(short, long)]
    policy: Option<CompressionPolicy>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a dictionary and report node statistics
    Compress {
        /// Dictionary file, one word per line
        dictionary: Option<PathBuf>,
    },

    /// Check whether a word (or prefix) is in the compressed trie
    Lookup {
        /// The word to look up
        word: String,
        /// Dictionary file, one word per line
        dictionary: Option<PathBuf>,
    },

    /// List stored words
    Words {
        /// Dictionary file, one word per line
        dictionary: Option<PathBuf>,
        /// Only words starting with this prefix
        #[arg(long, default_value = "")]
        prefix: String,
        /// Read words from the raw trie instead of the compressed one
        #[arg(long)]
        raw: bool,
    },

    /// Print the compressed trie as nested JSON
    Dump {
        /// Dictionary file, one word per line
        dictionary: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let compressor = Compressor::with_policy(cli.policy.unwrap_or(config.policy));

    match cli.command {
        Commands::Compress { dictionary } => {
            let raw = open_dictionary(dictionary.as_deref(), &config)?;
            let compressed = compressor.compress(&raw);
            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "policy": compressor.policy(),
                    "words": raw.word_count(),
                    "compressed_words": compressed.word_count(),
                    "raw_nodes": raw.len(),
                    "compressed_nodes": compressed.len(),
                    "raw_depth": raw.depth(),
                    "compressed_depth": compressed.depth()
                }),
            );
        }

        Commands::Lookup { word, dictionary } => {
            let raw = open_dictionary(dictionary.as_deref(), &config)?;
            let compressed = compressor.compress(&raw);
            output(
                &cli.format,
                &serde_json::json!({
                    "word": word,
                    "found": compressed.contains(&word),
                    "prefix": compressed.has_prefix(&word)
                }),
            );
        }

        Commands::Words {
            dictionary,
            prefix,
            raw: use_raw,
        } => {
            let raw = open_dictionary(dictionary.as_deref(), &config)?;
            let words = if use_raw {
                raw.scan(&prefix)
            } else {
                compressor.compress(&raw).scan(&prefix)
            };
            output(
                &cli.format,
                &serde_json::json!({
                    "count": words.len(),
                    "words": words
                }),
            );
        }

        Commands::Dump { dictionary } => {
            let raw = open_dictionary(dictionary.as_deref(), &config)?;
            let compressed = compressor.compress(&raw);
            output(&cli.format, &dump(&compressed));
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn open_dictionary(path: Option<&Path>, config: &Config) -> anyhow::Result<RawTrie> {
    let path = path
        .or(config.dictionary.as_deref())
        .context("No dictionary given and none configured")?;

    let trie = dictionary::load(path)
        .with_context(|| format!("Failed to load dictionary {}", path.display()))?;
    trie.validate()?;
    Ok(trie)
}

fn dump(trie: &CompressedTrie) -> serde_json::Value {
    fn node_json(node: NodeRef<'_, CompressedNode>) -> serde_json::Value {
        serde_json::json!({
            "letter": node.letter(),
            "terminal": node.is_terminal(),
            "children": node.children().map(node_json).collect::<Vec<_>>()
        })
    }

    node_json(trie.root())
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::Text => serde_json::to_string_pretty(value),
    };
    match rendered {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to render output: {}", e),
    }
}
