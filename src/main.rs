use std::{fs, path::{Path, PathBuf}, sync::Arc};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tag_deriver::{Submission, TagDeriver, TaggerConfig, UploadedFile, Vocabulary};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tag-deriver", version, about = "Derive the topic tag of text files")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true, env = "TAG_DERIVER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tokens and token records of a file
    Tokenize {
        file: PathBuf,
    },
    /// Classify files against a vocabulary snapshot
    Classify {
        /// vocabulary snapshot (.json or .cbor)
        #[arg(long, env = "TAG_DERIVER_VOCAB")]
        vocab: PathBuf,
        /// text typed alongside the files
        #[arg(long, default_value = "")]
        input: String,
        files: Vec<PathBuf>,
    },
    /// Print the snippets around a token
    Snippets {
        #[arg(long)]
        token: String,
        file: PathBuf,
    },
    /// List the tags known to a vocabulary snapshot
    Tags {
        #[arg(long, env = "TAG_DERIVER_VOCAB")]
        vocab: PathBuf,
    },
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_vocabulary(path: &Path) -> anyhow::Result<Arc<Vocabulary>> {
    let vocab = Vocabulary::load_snapshot(path)
        .with_context(|| format!("failed to load vocabulary {}", path.display()))?;
    tracing::debug!(sample = ?vocab.sample(5), "sample root tokens");
    Ok(Arc::new(vocab))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => TaggerConfig::from_json_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TaggerConfig::default(),
    };

    match cli.command {
        Command::Tokenize { file } => {
            let deriver = TagDeriver::with_config(Arc::new(Vocabulary::new()), config)?;
            let tokenized = deriver.tokenize(&read_text(&file)?);
            println!("{}", serde_json::to_string_pretty(&tokenized)?);
        }
        Command::Classify { vocab, input, files } => {
            let deriver = TagDeriver::with_config(load_vocabulary(&vocab)?, config)?;
            let uploaded_files = files.iter()
                .map(|path| {
                    let name = path.file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.display().to_string());
                    Ok(UploadedFile::new(name, read_text(path)?))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            let submission = Submission { user_input: input, uploaded_files };
            let report = deriver.process_submission(&submission)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Snippets { token, file } => {
            let deriver = TagDeriver::with_config(Arc::new(Vocabulary::new()), config)?;
            for snippet in deriver.extract_snippets(&token, &read_text(&file)?) {
                print!("{}", snippet);
            }
        }
        Command::Tags { vocab } => {
            for tag in load_vocabulary(&vocab)?.tags() {
                println!("{}", tag);
            }
        }
    }
    Ok(())
}
