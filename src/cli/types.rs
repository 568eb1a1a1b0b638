//! CLI type definitions
//!
//! Clap command structures that define the command-line interface.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "Ask questions about a document using retrieval-augmented generation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to docqa.yaml in the current directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Index a document and answer questions about it
    Ask(AskArgs),

    /// Show how a document is split into chunks
    Chunks(ChunksArgs),

    /// Show the chunks retrieved for a question, without generating an answer
    Retrieve(RetrieveArgs),
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Document to index (.pdf or UTF-8 text)
    pub document: PathBuf,

    /// Question to answer; repeat for several. Reads stdin when omitted
    #[arg(short, long = "question", value_name = "QUESTION")]
    pub questions: Vec<String>,
}

#[derive(Args, Debug)]
pub struct ChunksArgs {
    /// Document to chunk
    pub document: PathBuf,

    /// Override the configured chunk size (characters)
    #[arg(short, long)]
    pub max_chunk_size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct RetrieveArgs {
    /// Document to index
    pub document: PathBuf,

    /// Question to retrieve context for
    #[arg(short, long)]
    pub question: String,

    /// Override the configured number of chunks
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}
