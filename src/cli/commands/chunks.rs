use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput, TableFormatter};
use crate::cli::types::ChunksArgs;
use crate::domain::models::{Chunk, Config};
use crate::infrastructure::config::ConfigLoader;

use super::extract_and_chunk;

#[derive(Debug, Serialize)]
pub struct ChunksOutput {
    pub source: String,
    pub characters: usize,
    pub max_chunk_size: usize,
    pub chunks: Vec<Chunk>,
}

impl CommandOutput for ChunksOutput {
    fn to_human(&self) -> String {
        if self.chunks.is_empty() {
            return format!("{} contains no extractable text.", self.source);
        }

        format!(
            "{}\n\n{} chunk(s) from {} ({} characters, max {} per chunk)",
            TableFormatter::new().format_chunks(&self.chunks),
            self.chunks.len(),
            self.source,
            self.characters,
            self.max_chunk_size
        )
    }
}

/// Handle the chunks command; needs neither credential nor model
pub async fn execute(args: ChunksArgs, mut config: Config, json_mode: bool) -> Result<()> {
    if let Some(max_chunk_size) = args.max_chunk_size {
        config.chunking.max_chunk_size = max_chunk_size;
        ConfigLoader::validate(&config)?;
    }

    let (document, chunks) = extract_and_chunk(&args.document, &config.chunking).await?;

    output(
        &ChunksOutput {
            characters: document.char_count(),
            source: document.source,
            max_chunk_size: config.chunking.max_chunk_size,
            chunks,
        },
        json_mode,
    );

    Ok(())
}
