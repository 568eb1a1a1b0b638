use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{create_spinner_with_message, output, CommandOutput, ProgressBarExt, TableFormatter};
use crate::cli::types::RetrieveArgs;
use crate::domain::models::{Config, ScoredChunk};
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::vector::ModelRegistry;
use crate::services::Retriever;

use super::{chunk_texts, extract_and_chunk};

#[derive(Debug, Serialize)]
pub struct RetrieveOutput {
    pub question: String,
    pub model: String,
    pub results: Vec<ScoredChunk>,
}

impl CommandOutput for RetrieveOutput {
    fn to_human(&self) -> String {
        if self.results.is_empty() {
            return "No chunks retrieved.".to_string();
        }

        format!(
            "Question: {}\n\n{}",
            self.question,
            TableFormatter::new().format_retrieval(&self.results)
        )
    }
}

/// Handle the retrieve command; needs the model but no credential
pub async fn execute(args: RetrieveArgs, mut config: Config, json_mode: bool) -> Result<()> {
    if let Some(top_k) = args.top_k {
        config.retrieval.top_k = top_k;
        ConfigLoader::validate(&config)?;
    }

    let (_document, chunks) = extract_and_chunk(&args.document, &config.chunking).await?;
    let chunks = chunk_texts(chunks);

    let spinner = create_spinner_with_message(!json_mode, format!("Indexing {} chunk(s)...", chunks.len()));
    let embedder =
        match ModelRegistry::shared(config.embedding.model, config.embedding.cache_dir.clone()).await {
            Ok(embedder) => embedder,
            Err(e) => {
                spinner.finish_error("Embedding model unavailable");
                return Err(e.into());
            }
        };
    let model = embedder.model_id().to_string();

    let retriever = match Retriever::build(&chunks, embedder).await {
        Ok(retriever) => retriever,
        Err(e) => {
            spinner.finish_error("Indexing failed");
            return Err(e.into());
        }
    };
    spinner.finish_success(format!("Indexed {} chunk(s)", retriever.chunk_count()));

    let results = retriever
        .retrieve_scored(&args.question, config.retrieval.top_k)
        .await?;

    output(
        &RetrieveOutput {
            question: args.question,
            model,
            results,
        },
        json_mode,
    );

    Ok(())
}
