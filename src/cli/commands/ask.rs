use anyhow::Result;
use serde::Serialize;
use std::io::IsTerminal;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::output::{create_spinner_with_message, output, CommandOutput, ProgressBarExt};
use crate::cli::types::AskArgs;
use crate::domain::errors::PipelineError;
use crate::domain::models::Config;
use crate::services::DocumentSession;

use super::{chunk_texts, extract_and_chunk};

#[derive(Debug, Serialize)]
pub struct AnswerOutput {
    pub question: String,
    pub answer: String,
}

impl CommandOutput for AnswerOutput {
    fn to_human(&self) -> String {
        format!("{}\n", self.answer)
    }
}

#[derive(Debug, Serialize)]
pub struct FailedAnswerOutput {
    pub question: String,
    pub error: String,
    pub kind: &'static str,
}

/// Handle the ask command
///
/// Query-time failures are reported per question and do not stop the
/// loop. With `--question` arguments the command fails at the end if any
/// question had no answer; an interactive stdin session does not.
pub async fn execute(args: AskArgs, config: Config, json_mode: bool) -> Result<()> {
    config.generation.require_api_key()?;

    let (document, chunks) = extract_and_chunk(&args.document, &config.chunking).await?;
    if chunks.is_empty() {
        tracing::warn!(source = %document.source, "nothing to index");
    }
    let chunks = chunk_texts(chunks);

    let mut session = DocumentSession::new();
    let spinner = create_spinner_with_message(!json_mode, format!("Indexing {} chunk(s)...", chunks.len()));
    match session.load_document(&config, &chunks).await {
        Ok(()) => spinner.finish_success(format!("Indexed {} chunk(s) from {}", chunks.len(), document.source)),
        Err(e) => {
            spinner.finish_error("Indexing failed");
            return Err(e.into());
        }
    }

    if args.questions.is_empty() {
        answer_from_stdin(&session, json_mode).await?;
        return Ok(());
    }

    let mut failures = 0usize;
    for question in &args.questions {
        if !ask_one(&session, question, json_mode).await {
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} question(s) could not be answered", args.questions.len());
    }

    Ok(())
}

/// Answer questions read line by line until EOF or `exit`/`quit`
async fn answer_from_stdin(session: &DocumentSession, json_mode: bool) -> Result<()> {
    let interactive = !json_mode && std::io::stdin().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if interactive {
            eprint!("{} ", console::style("Question:").cyan().bold());
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if is_exit_command(question) {
            break;
        }
        ask_one(session, question, json_mode).await;
    }

    Ok(())
}

/// Answer one question and print the outcome; returns whether it succeeded
async fn ask_one(session: &DocumentSession, question: &str, json_mode: bool) -> bool {
    let spinner = create_spinner_with_message(!json_mode, "Generating answer...");
    match session.answer(question).await {
        Ok(answer) => {
            spinner.finish_and_clear();
            output(
                &AnswerOutput {
                    question: question.to_string(),
                    answer,
                },
                json_mode,
            );
            true
        }
        Err(e) => {
            spinner.finish_error("No answer");
            report_failure(question, &e, json_mode);
            false
        }
    }
}

fn report_failure(question: &str, error: &PipelineError, json_mode: bool) {
    if json_mode {
        let failed = FailedAnswerOutput {
            question: question.to_string(),
            error: error.to_string(),
            kind: error.kind(),
        };
        println!("{}", serde_json::to_string_pretty(&failed).unwrap_or_default());
    } else {
        eprintln!("{} {error}", console::style("Error:").red().bold());
    }
}

fn is_exit_command(line: &str) -> bool {
    line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit")
}
