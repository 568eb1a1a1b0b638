//! Table output formatting for CLI commands

use crate::domain::models::{Chunk, ScoredChunk};
use comfy_table::{presets, Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::env;

use super::truncate;

/// Characters of chunk text shown per row
const PREVIEW_CHARS: usize = 80;

/// Table formatter for CLI output
pub struct TableFormatter {
    use_colors: bool,
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a formatter that follows the terminal's color support
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a formatter with explicit settings
    pub const fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self {
            use_colors,
            max_width,
        }
    }

    /// Chunks with their position, size and a text preview
    pub fn format_chunks(&self, chunks: &[Chunk]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![
            header("#"),
            header("Tokens"),
            header("Length"),
            header("Preview"),
        ]);

        for chunk in chunks {
            table.add_row(vec![
                Cell::new(chunk.index).set_alignment(CellAlignment::Right),
                Cell::new(chunk.token_count()).set_alignment(CellAlignment::Right),
                Cell::new(chunk.serialized_len()).set_alignment(CellAlignment::Right),
                Cell::new(truncate(&chunk.content, PREVIEW_CHARS)),
            ]);
        }

        table.to_string()
    }

    /// Retrieved chunks, best first, with similarity scores
    pub fn format_retrieval(&self, results: &[ScoredChunk]) -> String {
        let mut table = self.create_base_table();
        table.set_header(vec![header("Rank"), header("Chunk"), header("Score"), header("Text")]);

        for (rank, result) in results.iter().enumerate() {
            let score = Cell::new(format!("{:.4}", result.score)).set_alignment(CellAlignment::Right);
            let score = if self.use_colors {
                score.fg(score_color(result.score))
            } else {
                score
            };

            table.add_row(vec![
                Cell::new(rank + 1),
                Cell::new(result.index),
                score,
                Cell::new(truncate(&result.content, PREVIEW_CHARS)),
            ]);
        }

        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if let Some(width) = self.max_width {
            table.set_width(width);
        }

        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(title: &str) -> Cell {
    Cell::new(title).add_attribute(Attribute::Bold)
}

/// Check if color output is supported
fn supports_color() -> bool {
    if env::var("NO_COLOR").is_ok() {
        return false;
    }

    !matches!(env::var("TERM").as_deref(), Ok("dumb"))
}

fn score_color(score: f32) -> Color {
    if score >= 0.6 {
        Color::Green
    } else if score >= 0.3 {
        Color::Yellow
    } else {
        Color::Red
    }
}
