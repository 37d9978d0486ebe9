//! Renderer module
//!
//! Renders a concordance to different output formats: text, jsonl, json, md

use crate::core::model::{ConcordanceStore, WordEntry};
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `<word> <line> <line> ...`
    #[default]
    Text,
    Jsonl,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with default options
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for a concordance store
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    #[allow(dead_code)]
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render the store to a string, one entry per line, words ascending.
    ///
    /// Line-oriented formats end every entry with a newline; an empty store
    /// renders as an empty string in those formats.
    pub fn render(&self, store: &ConcordanceStore) -> serde_json::Result<String> {
        let entries = store.sorted_entries();
        match self.config.format {
            OutputFormat::Text => Ok(self.render_text(&entries)),
            OutputFormat::Jsonl => self.render_jsonl(&entries),
            OutputFormat::Json => self.render_json(&entries),
            OutputFormat::Markdown => Ok(self.render_markdown(&entries)),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(
        &self,
        store: &ConcordanceStore,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(store)?;
        writer.write_all(output.as_bytes())?;
        writer.flush()
    }

    fn render_text(&self, entries: &[WordEntry<'_>]) -> String {
        let mut output = String::new();
        for entry in entries {
            output.push_str(entry.word);
            for line in entry.lines {
                output.push(' ');
                output.push_str(&line.to_string());
            }
            output.push('\n');
        }
        output
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, entries: &[WordEntry<'_>]) -> serde_json::Result<String> {
        let mut output = entries
            .iter()
            .map(|entry| {
                if self.config.pretty {
                    serde_json::to_string_pretty(entry)
                } else {
                    serde_json::to_string(entry)
                }
            })
            .collect::<serde_json::Result<Vec<_>>>()?
            .join(if self.config.pretty { "\n\n" } else { "\n" });
        if !output.is_empty() {
            output.push('\n');
        }
        Ok(output)
    }

    /// Render as a single JSON array
    fn render_json(&self, entries: &[WordEntry<'_>]) -> serde_json::Result<String> {
        let mut output = if self.config.pretty {
            serde_json::to_string_pretty(entries)?
        } else {
            serde_json::to_string(entries)?
        };
        output.push('\n');
        Ok(output)
    }

    /// Render as a Markdown table
    fn render_markdown(&self, entries: &[WordEntry<'_>]) -> String {
        if entries.is_empty() {
            return String::new();
        }

        let mut output = String::from("| word | lines |\n|------|-------|\n");
        for entry in entries {
            let lines = entry
                .lines
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            output.push_str(&format!("| {} | {} |\n", code_span(entry.word), lines));
        }
        output
    }
}

/// Wrap `text` in a Markdown code span that survives backticks inside it
fn code_span(text: &str) -> String {
    let longest_run = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);
    if text.starts_with('`') || text.ends_with('`') {
        format!("{fence} {text} {fence}")
    } else {
        format!("{fence}{text}{fence}")
    }
}
