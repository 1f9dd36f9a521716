//! Batch prompt processing over CSV rows or SQLite table rows.
//!
//! CSV rows carry `id, content, prompt, result` in their first four
//! columns. Each row's prompt is rendered with `{{.Content}}` from either a
//! global template or the row's own `prompt` column, sent to the model under
//! a fixed deadline, and the reply (or an empty string on failure) is written
//! to the `result` column. Rows are processed strictly one after another.
//! The table source lives in [`db`].

pub mod db;

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{error, info, warn};

use crate::llm::LLMClient;
use crate::prompts::templates::{PromptTemplate, TemplateError};

pub use db::{DB_PAGE_SIZE, DbRow, open_database};

/// Minimum number of columns: id, content, prompt, result
pub const REQUIRED_COLUMNS: usize = 4;

const CONTENT_COLUMN: usize = 1;
const PROMPT_COLUMN: usize = 2;
const RESULT_COLUMN: usize = 3;

/// Counters reported after a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Rows that were sent to the model
    pub processed: usize,
    pub succeeded: usize,
    /// Rows whose call failed or timed out
    pub failed: usize,
    /// Rows copied through because they had fewer than four columns
    pub skipped: usize,
}

/// Result of one row's model call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Reply(String),
    Failed(String),
    TimedOut,
}

impl RowOutcome {
    /// Text written to the result column
    pub fn into_result(self) -> String {
        match self {
            RowOutcome::Reply(text) => text,
            RowOutcome::Failed(_) | RowOutcome::TimedOut => String::new(),
        }
    }
}

pub struct BatchProcessor<'a> {
    client: &'a dyn LLMClient,
    global_template: Option<PromptTemplate>,
    row_timeout: Duration,
}

impl<'a> BatchProcessor<'a> {
    /// A blank `global_prompt` means each row uses its own prompt column.
    /// A global template that fails to parse is an error up front.
    pub fn new(
        client: &'a dyn LLMClient,
        global_prompt: Option<&str>,
        row_timeout: Duration,
    ) -> Result<Self, TemplateError> {
        let global_template = global_prompt
            .filter(|prompt| !prompt.trim().is_empty())
            .map(PromptTemplate::parse)
            .transpose()?;

        Ok(Self {
            client,
            global_template,
            row_timeout,
        })
    }

    pub fn row_timeout(&self) -> Duration {
        self.row_timeout
    }

    /// Render the final prompt for a row.
    ///
    /// Falls back to the row's raw prompt text when the template cannot be
    /// parsed or rendered.
    pub fn build_prompt(&self, content: &str, row_prompt: &str) -> String {
        let context = [("Content", content)];
        let rendered = match &self.global_template {
            Some(template) => template.render_pairs(&context),
            None => PromptTemplate::parse(row_prompt).and_then(|t| t.render_pairs(&context)),
        };

        rendered.unwrap_or_else(|err| {
            warn!(error = %err, "prompt template failed, using the raw row prompt");
            row_prompt.to_string()
        })
    }

    /// One model call bounded by the row deadline
    pub async fn run_row(&self, prompt: &str) -> RowOutcome {
        match tokio::time::timeout(self.row_timeout, self.client.generate(prompt)).await {
            Ok(Ok(response)) => RowOutcome::Reply(response.content),
            Ok(Err(err)) => RowOutcome::Failed(err.to_string()),
            Err(_) => RowOutcome::TimedOut,
        }
    }

    /// Process every data row of `input` and write the updated table to `output`.
    ///
    /// An empty input writes nothing.
    pub async fn process_csv<R: Read, W: Write>(&self, input: R, output: W) -> Result<BatchSummary> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(input);
        let records = reader
            .records()
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read CSV input")?;

        let mut summary = BatchSummary::default();
        let Some((header, rows)) = records.split_first() else {
            info!("CSV input is empty");
            return Ok(summary);
        };

        if header.len() < REQUIRED_COLUMNS {
            bail!(
                "CSV header has {} columns; expected at least id, content, prompt, result",
                header.len()
            );
        }

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(output);
        writer
            .write_record(header)
            .context("Failed to write CSV header")?;

        let total = rows.len();
        for (index, record) in rows.iter().enumerate() {
            // 1-based line number in the file, header included
            let line = index + 2;
            let mut fields: Vec<String> = record.iter().map(str::to_string).collect();

            if fields.len() < REQUIRED_COLUMNS {
                warn!(line, columns = fields.len(), "row has too few columns, copied unchanged");
                summary.skipped += 1;
                writer.write_record(&fields)?;
                continue;
            }

            let id = fields[0].clone();
            info!(row = index + 1, total, id = %id, "processing row");

            let prompt = self.build_prompt(&fields[CONTENT_COLUMN], &fields[PROMPT_COLUMN]);
            summary.processed += 1;

            let outcome = self.run_row(&prompt).await;
            match &outcome {
                RowOutcome::Reply(_) => {
                    summary.succeeded += 1;
                    info!(line, id = %id, "reply generated");
                }
                RowOutcome::Failed(err) => {
                    summary.failed += 1;
                    error!(line, id = %id, error = %err, "failed to generate reply");
                }
                RowOutcome::TimedOut => {
                    summary.failed += 1;
                    error!(line, id = %id, timeout_secs = self.row_timeout.as_secs(), "row timed out");
                }
            }

            fields[RESULT_COLUMN] = outcome.into_result();
            writer.write_record(&fields)?;
        }

        writer.flush().context("Failed to write CSV output")?;
        Ok(summary)
    }

    /// File-to-file wrapper around [`BatchProcessor::process_csv`].
    ///
    /// The output file is only created once the input has been read.
    pub async fn process_csv_file(
        &self,
        input_path: impl AsRef<Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<BatchSummary> {
        let input_path = input_path.as_ref();
        let output_path = output_path.as_ref();

        let mut content = Vec::new();
        File::open(input_path)
            .and_then(|mut file| file.read_to_end(&mut content))
            .with_context(|| format!("Failed to open CSV file: {}", input_path.display()))?;

        let mut buffer = Vec::new();
        let summary = self.process_csv(content.as_slice(), &mut buffer).await?;

        if !buffer.is_empty() {
            std::fs::write(output_path, buffer).with_context(|| {
                format!("Failed to write CSV output: {}", output_path.display())
            })?;
            info!(output = %output_path.display(), "batch complete");
        }
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{BackendKind, LLMError, LLMResponse};
    use async_trait::async_trait;

    struct EchoClient;

    #[async_trait]
    impl LLMClient for EchoClient {
        async fn generate(&self, prompt: &str) -> Result<LLMResponse, LLMError> {
            Ok(LLMResponse::new(format!("echo: {prompt}"), "echo"))
        }

        fn backend_kind(&self) -> BackendKind {
            BackendKind::OpenAI
        }

        fn model_id(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn blank_global_prompt_means_row_templates() {
        let processor = BatchProcessor::new(&EchoClient, Some("  "), Duration::from_secs(1)).unwrap();
        assert_eq!(
            processor.build_prompt("apples", "Summarize {{.Content}}"),
            "Summarize apples"
        );
    }

    #[test]
    fn global_template_parse_error_is_fatal() {
        let result = BatchProcessor::new(&EchoClient, Some("{{.Content"), Duration::from_secs(1));
        assert!(result.is_err());
    }

    #[test]
    fn broken_row_template_falls_back_to_raw_prompt() {
        let processor = BatchProcessor::new(&EchoClient, None, Duration::from_secs(1)).unwrap();
        assert_eq!(processor.build_prompt("x", "{{.Missing}}"), "{{.Missing}}");
        assert_eq!(processor.build_prompt("x", "{{ if }}"), "{{ if }}");
    }

    #[tokio::test]
    async fn header_needs_four_columns() {
        let processor = BatchProcessor::new(&EchoClient, None, Duration::from_secs(1)).unwrap();
        let mut out = Vec::new();
        let err = processor
            .process_csv("id,content,prompt\n1,a,b\n".as_bytes(), &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("expected at least"));
    }

    #[tokio::test]
    async fn empty_input_writes_nothing() {
        let processor = BatchProcessor::new(&EchoClient, None, Duration::from_secs(1)).unwrap();
        let mut out = Vec::new();
        let summary = processor.process_csv("".as_bytes(), &mut out).await.unwrap();
        assert_eq!(summary, BatchSummary::default());
        assert!(out.is_empty());
    }
}
