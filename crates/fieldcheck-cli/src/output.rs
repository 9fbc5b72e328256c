//! Output formatting and writing utilities
//!
//! This module formats run reports, schema summaries and the type catalogue
//! as JSON, YAML or human-readable text, and drives progress indicators.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use fieldcheck_core::{BatchReport, CompiledSchema, ConstraintSpec, FieldType};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;
use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Result of validating every input file against one schema
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub schema: String,
    pub generated_at: String,
    pub files: Vec<FileReport>,
}

/// Batch outcome for one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    #[serde(flatten)]
    pub report: BatchReport,
    /// Redacted copies of the invalid records, when requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub echoed: Vec<EchoedRecord>,
}

/// An invalid record echoed back to the user
#[derive(Debug, Clone, Serialize)]
pub struct EchoedRecord {
    pub index: usize,
    pub record: Value,
}

impl RunReport {
    /// Create a report stamped with the current time
    pub fn new(schema: impl Into<String>, files: Vec<FileReport>) -> Self {
        Self {
            schema: schema.into(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            files,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.files.iter().all(|f| f.report.is_valid())
    }

    pub fn checked_count(&self) -> usize {
        self.files.iter().map(|f| f.report.checked).sum()
    }

    pub fn invalid_count(&self) -> usize {
        self.files.iter().map(|f| f.report.invalid.len()).sum()
    }

    pub fn error_count(&self) -> usize {
        self.files.iter().map(|f| f.report.error_count()).sum()
    }
}

/// Compiled view of a schema, as reported by `check`
#[derive(Debug, Clone, Serialize)]
pub struct SchemaSummary {
    pub path: String,
    pub fields: Vec<FieldSummary>,
}

/// One compiled field pipeline
#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    pub steps: Vec<String>,
}

impl SchemaSummary {
    pub fn from_schema(path: impl Into<String>, schema: &CompiledSchema) -> Self {
        let fields = schema
            .fields()
            .map(|(name, pipeline)| FieldSummary {
                name: name.to_string(),
                field_type: pipeline.field_type(),
                required: pipeline.is_required(),
                steps: pipeline.step_names().into_iter().map(String::from).collect(),
            })
            .collect();
        Self {
            path: path.into(),
            fields,
        }
    }
}

/// A field type and the constraints it accepts
#[derive(Debug, Clone, Serialize)]
pub struct TypeSummary {
    pub name: &'static str,
    pub constraints: &'static [ConstraintSpec],
}

impl From<FieldType> for TypeSummary {
    fn from(field_type: FieldType) -> Self {
        Self {
            name: field_type.name(),
            constraints: field_type.constraints(),
        }
    }
}

/// Formatting of the CLI's report types in every output format
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format the outcome of a validation run
    fn format_run_report(&self, report: &RunReport) -> Result<String>;

    /// Format a compiled schema summary
    fn format_schema_summary(&self, summary: &SchemaSummary, detailed: bool) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_run_report(&self, report: &RunReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_run_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_schema_summary(&self, summary: &SchemaSummary, detailed: bool) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_schema_summary_human(summary, detailed)),
            _ => self.format(summary),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a writer on stdout. Progress bars need both the config switch
    /// and an interactive terminal.
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message (human format only)
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message (human format only)
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&format!("{} {}", "✓".green(), message.green()))
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message (human format only, shown even when quiet)
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }
        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }
        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        if tracing::enabled!(tracing::Level::TRACE) {
            let mut redacted = serde_json::to_value(value)?;
            redaction::redact_json_value(&mut redacted);
            trace!(data = %redacted, "Outputting data");
        }

        let formatted = self.format.format(value)?;
        self.emit(&formatted)
    }

    /// Write a validation run report
    pub fn run_report(&mut self, report: &RunReport) -> Result<()> {
        let formatted = self.format.format_run_report(report)?;
        self.emit(&formatted)
    }

    /// Write a compiled schema summary
    pub fn schema_summary(&mut self, summary: &SchemaSummary, detailed: bool) -> Result<()> {
        let formatted = self.format.format_schema_summary(summary, detailed)?;
        self.emit(&formatted)
    }

    // YAML already ends with a newline
    fn emit(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }

    /// Write a table (human format only)
    pub fn table(&mut self, headers: &[&str], rows: Vec<Vec<String>>) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        let mut widths = headers.iter().map(|h| h.chars().count()).collect::<Vec<_>>();
        for row in &rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let header_row = join_cells(headers.iter().copied(), &widths);
        if self.use_color {
            self.writeln(&header_row.bold().to_string())?;
        } else {
            self.writeln(&header_row)?;
        }

        let separator = widths.iter().map(|w| "─".repeat(*w)).collect::<Vec<_>>().join("─┼─");
        self.writeln(&separator)?;

        for row in &rows {
            let line = join_cells(row.iter().map(String::as_str), &widths);
            self.writeln(line.trim_end())?;
        }

        Ok(())
    }
}

fn join_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .enumerate()
        .map(|(i, cell)| match widths.get(i) {
            Some(width) => format!("{:width$}", cell, width = width),
            None => cell.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" │ ")
}

/// Progress bar style used while validating input files
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

/// Format a run report for human reading
fn format_run_report_human(report: &RunReport) -> String {
    let mut output = String::new();

    output.push_str("═══ Validation Report ═══\n\n");
    output.push_str(&format!("Schema: {}\n", report.schema));
    output.push_str(&format!("Generated: {}\n", report.generated_at));

    for file in &report.files {
        let batch = &file.report;
        output.push('\n');
        if batch.is_valid() {
            output.push_str(&format!("✅ {}: {} record(s) valid\n", file.path, batch.checked));
        } else {
            output.push_str(&format!(
                "❌ {}: {} of {} record(s) invalid\n",
                file.path,
                batch.invalid.len(),
                batch.checked
            ));
        }

        for record in &batch.invalid {
            output.push_str(&format!("  Record {}:\n", record.index));
            for (i, error) in record.errors.iter().enumerate() {
                output.push_str(&format!("    {}. {}: {}\n", i + 1, error.field, error.error));
            }
            if let Some(echo) = file.echoed.iter().find(|e| e.index == record.index) {
                output.push_str(&format!("    Input: {}\n", format_value_compact(&echo.record)));
            }
        }

        if batch.truncated {
            output.push_str(&format!(
                "  ⚠️ Stopped after {} of {} record(s)\n",
                batch.checked, batch.total
            ));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "Summary: {} record(s) checked in {} file(s), {} invalid, {} field error(s)\n",
        report.checked_count(),
        report.files.len(),
        report.invalid_count(),
        report.error_count()
    ));

    output
}

/// Format a schema summary for human reading
fn format_schema_summary_human(summary: &SchemaSummary, detailed: bool) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "✅ {}: {} field(s) compiled\n",
        summary.path,
        summary.fields.len()
    ));

    if detailed {
        for field in &summary.fields {
            output.push_str(&format!(
                "  • {} ({}): {}\n",
                field.name,
                field.field_type,
                field.steps.join(" → ")
            ));
        }
    }

    output
}

/// Format a JSON value in a compact, human-readable way
fn format_value_compact(value: &Value) -> String {
    match value {
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) if arr.len() <= 3 => format!(
            "[{}]",
            arr.iter().map(format_value_compact).collect::<Vec<_>>().join(", ")
        ),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) if obj.len() <= 4 => {
            let items: Vec<String> = obj
                .iter()
                .map(|(k, v)| format!("{}: {}", k, format_value_compact(v)))
                .collect();
            format!("{{{}}}", items.join(", "))
        }
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
        other => other.to_string(),
    }
}
