//! Validate command handler

use super::utils::{load_validator, read_document, records_of};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::{EchoedRecord, FileReport, OutputWriter, RunReport};
use fieldcheck_core::{BatchReport, ValidationConfig};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip_all, fields(schema = %args.schema.display(), inputs = args.inputs.len()))]
pub async fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("validate_command", &format!("schema: {}", args.schema.display()));
    output.info(&format!("Compiling schema: {}", args.schema.display()))?;

    let validator = {
        let _compile_timer = Timer::new("schema_compilation");
        load_validator(&args.schema).await?
    };
    info!(fields = validator.schema().len(), "Schema compiled");

    let batch_config = batch_config(&args, &config.validation);
    debug!(?batch_config, "Effective batch settings");

    let progress = output.progress_bar(args.inputs.len() as u64, "Validating records");
    let mut files = Vec::with_capacity(args.inputs.len());

    for input in &args.inputs {
        let records = records_of(input, read_document(input).await?)?;
        let report = validator.validate_batch(&records, &batch_config);
        info!(
            input = %input.display(),
            checked = report.checked,
            invalid = report.invalid.len(),
            "Validated input"
        );

        let echoed = if args.show_input {
            echo_invalid(&records, &report)
        } else {
            Vec::new()
        };
        let stop = batch_config.fail_fast && !report.is_valid();
        files.push(FileReport {
            path: input.display().to_string(),
            report,
            echoed,
        });

        if let Some(pb) = &progress {
            pb.inc(1);
        }
        if stop {
            warn!(input = %input.display(), "Stopping at the first invalid input");
            output.warning("Stopped at the first invalid input (--fail-fast)")?;
            break;
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    info!(
        files = files.len(),
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Inputs validated"
    );

    let report = RunReport::new(args.schema.display().to_string(), files);
    output.run_report(&report)?;

    if report.is_valid() {
        output.success("All records are valid")?;
        Ok(())
    } else {
        Err(Error::ValidationFailed {
            invalid: report.invalid_count(),
            checked: report.checked_count(),
        })
    }
}

/// Command-line flags override the config file
fn batch_config(args: &ValidateArgs, defaults: &ValidationConfig) -> ValidationConfig {
    let mut config = defaults.clone();
    if args.fail_fast {
        config = config.with_fail_fast();
    }
    if let Some(max_errors) = args.max_errors {
        config = config.with_max_errors(max_errors);
    }
    config
}

fn echo_invalid(records: &[Value], report: &BatchReport) -> Vec<EchoedRecord> {
    report
        .invalid
        .iter()
        .filter_map(|invalid| {
            let mut record = records.get(invalid.index)?.clone();
            redaction::redact_json_value(&mut record);
            Some(EchoedRecord {
                index: invalid.index,
                record,
            })
        })
        .collect()
}
