//! Check command handler

use super::utils::load_validator;
use crate::cli::CheckArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, SchemaSummary};
use tracing::instrument;

/// Handle the check command: compile the schema and report its fields
#[instrument(skip_all, fields(schema = %args.schema.display()))]
pub async fn handle_check(args: CheckArgs, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("check_command", &format!("schema: {}", args.schema.display()));
    output.info(&format!("Checking schema: {}", args.schema.display()))?;

    let validator = load_validator(&args.schema).await?;
    let summary = SchemaSummary::from_schema(args.schema.display().to_string(), validator.schema());
    output.schema_summary(&summary, args.detailed)
}
