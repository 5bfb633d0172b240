use anyhow::{Context, Result};
use contracts_core::{ValidationContext, ValidationResponse};
use contracts_parser::{parse_file, parse_rows_file};
use contracts_validator::DataValidator;
use std::path::Path;
use tracing::info;

use super::resolve_now;
use crate::forward;
use crate::output::{self, OutputFormat};

/// Validates a rows file against a contract. Returns whether it passed.
pub async fn execute(
    contract_path: &Path,
    rows_path: &Path,
    now: Option<&str>,
    format: OutputFormat,
    forward_url: Option<&str>,
) -> Result<bool> {
    info!("Validating contract: {}", contract_path.display());

    let contract = parse_file(contract_path).with_context(|| {
        format!(
            "Failed to parse contract file: {}",
            contract_path.display()
        )
    })?;
    let rows = parse_rows_file(rows_path)
        .with_context(|| format!("Failed to parse rows file: {}", rows_path.display()))?;
    let context = ValidationContext::at(resolve_now(now)?);

    info!(rows = rows.len(), now = %context.now, "Running validation");

    let verdict = DataValidator::new().validate_with_data(&contract, &rows, &context);

    let passed = verdict.passed();

    let mut response = ValidationResponse::new(&contract, verdict);
    forward::forward_event(forward_url, &mut response.event).await;

    output::print_response(&response, format)?;

    Ok(passed)
}
