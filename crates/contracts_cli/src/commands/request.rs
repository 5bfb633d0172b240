use anyhow::{Context, Result};
use contracts_core::{ValidationContext, ValidationResponse};
use contracts_parser::parse_request_file;
use contracts_validator::DataValidator;
use std::path::Path;
use tracing::info;

use super::resolve_now;
use crate::{forward, output};

/// Validates a `{contract, rows}` document and prints `{validation, event}`.
/// Returns whether the validation passed.
pub async fn execute(request_path: &Path, now: Option<&str>, forward_url: Option<&str>) -> Result<bool> {
    info!("Processing request: {}", request_path.display());

    let request = parse_request_file(request_path).with_context(|| {
        format!(
            "Failed to parse request file: {}",
            request_path.display()
        )
    })?;
    let context = ValidationContext::at(resolve_now(now)?);

    let verdict = DataValidator::new().validate_with_data(&request.contract, &request.rows, &context);
    let passed = verdict.passed();

    let mut response = ValidationResponse::new(&request.contract, verdict);
    forward::forward_event(forward_url, &mut response.event).await;

    output::print_json(&response)?;

    Ok(passed)
}
