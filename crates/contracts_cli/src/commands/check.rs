use anyhow::{Context, Result};
use contracts_core::{Contract, ContractValidator, LogicalType};
use contracts_parser::parse_file;
use contracts_validator::DataValidator;
use std::path::Path;
use tracing::info;

use crate::output::{self, OutputFormat};

/// Parses a contract and checks its definition. Returns whether it passed.
pub fn execute(contract_path: &Path, format: OutputFormat) -> Result<bool> {
    info!("Checking contract: {}", contract_path.display());

    let contract = parse_file(contract_path).with_context(|| {
        format!(
            "Failed to parse contract file: {}",
            contract_path.display()
        )
    })?;

    let verdict = DataValidator::new().validate_definition(&contract);

    if format == OutputFormat::Json {
        output::print_json(&verdict)?;
        return Ok(verdict.passed());
    }

    output::print_info(&format!(
        "Contract loaded: {} (owner: {})",
        display_id(&contract),
        contract.owner.as_deref().unwrap_or("N/A")
    ));

    for error in &verdict.errors {
        output::print_error(error);
    }
    for warning in &verdict.warnings {
        output::print_warning(warning);
    }
    if verdict.passed() {
        output::print_success("Contract definition is valid");
    }

    print_summary(&contract);

    Ok(verdict.passed())
}

fn display_id(contract: &Contract) -> &str {
    if contract.contract_id.is_empty() {
        "<unnamed>"
    } else {
        &contract.contract_id
    }
}

fn print_summary(contract: &Contract) {
    println!("\nContract Summary:");
    println!("  Contract ID: {}", display_id(contract));
    println!(
        "  Owner:       {}",
        contract.owner.as_deref().unwrap_or("N/A")
    );
    println!("  Columns:     {}", contract.schema.len());
    for (column, tag) in &contract.schema {
        let logical = LogicalType::from_tag(tag);
        println!("    - {column}: {tag} ({logical})");
    }

    if let Some(sla) = &contract.sla {
        println!("\nSLA:");
        if let Some(completeness) = sla.completeness_expr() {
            println!("  Completeness:   {}", completeness);
        }
        if let Some(freshness) = sla.freshness_expr() {
            println!(
                "  Freshness:      {} on '{}'",
                freshness,
                sla.freshness_field_name().unwrap_or("N/A")
            );
        }
    }
}
