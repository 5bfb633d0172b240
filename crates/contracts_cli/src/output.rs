use anyhow::Result;
use colored::*;
use contracts_core::{ValidationEvent, ValidationResponse, Verdict};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Prints a validation report. JSON carries both the verdict and its event.
pub fn print_response(response: &ValidationResponse, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(response),
        OutputFormat::Text => {
            print_text_verdict(&response.validation, &response.event);
            Ok(())
        }
    }
}

fn print_text_verdict(verdict: &Verdict, event: &ValidationEvent) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if verdict.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !verdict.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in verdict.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.red());
        }
    }

    if !verdict.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for (i, warning) in verdict.warnings.iter().enumerate() {
            println!("  {}. {}", i + 1, warning.yellow());
        }
    }

    if !verdict.violations.is_empty() {
        println!("\n{}", "SLA Violations:".red().bold());
        for violation in &verdict.violations {
            println!(
                "  - {}: actual {}, expected {}",
                violation.dimension().bold(),
                violation.actual_display(),
                violation.expected()
            );
        }
    }

    if let Some(forwarded) = &event.forwarded {
        let rendered = serde_json::to_string(forwarded).unwrap_or_default();
        println!("\n{} {}", "Event forwarded:".bold(), rendered);
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total errors:     {}", verdict.errors.len());
    println!("  Total warnings:   {}", verdict.warnings.len());
    println!("  Total violations: {}", verdict.violations.len());
    println!("{}", "═".repeat(60));
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    println!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message.yellow());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
