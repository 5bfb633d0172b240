pub mod check;
pub mod request;
pub mod validate;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

/// Resolves the evaluation instant from an optional RFC 3339 argument.
pub fn resolve_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --now value '{raw}', expected RFC 3339")),
        None => Ok(Utc::now()),
    }
}
