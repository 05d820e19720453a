//! Offline validation and metrics

use crate::console::CliConsole;
use aula_core::validation::{DiagnosticValidator, OutcomeRecord, Profile, calculate_metrics};
use anyhow::Context;
use colored::*;
use serde_json::Value;
use std::path::Path;

pub fn validate_file(console: &CliConsole, file: &Path, profile: Profile, tier: u8) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let payload: Value = aula_core::orchestrator::parse_json_response(&raw)
        .map_err(|reason| anyhow::anyhow!("{}: {}", file.display(), reason))?;

    let result = DiagnosticValidator::new(profile, tier).validate(&payload);

    console.print_header(&format!("Validation ({}, tier {})", profile, tier));
    for error in &result.errors {
        console.error(error);
    }
    for warning in &result.warnings {
        console.warn(warning);
    }

    if result.valid {
        console.success("Question set is valid");
        Ok(())
    } else {
        anyhow::bail!("{} blocking error(s)", result.errors.len())
    }
}

pub fn show_metrics(file: &Path) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let records: Vec<OutcomeRecord> =
        serde_json::from_str(&raw).with_context(|| format!("Invalid records in {}", file.display()))?;

    let metrics = calculate_metrics(&records);
    println!("{}", "Generation metrics".bold().underline());
    println!("  Total:              {}", metrics.total);
    println!("  Approved:           {}", metrics.approved.to_string().green());
    println!("  Approved with edit: {}", metrics.approved_with_edit.to_string().yellow());
    println!("  Rejected:           {}", metrics.rejected.to_string().red());
    println!("  Approval rate:      {:.1}%", metrics.approval_rate);
    println!("  Retry rate:         {:.1}%", metrics.retry_rate);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validate_file_reports_invalid_set() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"questoes": [{{"gabarito": "D"}}]}}"#).unwrap();

        let console = CliConsole::new(false);
        assert!(validate_file(&console, file.path(), Profile::Dv, 3).is_err());
    }

    #[test]
    fn test_metrics_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"outcome": "approved"}}, {{"outcome": "rejected", "attempts": 3}}]"#).unwrap();
        assert!(show_metrics(file.path()).is_ok());
        assert!(show_metrics(Path::new("/nonexistent/records.json")).is_err());
    }
}
