//! Input loading and boundary validation
//!
//! Everything read from disk or stdin is validated here before it reaches
//! the engine, which assumes well-formed input.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use adherence_analyzer::PatientCalls;
use adherence_core::PatientHistory;

/// Path that stands for stdin
pub const STDIN: &str = "-";

/// Read a whole file, or stdin for `-`
pub fn read_source(path: &Path) -> Result<String> {
    if path == Path::new(STDIN) {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        return Ok(buffer);
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Reject a transcript and a history that both read from stdin
pub fn ensure_single_stdin(transcript: &Path, history: Option<&Path>) -> Result<()> {
    let stdin = Path::new(STDIN);
    if transcript == stdin && history == Some(stdin) {
        bail!("--transcript and --history cannot both read from stdin");
    }
    Ok(())
}

/// Parse a JSON document from a file or stdin
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = read_source(path)?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

/// Load and validate an optional patient history
pub fn read_history(path: Option<&Path>) -> Result<Option<PatientHistory>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let content = read_source(path)?;
    let history = PatientHistory::from_json(&content)
        .with_context(|| format!("Invalid patient history in {}", path.display()))?;
    Ok(Some(history))
}

/// One patient's calls with their history
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientRiskInput {
    /// Transcripts, newest first; `null` for calls without one
    #[serde(default)]
    pub calls: Vec<Option<String>>,
    #[serde(default)]
    pub history: Option<PatientHistory>,
}

impl PatientRiskInput {
    pub fn validate(&self) -> Result<()> {
        if let Some(history) = &self.history {
            history.validate().context("Invalid patient history")?;
        }
        Ok(())
    }
}

/// Validate a screening population
pub fn validate_population(patients: &[PatientCalls]) -> Result<()> {
    for patient in patients {
        PatientHistory::new()
            .with_sdoh_risk_score(patient.sdoh_risk_score)
            .validate()
            .with_context(|| format!("Invalid patient {}", patient.patient_id))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_transcript_file() {
        let file = temp_file("the copay is too expensive");
        assert_eq!(read_source(file.path()).unwrap(), "the copay is too expensive");
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_source(Path::new("/nonexistent/transcript.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/transcript.txt"));
    }

    #[test]
    fn test_single_stdin_source() {
        let stdin = Path::new(STDIN);
        let file = Path::new("history.json");
        assert!(ensure_single_stdin(stdin, None).is_ok());
        assert!(ensure_single_stdin(stdin, Some(file)).is_ok());
        assert!(ensure_single_stdin(file, Some(stdin)).is_ok());
        assert!(ensure_single_stdin(stdin, Some(stdin)).is_err());
    }

    #[test]
    fn test_history_validation() {
        assert!(read_history(None).unwrap().is_none());

        let valid = temp_file(r#"{"prior_abandonments": 1}"#);
        let history = read_history(Some(valid.path())).unwrap().unwrap();
        assert_eq!(history.prior_abandonments, 1);

        let invalid = temp_file(r#"{"sdoh_risk_score": 140}"#);
        assert!(read_history(Some(invalid.path())).is_err());

        let negative = temp_file(r#"{"missed_appointments": -2}"#);
        assert!(read_history(Some(negative.path())).is_err());
    }

    #[test]
    fn test_patient_risk_input() {
        let file = temp_file(r#"{"calls": ["copay", null], "history": {"sdoh_risk_score": 50}}"#);
        let input: PatientRiskInput = read_json(file.path()).unwrap();
        assert_eq!(input.calls.len(), 2);
        assert!(input.calls[1].is_none());
        assert!(input.validate().is_ok());

        let bad = PatientRiskInput {
            calls: Vec::new(),
            history: Some(PatientHistory::new().with_sdoh_risk_score(101)),
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_population_validation() {
        let file = temp_file(r#"[{"patient_id": "a", "calls": ["copay"], "sdoh_risk_score": 30}]"#);
        let patients: Vec<PatientCalls> = read_json(file.path()).unwrap();
        assert!(validate_population(&patients).is_ok());

        let bad = vec![PatientCalls {
            patient_id: "b".into(),
            calls: Vec::new(),
            sdoh_risk_score: 250,
        }];
        let err = validate_population(&bad).unwrap_err();
        assert!(err.to_string().contains("Invalid patient b"));
    }
}
