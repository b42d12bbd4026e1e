use std::path::{Path, PathBuf};

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use slack_attachments::codec::{self, DecodeOptions};
use slack_attachments::error::{AttachmentError, Result};

use crate::cli::RoundtripArgs;
use crate::commands::read_input;
use crate::output::{self, truncate};

#[derive(Serialize, Debug)]
pub struct RoundTripReport {
    pub file: PathBuf,
    pub lossless: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub differences: Vec<String>,
}

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Result")]
    result: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Details")]
    details: String,
}

impl From<&RoundTripReport> for ReportRow {
    fn from(report: &RoundTripReport) -> Self {
        let result = if report.lossless {
            "ok".green().to_string()
        } else {
            "FAIL".red().bold().to_string()
        };
        let details = match (&report.error, report.differences.as_slice()) {
            (Some(error), _) => truncate(error, 70),
            (None, []) => String::new(),
            (None, differences) => differences
                .iter()
                .map(|d| truncate(d, 70))
                .collect::<Vec<_>>()
                .join("\n"),
        };
        Self {
            file: report.file.display().to_string(),
            result,
            mode: report.mode.clone().unwrap_or_else(|| "-".to_string()),
            details,
        }
    }
}

/// Round-trip a single document, turning decode failures into a report.
pub fn check(path: &Path, options: DecodeOptions) -> Result<RoundTripReport> {
    let bytes = read_input(path)?;

    let report = match codec::round_trip(&bytes, options) {
        Ok(result) => RoundTripReport {
            file: path.to_path_buf(),
            lossless: result.is_lossless(),
            mode: Some(result.attachment.content_mode().to_string()),
            error: None,
            differences: result.differences,
        },
        Err(e @ (AttachmentError::Parse(_) | AttachmentError::SchemaMismatch { .. })) => {
            RoundTripReport {
                file: path.to_path_buf(),
                lossless: false,
                mode: None,
                error: Some(e.to_string()),
                differences: Vec::new(),
            }
        }
        Err(e) => return Err(e),
    };

    debug!(file = %path.display(), lossless = report.lossless, "checked document");
    Ok(report)
}

pub fn run(args: &RoundtripArgs, options: DecodeOptions) -> Result<()> {
    let reports = args
        .files
        .iter()
        .map(|path| check(path, options))
        .collect::<Result<Vec<_>>>()?;

    output::print_table(&reports, |r| ReportRow::from(r));

    let failed = reports.iter().filter(|r| !r.lossless).count();
    if failed > 0 {
        return Err(AttachmentError::RoundTripFailed {
            failed,
            total: reports.len(),
        });
    }

    output::print_message(&format!("{} document(s) round-tripped losslessly", reports.len()));
    Ok(())
}
