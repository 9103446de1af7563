//! Schedule export to downloadable documents

mod csv;
mod filename;
mod pdf;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::WeeklySchedule;

pub use csv::render_csv;
pub use filename::{export_filename, sanitize_filename, FALLBACK_STEM};
pub use pdf::render_pdf;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A rendered schedule ready for download
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Render a schedule in the requested format
pub fn export_schedule(schedule: &WeeklySchedule, format: ExportFormat) -> ExportedFile {
    let bytes = match format {
        ExportFormat::Csv => render_csv(schedule).into_bytes(),
        ExportFormat::Pdf => render_pdf(schedule),
    };

    ExportedFile {
        filename: export_filename(&schedule.student_name, format),
        mime_type: format.mime_type(),
        bytes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::repository::tests::create_test_schedule;

    #[test]
    fn test_format_metadata() {
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(ExportFormat::Pdf.mime_type(), "application/pdf");
        assert_eq!(ExportFormat::Pdf.to_string(), "pdf");
    }

    #[test]
    fn test_export_csv() {
        let file = export_schedule(&create_test_schedule("Ada Lovelace"), ExportFormat::Csv);

        assert_eq!(file.filename, "Ada_Lovelace_schedule.csv");
        assert_eq!(file.mime_type, "text/csv");
        assert!(file.bytes.starts_with(b"Day,Course,Hours\r\n"));
    }

    #[test]
    fn test_export_pdf() {
        let file = export_schedule(&create_test_schedule("Ada"), ExportFormat::Pdf);

        assert_eq!(file.filename, "Ada_schedule.pdf");
        assert_eq!(file.mime_type, "application/pdf");
        assert!(file.bytes.starts_with(b"%PDF-1.4"));
    }
}
