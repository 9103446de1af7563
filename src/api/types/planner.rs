//! Download response bodies

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::domain::WeeklySchedule;
use crate::infrastructure::export::{export_filename, render_csv, render_pdf, ExportFormat};

/// CSV export returned inline as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvDownload {
    pub filename: String,
    pub content: String,
    pub mime: String,
}

impl CsvDownload {
    pub fn from_schedule(schedule: &WeeklySchedule) -> Self {
        Self {
            filename: export_filename(&schedule.student_name, ExportFormat::Csv),
            content: render_csv(schedule),
            mime: ExportFormat::Csv.mime_type().to_string(),
        }
    }
}

/// PDF export returned as base64
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfDownload {
    pub filename: String,
    pub content_base64: String,
    pub mime: String,
}

impl PdfDownload {
    pub fn from_schedule(schedule: &WeeklySchedule) -> Self {
        Self {
            filename: export_filename(&schedule.student_name, ExportFormat::Pdf),
            content_base64: STANDARD.encode(render_pdf(schedule)),
            mime: ExportFormat::Pdf.mime_type().to_string(),
        }
    }

    /// Decoded document size in bytes
    pub fn decoded_len(&self) -> usize {
        self.content_base64.len() / 4 * 3
            - self.content_base64.bytes().rev().take_while(|b| *b == b'=').count()
    }
}
