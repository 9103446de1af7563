//! Download filenames derived from the student name

use once_cell::sync::Lazy;
use regex::Regex;

use super::ExportFormat;

/// Characters that are not safe in a download filename
static UNSAFE_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z0-9_-]").unwrap());

/// Fallback stem when nothing usable is left of the name
pub const FALLBACK_STEM: &str = "student";

/// Replace every unsafe character with `_`
pub fn sanitize_filename(name: &str) -> String {
    let cleaned = UNSAFE_CHARS.replace_all(name.trim(), "_");
    if cleaned.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        cleaned.into_owned()
    }
}

/// `<name>_schedule.<ext>` for the given export format
pub fn export_filename(student_name: &str, format: ExportFormat) -> String {
    format!(
        "{}_schedule.{}",
        sanitize_filename(student_name),
        format.extension()
    )
}
