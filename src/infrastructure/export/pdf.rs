//! Minimal PDF 1.4 timetable writer
//!
//! Produces a single-font text document with the standard Type1 Helvetica
//! faces, so no font embedding is needed. Strings are restricted to
//! printable ASCII; anything else is replaced with `?`.

use crate::domain::planner::{format_hours, WeeklySchedule};

const PAGE_WIDTH: i32 = 595;
const PAGE_HEIGHT: i32 = 842;
const MARGIN: i32 = 50;
const ROW_HEIGHT: i32 = 18;
const COLUMNS: [i32; 3] = [MARGIN, 170, 470];

const TITLE_SIZE: i32 = 18;
const BODY_SIZE: i32 = 11;

/// Character limits keeping text inside its column at the fonts above
const COURSE_MAX_CHARS: usize = 48;
const TITLE_MAX_CHARS: usize = 44;
const LINE_MAX_CHARS: usize = 85;

const ELLIPSIS: &str = "...";

/// First object number used for page objects; 1-4 are catalog, page tree and fonts
const FIRST_PAGE_OBJECT: usize = 5;

/// Render the schedule as a paginated A4 timetable
pub fn render_pdf(schedule: &WeeklySchedule) -> Vec<u8> {
    let pages = layout_pages(schedule);
    assemble(&pages)
}

fn layout_pages(schedule: &WeeklySchedule) -> Vec<String> {
    let mut pages = Vec::new();
    let mut page = String::new();
    let mut y = write_header(&mut page, schedule);
    y = write_table_header(&mut page, y);

    let mut previous_day = None;
    let mut first_on_page = true;

    for (day, allocation) in schedule.rows() {
        if y < MARGIN {
            pages.push(std::mem::take(&mut page));
            y = write_table_header(&mut page, PAGE_HEIGHT - MARGIN);
            first_on_page = true;
        }

        // day label only on the first row of each day, repeated after a page break
        let day_label = if previous_day != Some(day) || first_on_page {
            day.as_str()
        } else {
            ""
        };

        text(&mut page, "F1", BODY_SIZE, COLUMNS[0], y, day_label);
        text(
            &mut page,
            "F1",
            BODY_SIZE,
            COLUMNS[1],
            y,
            &truncate(&allocation.course, COURSE_MAX_CHARS),
        );
        text(
            &mut page,
            "F1",
            BODY_SIZE,
            COLUMNS[2],
            y,
            &format_hours(allocation.hours),
        );

        previous_day = Some(day);
        first_on_page = false;
        y -= ROW_HEIGHT;
    }

    pages.push(page);
    pages
}

/// Writes the title block and returns the y position below it
fn write_header(page: &mut String, schedule: &WeeklySchedule) -> i32 {
    let mut y = PAGE_HEIGHT - MARGIN;
    text(
        page,
        "F2",
        TITLE_SIZE,
        MARGIN,
        y,
        &truncate(
            &format!("{} Study Timetable", schedule.student_name),
            TITLE_MAX_CHARS,
        ),
    );

    y -= 26;
    text(
        page,
        "F1",
        BODY_SIZE,
        MARGIN,
        y,
        &truncate(
            &format!(
                "Level: {}    Semester: {}",
                schedule.academic_level, schedule.semester
            ),
            LINE_MAX_CHARS,
        ),
    );

    y -= 16;
    text(
        page,
        "F1",
        BODY_SIZE,
        MARGIN,
        y,
        &format!(
            "Total Weekly Hours: {}",
            format_hours(schedule.total_weekly_hours)
        ),
    );

    y - 36
}

fn write_table_header(page: &mut String, y: i32) -> i32 {
    for (label, x) in ["Day", "Course", "Hours"].iter().zip(COLUMNS) {
        text(page, "F2", BODY_SIZE, x, y, label);
    }

    let rule = y - 6;
    page.push_str(&format!(
        "0.5 w {} {} m {} {} l S\n",
        MARGIN,
        rule,
        PAGE_WIDTH - MARGIN,
        rule
    ));

    y - 24
}

fn text(page: &mut String, font: &str, size: i32, x: i32, y: i32, value: &str) {
    if value.is_empty() {
        return;
    }
    page.push_str(&format!(
        "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
        font,
        size,
        x,
        y,
        escape(value)
    ));
}

/// Shorten to at most `max` characters, ending in an ellipsis when cut
fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(ELLIPSIS.len())).collect();
    format!("{}{}", kept.trim_end(), ELLIPSIS)
}

/// Escape a PDF literal string
fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

fn assemble(pages: &[String]) -> Vec<u8> {
    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", FIRST_PAGE_OBJECT + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold >>".to_string(),
    ];

    for (i, content) in pages.iter().enumerate() {
        let content_object = FIRST_PAGE_OBJECT + 2 * i + 1;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH, PAGE_HEIGHT, content_object
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());

    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = out.len();
    out.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    out.push_str("0000000000 65535 f \n");
    for offset in offsets {
        out.push_str(&format!("{:010} 00000 n \n", offset));
    }

    out.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::planner::{generate, Course, PlannerSettings, StudentProfile};

    fn schedule_with(name: &str, courses: &[Course]) -> WeeklySchedule {
        let profile = StudentProfile {
            student_name: name.to_string(),
            academic_level: "200L".to_string(),
            semester: "First".to_string(),
            avg_hours_per_day: 4.0,
        };
        generate(&profile, courses, &PlannerSettings::default()).unwrap()
    }

    fn reference_schedule() -> WeeklySchedule {
        schedule_with(
            "Ada",
            &[Course::new("Math", 3, 2), Course::new("Physics", 2, 4)],
        )
    }

    fn as_text(bytes: &[u8]) -> &str {
        std::str::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_document_framing() {
        let pdf = render_pdf(&reference_schedule());
        let text = as_text(&pdf);

        assert!(text.starts_with("%PDF-1.4\n"));
        assert!(text.ends_with("%%EOF\n"));
        assert!(text.contains("(Ada Study Timetable)"));
        assert!(text.contains("(Level: 200L    Semester: First)"));
        assert!(text.contains("(Total Weekly Hours: 28.0)"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let pdf = render_pdf(&reference_schedule());
        let text = as_text(&pdf);

        let startxref = text.rfind("startxref\n").unwrap();
        let xref_offset: usize = text[startxref + "startxref\n".len()..]
            .lines()
            .next()
            .unwrap()
            .parse()
            .unwrap();
        assert!(text[xref_offset..].starts_with("xref\n"));

        let entries: Vec<usize> = text[xref_offset..]
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().unwrap())
            .collect();

        assert!(!entries.is_empty());
        for (i, offset) in entries.iter().enumerate() {
            let header = format!("{} 0 obj\n", i + 1);
            assert!(text[*offset..].starts_with(&header), "object {}", i + 1);
        }
    }

    #[test]
    fn test_day_label_only_on_first_row() {
        let pdf = render_pdf(&reference_schedule());
        let text = as_text(&pdf);

        assert_eq!(text.matches("(Monday)").count(), 1);
        assert_eq!(text.matches("(Sunday)").count(), 1);
        assert_eq!(text.matches("(Math)").count(), 7);
        assert_eq!(text.matches("(Physics)").count(), 7);
    }

    #[test]
    fn test_long_schedules_paginate() {
        let courses: Vec<Course> = (0..20)
            .map(|i| Course::new(format!("Course {}", i), 2, 3))
            .collect();
        let pdf = render_pdf(&schedule_with("Ada", &courses));
        let text = as_text(&pdf);

        assert!(!text.contains("/Count 1 "));
        assert!(text.matches("/Type /Page ").count() > 1);
        assert!(text.matches("(Course)").count() > 1);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Math", 10), "Math");
        assert_eq!(truncate("0123456789", 10), "0123456789");
        assert_eq!(truncate("Linear Algebra", 10), "Linear...");
        assert_eq!(truncate("Zoë Zoë Zoë", 8), "Zoë Z...");
    }

    #[test]
    fn test_long_names_are_truncated() {
        let long_course = "Advanced Topics in Computational Fluid Dynamics and Turbulence";
        let long_name = "Bartholomew Alexander Montgomery-Fitzwilliam III";
        let pdf = render_pdf(&schedule_with(long_name, &[Course::new(long_course, 3, 2)]));
        let text = as_text(&pdf);

        assert!(!text.contains(long_course));
        assert!(!text.contains(long_name));

        for line in text.lines().filter(|l| l.contains(" Tj ET")) {
            let start = line.find('(').unwrap() + 1;
            let end = line.rfind(") Tj").unwrap();
            let shown = &line[start..end];
            if line.contains("/F2 18 Tf") {
                assert!(shown.len() <= TITLE_MAX_CHARS, "{}", shown);
            } else {
                assert!(shown.len() <= LINE_MAX_CHARS, "{}", shown);
            }
        }

        let course_cell = truncate(long_course, COURSE_MAX_CHARS);
        assert!(course_cell.ends_with("..."));
        assert_eq!(text.matches(&format!("({})", course_cell)).count(), 7);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a(b)\\c"), "a\\(b\\)\\\\c");
        assert_eq!(escape("Zoë"), "Zo?");
    }

    #[test]
    fn test_stream_length_matches_content() {
        let pdf = render_pdf(&reference_schedule());
        let text = as_text(&pdf);

        let length_at = text.find("/Length ").unwrap() + "/Length ".len();
        let length: usize = text[length_at..]
            .split_whitespace()
            .next()
            .unwrap()
            .parse()
            .unwrap();

        let stream_start = text[length_at..].find("stream\n").unwrap() + length_at + 7;
        assert!(text[stream_start + length..].starts_with("endstream"));
    }
}
