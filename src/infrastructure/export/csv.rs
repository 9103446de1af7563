//! CSV rendering of a weekly schedule

use crate::domain::planner::{format_hours, WeeklySchedule};

const HEADER: [&str; 3] = ["Day", "Course", "Hours"];
const LINE_END: &str = "\r\n";

/// Render `Day,Course,Hours` rows in schedule order
pub fn render_csv(schedule: &WeeklySchedule) -> String {
    let mut out = String::new();
    write_record(&mut out, &HEADER);

    for (day, allocation) in schedule.rows() {
        let hours = format_hours(allocation.hours);
        write_record(
            &mut out,
            &[day.as_str(), allocation.course.as_str(), hours.as_str()],
        );
    }

    out
}

fn write_record(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, field);
    }
    out.push_str(LINE_END);
}

fn push_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
