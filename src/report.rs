use std::fmt::Write;

use chrono::Datelike;

use crate::models::{CalendarLayout, DayLayout, MonthLayout, PlacedAppointment};

pub fn render_markdown(layout: &CalendarLayout) -> String {
    let mut output = String::new();

    match layout {
        CalendarLayout::Day(day) => {
            let _ = writeln!(output, "# Day View");
            write_day(&mut output, day);
        }
        CalendarLayout::Week(week) => {
            let _ = writeln!(output, "# Week View");
            let _ = writeln!(output, "Week of {}", week.start);
            for day in &week.days {
                write_day(&mut output, day);
            }
        }
        CalendarLayout::Month(month) => write_month(&mut output, month),
    }

    output
}

fn write_day(output: &mut String, day: &DayLayout) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {} ({})", day.date, day.date.weekday());

    if day.appointment_count() == 0 {
        let _ = writeln!(output, "No appointments within working hours.");
        return;
    }

    for slot in day.slots.iter().filter(|slot| !slot.groups.is_empty()) {
        let _ = writeln!(output, "### {}", slot.bucket);
        for group in &slot.groups {
            for placed in &group.members {
                let _ = writeln!(output, "{}", appointment_line(placed));
            }
        }
    }
}

fn appointment_line(placed: &PlacedAppointment) -> String {
    let appointment = &placed.appointment;
    let title = appointment.title().unwrap_or("Untitled appointment");
    let mut line = format!(
        "- {}-{} {} [{}/{}]",
        appointment.start.format("%H:%M"),
        appointment.end.format("%H:%M"),
        title,
        placed.layout.index + 1,
        placed.layout.total
    );
    if let Some(status) = appointment.payload.get("status").and_then(|v| v.as_str()) {
        let _ = write!(line, " ({status})");
    }
    line
}

fn write_month(output: &mut String, month: &MonthLayout) {
    let _ = writeln!(output, "# Month View {}-{:02}", month.year, month.month);
    let _ = writeln!(output);
    let _ = writeln!(output, "| Sun | Mon | Tue | Wed | Thu | Fri | Sat |");
    let _ = writeln!(output, "|-----|-----|-----|-----|-----|-----|-----|");

    for week in month.cells.chunks(7) {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| {
                if !cell.in_month {
                    return String::new();
                }
                let mut text = format!("{}", cell.date.day());
                if cell.appointment_count > 0 {
                    let _ = write!(text, " - {} booked", cell.appointment_count);
                }
                if cell.same_time_slot_count > 0 {
                    let _ = write!(text, " (+{} overlap)", cell.same_time_slot_count);
                }
                text
            })
            .collect();
        let _ = writeln!(output, "| {} |", cells.join(" | "));
    }
}
