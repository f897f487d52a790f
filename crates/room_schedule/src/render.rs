//! Plain-text rendering of the schedule screen, for terminals and logs.

use crate::view::{LessonRow, ScheduleView};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use std::fmt::Write;

/// Label shown before any schedule has been displayed.
pub const NO_SCHEDULE_LABEL: &str = "Расписание отсутствует";

const BAR_WIDTH: usize = 20;

const MONTHS: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Понедельник",
        Weekday::Tue => "Вторник",
        Weekday::Wed => "Среда",
        Weekday::Thu => "Четверг",
        Weekday::Fri => "Пятница",
        Weekday::Sat => "Суббота",
        Weekday::Sun => "Воскресенье",
    }
}

/// `"Понедельник, 19 октября 2026"`.
pub fn date_label(date: NaiveDate) -> String {
    format!(
        "{}, {} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `"HH:MM"` of the current time.
pub fn clock_label(now: NaiveDateTime) -> String {
    format!("{:02}:{:02}", now.hour(), now.minute())
}

/// A fixed-width bar such as `[##########----------]`.
pub fn progress_bar(progress: u8) -> String {
    let filled = usize::from(progress.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Renders one lesson block.
pub fn lesson_block(row: &LessonRow) -> String {
    let lesson = &row.lesson;
    let mut out = String::new();

    // writing to a String cannot fail
    let _ = writeln!(out, "[{}] {}", lesson.color(), lesson.kind());
    let _ = writeln!(out, "{}", lesson.subject());
    let _ = writeln!(out, "{}  |  {}", lesson.teacher(), lesson.groups());
    let _ = writeln!(
        out,
        "{} {} {} {:>3}%",
        lesson.start(),
        progress_bar(row.progress),
        lesson.end(),
        row.progress
    );
    out
}

/// Renders the whole screen: clock, date header and every lesson block.
pub fn screen(view: &ScheduleView, now: NaiveDateTime) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  {}", clock_label(now), date_label(now.date()));

    match view.date() {
        Some(date) => {
            let _ = writeln!(out, "== {} ==", date_label(date));
            for row in view.rows() {
                out.push('\n');
                out.push_str(&lesson_block(row));
            }
        }
        None => {
            let _ = writeln!(out, "== {} ==", NO_SCHEDULE_LABEL);
        }
    }
    out
}
