//! Lesson progress derived from the wall clock.

use crate::schedule::{ClockTime, LessonRecord};
use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

/// Where a displayed date sits relative to today, ignoring time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRelation {
    Past,
    Today,
    Future,
}

impl DateRelation {
    /// Compares `date` against `today` by (year, month, day).
    pub fn between(date: NaiveDate, today: NaiveDate) -> Self {
        match date.cmp(&today) {
            Ordering::Less => DateRelation::Past,
            Ordering::Equal => DateRelation::Today,
            Ordering::Greater => DateRelation::Future,
        }
    }
}

/// Completion of a lesson in percent, `0..=100`.
///
/// Past days are complete and future days untouched. On the current day a
/// lesson is complete once `now` is past its end and at zero before its
/// start; in between the value is floored. A window whose end is not after
/// its start counts as complete.
pub fn progress(now: ClockTime, start: ClockTime, end: ClockTime, relation: DateRelation) -> u8 {
    match relation {
        DateRelation::Past => 100,
        DateRelation::Future => 0,
        DateRelation::Today => {
            let s = start.minutes_since_midnight();
            let e = end.minutes_since_midnight();
            let n = now.minutes_since_midnight();

            if e <= s || n > e {
                100
            } else if n >= s {
                // 0 <= n - s <= e - s, so the quotient is within 0..=100
                ((n - s) * 100 / (e - s)) as u8
            } else {
                0
            }
        }
    }
}

impl LessonRecord {
    /// Progress of this lesson, held on `date`, as seen at `now`.
    pub fn progress_at(&self, date: NaiveDate, now: NaiveDateTime) -> u8 {
        let relation = DateRelation::between(date, now.date());
        progress(ClockTime::from(&now), self.start(), self.end(), relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn t(h: u8, m: u8) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_progress_midway() {
        // floor(45 * 100 / 90)
        assert_eq!(progress(t(9, 45), t(9, 0), t(10, 30), DateRelation::Today), 50);
        assert_eq!(progress(t(9, 1), t(9, 0), t(10, 30), DateRelation::Today), 1);
    }

    #[test]
    fn test_progress_bounds() {
        assert_eq!(progress(t(8, 59), t(9, 0), t(10, 30), DateRelation::Today), 0);
        assert_eq!(progress(t(9, 0), t(9, 0), t(10, 30), DateRelation::Today), 0);
        assert_eq!(progress(t(10, 30), t(9, 0), t(10, 30), DateRelation::Today), 100);
        assert_eq!(progress(t(10, 31), t(9, 0), t(10, 30), DateRelation::Today), 100);
    }

    #[test]
    fn test_progress_degenerate_window() {
        assert_eq!(progress(t(11, 0), t(9, 0), t(9, 0), DateRelation::Today), 100);
        assert_eq!(progress(t(9, 0), t(9, 0), t(9, 0), DateRelation::Today), 100);
        // inverted window
        assert_eq!(progress(t(8, 0), t(12, 0), t(11, 0), DateRelation::Today), 100);
    }

    #[test]
    fn test_progress_ignores_times_off_today() {
        assert_eq!(progress(t(0, 0), t(9, 0), t(10, 30), DateRelation::Past), 100);
        assert_eq!(progress(t(23, 59), t(9, 0), t(10, 30), DateRelation::Future), 0);
        assert_eq!(progress(t(9, 45), t(9, 0), t(9, 0), DateRelation::Future), 0);
    }

    #[test]
    fn test_date_relation() {
        let today = date(2024, 9, 2);
        assert_eq!(DateRelation::between(date(2024, 9, 1), today), DateRelation::Past);
        assert_eq!(DateRelation::between(date(2023, 12, 31), today), DateRelation::Past);
        assert_eq!(DateRelation::between(today, today), DateRelation::Today);
        assert_eq!(DateRelation::between(date(2024, 10, 1), today), DateRelation::Future);
    }

    #[test]
    fn test_lesson_progress_at() {
        let lesson = LessonRecord::new(
            "Лекции",
            "Физика",
            "Иванов И.И.",
            "ПМ-201",
            crate::schedule::Rgb(0x276093),
            t(9, 0),
            t(10, 30),
        );
        let day = date(2024, 9, 2);
        let at = |h, m| day.and_time(NaiveTime::from_hms_opt(h, m, 42).unwrap());

        assert_eq!(lesson.progress_at(day, at(9, 45)), 50);
        assert_eq!(lesson.progress_at(date(2024, 9, 1), at(9, 45)), 100);
        assert_eq!(lesson.progress_at(date(2024, 9, 3), at(9, 45)), 0);
    }
}
