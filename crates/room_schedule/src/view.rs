//! Display-independent state of the schedule screen.
//!
//! The display layer owns a [`ScheduleView`], feeds it calendar picks and
//! clock ticks, and renders whatever it holds.

use crate::progress::DateRelation;
use crate::schedule::{ClockTime, LessonRecord, ScheduleCache, ScheduleSource};
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::{debug, info};

/// Notice shown when the picked date has nothing to display.
pub const NO_LESSONS_NOTICE: &str = "Нет занятий на выбранную дату";

/// A displayed lesson with its current progress value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonRow {
    pub lesson: LessonRecord,
    pub progress: u8,
}

/// Result of asking the view to show a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The date is already on screen
    Unchanged,
    /// Nothing to show; the previous schedule stays on screen
    NoLessons,
    /// The view now shows this many lessons
    Shown(usize),
}

/// The schedule currently on screen.
#[derive(Debug, Clone, Default)]
pub struct ScheduleView {
    date: Option<NaiveDate>,
    /// Last picked date that has not been shown yet
    pending: Option<NaiveDate>,
    rows: Vec<LessonRow>,
}

impl ScheduleView {
    pub fn new() -> Self {
        Self::default()
    }

    /// The displayed date, if any schedule has been shown.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn rows(&self) -> &[LessonRow] {
        &self.rows
    }

    /// Shows the lessons of `date`, as picked from the calendar.
    pub async fn select_date<S: ScheduleSource>(
        &mut self,
        cache: &ScheduleCache<S>,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> SelectOutcome {
        if self.date == Some(date) {
            return SelectOutcome::Unchanged;
        }
        self.pending = Some(date);
        self.load(cache, date, now).await
    }

    /// Redraws the displayed date from the cache (the once-a-minute update).
    ///
    /// With nothing on screen yet, retries the last picked date, so a failed
    /// first fetch recovers once the upstream is back.
    pub async fn refresh<S: ScheduleSource>(
        &mut self,
        cache: &ScheduleCache<S>,
        now: NaiveDateTime,
    ) -> SelectOutcome {
        match self.date.or(self.pending) {
            Some(date) => self.load(cache, date, now).await,
            None => SelectOutcome::NoLessons,
        }
    }

    async fn load<S: ScheduleSource>(
        &mut self,
        cache: &ScheduleCache<S>,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> SelectOutcome {
        let count = cache.lesson_count(date).await;
        if count == 0 {
            info!(date = %date, "No lessons for selected date");
            return SelectOutcome::NoLessons;
        }

        let relation = DateRelation::between(date, now.date());
        let mut rows = Vec::with_capacity(count);
        for index in 0..count {
            let lesson = cache.lesson_for_date(date, index).await;
            let progress =
                crate::progress::progress(ClockTime::from(&now), lesson.start(), lesson.end(), relation);
            rows.push(LessonRow { lesson, progress });
        }

        debug!(date = %date, count, "Schedule view updated");
        self.date = Some(date);
        self.pending = None;
        self.rows = rows;
        SelectOutcome::Shown(count)
    }

    /// Recomputes progress values. Only the current day moves; returns
    /// whether any value changed.
    pub fn tick(&mut self, now: NaiveDateTime) -> bool {
        let Some(date) = self.date else {
            return false;
        };
        if DateRelation::between(date, now.date()) != DateRelation::Today {
            return false;
        }

        let mut changed = false;
        for row in &mut self.rows {
            let progress = row.lesson.progress_at(date, now);
            if progress != row.progress {
                row.progress = progress;
                changed = true;
            }
        }
        changed
    }
}

/// Detects minute rollover from once-a-second clock samples.
///
/// Fires on the first sample of each new minute, so a skipped `:00` second
/// still triggers exactly one update.
#[derive(Debug, Clone, Default)]
pub struct MinuteTicker {
    last: Option<(NaiveDate, u32, u32)>,
}

impl MinuteTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when `now` is in a later minute than the previous sample.
    /// The first sample only arms the ticker.
    pub fn poll(&mut self, now: NaiveDateTime) -> bool {
        let minute = (now.date(), now.hour(), now.minute());
        match self.last.replace(minute) {
            Some(previous) => previous != minute,
            None => false,
        }
    }
}
