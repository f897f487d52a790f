//! Single-slot, date-keyed cache of a room's lessons.

use super::client::ScheduleSource;
use super::error::CacheError;
use super::types::LessonRecord;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The one cached day.
#[derive(Debug, Default)]
struct CacheSlot {
    room_id: Option<String>,
    /// Date of the last successful fetch; `None` means nothing is cached
    date: Option<NaiveDate>,
    lessons: Vec<LessonRecord>,
}

/// Holds the most recently fetched day's lessons for the active room.
///
/// The slot is keyed by calendar date only. Changing the room does not by
/// itself invalidate it; call [`ScheduleCache::invalidate`] for that.
///
/// All state sits behind one async mutex that is held across the fetch, so
/// there is never more than one fetch in flight.
pub struct ScheduleCache<S> {
    source: S,
    slot: Mutex<CacheSlot>,
}

impl<S: ScheduleSource> ScheduleCache<S> {
    /// Creates an empty cache with no room selected.
    pub fn new(source: S) -> Self {
        Self {
            source,
            slot: Mutex::new(CacheSlot::default()),
        }
    }

    /// Creates an empty cache for the given room.
    pub fn with_room(source: S, room_id: impl Into<String>) -> Self {
        Self {
            source,
            slot: Mutex::new(CacheSlot {
                room_id: Some(room_id.into()),
                ..CacheSlot::default()
            }),
        }
    }

    /// Returns the schedule source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Replaces the active room. Cached lessons are left in place.
    pub async fn set_room(&self, room_id: impl Into<String>) {
        let room_id = room_id.into();
        let mut slot = self.slot.lock().await;
        info!(room_id = %room_id, "Room selected");
        slot.room_id = Some(room_id);
    }

    /// Returns the active room, if any.
    pub async fn room(&self) -> Option<String> {
        self.slot.lock().await.room_id.clone()
    }

    /// Drops the cached day so the next date query fetches again.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        slot.date = None;
        slot.lessons = Vec::new();
    }

    /// Number of lessons on `date`, fetching if `date` is not the cached day.
    ///
    /// Any failure is logged and reported as zero lessons, so callers cannot
    /// tell an empty day from a failed fetch. Use
    /// [`ScheduleCache::try_lesson_count`] to see the error.
    pub async fn lesson_count(&self, date: NaiveDate) -> usize {
        match self.try_lesson_count(date).await {
            Ok(count) => count,
            Err(CacheError::NoRoom) => 0,
            Err(e) => {
                warn!(date = %date, error = %e, "Schedule unavailable, showing no lessons");
                0
            }
        }
    }

    /// Like [`ScheduleCache::lesson_count`], but surfaces the failure.
    ///
    /// After a failed fetch the slot is left empty and unmarked, so the next
    /// query for any date tries again.
    pub async fn try_lesson_count(&self, date: NaiveDate) -> Result<usize, CacheError> {
        let mut slot = self.slot.lock().await;

        let Some(room_id) = slot.room_id.clone() else {
            return Err(CacheError::NoRoom);
        };

        if slot.date == Some(date) {
            debug!(date = %date, count = slot.lessons.len(), "Schedule cache hit");
            return Ok(slot.lessons.len());
        }

        // Release the old day before asking for the new one
        slot.date = None;
        slot.lessons = Vec::new();

        let lessons = self.source.fetch(&room_id, date).await?;

        info!(room_id = %room_id, date = %date, count = lessons.len(), "Schedule cache refreshed");
        slot.date = Some(date);
        slot.lessons = lessons;

        Ok(slot.lessons.len())
    }

    /// Lesson `index` of the currently cached day, without a date check.
    ///
    /// Out-of-range indices yield the zero-valued sentinel record.
    pub async fn lesson(&self, index: usize) -> LessonRecord {
        self.slot
            .lock()
            .await
            .lessons
            .get(index)
            .cloned()
            .unwrap_or_default()
    }

    /// Lesson `index` on `date`, refreshing the cache first if needed.
    pub async fn lesson_for_date(&self, date: NaiveDate, index: usize) -> LessonRecord {
        let count = self.lesson_count(date).await;
        if index >= count {
            return LessonRecord::default();
        }
        self.lesson(index).await
    }

    /// Snapshot of every lesson of the cached day.
    pub async fn lessons(&self) -> Vec<LessonRecord> {
        self.slot.lock().await.lessons.clone()
    }

    /// The cached day, if a fetch has succeeded since the last invalidation.
    pub async fn cached_date(&self) -> Option<NaiveDate> {
        self.slot.lock().await.date
    }
}
