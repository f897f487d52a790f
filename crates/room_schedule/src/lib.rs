//! Core of a classroom schedule display.
//!
//! Fetches a room's lessons for a date from the campus schedule API, keeps
//! the most recent day in a [`ScheduleCache`], and derives live progress
//! values for each lesson. A display layer drives a [`ScheduleView`] and
//! renders it; [`render`] provides a plain-text rendition.

pub mod config;
pub mod progress;
pub mod render;
pub mod schedule;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use progress::{progress, DateRelation};
pub use schedule::{
    classify, CacheError, ClockTime, FetchError, LessonRecord, Rgb, ScheduleCache, ScheduleClient,
    ScheduleClientConfig, ScheduleSource,
};
pub use view::{LessonRow, MinuteTicker, ScheduleView, SelectOutcome};
