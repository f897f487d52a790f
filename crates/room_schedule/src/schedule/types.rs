/// Types for lesson schedule data
use std::fmt;

/// Colour of a lesson's type tag when no classifier rule applied.
pub const UNCLASSIFIED_COLOR: Rgb = Rgb(0xCCCCCC);

/// A 24-bit RGB colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Returns the raw `0xRRGGBB` value.
    pub fn value(self) -> u32 {
        self.0 & 0xFF_FFFF
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.value())
    }
}

/// A time of day with minute resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// Midnight, used for lessons whose window could not be parsed.
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    /// Creates a time of day, or `None` if the hour or minute is out of range.
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour <= 23 && minute <= 59).then_some(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> i32 {
        i32::from(self.hour) * 60 + i32::from(self.minute)
    }
}

impl<T: chrono::Timelike> From<&T> for ClockTime {
    fn from(time: &T) -> Self {
        // chrono guarantees hour < 24 and minute < 60
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// One scheduled lesson, normalized from the upstream record.
///
/// Records are immutable once built. `Default` yields the zero-valued
/// sentinel handed out for out-of-range lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LessonRecord {
    kind: String,
    subject: String,
    teacher: String,
    groups: String,
    color: Rgb,
    start: ClockTime,
    end: ClockTime,
}

impl LessonRecord {
    pub fn new(
        kind: impl Into<String>,
        subject: impl Into<String>,
        teacher: impl Into<String>,
        groups: impl Into<String>,
        color: Rgb,
        start: ClockTime,
        end: ClockTime,
    ) -> Self {
        Self {
            kind: kind.into(),
            subject: subject.into(),
            teacher: teacher.into(),
            groups: groups.into(),
            color,
            start,
            end,
        }
    }

    /// A degraded record for an upstream element that could not be read:
    /// every string empty, unclassified colour, `00:00-00:00`.
    pub fn blank() -> Self {
        Self {
            color: UNCLASSIFIED_COLOR,
            ..Self::default()
        }
    }

    /// Display label of the lesson type (e.g. "Лекции").
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn teacher(&self) -> &str {
        &self.teacher
    }

    pub fn groups(&self) -> &str {
        &self.groups
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn start(&self) -> ClockTime {
        self.start
    }

    pub fn end(&self) -> ClockTime {
        self.end
    }
}
