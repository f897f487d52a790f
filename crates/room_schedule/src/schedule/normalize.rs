//! Normalization of upstream schedule JSON into lesson records.

use super::classifier::classify;
use super::error::{FetchError, MalformedElement};
use super::period::parse_period;
use super::types::{LessonRecord, UNCLASSIFIED_COLOR};
use serde_json::Value;
use tracing::{debug, warn};

/// Outcome of normalizing one upstream element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// Placeholder row for a free period; not part of the schedule
    Skipped,
    /// A complete record
    Lesson(LessonRecord),
    /// The element could not be read; a blank record stands in for it
    Degraded(MalformedElement),
}

impl Normalized {
    /// The record to emit for this element, if any.
    pub fn into_record(self) -> Option<LessonRecord> {
        match self {
            Normalized::Skipped => None,
            Normalized::Lesson(lesson) => Some(lesson),
            Normalized::Degraded(_) => Some(LessonRecord::blank()),
        }
    }
}

/// Parses a response body and normalizes every element, in upstream order.
///
/// Fails only if the body is not a JSON array or memory for the list cannot
/// be reserved. Individual elements never abort the parse.
pub fn parse_schedule_body(body: &[u8]) -> Result<Vec<LessonRecord>, FetchError> {
    let json: Value = serde_json::from_slice(body)?;

    let Value::Array(items) = json else {
        return Err(FetchError::BadResponse {
            message: "JSON response is not an array".to_string(),
        });
    };

    let mut lessons = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let normalized = normalize_element(item);
        match &normalized {
            Normalized::Skipped => debug!(index, "Skipping placeholder element"),
            Normalized::Degraded(reason) => {
                warn!(index, reason = %reason, "Malformed schedule element, keeping blank record")
            }
            Normalized::Lesson(_) => {}
        }
        let Some(record) = normalized.into_record() else {
            continue;
        };

        lessons.try_reserve(1)?;
        lessons.push(record);
    }

    Ok(lessons)
}

/// Normalizes one upstream element.
pub fn normalize_element(item: &Value) -> Normalized {
    let kind = item.get("Type");
    let groups = item.get("Groups");
    let teacher = item.get("Teacher");

    let groups_empty = is_empty_field(groups);
    let teacher_empty = is_empty_field(teacher);
    let kind_is_null = matches!(kind, Some(Value::Null));

    if (kind_is_null && (groups_empty || teacher_empty)) || (groups_empty && teacher_empty) {
        return Normalized::Skipped;
    }

    let period = match require_str(item, "Period") {
        Ok(period) => period,
        Err(e) => return Normalized::Degraded(e),
    };
    let subject = match require_str(item, "Subject") {
        Ok(subject) => subject,
        Err(e) => return Normalized::Degraded(e),
    };
    let groups = match require_str(item, "Groups") {
        Ok(groups) => groups,
        Err(e) => return Normalized::Degraded(e),
    };
    let teacher = match require_str(item, "Teacher") {
        Ok(teacher) => teacher,
        Err(e) => return Normalized::Degraded(e),
    };

    let Some(window) = parse_period(period) else {
        return Normalized::Degraded(MalformedElement::BadPeriod {
            period: period.to_string(),
        });
    };

    let (label, color) = match kind {
        None | Some(Value::Null) => {
            let c = classify(None);
            (c.label.into_owned(), c.color)
        }
        Some(Value::String(code)) => {
            let c = classify(Some(code));
            (c.label.into_owned(), c.color)
        }
        // neither null nor a string: keep the record without a label
        Some(_) => (String::new(), UNCLASSIFIED_COLOR),
    };

    Normalized::Lesson(LessonRecord::new(
        label,
        subject,
        teacher,
        groups,
        color,
        window.start,
        window.end,
    ))
}

/// True if a field is absent, null, or an empty string.
fn is_empty_field(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn require_str<'a>(item: &'a Value, field: &'static str) -> Result<&'a str, MalformedElement> {
    item.get(field)
        .and_then(Value::as_str)
        .ok_or(MalformedElement::NotAString { field })
}
