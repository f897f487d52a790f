//! Lesson type classification: upstream type codes to display labels and colours.

use super::types::{Rgb, UNCLASSIFIED_COLOR};
use std::borrow::Cow;

/// Upstream code of the rule applied when the type is missing or null.
pub const DEFAULT_CODE: &str = "-";

/// One row of the classification table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeRule {
    pub code: &'static str,
    pub label: &'static str,
    pub color: Rgb,
}

/// Ordered rules, matched exactly, first match wins. Do not reorder.
pub static TYPE_RULES: &[TypeRule] = &[
    TypeRule { code: "лек.", label: "Лекции", color: Rgb(0x276093) },
    // upstream emits two spaces before "и"
    TypeRule { code: "практ.зан.  и семин.", label: "Практические занятия и семинары", color: Rgb(0xff8f00) },
    TypeRule { code: "лаб.", label: "Лабораторные занятия", color: Rgb(0x3e8470) },
    TypeRule { code: "зач.", label: "Зачет", color: Rgb(0xe91e63) },
    TypeRule { code: "экз.", label: "Экзамен", color: Rgb(0xe91e63) },
    TypeRule { code: "диф.зач.", label: "Дифференцированный зачет", color: Rgb(0xe91e63) },
    TypeRule { code: "конс.эк.", label: "Консультация к промежуточной аттестации", color: Rgb(0x9e5fa1) },
    TypeRule { code: DEFAULT_CODE, label: "-", color: Rgb(0x407ab2) },
    TypeRule { code: "курс.раб.", label: "Курсовая работа", color: Rgb(0x407ab2) },
];

/// Result of classifying a raw type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<'a> {
    pub label: Cow<'a, str>,
    pub color: Rgb,
}

/// Finds the first rule whose code equals `code`.
pub fn find_rule(code: &str) -> Option<&'static TypeRule> {
    TYPE_RULES.iter().find(|rule| rule.code == code)
}

/// Maps a raw upstream type code to its label and colour.
///
/// `None` (missing or null) resolves through the `"-"` rule. An unknown code
/// is passed through as its own label with the unclassified colour; no rule
/// is applied to it.
pub fn classify(raw: Option<&str>) -> Classification<'_> {
    match raw {
        None => match find_rule(DEFAULT_CODE) {
            Some(rule) => Classification {
                label: Cow::Borrowed(rule.label),
                color: rule.color,
            },
            None => Classification {
                label: Cow::Borrowed(""),
                color: UNCLASSIFIED_COLOR,
            },
        },
        Some(code) => match find_rule(code) {
            Some(rule) => Classification {
                label: Cow::Borrowed(rule.label),
                color: rule.color,
            },
            None => Classification {
                label: Cow::Borrowed(code),
                color: UNCLASSIFIED_COLOR,
            },
        },
    }
}
