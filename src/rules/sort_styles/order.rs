use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Direction keys are expected to be sorted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Word used in diagnostics ("ascending" / "descending")
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "ascending",
            SortOrder::Desc => "descending",
        }
    }

    /// Whether `current` may follow `previous`. Equal keys are always in order.
    pub fn is_valid_order(self, previous: &str, current: &str) -> bool {
        match self {
            SortOrder::Asc => previous <= current,
            SortOrder::Desc => previous >= current,
        }
    }

    /// Ordering used to sort keys in this direction (code-point comparison)
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            SortOrder::Asc => a.cmp(b),
            SortOrder::Desc => b.cmp(a),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order '{s}': expected \"asc\" or \"desc\"")),
        }
    }
}

/// Which member sequence a violation was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    /// Top-level keys of the style-sheet object
    ClassNames,
    /// Keys of one class's object literal
    StyleProperties,
}

impl Level {
    pub fn label(self) -> &'static str {
        match self {
            Level::ClassNames => "class names",
            Level::StyleProperties => "style properties",
        }
    }
}

/// Adjacent pair of resolvable keys found out of order.
///
/// Indices point into the key slice given to [`check_order`]; `current`
/// should be moved before `previous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderViolation {
    pub previous: usize,
    pub current: usize,
}

/// Compare each resolvable key with the nearest resolvable key before it.
///
/// Unresolvable (`None`) keys are skipped without breaking the chain, so the
/// keys on either side of them are still compared with each other.
pub fn check_order(keys: &[Option<String>], order: SortOrder) -> Vec<OrderViolation> {
    let mut violations = Vec::new();
    let mut previous: Option<(usize, &str)> = None;

    for (idx, key) in keys.iter().enumerate() {
        let Some(key) = key.as_deref() else {
            continue;
        };
        if let Some((prev_idx, prev_key)) = previous
            && !order.is_valid_order(prev_key, key)
        {
            violations.push(OrderViolation {
                previous: prev_idx,
                current: idx,
            });
        }
        previous = Some((idx, key));
    }

    violations
}

/// Diagnostic text for one violation
pub fn violation_message(level: Level, order: SortOrder, previous: &str, current: &str) -> String {
    format!(
        "Expected {} to be in {} order. '{}' should be before '{}'.",
        level.label(),
        order.label(),
        current,
        previous
    )
}
