//! Role inference logic for column analysis.

use crate::config::ClassifierSettings;
use crate::types::NumericRole;
use crate::utils::is_integral;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Column name separators - compiled once at startup
static NAME_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("Invalid regex: name separator"));

/// Name tokens marking a column as an identifier when they end the name.
const ID_NAME_TOKENS: [&str; 4] = ["id", "uuid", "guid", "identifier"];

/// Check if a column name ends in an identifier token.
///
/// Names are split on non-alphanumerics and camelCase boundaries, so
/// `order_id`, `userId` and `customerID` match while `paid` does not.
pub(crate) fn has_id_like_name(col_name: &str) -> bool {
    last_name_token(col_name)
        .map(|token| ID_NAME_TOKENS.contains(&token.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// The last word of a column name.
fn last_name_token(col_name: &str) -> Option<&str> {
    let segment = NAME_SEPARATOR
        .split(col_name)
        .filter(|s| !s.is_empty())
        .last()?;

    let chars: Vec<(usize, char)> = segment.char_indices().collect();
    let mut start = 0;
    for i in 1..chars.len() {
        let prev = chars[i - 1].1;
        let cur = chars[i].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|(_, c)| c.is_ascii_lowercase());

        // userId -> user|Id, IDNumber -> ID|Number
        let lower_to_upper = (prev.is_ascii_lowercase() || prev.is_ascii_digit())
            && cur.is_ascii_uppercase();
        let acronym_end = prev.is_ascii_uppercase() && cur.is_ascii_uppercase() && next_is_lower;
        if lower_to_upper || acronym_end {
            start = chars[i].0;
        }
    }

    Some(&segment[start..])
}

/// Decide the scaling role of a column whose values all parsed as numbers.
///
/// Few distinct values, or integer codes that repeat heavily, are discrete.
pub(crate) fn infer_numeric_role(values: &[f64], settings: &ClassifierSettings) -> NumericRole {
    let unique_count = values
        .iter()
        .map(|v| v.to_bits())
        .collect::<HashSet<_>>()
        .len();

    if unique_count < settings.discrete_unique_threshold {
        return NumericRole::Discrete;
    }

    let all_integral = values.iter().all(|v| is_integral(*v));
    let unique_ratio = unique_count as f64 / values.len() as f64;
    if all_integral && unique_ratio <= settings.discrete_integer_ratio {
        return NumericRole::Discrete;
    }

    NumericRole::Continuous
}
