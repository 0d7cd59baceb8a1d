//! Display tables for GLPI ticket priorities and statuses.

/// Priority labels indexed by GLPI priority. Index 0 is unused.
const PRIORITY_LABELS: [&str; 7] = [
    "",
    "⚪ Very low",
    "🔵 Low",
    "🟡 Medium",
    "🟠 High",
    "🔴 Very high",
    "🔥 Major",
];

/// Label used for priorities outside 1 to 6.
pub const UNKNOWN_PRIORITY: &str = "⚫ Unknown";

/// Known status names and their decorated labels.
const STATUS_LABELS: &[(&str, &str)] = &[
    ("New", "🟢 New"),
    ("Processing (assigned)", "🔵 Processing (assigned)"),
    ("Processing (planned)", "📅 Processing (planned)"),
    ("Pending", "⏸️ Pending"),
    ("Solved", "✅ Solved"),
    ("Closed", "🔒 Closed"),
];

/// Label used for missing or unrecognized statuses.
pub const UNKNOWN_STATUS: &str = "❔ Unknown";

/// Look up the display label of a GLPI priority.
pub fn priority_label(priority: i64) -> &'static str {
    usize::try_from(priority)
        .ok()
        .filter(|idx| (1..PRIORITY_LABELS.len()).contains(idx))
        .map_or(UNKNOWN_PRIORITY, |idx| PRIORITY_LABELS[idx])
}

/// Look up the display label of a status by exact name.
pub fn status_label(name: Option<&str>) -> &'static str {
    name.and_then(|name| {
        STATUS_LABELS
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, label)| *label)
    })
    .unwrap_or(UNKNOWN_STATUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_priorities() {
        assert_eq!(priority_label(1), "⚪ Very low");
        assert_eq!(priority_label(3), "🟡 Medium");
        assert_eq!(priority_label(4), "🟠 High");
        assert_eq!(priority_label(6), "🔥 Major");
    }

    #[test]
    fn out_of_range_priorities_fall_back() {
        for priority in [0, 7, -1, i64::MIN, i64::MAX] {
            assert_eq!(priority_label(priority), UNKNOWN_PRIORITY, "priority {priority}");
        }
    }

    #[test]
    fn known_statuses() {
        assert_eq!(status_label(Some("New")), "🟢 New");
        assert_eq!(status_label(Some("Solved")), "✅ Solved");
        assert_eq!(
            status_label(Some("Processing (planned)")),
            "📅 Processing (planned)"
        );
    }

    #[test]
    fn unknown_statuses_fall_back() {
        assert_eq!(status_label(Some("Escalated")), UNKNOWN_STATUS);
        assert_eq!(status_label(Some("new")), UNKNOWN_STATUS);
        assert_eq!(status_label(Some("")), UNKNOWN_STATUS);
        assert_eq!(status_label(None), UNKNOWN_STATUS);
    }
}
