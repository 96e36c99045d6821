use serde::{Deserialize, Serialize};

/// Named experience range derived from years by a fixed step function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExperienceBracket {
    #[serde(rename = "Entry Level")]
    Entry,
    #[serde(rename = "Mid Level")]
    Mid,
    #[serde(rename = "Senior Level")]
    Senior,
    #[serde(rename = "Lead")]
    Lead,
    #[serde(rename = "Director")]
    Director,
}

impl ExperienceBracket {
    pub const ALL: [ExperienceBracket; 5] = [
        ExperienceBracket::Entry,
        ExperienceBracket::Mid,
        ExperienceBracket::Senior,
        ExperienceBracket::Lead,
        ExperienceBracket::Director,
    ];

    pub fn from_years(years: f64) -> Self {
        if years <= 2.0 {
            ExperienceBracket::Entry
        } else if years <= 5.0 {
            ExperienceBracket::Mid
        } else if years <= 8.0 {
            ExperienceBracket::Senior
        } else if years <= 12.0 {
            ExperienceBracket::Lead
        } else {
            ExperienceBracket::Director
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceBracket::Entry => "Entry Level",
            ExperienceBracket::Mid => "Mid Level",
            ExperienceBracket::Senior => "Senior Level",
            ExperienceBracket::Lead => "Lead",
            ExperienceBracket::Director => "Director",
        }
    }

    /// Inclusive bounds on required years used when filtering by bracket.
    /// Neighbouring ranges share their edge value.
    pub fn years_range(self) -> (f64, Option<f64>) {
        match self {
            ExperienceBracket::Entry => (0.0, Some(2.0)),
            ExperienceBracket::Mid => (2.0, Some(5.0)),
            ExperienceBracket::Senior => (5.0, Some(8.0)),
            ExperienceBracket::Lead => (8.0, Some(12.0)),
            ExperienceBracket::Director => (12.0, None),
        }
    }

    /// Accepts display labels ("Senior Level") and the short forms older job
    /// documents carry ("senior", "executive").
    pub fn parse_label(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        let bracket = match normalized.as_str() {
            "entry level" | "entry" => ExperienceBracket::Entry,
            "mid level" | "mid" => ExperienceBracket::Mid,
            "senior level" | "senior" => ExperienceBracket::Senior,
            "lead" => ExperienceBracket::Lead,
            "director" | "executive" => ExperienceBracket::Director,
            _ => return None,
        };
        Some(bracket)
    }
}

impl std::fmt::Display for ExperienceBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_function_edges() {
        assert_eq!(ExperienceBracket::from_years(0.0), ExperienceBracket::Entry);
        assert_eq!(ExperienceBracket::from_years(2.0), ExperienceBracket::Entry);
        assert_eq!(ExperienceBracket::from_years(2.5), ExperienceBracket::Mid);
        assert_eq!(ExperienceBracket::from_years(5.0), ExperienceBracket::Mid);
        assert_eq!(ExperienceBracket::from_years(8.0), ExperienceBracket::Senior);
        assert_eq!(ExperienceBracket::from_years(12.0), ExperienceBracket::Lead);
        assert_eq!(ExperienceBracket::from_years(12.5), ExperienceBracket::Director);
    }

    #[test]
    fn parses_display_and_legacy_labels() {
        assert_eq!(
            ExperienceBracket::parse_label("Senior Level"),
            Some(ExperienceBracket::Senior)
        );
        assert_eq!(
            ExperienceBracket::parse_label(" mid-level "),
            Some(ExperienceBracket::Mid)
        );
        assert_eq!(
            ExperienceBracket::parse_label("executive"),
            Some(ExperienceBracket::Director)
        );
        assert_eq!(ExperienceBracket::parse_label("guru"), None);
    }

    #[test]
    fn labels_round_trip_through_parse() {
        for bracket in ExperienceBracket::ALL {
            assert_eq!(ExperienceBracket::parse_label(bracket.label()), Some(bracket));
        }
    }
}
