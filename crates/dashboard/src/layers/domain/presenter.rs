/// Discrete risk derived from a sentiment label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RiskLevel {
    Low,
    Medium,
    High,
    Unknown,
}

/// Visual weight of a banner in the result region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Tone {
    Low,
    Medium,
    High,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RiskVerdict {
    pub(crate) level: RiskLevel,
    pub(crate) display_label: String,
}

impl RiskVerdict {
    pub(crate) fn tone(&self) -> Tone {
        match self.level {
            RiskLevel::Low => Tone::Low,
            RiskLevel::Medium | RiskLevel::Unknown => Tone::Medium,
            RiskLevel::High => Tone::High,
        }
    }

    /// Banner text for `brand`. Unrecognized labels are echoed without the
    /// risk prefix.
    pub(crate) fn headline(&self, brand: &str) -> String {
        match self.level {
            RiskLevel::Low => format!("LOW RISK for {brand} | Sentiment: {}", self.display_label),
            RiskLevel::Medium => {
                format!("MEDIUM RISK for {brand} | Sentiment: {}", self.display_label)
            }
            RiskLevel::High => {
                format!("HIGH RISK for {brand} | Sentiment: {}", self.display_label)
            }
            RiskLevel::Unknown => format!("Result: {}", self.display_label),
        }
    }
}

pub(crate) fn classify(raw_label: &str) -> RiskVerdict {
    let (level, display_label) = match raw_label.to_lowercase().as_str() {
        "positive" => (RiskLevel::Low, "POSITIVE".to_string()),
        "neutral" => (RiskLevel::Medium, "NEUTRAL".to_string()),
        "negative" => (RiskLevel::High, "NEGATIVE".to_string()),
        _ => (RiskLevel::Unknown, raw_label.to_string()),
    };
    RiskVerdict {
        level,
        display_label,
    }
}
