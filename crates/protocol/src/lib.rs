use serde::{Deserialize, Deserializer, Serialize};

pub mod config;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictRequest {
    pub brand: String,
    pub comment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    #[serde(default)]
    pub risk: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl PredictResponse {
    /// Sentiment label, if the backend produced a usable one. An empty label
    /// counts as missing.
    pub fn label(&self) -> Option<&str> {
        self.risk.as_deref().filter(|risk| !risk.is_empty())
    }
}

/// Error envelope returned by the backend alongside non-2xx statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SentimentCategory {
    Positive,
    Neutral,
    Negative,
    Irrelevant,
}

impl SentimentCategory {
    /// Fixed display order shared by every chart.
    pub const ALL: [SentimentCategory; 4] = [
        SentimentCategory::Positive,
        SentimentCategory::Neutral,
        SentimentCategory::Negative,
        SentimentCategory::Irrelevant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SentimentCategory::Positive => "Positive",
            SentimentCategory::Neutral => "Neutral",
            SentimentCategory::Negative => "Negative",
            SentimentCategory::Irrelevant => "Irrelevant",
        }
    }

    /// Green, amber, red, gray.
    pub fn color_rgb(self) -> (u8, u8, u8) {
        match self {
            SentimentCategory::Positive => (0x28, 0xa7, 0x45),
            SentimentCategory::Neutral => (0xff, 0xc1, 0x07),
            SentimentCategory::Negative => (0xdc, 0x35, 0x45),
            SentimentCategory::Irrelevant => (0x6c, 0x75, 0x7d),
        }
    }
}

/// Raw `/brand_stats/<brand>` body. Every field is optional and tolerant of
/// odd encodings; normalization happens in [`SentimentStats::from_payload`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BrandStatsPayload {
    #[serde(rename = "Positive", default, deserialize_with = "lenient_count")]
    pub positive: Option<f64>,
    #[serde(rename = "Neutral", default, deserialize_with = "lenient_count")]
    pub neutral: Option<f64>,
    #[serde(rename = "Negative", default, deserialize_with = "lenient_count")]
    pub negative: Option<f64>,
    #[serde(rename = "Irrelevant", default, deserialize_with = "lenient_count")]
    pub irrelevant: Option<f64>,
    #[serde(rename = "Total", default, deserialize_with = "lenient_count")]
    pub total: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentStats {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub irrelevant: u64,
    pub total: Option<u64>,
}

impl SentimentStats {
    pub fn from_payload(payload: &BrandStatsPayload) -> Self {
        Self {
            positive: normalize_count(payload.positive),
            neutral: normalize_count(payload.neutral),
            negative: normalize_count(payload.negative),
            irrelevant: normalize_count(payload.irrelevant),
            total: payload.total.map(|value| normalize_count(Some(value))),
        }
    }

    pub fn count(&self, category: SentimentCategory) -> u64 {
        match category {
            SentimentCategory::Positive => self.positive,
            SentimentCategory::Neutral => self.neutral,
            SentimentCategory::Negative => self.negative,
            SentimentCategory::Irrelevant => self.irrelevant,
        }
    }

    /// Counts in [`SentimentCategory::ALL`] order.
    pub fn values(&self) -> [u64; 4] {
        SentimentCategory::ALL.map(|category| self.count(category))
    }

    /// Backend-reported total when present, else the sum of the four buckets.
    pub fn total(&self) -> u64 {
        self.total
            .unwrap_or_else(|| self.values().iter().copied().sum())
    }
}

fn normalize_count(value: Option<f64>) -> u64 {
    match value {
        Some(value) if value.is_finite() && value > 0.0 => value.round() as u64,
        _ => 0,
    }
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    })
}
