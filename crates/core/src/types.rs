use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub video_url: String,
}

impl SummaryRequest {
    pub fn new(video_url: impl Into<String>) -> Self {
        Self {
            video_url: video_url.into(),
        }
    }
}

/// Aggregated comment sentiment and summary for one video, as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub summary: String,
    pub n_comments: u64,
    pub n_positive: u64,
    pub n_negative: u64,
    pub raw_summary_chunks: Vec<String>,
}

impl SummaryResult {
    /// Fraction of comments classified positive, `None` when there were no comments.
    pub fn positive_share(&self) -> Option<f64> {
        if self.n_comments == 0 {
            return None;
        }
        Some(self.n_positive as f64 / self.n_comments as f64)
    }
}

/// Optional body of a failed summarize call.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Reads `detail` from a JSON object body. Arrays, scalars and non-JSON
    /// bodies have no `detail` and yield `None`.
    pub fn parse(body: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<serde_json::Value>(body).ok()? {
            serde_json::Value::Object(mut map) => Some(Self {
                detail: map.remove("detail"),
            }),
            _ => None,
        }
    }

    /// Human-readable detail. Validation errors carry a structured `detail`,
    /// which is rendered as JSON text. Falsy values (null, `false`, zero, empty
    /// string or container) count as absent.
    pub fn message(&self) -> Option<String> {
        use serde_json::Value;

        match self.detail.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Array(items) if items.is_empty() => None,
            Value::Object(map) if map.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
