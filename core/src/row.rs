use serde::Deserialize;
use serde::Serialize;

/// How directly a diagnostic step can be observed, ordered from most to
/// least observable. The ordering is total and fixed; escalation walks it
/// front to back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservabilityTier {
    /// Directly visible in the field.
    Field,
    /// Requires inspection or measurement.
    Inspection,
    /// Internal state, inferred only.
    Internal,
}

impl ObservabilityTier {
    /// Fixed escalation order.
    pub const ORDER: [ObservabilityTier; 3] = [
        ObservabilityTier::Field,
        ObservabilityTier::Inspection,
        ObservabilityTier::Internal,
    ];

    /// Verbatim label used by the data source. Matching is case-sensitive.
    pub fn label(self) -> &'static str {
        match self {
            ObservabilityTier::Field => "Field observable",
            ObservabilityTier::Inspection => "Requires inspection / measurement",
            ObservabilityTier::Internal => "Internal / inferred",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ORDER.into_iter().find(|tier| tier.label() == label)
    }

    /// Catalog key for the tier's section title.
    pub fn title_key(self) -> &'static str {
        match self {
            ObservabilityTier::Field => "field",
            ObservabilityTier::Inspection => "inspection",
            ObservabilityTier::Internal => "internal",
        }
    }
}

/// One SOP entry as serialized by the data source. Field names are matched
/// verbatim; `Observability Level` stays a string here so a single odd row
/// cannot fail the whole load.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct RawSopRow {
    #[serde(rename = "Symptom ID")]
    pub symptom_id: String,
    #[serde(rename = "Symptom on Field")]
    pub symptom_label: String,
    #[serde(rename = "Observability Level")]
    pub observability_level: String,
    #[serde(rename = "SOP", default)]
    pub sop: Option<String>,
}

/// One SOP entry. Immutable once loaded; the engine never mutates a row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SopRow {
    /// Stable identifier, non-unique across rows.
    pub symptom_id: String,
    /// Human-readable description, assumed identical across rows sharing a
    /// `symptom_id`.
    pub symptom_label: String,
    pub tier: ObservabilityTier,
    /// SOP text; may encode multiple steps via line breaks.
    pub sop: Option<String>,
}

impl SopRow {
    /// True when the row carries no actionable steps: SOP absent, blank, or
    /// explicitly marked missing (case-insensitive).
    pub fn sop_unspecified(&self) -> bool {
        match self.sop.as_deref() {
            None => true,
            Some(text) => text.trim().is_empty() || text.to_lowercase().contains("missing"),
        }
    }

    /// Checkable steps encoded in the SOP text, one per non-blank line, in
    /// written order. Empty for unspecified SOPs.
    pub fn steps(&self) -> Vec<String> {
        if self.sop_unspecified() {
            return Vec::new();
        }
        self.sop
            .as_deref()
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}
