//! Core library for the fieldguide diagnostic-guide viewer.
//!
//! A flat table of troubleshooting rows keyed by symptom is browsed as a
//! searchable symptom list and a per-symptom detail view whose SOP steps are
//! grouped into ordered observability tiers. The escalation engine decides
//! which tiers are shown, where the resolution prompt sits, and which tiers
//! are gated.
//!
//! This crate is UI-free: the dataset loader, translation catalog, symptom
//! index, escalation engine, and configuration. Rendering and event wiring
//! live in `fieldguide-tui` / `fieldguide-cli`.

mod config;
mod dataset;
mod error;
mod escalation;
mod i18n;
mod index;
mod row;

pub use config::Config;
pub use config::ConfigOverrides;
pub use config::DEFAULT_CONFIG_FILE;
pub use config::DEFAULT_DATA_FILE;
pub use config::DEFAULT_LANGUAGE;
pub use config::DEFAULT_LOCALES_DIR;
pub use dataset::load_rows;
pub use error::LoadError;
pub use escalation::EscalationCursor;
pub use escalation::EscalationPolicy;
pub use escalation::TierStep;
pub use escalation::TierView;
pub use escalation::compute_view;
pub use escalation::tier_set;
pub use i18n::Catalog;
pub use i18n::available_languages;
pub use index::SymptomEntry;
pub use index::list_symptoms;
pub use row::ObservabilityTier;
pub use row::SopRow;
