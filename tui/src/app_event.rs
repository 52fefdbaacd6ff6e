use fieldguide_core::Catalog;
use fieldguide_core::SopRow;

/// Intents and load completions dispatched through the app channel. Every
/// state change flows through one of these; views never mutate state
/// directly.
#[derive(Debug)]
pub(crate) enum AppEvent {
    /// Open the detail view for a symptom; resets the escalation cursor and
    /// any checked steps.
    SelectSymptom(String),

    /// Replace the live search filter over the symptom list.
    SetFilter(String),

    /// Kick off an asynchronous catalog load for the given language.
    SetLanguage(String),

    /// "Not resolved": advance the escalation cursor one tier.
    AdvanceEscalation,

    /// "Resolved": informational acknowledgement. Engine state is
    /// untouched; the view just stops prompting for this selection.
    MarkResolved,

    /// Toggle the checkbox of the selected step.
    ToggleStep,

    /// Move the selection in the symptom list.
    MoveListSelection(isize),

    /// Move the step selection in the detail view.
    MoveStepSelection(isize),

    /// Return to the symptom list, preserving the filter.
    GoBack,

    /// Result of the one-shot dataset load. A failed load posts an empty
    /// row table.
    DatasetLoaded(Vec<SopRow>),

    /// Result of a catalog load. `generation` echoes the issuing request so
    /// completions that are no longer the latest can be discarded.
    CatalogLoaded { generation: u64, catalog: Catalog },

    /// Request to exit the application gracefully.
    ExitRequest,
}
