use std::collections::HashSet;

use fieldguide_core::Catalog;
use fieldguide_core::EscalationCursor;
use fieldguide_core::EscalationPolicy;
use fieldguide_core::SopRow;
use fieldguide_core::SymptomEntry;
use fieldguide_core::TierStep;
use fieldguide_core::TierView;
use fieldguide_core::compute_view;
use fieldguide_core::list_symptoms;

/// Which screen the viewer shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    List,
    Detail { symptom_id: String },
}

/// The whole viewer state, owned by the app loop. Symptom lists and tier
/// views are derived on demand, never cached across renders.
pub(crate) struct AppState {
    pub(crate) rows: Vec<SopRow>,
    pub(crate) catalog: Catalog,
    /// Languages with a catalog file, sorted; `Ctrl-L` cycles these.
    pub(crate) languages: Vec<String>,
    pub(crate) policy: EscalationPolicy,
    pub(crate) filter: String,
    pub(crate) screen: Screen,
    pub(crate) list_selected: usize,
    pub(crate) cursor: EscalationCursor,
    /// Checked steps of the current selection, keyed (tier index, step
    /// index). Discarded on re-selection; never persisted.
    pub(crate) checked: HashSet<(usize, usize)>,
    /// Index into `check_targets()` of the highlighted step.
    pub(crate) step_selected: usize,
    /// Set by the "resolved" acknowledgement; suppresses the prompt for the
    /// current selection without touching engine state.
    pub(crate) resolved_acknowledged: bool,
    catalog_generation: u64,
}

impl AppState {
    pub(crate) fn new(policy: EscalationPolicy, language: &str, languages: Vec<String>) -> Self {
        Self {
            rows: Vec::new(),
            catalog: Catalog::empty(language),
            languages,
            policy,
            filter: String::new(),
            screen: Screen::List,
            list_selected: 0,
            cursor: EscalationCursor::default(),
            checked: HashSet::new(),
            step_selected: 0,
            resolved_acknowledged: false,
            catalog_generation: 0,
        }
    }

    /// Symptom list under the current filter, recomputed per call.
    pub(crate) fn symptoms(&self) -> Vec<SymptomEntry> {
        list_symptoms(&self.rows, &self.filter)
    }

    /// Tier views for the current detail selection; empty on the list
    /// screen or for an unknown symptom id.
    pub(crate) fn tier_views(&self) -> Vec<TierView> {
        match &self.screen {
            Screen::List => Vec::new(),
            Screen::Detail { symptom_id } => {
                compute_view(&self.rows, symptom_id, self.cursor.index(), self.policy)
            }
        }
    }

    /// Label of the currently selected symptom, from its first row.
    pub(crate) fn detail_label(&self) -> Option<&str> {
        let Screen::Detail { symptom_id } = &self.screen else {
            return None;
        };
        self.rows
            .iter()
            .find(|row| row.symptom_id == *symptom_id)
            .map(|row| row.symptom_label.as_str())
    }

    pub(crate) fn set_rows(&mut self, rows: Vec<SopRow>) {
        self.rows = rows;
        self.list_selected = 0;
    }

    pub(crate) fn set_filter(&mut self, filter: String) {
        self.filter = filter;
        self.list_selected = 0;
    }

    pub(crate) fn move_list_selection(&mut self, delta: isize) {
        let len = self.symptoms().len();
        if len == 0 {
            self.list_selected = 0;
            return;
        }
        let current = self.list_selected as isize;
        self.list_selected = (current + delta).clamp(0, len as isize - 1) as usize;
    }

    pub(crate) fn select_symptom(&mut self, symptom_id: String) {
        self.screen = Screen::Detail { symptom_id };
        self.cursor.reset();
        self.checked.clear();
        self.step_selected = 0;
        self.resolved_acknowledged = false;
    }

    /// Back to the list. The filter is preserved; cursor and checked steps
    /// are discarded.
    pub(crate) fn go_back(&mut self) {
        self.screen = Screen::List;
        self.cursor.reset();
        self.checked.clear();
        self.step_selected = 0;
        self.resolved_acknowledged = false;
    }

    pub(crate) fn advance_escalation(&mut self) {
        let tier_count = self.tier_views().len();
        if self.cursor.advance(tier_count) {
            self.resolved_acknowledged = false;
        }
    }

    pub(crate) fn mark_resolved(&mut self) {
        if self.tier_views().iter().any(|view| view.offer_resolution) {
            self.resolved_acknowledged = true;
        }
    }

    /// Flattened (tier index, step index) of every checkable step currently
    /// on screen. Locked tiers contribute nothing.
    pub(crate) fn check_targets(&self) -> Vec<(usize, usize)> {
        let mut targets = Vec::new();
        for (tier_index, view) in self.tier_views().iter().enumerate() {
            if view.locked {
                continue;
            }
            for (step_index, step) in view.steps.iter().enumerate() {
                if matches!(step, TierStep::Check(_)) {
                    targets.push((tier_index, step_index));
                }
            }
        }
        targets
    }

    pub(crate) fn move_step_selection(&mut self, delta: isize) {
        let len = self.check_targets().len();
        if len == 0 {
            self.step_selected = 0;
            return;
        }
        let current = self.step_selected as isize;
        self.step_selected = (current + delta).clamp(0, len as isize - 1) as usize;
    }

    pub(crate) fn toggle_step(&mut self) {
        let targets = self.check_targets();
        let Some(target) = targets.get(self.step_selected).copied() else {
            return;
        };
        if !self.checked.remove(&target) {
            self.checked.insert(target);
        }
    }

    /// Next generation number for a catalog load. Completions carrying an
    /// older generation are stale and must be discarded.
    pub(crate) fn next_catalog_generation(&mut self) -> u64 {
        self.catalog_generation += 1;
        self.catalog_generation
    }

    /// Apply a catalog load completion. Returns false (and changes nothing)
    /// when a newer load has been issued since.
    pub(crate) fn apply_catalog(&mut self, generation: u64, catalog: Catalog) -> bool {
        if generation != self.catalog_generation {
            return false;
        }
        self.catalog = catalog;
        true
    }

    /// Language after the current one, cycling through `languages`.
    pub(crate) fn next_language(&self) -> Option<String> {
        if self.languages.is_empty() {
            return None;
        }
        let current = self
            .languages
            .iter()
            .position(|lang| lang == self.catalog.language());
        let next = match current {
            Some(index) => (index + 1) % self.languages.len(),
            None => 0,
        };
        self.languages.get(next).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldguide_core::ObservabilityTier;
    use pretty_assertions::assert_eq;

    fn row(id: &str, tier: ObservabilityTier, sop: Option<&str>) -> SopRow {
        SopRow {
            symptom_id: id.to_string(),
            symptom_label: "Leak".to_string(),
            tier,
            sop: sop.map(str::to_string),
        }
    }

    fn sample_state() -> AppState {
        let mut state = AppState::new(
            EscalationPolicy::Prompted,
            "en",
            vec!["en".to_string(), "nl".to_string()],
        );
        state.set_rows(vec![
            row("S1", ObservabilityTier::Field, Some("Check hose")),
            row("S1", ObservabilityTier::Inspection, Some("Measure pressure")),
            row("S1", ObservabilityTier::Internal, Some("Trace controller log")),
            row("S2", ObservabilityTier::Field, Some("Look for smoke")),
        ]);
        state
    }

    #[test]
    fn selection_resets_cursor_and_checked_steps() {
        let mut state = sample_state();
        state.select_symptom("S1".to_string());
        state.advance_escalation();
        state.toggle_step();
        assert_eq!(state.cursor.index(), 1);
        assert!(!state.checked.is_empty());

        state.select_symptom("S2".to_string());
        assert_eq!(state.cursor.index(), 0);
        assert!(state.checked.is_empty());
    }

    #[test]
    fn advance_walks_the_tier_set_and_stops_at_the_last() {
        let mut state = sample_state();
        state.select_symptom("S1".to_string());
        assert_eq!(state.cursor.index(), 0);
        state.advance_escalation();
        assert_eq!(state.cursor.index(), 1);
        let views = state.tier_views();
        let prompts: Vec<bool> = views.iter().map(|v| v.offer_resolution).collect();
        assert_eq!(prompts, vec![false, true, false]);

        state.advance_escalation();
        state.advance_escalation();
        assert_eq!(state.cursor.index(), 2);
    }

    #[test]
    fn back_preserves_filter_and_discards_detail_state() {
        let mut state = sample_state();
        state.set_filter("leak".to_string());
        state.select_symptom("S1".to_string());
        state.advance_escalation();
        state.go_back();
        assert_eq!(state.screen, Screen::List);
        assert_eq!(state.filter, "leak");
        assert_eq!(state.cursor.index(), 0);
    }

    #[test]
    fn filter_change_resets_list_selection() {
        let mut state = sample_state();
        state.move_list_selection(1);
        assert_eq!(state.list_selected, 1);
        state.set_filter("s2".to_string());
        assert_eq!(state.list_selected, 0);
        assert_eq!(state.symptoms().len(), 1);
    }

    #[test]
    fn resolved_is_informational_and_gated_on_an_active_prompt() {
        let mut state = sample_state();
        state.select_symptom("S2".to_string());
        // Single-tier symptom: no prompt, so no acknowledgement either.
        state.mark_resolved();
        assert!(!state.resolved_acknowledged);

        state.select_symptom("S1".to_string());
        state.mark_resolved();
        assert!(state.resolved_acknowledged);
        assert_eq!(state.cursor.index(), 0);
    }

    #[test]
    fn toggle_step_flips_the_selected_checkbox() {
        let mut state = sample_state();
        state.select_symptom("S1".to_string());
        state.move_step_selection(1);
        state.toggle_step();
        assert_eq!(state.checked.iter().copied().collect::<Vec<_>>(), vec![(1, 0)]);
        state.toggle_step();
        assert!(state.checked.is_empty());
    }

    #[test]
    fn stale_catalog_completions_are_discarded() {
        let mut state = sample_state();
        let first = state.next_catalog_generation();
        let second = state.next_catalog_generation();
        assert!(!state.apply_catalog(first, Catalog::empty("nl")));
        assert_eq!(state.catalog.language(), "en");
        assert!(state.apply_catalog(second, Catalog::empty("nl")));
        assert_eq!(state.catalog.language(), "nl");
    }

    #[test]
    fn languages_cycle_in_order() {
        let mut state = sample_state();
        assert_eq!(state.next_language().as_deref(), Some("nl"));
        let generation = state.next_catalog_generation();
        assert!(state.apply_catalog(generation, Catalog::empty("nl")));
        assert_eq!(state.next_language().as_deref(), Some("en"));
    }

    #[test]
    fn unknown_symptom_gives_an_empty_detail_view() {
        let mut state = sample_state();
        state.select_symptom("X1".to_string());
        assert_eq!(state.tier_views(), Vec::new());
        assert_eq!(state.detail_label(), None);
    }
}
