//! Escalation engine: partitions a symptom's rows into ordered observability
//! tiers and decides, per tier, what is shown and where the resolution
//! prompt sits.
//!
//! Two mutually incompatible escalation behaviors exist; [`EscalationPolicy`]
//! makes the choice explicit per deployment rather than blending them.
//! [`EscalationPolicy::Prompted`] is the default.

use serde::Deserialize;
use serde::Serialize;

use crate::row::ObservabilityTier;
use crate::row::SopRow;

/// Which escalation behavior the viewer runs with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationPolicy {
    /// Every present tier is rendered. The resolution prompt follows the
    /// cursor tier and "not resolved" advances the cursor.
    #[default]
    Prompted,
    /// Every tier after the first one with an unspecified SOP is locked:
    /// rendered, but with its steps withheld. Nothing unlocks it within a
    /// session. The cursor is not consulted.
    LockChain,
}

/// One step line within a tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TierStep {
    /// A checkable action, one per non-blank SOP line.
    Check(String),
    /// Marker for a row whose SOP is unspecified.
    MissingSop,
}

/// Per-tier slice of the detail view for one symptom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierView {
    pub tier: ObservabilityTier,
    /// Catalog key for the section title; translation happens at render.
    pub title_key: &'static str,
    pub visible: bool,
    /// Lock-chain gating only; always false under [`EscalationPolicy::Prompted`].
    pub locked: bool,
    pub steps: Vec<TierStep>,
    /// True if any row in the tier lacks a usable SOP. A tier can mix
    /// specified and unspecified rows and is still flagged.
    pub sop_unspecified: bool,
    pub offer_resolution: bool,
}

/// Progress pointer over a symptom's ordered tier set. Reset on selection,
/// advanced only by an explicit "not resolved" action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EscalationCursor(usize);

impl EscalationCursor {
    pub fn index(self) -> usize {
        self.0
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Advance one tier. A no-op at the last tier; returns whether the
    /// cursor moved.
    pub fn advance(&mut self, tier_count: usize) -> bool {
        if self.0 + 1 < tier_count {
            self.0 += 1;
            true
        } else {
            false
        }
    }
}

/// Ordered tiers present for `symptom_id`: always a subsequence of
/// [`ObservabilityTier::ORDER`], containing exactly the tiers with at least
/// one row. Tiers absent from the data are skipped entirely, never shown as
/// empty or locked placeholders.
pub fn tier_set(rows: &[SopRow], symptom_id: &str) -> Vec<ObservabilityTier> {
    ObservabilityTier::ORDER
        .into_iter()
        .filter(|tier| {
            rows.iter()
                .any(|row| row.symptom_id == symptom_id && row.tier == *tier)
        })
        .collect()
}

/// Compute the ordered tier views for one symptom.
///
/// An unknown `symptom_id` yields an empty sequence; that is the recoverable
/// not-found case, not an error. The engine performs no I/O and never
/// mutates a row.
pub fn compute_view(
    rows: &[SopRow],
    symptom_id: &str,
    cursor: usize,
    policy: EscalationPolicy,
) -> Vec<TierView> {
    let matches: Vec<&SopRow> = rows
        .iter()
        .filter(|row| row.symptom_id == symptom_id)
        .collect();
    if matches.is_empty() {
        return Vec::new();
    }

    let tiers: Vec<ObservabilityTier> = ObservabilityTier::ORDER
        .into_iter()
        .filter(|tier| matches.iter().any(|row| row.tier == *tier))
        .collect();
    let last = tiers.len() - 1;

    let mut chain_blocked = false;
    let mut views = Vec::with_capacity(tiers.len());
    for (i, tier) in tiers.iter().copied().enumerate() {
        let mut steps = Vec::new();
        let mut sop_unspecified = false;
        let mut has_specified = false;
        for row in matches.iter().copied().filter(|row| row.tier == tier) {
            if row.sop_unspecified() {
                sop_unspecified = true;
                steps.push(TierStep::MissingSop);
            } else {
                has_specified = true;
                steps.extend(row.steps().into_iter().map(TierStep::Check));
            }
        }

        let locked = policy == EscalationPolicy::LockChain && chain_blocked;
        if locked {
            steps.clear();
        }
        let offer_resolution = match policy {
            EscalationPolicy::Prompted => i == cursor && i < last,
            EscalationPolicy::LockChain => !locked && has_specified && i < last,
        };
        chain_blocked = chain_blocked || sop_unspecified;

        views.push(TierView {
            tier,
            title_key: tier.title_key(),
            visible: true,
            locked,
            steps,
            sop_unspecified,
            offer_resolution,
        });
    }
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(id: &str, tier: ObservabilityTier, sop: Option<&str>) -> SopRow {
        SopRow {
            symptom_id: id.to_string(),
            symptom_label: "Leak".to_string(),
            tier,
            sop: sop.map(str::to_string),
        }
    }

    fn three_tier_rows() -> Vec<SopRow> {
        vec![
            row("S1", ObservabilityTier::Field, Some("Check hose")),
            row("S1", ObservabilityTier::Inspection, Some("Measure pressure")),
            row("S1", ObservabilityTier::Internal, Some("Trace controller log")),
        ]
    }

    #[test]
    fn unknown_symptom_yields_empty_view() {
        let views = compute_view(&three_tier_rows(), "X1", 0, EscalationPolicy::Prompted);
        assert_eq!(views, Vec::new());
    }

    #[test]
    fn tier_set_is_exactly_the_present_subsequence() {
        let rows = vec![
            row("S1", ObservabilityTier::Internal, Some("x")),
            row("S1", ObservabilityTier::Field, Some("y")),
        ];
        assert_eq!(
            tier_set(&rows, "S1"),
            vec![ObservabilityTier::Field, ObservabilityTier::Internal]
        );
        assert_eq!(tier_set(&rows, "S2"), Vec::new());

        let views = compute_view(&rows, "S1", 0, EscalationPolicy::Prompted);
        let tiers: Vec<ObservabilityTier> = views.iter().map(|v| v.tier).collect();
        assert_eq!(
            tiers,
            vec![ObservabilityTier::Field, ObservabilityTier::Internal]
        );
    }

    #[test]
    fn field_step_with_unspecified_internal_tier() {
        let rows = vec![
            row("S1", ObservabilityTier::Field, Some("Check hose")),
            row("S1", ObservabilityTier::Internal, Some("missing")),
        ];
        let views = compute_view(&rows, "S1", 0, EscalationPolicy::Prompted);
        assert_eq!(views.len(), 2);

        assert_eq!(views[0].tier, ObservabilityTier::Field);
        assert_eq!(views[0].steps, vec![TierStep::Check("Check hose".to_string())]);
        assert!(!views[0].sop_unspecified);
        assert!(views[0].offer_resolution);

        assert_eq!(views[1].tier, ObservabilityTier::Internal);
        assert_eq!(views[1].steps, vec![TierStep::MissingSop]);
        assert!(views[1].sop_unspecified);
        assert!(!views[1].offer_resolution);
    }

    #[test]
    fn prompt_follows_the_cursor() {
        let rows = three_tier_rows();
        for cursor in 0..2 {
            let views = compute_view(&rows, "S1", cursor, EscalationPolicy::Prompted);
            for (i, view) in views.iter().enumerate() {
                assert_eq!(view.offer_resolution, i == cursor, "cursor {cursor} tier {i}");
                assert!(view.visible);
                assert!(!view.locked);
            }
        }
    }

    #[test]
    fn no_prompt_anywhere_at_the_last_tier() {
        let views = compute_view(&three_tier_rows(), "S1", 2, EscalationPolicy::Prompted);
        assert!(views.iter().all(|view| !view.offer_resolution));
    }

    #[test]
    fn mixed_tier_is_flagged_but_keeps_specified_steps() {
        let rows = vec![
            row("S1", ObservabilityTier::Field, Some("Check hose")),
            row("S1", ObservabilityTier::Field, None),
        ];
        let views = compute_view(&rows, "S1", 0, EscalationPolicy::Prompted);
        assert_eq!(views.len(), 1);
        assert!(views[0].sop_unspecified);
        assert_eq!(
            views[0].steps,
            vec![
                TierStep::Check("Check hose".to_string()),
                TierStep::MissingSop,
            ]
        );
    }

    #[test]
    fn cursor_advances_only_before_the_last_tier() {
        let mut cursor = EscalationCursor::default();
        assert_eq!(cursor.index(), 0);
        assert!(cursor.advance(3));
        assert_eq!(cursor.index(), 1);
        assert!(cursor.advance(3));
        assert_eq!(cursor.index(), 2);
        assert!(!cursor.advance(3));
        assert_eq!(cursor.index(), 2);
        cursor.reset();
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn lock_chain_gates_tiers_after_a_gap() {
        let rows = vec![
            row("S1", ObservabilityTier::Field, Some("Check hose")),
            row("S1", ObservabilityTier::Inspection, Some("Missing SOP")),
            row("S1", ObservabilityTier::Internal, Some("Trace controller log")),
        ];
        let views = compute_view(&rows, "S1", 0, EscalationPolicy::LockChain);

        assert!(!views[0].locked);
        assert_eq!(views[0].steps, vec![TierStep::Check("Check hose".to_string())]);
        assert!(views[0].offer_resolution);

        // The gap tier itself is not locked; it only locks what follows.
        assert!(!views[1].locked);
        assert!(views[1].sop_unspecified);
        assert!(!views[1].offer_resolution);

        assert!(views[2].locked);
        assert!(views[2].visible);
        assert_eq!(views[2].steps, Vec::new());
        assert!(!views[2].offer_resolution);
    }

    #[test]
    fn lock_chain_locks_nothing_when_all_sops_are_specified() {
        let views = compute_view(&three_tier_rows(), "S1", 0, EscalationPolicy::LockChain);
        assert!(views.iter().all(|view| !view.locked));
        assert!(views[0].offer_resolution);
        assert!(views[1].offer_resolution);
        assert!(!views[2].offer_resolution);
    }
}
