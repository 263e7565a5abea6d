//! Result summarizer: per-shift-type and per-specialty coverage statistics,
//! as rational pairs rather than pre-divided floats (spec §4.6).
//!
//! Grounded on `asignacion_ids.py`'s verbose-statistics block
//! (`num_preferencia_manana`, `puestos_demandados_por_jornada`,
//! `num_pref_manana_asignados_manana`, ...).

use std::collections::HashMap;

use crate::domain::{Scenario, ShiftType};
use crate::scoring::ScoringParameters;
use crate::solver::SolveResult;

/// A `numerator / denominator` pair. Left undivided so a reporter can
/// format it as a percentage, a fraction, or anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    fn new(numerator: i64, denominator: i64) -> Self {
        Self { numerator, denominator }
    }
}

/// Coverage and preference statistics for one shift type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftTypeSummary {
    pub posts_demanded: i64,
    pub preferring_or_volunteering: i64,
    /// preferring workers actually assigned to this shift type, over
    /// `preferring_or_volunteering`.
    pub preference_assigned_ratio: Rational,
    /// posts of this shift type covered by a preferring worker, over
    /// `posts_demanded`.
    pub preference_coverage_ratio: Rational,
}

/// Full summary of one solved run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub by_shift_type: HashMap<ShiftType, ShiftTypeSummary>,
    /// specialty assignments over total demanded posts.
    pub specialty_coverage: Rational,
    /// assigned workers over workers available for at least one shift.
    pub worker_utilization: Rational,
    /// independently recomputed from the assignment, for the objective
    /// consistency check (testable property 6).
    pub objective: i64,
}

pub fn summarize(scenario: &Scenario, params: &ScoringParameters, result: &SolveResult) -> Summary {
    let mut by_shift_type = HashMap::new();
    for shift_type in ShiftType::ALL {
        let posts_demanded: i64 = scenario
            .demand
            .iter()
            .filter(|((_, shift_id), _)| {
                scenario
                    .shift(*shift_id)
                    .map(|s| s.shift_type == shift_type)
                    .unwrap_or(false)
            })
            .map(|(_, &demand)| demand as i64)
            .sum();

        let preferring_or_volunteering = scenario
            .preference_lists
            .shift_preference
            .get(&shift_type)
            .map(|list| list.len() as i64)
            .unwrap_or(0);

        let respected = result
            .type_preference_respected
            .get(&shift_type)
            .copied()
            .unwrap_or(0);

        by_shift_type.insert(
            shift_type,
            ShiftTypeSummary {
                posts_demanded,
                preferring_or_volunteering,
                preference_assigned_ratio: Rational::new(respected, preferring_or_volunteering),
                preference_coverage_ratio: Rational::new(respected, posts_demanded),
            },
        );
    }

    let total_demand: i64 = scenario.demand.values().map(|&d| d as i64).sum();
    let specialty_coverage = Rational::new(result.specialty_assignments_total, total_demand);

    let workers_available = scenario
        .workers
        .iter()
        .filter(|w| {
            scenario
                .availability
                .iter()
                .any(|(worker, _)| *worker == w.id)
        })
        .count() as i64;
    let workers_assigned = {
        let mut assigned: Vec<_> = result.assignment.iter().map(|&(w, _, _)| w).collect();
        assigned.sort_unstable_by_key(|w| w.0);
        assigned.dedup();
        assigned.len() as i64
    };
    let worker_utilization = Rational::new(workers_assigned, workers_available);

    let index = crate::preference::PreferenceIndex::build(&scenario.preference_lists);
    let scores = crate::scoring::ScoreTable::build(scenario, params, &index, &result.assignment);
    let objective = result
        .assignment
        .iter()
        .filter_map(|c| scores.coef_assign.get(c).copied())
        .sum::<i64>()
        + result
            .doubled_workers
            .iter()
            .filter_map(|w| scores.coef_double.get(w).copied())
            .sum::<i64>();

    Summary {
        by_shift_type,
        specialty_coverage,
        worker_utilization,
        objective,
    }
}
