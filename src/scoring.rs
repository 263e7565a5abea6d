//! Scoring engine: turns preference ranks and capability levels into the
//! integer objective coefficients the model builder consumes (spec §4.3).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{PostId, Scenario, Shift, ShiftId, ShiftType, WorkerId};
use crate::preference::{ListKey, PreferenceIndex};

/// Tunable weights driving the scoring engine. Every field is overridable
/// per spec.md §6; defaults are the site values `ClasesMetodosAuxiliares.py`
/// ships under `ParametrosPuntuacion`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringParameters {
    pub max_specialty: i64,
    pub decay_specialty: i64,
    pub max_capability: i64,
    pub decay_capability: i64,
    pub max_double_volunteer: i64,
    pub decay_double_volunteer: i64,
    pub max_shift_preference: ShiftTypeTable,
    pub decay_shift_preference: ShiftTypeTable,
    pub shift_penalty: ShiftTypeTable,
}

impl Default for ScoringParameters {
    fn default() -> Self {
        Self {
            max_specialty: 500,
            decay_specialty: 5,
            max_capability: 50,
            decay_capability: 10,
            max_double_volunteer: -1000,
            decay_double_volunteer: 1,
            max_shift_preference: ShiftTypeTable {
                morning: 300,
                afternoon: 500,
                night: 700,
            },
            decay_shift_preference: ShiftTypeTable {
                morning: 1,
                afternoon: 1,
                night: 1,
            },
            shift_penalty: ShiftTypeTable {
                morning: 0,
                afternoon: 50,
                night: 500,
            },
        }
    }
}

/// Per-`ShiftType` integer table, used for every parameter that varies by
/// shift type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTypeTable {
    pub morning: i64,
    pub afternoon: i64,
    pub night: i64,
}

impl ShiftTypeTable {
    pub fn get(&self, shift_type: ShiftType) -> i64 {
        match shift_type {
            ShiftType::Morning => self.morning,
            ShiftType::Afternoon => self.afternoon,
            ShiftType::Night => self.night,
        }
    }
}

/// Objective coefficients computed once per planning run.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    pub coef_assign: HashMap<(WorkerId, PostId, ShiftId), i64>,
    pub coef_double: HashMap<WorkerId, i64>,
}

impl ScoreTable {
    /// Computes `coef_assign` for every candidate `(worker, post, shift)`
    /// triple the caller is interested in, plus `coef_double` for every
    /// double volunteer. `candidates` drives iteration order so repeated
    /// runs over the same input produce a textually identical table.
    pub fn build(
        scenario: &Scenario,
        params: &ScoringParameters,
        index: &PreferenceIndex,
        candidates: &[(WorkerId, PostId, ShiftId)],
    ) -> Self {
        let mut coef_assign = HashMap::with_capacity(candidates.len());
        for &(worker_id, post_id, shift_id) in candidates {
            let worker = scenario
                .worker(worker_id)
                .expect("candidate references a known worker");
            let shift = scenario
                .shift(shift_id)
                .expect("candidate references a known shift");

            let score_capability = score_capability(worker.capabilities.get(&post_id).copied(), params);
            let score_specialty = score_specialty(index, worker_id, post_id, params);
            let score_shift = score_shift(index, worker_id, shift, params);

            coef_assign.insert(
                (worker_id, post_id, shift_id),
                score_capability + score_specialty + score_shift,
            );
        }

        let mut coef_double = HashMap::with_capacity(scenario.preference_lists.double_volunteers.len());
        for &worker_id in &scenario.preference_lists.double_volunteers {
            let rank = index
                .position(ListKey::Double, worker_id)
                .expect("double_volunteers membership implies a rank") as i64;
            coef_double.insert(
                worker_id,
                params.max_double_volunteer - params.decay_double_volunteer * rank,
            );
        }

        Self {
            coef_assign,
            coef_double,
        }
    }
}

fn score_capability(level: Option<crate::domain::SkillLevelId>, params: &ScoringParameters) -> i64 {
    let Some(level) = level else { return 0 };
    let raw = params.max_capability - params.decay_capability * (level.0 as i64 - 1);
    raw.max(0)
}

fn score_specialty(
    index: &PreferenceIndex,
    worker_id: WorkerId,
    post_id: PostId,
    params: &ScoringParameters,
) -> i64 {
    match index.position(ListKey::Specialty(post_id), worker_id) {
        Some(rank) => (params.max_specialty - params.decay_specialty * rank as i64).max(0),
        None => 0,
    }
}

/// No nonnegativity clamp here, intentionally: a rank far enough down the
/// list can make this term negative. A preference-bearing shift worked by
/// a non-member of `shift_preference[shift.type]` instead subtracts
/// `shift_penalty[shift.type]` (conscription cost).
fn score_shift(
    index: &PreferenceIndex,
    worker_id: WorkerId,
    shift: &Shift,
    params: &ScoringParameters,
) -> i64 {
    if !shift.is_preference_bearing() {
        return 0;
    }
    match index.position(ListKey::Shift(shift.shift_type), worker_id) {
        Some(rank) => {
            params.max_shift_preference.get(shift.shift_type)
                - params.decay_shift_preference.get(shift.shift_type) * rank as i64
        }
        None => -params.shift_penalty.get(shift.shift_type),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap as Map, HashSet};

    use super::*;
    use crate::domain::{Post, PreferenceLists, Worker, SPECIALTY_LEVEL};

    fn scenario_with_one_candidate() -> Scenario {
        let mut capabilities = Map::new();
        capabilities.insert(PostId(1), SPECIALTY_LEVEL);
        let worker = Worker {
            id: WorkerId(1),
            code: 1,
            given_name: "A".into(),
            family_name: "B".into(),
            capabilities,
        };
        let mut specialists = Map::new();
        specialists.insert(PostId(1), vec![WorkerId(1)]);
        Scenario {
            workers: vec![worker],
            posts: vec![Post {
                id: PostId(1),
                name: "Triage".into(),
            }],
            shifts: Shift::canonical_site(),
            demand: Map::new(),
            availability: HashSet::from([(WorkerId(1), ShiftId(1))]),
            preference_lists: PreferenceLists {
                specialists,
                ..Default::default()
            },
        }
    }

    #[test]
    fn specialty_and_capability_combine_for_top_ranked_specialist() {
        let scenario = scenario_with_one_candidate();
        let params = ScoringParameters::default();
        let index = PreferenceIndex::build(&scenario.preference_lists);
        let candidates = vec![(WorkerId(1), PostId(1), ShiftId(1))];
        let table = ScoreTable::build(&scenario, &params, &index, &candidates);

        let coef = table.coef_assign[&(WorkerId(1), PostId(1), ShiftId(1))];
        assert_eq!(coef, params.max_capability + params.max_specialty);
    }

    #[test]
    fn capability_score_never_goes_negative() {
        let params = ScoringParameters::default();
        let deep_level = crate::domain::SkillLevelId(50);
        assert_eq!(score_capability(Some(deep_level), &params), 0);
    }

    #[test]
    fn shift_preference_score_can_go_negative_for_low_rank() {
        let mut scenario = scenario_with_one_candidate();
        let far_ranks: Vec<WorkerId> = (100..2100).map(WorkerId).collect();
        let mut shift_preference = Map::new();
        let mut ranked = far_ranks;
        ranked.push(WorkerId(1));
        shift_preference.insert(ShiftType::Morning, ranked);
        scenario.preference_lists.shift_preference = shift_preference;

        let params = ScoringParameters::default();
        let index = PreferenceIndex::build(&scenario.preference_lists);
        let morning = scenario.shift(ShiftId(1)).unwrap();
        let score = score_shift(&index, WorkerId(1), morning, &params);
        assert!(score < 0);
    }

    #[test]
    fn double_volunteer_coefficient_is_typically_negative() {
        let mut scenario = scenario_with_one_candidate();
        scenario.preference_lists.double_volunteers = vec![WorkerId(1)];
        let params = ScoringParameters::default();
        let index = PreferenceIndex::build(&scenario.preference_lists);
        let table = ScoreTable::build(&scenario, &params, &index, &[]);
        assert_eq!(table.coef_double[&WorkerId(1)], params.max_double_volunteer);
    }

    #[test]
    fn conscripting_a_non_volunteer_subtracts_the_shift_penalty() {
        let scenario = scenario_with_one_candidate();
        let params = ScoringParameters::default();
        let index = PreferenceIndex::build(&scenario.preference_lists);
        let night = scenario.shift(ShiftId(4)).unwrap();
        assert_eq!(
            score_shift(&index, WorkerId(1), night, &params),
            -params.shift_penalty.night
        );
    }

    #[test]
    fn non_preference_bearing_shift_contributes_no_shift_score() {
        let scenario = scenario_with_one_candidate();
        let params = ScoringParameters::default();
        let mut shift_preference = Map::new();
        let mut with_worker = scenario.preference_lists.clone();
        shift_preference.insert(ShiftType::Morning, vec![WorkerId(1)]);
        with_worker.shift_preference = shift_preference;
        let index = PreferenceIndex::build(&with_worker);
        let split = scenario.shift(ShiftId(3)).unwrap();
        assert_eq!(score_shift(&index, WorkerId(1), split, &params), 0);
    }
}
