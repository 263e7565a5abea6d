//! Builds the integer linear program for one planning run (spec §4.4).
//!
//! Candidate tuples are enumerated once, in the scenario's declared order,
//! and turned into a `good_lp` problem: binary assignment variables `x(w,p,s)`,
//! binary doubling indicators `doubled(w)`, the five hard constraints, and
//! the linear objective.

use std::collections::HashMap;

use good_lp::{constraint, variable, Expression, ProblemVariables, Variable};
use tracing::debug;

use crate::domain::{PostId, Scenario, ShiftId, WorkerId};
use crate::preference::PreferenceIndex;
use crate::scoring::{ScoreTable, ScoringParameters};

/// A worker/post/shift triple the worker is eligible for: capable of the
/// post and available for the shift.
pub type Candidate = (WorkerId, PostId, ShiftId);

/// Enumerates every `(worker, post, shift)` triple the worker is capable of
/// and available for, iterating workers, then posts, then shifts in the
/// scenario's declared order.
pub fn enumerate_candidates(scenario: &Scenario) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    for worker in &scenario.workers {
        for post in &scenario.posts {
            if !worker.capabilities.contains_key(&post.id) {
                continue;
            }
            for shift in &scenario.shifts {
                if scenario.availability.contains(&(worker.id, shift.id)) {
                    candidates.push((worker.id, post.id, shift.id));
                }
            }
        }
    }
    candidates
}

/// The assembled linear model: variables plus the bookkeeping needed to
/// read a solution back out.
pub struct AssignmentModel {
    pub vars: ProblemVariables,
    pub objective: Expression,
    pub constraints: Vec<good_lp::Constraint>,
    pub x: HashMap<Candidate, Variable>,
    pub doubled: HashMap<WorkerId, Variable>,
    pub candidates: Vec<Candidate>,
    pub scores: ScoreTable,
}

impl AssignmentModel {
    pub fn build(scenario: &Scenario, params: &ScoringParameters) -> Self {
        let index = PreferenceIndex::build(&scenario.preference_lists);
        let candidates = enumerate_candidates(scenario);
        let scores = ScoreTable::build(scenario, params, &index, &candidates);

        let mut vars = ProblemVariables::new();
        let mut x = HashMap::with_capacity(candidates.len());
        for &candidate in &candidates {
            x.insert(candidate, vars.add(variable().binary()));
        }

        let doublers: Vec<WorkerId> = scenario.preference_lists.double_volunteers.clone();
        let mut doubled = HashMap::with_capacity(doublers.len());
        for &worker_id in &doublers {
            doubled.insert(worker_id, vars.add(variable().binary()));
        }

        let mut objective = Expression::from(0.0);
        for &candidate in &candidates {
            let coef = scores.coef_assign.get(&candidate).copied().unwrap_or(0);
            objective += coef as f64 * x[&candidate];
        }
        for &worker_id in &doublers {
            let coef = scores.coef_double.get(&worker_id).copied().unwrap_or(0);
            objective += coef as f64 * doubled[&worker_id];
        }

        let mut constraints = Vec::new();

        // 1. demand coverage: exact equality per (post, shift).
        for post in &scenario.posts {
            for shift in &scenario.shifts {
                let demand = scenario
                    .demand
                    .get(&(post.id, shift.id))
                    .copied()
                    .unwrap_or(0);
                let sum: Expression = candidates
                    .iter()
                    .filter(|&&(_, p, s)| p == post.id && s == shift.id)
                    .map(|&c| Expression::from(x[&c]))
                    .sum();
                constraints.push(constraint!(sum == demand as f64));
            }
        }

        // 2. at most one post per shift, for every worker.
        for worker in &scenario.workers {
            for shift in &scenario.shifts {
                let sum: Expression = candidates
                    .iter()
                    .filter(|&&(w, _, s)| w == worker.id && s == shift.id)
                    .map(|&c| Expression::from(x[&c]))
                    .sum();
                constraints.push(constraint!(sum <= 1.0));
            }
        }

        // 3. total shifts worked per worker, bounded by doubling eligibility.
        let mut shifts_worked: HashMap<WorkerId, Expression> = HashMap::new();
        for worker in &scenario.workers {
            let sum: Expression = candidates
                .iter()
                .filter(|&&(w, _, _)| w == worker.id)
                .map(|&c| Expression::from(x[&c]))
                .sum();
            let cap = if doubled.contains_key(&worker.id) { 2 } else { 1 };
            constraints.push(constraint!(sum.clone() <= cap as f64));
            shifts_worked.insert(worker.id, sum);
        }

        // 4. doubling indicator linearization.
        for &worker_id in &doublers {
            let sum = shifts_worked[&worker_id].clone();
            let d = doubled[&worker_id];
            constraints.push(constraint!(sum.clone() <= 1.0 + d));
            constraints.push(constraint!(sum >= 2.0 * d));
        }

        // 5. no doubling across non-doublable shifts.
        for &worker_id in &doublers {
            let non_doublable_sum: Expression = candidates
                .iter()
                .filter(|&&(w, _, s)| {
                    w == worker_id
                        && scenario
                            .shift(s)
                            .map(|shift| !shift.can_double)
                            .unwrap_or(false)
                })
                .map(|&c| Expression::from(x[&c]))
                .sum();
            let d = doubled[&worker_id];
            constraints.push(constraint!(non_doublable_sum <= 2.0 * (1.0 - d)));
        }

        debug!(
            candidates = candidates.len(),
            doublers = doublers.len(),
            constraints = constraints.len(),
            "assignment model built"
        );

        Self {
            vars,
            objective,
            constraints,
            x,
            doubled,
            candidates,
            scores,
        }
    }
}
