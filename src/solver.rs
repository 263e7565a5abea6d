//! Solver driver: hands the assembled model to `good_lp`'s SCIP backend and
//! maps its outcome back onto domain types (spec §4.5).

use std::collections::HashMap;

use good_lp::solvers::scip::scip;
use good_lp::{Solution as _, SolverModel};
use tracing::{info, warn};

use crate::domain::{PostId, Scenario, ShiftType, WorkerId};
use crate::error::SolveError;
use crate::model::{AssignmentModel, Candidate};
use crate::scoring::ScoringParameters;

/// Outcome of a solve attempt.
///
/// `good_lp`'s `SolverModel` trait is backend-agnostic: `solve()` returns
/// `Result<impl Solution, ResolutionError>` with no cross-backend way to
/// distinguish a proven-optimal solution from a feasible incumbent returned
/// under a resource limit. Reaching SCIP's own status for that distinction
/// would mean depending on `russcip` directly instead of going through
/// `good_lp`, which this crate does not do. `solve()` below therefore always
/// reports `Optimal`; `Feasible` is kept for the day that introspection is
/// wired in; see spec §4.5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven optimal.
    Optimal,
    /// A feasible incumbent was returned without proof of optimality
    /// (e.g. the engine hit a resource limit). Currently unconstructible;
    /// see the enum's doc comment.
    Feasible,
}

/// The full result of one planning run: the assignment plus the derived
/// values spec.md §4.5 names.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub status: SolverStatus,
    pub assignment: Vec<Candidate>,
    pub doubled_workers: Vec<WorkerId>,
    pub objective: i64,
    pub specialty_assignments_total: i64,
    pub type_preference_respected: HashMap<ShiftType, i64>,
    pub last_assigned_code_per_specialty: HashMap<PostId, Option<u32>>,
    pub last_assigned_code_per_shift_type: HashMap<ShiftType, Option<u32>>,
    pub last_double_code: Option<u32>,
}

/// Builds and solves the assignment model for `scenario`.
///
/// spec §4.5 asks for a fixed random seed and fixed branching so repeated
/// solves of the same scenario are reproducible. This crate does not set
/// either explicitly: `good_lp`'s `scip` backend is driven entirely through
/// the `SolverModel` trait, which has no hook for SCIP-specific parameters
/// such as `randomization/randomseedshift`. Determinism in practice relies
/// on the bundled SCIP build's own default of deterministic, single-threaded
/// search rather than an explicit override from this crate. Property 8
/// (`repeated_solves_are_deterministic`) exercises this reliance directly.
pub fn solve(scenario: &Scenario, params: &ScoringParameters) -> Result<SolveResult, SolveError> {
    let model = AssignmentModel::build(scenario, params);
    let candidate_count = model.candidates.len();

    let mut problem = model.vars.maximise(model.objective.clone()).using(scip);
    for constraint in model.constraints {
        problem = problem.with(constraint);
    }

    info!(candidates = candidate_count, "solving assignment model");
    let solution = problem.solve().map_err(|err| {
        warn!(error = %err, "solver did not return a usable solution");
        match err {
            good_lp::ResolutionError::Infeasible => SolveError::DemandInfeasible,
            other => SolveError::SolverFailure {
                reason: other.to_string(),
            },
        }
    })?;

    let assignment: Vec<Candidate> = model
        .candidates
        .iter()
        .copied()
        .filter(|c| solution.value(model.x[c]) > 0.5)
        .collect();

    let doubled_workers: Vec<WorkerId> = scenario
        .preference_lists
        .double_volunteers
        .iter()
        .copied()
        .filter(|w| {
            model
                .doubled
                .get(w)
                .map(|&v| solution.value(v) > 0.5)
                .unwrap_or(false)
        })
        .collect();

    let objective = assignment
        .iter()
        .map(|c| model.scores.coef_assign.get(c).copied().unwrap_or(0))
        .sum::<i64>()
        + doubled_workers
            .iter()
            .map(|w| model.scores.coef_double.get(w).copied().unwrap_or(0))
            .sum::<i64>();

    let specialty_assignments_total = assignment
        .iter()
        .filter(|&&(w, p, _)| {
            scenario
                .worker(w)
                .map(|worker| worker.is_specialist_in(p))
                .unwrap_or(false)
        })
        .count() as i64;

    let mut type_preference_respected: HashMap<ShiftType, i64> = HashMap::new();
    for shift_type in ShiftType::ALL {
        let count = assignment
            .iter()
            .filter(|&&(w, _, s)| {
                scenario
                    .shift(s)
                    .map(|shift| shift.shift_type == shift_type)
                    .unwrap_or(false)
                    && scenario
                        .preference_lists
                        .shift_preference
                        .get(&shift_type)
                        .map(|l| l.contains(&w))
                        .unwrap_or(false)
            })
            .count() as i64;
        type_preference_respected.insert(shift_type, count);
    }

    let mut last_assigned_code_per_specialty: HashMap<PostId, Option<u32>> = HashMap::new();
    for post in &scenario.posts {
        let max_code = assignment
            .iter()
            .filter(|&&(_, p, _)| p == post.id)
            .filter_map(|&(w, _, _)| scenario.worker(w))
            .map(|worker| worker.code)
            .max();
        last_assigned_code_per_specialty.insert(post.id, max_code);
    }

    let mut last_assigned_code_per_shift_type: HashMap<ShiftType, Option<u32>> = HashMap::new();
    for shift_type in ShiftType::ALL {
        let max_code = assignment
            .iter()
            .filter(|&&(_, _, s)| {
                scenario
                    .shift(s)
                    .map(|shift| shift.shift_type == shift_type)
                    .unwrap_or(false)
            })
            .filter_map(|&(w, _, _)| scenario.worker(w))
            .map(|worker| worker.code)
            .max();
        last_assigned_code_per_shift_type.insert(shift_type, max_code);
    }

    let last_double_code = doubled_workers
        .iter()
        .filter_map(|&w| scenario.worker(w))
        .map(|worker| worker.code)
        .max();

    Ok(SolveResult {
        status: SolverStatus::Optimal,
        assignment,
        doubled_workers,
        objective,
        specialty_assignments_total,
        type_preference_respected,
        last_assigned_code_per_specialty,
        last_assigned_code_per_shift_type,
        last_double_code,
    })
}
