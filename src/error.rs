//! Error kinds for the scheduling core (spec §7).

use thiserror::Error;

use crate::domain::{PostId, ShiftId, WorkerId};

/// Raised by the entity registry when the same id is registered twice with
/// disagreeing fields.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("{kind} id={id} was registered twice with conflicting fields")]
    DuplicateIdConflict { kind: &'static str, id: u32 },
}

/// Raised while validating the inputs to a planning run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("worker {worker:?} referenced in {context} is not a known worker")]
    InvalidWorkerReference { worker: WorkerId, context: &'static str },

    #[error("post {post:?} referenced in {context} is not a known post")]
    InvalidPostReference { post: PostId, context: &'static str },

    #[error("shift {shift:?} referenced in {context} is not a known shift")]
    InvalidShiftReference { shift: ShiftId, context: &'static str },

    #[error("worker {worker:?} appears more than once in preference list {list}")]
    DuplicatePreferenceEntry { worker: WorkerId, list: String },

    #[error("specialists[{post:?}] contains worker {worker:?} who is not a specialty-level performer of that post")]
    SpecialistNotCapable { post: PostId, worker: WorkerId },

    #[error("demand({post:?}, {shift:?}) = {demand} is negative or otherwise invalid")]
    InvalidDemand {
        post: PostId,
        shift: ShiftId,
        demand: i64,
    },
}

/// Outcome of a solve attempt that did not produce a returnable assignment.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// Declared demand exceeds what availability/capability/doubling rules
    /// can satisfy; the solver proved the model infeasible.
    #[error("demand cannot be satisfied under the declared availability and capability constraints")]
    DemandInfeasible,

    /// The underlying engine returned neither an optimal nor a feasible
    /// solution, for reasons other than proven infeasibility (e.g. an
    /// internal solver error).
    #[error("the solver engine failed to produce a solution: {reason}")]
    SolverFailure { reason: String },
}
