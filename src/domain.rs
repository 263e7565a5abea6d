//! Canonical data model of schedulable entities and their relationships (spec §3).

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::registry::Entity;

macro_rules! entity_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub u32);
    };
}

entity_id!(WorkerId);
entity_id!(PostId);
entity_id!(SkillLevelId);
entity_id!(ShiftId);

/// Sentinel skill level denoting a worker's specialty.
pub const SPECIALTY_LEVEL: SkillLevelId = SkillLevelId(1);

/// A worker eligible to be assigned (an active-contract candidate).
#[derive(Debug, Clone, PartialEq)]
pub struct Worker {
    pub id: WorkerId,
    /// Stable ordering key, independent of `id`.
    pub code: u32,
    pub given_name: String,
    pub family_name: String,
    /// post → skill level; level `SPECIALTY_LEVEL` (1) designates a specialty.
    pub capabilities: HashMap<PostId, SkillLevelId>,
}

impl Worker {
    pub fn is_specialist_in(&self, post: PostId) -> bool {
        self.capabilities.get(&post) == Some(&SPECIALTY_LEVEL)
    }
}

impl Entity for Worker {
    const KIND: &'static str = "Worker";
    fn id(&self) -> u32 {
        self.id.0
    }
}

/// A job role to be staffed during a shift.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub name: String,
}

impl Entity for Post {
    const KIND: &'static str = "Post";
    fn id(&self) -> u32 {
        self.id.0
    }
}

/// A grading of how well a worker performs a post. `id == 1` is the
/// specialty sentinel; any other ids and their meanings are site data.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillLevel {
    pub id: SkillLevelId,
    pub name: String,
}

impl Entity for SkillLevel {
    const KIND: &'static str = "SkillLevel";
    fn id(&self) -> u32 {
        self.id.0
    }
}

/// One of the three canonical shift-preference categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftType {
    Morning,
    Afternoon,
    Night,
}

impl ShiftType {
    pub const ALL: [ShiftType; 3] = [ShiftType::Morning, ShiftType::Afternoon, ShiftType::Night];

    pub fn id(&self) -> u32 {
        match self {
            ShiftType::Morning => 1,
            ShiftType::Afternoon => 2,
            ShiftType::Night => 3,
        }
    }
}

/// An assignable time slot with a type and a doubling flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Shift {
    pub id: ShiftId,
    pub name: String,
    pub can_double: bool,
    pub shift_type: ShiftType,
}

impl Shift {
    /// All shifts except SPLIT carry preference weight (spec §3).
    pub fn is_preference_bearing(&self) -> bool {
        self.name != "SPLIT"
    }

    /// The five canonical shift instances for the implemented site.
    pub fn canonical_site() -> Vec<Shift> {
        vec![
            Shift {
                id: ShiftId(1),
                name: "MORNING".into(),
                can_double: true,
                shift_type: ShiftType::Morning,
            },
            Shift {
                id: ShiftId(2),
                name: "AFTERNOON".into(),
                can_double: true,
                shift_type: ShiftType::Afternoon,
            },
            Shift {
                id: ShiftId(3),
                name: "SPLIT".into(),
                can_double: false,
                shift_type: ShiftType::Morning,
            },
            Shift {
                id: ShiftId(4),
                name: "NIGHT1".into(),
                can_double: false,
                shift_type: ShiftType::Night,
            },
            Shift {
                id: ShiftId(5),
                name: "NIGHT2".into(),
                can_double: false,
                shift_type: ShiftType::Night,
            },
        ]
    }
}

impl Entity for Shift {
    const KIND: &'static str = "Shift";
    fn id(&self) -> u32 {
        self.id.0
    }
}

/// Non-negative staffing requirement per (post, shift).
pub type Demand = HashMap<(PostId, ShiftId), u32>;

/// Ordered preference lists driving the scoring engine (spec §3/§4.2).
#[derive(Debug, Clone, Default)]
pub struct PreferenceLists {
    /// post → specialists at that post, ordered by worker `code`.
    pub specialists: HashMap<PostId, Vec<WorkerId>>,
    /// shift type → workers declaring preference/volunteering for it.
    pub shift_preference: HashMap<ShiftType, Vec<WorkerId>>,
    /// workers willing to be scheduled on two shifts in the same day.
    pub double_volunteers: Vec<WorkerId>,
}

/// The full set of inputs to one planning run (spec §3).
#[derive(Debug, Clone)]
pub struct Scenario {
    pub workers: Vec<Worker>,
    pub posts: Vec<Post>,
    pub shifts: Vec<Shift>,
    pub demand: Demand,
    /// Exactly the (worker, shift) pairs in which the worker may be
    /// scheduled; exclusions are already subtracted by the loader.
    pub availability: HashSet<(WorkerId, ShiftId)>,
    pub preference_lists: PreferenceLists,
}

impl Scenario {
    pub fn worker(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn shift(&self, id: ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    /// Checks invariants 1–3 and 5 of spec §3. Invariant 4 (the demand sanity
    /// bound) is left to the solver, which reports infeasibility instead.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (post, workers) in &self.preference_lists.specialists {
            check_no_duplicates(workers, &format!("specialists[{}]", post.0))?;
            for worker_id in workers {
                let worker = self.worker(*worker_id).ok_or(ValidationError::InvalidWorkerReference {
                    worker: *worker_id,
                    context: "preference_lists.specialists",
                })?;
                if !worker.is_specialist_in(*post) {
                    return Err(ValidationError::SpecialistNotCapable {
                        post: *post,
                        worker: *worker_id,
                    });
                }
            }
        }

        for (shift_type, workers) in &self.preference_lists.shift_preference {
            check_no_duplicates(workers, &format!("shift_preference[{:?}]", shift_type))?;
            for worker_id in workers {
                self.worker(*worker_id).ok_or(ValidationError::InvalidWorkerReference {
                    worker: *worker_id,
                    context: "preference_lists.shift_preference",
                })?;
            }
        }

        check_no_duplicates(&self.preference_lists.double_volunteers, "double_volunteers")?;
        for worker_id in &self.preference_lists.double_volunteers {
            self.worker(*worker_id).ok_or(ValidationError::InvalidWorkerReference {
                worker: *worker_id,
                context: "preference_lists.double_volunteers",
            })?;
        }

        for (worker_id, shift_id) in &self.availability {
            self.worker(*worker_id).ok_or(ValidationError::InvalidWorkerReference {
                worker: *worker_id,
                context: "availability",
            })?;
            self.shift(*shift_id).ok_or(ValidationError::InvalidShiftReference {
                shift: *shift_id,
                context: "availability",
            })?;
        }

        for (post_id, shift_id) in self.demand.keys() {
            self.post(*post_id).ok_or(ValidationError::InvalidPostReference {
                post: *post_id,
                context: "demand",
            })?;
            self.shift(*shift_id).ok_or(ValidationError::InvalidShiftReference {
                shift: *shift_id,
                context: "demand",
            })?;
        }

        Ok(())
    }
}

fn check_no_duplicates(workers: &[WorkerId], list: &str) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(workers.len());
    for worker in workers {
        if !seen.insert(*worker) {
            return Err(ValidationError::DuplicatePreferenceEntry {
                worker: *worker,
                list: list.to_string(),
            });
        }
    }
    Ok(())
}
