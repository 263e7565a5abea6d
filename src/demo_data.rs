//! Deterministic synthetic scenario generator, for examples, tests and the
//! benchmark binary.

use std::collections::{HashMap, HashSet};

use rand::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::domain::{
    Post, PostId, PreferenceLists, Scenario, Shift, ShiftType, SkillLevelId, Worker, WorkerId,
    SPECIALTY_LEVEL,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoSize {
    Small,
    Large,
}

impl std::str::FromStr for DemoSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SMALL" => Ok(DemoSize::Small),
            "LARGE" => Ok(DemoSize::Large),
            _ => Err(()),
        }
    }
}

impl DemoSize {
    fn parameters(&self) -> DemoParameters {
        match self {
            DemoSize::Small => DemoParameters {
                post_count: 4,
                worker_count: 12,
                capability_count_distribution: vec![(1, 3.0), (2, 2.0), (3, 1.0)],
                specialist_fraction: 0.4,
                shift_preference_fraction: 0.5,
                double_volunteer_fraction: 0.3,
            },
            DemoSize::Large => DemoParameters {
                post_count: 10,
                worker_count: 60,
                capability_count_distribution: vec![(1, 3.0), (2, 2.0), (3, 2.0), (4, 1.0)],
                specialist_fraction: 0.3,
                shift_preference_fraction: 0.4,
                double_volunteer_fraction: 0.2,
            },
        }
    }
}

struct DemoParameters {
    post_count: usize,
    worker_count: usize,
    capability_count_distribution: Vec<(usize, f64)>,
    specialist_fraction: f64,
    shift_preference_fraction: f64,
    double_volunteer_fraction: f64,
}

const FIRST_NAMES: &[&str] = &[
    "Amy", "Beth", "Carl", "Dan", "Elsa", "Flo", "Gus", "Hugo", "Ivy", "Jay",
];
const LAST_NAMES: &[&str] = &[
    "Cole", "Fox", "Green", "Jones", "King", "Li", "Poe", "Rye", "Smith", "Watt",
];

/// Generates a deterministic synthetic scenario for `size`, seeded so
/// repeated calls produce an identical fixture.
pub fn generate(size: DemoSize) -> Scenario {
    let params = size.parameters();
    let mut rng = StdRng::seed_from_u64(0);

    let posts: Vec<Post> = (1..=params.post_count)
        .map(|i| Post {
            id: PostId(i as u32),
            name: format!("Post-{i}"),
        })
        .collect();

    let names = generate_name_permutations(&mut rng);
    let shifts = Shift::canonical_site();

    let mut workers = Vec::with_capacity(params.worker_count);
    for i in 0..params.worker_count {
        let (given_name, family_name) = names[i % names.len()].clone();
        let capability_count = pick_count(&mut rng, &params.capability_count_distribution)
            .min(posts.len())
            .max(1);
        let mut covered_posts: Vec<&Post> = posts
            .choose_multiple(&mut rng, capability_count)
            .collect();
        covered_posts.sort_by_key(|p| p.id.0);

        let mut capabilities = HashMap::new();
        for (j, post) in covered_posts.iter().enumerate() {
            let level = if j == 0 && rng.gen_bool(params.specialist_fraction) {
                SPECIALTY_LEVEL
            } else {
                SkillLevelId(2 + (j as u32 % 3))
            };
            capabilities.insert(post.id, level);
        }

        workers.push(Worker {
            id: WorkerId((i + 1) as u32),
            code: (i + 1) as u32,
            given_name,
            family_name,
            capabilities,
        });
    }

    let mut availability = HashSet::new();
    for worker in &workers {
        for shift in &shifts {
            if rng.gen_bool(0.7) {
                availability.insert((worker.id, shift.id));
            }
        }
    }

    let mut specialists: HashMap<PostId, Vec<WorkerId>> = HashMap::new();
    for post in &posts {
        let mut list: Vec<WorkerId> = workers
            .iter()
            .filter(|w| w.is_specialist_in(post.id))
            .map(|w| w.id)
            .collect();
        list.sort_by_key(|id| {
            workers
                .iter()
                .find(|w| w.id == *id)
                .map(|w| w.code)
                .unwrap_or(u32::MAX)
        });
        if !list.is_empty() {
            specialists.insert(post.id, list);
        }
    }

    let mut shift_preference: HashMap<ShiftType, Vec<WorkerId>> = HashMap::new();
    for shift_type in ShiftType::ALL {
        let mut list: Vec<WorkerId> = workers
            .iter()
            .filter(|_| rng.gen_bool(params.shift_preference_fraction))
            .map(|w| w.id)
            .collect();
        list.shuffle(&mut rng);
        if !list.is_empty() {
            shift_preference.insert(shift_type, list);
        }
    }

    let mut double_volunteers: Vec<WorkerId> = workers
        .iter()
        .filter(|_| rng.gen_bool(params.double_volunteer_fraction))
        .map(|w| w.id)
        .collect();
    double_volunteers.shuffle(&mut rng);

    let mut demand = HashMap::new();
    for post in &posts {
        for shift in &shifts {
            if rng.gen_bool(0.5) {
                demand.insert((post.id, shift.id), 1);
            }
        }
    }

    Scenario {
        workers,
        posts,
        shifts,
        demand,
        availability,
        preference_lists: PreferenceLists {
            specialists,
            shift_preference,
            double_volunteers,
        },
    }
}

/// Picks a count based on a weighted distribution.
fn pick_count(rng: &mut StdRng, distribution: &[(usize, f64)]) -> usize {
    let total_weight: f64 = distribution.iter().map(|(_, w)| w).sum();
    let mut choice = rng.gen::<f64>() * total_weight;

    for (count, weight) in distribution {
        if choice < *weight {
            return *count;
        }
        choice -= weight;
    }
    distribution.last().map(|(c, _)| *c).unwrap_or(1)
}

fn generate_name_permutations(rng: &mut StdRng) -> Vec<(String, String)> {
    let mut names = Vec::with_capacity(FIRST_NAMES.len() * LAST_NAMES.len());
    for first in FIRST_NAMES {
        for last in LAST_NAMES {
            names.push((first.to_string(), last.to_string()));
        }
    }
    names.shuffle(rng);
    names
}
