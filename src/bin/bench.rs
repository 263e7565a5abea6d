//! Benchmark for model construction and solve time.
//!
//! Run with: cargo run --release --bin bench

use std::time::Instant;

use shift_assign_core::{demo_data, scoring::ScoringParameters, solver};

fn main() {
    let scenario = demo_data::generate(demo_data::DemoSize::Large);
    let params = ScoringParameters::default();

    println!("Benchmark: model construction and solve");
    println!("  Workers: {}", scenario.workers.len());
    println!("  Posts: {}", scenario.posts.len());
    println!("  Shifts: {}", scenario.shifts.len());
    println!();

    let build_start = Instant::now();
    let model = shift_assign_core::model::AssignmentModel::build(&scenario, &params);
    println!(
        "Model built: {} candidates, {} constraints ({:?})",
        model.candidates.len(),
        model.constraints.len(),
        build_start.elapsed()
    );

    let solve_start = Instant::now();
    match solver::solve(&scenario, &params) {
        Ok(result) => {
            println!(
                "Solved: {} assignments, objective {} ({:?})",
                result.assignment.len(),
                result.objective,
                solve_start.elapsed()
            );
        }
        Err(err) => {
            println!("Solve failed: {err} ({:?})", solve_start.elapsed());
        }
    }
}
