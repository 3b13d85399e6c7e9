//! Profiling benchmark for the rectangle difference and the bounded partition
//!
//! Coverage is a set of random present boxes in a 1000x1000 grid; each request subtracts them
//! from a random viewport and merges the fragments down to the budget.

use rand::Rng;
use rand::SeedableRng;
use regionfetch::{BoxStrategy, Rect, optimal_part};
use std::time::Instant;

/// Generate a random box with sides UP TO max_size inside the 1000x1000 grid
fn random_rect<R: Rng>(rng: &mut R, max_size: i64) -> Rect {
    let min_x = rng.random_range(0..(1000 - max_size));
    let min_y = rng.random_range(0..(1000 - max_size));
    let width = rng.random_range(1..=max_size);
    let height = rng.random_range(1..=max_size);
    Rect::new(min_x, min_y, min_x + width, min_y + height)
}

/// side x side disjoint 2x2 boxes on a grid plus one distant box
fn grid_set(side: i64) -> Vec<Rect> {
    let mut set = Vec::new();
    for i in 0..side {
        for j in 0..side {
            set.push(Rect::new(i * 3, j * 3, i * 3 + 2, j * 3 + 2));
        }
    }
    set.push(Rect::new(-10, -10, -9, -9));
    set
}

fn main() {
    println!("regionfetch Profiling Benchmark");
    println!("===============================\n");

    let num_tests = 1_000;
    let seed = 95756739_u64;
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);

    println!("optimal_part on grids");
    println!("=====================");
    for side in [5_i64, 8, 12, 16] {
        let set = grid_set(side);
        for budget in [1_usize, 4, 9] {
            let start = Instant::now();
            let merged = optimal_part(budget, &set).unwrap();
            let elapsed = start.elapsed();
            println!(
                "{:>4} boxes -> {:>2} ({} out): {:>12.3}ms",
                set.len(),
                budget,
                merged.len(),
                elapsed.as_secs_f64() * 1000.0
            );
        }
    }

    println!("\nget_rects with random coverage");
    println!("==============================");
    let strategy = BoxStrategy::default();
    for num_present in [4_usize, 16, 64] {
        let present: Vec<Rect> = (0..num_present).map(|_| random_rect(&mut rng, 200)).collect();
        let viewports: Vec<Rect> = (0..num_tests).map(|_| random_rect(&mut rng, 400)).collect();

        let mut areas = 0_usize;
        let start = Instant::now();
        for viewport in &viewports {
            areas += strategy.get_rects(viewport, &present, 4).unwrap().len();
        }
        let elapsed = start.elapsed();
        println!(
            "{:>3} present, {} requests ({} areas): {:>10.3}µs/request",
            num_present,
            num_tests,
            areas,
            elapsed.as_secs_f64() * 1_000_000.0 / num_tests as f64
        );
    }
}
