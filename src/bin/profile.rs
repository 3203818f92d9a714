use std::time::Instant;

use voromaze::{
    generators::{Generator, generate_maze},
    logging::init_logging,
    solvers::solve_maze,
};

const SIZE: usize = 255;

fn main() -> voromaze::Result<()> {
    let _guard = init_logging();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(10);

    for generator in [
        Generator::BinaryTree,
        Generator::Backtracker,
        Generator::VoronoiRandom,
        Generator::VoronoiCentroid,
    ] {
        let started = Instant::now();
        for i in 0..num_iters {
            let maze = generate_maze(generator, SIZE, SIZE, Some(i as u64))?;
            let path = solve_maze(&maze);
            tracing::debug!("[profile] {generator} run {i}: path of {} cells", path.len());
        }
        let elapsed = started.elapsed();
        println!(
            "{generator}: {num_iters} runs of {SIZE}x{SIZE} in {:?} ({:?} per run)",
            elapsed,
            elapsed / num_iters.max(1) as u32
        );
    }
    Ok(())
}
