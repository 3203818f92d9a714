use std::io::Write;

use rand::Rng;
use voromaze::{
    Maze,
    generators::{
        Backtracker, BinaryTree, CentroidSeedStrategy, Generator, MazeGenerator,
        RandomSeedStrategy, SeedStrategy, Stage, VoronoiGenerator, get_rng,
    },
    logging::init_logging,
    metric::{Chebyshev, Manhattan, SquaredEuclidean},
    render::render,
    solvers::solve_maze,
};

/// Cells per seed used to size the Voronoi partition at every stage.
const CELLS_PER_SEED: usize = 40;
/// Centroid buckets get thin past a handful of seeds.
const MAX_CENTROID_SEEDS: usize = 8;

const GENERATORS: [Generator; 4] = [
    Generator::BinaryTree,
    Generator::Backtracker,
    Generator::VoronoiRandom,
    Generator::VoronoiCentroid,
];

const METRICS: [&str; 3] = ["Manhattan", "Squared Euclidean", "Chebyshev"];

fn read_line(input: &mut String) -> std::io::Result<&str> {
    input.clear();
    std::io::stdin().read_line(input)?;
    Ok(input.trim())
}

/// Prints a numbered menu and returns the index picked by the user.
fn select_from_menu<T: std::fmt::Display>(
    title: &str,
    items: &[T],
    input: &mut String,
) -> std::io::Result<Option<usize>> {
    println!("{title}");
    for (i, item) in items.iter().enumerate() {
        println!("{}. {}", i + 1, item);
    }
    let choice = read_line(input)?
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=items.len()).contains(n))
        .map(|n| n - 1);
    if choice.is_none() {
        eprintln!("Invalid selection.");
    }
    Ok(choice)
}

fn generate_voronoi<S: SeedStrategy, R: Rng + ?Sized>(
    seeds: S,
    metric: usize,
    rows: usize,
    columns: usize,
    rng: &mut R,
) -> voromaze::Result<Maze> {
    match metric {
        0 => VoronoiGenerator::new(seeds, Manhattan).generate(rows, columns, rng),
        1 => VoronoiGenerator::new(seeds, SquaredEuclidean).generate(rows, columns, rng),
        _ => VoronoiGenerator::new(seeds, Chebyshev).generate(rows, columns, rng),
    }
}

fn main() -> std::io::Result<()> {
    let _guard = init_logging();

    // An optional RNG seed as the first argument makes the maze reproducible.
    let seed = std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok());
    let mut rng = get_rng(seed);

    let mut input = String::new();
    println!("Enter maze dimensions (rows columns):");
    let dims = read_line(&mut input)?
        .split_whitespace()
        .take(2)
        .filter_map(|s| s.parse::<usize>().ok())
        .collect::<Vec<_>>();
    let &[rows, columns] = dims.as_slice() else {
        eprintln!("Please enter two valid numbers for rows and columns.");
        return Ok(());
    };

    let Some(choice) = select_from_menu(
        "Select maze generation algorithm:",
        &GENERATORS,
        &mut input,
    )?
    else {
        return Ok(());
    };
    let generator = GENERATORS[choice];

    let result = match generator {
        Generator::BinaryTree => BinaryTree.generate(rows, columns, &mut rng),
        Generator::Backtracker => Backtracker.generate(rows, columns, &mut rng),
        Generator::VoronoiRandom | Generator::VoronoiCentroid => {
            let Some(metric) =
                select_from_menu("Select distance metric:", &METRICS, &mut input)?
            else {
                return Ok(());
            };
            if generator == Generator::VoronoiRandom {
                let seeds =
                    RandomSeedStrategy::per_stage(|stage: &Stage| stage.len() / CELLS_PER_SEED);
                generate_voronoi(seeds, metric, rows, columns, &mut rng)
            } else {
                let seeds = CentroidSeedStrategy::per_stage(|stage: &Stage| {
                    (stage.len() / CELLS_PER_SEED).min(MAX_CENTROID_SEEDS)
                });
                generate_voronoi(seeds, metric, rows, columns, &mut rng)
            }
        }
    };

    let maze = match result {
        Ok(maze) => maze,
        Err(err) => {
            tracing::error!("[main] generation failed: {err}");
            eprintln!("Could not generate the maze: {err}");
            return Ok(());
        }
    };
    tracing::info!("[main] generated a {rows}x{columns} maze with {generator}");

    let path = solve_maze(&maze);
    let mut stdout = std::io::stdout();
    render(&mut stdout, &maze, &path)?;
    if path.is_empty() {
        println!("No path found to the goal.");
    } else {
        println!("Maze solved! Path length: {}", path.len());
    }
    stdout.flush()
}
