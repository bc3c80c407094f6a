//! Marga - run the depth-first navigator on a simulated maze
//!
//! Usage:
//!   marga mazes/spiral.txt --show-path
//!   marga tests/scenarios/corridor.yaml
//!   marga --generate 41x21 --seed 7 --mode iterative
//!   marga --generate 21x21 --wall-off
//!
//! Enable logging with RUST_LOG, e.g. `RUST_LOG=marga=debug`.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use marga::sim::{
    GridMaze, MazeError, RobotCommand, Scenario, ScenarioError, SimulatedRobot, generate_maze,
};
use marga::{ConfigLoadError, GridCoord, Navigator, NavigatorConfig, TraversalMode};

/// Navigate a simulated robot out of a maze
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ASCII maze file, or a scenario `.yaml`
    maze: Option<PathBuf>,

    /// Generate a random WIDTHxHEIGHT maze instead of loading one
    #[arg(short, long, conflicts_with = "maze")]
    generate: Option<String>,

    /// Seed for --generate (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Seal the exit of the generated maze so it cannot be reached
    #[arg(long, requires = "generate")]
    wall_off: bool,

    /// Navigator configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the traversal mode
    #[arg(short, long, value_enum)]
    mode: Option<ModeArg>,

    /// Print the maze with visited cells marked
    #[arg(long)]
    show_path: bool,

    /// Print every command the robot received
    #[arg(long)]
    trace_commands: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Recursive,
    Iterative,
}

impl From<ModeArg> for TraversalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Recursive => TraversalMode::Recursive,
            ModeArg::Iterative => TraversalMode::Iterative,
        }
    }
}

/// Mazes with more open cells than this run with the explicit frame stack
/// unless `--mode` says otherwise. Recursion depth is bounded by the open
/// cell count.
const RECURSIVE_CELL_LIMIT: usize = 4096;

#[derive(Error, Debug)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigLoadError),

    #[error("Maze error: {0}")]
    Maze(#[from] MazeError),

    #[error("Scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("Invalid --generate size '{0}', expected WIDTHxHEIGHT")]
    Size(String),

    #[error("No maze given; pass a maze file or --generate WIDTHxHEIGHT")]
    NoMaze,

    #[error("Cannot wall off the exit at {0}: it is the start or next to it")]
    WallOff(GridCoord),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the exit was reached.
fn run(args: &Args) -> Result<bool, CliError> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            NavigatorConfig::load(path)?
        }
        None => NavigatorConfig::default(),
    };

    let maze = if let Some(size) = &args.generate {
        let (width, height) = parse_size(size)?;
        let seed = args.seed.unwrap_or_else(rand::random);
        println!("Generating {}x{} maze with seed {}", width, height, seed);
        let mut maze = generate_maze(width, height, &mut StdRng::seed_from_u64(seed))?;
        if args.wall_off && !maze.wall_off_exit() {
            return Err(CliError::WallOff(maze.exit().unwrap_or(maze.start())));
        }
        maze
    } else {
        let path = args.maze.as_deref().ok_or(CliError::NoMaze)?;
        if is_yaml(path) {
            let scenario = Scenario::load(path)?;
            println!("Scenario: {}", scenario.name);
            if !scenario.description.is_empty() {
                println!("  {}", scenario.description);
            }
            if args.config.is_none() {
                config = scenario.config.clone();
            }
            let base_dir = path.parent().unwrap_or(Path::new("."));
            scenario.build_maze(base_dir)?
        } else {
            GridMaze::load(path)?
        }
    };

    match args.mode {
        Some(mode) => config.traversal = mode.into(),
        None if config.traversal == TraversalMode::Recursive
            && maze.floor_count() > RECURSIVE_CELL_LIMIT =>
        {
            warn!(
                "{} open cells, switching to iterative traversal",
                maze.floor_count()
            );
            config.traversal = TraversalMode::Iterative;
        }
        None => {}
    }

    println!(
        "Maze: {}x{}, {} open cells, start {}",
        maze.width(),
        maze.height(),
        maze.floor_count(),
        maze.start()
    );

    let mut robot = SimulatedRobot::new(maze);
    let mut navigator = Navigator::new(&mut robot, config);
    let report = navigator.move_to_exit();
    let visited = navigator.visited().clone();

    println!("Outcome:       {}", report.outcome.code());
    println!("Cells visited: {}", report.stats.cells_visited);
    println!(
        "Probes:        {} ({} blocked)",
        report.stats.probes, report.stats.blocked
    );
    println!("Backtracks:    {}", report.stats.backtracks);
    println!("Max depth:     {}", report.stats.max_depth);
    println!("Final cell:    {}", robot.relative_position());

    if args.show_path {
        println!();
        print!("{}", robot.maze().render(&visited));
    }

    if args.trace_commands {
        println!();
        for command in robot.commands() {
            match command {
                RobotCommand::TryMove { direction, moved } => {
                    println!("try_move {:<5} -> {}", direction.as_str(), moved)
                }
                RobotCommand::Step { direction } => println!("step     {}", direction.as_str()),
                RobotCommand::Halt => println!("halt_and_catch_fire"),
            }
        }
    }

    Ok(report.is_success())
}

fn parse_size(size: &str) -> Result<(usize, usize), CliError> {
    let (w, h) = size
        .split_once(['x', 'X'])
        .ok_or_else(|| CliError::Size(size.to_string()))?;
    let width = w.trim().parse().map_err(|_| CliError::Size(size.to_string()))?;
    let height = h.trim().parse().map_err(|_| CliError::Size(size.to_string()))?;
    Ok((width, height))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
