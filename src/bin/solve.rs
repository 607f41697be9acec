use clap::{Parser, ValueEnum};
use rush_solver::engine::Board;
use rush_solver::heuristics::Heuristic;
use rush_solver::solver::{solve, SearchOutcome, Strategy};
use rush_solver::utils::{board_from_str_array, random_board};
use std::fs;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Ucs,
    Gbfs,
    Astar,
    Idastar,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Ucs => Strategy::Ucs,
            StrategyArg::Gbfs => Strategy::Gbfs,
            StrategyArg::Astar => Strategy::AStar,
            StrategyArg::Idastar => Strategy::IdaStar,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HeuristicArg {
    Blocking,
    Manhattan,
    Combined,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Blocking => Heuristic::BlockingPieces,
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Combined => Heuristic::Combined,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search strategy to run
    #[clap(short, long, value_enum, default_value_t = StrategyArg::Astar)]
    strategy: StrategyArg,

    /// Heuristic for the informed strategies
    #[clap(long, value_enum, default_value_t = HeuristicArg::Blocking)]
    heuristic: HeuristicArg,

    /// Generate a random 6x6 puzzle from this seed instead of reading a file
    #[clap(long, conflicts_with = "board_file")]
    seed: Option<u64>,

    /// Number of blocking vehicles for a generated puzzle
    #[clap(long, default_value_t = 8, requires = "seed")]
    blockers: usize,

    /// Path to the puzzle file
    #[clap(required_unless_present = "seed")]
    board_file: Option<PathBuf>,
}

/// Reads a puzzle file: first line `rows cols`, second line the exit as
/// `row col` in the edge encoding (-1 / rows / cols for the edge just outside
/// the grid), then the grid rows.
fn read_board_file(path: &PathBuf) -> Result<Board, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read file: {}", e))?;

    let lines: Vec<&str> = content
        .lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();
    if lines.len() < 3 {
        return Err(format!(
            "Expected a dimension line, an exit line, and grid rows; found {} lines",
            lines.len()
        ));
    }

    let dims: Vec<usize> = lines[0]
        .split_whitespace()
        .map(|tok| tok.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("Invalid dimension line '{}': {}", lines[0], e))?;
    if dims.len() != 2 {
        return Err(format!("Dimension line must be 'rows cols', got '{}'", lines[0]));
    }
    let (rows, cols) = (dims[0], dims[1]);

    let exit: Vec<isize> = lines[1]
        .split_whitespace()
        .map(|tok| tok.parse::<isize>())
        .collect::<Result<_, _>>()
        .map_err(|e| format!("Invalid exit line '{}': {}", lines[1], e))?;
    if exit.len() != 2 {
        return Err(format!("Exit line must be 'row col', got '{}'", lines[1]));
    }

    let grid = &lines[2..];
    if grid.len() != rows {
        return Err(format!("Expected {} grid rows, found {}", rows, grid.len()));
    }
    for (i, line) in grid.iter().enumerate() {
        if line.chars().count() != cols {
            return Err(format!(
                "Grid row {} has {} cells (expected {})",
                i + 1,
                line.chars().count(),
                cols
            ));
        }
    }

    board_from_str_array(grid, exit[0], exit[1])
        .map_err(|e| format!("Invalid board: {}", e))
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let board = match (&args.board_file, args.seed) {
        (Some(path), _) => read_board_file(path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e)),
        (None, Some(seed)) => {
            println!("Generated puzzle from seed {}\n", seed);
            random_board(6, 6, args.blockers, seed).expect("Failed to generate board")
        }
        (None, None) => unreachable!("clap enforces board_file or --seed"),
    };

    let strategy = Strategy::from(args.strategy);
    let heuristic = Heuristic::from(args.heuristic);

    println!("Initial board state:\n{}\n", board);
    println!(
        "Searching with {} ({} heuristic)...\n",
        strategy.name(),
        heuristic.name()
    );

    let outcome = solve(&board, strategy, heuristic, None)
        .unwrap_or_else(|e| panic!("Board failed validation: {}", e));

    match outcome {
        SearchOutcome::Solved(solution) => {
            println!("Solution found:\n");
            println!("Moves ({}):", solution.cost);
            if solution.moves.is_empty() {
                println!("  Already solved.");
            } else {
                for (i, mv) in solution.moves.iter().enumerate() {
                    let id = solution.boards[i].pieces()[mv.piece].id();
                    println!(
                        "  Move {}: {} {} {}",
                        i + 1,
                        id,
                        mv.direction(),
                        mv.distance()
                    );
                }
            }
            println!(
                "\nNodes expanded: {}, elapsed: {:?}",
                solution.nodes_expanded, solution.elapsed
            );
            println!(
                "\nFinal board state:\n{}\n",
                solution.boards.last().expect("solution path is never empty")
            );
        }
        SearchOutcome::Exhausted {
            nodes_expanded,
            elapsed,
        } => {
            println!("No solution exists.\n");
            println!("Nodes expanded: {}, elapsed: {:?}", nodes_expanded, elapsed);
        }
    }
}
