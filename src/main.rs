//! Dojo-Search: run the search engines over the sample data.
//!
//! ## Usage
//!
//! - `dojo-search` - Run every engine in turn
//! - `dojo-search dfs` - Run a single engine
//! - `dojo-search mcts --simulations 500 --playout random` - Tune MCTS

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use log::{LevelFilter, info};
use simple_logger::SimpleLogger;

use dojo_search::constants::{DEFAULT_DEPTH_LIMIT, DEFAULT_SEED, N_SIMS, SAMPLE_GOAL, SAMPLE_ROOT, UCB_C};
use dojo_search::game_tree::{alphabeta_stats, minimax_stats, sample_tree};
use dojo_search::graph::{GraphStore, Heuristic, NodeId};
use dojo_search::informed::{SearchOutcome, astar, best_first, greedy};
use dojo_search::mcts::{GoalReward, MctsConfig, MctsNode, Playout, RandomReward, child_stats, tree_search};
use dojo_search::tictactoe::{Board, Mark, best_move};
use dojo_search::traversal::{bfs, dfs, iddfs, iddfs_any, ucs};

/// Dojo-Search: classic tree and game-tree search algorithms
#[derive(Parser)]
#[command(name = "dojo-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Node to start graph searches from
    #[arg(long, global = true, default_value = SAMPLE_ROOT)]
    root: String,

    /// Print more output (`-vv` prints everything)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Print less output (`-qq` prints only errors)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    quiet: u8,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match self.verbose as i16 - self.quiet as i16 {
            x if x < -2 => LevelFilter::Off,
            -2 => LevelFilter::Error,
            -1 => LevelFilter::Warn,
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run every engine over the sample data
    Demo,
    /// Depth-first search
    Dfs,
    /// Breadth-first search
    Bfs,
    /// Uniform-cost search with unit edge costs
    Ucs,
    /// Iterative-deepening depth-first search
    Iddfs {
        /// Deepest level to try
        #[arg(long, default_value_t = DEFAULT_DEPTH_LIMIT)]
        depth: usize,
        /// Stop at this node; without it the first node on the boundary counts
        #[arg(long)]
        goal: Option<String>,
    },
    /// A* search over the sample heuristic
    Astar {
        #[arg(long, default_value = SAMPLE_GOAL)]
        goal: String,
    },
    /// Best-first search over the sample heuristic
    BestFirst {
        #[arg(long, default_value = SAMPLE_GOAL)]
        goal: String,
    },
    /// Greedy search over the sample heuristic
    Greedy {
        #[arg(long, default_value = SAMPLE_GOAL)]
        goal: String,
    },
    /// Minimax over the sample value tree
    Minimax {
        /// Let the minimizing player move first
        #[arg(long)]
        min_first: bool,
    },
    /// Alpha-beta pruning over the sample value tree
    AlphaBeta {
        /// Let the minimizing player move first
        #[arg(long)]
        min_first: bool,
    },
    /// Monte Carlo Tree Search over the sample graph
    Mcts {
        #[arg(long, default_value_t = N_SIMS)]
        simulations: u32,
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        #[arg(long, default_value_t = UCB_C)]
        exploration: f64,
        #[arg(long, value_enum, default_value_t = PlayoutKind::Goal)]
        playout: PlayoutKind,
        /// Rewarded node for the goal playout
        #[arg(long, default_value = SAMPLE_GOAL)]
        goal: String,
    },
    /// Pick the computer's opening move in tic-tac-toe
    Tictactoe,
}

#[derive(Clone, Copy, ValueEnum)]
enum PlayoutKind {
    /// Reward 1 at the goal node, 0 elsewhere
    Goal,
    /// Random reward in 0..10
    Random,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new()
        .without_timestamps()
        .with_level(cli.log_level())
        .init()
        .context("failed to initialise logging")?;

    let graph = GraphStore::sample();
    let heuristic = Heuristic::sample();
    let root = NodeId::from(cli.root.as_str());
    if !graph.contains(&root) {
        log::warn!("root {root} is not in the graph; it has no children");
    }

    match cli.command.unwrap_or(Commands::Demo) {
        Commands::Demo => run_demo(&graph, &heuristic, &root)?,
        Commands::Dfs => print_visits(dfs(&graph, root)),
        Commands::Bfs => print_visits(bfs(&graph, root)),
        Commands::Ucs => print_visits(ucs(&graph, root)),
        Commands::Iddfs { depth, goal } => run_iddfs(&graph, &root, depth, goal.map(NodeId::from)),
        Commands::Astar { goal } => {
            print_outcome(&astar(&graph, &root, &NodeId::from(goal), &heuristic)?)
        }
        Commands::BestFirst { goal } => {
            print_outcome(&best_first(&graph, &root, &NodeId::from(goal), &heuristic)?)
        }
        Commands::Greedy { goal } => {
            print_outcome(&greedy(&graph, &root, &NodeId::from(goal), &heuristic)?)
        }
        Commands::Minimax { min_first } => run_minimax(!min_first),
        Commands::AlphaBeta { min_first } => run_alphabeta(!min_first),
        Commands::Mcts {
            simulations,
            seed,
            exploration,
            playout,
            goal,
        } => {
            let config = MctsConfig {
                simulations,
                exploration,
                seed,
            };
            let mut playout: Box<dyn Playout> = match playout {
                PlayoutKind::Goal => Box::new(GoalReward::new(goal)),
                PlayoutKind::Random => Box::new(RandomReward::default()),
            };
            run_mcts(&graph, &root, playout.as_mut(), &config)?
        }
        Commands::Tictactoe => run_tictactoe()?,
    }

    Ok(())
}

/// Run every engine once, in the order of the tutorial.
fn run_demo(graph: &GraphStore, heuristic: &Heuristic, root: &NodeId) -> Result<()> {
    let goal = NodeId::from(SAMPLE_GOAL);

    println!("Depth-First Search (DFS):");
    print_visits(dfs(graph, root.clone()));

    println!("\nBreadth-First Search (BFS):");
    print_visits(bfs(graph, root.clone()));

    println!("\nUniform Cost Search (UCS):");
    print_visits(ucs(graph, root.clone()));

    println!("\nIterative Deepening Depth-First Search (IDDFS):");
    run_iddfs(graph, root, DEFAULT_DEPTH_LIMIT, None);

    println!("\nA* Search:");
    print_outcome(&astar(graph, root, &goal, heuristic)?);

    println!("\nBest-First Search:");
    print_outcome(&best_first(graph, root, &goal, heuristic)?);

    println!("\nGreedy Search:");
    print_outcome(&greedy(graph, root, &goal, heuristic)?);

    println!("\nMinimax:");
    run_minimax(true);

    println!("\nAlpha-Beta Pruning:");
    run_alphabeta(true);

    println!("\nMonte Carlo Tree Search (MCTS):");
    run_mcts(graph, root, &mut GoalReward::new(goal), &MctsConfig::default())?;

    println!("\nTic-Tac-Toe:");
    run_tictactoe()
}

fn print_visits(nodes: impl IntoIterator<Item = NodeId>) {
    for node in nodes {
        println!("Visited node: {node}");
    }
}

fn print_outcome(outcome: &SearchOutcome) {
    print_visits(outcome.visited.iter().cloned());
    match &outcome.goal {
        Some(goal) => {
            let path: Vec<&str> = goal.path.iter().map(NodeId::as_str).collect();
            println!("Path: {} (cost {})", path.join(" -> "), goal.cost);
        }
        None => println!("Goal not found"),
    }
}

fn run_iddfs(graph: &GraphStore, root: &NodeId, depth: usize, goal: Option<NodeId>) {
    let outcome = match &goal {
        Some(goal) => iddfs(graph, root, depth, |n| n == goal),
        None => iddfs_any(graph, root, depth),
    };
    print_visits(outcome.visited);
    if let Some((node, depth)) = outcome.found {
        info!("iddfs stopped at {node} (depth {depth})");
    }
}

fn run_minimax(maximizing: bool) {
    let stats = minimax_stats(&sample_tree(), maximizing);
    println!("Optimal value: {}", stats.value);
    info!("minimax visited {} nodes", stats.nodes_visited);
}

fn run_alphabeta(maximizing: bool) {
    let stats = alphabeta_stats(&sample_tree(), f64::NEG_INFINITY, f64::INFINITY, maximizing);
    println!("Optimal value: {}", stats.value);
    info!(
        "alpha-beta visited {} nodes with {} cutoff(s)",
        stats.nodes_visited, stats.cutoffs
    );
}

fn run_mcts(graph: &GraphStore, root: &NodeId, playout: &mut dyn Playout, config: &MctsConfig) -> Result<()> {
    let mut tree = MctsNode::new(root.clone());
    let best = tree_search(&mut tree, graph, playout, config)?;
    for child in child_stats(&tree) {
        info!(
            "child {} visits={} mean={:.3}",
            child.name, child.visits, child.mean_reward
        );
    }
    match best {
        Some(best) => println!("Best child node: {best}"),
        None => println!("Root {root} has no children"),
    }
    Ok(())
}

fn run_tictactoe() -> Result<()> {
    let mut board = Board::new();
    if let Some(mv) = best_move(&mut board) {
        board.play(mv, Mark::X)?;
    }
    print!("{board}");
    Ok(())
}
