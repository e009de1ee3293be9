//! Dino Env entry point
//!
//! Runs episodes with a built-in policy, keeps the best ones on a
//! leaderboard, and can capture a replay into memory.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use dino_env::leaderboard::Entry;
use dino_env::render::FrameRecorder;
use dino_env::rollout::{
    AlwaysNoop, JumpWhenClose, Policy, RandomPolicy, RewardLogger, run_episode, run_replay,
};
use dino_env::{DinoGame, GameConfig, Leaderboard};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyKind {
    /// Jump when the next obstacle gets close
    Heuristic,
    /// Coin flip every tick
    Random,
    /// Never jump
    Noop,
}

#[derive(Debug, Parser)]
#[command(name = "dino-env", about = "Run the dino game environment with a built-in policy")]
struct Args {
    /// Base seed; episode i is reset with seed + i
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 10)]
    episodes: u64,

    /// Step budget per episode
    #[arg(long, default_value_t = 10_000)]
    max_steps: u64,

    #[arg(long, value_enum, default_value_t = PolicyKind::Heuristic)]
    policy: PolicyKind,

    /// JSON game config (defaults to the classic game)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Capture a replay of this many steps after the episodes
    #[arg(long, default_value_t = 0)]
    record: u64,

    /// Directory the replay frames are written to as raw RGB
    #[arg(long, default_value = "replay")]
    record_dir: PathBuf,

    /// Leaderboard file to update
    #[arg(long)]
    leaderboard: Option<PathBuf>,
}

fn make_policy(kind: PolicyKind, config: &GameConfig, seed: u64) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Heuristic => Box::new(JumpWhenClose {
            dino_x: config.dino_x,
            ..Default::default()
        }),
        PolicyKind::Random => Box::new(RandomPolicy::new(seed)),
        PolicyKind::Noop => Box::new(AlwaysNoop),
    }
}

fn run(args: Args) -> dino_env::Result<()> {
    let config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let mut env = DinoGame::new(config.clone(), args.seed)?;
    let mut policy = make_policy(args.policy, &config, args.seed);
    let mut board = match &args.leaderboard {
        Some(path) => Leaderboard::load(path)?,
        None => Leaderboard::new(),
    };

    log::info!(
        "Running {} episodes with {:?} policy (seed {})",
        args.episodes,
        args.policy,
        args.seed
    );

    let mut logger = RewardLogger::new();
    let mut best = 0.0f64;
    for i in 0..args.episodes {
        let seed = args.seed.wrapping_add(i);
        let summary = run_episode(
            &mut env,
            policy.as_mut(),
            Some(seed),
            args.max_steps,
            &mut logger,
            None,
        )?;
        best = best.max(summary.score);

        if let Some(rank) = board.add(Entry::from_summary(&summary, Some(seed))) {
            log::info!("Episode {} placed #{} on the leaderboard", i + 1, rank);
        }
        println!(
            "episode {:>4}  seed {:>6}  ticks {:>6}  reward {:>9.0}  score {:>8.1}",
            i + 1,
            seed,
            summary.ticks,
            summary.total_reward,
            summary.score
        );
    }

    println!(
        "\n{} steps, {} collisions, total reward {:.0}, best score {:.1}",
        logger.rewards.len(),
        logger.penalties(),
        logger.total(),
        best
    );

    if let Some(path) = &args.leaderboard {
        board.save(path)?;
        if let Some(top) = board.best() {
            println!("leaderboard best: {} ticks (seed {:?})", top.ticks, top.seed);
        }
    }

    if args.record > 0 {
        let mut recorder = FrameRecorder::new(args.record as usize);
        let finished = run_replay(
            &mut env,
            policy.as_mut(),
            Some(args.seed),
            args.record,
            &mut recorder,
        )?;
        let paths = recorder.write_raw(&args.record_dir)?;
        println!(
            "replay: {} frames at {} fps written to {}, {} episodes finished",
            paths.len(),
            recorder.fps,
            args.record_dir.display(),
            finished.len()
        );
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Dino Env starting...");

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
