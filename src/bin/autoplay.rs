//! Headless self-play through the move sequencer.
//!
//! White is the engine's own computer opponent; black is driven by a second
//! agent that submits moves whenever the sequencer reports the turn committable.
//! Time is simulated by jumping straight to the next scheduled continuation.

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use web_time::Instant;

use reversi_engine::{
    AiAgent, AiPolicy, Color, EngineConfig, Event, MatchTally, MoveSequencer, Phase,
};

#[derive(Parser)]
#[command(name = "autoplay")]
#[command(about = "Play computer-vs-computer Reversi games and print the tally")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    games: usize,

    /// Base RNG seed
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Policy for black
    #[arg(long, value_enum, default_value_t = AiPolicy::Basic)]
    black: AiPolicy,

    /// Policy for white
    #[arg(long, value_enum, default_value_t = AiPolicy::GreedyCorner)]
    white: AiPolicy,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = EngineConfig {
        computer_enabled: true,
        computer_color: Color::White,
        policy: cli.white,
        seed: cli.seed,
        ..EngineConfig::default()
    };
    let mut engine = MoveSequencer::new(config);
    let mut black = AiAgent::new(cli.black, cli.seed.wrapping_add(1));
    let mut now = Instant::now();

    for game in 0..cli.games {
        engine.new_game(now);
        play_one(&mut engine, &mut black, &mut now)
            .with_context(|| format!("game {game} stalled"))?;
        info!(game, scores = ?engine.scores(), "finished");
    }

    let tally = engine.match_tally();
    println!(
        "black ({:?}) wins: {}  white ({:?}) wins: {}  draws: {}",
        cli.black,
        tally.black_wins,
        cli.white,
        tally.white_wins,
        draws(cli.games, tally)
    );
    Ok(())
}

fn draws(games: usize, tally: MatchTally) -> usize {
    let decided = tally.black_wins as usize + tally.white_wins as usize;
    games.saturating_sub(decided)
}

fn play_one(engine: &mut MoveSequencer, black: &mut AiAgent, now: &mut Instant) -> Result<()> {
    loop {
        let status = engine.status();
        if let Phase::Terminal { .. } = status.phase {
            if !engine.is_busy() {
                return Ok(());
            }
        }

        if status.committable {
            let pos = black
                .choose(engine.state().board(), status.mover)
                .context("black has no legal move while committable")?;
            engine.try_submit(pos, *now)?;
        } else if let Some(due) = engine.next_due() {
            *now = due;
        } else {
            bail!("nothing scheduled in phase {:?}", status.phase);
        }

        for event in engine.poll(*now) {
            if let Event::Passed { passer } = event {
                info!(?passer, "pass");
            }
        }
    }
}
