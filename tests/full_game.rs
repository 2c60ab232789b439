use reversi_engine::{
    AiAgent, AiPolicy, Board, Color, EngineConfig, Event, GameResult, MoveSequencer, Phase,
    Position, rules,
};
use web_time::{Duration, Instant};

/// Plays one game to the end, black driven by `black`, white by the engine.
/// Returns every event seen plus the number of placements.
fn play_out(engine: &mut MoveSequencer, black: &mut AiAgent, start: Instant) -> (Vec<Event>, usize) {
    let mut now = start;
    let mut events = Vec::new();
    let mut placements = 0;

    for _ in 0..10_000 {
        let status = engine.status();
        if matches!(status.phase, Phase::Terminal { .. }) && !engine.is_busy() {
            return (events, placements);
        }

        if status.committable {
            assert_eq!(status.mover, Color::Black);
            let before = engine.scores();
            let pos = black.choose(engine.state().board(), Color::Black).unwrap();
            let outcome = engine.submit_move(pos, now);
            assert!(outcome.accepted);

            let after = engine.scores();
            let n = outcome.flips.len() as u8;
            assert_eq!(after.black, before.black + 1 + n);
            assert_eq!(after.white, before.white - n);
        } else {
            now = engine.next_due().expect("something must be scheduled");
        }

        for event in engine.poll(now) {
            if matches!(event, Event::Placed { .. }) {
                placements += 1;
            }
            events.push(event);
        }
    }
    panic!("game did not finish");
}

#[test]
fn computer_games_finish_with_consistent_results() {
    for seed in 0..8 {
        let config = EngineConfig {
            seed,
            ..EngineConfig::default()
        };
        let mut engine = MoveSequencer::new(config);
        let mut black = AiAgent::new(AiPolicy::Basic, seed + 100);

        let (events, placements) = play_out(&mut engine, &mut black, Instant::now());

        let board = engine.state().board();
        let scores = engine.scores();
        assert_eq!(
            (scores.black + scores.white) as usize,
            4 + placements,
            "every placement adds exactly one disc"
        );
        assert!(rules::legal_moves(board, Color::Black).is_empty());
        assert!(rules::legal_moves(board, Color::White).is_empty());

        let expected = if scores.black > scores.white {
            GameResult::BlackWins
        } else if scores.white > scores.black {
            GameResult::WhiteWins
        } else {
            GameResult::Draw
        };
        assert_eq!(engine.status().result, Some(expected));
        assert!(matches!(
            events.last(),
            Some(Event::GameOver { result, .. }) if *result == expected
        ));

        let tally = engine.match_tally();
        assert_eq!(
            tally.black_wins + tally.white_wins,
            u32::from(expected != GameResult::Draw)
        );
    }
}

#[test]
fn tally_accumulates_across_new_games() {
    let mut engine = MoveSequencer::new(EngineConfig::default());
    let mut black = AiAgent::new(AiPolicy::GreedyCorner, 1);
    let mut now = Instant::now();
    let mut decided = 0;

    for _ in 0..3 {
        engine.new_game(now);
        let (_, _) = play_out(&mut engine, &mut black, now);
        if engine.status().result != Some(GameResult::Draw) {
            decided += 1;
        }
        now += Duration::from_secs(3600);
    }

    let tally = engine.match_tally();
    assert_eq!(tally.black_wins + tally.white_wins, decided);
    assert!(engine.state().board().empty_count() < 60);

    engine.new_game(now);
    assert_eq!(engine.state().board(), &Board::new());
    assert_eq!(engine.match_tally(), tally);
}

#[test]
fn opening_scenario_matches_reference_counts() {
    let config = EngineConfig {
        computer_enabled: false,
        ..EngineConfig::default()
    };
    let mut engine = MoveSequencer::new(config);

    let outcome = engine.submit_move(Position::new(2, 3).unwrap(), Instant::now());

    assert!(outcome.accepted);
    assert_eq!(outcome.flips, vec![Position::new(3, 3).unwrap()]);
    assert_eq!(engine.scores().black, 4);
    assert_eq!(engine.scores().white, 1);
    assert_eq!(engine.status().mover, Color::White);
    assert!(!engine.legal_moves(Color::White).is_empty());
}
