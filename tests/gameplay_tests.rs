//! Full-game integration tests.
//!
//! These drive the engine only through its public host API: `activate`,
//! `advance`, `start_timer`, and `reset_game`.

use std::time::Duration;

use memory_match::board::{RecordingRenderer, RenderEvent};
use memory_match::cards::{CardFace, Deck};
use memory_match::core::{ConfigError, EntityId, FlipDuration, GameConfig};
use memory_match::game::{
    ActivationOutcome, DisplayLog, GamePhase, IgnoreReason, MatchOutcome, MemoryGame,
};

type Game = MemoryGame<RecordingRenderer, DisplayLog>;

fn new_game(config: GameConfig) -> Game {
    MemoryGame::new(config, RecordingRenderer::new(), DisplayLog::new())
}

/// Cards are dealt pairwise, so entities 2k and 2k+1 share a face.
fn pair(k: u32) -> (EntityId, EntityId) {
    (EntityId(2 * k), EntityId(2 * k + 1))
}

fn wait_for_resolution(game: &mut Game) {
    game.advance(game.flip_duration().as_duration());
}

/// Play a perfect game: every pair found on the first try.
fn play_perfect(game: &mut Game, pairs: u32, seconds_per_pair: u64) {
    for k in 0..pairs {
        let (a, b) = pair(k);
        assert!(game.activate(a).is_flipped());
        assert!(game.activate(b).is_flipped());
        game.advance(Duration::from_secs(seconds_per_pair));
    }
}

// =============================================================================
// Complete games
// =============================================================================

/// Six identities, twelve cards, no misses.
#[test]
fn test_perfect_game_standard_deck() {
    let mut game = new_game(GameConfig::default().with_flip_duration(1000.0));
    game.start_timer();

    play_perfect(&mut game, 6, 2);

    assert_eq!(game.phase(), GamePhase::Won);
    assert_eq!(game.moves(), 12);
    // Last check fires at 11s, after 11 ticks
    assert_eq!(game.elapsed_seconds(), 11);
    assert_eq!(game.score(), 1000 - (11 + 12 * 5));
    assert_eq!(game.display().final_score(), Some(game.score()));
    assert!(game.display().game_over_visible());
    assert!(!game.timer_running());
    assert_eq!(game.board().flipped_count(), 12);
}

/// Misses cost moves and leave both cards face down.
#[test]
fn test_game_with_misses() {
    let deck = Deck::new()
        .with_face(CardFace::new("A", "a.svg"))
        .with_face(CardFace::new("B", "b.svg"));
    let mut game = new_game(GameConfig::new(deck).with_flip_duration(350.0));
    game.start_timer();

    // Miss: A with B
    game.activate(pair(0).0);
    game.activate(pair(1).0);
    wait_for_resolution(&mut game);
    assert_eq!(game.board().flipped_count(), 0);
    assert_eq!(game.matched_count(), 0);

    // Hit A, hit B
    game.activate(pair(0).0);
    game.activate(pair(0).1);
    wait_for_resolution(&mut game);
    game.activate(pair(1).0);
    game.activate(pair(1).1);
    wait_for_resolution(&mut game);

    assert!(game.is_won());
    assert_eq!(game.moves(), 6);
    // 3 * 350 ms = 1.05 s -> one tick
    assert_eq!(game.elapsed_seconds(), 1);
    assert_eq!(game.score(), 1000 - (1 + 30));
}

/// A very slow game floors at zero.
#[test]
fn test_score_never_negative() {
    let deck = Deck::new().with_face(CardFace::new("A", "a.svg"));
    let mut game = new_game(GameConfig::new(deck));
    game.start_timer();
    game.advance(Duration::from_secs(2000));

    game.activate(pair(0).0);
    game.activate(pair(0).1);
    wait_for_resolution(&mut game);

    assert!(game.is_won());
    assert_eq!(game.score(), 0);
}

/// Exactly one transition to Won: the win panel is shown once.
#[test]
fn test_single_win_transition() {
    let mut game = new_game(GameConfig::default());
    game.start_timer();
    play_perfect(&mut game, 6, 1);

    // Nothing left to activate, and more time changes nothing.
    for raw in 0..12 {
        assert!(!game.activate(EntityId(raw)).is_flipped());
    }
    game.advance(Duration::from_secs(30));

    let shown = game
        .display()
        .updates()
        .iter()
        .filter(|u| matches!(u, memory_match::game::DisplayUpdate::FinalScore(_)))
        .count();
    assert_eq!(shown, 1);
    assert_eq!(game.phase(), GamePhase::Won);
}

/// A host that hands over an absurd time delta must not crash the game.
#[test]
fn test_advance_by_max_duration() {
    let mut game = new_game(GameConfig::default());
    game.start_timer();
    game.advance(Duration::from_secs(1));
    game.advance(Duration::MAX);

    assert_eq!(game.elapsed_seconds(), u32::MAX);
    assert_eq!(game.display().elapsed(), Some(format!("{}s", u32::MAX).as_str()));

    play_perfect(&mut game, 6, 1);
    assert!(game.is_won());
    assert_eq!(game.score(), 0);
}

/// A host loop that sleeps until the next deadline sees every tick.
#[test]
fn test_host_loop_driven_by_next_deadline() {
    let mut game = new_game(GameConfig::default().with_flip_duration(700.0));
    game.start_timer();
    game.activate(pair(0).0);
    game.activate(pair(0).1);

    let mut wakeups = Vec::new();
    while game.now() < Duration::from_secs(3) {
        let Some(deadline) = game.next_deadline() else { break };
        game.advance(deadline - game.now());
        wakeups.push(game.now());
    }

    assert_eq!(
        wakeups,
        vec![
            Duration::from_millis(700),
            Duration::from_secs(1),
            Duration::from_secs(2),
            Duration::from_secs(3),
        ]
    );
    assert_eq!(game.matched_count(), 2);
    assert_eq!(game.elapsed_seconds(), 3);
}

// =============================================================================
// Activation guards
// =============================================================================

#[test]
fn test_activation_blocked_during_resolution() {
    let mut game = new_game(GameConfig::default());
    game.activate(pair(0).0);
    game.activate(pair(1).0);

    let before = game.snapshot();
    let outcome = game.activate(pair(2).0);
    let after = game.snapshot();

    assert_eq!(outcome, ActivationOutcome::Ignored(IgnoreReason::PairPending));
    assert_eq!(before, after);
}

#[test]
fn test_activation_of_flipped_card_is_noop() {
    let mut game = new_game(GameConfig::default());
    game.activate(pair(0).0);

    let before = game.snapshot();
    let outcome = game.activate(pair(0).0);

    assert_eq!(outcome, ActivationOutcome::Ignored(IgnoreReason::AlreadyFlipped));
    assert_eq!(before, game.snapshot());
}

#[test]
fn test_resolution_outcomes() {
    let mut game = new_game(GameConfig::default());
    let (a, b) = pair(0);
    let c = pair(1).0;

    game.activate(a);
    game.activate(c);
    assert_eq!(game.check_for_match(), Some(MatchOutcome::Mismatched(a, c)));

    game.activate(a);
    game.activate(b);
    assert_eq!(game.check_for_match(), Some(MatchOutcome::Matched(a, b)));
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_flips_are_rendered() {
    let mut game = new_game(GameConfig::default());
    let a = pair(0).0;
    let c = pair(1).0;
    game.activate(a);
    game.activate(c);
    wait_for_resolution(&mut game);

    let flips: Vec<_> = game
        .board()
        .renderer()
        .events()
        .iter()
        .filter(|e| matches!(e, RenderEvent::Flipped { .. }))
        .cloned()
        .collect();

    assert_eq!(
        flips,
        vec![
            RenderEvent::Flipped { entity: a, face_up: true },
            RenderEvent::Flipped { entity: c, face_up: true },
            RenderEvent::Flipped { entity: a, face_up: false },
            RenderEvent::Flipped { entity: c, face_up: false },
        ]
    );
}

#[test]
fn test_initial_render_uses_layout_hint() {
    let game = new_game(GameConfig::default());
    match &game.board().renderer().events()[0] {
        RenderEvent::Rendered { order, layout } => {
            assert_eq!(order.len(), 12);
            assert_eq!(layout.columns, 6);
        }
        other => panic!("expected a render, got {:?}", other),
    }
}

// =============================================================================
// Restart
// =============================================================================

/// A reset game plays exactly like a fresh one.
#[test]
fn test_reset_behaves_like_fresh_game() {
    let config = GameConfig::default().with_flip_duration(400.0);

    let mut played = new_game(config.clone());
    played.start_timer();
    played.activate(pair(0).0);
    played.activate(pair(2).0);
    played.advance(Duration::from_millis(100));
    played.reset_game();

    let mut fresh = new_game(config);
    fresh.start_timer();

    for game in [&mut played, &mut fresh] {
        game.activate(pair(1).0);
        game.activate(pair(1).1);
        game.advance(Duration::from_millis(400));
        game.activate(pair(3).0);
        game.advance(Duration::from_secs(3));
    }

    assert_eq!(played.moves(), fresh.moves());
    assert_eq!(played.matched_count(), fresh.matched_count());
    assert_eq!(played.elapsed_seconds(), fresh.elapsed_seconds());
    assert_eq!(played.flipped_cards(), fresh.flipped_cards());
    assert_eq!(played.phase(), fresh.phase());
    assert_eq!(played.history().len(), fresh.history().len());
}

/// Resetting while a mismatch is pending must not flip cards in the new game.
#[test]
fn test_stale_resolution_after_reset() {
    let mut game = new_game(GameConfig::default().with_flip_duration(1000.0));
    game.start_timer();
    game.activate(pair(0).0);
    game.activate(pair(1).0);
    game.advance(Duration::from_millis(600));

    game.reset_game();
    let (a, b) = (pair(0).0, pair(1).0);
    game.activate(a);
    game.activate(b);

    // Old deadline (1000 ms) passes; new one is at 1600 ms.
    game.advance(Duration::from_millis(500));
    assert_eq!(game.phase(), GamePhase::Resolving);
    assert!(game.board().card(a).unwrap().is_flipped());

    game.advance(Duration::from_millis(500));
    assert_eq!(game.phase(), GamePhase::WaitingForInput);
    assert!(!game.board().card(a).unwrap().is_flipped());
}

#[test]
fn test_reset_after_win_hides_panel() {
    let deck = Deck::new().with_face(CardFace::new("A", "a.svg"));
    let mut game = new_game(GameConfig::new(deck));
    game.start_timer();
    game.activate(pair(0).0);
    game.activate(pair(0).1);
    wait_for_resolution(&mut game);
    assert!(game.display().game_over_visible());

    game.reset_game();

    assert!(!game.display().game_over_visible());
    assert_eq!(game.phase(), GamePhase::WaitingForInput);
    assert_eq!(game.board().flipped_count(), 0);
    assert!(game.timer_running());
}

// =============================================================================
// Configuration
// =============================================================================

/// Six identities, requested flip duration 5000 ms: coerced to 350 with a warning.
#[test]
fn test_flip_duration_out_of_range() {
    let game = new_game(GameConfig::default().with_flip_duration(5000.0));

    assert_eq!(game.board().len(), 12);
    assert_eq!(game.flip_duration().as_millis(), 350);
    assert_eq!(
        game.warnings(),
        &[ConfigError::FlipDurationOutOfRange { requested: 5000.0 }]
    );
    let notices: Vec<_> = game.display().notices().collect();
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("350"));
}

#[test]
fn test_flip_duration_not_a_number() {
    let game = new_game(GameConfig::default().with_flip_duration_str("slow"));
    assert_eq!(game.flip_duration(), FlipDuration::FALLBACK);
    assert_eq!(game.warnings(), &[ConfigError::FlipDurationNotANumber]);
}

#[test]
fn test_same_seed_same_board() {
    let a = new_game(GameConfig::default().with_seed(7));
    let b = new_game(GameConfig::default().with_seed(7));
    let c = new_game(GameConfig::default().with_seed(8));

    assert_eq!(a.board().cards(), b.board().cards());
    assert_ne!(a.board().cards(), c.board().cards());
}

#[test]
fn test_snapshot_serializes() {
    let mut game = new_game(GameConfig::default());
    game.activate(pair(0).0);

    let snapshot = game.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: memory_match::game::GameSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(snapshot, restored);
}
