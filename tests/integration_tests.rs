//! Integration tests - whole sessions driven through the public API

use blockfall::core::{
    EndReason, EventLog, GameSession, LockPhase, ModeConfig, ModeTarget, SessionState,
};
use blockfall::types::{
    Block, GameAction, GameEvent, ModeKind, BOARD_HEIGHT, BOARD_WIDTH, GARBAGE_INTERVAL_MS,
    LOCK_DELAY_MS, MAX_LOCK_RESETS, TICK_MS,
};

fn fill_row(session: &mut GameSession, y: i8) {
    for x in 0..BOARD_WIDTH as i8 {
        session.board_mut().set(x, y, Some(Block::Garbage));
    }
}

#[test]
fn test_lines40_completes_after_forty_lines() {
    let mut session = GameSession::new(ModeKind::Lines40, 2024);
    let mut log = EventLog::default();

    for i in 0..40 {
        assert!(session.is_running(), "ended early after {i} drops");
        session.board_mut().clear();
        fill_row(&mut session, 19);
        assert!(session.hard_drop());
        session.flush_events(&mut log);
    }

    assert_eq!(session.end_reason(), Some(EndReason::TargetReached));
    assert_eq!(session.stats().lines, 40);
    assert_eq!(session.stats().score, 40 * 100);
    assert_eq!(session.stats().level, 4);
    assert_eq!(log.count("lineClear"), 40);
    assert_eq!(log.count("levelUp"), 4);
    assert_eq!(
        log.events.last(),
        Some(&GameEvent::GameOver { completed: true })
    );
    assert!(session.current().is_none());
}

#[test]
fn test_tetris_scores_800() {
    let mut session = GameSession::new(ModeKind::Lines20, 7);
    for y in 16..20 {
        fill_row(&mut session, y);
    }
    assert!(session.hard_drop());
    assert_eq!(session.stats().lines, 4);
    assert_eq!(session.stats().score, 800);
    assert!(session
        .drain_events()
        .any(|e| e == GameEvent::LineClear(4)));
}

#[test]
fn test_endless_blocked_spawn_is_loss() {
    let mut session = GameSession::new(ModeKind::Endless, 99);
    let piece = session.current().unwrap();

    // Wall in the spawned piece so it locks where it is. Column 0 stays open
    // so none of these rows can clear.
    for x in 1..BOARD_WIDTH as i8 {
        session.board_mut().set(x, 2, Some(Block::Garbage));
        for y in 0..2 {
            if !piece.cells().any(|c| c == (x, y)) {
                session.board_mut().set(x, y, Some(Block::Garbage));
            }
        }
    }
    session.tick(LOCK_DELAY_MS * 2);

    assert_eq!(session.end_reason(), Some(EndReason::TopOut));
    assert_eq!(session.stats().lines, 0);
    let mut log = EventLog::default();
    session.flush_events(&mut log);
    assert_eq!(log.count("lock"), 1);
    assert_eq!(
        log.events.last(),
        Some(&GameEvent::GameOver { completed: false })
    );
}

#[test]
fn test_rising_garbage_tops_out_hovering_piece() {
    let push_until_over = |kind| {
        let mut session = GameSession::new(kind, 5);
        for _ in 0..5 {
            assert!(session.apply_action(GameAction::SoftDrop));
        }
        for _ in 0..100 {
            session.inject_garbage();
        }
        let mut log = EventLog::default();
        session.flush_events(&mut log);
        (session, log)
    };

    let (rising, log) = push_until_over(ModeKind::Rising);
    assert_eq!(rising.end_reason(), Some(EndReason::TopOut));
    assert!(!rising.end_reason().unwrap().completed());
    assert_eq!(log.count("lock"), 0);
    assert_eq!(
        log.events.last(),
        Some(&GameEvent::GameOver { completed: false })
    );

    let (endless, log) = push_until_over(ModeKind::Endless);
    assert!(endless.is_running());
    assert_eq!(log.count("gameOver"), 0);
}

#[test]
fn test_garbage_timer_only_runs_in_rising() {
    let bottom_row = |kind| {
        let mut session = GameSession::new(kind, 5);
        session.tick(GARBAGE_INTERVAL_MS);
        session.board().cells()[(BOARD_HEIGHT as usize - 1) * BOARD_WIDTH as usize..]
            .iter()
            .filter(|c| **c == Some(Block::Garbage))
            .count()
    };
    assert_eq!(bottom_row(ModeKind::Rising), BOARD_WIDTH as usize - 1);
    assert_eq!(bottom_row(ModeKind::Endless), 0);
}

#[test]
fn test_time_attack_reports_completed() {
    let mut session = GameSession::new(ModeKind::TimeAttack, 5);
    assert_eq!(session.mode().target, Some(ModeTarget::Seconds(60)));
    for _ in 0..(61_000 / TICK_MS) {
        session.tick(TICK_MS);
    }
    assert_eq!(session.end_reason(), Some(EndReason::TimeUp));
    assert!(session.end_reason().unwrap().completed());
}

#[test]
fn test_hold_twice_is_noop() {
    let mut session = GameSession::new(ModeKind::Endless, 31);
    assert!(session.apply_action(GameAction::Hold));
    let before = session.snapshot();
    assert!(!session.apply_action(GameAction::Hold));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_sixteenth_grounded_move_locks() {
    let mut session = GameSession::new(ModeKind::Endless, 31);
    while session.apply_action(GameAction::SoftDrop) {}
    assert_eq!(session.lock_phase(), LockPhase::Grounded);

    let empty = |s: &GameSession| s.board().cells().iter().all(|c| c.is_none());
    for i in 0..MAX_LOCK_RESETS {
        let action = if i % 2 == 0 {
            GameAction::MoveLeft
        } else {
            GameAction::MoveRight
        };
        assert!(session.apply_action(action));
        assert!(empty(&session), "locked early at move {}", i + 1);
    }
    assert!(session.apply_action(GameAction::MoveLeft));
    assert!(!empty(&session));
}

#[test]
fn test_rejected_actions_leave_state_identical() {
    let mut session = GameSession::new(ModeKind::Endless, 8);
    while session.apply_action(GameAction::MoveLeft) {}
    let before = session.snapshot();
    assert!(!session.apply_action(GameAction::MoveLeft));
    assert_eq!(session.snapshot(), before);
}

#[test]
fn test_pause_and_restart() {
    let mut session = GameSession::new(ModeKind::Lines20, 8);
    session.tick(1500);

    assert!(session.apply_action(GameAction::Pause));
    assert_eq!(session.state(), SessionState::Paused);
    session.tick(10_000);
    assert_eq!(session.now_ms(), 1500);
    assert!(!session.apply_action(GameAction::HardDrop));

    assert!(session.apply_action(GameAction::Restart));
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.now_ms(), 0);
    assert_eq!(session.stats().lines, 0);
    assert_eq!(*session.mode(), ModeConfig::new(ModeKind::Lines20));
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed| {
        let mut session = GameSession::new(ModeKind::Endless, seed);
        let mut kinds = Vec::new();
        for _ in 0..20 {
            kinds.push(session.current().map(|p| p.kind));
            session.hard_drop();
        }
        kinds
    };
    assert_eq!(play(77), play(77));
}
