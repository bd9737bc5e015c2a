use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{try_rotate, Board, GameSession, GameSnapshot, Piece, Silent};
use blockfall::types::{Block, ModeKind, PieceKind, TICK_MS};

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::new(ModeKind::Endless, 12345);

    c.bench_function("session_tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(TICK_MS));
            session.flush_events(&mut Silent);
            if session.is_over() {
                session.restart();
            }
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(Block::Garbage));
                }
            }
            let rows = board.find_full_rows();
            black_box(board.clear_rows(&rows))
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let board = Board::from_rows(&["##.....###", "##.....###"]);
    let piece = Piece::spawn(PieceKind::T).translated(0, 16);

    c.bench_function("try_rotate", |b| {
        b.iter(|| try_rotate(black_box(&board), black_box(&piece)))
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut session = GameSession::new(ModeKind::Rising, 12345);

    c.bench_function("hard_drop", |b| {
        b.iter(|| {
            let dropped = session.hard_drop();
            session.flush_events(&mut Silent);
            if !dropped {
                session.restart();
            }
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let session = GameSession::new(ModeKind::Lines40, 12345);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| session.snapshot_into(black_box(&mut snap)))
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_rotate,
    bench_hard_drop,
    bench_snapshot
);
criterion_main!(benches);
