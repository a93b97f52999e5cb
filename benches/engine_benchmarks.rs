//! Benchmarks for movegen, evaluation, and search performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use negamax_lab::board::{gen, Board, MoveArena};
use negamax_lab::config::{EngineConfig, Strategy};
use negamax_lab::engine::Engine;
use negamax_lab::eval::eval;

fn perft(board: &mut Board, arena: &mut MoveArena, unmake_stack: &mut Vec<negamax_lab::board::UnmakeEntry>, depth: usize, ply: usize) -> u64 {
    gen(board, arena, ply);
    if depth == 1 {
        return (0..arena.len(ply))
            .filter(|&i| {
                let mv = arena.slice(ply)[i].mv;
                let legal = board.make_move(mv, unmake_stack);
                board.unmake_move(unmake_stack);
                legal
            })
            .count() as u64;
    }
    let mut nodes = 0;
    for i in 0..arena.len(ply) {
        let mv = arena.slice(ply)[i].mv;
        if board.make_move(mv, unmake_stack) {
            nodes += perft(board, arena, unmake_stack, depth - 1, ply + 1);
        }
        board.unmake_move(unmake_stack);
    }
    nodes
}

fn run_perft(board: &Board, depth: usize) -> u64 {
    let mut board = board.clone();
    let mut arena = MoveArena::new();
    let mut unmake_stack = Vec::new();
    perft(&mut board, &mut arena, &mut unmake_stack, depth, 0)
}

fn bench_perft(c: &mut Criterion) {
    let mut group = c.benchmark_group("perft");

    let startpos = Board::new();
    for depth in 1..=4 {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| run_perft(black_box(&startpos), depth))
        });
    }

    let kiwipete = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    for depth in 1..=3 {
        group.bench_with_input(BenchmarkId::new("kiwipete", depth), &depth, |b, &depth| {
            b.iter(|| run_perft(black_box(&kiwipete), depth))
        });
    }

    group.finish();
}

fn bench_movegen(c: &mut Criterion) {
    let mut group = c.benchmark_group("movegen");
    let mut arena = MoveArena::new();

    let startpos = Board::new();
    group.bench_function("startpos", |b| b.iter(|| gen(black_box(&startpos), &mut arena, 0)));

    let middlegame = Board::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4").unwrap();
    group.bench_function("middlegame", |b| b.iter(|| gen(black_box(&middlegame), &mut arena, 0)));

    let kiwipete = Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
    group.bench_function("kiwipete", |b| b.iter(|| gen(black_box(&kiwipete), &mut arena, 0)));

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    group.sample_size(10);

    for depth in [3, 4, 5] {
        group.bench_with_input(BenchmarkId::new("startpos", depth), &depth, |b, &depth| {
            b.iter(|| {
                let config = EngineConfig {
                    max_depth: depth,
                    max_time_ms: i64::MAX,
                    strategy: Strategy::Serial,
                    use_book: false,
                    ..EngineConfig::default()
                };
                let mut engine = Engine::new(Board::new(), config);
                engine.search()
            })
        });
    }

    for depth in [3, 4] {
        group.bench_with_input(BenchmarkId::new("tactical", depth), &depth, |b, &depth| {
            b.iter(|| {
                let config = EngineConfig {
                    max_depth: depth,
                    max_time_ms: i64::MAX,
                    strategy: Strategy::Serial,
                    use_book: false,
                    ..EngineConfig::default()
                };
                let board = Board::from_fen("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4").unwrap();
                let mut engine = Engine::new(board, config);
                engine.search()
            })
        });
    }

    group.finish();
}

fn bench_eval(c: &mut Criterion) {
    let mut group = c.benchmark_group("eval");

    let positions = [
        ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        ("middlegame", "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4"),
        ("endgame", "8/5k2/8/8/8/8/5K2/4R3 w - - 0 1"),
    ];

    for (name, fen) in positions {
        let board = Board::from_fen(fen).unwrap();
        group.bench_with_input(BenchmarkId::new("position", name), &board, |b, board| {
            b.iter(|| black_box(eval(board)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_perft, bench_movegen, bench_search, bench_eval);
criterion_main!(benches);
