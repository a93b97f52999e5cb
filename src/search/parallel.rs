//! Parallel search strategies. Each one forks at exactly one recursion
//! level per call: the first move (or, for quiescence, the stand-pat check)
//! is resolved serially to establish a search window, then the remaining
//! sibling moves are fanned out across the thread pool, each worker owning a
//! private clone of the forking context and reporting its result back
//! through a shared merge cell guarded by a mutex.

use super::context::{ForkMergeCell, SearchContext, SharedSearchState};
use super::env::SearchEnv;
use super::serial::{self, MATE};
use crate::board::{gen, gen_caps, Move};
use crate::eval::{eval, peval};
use crate::ordering::{score_moves, sort_from, sort_pv};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

const DRAW: i32 = 0;

fn leaf_eval(env: &SearchEnv, ctx: &SearchContext) -> i32 {
    match env.eval_kind {
        crate::config::EvalKind::Serial => eval(&ctx.board),
        crate::config::EvalKind::Parallel => peval(&ctx.board, env.pool),
    }
}

/// Fully sorts `ctx.arena`'s move list at `ply` in place (unlike the serial
/// kernel's lazy per-move `sort_from`), since every index may be picked up
/// by a different worker out of order once forking begins.
fn fully_sort(ctx: &mut SearchContext, ply: usize) {
    let len = ctx.arena.len(ply);
    for i in 0..len {
        sort_from(ctx.arena.slice_mut(ply), i);
    }
}

/// Forks `ctx.arena.slice(ply)[start_index..]` across the thread pool. Each
/// worker gets an owned clone of `ctx`, plays its assigned move, and runs
/// `worker_search` on the resulting position; improving results are merged
/// into a shared cell. Returns the best (score, move, continuation) found,
/// or `None` if no sibling improved on `alpha0`.
fn fork_remaining<F>(
    env: &SearchEnv,
    shared: &SharedSearchState,
    ctx: &SearchContext,
    ply: usize,
    start_index: usize,
    alpha0: i32,
    beta: i32,
    depth: i32,
    worker_search: F,
) -> (i32, Option<(Move, Vec<Move>)>)
where
    F: Fn(&SearchEnv, &SharedSearchState, &mut SearchContext, i32, i32) -> i32 + Sync,
{
    let move_count = ctx.arena.len(ply);
    if start_index >= move_count {
        return (alpha0, None);
    }
    let cell = ForkMergeCell::new(alpha0);
    let cutoff = Arc::new(AtomicBool::new(false));
    let len = move_count - start_index;

    env.pool.parallel_for_dynamic(
        len,
        || ctx.clone(),
        |mut worker_ctx, offset| {
            if cutoff.load(Ordering::Relaxed) || shared.stop_search.is_stopped() {
                return;
            }
            let idx = start_index + offset;
            let mv = worker_ctx.arena.slice(ply)[idx].mv;
            let window_alpha = cell.alpha();
            if window_alpha >= beta {
                cutoff.store(true, Ordering::Relaxed);
                return;
            }

            let legal = worker_ctx.board.make_move(mv, &mut worker_ctx.unmake_stack);
            if !legal {
                worker_ctx.board.unmake_move(&mut worker_ctx.unmake_stack);
                return;
            }
            let x = -worker_search(env, shared, &mut worker_ctx, -beta, -window_alpha);
            worker_ctx.board.unmake_move(&mut worker_ctx.unmake_stack);

            if shared.stop_search.is_stopped() {
                return;
            }
            if x > cell.alpha() {
                let mut line = vec![mv];
                line.extend_from_slice(worker_ctx.pv.line(ply + 1));
                let improved = cell.offer(x, mv, &line);
                if improved {
                    if !mv.is_capture() {
                        shared.history.record(mv, depth);
                    }
                    if x >= beta {
                        cutoff.store(true, Ordering::Relaxed);
                    }
                }
            }
        },
    );

    let (alpha, best_move, best_line) = cell.into_result();
    if best_move.is_none() {
        (alpha0, None)
    } else {
        (alpha, Some((best_move, best_line)))
    }
}

fn apply_fork_result(ctx: &mut SearchContext, ply: usize, result: Option<(Move, Vec<Move>)>) {
    if let Some((_mv, line)) = result {
        ctx.pv.set_line(ply, &line);
    }
}

/// Root-split parallel search: the whole remaining move list (after the
/// first move) is fanned out in one shot, each sibling resolved by the
/// plain serial kernel.
pub fn prs_search(env: &SearchEnv, shared: &SharedSearchState, ctx: &mut SearchContext, mut alpha: i32, beta: i32, depth: i32) -> i32 {
    let node_count = shared.nodes.fetch_add(1, Ordering::Relaxed) + 1;
    if node_count & 1023 == 0 && env.clock.now_ms() >= shared.stop_time_ms.load(Ordering::Relaxed) {
        shared.stop_search.stop();
    }
    if shared.stop_search.is_stopped() {
        return alpha;
    }

    let ply = ctx.board.ply;
    ctx.pv.set_length(ply, ply);
    if depth == 0 {
        return super::dispatch_quiesce(env, shared, ctx, alpha, beta);
    }
    if ply > 0 && ctx.is_repetition() {
        return DRAW;
    }
    if ply >= crate::board::MAX_PLY - 1 || ctx.board.hply >= crate::board::HIST_STACK - 1 {
        #[cfg(feature = "logging")]
        log::trace!("ply/history limit reached at ply {ply}, falling back to static eval");
        return leaf_eval(env, ctx);
    }

    let in_check = ctx.board.in_check(ctx.board.side);
    let depth = if in_check { depth + 1 } else { depth };

    gen(&ctx.board, &mut ctx.arena, ply);
    {
        let pv_move = ctx.pv_move_at(ply);
        let moves = ctx.arena.slice_mut(ply);
        score_moves(&ctx.board, moves, &shared.history);
        if !sort_pv(moves, pv_move) {
            ctx.follow_pv = false;
        }
    }
    fully_sort(ctx, ply);

    let move_count = ctx.arena.len(ply);
    if move_count == 0 {
        return if in_check { -MATE + ply as i32 } else { DRAW };
    }

    let mut first_index = None;
    for i in 0..move_count {
        let mv = ctx.arena.slice(ply)[i].mv;
        let legal = ctx.board.make_move(mv, &mut ctx.unmake_stack);
        if !legal {
            ctx.board.unmake_move(&mut ctx.unmake_stack);
            continue;
        }
        let x = -serial::search(env, shared, ctx, -beta, -alpha, depth - 1);
        ctx.board.unmake_move(&mut ctx.unmake_stack);

        if shared.stop_search.is_stopped() {
            return alpha;
        }
        if x > alpha {
            alpha = x;
            ctx.pv.splice(ply, mv);
            if !mv.is_capture() {
                shared.history.record(mv, depth);
            }
        }
        first_index = Some(i);
        break;
    }

    let Some(first_index) = first_index else {
        return if in_check { -MATE + ply as i32 } else { DRAW };
    };
    if alpha >= beta {
        return beta;
    }

    let (new_alpha, result) = fork_remaining(env, shared, ctx, ply, first_index + 1, alpha, beta, depth, |e, s, c, a, b| {
        serial::search(e, s, c, a, b, depth - 1)
    });
    if new_alpha > alpha {
        alpha = new_alpha;
        apply_fork_result(ctx, ply, result);
        if alpha >= beta {
            return beta;
        }
    }

    if ctx.board.fifty >= 100 {
        return DRAW;
    }
    alpha
}

/// PV-split parallel search: like `prs_search`, but the first move is
/// resolved by `pvs_search` itself (so the left-most principal line keeps
/// splitting at every ply), while forked siblings fall back to the plain
/// serial kernel to bound the fan-out to one level per call.
pub fn pvs_search(env: &SearchEnv, shared: &SharedSearchState, ctx: &mut SearchContext, mut alpha: i32, beta: i32, depth: i32) -> i32 {
    let node_count = shared.nodes.fetch_add(1, Ordering::Relaxed) + 1;
    if node_count & 1023 == 0 && env.clock.now_ms() >= shared.stop_time_ms.load(Ordering::Relaxed) {
        shared.stop_search.stop();
    }
    if shared.stop_search.is_stopped() {
        return alpha;
    }

    let ply = ctx.board.ply;
    ctx.pv.set_length(ply, ply);
    if depth == 0 {
        return super::dispatch_quiesce(env, shared, ctx, alpha, beta);
    }
    if ply > 0 && ctx.is_repetition() {
        return DRAW;
    }
    if ply >= crate::board::MAX_PLY - 1 || ctx.board.hply >= crate::board::HIST_STACK - 1 {
        #[cfg(feature = "logging")]
        log::trace!("ply/history limit reached at ply {ply}, falling back to static eval");
        return leaf_eval(env, ctx);
    }

    let in_check = ctx.board.in_check(ctx.board.side);
    let depth = if in_check { depth + 1 } else { depth };

    gen(&ctx.board, &mut ctx.arena, ply);
    {
        let pv_move = ctx.pv_move_at(ply);
        let moves = ctx.arena.slice_mut(ply);
        score_moves(&ctx.board, moves, &shared.history);
        if !sort_pv(moves, pv_move) {
            ctx.follow_pv = false;
        }
    }
    fully_sort(ctx, ply);

    let move_count = ctx.arena.len(ply);
    if move_count == 0 {
        return if in_check { -MATE + ply as i32 } else { DRAW };
    }

    let mut first_index = None;
    for i in 0..move_count {
        let mv = ctx.arena.slice(ply)[i].mv;
        let legal = ctx.board.make_move(mv, &mut ctx.unmake_stack);
        if !legal {
            ctx.board.unmake_move(&mut ctx.unmake_stack);
            continue;
        }
        let x = -pvs_search(env, shared, ctx, -beta, -alpha, depth - 1);
        ctx.board.unmake_move(&mut ctx.unmake_stack);

        if shared.stop_search.is_stopped() {
            return alpha;
        }
        if x > alpha {
            alpha = x;
            ctx.pv.splice(ply, mv);
            if !mv.is_capture() {
                shared.history.record(mv, depth);
            }
        }
        first_index = Some(i);
        break;
    }

    let Some(first_index) = first_index else {
        return if in_check { -MATE + ply as i32 } else { DRAW };
    };
    if alpha >= beta {
        return beta;
    }

    let (new_alpha, result) = fork_remaining(env, shared, ctx, ply, first_index + 1, alpha, beta, depth, |e, s, c, a, b| {
        serial::search(e, s, c, a, b, depth - 1)
    });
    if new_alpha > alpha {
        alpha = new_alpha;
        apply_fork_result(ctx, ply, result);
        if alpha >= beta {
            return beta;
        }
    }

    if ctx.board.fifty >= 100 {
        return DRAW;
    }
    alpha
}

/// Root-split parallel quiescence: the stand-pat cutoff and first capture
/// are resolved serially, then remaining captures fan out across the pool.
pub fn p_quiesce(env: &SearchEnv, shared: &SharedSearchState, ctx: &mut SearchContext, mut alpha: i32, beta: i32) -> i32 {
    let node_count = shared.nodes.fetch_add(1, Ordering::Relaxed) + 1;
    if node_count & 1023 == 0 && env.clock.now_ms() >= shared.stop_time_ms.load(Ordering::Relaxed) {
        shared.stop_search.stop();
    }
    if shared.stop_search.is_stopped() {
        return alpha;
    }

    let ply = ctx.board.ply;
    let stand_pat = leaf_eval(env, ctx);
    if stand_pat >= beta {
        return beta;
    }
    if stand_pat > alpha {
        alpha = stand_pat;
    }
    if ply >= crate::board::MAX_PLY - 1 || ctx.board.hply >= crate::board::HIST_STACK - 1 {
        return alpha;
    }

    gen_caps(&ctx.board, &mut ctx.arena, ply);
    {
        let moves = ctx.arena.slice_mut(ply);
        score_moves(&ctx.board, moves, &shared.history);
    }
    fully_sort(ctx, ply);

    let move_count = ctx.arena.len(ply);
    if move_count == 0 {
        return alpha;
    }

    let mut first_index = None;
    for i in 0..move_count {
        let mv = ctx.arena.slice(ply)[i].mv;
        let legal = ctx.board.make_move(mv, &mut ctx.unmake_stack);
        if !legal {
            ctx.board.unmake_move(&mut ctx.unmake_stack);
            continue;
        }
        let x = -serial::quiesce(env, shared, ctx, -beta, -alpha);
        ctx.board.unmake_move(&mut ctx.unmake_stack);

        if shared.stop_search.is_stopped() {
            return alpha;
        }
        if x > alpha {
            alpha = x;
        }
        first_index = Some(i);
        break;
    }

    let Some(first_index) = first_index else {
        return alpha;
    };
    if alpha >= beta {
        return beta;
    }

    let (new_alpha, _result) = fork_remaining(env, shared, ctx, ply, first_index + 1, alpha, beta, 0, |e, s, c, a, b| {
        serial::quiesce(e, s, c, a, b)
    });
    if new_alpha > alpha {
        alpha = new_alpha;
        if alpha >= beta {
            return beta;
        }
    }

    alpha
}
