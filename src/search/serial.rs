//! The serial search kernel: fail-hard negamax with alpha-beta pruning, plus
//! the quiescence search it bottoms out into at depth zero. Every parallel
//! strategy ultimately calls one of these two functions to resolve its leaf
//! work, so correctness here is correctness everywhere.

use super::context::{SearchContext, SharedSearchState};
use super::env::SearchEnv;
use crate::board::types::move_bits;
use crate::board::{gen, gen_caps};
use crate::eval::{eval, peval};
use crate::ordering::{score_moves, sort_from, sort_pv};
use std::sync::atomic::Ordering;

pub const MATE: i32 = 10_000;
const DRAW: i32 = 0;

/// Polls the wall clock every 1024 nodes, stopping the whole search if the
/// deadline has passed. Separate from the per-node `stop_search` check that
/// runs after every recursive call returns.
fn poll_clock(env: &SearchEnv, shared: &SharedSearchState, node_count: u64) {
    if node_count & 1023 == 0 && env.clock.now_ms() >= shared.stop_time_ms.load(Ordering::Relaxed) {
        shared.stop_search.stop();
    }
}

fn leaf_eval(env: &SearchEnv, ctx: &SearchContext) -> i32 {
    match env.eval_kind {
        crate::config::EvalKind::Serial => eval(&ctx.board),
        crate::config::EvalKind::Parallel => peval(&ctx.board, env.pool),
    }
}

/// Fail-hard negamax with alpha-beta pruning over `ctx`, starting at
/// `ctx.board.ply` and searching `depth` plies further.
pub fn search(env: &SearchEnv, shared: &SharedSearchState, ctx: &mut SearchContext, mut alpha: i32, beta: i32, depth: i32) -> i32 {
    let node_count = shared.nodes.fetch_add(1, Ordering::Relaxed) + 1;
    poll_clock(env, shared, node_count);
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

    // Check extension: a side to move in check searches one ply deeper,
    // uncapped across recursion (bounded only by MAX_PLY/HIST_STACK above).
    let in_check = ctx.board.in_check(ctx.board.side);
    let depth = if in_check { depth + 1 } else { depth };

    gen(&ctx.board, &mut ctx.arena, ply);
    let pv_move = ctx.pv_move_at(ply);
    {
        let moves = ctx.arena.slice_mut(ply);
        score_moves(&ctx.board, moves, &shared.history);
        if !sort_pv(moves, pv_move) {
            ctx.follow_pv = false;
        }
    }

    let move_count = ctx.arena.len(ply);
    let mut legal_moves = 0;

    for i in 0..move_count {
        sort_from(ctx.arena.slice_mut(ply), i);
        let mv = ctx.arena.slice(ply)[i].mv;

        let legal = ctx.board.make_move(mv, &mut ctx.unmake_stack);
        if !legal {
            ctx.board.unmake_move(&mut ctx.unmake_stack);
            continue;
        }
        legal_moves += 1;

        let x = -search(env, shared, ctx, -beta, -alpha, depth - 1);
        ctx.board.unmake_move(&mut ctx.unmake_stack);

        if shared.stop_search.is_stopped() {
            return alpha;
        }

        if x > alpha {
            if !mv.is_capture() {
                shared.history.record(mv, depth);
            }
            if x >= beta {
                return beta;
            }
            alpha = x;
            ctx.pv.splice(ply, mv);
        }
    }

    if legal_moves == 0 {
        return if in_check { -MATE + ply as i32 } else { DRAW };
    }
    if ctx.board.fifty >= 100 {
        return DRAW;
    }
    alpha
}

/// Captures-and-promotions-only search, called at the horizon of `search` to
/// avoid the horizon effect. Stands pat on the static evaluation (the side
/// to move is never forced to capture) and only explores capturing moves
/// beyond that.
pub fn quiesce(env: &SearchEnv, shared: &SharedSearchState, ctx: &mut SearchContext, mut alpha: i32, beta: i32) -> i32 {
    let node_count = shared.nodes.fetch_add(1, Ordering::Relaxed) + 1;
    poll_clock(env, shared, node_count);
    if shared.stop_search.is_stopped() {
        return alpha;
    }

    let ply = ctx.board.ply;
    ctx.pv.set_length(ply, ply);
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
    let pv_move = ctx.pv_move_at(ply);
    {
        let moves = ctx.arena.slice_mut(ply);
        score_moves(&ctx.board, moves, &shared.history);
        if !sort_pv(moves, pv_move) {
            ctx.follow_pv = false;
        }
    }

    let move_count = ctx.arena.len(ply);
    for i in 0..move_count {
        sort_from(ctx.arena.slice_mut(ply), i);
        let mv = ctx.arena.slice(ply)[i].mv;
        if mv.bits() & move_bits::CAPTURE == 0 && !mv.is_promotion() {
            continue;
        }

        let legal = ctx.board.make_move(mv, &mut ctx.unmake_stack);
        if !legal {
            ctx.board.unmake_move(&mut ctx.unmake_stack);
            continue;
        }

        let x = -quiesce(env, shared, ctx, -beta, -alpha);
        ctx.board.unmake_move(&mut ctx.unmake_stack);

        if shared.stop_search.is_stopped() {
            return alpha;
        }
        if x > alpha {
            if x >= beta {
                return beta;
            }
            alpha = x;
            ctx.pv.splice(ply, mv);
        }
    }

    alpha
}
