//! Iterative deepening: the top-level loop that repeatedly calls the
//! selected search strategy at increasing depth, keeping the best complete
//! iteration's result as the answer once the clock or a mate score cuts the
//! run short.

use super::context::{SearchContext, SharedSearchState};
use super::env::SearchEnv;
use crate::board::Move;
use crate::book::OpeningBook;
use crate::config::{EngineConfig, Strategy};
use crate::timer::DeadlineTimer;
use std::time::Duration;

/// One completed (or partially completed) iterative-deepening run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth_reached: i32,
    pub nodes: u64,
    pub pv: Vec<Move>,
}

/// Drives iterative deepening from `ctx`'s current position out to
/// `config.max_depth`, stopping early on the clock, a node budget, or a
/// score close enough to a forced mate that deeper search can't matter.
///
/// `on_iteration`, when given, is called after every completed depth with
/// `(depth, score, elapsed_ms, nodes, pv)` — the hook an xboard `post` mode
/// uses to print a thinking line ahead of the final move, without the
/// driver itself knowing anything about the adapter doing the printing.
pub fn think(
    env: &SearchEnv,
    shared: &SharedSearchState,
    ctx: &mut SearchContext,
    config: &EngineConfig,
    book: &dyn OpeningBook,
    deadline_ms: i64,
    mut on_iteration: Option<&mut dyn FnMut(i32, i32, i64, u64, &[Move])>,
) -> SearchResult {
    shared.reset_for_new_search(deadline_ms);
    ctx.pv.clear();
    let start_ms = env.clock.now_ms();

    if config.use_book {
        if let Some(mv) = book.book_move(ctx) {
            return SearchResult {
                best_move: mv,
                score: 0,
                depth_reached: 0,
                nodes: 0,
                pv: vec![mv],
            };
        }
    }

    let mut best = SearchResult {
        best_move: Move::NONE,
        score: 0,
        depth_reached: 0,
        nodes: 0,
        pv: Vec::new(),
    };

    // A belt-and-braces wall-clock timer, independent of the per-node
    // polling every search strategy does on `env.clock`: a pathological
    // position that burns huge time inside one call to `gen`/`eval` between
    // node-count checks still gets cut off.
    let budget_ms = (deadline_ms - start_ms).max(0) as u64;
    let deadline_timer = DeadlineTimer::start(Duration::from_millis(budget_ms), shared.stop_search.clone());

    for depth in 1..=config.max_depth {
        ctx.follow_pv = true;
        let score = dispatch(env, shared, ctx, config.strategy, -super::serial::MATE, super::serial::MATE, depth);

        if shared.stop_search.is_stopped() && depth > 1 {
            break;
        }

        let pv = ctx.pv.full_line();
        if !pv.is_empty() {
            let nodes = shared.node_count();
            let elapsed_ms = elapsed_or_zero(start_ms, env.clock.now_ms());
            #[cfg(feature = "logging")]
            log::info!("depth {depth} complete: score={score} nodes={nodes}");
            if let Some(callback) = on_iteration.as_deref_mut() {
                callback(depth, score, elapsed_ms, nodes, &pv);
            }
            best = SearchResult {
                best_move: pv[0],
                score,
                depth_reached: depth,
                nodes,
                pv,
            };
        }

        if let Some(limit) = config.max_nodes {
            if shared.node_count() >= limit {
                break;
            }
        }
        if score.abs() >= super::serial::MATE - crate::board::MAX_PLY as i32 {
            break;
        }
        if shared.stop_search.is_stopped() {
            break;
        }
    }

    deadline_timer.cancel();
    best.nodes = shared.node_count();
    best
}

/// Milliseconds between `start_ms` and `now_ms`, floored at zero in case the
/// clock oracle is not perfectly monotonic.
#[must_use]
pub fn elapsed_or_zero(start_ms: i64, now_ms: i64) -> i64 {
    (now_ms - start_ms).max(0)
}

fn dispatch(env: &SearchEnv, shared: &SharedSearchState, ctx: &mut SearchContext, strategy: Strategy, alpha: i32, beta: i32, depth: i32) -> i32 {
    match strategy {
        Strategy::Serial => super::serial::search(env, shared, ctx, alpha, beta, depth),
        Strategy::RootSplit => super::parallel::prs_search(env, shared, ctx, alpha, beta, depth),
        Strategy::PvSplit => super::parallel::pvs_search(env, shared, ctx, alpha, beta, depth),
    }
}
