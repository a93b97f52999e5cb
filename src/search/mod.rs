//! The search kernel: one serial negamax implementation, two parallel
//! decompositions of it, and the iterative-deepening driver that selects
//! among them.

pub mod context;
pub mod driver;
pub mod env;
pub mod parallel;
pub mod serial;

use context::{SearchContext, SharedSearchState};
use crate::config::QuiesceMode;
use env::SearchEnv;

pub use context::{ForkMergeCell, PvTable};
pub use driver::{think, SearchResult};
pub use serial::MATE;

/// Dispatches to the serial or parallel quiescence search according to
/// `env.quiesce_mode`. Called by every search strategy once it reaches
/// depth zero, regardless of which of the three search strategies is
/// driving the recursion above it.
pub(crate) fn dispatch_quiesce(env: &SearchEnv, shared: &SharedSearchState, ctx: &mut SearchContext, alpha: i32, beta: i32) -> i32 {
    match env.quiesce_mode {
        QuiesceMode::Serial => serial::quiesce(env, shared, ctx, alpha, beta),
        QuiesceMode::Parallel => parallel::p_quiesce(env, shared, ctx, alpha, beta),
    }
}
