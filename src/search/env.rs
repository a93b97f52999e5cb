//! The read-only environment threaded through every search call: which
//! evaluator and quiescence mode to use, and handles to the thread pool and
//! clock oracles. Kept separate from `SharedSearchState` because nothing
//! here is ever mutated mid-search — it's configuration, not state.

use crate::clock::Clock;
use crate::config::{EvalKind, QuiesceMode};
use crate::threadpool::ThreadPool;

pub struct SearchEnv<'a> {
    pub pool: &'a ThreadPool,
    pub clock: &'a dyn Clock,
    pub eval_kind: EvalKind,
    pub quiesce_mode: QuiesceMode,
}
