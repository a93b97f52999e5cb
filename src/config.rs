//! Engine configuration: the tagged strategy/evaluator selectors that replace
//! the original's function-pointer globals, plus the knobs a caller can set
//! before starting a search.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Strategy {
    Serial,
    RootSplit,
    PvSplit,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QuiesceMode {
    Serial,
    Parallel,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EvalKind {
    Serial,
    Parallel,
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub max_depth: i32,
    pub max_time_ms: i64,
    pub max_nodes: Option<u64>,
    pub thread_count: usize,
    pub strategy: Strategy,
    pub quiesce: QuiesceMode,
    pub eval: EvalKind,
    pub use_book: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_depth: 32,
            max_time_ms: 5_000,
            max_nodes: None,
            thread_count: 1,
            strategy: Strategy::Serial,
            quiesce: QuiesceMode::Serial,
            eval: EvalKind::Serial,
            use_book: true,
        }
    }
}
