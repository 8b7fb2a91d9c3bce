//! Search: iterative deepening, aspiration windows, alpha-beta.

mod alphabeta;
mod ordering;
mod searcher;
mod types;

pub use ordering::MovePicker;
pub use searcher::Searcher;
pub use types::{
    SearchLimits, SearchResult, SearchStats, ASPIRATION_MAX, ASPIRATION_WINDOW, INFINITY,
    MATE_BOUND, MATE_SCORE, MAX_DEPTH,
};
