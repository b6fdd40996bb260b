//! `reversi-search` picks moves for [`reversi_core`] boards.
//!
//! The crate provides a family of depth-limited adversarial searches that
//! share one mutation discipline: each algorithm borrows a board
//! exclusively, explores by applying and undoing moves through
//! [`reversi_core::PlacedMove`] guards, and leaves the board bit-for-bit in
//! its entry state, even when a wall-clock deadline cuts the search short.
//!
//!  - [`MinMax`] and [`NegaMax`] are the plain full-width searches.
//!  - [`AlphaBeta`] and [`NegaScout`] add window pruning behind the shared
//!    [`SearchAlgorithm`] interface.
//!  - [`IterativeDeepening`] re-runs a windowed search at increasing depth
//!    under a time budget, reordering candidates with [`MoveSorter`].
//!  - [`EndGame`] switches to an exact full-read once few empties remain.
//!
//! Timeouts are never errors: an expired [`SearchContext`] makes every
//! frame return its best value so far, and the chosen move is always legal.

mod alphabeta;
mod context;
mod endgame;
mod evaluator;
mod iterative;
mod minmax;
mod negamax;
mod negascout;
mod search;
mod sorter;
mod strategy;

pub use alphabeta::AlphaBeta;
pub use context::SearchContext;
pub use endgame::EndGame;
pub use evaluator::{Evaluator, TableWeights};
pub use iterative::{IterativeDeepening, IterativeOutcome};
pub use minmax::MinMax;
pub use negamax::NegaMax;
pub use negascout::NegaScout;
pub use search::{RootOutcome, SearchAlgorithm};
pub use sorter::{MoveSelector, MoveSorter};
pub use strategy::{Random, Strategy};

/// Window floor: below any reachable evaluation.
pub const SCORE_MIN: i32 = -10_000_000;

/// Window ceiling: above any reachable evaluation.
pub const SCORE_MAX: i32 = 10_000_000;
