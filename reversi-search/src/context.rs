//! Per-search deadline and accounting state.

use std::time::{Duration, Instant};

// Poll the clock once per this many visited nodes.
const POLL_INTERVAL: u64 = 64;

/// State threaded by `&mut` through every recursive search call: the
/// wall-clock deadline, the latched timeout flag, and a node counter.
///
/// The deadline is cooperative. Frames poll [`SearchContext::expired`] and
/// unwind with their best value so far once it reports true; nothing is
/// preempted and nothing panics.
#[derive(Clone, Debug)]
pub struct SearchContext {
    deadline: Option<Instant>,
    timed_out: bool,
    nodes: u64,
}

impl SearchContext {
    /// A context that never expires, for fixed-depth and endgame searches.
    pub fn unlimited() -> Self {
        SearchContext {
            deadline: None,
            timed_out: false,
            nodes: 0,
        }
    }

    /// A context that expires `budget` from now.
    pub fn with_budget(budget: Duration) -> Self {
        SearchContext {
            deadline: Some(Instant::now() + budget),
            timed_out: false,
            nodes: 0,
        }
    }

    /// Count one visited node.
    #[inline]
    pub fn visit(&mut self) {
        self.nodes += 1;
    }

    /// Whether the deadline has passed. Latches once true. The clock is
    /// only consulted every few nodes to keep it off the hot path.
    pub fn expired(&mut self) -> bool {
        if self.timed_out {
            return true;
        }
        let deadline = match self.deadline {
            Some(deadline) => deadline,
            None => return false,
        };
        if self.nodes % POLL_INTERVAL == 0 && Instant::now() >= deadline {
            self.timed_out = true;
        }
        self.timed_out
    }

    /// Whether this search was cut short by its deadline.
    pub fn was_truncated(&self) -> bool {
        self.timed_out
    }

    /// Nodes visited so far.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_never_expires() {
        let mut ctx = SearchContext::unlimited();
        for _ in 0..1000 {
            ctx.visit();
            assert!(!ctx.expired());
        }
        assert!(!ctx.was_truncated());
    }

    #[test]
    fn zero_budget_expires_and_latches() {
        let mut ctx = SearchContext::with_budget(Duration::from_secs(0));
        // nodes == 0, so the first poll hits the clock.
        assert!(ctx.expired());
        assert!(ctx.was_truncated());
        assert!(ctx.expired());
    }

    #[test]
    fn counts_nodes() {
        let mut ctx = SearchContext::unlimited();
        ctx.visit();
        ctx.visit();
        assert_eq!(ctx.nodes(), 2);
    }
}
