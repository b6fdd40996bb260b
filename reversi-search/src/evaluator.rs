//! Position evaluation: a configurable sum of sub-scorers.
//!
//! Every score is black-positive. Search algorithms that work in negamax
//! form multiply by the mover's sign themselves.

use itertools::iproduct;
use reversi_core::{BitBoard, Bits, Color, Square};

/// Cell-class weights for the positional table.
///
/// The classes follow the usual Othello naming: corners, the C/X squares
/// beside them, the A/B interior rings and the O buffer cells.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TableWeights {
    pub corner: i32,
    pub c: i32,
    pub a1: i32,
    pub a2: i32,
    pub b1: i32,
    pub b2: i32,
    pub b3: i32,
    pub x: i32,
    pub o1: i32,
    pub o2: i32,
}

impl Default for TableWeights {
    fn default() -> Self {
        TableWeights {
            corner: 50,
            c: -20,
            a1: 0,
            a2: -1,
            b1: -1,
            b2: -1,
            b3: -1,
            x: -25,
            o1: -5,
            o2: -5,
        }
    }
}

/// Per-cell positional weights for one board size.
#[derive(Clone, Debug)]
struct TableScorer {
    size: usize,
    table: Vec<Vec<i32>>,
}

impl TableScorer {
    fn new(size: usize, weights: TableWeights) -> Self {
        let mut table = vec![vec![weights.b3; size]; size];
        let half = size / 2;

        // B1: the four center cells.
        for (y, x) in iproduct!(half - 1..=half, half - 1..=half) {
            table[y][x] = weights.b1;
        }

        // A1: diagonal anchor cells of every second ring.
        for num in (0..half).step_by(2) {
            if num != half - 1 {
                for (y, x) in iproduct!([num, size - num - 1].iter(), [num, size - num - 1].iter())
                {
                    table[*y][*x] = weights.a1;
                }
            }
        }

        // B2: interior ring edges (and their transpose).
        for y in (2..half.saturating_sub(1)).step_by(2) {
            for x in y + 1..size - y - 1 {
                for &(ty, tx) in &[(y, x), (size - y - 1, x)] {
                    table[ty][tx] = weights.b2;
                    table[tx][ty] = weights.b2;
                }
            }
        }

        // X: diagonal neighbors of the corners on every second ring.
        for y in (1..half.saturating_sub(1)).step_by(2) {
            let (y2, x2) = (size - y - 1, size - y - 1);
            for (ty, tx) in iproduct!([y, y2].iter(), [y, x2].iter()) {
                table[*ty][*tx] = weights.x;
            }
        }

        // O1 and O2: buffer cells along every second ring.
        for y in (1..half.saturating_sub(1)).step_by(2) {
            for &(ty, tx) in &[
                (y, y + 1),
                (y, size - y - 2),
                (size - y - 1, y + 1),
                (size - y - 1, size - y - 2),
            ] {
                table[ty][tx] = weights.o1;
                table[tx][ty] = weights.o1;
            }
            for x in y + 2..size - y - 2 {
                for &(ty, tx) in &[(y, x), (size - y - 1, x)] {
                    table[ty][tx] = weights.o2;
                    table[tx][ty] = weights.o2;
                }
            }
        }

        // Corners, their edge neighbors (C) and two-away cells (A2).
        let last = size - 1;
        for (y, x) in iproduct!([0, last].iter().copied(), [0, last].iter().copied()) {
            table[y][x] = weights.corner;

            let x_sign: i32 = if x == 0 { 1 } else { -1 };
            let y_sign: i32 = if y == 0 { 1 } else { -1 };
            table[y][(x as i32 + x_sign) as usize] = weights.c;
            table[(y as i32 + y_sign) as usize][x] = weights.c;

            if size >= 6 {
                table[y][(x as i32 + 2 * x_sign) as usize] = weights.a2;
                table[(y as i32 + 2 * y_sign) as usize][x] = weights.a2;
            }
        }

        TableScorer { size, table }
    }

    fn score<B: Bits>(&self, board: &BitBoard<B>) -> i32 {
        debug_assert_eq!(self.size, board.size());
        let mut score = 0;
        for (y, row) in self.table.iter().enumerate() {
            for (x, weight) in row.iter().enumerate() {
                match board.disc_at(Square::new(x, y)) {
                    Some(Color::Black) => score += weight,
                    Some(Color::White) => score -= weight,
                    None => {}
                }
            }
        }
        score
    }
}

/// Stable-edge patterns: corner-anchored runs along each edge.
#[derive(Clone, Debug)]
struct EdgeScorer<B: Bits> {
    weight: i32,
    masks: Vec<B>,
}

impl<B: Bits> EdgeScorer<B> {
    fn new(size: usize, weight: i32) -> Self {
        let width = size * size;
        let last = size - 1;
        let mut masks = Vec::new();

        let mut push_runs = |cells: &dyn Fn(usize) -> Square| {
            // Runs of 2..size-1 anchored at either end, then the full edge.
            for len in 2..size {
                let mut from_start = B::zero(width);
                let mut from_end = B::zero(width);
                for i in 0..len {
                    from_start = from_start.or(&B::single(width, cells(i).index(size)));
                    from_end = from_end.or(&B::single(width, cells(last - i).index(size)));
                }
                masks.push(from_start);
                masks.push(from_end);
            }
            let mut full = B::zero(width);
            for i in 0..size {
                full = full.or(&B::single(width, cells(i).index(size)));
            }
            masks.push(full);
        };

        push_runs(&|i| Square::new(i, 0));
        push_runs(&|i| Square::new(i, last));
        push_runs(&|i| Square::new(0, i));
        push_runs(&|i| Square::new(last, i));

        EdgeScorer { weight, masks }
    }

    fn score(&self, black: &B, white: &B) -> i32 {
        let mut score = 0;
        for mask in &self.masks {
            if black.contains_all(mask) {
                score += self.weight;
            }
            if white.contains_all(mask) {
                score -= self.weight;
            }
        }
        score
    }
}

/// A black-positive board evaluation assembled from optional sub-scorers.
///
/// Each preset constructor enables a subset of disc-count,
/// positional-table, mobility, stable-edge and terminal win/lose scoring.
#[derive(Clone, Debug)]
pub struct Evaluator<B: Bits> {
    count_discs: bool,
    table: Option<TableScorer>,
    mobility_weight: Option<i32>,
    edge: Option<EdgeScorer<B>>,
    win_lose_weight: Option<i32>,
}

impl<B: Bits> Evaluator<B> {
    /// Disc-count differential only. The exact metric for endgame solving.
    pub fn disc_count() -> Self {
        Evaluator {
            count_discs: true,
            table: None,
            mobility_weight: None,
            edge: None,
            win_lose_weight: None,
        }
    }

    /// Positional table only.
    pub fn table(size: usize) -> Self {
        Evaluator {
            count_discs: false,
            table: Some(TableScorer::new(size, TableWeights::default())),
            mobility_weight: None,
            edge: None,
            win_lose_weight: None,
        }
    }

    /// Positional table plus mobility.
    pub fn table_mobility(size: usize) -> Self {
        let mut evaluator = Self::table(size);
        evaluator.mobility_weight = Some(5);
        evaluator
    }

    /// Table, mobility and the dominant terminal win/lose bonus. The usual
    /// midgame configuration.
    pub fn standard(size: usize) -> Self {
        let mut evaluator = Self::table_mobility(size);
        evaluator.win_lose_weight = Some(10_000);
        evaluator
    }

    /// [`Evaluator::standard`] plus stable-edge patterns.
    pub fn full(size: usize) -> Self {
        let mut evaluator = Self::standard(size);
        evaluator.edge = Some(EdgeScorer::new(size, 100));
        evaluator
    }

    /// Replace the positional table weights.
    pub fn with_table_weights(mut self, size: usize, weights: TableWeights) -> Self {
        self.table = Some(TableScorer::new(size, weights));
        self
    }

    /// Score the position, positive favoring black. `black_moves` and
    /// `white_moves` are the legal-move counts for each color; when both
    /// are zero the game is over and the terminal score dominates.
    pub fn evaluate(&self, board: &BitBoard<B>, black_moves: u32, white_moves: u32) -> i32 {
        if let Some(weight) = self.win_lose_weight {
            if black_moves == 0 && white_moves == 0 {
                let diff = board.disc_difference();
                return if diff > 0 {
                    diff + weight
                } else if diff < 0 {
                    diff - weight
                } else {
                    0
                };
            }
        }

        let mut score = 0;
        if self.count_discs {
            score += board.disc_difference();
        }
        if let Some(table) = &self.table {
            score += table.score(board);
        }
        if let Some(weight) = self.mobility_weight {
            score += (black_moves as i32 - white_moves as i32) * weight;
        }
        if let Some(edge) = &self.edge {
            score += edge.score(board.black_bits(), board.white_bits());
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reversi_core::{Wide, Word};

    fn table_for(size: usize) -> Vec<Vec<i32>> {
        TableScorer::new(size, TableWeights::default()).table
    }

    #[test]
    fn eight_by_eight_table_cells() {
        let table = table_for(8);
        assert_eq!(table[0][0], 50); // corner
        assert_eq!(table[0][1], -20); // c
        assert_eq!(table[1][0], -20); // c
        assert_eq!(table[0][2], -1); // a2
        assert_eq!(table[1][1], -25); // x
        assert_eq!(table[2][2], 0); // a1
        assert_eq!(table[3][3], -1); // b1
        assert_eq!(table[1][2], -5); // o1
        assert_eq!(table[1][3], -5); // o2
        assert_eq!(table[2][3], -1); // b2
    }

    #[test]
    fn table_is_symmetric() {
        for &size in &[4usize, 6, 8, 10] {
            let table = table_for(size);
            let last = size - 1;
            for y in 0..size {
                for x in 0..size {
                    assert_eq!(table[y][x], table[x][y], "transpose {}x{}", size, size);
                    assert_eq!(table[y][x], table[y][last - x], "mirror {}x{}", size, size);
                    assert_eq!(table[y][x], table[last - y][x], "flip {}x{}", size, size);
                }
            }
        }
    }

    #[test]
    fn table_score_is_zero_on_symmetric_start() {
        let board = BitBoard::<Word>::new(8).unwrap();
        let evaluator = Evaluator::table(8);
        assert_eq!(evaluator.evaluate(&board, 4, 4), 0);
    }

    #[test]
    fn mobility_favors_the_side_with_more_moves() {
        let board = BitBoard::<Word>::new(8).unwrap();
        let evaluator = Evaluator::table_mobility(8);
        assert_eq!(evaluator.evaluate(&board, 7, 3), 20);
        assert_eq!(evaluator.evaluate(&board, 3, 7), -20);
    }

    #[test]
    fn terminal_score_dominates() {
        let mut board = BitBoard::<Word>::new(4).unwrap();
        board.put(Color::Black, Square::new(1, 0)).unwrap();
        let evaluator = Evaluator::standard(4);

        // Pretend neither side can move: 4 black vs 1 white discs.
        let score = evaluator.evaluate(&board, 0, 0);
        assert_eq!(score, 3 + 10_000);

        // A drawn terminal position scores zero.
        let start = BitBoard::<Word>::new(4).unwrap();
        assert_eq!(evaluator.evaluate(&start, 0, 0), 0);
    }

    #[test]
    fn disc_count_matches_scores() {
        let mut board = BitBoard::<Word>::new(8).unwrap();
        board.put(Color::Black, Square::new(3, 2)).unwrap();
        let evaluator = Evaluator::disc_count();
        assert_eq!(evaluator.evaluate(&board, 3, 3), 3);
    }

    #[test]
    fn edge_runs_count_for_both_colors() {
        let size = 4;
        let width = size * size;
        // Black owns the full top edge; white owns two cells anchored at
        // the lower-left corner.
        let mut black = Word::zero(width);
        for x in 0..size {
            black = black.or(&Word::single(width, Square::new(x, 0).index(size)));
        }
        let mut white = Word::zero(width);
        for x in 0..2 {
            white = white.or(&Word::single(width, Square::new(x, size - 1).index(size)));
        }

        let scorer = EdgeScorer::<Word>::new(size, 100);
        // Top edge: both 2-runs, both 3-runs, and the full edge.
        assert_eq!(scorer.score(&black, &Word::zero(width)), 500);
        assert_eq!(scorer.score(&black, &white), 400);
    }

    #[test]
    fn wide_evaluator_works_on_large_boards() {
        let board = BitBoard::<Wide>::new(10).unwrap();
        let evaluator = Evaluator::<Wide>::full(10);
        assert_eq!(evaluator.evaluate(&board, 4, 4), 0);
    }
}
