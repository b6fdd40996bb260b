//! Miscellaneous project utilities.

use std::fmt::{self, Formatter};

/// Format `size * size` characters into a grid with column letters and row
/// numbers. `cells` must yield exactly `size * size` items.
pub fn format_grid<T: Iterator<Item = char>>(
    size: usize,
    mut cells: T,
    f: &mut Formatter,
) -> fmt::Result {
    write!(f, "  ")?;
    for col in 0..size {
        write!(f, " {}", (b'a' + col as u8) as char)?;
    }

    for row in 0..size {
        write!(f, "\n{:2}", row + 1)?;
        for _ in 0..size {
            write!(f, " {}", cells.next().ok_or(fmt::Error)?)?;
        }
    }
    writeln!(f)?;

    match cells.next() {
        None => Ok(()),
        _ => Err(fmt::Error),
    }
}
