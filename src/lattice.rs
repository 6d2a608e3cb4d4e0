//! Placement generators for common array footprints.
//!
//! Each generator returns [`ArrayEntry`] values numbered from 1, row by row
//! from the lowest row up and left to right within a row, ready to be fed to
//! [`ArrayAssembler::assemble`](crate::assembly::ArrayAssembler::assemble).

use crate::assembly::ArrayEntry;
use crate::float_types::{Real, SQRT_2};
use crate::transform::Mirror;

/// Which rows of a lattice are turned by half a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowRotation {
    #[default]
    None,
    /// The first, third, ... rows counting from the bottom.
    Odd,
    /// The second, fourth, ... rows counting from the bottom.
    Even,
}

impl RowRotation {
    /// Parses the `1 / 0 / -1` codes of placement scripts: `1` turns the even
    /// rows, `-1` the odd ones.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => RowRotation::Even,
            -1 => RowRotation::Odd,
            _ => RowRotation::None,
        }
    }

    /// Rotation in degrees of the zero-based `row`.
    pub fn degrees(self, row: usize) -> Real {
        let turned = match self {
            RowRotation::None => false,
            RowRotation::Odd => row % 2 == 0,
            RowRotation::Even => row % 2 == 1,
        };
        if turned { 180.0 } else { 0.0 }
    }
}

/// `count` evenly spaced values from `start` to `stop`, both included.
fn linspace(start: Real, stop: Real, count: usize) -> impl Iterator<Item = Real> {
    let step = if count > 1 {
        (stop - start) / (count - 1) as Real
    } else {
        0.0
    };
    (0..count).map(move |i| if i + 1 == count && count > 1 { stop } else { start + step * i as Real })
}

/// Nodes must keep a whole element, corners included, inside the circle.
fn fits(x: Real, y: Real, radius: Real, element: Real) -> bool {
    let reach = radius - element / SQRT_2;
    x * x + y * y <= reach * reach
}

fn number(placements: Vec<(Real, Real, Real)>) -> Vec<ArrayEntry> {
    placements
        .into_iter()
        .enumerate()
        .map(|(i, (x, y, rotation))| ArrayEntry::new(i + 1, x, y, rotation, Mirror::None))
        .collect()
}

/// Triangular lattice of unit cell `pitch` inside a circle of `radius`.
///
/// Rows are `pitch·√3/2` apart and every other row is shifted by half a
/// pitch; `central_offset` chooses which rows shift, and so whether a node
/// sits at the centre. `element` is the absorber side.
pub fn circular_triangle_lattice(
    radius: Real,
    pitch: Real,
    element: Real,
    rows: RowRotation,
    central_offset: bool,
) -> Vec<ArrayEntry> {
    let x_step = pitch;
    let y_step = pitch * (3.0 as Real).sqrt() * 0.5;
    // odd counts keep a node on both axes
    let odd = |n: usize| if n % 2 == 0 { n + 1 } else { n };
    let nx = odd((radius * 2.0 / x_step).floor() as usize);
    let ny = odd((radius * 2.0 / y_step).floor() as usize);
    let x_min = -((nx - 1) as Real) * 0.5 * x_step;
    let y_min = -((ny - 1) as Real) * 0.5 * y_step;

    let mut placements = Vec::new();
    for (row, y) in linspace(y_min, -y_min, ny).enumerate() {
        let shift = ((row + usize::from(central_offset)) % 2) as Real * x_step * 0.5;
        for x in linspace(x_min, -x_min, nx) {
            let x = x + shift;
            if fits(x, y, radius, element) {
                placements.push((x, y, rows.degrees(row)));
            }
        }
    }
    number(placements)
}

/// Square lattice of unit cell `pitch` inside a circle of `radius`.
pub fn circular_square_lattice(
    radius: Real,
    pitch: Real,
    element: Real,
    rows: RowRotation,
) -> Vec<ArrayEntry> {
    let count = (radius * 2.0 / pitch).floor() as usize;
    let min = -(radius / pitch).floor() * pitch;

    let mut placements = Vec::new();
    for (row, y) in linspace(min, -min, count).enumerate() {
        for x in linspace(min, -min, count) {
            if fits(x, y, radius, element) {
                placements.push((x, y, rows.degrees(row)));
            }
        }
    }
    number(placements)
}

/// Triangular lattice of `ny` rows starting at the origin. Shifted rows hold
/// one node less so the block stays rectangular.
pub fn square_triangle_lattice(
    pitch: Real,
    nx: usize,
    ny: usize,
    rows: RowRotation,
    central_offset: bool,
) -> Vec<ArrayEntry> {
    let y_step = pitch * (3.0 as Real).sqrt() * 0.5;
    let mut placements = Vec::new();
    for row in 0..ny {
        let shift = ((row + usize::from(central_offset)) % 2) as Real * pitch * 0.5;
        for column in 0..nx.saturating_sub(row % 2) {
            placements.push((
                column as Real * pitch + shift,
                row as Real * y_step,
                rows.degrees(row),
            ));
        }
    }
    number(placements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let values: Vec<_> = linspace(-2.0, 2.0, 5).collect();
        assert_eq!(values, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(linspace(3.0, 9.0, 1).collect::<Vec<_>>(), vec![3.0]);
        assert_eq!(linspace(0.0, 1.0, 0).count(), 0);
    }

    #[test]
    fn row_codes() {
        assert_eq!(RowRotation::from_code(1).degrees(1), 180.0);
        assert_eq!(RowRotation::from_code(1).degrees(0), 0.0);
        assert_eq!(RowRotation::from_code(-1).degrees(0), 180.0);
        assert_eq!(RowRotation::from_code(0).degrees(3), 0.0);
    }
}
