use std::ops::{Add, Sub};

use crate::prelude::*;

mod axial;
mod collection;
mod direction;
mod field;

pub use axial::Axial;
pub use collection::Collection;
pub use direction::Direction;
pub use field::{Field, Perimeter};

/// Represents a point on a hexagonal grid.
pub type Hex = u16;

/// Values that bound the maximum size of a game of Hive.
///
/// The rules of Hive do not specify an upper bound, but
/// one is necessary to achieve an efficient implementation.
pub mod consts
{
    use super::Hex;

    const FACT: Hex = 5;
    const _FACT_FITS: () = assert!(FACT <= 8);

    pub const ROWS: Hex = 2u16.pow(FACT as u32);
    pub const SIZE: Hex = ROWS * ROWS;
    pub const MASK: Hex = SIZE.wrapping_sub(1);

    /// The starting hex of the game, used instead of the origin.
    pub const ROOT: Hex = ROWS / 2 * (ROWS + 1);

    /// The wrapping boundary for two-point conversions.
    pub const WRAP: Hex = ROWS / 2 - 1;
}

use consts::*;

#[inline]
/// Returns the two common neighbours between two adjacent hexes, provided the hexes are actually adjacent.
pub fn common_neighbours(a: Hex, b: Hex) -> Option<(Hex, Hex)>
{
    Direction::to(a, b).map(|direction| (a + direction.clockwise(), a + direction.counterclockwise()))
}

#[inline]
/// Gets the six neighbours of this hex in clockwise order.
pub fn neighbours(h: Hex) -> [Hex; 6]
{
    Direction::all().map(|d| h + d)
}

/// Steps from `h` in `direction`, raising `HashOutOfRange` if the step would carry the hive
/// outside the fixed `ROWS x ROWS` Zobrist window instead of silently wrapping.
///
/// The index space is a torus: `Add<Direction> for Hex` wraps at the edges rather than growing,
/// so a hive that drifts far enough in one direction could alias two physically distinct tiles
/// onto the same `Hex`. This is detected by re-deriving the row/column pair the same way
/// [`Axial::from`] does and comparing the observed step against the direction's true unit
/// offset; a mismatch means the step wrapped.
pub fn checked_step(h: Hex, direction: Direction) -> Result<Hex>
{
    let before = window_components(h);
    let stepped = h + direction;
    let after = window_components(stepped);

    let (row_delta, col_delta) = direction.window_delta();
    let expected = (before.0 + row_delta as i16, before.1 + col_delta as i16);

    if after != expected
    {
        let err_msg = format!(
            "Stepping {} from hex {} would carry the hive outside the {}x{} Zobrist window.",
            direction,
            Axial::from(h),
            ROWS,
            ROWS
        );
        return Err(Error::new(Kind::HashOutOfRange, err_msg));
    }

    Ok(stepped)
}

/// Decomposes a hex into the same (ROWS-multiplier, remainder) pair `Axial::from` computes,
/// centered on the window so a step that crosses the edge is visible as a discontinuity rather
/// than hidden by the wraparound `+`/`-` a caller would otherwise use directly.
fn window_components(h: Hex) -> (i16, i16)
{
    let multiplier = (h.wrapping_sub(ROOT - ROWS / 2) / ROWS) as i8;
    let multiplier = if multiplier as i16 > WRAP as i16 { multiplier as i16 - ROWS as i16 } else { multiplier as i16 };

    let remainder = (h.wrapping_sub(ROOT) % ROWS) as i8;
    let remainder = if remainder as i16 > WRAP as i16 { remainder as i16 - ROWS as i16 } else { remainder as i16 };

    (multiplier, remainder)
}

impl Add<Direction> for Hex
{
    type Output = Hex;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn add(self, rhs: Direction) -> Self::Output
    {
        MASK & self.wrapping_add(rhs as Hex)
    }
}

impl Sub<Direction> for Hex
{
    type Output = Hex;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn sub(self, rhs: Direction) -> Self::Output
    {
        MASK & self.wrapping_add(rhs.inverse() as Hex)
    }
}
