//! Grid coordinates and the packed room identifier codec.
//!
//! Room identifiers arrive as strings or numbers such as `"0519"` or `519`.
//! Left-padded to four digits, the first two digits are the row and the last
//! two are the column. Only identifiers that land inside the 20x20 grid
//! decode to a [`Coord`]; everything else is absent.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Width and height of every map.
pub const GRID_SIZE: usize = 20;

/// Number of cells in a map.
pub const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Width of a padded packed identifier.
const PACKED_WIDTH: usize = 4;

/// Packed integer key for a coordinate (`row * 20 + col`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordKey(u16);

impl CoordKey {
    /// Raw index in `0..400`.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A validated `(row, col)` position on the 20x20 grid.
///
/// The only way to build one is through a bounds-checked constructor, so a
/// `Coord` is always in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Coord {
    row: u8,
    col: u8,
}

impl Coord {
    /// Create a coordinate, returning `None` if it falls outside the grid.
    pub fn new(row: i64, col: i64) -> Option<Self> {
        let in_range = |v: i64| (0..GRID_SIZE as i64).contains(&v);
        if in_range(row) && in_range(col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Row index (0 at the top).
    pub fn row(self) -> usize {
        self.row as usize
    }

    /// Column index (0 at the left).
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// Canonical set/map key.
    pub fn key(self) -> CoordKey {
        CoordKey(self.row as u16 * GRID_SIZE as u16 + self.col as u16)
    }

    /// The neighbouring coordinate at the given offset, if it is on the grid.
    pub fn offset(self, d_row: i64, d_col: i64) -> Option<Self> {
        Self::new(self.row as i64 + d_row, self.col as i64 + d_col)
    }

    /// Encode as a 4-digit packed identifier.
    pub fn to_packed(self) -> String {
        format!("{:02}{:02}", self.row, self.col)
    }

    /// Every coordinate in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..GRID_SIZE as u8).flat_map(|row| (0..GRID_SIZE as u8).map(move |col| Coord { row, col }))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Decode a packed identifier from its textual form.
pub fn decode_packed_str(id: &str) -> Option<Coord> {
    let chars: Vec<char> = id.chars().collect();
    let mut padded = vec!['0'; PACKED_WIDTH.saturating_sub(chars.len())];
    padded.extend(chars);

    if padded.len() != PACKED_WIDTH {
        return None;
    }

    let row = leading_int(&padded[..2])?;
    let col = leading_int(&padded[2..])?;

    Coord::new(row, col)
}

/// Integer prefix of a digit group: leading whitespace and a sign are
/// allowed, and parsing stops at the first non-digit. `None` without digits.
fn leading_int(group: &[char]) -> Option<i64> {
    let mut rest = group
        .iter()
        .copied()
        .skip_while(|c| c.is_whitespace())
        .peekable();
    let negative = match rest.peek() {
        Some(&'-') => {
            rest.next();
            true
        }
        Some(&'+') => {
            rest.next();
            false
        }
        _ => false,
    };

    let mut value: Option<i64> = None;
    for digit in rest.map_while(|c| c.to_digit(10)) {
        value = Some(value.unwrap_or(0) * 10 + i64::from(digit));
    }
    value.map(|v| if negative { -v } else { v })
}

/// Decode a packed identifier from a JSON value.
///
/// Strings and numbers are accepted; numbers decode through their decimal
/// text, so `1.05` reads as `"1.05"`. Any other JSON type decodes to `None`,
/// as does anything that does not land on the grid.
pub fn decode_packed_id(id: &Value) -> Option<Coord> {
    packed_text(id).and_then(|text| decode_packed_str(&text))
}

/// Textual form of a packed identifier value, if it has one.
pub fn packed_text(id: &Value) -> Option<String> {
    match id {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                n.as_f64().filter(|f| f.is_finite()).map(|f| f.to_string())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_four_digit_string() {
        assert_eq!(decode_packed_str("0519"), Coord::new(5, 19));
    }

    #[test]
    fn test_decode_row_out_of_bounds() {
        assert_eq!(decode_packed_str("2000"), None);
    }

    #[test]
    fn test_decode_short_id_is_padded() {
        // "99" pads to "0099" -> (0, 99), which is off the grid
        assert_eq!(decode_packed_str("99"), None);
        assert_eq!(decode_packed_str("7"), Coord::new(0, 7));
        assert_eq!(decode_packed_str(""), Coord::new(0, 0));
    }

    #[test]
    fn test_decode_too_long() {
        assert_eq!(decode_packed_str("01010"), None);
    }

    #[test]
    fn test_decode_non_numeric_groups() {
        assert_eq!(decode_packed_str("ab01"), None);
        assert_eq!(decode_packed_str("01ab"), None);
        assert_eq!(decode_packed_str("null"), None);
        assert_eq!(decode_packed_str("01--"), None);
    }

    #[test]
    fn test_decode_groups_read_leading_digits() {
        // each group keeps its digit prefix and ignores what follows
        assert_eq!(decode_packed_str("051a"), Coord::new(5, 1));
        assert_eq!(decode_packed_str("1.05"), Coord::new(1, 5));
        assert_eq!(decode_packed_str("0+12"), Coord::new(0, 12));
        // leading whitespace is skipped
        assert_eq!(decode_packed_str(" 505"), Coord::new(5, 5));
        assert_eq!(decode_packed_str("07 3"), Coord::new(7, 3));
    }

    #[test]
    fn test_decode_negative_group_is_out_of_bounds() {
        // -1 pads to "00-1" -> col -1
        assert_eq!(decode_packed_id(&json!(-1)), None);
    }

    #[test]
    fn test_decode_numbers() {
        assert_eq!(decode_packed_id(&json!(519)), Coord::new(5, 19));
        assert_eq!(decode_packed_id(&json!(101)), Coord::new(1, 1));
        assert_eq!(decode_packed_id(&json!(1212.0)), Coord::new(12, 12));
        assert_eq!(decode_packed_id(&json!(1.05)), Coord::new(1, 5));
        // "12.5" -> groups "12" and ".5"
        assert_eq!(decode_packed_id(&json!(12.5)), None);
    }

    #[test]
    fn test_decode_other_json_types() {
        assert_eq!(decode_packed_id(&json!(null)), None);
        assert_eq!(decode_packed_id(&json!(true)), None);
        assert_eq!(decode_packed_id(&json!(["0101"])), None);
        assert_eq!(decode_packed_id(&json!({"id": "0101"})), None);
    }

    #[test]
    fn test_round_trip_every_cell() {
        for coord in Coord::all() {
            assert_eq!(decode_packed_str(&coord.to_packed()), Some(coord));
        }
    }

    #[test]
    fn test_key_is_unique() {
        let keys: std::collections::HashSet<CoordKey> = Coord::all().map(Coord::key).collect();
        assert_eq!(keys.len(), CELL_COUNT);

        let coord = Coord::new(7, 3).unwrap();
        assert_eq!(coord.key().index(), 143);
    }

    #[test]
    fn test_offset_stays_on_grid() {
        let corner = Coord::new(0, 19).unwrap();
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, 1), None);
        assert_eq!(corner.offset(1, -1), Coord::new(1, 18));
    }

    #[test]
    fn test_all_is_row_major() {
        let cells: Vec<Coord> = Coord::all().take(21).collect();
        assert_eq!(cells.len(), 21);
        assert_eq!(cells[0], Coord::new(0, 0).unwrap());
        assert_eq!(cells[19], Coord::new(0, 19).unwrap());
        assert_eq!(cells[20], Coord::new(1, 0).unwrap());
    }
}
