use crate::ludo::Color;

/// Number of cells on the shared circular track (cells 0-51).
pub const TRACK_LENGTH: u8 = 52;

/// Number of cells in each private home lane. The last one is the finish.
pub const LANE_LENGTH: u8 = 5;

/// Raw position of the last lane cell. Reaching it exactly finishes the token.
pub const FINISH: i8 = (TRACK_LENGTH + LANE_LENGTH - 1) as i8;

/// Raw position of a token still waiting at its base.
pub const WAITING: i8 = -1;

/// Die value needed to leave the base. It also grants a bonus roll.
pub const ENTRY_ROLL: u8 = 6;

const ENTRY_CELL_LOOKUP: [u8; 4] = [0, 13, 26, 39];

/// Last shared cell before each color turns into its lane.
const LANE_THRESHOLD_LOOKUP: [u8; 4] = [51, 12, 25, 38];

/// Start cells followed by star cells. Nobody can be captured here.
pub const SAFE_CELLS: [u8; 8] = [0, 13, 26, 39, 8, 21, 34, 47];

pub fn entry_cell(color: Color) -> u8 {
    ENTRY_CELL_LOOKUP[color.index()]
}

pub fn lane_threshold(color: Color) -> u8 {
    LANE_THRESHOLD_LOOKUP[color.index()]
}

pub fn is_safe_cell(cell: u8) -> bool {
    SAFE_CELLS.contains(&cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_sits_just_before_entry() {
        for color in Color::ALL {
            let entry = entry_cell(color);
            let threshold = lane_threshold(color);
            assert_eq!((threshold + 1) % TRACK_LENGTH, entry);
            assert!(is_safe_cell(entry));
        }
    }

    #[test]
    fn test_finish_is_last_lane_cell() {
        assert_eq!(FINISH, 56);
        assert!(!is_safe_cell(10));
        assert!(is_safe_cell(47));
    }
}
