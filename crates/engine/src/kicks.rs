//! Rotation nudge table for the falling pair.

use tsumo_core::Orientation;

/// Positional nudges tried, in order, when rotating into `to`.
/// Identity comes first; sideways targets push away from the wall they face,
/// the downward target pushes the pivot up one row off the floor or a stack.
pub fn nudges(to: Orientation) -> &'static [(i32, i32)] {
    match to {
        Orientation::Up => &[(0, 0)],
        Orientation::Right => &[(0, 0), (-1, 0)],
        Orientation::Down => &[(0, 0), (0, -1)],
        Orientation::Left => &[(0, 0), (1, 0)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_first() {
        for o in Orientation::ALL {
            assert_eq!(nudges(o)[0], (0, 0));
        }
    }

    #[test]
    fn test_sideways_kicks_away_from_wall() {
        assert_eq!(nudges(Orientation::Right)[1], (-1, 0));
        assert_eq!(nudges(Orientation::Left)[1], (1, 0));
    }

    #[test]
    fn test_down_kicks_up() {
        assert_eq!(nudges(Orientation::Down), &[(0, 0), (0, -1)]);
    }
}
