//! Neighbor-value propagation rules.
//!
//! A [`PropagationRule`] defines how a cell's value follows from the value
//! of one of its six neighbors. The tessellation generator only ever calls a
//! rule with the actual value of the named neighbor, in whatever order the
//! traversal reaches cells, so every method must be a pure function of its
//! single argument.
//!
//! Opposite directions must be exact inverses of each other:
//! `from_east(from_west(v)) == v`, `from_north_east(from_south_west(v)) == v`
//! and `from_north_west(from_south_east(v)) == v`.

pub mod pitch;

use std::fmt;

pub use pitch::{PitchClass, PitchClassRule};

/// The six neighbor positions of a pointy-top hexagon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    /// All six directions, counter-clockwise from east.
    pub const ALL: [Direction; 6] = [
        Direction::East,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// The direction pointing the other way.
    pub fn opposite(self) -> Direction {
        match self {
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::NorthWest => Direction::SouthEast,
            Direction::NorthEast => Direction::SouthWest,
            Direction::SouthWest => Direction::NorthEast,
            Direction::SouthEast => Direction::NorthWest,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::West => "west",
            Direction::East => "east",
            Direction::NorthWest => "north-west",
            Direction::NorthEast => "north-east",
            Direction::SouthWest => "south-west",
            Direction::SouthEast => "south-east",
        };
        f.write_str(name)
    }
}

/// Rules producing a cell's value from one neighboring value.
///
/// Each `from_*` method receives the value of the neighbor lying in that
/// direction of the cell being computed. For example `from_west(v)` is the
/// value of a cell whose western neighbor holds `v`.
pub trait PropagationRule {
    /// Element type carried by every cell.
    type Value: Clone;

    fn from_west(&self, west: &Self::Value) -> Self::Value;

    fn from_east(&self, east: &Self::Value) -> Self::Value;

    fn from_north_west(&self, north_west: &Self::Value) -> Self::Value;

    fn from_north_east(&self, north_east: &Self::Value) -> Self::Value;

    fn from_south_west(&self, south_west: &Self::Value) -> Self::Value;

    fn from_south_east(&self, south_east: &Self::Value) -> Self::Value;

    /// Value of the very first cell of a tessellation.
    fn initial_value(&self) -> Self::Value;

    /// Value of a cell whose neighbor in `direction` holds `neighbor`.
    fn derive(&self, direction: Direction, neighbor: &Self::Value) -> Self::Value {
        match direction {
            Direction::West => self.from_west(neighbor),
            Direction::East => self.from_east(neighbor),
            Direction::NorthWest => self.from_north_west(neighbor),
            Direction::NorthEast => self.from_north_east(neighbor),
            Direction::SouthWest => self.from_south_west(neighbor),
            Direction::SouthEast => self.from_south_east(neighbor),
        }
    }
}

impl<R: PropagationRule + ?Sized> PropagationRule for &R {
    type Value = R::Value;

    fn from_west(&self, west: &Self::Value) -> Self::Value {
        (**self).from_west(west)
    }

    fn from_east(&self, east: &Self::Value) -> Self::Value {
        (**self).from_east(east)
    }

    fn from_north_west(&self, north_west: &Self::Value) -> Self::Value {
        (**self).from_north_west(north_west)
    }

    fn from_north_east(&self, north_east: &Self::Value) -> Self::Value {
        (**self).from_north_east(north_east)
    }

    fn from_south_west(&self, south_west: &Self::Value) -> Self::Value {
        (**self).from_south_west(south_west)
    }

    fn from_south_east(&self, south_east: &Self::Value) -> Self::Value {
        (**self).from_south_east(south_east)
    }

    fn initial_value(&self) -> Self::Value {
        (**self).initial_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn test_all_is_distinct() {
        let set: std::collections::HashSet<_> = Direction::ALL.iter().collect();
        assert_eq!(set.len(), 6);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::NorthEast.to_string(), "north-east");
        assert_eq!(Direction::West.to_string(), "west");
    }

    #[test]
    fn test_derive_dispatches_to_named_method() {
        let rule = PitchClassRule::new(1, 2, 3);
        let c = PitchClass::C;
        assert_eq!(rule.derive(Direction::West, &c), rule.from_west(&c));
        assert_eq!(rule.derive(Direction::SouthEast, &c), rule.from_south_east(&c));
        assert_eq!(rule.derive(Direction::NorthWest, &c), rule.from_north_west(&c));
    }

    #[test]
    fn test_derive_opposite_roundtrip() {
        let rule = PitchClassRule::new(7, 4, 3);
        for direction in Direction::ALL {
            for semitones in 0..12 {
                let value = PitchClass::from_semitones(semitones);
                let there = rule.derive(direction, &value);
                let back = rule.derive(direction.opposite(), &there);
                assert_eq!(back, value, "{} then {}", direction, direction.opposite());
            }
        }
    }

    #[test]
    fn test_rule_by_reference() {
        fn first<R: PropagationRule>(rule: R) -> R::Value {
            rule.initial_value()
        }
        let rule = PitchClassRule::new(1, 2, 3);
        assert_eq!(first(&rule), PitchClass::C);
    }
}
