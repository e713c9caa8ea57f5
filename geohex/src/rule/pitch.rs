//! Pitch classes and the semitone transposition rule.

use std::fmt;
use std::str::FromStr;

use super::PropagationRule;

const SEMITONES_PER_OCTAVE: i32 = 12;

/// One of the twelve pitch classes of equal temperament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    EFlat,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    BFlat,
    B,
}

impl PitchClass {
    /// All pitch classes in ascending semitone order.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::EFlat,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::BFlat,
        PitchClass::B,
    ];

    /// Pitch class `semitones` above C, wrapping in both directions.
    pub fn from_semitones(semitones: i32) -> Self {
        Self::ALL[semitones.rem_euclid(SEMITONES_PER_OCTAVE) as usize]
    }

    /// Semitones above C (0-11).
    pub fn semitones(self) -> i32 {
        self as i32
    }

    /// Transpose by `semitones` (may be negative, any magnitude).
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitones(self.semitones() + semitones.rem_euclid(SEMITONES_PER_OCTAVE))
    }

    /// Note letter this pitch class is spelled on.
    pub fn step(self) -> char {
        match self {
            PitchClass::C | PitchClass::CSharp => 'C',
            PitchClass::D | PitchClass::EFlat => 'D',
            PitchClass::E => 'E',
            PitchClass::F | PitchClass::FSharp => 'F',
            PitchClass::G | PitchClass::GSharp => 'G',
            PitchClass::A | PitchClass::BFlat => 'A',
            PitchClass::B => 'B',
        }
    }

    /// True when spelled as the step raised by a sharp.
    pub fn is_sharp(self) -> bool {
        matches!(
            self,
            PitchClass::CSharp
                | PitchClass::EFlat
                | PitchClass::FSharp
                | PitchClass::GSharp
                | PitchClass::BFlat
        )
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sharp() {
            write!(f, "{}#", self.step())
        } else {
            write!(f, "{}", self.step())
        }
    }
}

impl FromStr for PitchClass {
    type Err = String;

    /// Parses `C`, `C#`, `Db`, ... (case-insensitive letter, `#` or `b`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let letter = chars
            .next()
            .ok_or_else(|| "empty pitch class".to_string())?
            .to_ascii_uppercase();
        let natural = match letter {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(format!("'{}' is not a pitch class", s)),
        };
        let accidental = match chars.as_str() {
            "" => 0,
            "#" => 1,
            "b" => -1,
            _ => return Err(format!("'{}' is not a pitch class", s)),
        };
        Ok(Self::from_semitones(natural + accidental))
    }
}

/// Transposition rule over pitch classes.
///
/// Moving from the west, south-east or south-west neighbor adds a fixed
/// number of semitones. The east, north-west and north-east directions
/// subtract the offset of their opposite direction, so every opposite pair
/// cancels exactly modulo the octave.
///
/// # Example
///
/// ```
/// use geohex::rule::{PitchClass, PitchClassRule, PropagationRule};
///
/// // Fifths along rows, thirds along the diagonals
/// let rule = PitchClassRule::new(7, 4, 3);
/// assert_eq!(rule.from_west(&PitchClass::C), PitchClass::G);
/// assert_eq!(rule.from_east(&PitchClass::G), PitchClass::C);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchClassRule {
    west: i32,
    south_east: i32,
    south_west: i32,
    initial: PitchClass,
}

impl PitchClassRule {
    /// Create a rule from the semitones added when moving from the west,
    /// south-east and south-west neighbors. Starts on C.
    pub fn new(west: i32, south_east: i32, south_west: i32) -> Self {
        Self {
            west,
            south_east,
            south_west,
            initial: PitchClass::C,
        }
    }

    /// Start the tessellation on `initial` instead of C.
    pub fn with_initial(mut self, initial: PitchClass) -> Self {
        self.initial = initial;
        self
    }

    pub fn west(&self) -> i32 {
        self.west
    }

    pub fn south_east(&self) -> i32 {
        self.south_east
    }

    pub fn south_west(&self) -> i32 {
        self.south_west
    }
}

/// Offset undoing `offset` within one octave.
fn inverse(offset: i32) -> i32 {
    SEMITONES_PER_OCTAVE - offset.rem_euclid(SEMITONES_PER_OCTAVE)
}

impl PropagationRule for PitchClassRule {
    type Value = PitchClass;

    fn from_west(&self, west: &PitchClass) -> PitchClass {
        west.transpose(self.west)
    }

    fn from_east(&self, east: &PitchClass) -> PitchClass {
        east.transpose(inverse(self.west))
    }

    fn from_north_west(&self, north_west: &PitchClass) -> PitchClass {
        north_west.transpose(inverse(self.south_east))
    }

    fn from_north_east(&self, north_east: &PitchClass) -> PitchClass {
        north_east.transpose(inverse(self.south_west))
    }

    fn from_south_west(&self, south_west: &PitchClass) -> PitchClass {
        south_west.transpose(self.south_west)
    }

    fn from_south_east(&self, south_east: &PitchClass) -> PitchClass {
        south_east.transpose(self.south_east)
    }

    fn initial_value(&self) -> PitchClass {
        self.initial
    }
}
