use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::shape::Shape;

/// Color tag of a settled cell or a piece.
///
/// Each piece kind has its own color (see [`PieceKind::color`]). How a color is drawn is up
/// to the presentation layer; [`Color::rgb`] gives the conventional value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    /// Returns the `(r, g, b)` value conventionally used for this color.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0x00, 0xf0, 0xf0),
            Color::Yellow => (0xf0, 0xf0, 0x00),
            Color::Purple => (0xa0, 0x00, 0xf0),
            Color::Green => (0x00, 0xf0, 0x00),
            Color::Red => (0xf0, 0x00, 0x00),
            Color::Blue => (0x00, 0x00, 0xf0),
            Color::Orange => (0xf0, 0xa0, 0x00),
        }
    }
}

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// T-piece.
    T = 2,
    /// S-piece.
    S = 3,
    /// Z-piece.
    Z = 4,
    /// J-piece.
    J = 5,
    /// L-piece.
    L = 6,
}

/// Picks one of the seven kinds with equal probability.
impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds, in catalog order.
    pub const ALL: [Self; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Returns a copy of the base (spawn orientation) shape of this kind.
    #[must_use]
    pub const fn shape(self) -> Shape {
        TEMPLATES[self as usize].shape
    }

    /// Returns the color tag of this kind.
    #[must_use]
    pub const fn color(self) -> Color {
        TEMPLATES[self as usize].color
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::T => 'T',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
        }
    }

    /// Parses a piece kind from a single character.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_char('S'), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_char('X'), None);
    /// ```
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'T' => Some(PieceKind::T),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            _ => None,
        }
    }
}

/// Catalog entry: base shape and color of one piece kind.
#[derive(Debug, Clone, Copy)]
struct PieceTemplate {
    shape: Shape,
    color: Color,
}

const TEMPLATES: [PieceTemplate; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const fn t(rows: &[&[bool]], color: Color) -> PieceTemplate {
        PieceTemplate {
            shape: Shape::from_rows(rows),
            color,
        }
    }

    [
        // I-piece
        t(&[&[C, C, C, C]], Color::Cyan),
        // O-piece
        t(&[&[C, C], &[C, C]], Color::Yellow),
        // T-piece
        t(&[&[E, C, E], &[C, C, C]], Color::Purple),
        // S-piece
        t(&[&[E, C, C], &[C, C, E]], Color::Green),
        // Z-piece
        t(&[&[C, C, E], &[E, C, C]], Color::Red),
        // J-piece
        t(&[&[C, E, E], &[C, C, C]], Color::Blue),
        // L-piece
        t(&[&[E, E, C], &[C, C, C]], Color::Orange),
    ]
};
