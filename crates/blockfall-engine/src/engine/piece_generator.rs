use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ActivePiece, PieceKind};

/// Piece factory: hands out freshly positioned pieces of uniformly random kind.
///
/// Every call to [`Self::create_piece`] draws one of the seven kinds with equal
/// probability, independently of earlier draws, and returns it at the spawn position in
/// its base orientation.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceGenerator, PieceSeed};
///
/// let seed: PieceSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = PieceGenerator::with_seed(seed);
/// let mut b = PieceGenerator::with_seed(seed);
///
/// for _ in 0..10 {
///     assert_eq!(a.create_piece(), b.create_piece());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    seed: PieceSeed,
    rng: Pcg32,
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceGenerator {
    /// Creates a generator with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// The seed this generator started from.
    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.seed
    }

    /// Draws the next piece kind.
    pub fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }

    /// Creates a new piece at the spawn position.
    pub fn create_piece(&mut self) -> ActivePiece {
        ActivePiece::new(self.next_kind())
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed used to initialize the random number
/// generator for piece generation. Using the same seed will produce the same
/// sequence of pieces, enabling:
///
/// - Reproducible gameplay for debugging
/// - Deterministic testing
///
/// The text form is 32 hex digits, big-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid seed: expected 32 hex digits, got {len}")]
    InvalidLength { len: usize },
    #[display("invalid seed: {text:?} is not a hex number")]
    InvalidDigit { text: String },
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength { len: s.len() });
        }
        // `from_str_radix` accepts a leading sign, which is not a hex digit here.
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParsePieceSeedError::InvalidDigit { text: s.to_owned() });
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParsePieceSeedError::InvalidDigit { text: s.to_owned() })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
///
/// This implementation enables idiomatic seed generation with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let seed: PieceSeed = rand::rng().random();
        let mut a = PieceGenerator::with_seed(seed);
        let mut b = PieceGenerator::with_seed(seed);
        let seq_a: Vec<_> = (0..50).map(|_| a.next_kind()).collect();
        let seq_b: Vec<_> = (0..50).map(|_| b.next_kind()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_generator_keeps_seed() {
        let seed = PieceSeed([9; 16]);
        assert_eq!(PieceGenerator::with_seed(seed).seed(), seed);

        let generator = PieceGenerator::new();
        let mut replay = PieceGenerator::with_seed(generator.seed());
        let mut generator = generator;
        for _ in 0..20 {
            assert_eq!(generator.next_kind(), replay.next_kind());
        }
    }

    #[test]
    fn test_all_kinds_appear() {
        let mut generator = PieceGenerator::with_seed(PieceSeed([7; 16]));
        let seen: HashSet<_> = (0..500).map(|_| generator.next_kind()).collect();
        assert_eq!(seen.len(), PieceKind::LEN);
    }

    #[test]
    fn test_created_piece_is_at_spawn() {
        let mut generator = PieceGenerator::new();
        for _ in 0..20 {
            let piece = generator.create_piece();
            assert_eq!(piece, ActivePiece::new(piece.kind()));
        }
    }

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_roundtrip_random_seed() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(seed, deserialized);
        }

        #[test]
        fn test_known_value_sequential_bytes() {
            // Big-endian: bytes appear in order as hex pairs
            let seed = PieceSeed([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
            assert_eq!(
                serde_json::to_string(&seed).unwrap(),
                "\"0123456789abcdeffedcba9876543210\""
            );
        }

        #[test]
        fn test_parse_uppercase_hex() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_bytes()[..2], [0x01, 0x23]);
            assert_eq!(seed.to_bytes()[15], 0x10);
        }

        #[test]
        fn test_parse_errors() {
            assert_eq!(
                "abc".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidLength { len: 3 })
            );
            assert!(matches!(
                "g123456789abcdeffedcba9876543210".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidDigit { .. })
            ));
            assert!(matches!(
                "+123456789abcdeffedcba9876543210".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidDigit { .. })
            ));
            assert!(serde_json::from_str::<PieceSeed>("\"00\"").is_err());
        }
    }
}
