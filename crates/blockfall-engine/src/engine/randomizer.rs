use std::{collections::VecDeque, fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PieceKind, RandomizerKind};

/// Source of spawn kinds.
///
/// The game loop only ever asks for the next kind; the selection policy is
/// up to the implementation.
pub trait PieceGenerator: fmt::Debug + Send {
    fn next_kind(&mut self) -> PieceKind;
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the `Pcg32` behind every generator. Using the same seed
/// produces the same sequence of kinds, which makes games reproducible.
/// Serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceSeed, RandomizerKind};
///
/// let seed: PieceSeed = "2a".parse().unwrap();
/// let mut a = RandomizerKind::Bag.build(seed);
/// let mut b = RandomizerKind::Bag.build(seed);
/// assert_eq!(a.next_kind(), b.next_kind());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed: '{input}' (expected 1-32 hex digits)")]
pub struct ParseSeedError {
    input: String,
}

impl PieceSeed {
    #[must_use]
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    #[must_use]
    pub const fn as_u128(self) -> u128 {
        u128::from_be_bytes(self.0)
    }
}

impl FromStr for PieceSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.is_empty() || s.len() > 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self::from_u128(num))
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
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
        if hex_str.len() != 32 {
            return Err(serde::de::Error::custom(format!(
                "invalid hex: expected 32 characters, got {}",
                hex_str.len()
            )));
        }
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl RandomizerKind {
    /// Creates the generator for this policy.
    #[must_use]
    pub fn build(self, seed: PieceSeed) -> Box<dyn PieceGenerator> {
        match self {
            RandomizerKind::Bag => Box::new(BagGenerator::with_seed(seed)),
            RandomizerKind::Uniform => Box::new(UniformGenerator::with_seed(seed)),
        }
    }
}

/// 7-bag randomizer.
///
/// Kinds are drawn from a shuffled bag holding each of the seven kinds once;
/// a new bag is shuffled when the current one runs out. Every aligned run of
/// seven draws therefore contains each kind exactly once.
#[derive(Debug, Clone)]
pub struct BagGenerator {
    rng: Pcg32,
    bag: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl BagGenerator {
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            bag: ArrayVec::new(),
        }
    }

    fn refill(&mut self) {
        let mut new_bag = PieceKind::ALL;
        new_bag.shuffle(&mut self.rng);
        self.bag.extend(new_bag);
    }
}

impl PieceGenerator for BagGenerator {
    fn next_kind(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.refill();
        }
    }
}

/// Independent uniform draws over the seven kinds.
#[derive(Debug, Clone)]
pub struct UniformGenerator {
    rng: Pcg32,
}

impl UniformGenerator {
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
        }
    }
}

impl PieceGenerator for UniformGenerator {
    fn next_kind(&mut self) -> PieceKind {
        self.rng.random()
    }
}

/// Spawn queue with a fixed-length preview of upcoming kinds.
#[derive(Debug)]
pub struct PieceQueue {
    generator: Box<dyn PieceGenerator>,
    preview: VecDeque<PieceKind>,
    preview_len: usize,
}

impl PieceQueue {
    #[must_use]
    pub fn new(generator: Box<dyn PieceGenerator>, preview_len: usize) -> Self {
        let mut this = Self {
            generator,
            preview: VecDeque::with_capacity(preview_len + 1),
            preview_len,
        };
        this.fill_preview();
        this
    }

    fn fill_preview(&mut self) {
        while self.preview.len() < self.preview_len {
            self.preview.push_back(self.generator.next_kind());
        }
    }

    /// Draws the next kind to spawn.
    pub fn pop_next(&mut self) -> PieceKind {
        let kind = self
            .preview
            .pop_front()
            .unwrap_or_else(|| self.generator.next_kind());
        self.fill_preview();
        kind
    }

    /// Upcoming kinds, nearest first.
    pub fn preview(&self) -> impl Iterator<Item = PieceKind> + '_ {
        self.preview.iter().copied()
    }
}
