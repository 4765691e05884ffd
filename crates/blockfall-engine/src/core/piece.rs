use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

use super::board::Position;

/// Anchor of a freshly spawned piece: top of the board, horizontally centered
/// for the 4-wide bounding box.
pub const SPAWN_ANCHOR: Position = Position::new(3, 0);

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
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

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Cell offsets of this kind in the given rotation, relative to the anchor.
    #[must_use]
    pub fn cells(self, rotation: Rotation) -> [Position; 4] {
        SHAPES[self as usize][rotation.as_usize()].map(|(dc, dr)| Position::new(dc.into(), dr.into()))
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

/// Looks up the cell offsets of `kind` at `rotation_index`, taken modulo 4.
#[must_use]
pub fn shape_cells(kind: PieceKind, rotation_index: u8) -> [Position; 4] {
    kind.cells(Rotation::new(rotation_index))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("rotation index must be 0-3, got {_0}")]
pub struct InvalidRotationError(#[error(not(source))] pub u8);

/// Rotation state of a piece.
///
/// - `0`: spawn orientation
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rotation(u8);

impl Rotation {
    pub const SPAWN: Self = Self(0);

    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index % 4)
    }

    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn rotated(self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => Self((self.0 + 1) % 4),
            RotationDirection::CounterClockwise => Self((self.0 + 3) % 4),
        }
    }

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Rotation {
    type Error = InvalidRotationError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        if index > 3 {
            return Err(InvalidRotationError(index));
        }
        Ok(Self(index))
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    const fn as_usize(self) -> usize {
        match self {
            RotationDirection::Clockwise => 0,
            RotationDirection::CounterClockwise => 1,
        }
    }
}

/// Ordered wall kick candidates tried when rotating `kind` out of `from`.
///
/// The first entry is always `(0, 0)`, the naive rotation. Offsets are
/// `(columns, rows)` with rows growing downward.
#[must_use]
pub fn kick_offsets(
    kind: PieceKind,
    from: Rotation,
    direction: RotationDirection,
) -> &'static [(i8, i8)] {
    match kind {
        PieceKind::O => &[(0, 0)],
        PieceKind::I => &I_KICKS[from.as_usize()][direction.as_usize()],
        _ => &JLSTZ_KICKS[from.as_usize()][direction.as_usize()],
    }
}

/// The falling piece: a kind, a rotation and the board position of the
/// top-left corner of its bounding box.
///
/// Values are immutable; movement returns a new `ActivePiece` that the caller
/// validates before committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePiece {
    kind: PieceKind,
    rotation: Rotation,
    anchor: Position,
}

impl ActivePiece {
    #[must_use]
    pub const fn new(kind: PieceKind, rotation: Rotation, anchor: Position) -> Self {
        Self {
            kind,
            rotation,
            anchor,
        }
    }

    #[must_use]
    pub const fn spawn(kind: PieceKind) -> Self {
        Self::new(kind, Rotation::SPAWN, SPAWN_ANCHOR)
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn anchor(&self) -> Position {
        self.anchor
    }

    /// Absolute board cells covered by the piece.
    #[must_use]
    pub fn cells(&self) -> [Position; 4] {
        self.kind
            .cells(self.rotation)
            .map(|offset| self.anchor.offset(offset.col, offset.row))
    }

    #[must_use]
    pub const fn shifted(&self, dcol: i32, drow: i32) -> Self {
        Self {
            anchor: self.anchor.offset(dcol, drow),
            ..*self
        }
    }

    #[must_use]
    pub const fn rotated(&self, direction: RotationDirection) -> Self {
        Self {
            rotation: self.rotation.rotated(direction),
            ..*self
        }
    }

    /// Rotated placements to try in order, one per kick offset.
    pub fn rotation_candidates(
        &self,
        direction: RotationDirection,
    ) -> impl Iterator<Item = Self> + use<> {
        let rotated = self.rotated(direction);
        kick_offsets(self.kind, self.rotation, direction)
            .iter()
            .map(move |&(dcol, drow)| rotated.shifted(dcol.into(), drow.into()))
    }
}

type ShapeOffsets = [(i8, i8); 4];

/// Generates all 4 rotation states by rotating 90° clockwise inside a
/// `size`×`size` box, then shifts every state right by `shift` columns.
const fn rotations(size: i8, shift: i8, base: ShapeOffsets) -> [ShapeOffsets; 4] {
    let mut states = [base; 4];
    let mut i = 1;
    while i < 4 {
        let mut j = 0;
        while j < 4 {
            let (x, y) = states[i - 1][j];
            states[i][j] = (size - 1 - y, x);
            j += 1;
        }
        i += 1;
    }
    let mut i = 0;
    while i < 4 {
        let mut j = 0;
        while j < 4 {
            states[i][j].0 += shift;
            j += 1;
        }
        i += 1;
    }
    states
}

const SHAPES: [[ShapeOffsets; 4]; PieceKind::LEN] = [
    // I-piece
    rotations(4, 0, [(0, 1), (1, 1), (2, 1), (3, 1)]),
    // O-piece, centered in the 4-wide box
    rotations(2, 1, [(0, 0), (1, 0), (0, 1), (1, 1)]),
    // T-piece
    rotations(3, 0, [(1, 0), (0, 1), (1, 1), (2, 1)]),
    // S-piece
    rotations(3, 0, [(1, 0), (2, 0), (0, 1), (1, 1)]),
    // Z-piece
    rotations(3, 0, [(0, 0), (1, 0), (1, 1), (2, 1)]),
    // J-piece
    rotations(3, 0, [(0, 0), (0, 1), (1, 1), (2, 1)]),
    // L-piece
    rotations(3, 0, [(2, 0), (0, 1), (1, 1), (2, 1)]),
];

/// Kick table indexed by `[from_rotation][direction]`.
type KickTable = [[[(i8, i8); 5]; 2]; 4];

/// Tables below are written with y pointing up; rows on the board grow
/// downward, so the vertical components are negated once here.
const fn rows_down(mut table: KickTable) -> KickTable {
    let mut from = 0;
    while from < 4 {
        let mut dir = 0;
        while dir < 2 {
            let mut k = 0;
            while k < 5 {
                table[from][dir][k].1 = -table[from][dir][k].1;
                k += 1;
            }
            dir += 1;
        }
        from += 1;
    }
    table
}

const JLSTZ_KICKS: KickTable = rows_down([
    [
        // 0 -> 1
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // 0 -> 3
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    ],
    [
        // 1 -> 2
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // 1 -> 0
        [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    ],
    [
        // 2 -> 3
        [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // 2 -> 1
        [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    ],
    [
        // 3 -> 0
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // 3 -> 2
        [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    ],
]);

const I_KICKS: KickTable = rows_down([
    [
        // 0 -> 1
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
        // 0 -> 3
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    ],
    [
        // 1 -> 2
        [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
        // 1 -> 0
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    ],
    [
        // 2 -> 3
        [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
        // 2 -> 1
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    ],
    [
        // 3 -> 0
        [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
        // 3 -> 2
        [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    ],
]);
