//! Movement directions and the partial-observability policy.
//!
//! An agent sees at most the 5 reachable cells of its 3x3 neighborhood
//! (edge-adjacent plus center; corners are never reachable and never
//! visible). Which of the 5 disclose their value depends on the selected
//! variant and the agent's previous move.

use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// One of the five legal moves: the four axis-aligned neighbors plus self.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
    Stay,
}

impl MoveDirection {
    /// Observation order: the 3x3 frame's edge-adjacent cells plus center.
    pub const OBSERVED: [MoveDirection; 5] = [
        MoveDirection::Up,
        MoveDirection::Left,
        MoveDirection::Stay,
        MoveDirection::Right,
        MoveDirection::Down,
    ];

    /// Row/column delta in matrix coordinates. Row index grows downward,
    /// so `Up` is row - 1.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            MoveDirection::Up => (-1, 0),
            MoveDirection::Down => (1, 0),
            MoveDirection::Left => (0, -1),
            MoveDirection::Right => (0, 1),
            MoveDirection::Stay => (0, 0),
        }
    }

    /// The direction leading back to where this move came from.
    #[inline]
    pub fn opposite(self) -> MoveDirection {
        match self {
            MoveDirection::Up => MoveDirection::Down,
            MoveDirection::Down => MoveDirection::Up,
            MoveDirection::Left => MoveDirection::Right,
            MoveDirection::Right => MoveDirection::Left,
            MoveDirection::Stay => MoveDirection::Stay,
        }
    }

    /// Stable bit index for [`DirectionSet`] membership.
    #[inline]
    fn bit(self) -> u8 {
        match self {
            MoveDirection::Up => 0,
            MoveDirection::Down => 1,
            MoveDirection::Left => 2,
            MoveDirection::Right => 3,
            MoveDirection::Stay => 4,
        }
    }
}

impl std::fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            MoveDirection::Up => "up",
            MoveDirection::Down => "down",
            MoveDirection::Left => "left",
            MoveDirection::Right => "right",
            MoveDirection::Stay => "stay",
        };
        write!(f, "{label}")
    }
}

/// Observability variant, the four fixed policies of the original game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Only the current cell is ever disclosed.
    Blind,
    /// One-step memory, looking backward: discloses the cell the agent
    /// came from.
    Rearview,
    /// One-step memory, looking forward: discloses the cell ahead in the
    /// direction of the last move.
    Headlight,
    /// All five reachable cells disclosed.
    Omniscient,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Blind,
        Variant::Rearview,
        Variant::Headlight,
        Variant::Omniscient,
    ];

    /// Numeric code used on the wire and in config files.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Variant::Blind => 0,
            Variant::Rearview => 1,
            Variant::Headlight => 2,
            Variant::Omniscient => 3,
        }
    }

    /// Parse the numeric code; anything outside 0..=3 is rejected.
    pub fn from_code(code: u8) -> Result<Self, GameError> {
        match code {
            0 => Ok(Variant::Blind),
            1 => Ok(Variant::Rearview),
            2 => Ok(Variant::Headlight),
            3 => Ok(Variant::Omniscient),
            other => Err(GameError::InvalidParameter(format!(
                "unknown variant code {other}, expected 0..=3"
            ))),
        }
    }

    /// Display nickname from the original scoreboard.
    pub fn nickname(self) -> &'static str {
        match self {
            Variant::Blind => "Zack",
            Variant::Rearview => "Kelly",
            Variant::Headlight => "Slater",
            Variant::Omniscient => "Lisa",
        }
    }
}

/// A small set over the five move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub const EMPTY: DirectionSet = DirectionSet(0);
    /// All five directions.
    pub const ALL: DirectionSet = DirectionSet(0b1_1111);

    pub fn single(direction: MoveDirection) -> Self {
        DirectionSet(1 << direction.bit())
    }

    #[must_use]
    pub fn with(self, direction: MoveDirection) -> Self {
        DirectionSet(self.0 | (1 << direction.bit()))
    }

    #[inline]
    pub fn contains(self, direction: MoveDirection) -> bool {
        self.0 & (1 << direction.bit()) != 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = MoveDirection> {
        MoveDirection::OBSERVED
            .into_iter()
            .filter(move |d| self.contains(*d))
    }
}

/// Which of the five reachable cells disclose their value.
///
/// Rearview and Headlight differ only in whether the disclosed neighbor is
/// behind or ahead of the last move; they share this one code path.
pub fn visible_offsets(variant: Variant, previous: Option<MoveDirection>) -> DirectionSet {
    match variant {
        Variant::Blind => DirectionSet::single(MoveDirection::Stay),
        Variant::Omniscient => DirectionSet::ALL,
        Variant::Rearview | Variant::Headlight => match previous {
            // Session start and staying put both leave nothing remembered.
            None | Some(MoveDirection::Stay) => DirectionSet::single(MoveDirection::Stay),
            Some(last) => {
                let disclosed = if variant == Variant::Rearview {
                    last.opposite()
                } else {
                    last
                };
                DirectionSet::single(MoveDirection::Stay).with(disclosed)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MoveDirection::*;

    #[test]
    fn test_offsets_cover_neighborhood() {
        let sum: (i64, i64) = MoveDirection::OBSERVED
            .iter()
            .map(|d| d.offset())
            .fold((0, 0), |acc, o| (acc.0 + o.0, acc.1 + o.1));
        // Four neighbor offsets cancel pairwise; Stay contributes nothing.
        assert_eq!(sum, (0, 0));
    }

    #[test]
    fn test_opposites() {
        assert_eq!(Up.opposite(), Down);
        assert_eq!(Left.opposite(), Right);
        assert_eq!(Stay.opposite(), Stay);
    }

    #[test]
    fn test_variant_codes_round_trip() {
        for v in Variant::ALL {
            assert_eq!(Variant::from_code(v.code()).unwrap(), v);
        }
        assert!(Variant::from_code(4).is_err());
        assert!(Variant::from_code(255).is_err());
    }

    #[test]
    fn test_blind_always_stay_only() {
        for previous in [None, Some(Up), Some(Down), Some(Left), Some(Right), Some(Stay)] {
            let set = visible_offsets(Variant::Blind, previous);
            assert_eq!(set, DirectionSet::single(Stay));
        }
    }

    #[test]
    fn test_rearview_sees_where_it_came_from() {
        let set = visible_offsets(Variant::Rearview, Some(Down));
        assert!(set.contains(Stay));
        assert!(set.contains(Up));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_headlight_sees_ahead() {
        let set = visible_offsets(Variant::Headlight, Some(Down));
        assert!(set.contains(Stay));
        assert!(set.contains(Down));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_memory_variants_collapse_at_start() {
        for variant in [Variant::Rearview, Variant::Headlight] {
            assert_eq!(
                visible_offsets(variant, None),
                DirectionSet::single(Stay)
            );
            assert_eq!(
                visible_offsets(variant, Some(Stay)),
                DirectionSet::single(Stay)
            );
        }
    }

    #[test]
    fn test_omniscient_sees_everything() {
        let set = visible_offsets(Variant::Omniscient, None);
        assert_eq!(set.len(), 5);
        for d in MoveDirection::OBSERVED {
            assert!(set.contains(d));
        }
    }

    #[test]
    fn test_direction_set_iter_order() {
        let set = DirectionSet::single(Down).with(Up);
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected, vec![Up, Down]);
    }
}
