//! The exploring agent and its local observation.
//!
//! An agent is a small state machine over a shared read-only grid: current
//! position, ordered move/position histories, an energy accumulator, and an
//! alive flag. It never decides when the game ends; the session evaluates
//! the move budget and calls [`Agent::kill`].

use crate::error::GameError;
use crate::grid::{Cell, Grid};
use crate::visibility::{visible_offsets, MoveDirection, Variant};
use std::sync::Arc;

/// One entry of an observation: a reachable cell tagged with its relative
/// offset and whether the policy discloses its value.
///
/// Wraps the cell by reference; cells are never cloned or mutated to carry
/// observation state.
#[derive(Debug, Clone, Copy)]
pub struct ObservedCell<'a> {
    /// The move that reaches this cell.
    pub direction: MoveDirection,
    /// Relative (row, col) offset in the local 3x3 frame.
    pub offset: (i64, i64),
    pub cell: &'a Cell,
    pub visible: bool,
}

impl ObservedCell<'_> {
    /// The cell value, only when the policy discloses it.
    pub fn disclosed_value(&self) -> Option<f64> {
        self.visible.then_some(self.cell.value)
    }
}

/// The agent's 5-cell local view: the four edge-adjacent neighbors plus the
/// current cell, in fixed `[Up, Left, Stay, Right, Down]` order. Corners of
/// the 3x3 frame are never reachable and never appear here.
///
/// Transient projection; produced on demand and never stored.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub entries: [ObservedCell<'a>; 5],
}

impl<'a> Observation<'a> {
    /// The entry for a given move direction.
    pub fn entry(&self, direction: MoveDirection) -> &ObservedCell<'a> {
        self.entries
            .iter()
            .find(|e| e.direction == direction)
            .expect("observation covers all five directions")
    }

    /// The agent's own cell (always visible in every variant).
    pub fn current(&self) -> &ObservedCell<'a> {
        self.entry(MoveDirection::Stay)
    }

    /// Number of entries with a disclosed value.
    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.visible).count()
    }
}

/// A nematode exploring the landscape.
#[derive(Debug, Clone)]
pub struct Agent {
    grid: Arc<Grid>,
    variant: Variant,
    /// Normalized positions, one per accepted move plus the start.
    position_history: Vec<(usize, usize)>,
    /// Same length as `position_history`; the first entry is `None` (no
    /// move led to the start).
    move_history: Vec<Option<MoveDirection>>,
    /// Running sum of visited cell values, starting cell included.
    energy: f64,
    alive: bool,
    allow_stay: bool,
}

impl Agent {
    /// Place an agent on the grid. Any integer start is accepted and
    /// wrapped into bounds; the starting cell's value seeds the energy.
    pub fn new(grid: Arc<Grid>, variant: Variant, row: i64, col: i64, allow_stay: bool) -> Self {
        let start = grid.normalize(row, col);
        let energy = grid.get_cell(row, col).value;
        Self {
            grid,
            variant,
            position_history: vec![start],
            move_history: vec![None],
            energy,
            alive: true,
            allow_stay,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.variant
    }

    #[inline]
    pub fn energy(&self) -> f64 {
        self.energy
    }

    #[inline]
    pub fn alive(&self) -> bool {
        self.alive
    }

    /// Current (row, col), always in bounds.
    #[inline]
    pub fn position(&self) -> (usize, usize) {
        *self
            .position_history
            .last()
            .expect("position history is never empty")
    }

    /// Moves accepted so far (the start does not count).
    #[inline]
    pub fn move_count(&self) -> usize {
        self.position_history.len() - 1
    }

    /// The last accepted move; `None` at session start.
    #[inline]
    pub fn last_move(&self) -> Option<MoveDirection> {
        *self.move_history.last().expect("move history is never empty")
    }

    pub fn position_history(&self) -> &[(usize, usize)] {
        &self.position_history
    }

    pub fn move_history(&self) -> &[Option<MoveDirection>] {
        &self.move_history
    }

    /// Whether the no-staying-in-place rule is lifted.
    pub fn stay_allowed(&self) -> bool {
        self.allow_stay
    }

    /// Execute one move.
    ///
    /// Rejected moves leave histories and energy untouched; an accepted
    /// move appends to both histories and accumulates energy as one unit,
    /// with no partial-failure state.
    pub fn step(&mut self, direction: MoveDirection) -> Result<Observation<'_>, GameError> {
        if !self.alive {
            return Err(GameError::DeadAgent);
        }
        if direction == MoveDirection::Stay && !self.allow_stay {
            return Err(GameError::InvalidDirection(
                "staying in place is not allowed in this game".to_string(),
            ));
        }

        let (row, col) = self.position();
        let (dr, dc) = direction.offset();
        let target = self.grid.normalize(row as i64 + dr, col as i64 + dc);
        let value = self.grid.get_cell(target.0 as i64, target.1 as i64).value;

        self.position_history.push(target);
        self.move_history.push(Some(direction));
        self.energy += value;

        Ok(self.current_observation())
    }

    /// The 5-cell local view from the current position, with visibility
    /// flags from the active variant and the last move.
    pub fn current_observation(&self) -> Observation<'_> {
        let (row, col) = self.position();
        let visible = visible_offsets(self.variant, self.last_move());

        let entries = MoveDirection::OBSERVED.map(|direction| {
            let offset = direction.offset();
            let cell = self
                .grid
                .get_cell(row as i64 + offset.0, col as i64 + offset.1);
            ObservedCell {
                direction,
                offset,
                cell,
                visible: visible.contains(direction),
            }
        });

        Observation { entries }
    }

    /// Switch observability policy in place. History and position are
    /// untouched; the next observation reflects the new variant.
    pub fn set_variant(&mut self, variant: Variant) {
        self.variant = variant;
    }

    /// End the game for this agent. Called by the session when the move
    /// budget runs out (or by the UI for an early game over).
    pub fn kill(&mut self) {
        self.alive = false;
    }

    /// Begin a new game in place, keeping the grid binding so external
    /// registrations on the owning session survive.
    ///
    /// `start` of `None` returns to the original starting cell.
    pub fn reset(&mut self, start: Option<(i64, i64)>) {
        let start = match start {
            Some((row, col)) => self.grid.normalize(row, col),
            None => self.position_history[0],
        };
        self.position_history.clear();
        self.position_history.push(start);
        self.move_history.clear();
        self.move_history.push(None);
        self.energy = self.grid.get_cell(start.0 as i64, start.1 as i64).value;
        self.alive = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MoveDirection::*;

    fn test_grid() -> Arc<Grid> {
        // value = 100*row + col, easy to eyeball in assertions
        Arc::new(
            Grid::build(
                |x, y| (4.5 - y) * 100.0 + (x + 4.5),
                10,
                10,
                -5.0,
                5.0,
                -5.0,
                5.0,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_grid_fixture_values() {
        let grid = test_grid();
        assert!((grid.get_cell(0, 0).value - 0.0).abs() < 1e-9);
        assert!((grid.get_cell(3, 7).value - 307.0).abs() < 1e-9);
    }

    #[test]
    fn test_new_wraps_start_and_seeds_energy() {
        let grid = test_grid();
        let agent = Agent::new(grid, Variant::Omniscient, -1, 12, true);
        assert_eq!(agent.position(), (9, 2));
        assert!((agent.energy() - 902.0).abs() < 1e-9);
        assert_eq!(agent.move_count(), 0);
        assert_eq!(agent.last_move(), None);
    }

    #[test]
    fn test_step_updates_histories_and_energy() {
        let grid = test_grid();
        let mut agent = Agent::new(grid, Variant::Omniscient, 5, 5, true);
        agent.step(Right).unwrap();
        agent.step(Up).unwrap();

        assert_eq!(agent.position(), (4, 6));
        assert_eq!(agent.move_count(), 2);
        assert_eq!(agent.position_history(), &[(5, 5), (5, 6), (4, 6)]);
        assert_eq!(agent.move_history(), &[None, Some(Right), Some(Up)]);
        // 505 + 506 + 406
        assert!((agent.energy() - 1417.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_wraps_across_edges() {
        let grid = test_grid();
        let mut agent = Agent::new(grid, Variant::Omniscient, 0, 0, true);
        agent.step(Up).unwrap();
        assert_eq!(agent.position(), (9, 0));
        agent.step(Left).unwrap();
        assert_eq!(agent.position(), (9, 9));
    }

    #[test]
    fn test_stay_rule() {
        let grid = test_grid();
        let mut strict = Agent::new(grid.clone(), Variant::Blind, 5, 5, false);
        let err = strict.step(Stay).unwrap_err();
        assert!(matches!(err, GameError::InvalidDirection(_)));
        assert_eq!(strict.move_count(), 0);

        let mut lenient = Agent::new(grid, Variant::Blind, 5, 5, true);
        lenient.step(Stay).unwrap();
        assert_eq!(lenient.position(), (5, 5));
        assert_eq!(lenient.move_count(), 1);
    }

    #[test]
    fn test_dead_agent_rejects_moves_unchanged() {
        let grid = test_grid();
        let mut agent = Agent::new(grid, Variant::Omniscient, 2, 2, true);
        agent.step(Down).unwrap();
        let energy = agent.energy();
        let history_len = agent.position_history().len();

        agent.kill();
        for direction in [Up, Down, Left, Right, Stay] {
            let err = agent.step(direction).unwrap_err();
            assert!(matches!(err, GameError::DeadAgent));
        }
        assert!((agent.energy() - energy).abs() < 1e-12);
        assert_eq!(agent.position_history().len(), history_len);
    }

    #[test]
    fn test_observation_geometry() {
        let grid = test_grid();
        let agent = Agent::new(grid, Variant::Omniscient, 0, 0, true);
        let obs = agent.current_observation();

        assert_eq!(obs.current().cell.row, 0);
        assert_eq!(obs.current().cell.col, 0);
        // Neighbors wrap around the torus.
        assert_eq!(obs.entry(Up).cell.row, 9);
        assert_eq!(obs.entry(Left).cell.col, 9);
        assert_eq!(obs.entry(Down).cell.row, 1);
        assert_eq!(obs.entry(Right).cell.col, 1);
        // No diagonals, ever.
        assert_eq!(obs.entries.len(), 5);
        assert_eq!(obs.visible_count(), 5);
    }

    #[test]
    fn test_observation_visibility_follows_last_move() {
        let grid = test_grid();
        let mut agent = Agent::new(grid, Variant::Rearview, 5, 5, true);

        // Before any move only the current cell is disclosed.
        assert_eq!(agent.current_observation().visible_count(), 1);

        agent.step(Down).unwrap();
        let obs = agent.current_observation();
        assert!(obs.entry(Stay).visible);
        assert!(obs.entry(Up).visible);
        assert!(!obs.entry(Down).visible);
        assert_eq!(obs.entry(Down).disclosed_value(), None);
        assert_eq!(obs.visible_count(), 2);
    }

    #[test]
    fn test_set_variant_takes_effect_immediately() {
        let grid = test_grid();
        let mut agent = Agent::new(grid, Variant::Blind, 5, 5, true);
        agent.step(Right).unwrap();
        assert_eq!(agent.current_observation().visible_count(), 1);

        agent.set_variant(Variant::Omniscient);
        assert_eq!(agent.current_observation().visible_count(), 5);
        assert_eq!(agent.move_count(), 1);

        agent.set_variant(Variant::Headlight);
        let obs = agent.current_observation();
        assert!(obs.entry(Right).visible);
        assert_eq!(obs.visible_count(), 2);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let grid = test_grid();
        let mut agent = Agent::new(grid, Variant::Omniscient, 3, 3, true);
        agent.step(Down).unwrap();
        agent.step(Down).unwrap();
        agent.kill();

        agent.reset(None);
        assert!(agent.alive());
        assert_eq!(agent.position(), (3, 3));
        assert_eq!(agent.move_count(), 0);
        assert_eq!(agent.move_history(), &[None]);
        assert!((agent.energy() - 303.0).abs() < 1e-9);

        agent.reset(Some((-1, -1)));
        assert_eq!(agent.position(), (9, 9));
        assert!((agent.energy() - 909.0).abs() < 1e-9);
    }
}
