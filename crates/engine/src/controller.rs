//! Turn controller - the top-level match-3 state machine
//!
//! The controller is polled from the host's tick with the current time and at
//! most one click. Whenever a timed phase (swap, undo, cascade pass) is in
//! flight, `next_ready_ms` lies in the future and the call is a no-op. Once the
//! deadline passes, one evaluation runs, in this order:
//!
//! 1. detect + compact; if anything exploded, stay `Resolving` for one more
//!    pass and forget the selection and any pending undo
//! 2. close an open cascade tally (`CascadeSettled`)
//! 3. revert a swap that produced nothing (`AwaitingUndo`)
//! 4. otherwise become `Idle` and apply the click to the selection
//!
//! Swaps are optimistic: they are performed first and judged by the pass
//! that follows their animation.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::core::{cascade, Grid, GridError, GridSnapshot};
use crate::pointer::{resolve_on_board, Click, LayoutResolver, PointerResolver};
use crate::selection::{select, SelectOutcome};
use crate::types::{CellPos, GridEvent, MatchBonus, Phase, TurnEvent};

/// Plain-data view of the controller for renderers and tooling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub episode_id: u32,
    pub seed: u32,
    pub phase: Phase,
    pub selected: Option<CellPos>,
    pub next_ready_ms: u64,
    pub total_bonus: MatchBonus,
    pub swaps_performed: u32,
    pub swaps_undone: u32,
    pub grid: GridSnapshot,
}

#[derive(Debug, Clone, Copy, Default)]
struct CascadeTally {
    rounds: u32,
    bonus: MatchBonus,
}

#[derive(Debug)]
pub struct TurnController<R = LayoutResolver> {
    config: EngineConfig,
    grid: Grid,
    resolver: R,

    phase: Phase,
    selected: Option<CellPos>,
    pending_undo: Option<(CellPos, CellPos)>,
    next_ready_ms: u64,
    cascade: Option<CascadeTally>,

    total_bonus: MatchBonus,
    swaps_performed: u32,
    swaps_undone: u32,
    episode_id: u32,
    seed: u32,

    events: Vec<TurnEvent>,
}

impl TurnController {
    /// Build a random grid from `config` (seeded with `config.seed`).
    pub fn new(config: EngineConfig) -> Result<Self, GridError> {
        config.validate()?;
        let grid = config.build_grid(config.seed)?;
        Ok(Self::from_grid(config, grid))
    }

    /// Drive an existing grid. The grid's dimensions, kinds and layout
    /// replace the ones in `config` so that restarts reproduce its shape.
    pub fn from_grid(mut config: EngineConfig, grid: Grid) -> Self {
        config.width = grid.width();
        config.height = grid.height();
        config.tile_kinds = grid.kind_count();
        let layout = *grid.layout();
        config.origin = layout.origin;
        config.step_h = layout.step_h;
        config.step_v = layout.step_v;

        let seed = config.seed;
        Self {
            config,
            grid,
            resolver: LayoutResolver,
            // The initial fill may contain runs; the first evaluation clears them.
            phase: Phase::Resolving,
            selected: None,
            pending_undo: None,
            next_ready_ms: 0,
            cascade: None,
            total_bonus: MatchBonus::default(),
            swaps_performed: 0,
            swaps_undone: 0,
            episode_id: 0,
            seed,
            events: Vec::new(),
        }
    }
}

impl<R: PointerResolver> TurnController<R> {
    /// Swap in a host-specific pointer resolver
    pub fn with_resolver<R2: PointerResolver>(self, resolver: R2) -> TurnController<R2> {
        TurnController {
            config: self.config,
            grid: self.grid,
            resolver,
            phase: self.phase,
            selected: self.selected,
            pending_undo: self.pending_undo,
            next_ready_ms: self.next_ready_ms,
            cascade: self.cascade,
            total_bonus: self.total_bonus,
            swaps_performed: self.swaps_performed,
            swaps_undone: self.swaps_undone,
            episode_id: self.episode_id,
            seed: self.seed,
            events: self.events,
        }
    }

    /// Poll the state machine at `now_ms` with an optional click.
    pub fn advance(&mut self, now_ms: u64, click: Option<Click>) {
        if now_ms < self.next_ready_ms {
            if let Some(click) = click {
                tracing::debug!(?click, now_ms, ready_at = self.next_ready_ms, "input ignored while busy");
            }
            return;
        }

        let move_ms = self.config.move_ms;

        let step = cascade::resolve_step(&mut self.grid, move_ms);
        if step.acted() {
            self.phase = Phase::Resolving;
            self.next_ready_ms = now_ms + step.wait_ms as u64;
            self.selected = None;
            self.pending_undo = None;

            let tally = self.cascade.get_or_insert_with(CascadeTally::default);
            tally.rounds += 1;
            tally.bonus += step.bonus;
            self.total_bonus += step.bonus;
            tracing::trace!(round = tally.rounds, runs = step.runs.len(), bonus = ?step.bonus, "cascade round");
            self.events.push(TurnEvent::CascadeRound {
                round: tally.rounds,
                bonus: step.bonus,
            });
            if click.is_some() {
                tracing::debug!("input ignored while resolving");
            }
            return;
        }

        if let Some(tally) = self.cascade.take() {
            tracing::info!(
                rounds = tally.rounds,
                three = tally.bonus.three,
                four = tally.bonus.four,
                five_plus = tally.bonus.five_plus,
                "cascade settled"
            );
            self.events.push(TurnEvent::CascadeSettled {
                rounds: tally.rounds,
                bonus: tally.bonus,
            });
        }

        if let Some((a, b)) = self.pending_undo.take() {
            if let Err(err) = self.grid.swap(a, b, move_ms) {
                tracing::warn!(%err, "undo swap failed");
                self.phase = Phase::Idle;
                return;
            }
            self.phase = Phase::AwaitingUndo;
            self.next_ready_ms = now_ms + move_ms as u64;
            self.swaps_undone += 1;
            tracing::debug!(%a, %b, "unproductive swap undone");
            self.events.push(TurnEvent::SwapUndone { a, b });
            if click.is_some() {
                tracing::debug!("input ignored while undoing");
            }
            return;
        }

        self.phase = Phase::Idle;
        if let Some(click) = click {
            self.handle_click(now_ms, click);
        }
    }

    fn handle_click(&mut self, now_ms: u64, click: Click) {
        let cell = resolve_on_board(&self.resolver, &self.grid, click);
        let outcome = select(self.selected, cell);
        self.selected = outcome.next_selection(self.selected);

        match outcome {
            SelectOutcome::Ignored => {
                tracing::debug!(?click, "click missed the board");
            }
            SelectOutcome::Selected(at) => {
                tracing::debug!(%at, "selected");
                self.events.push(TurnEvent::Selected { at });
            }
            SelectOutcome::Rejected { from, to } => {
                tracing::debug!(%from, %to, "illegal swap ignored");
                self.events.push(TurnEvent::SwapRejected { from, to });
                self.events.push(TurnEvent::Selected { at: to });
            }
            SelectOutcome::Swap(a, b) => {
                let move_ms = self.config.move_ms;
                if let Err(err) = self.grid.swap(a, b, move_ms) {
                    tracing::warn!(%err, "swap failed");
                    return;
                }
                self.phase = Phase::Resolving;
                self.next_ready_ms = now_ms + move_ms as u64;
                self.pending_undo = Some((a, b));
                self.swaps_performed += 1;
                tracing::debug!(%a, %b, "swap performed");
                self.events.push(TurnEvent::SwapPerformed { a, b });
            }
        }
    }

    /// Start a new episode on a fresh grid of the same shape.
    pub fn restart(&mut self, seed: u32) -> Result<(), GridError> {
        let grid = self.config.build_grid(seed)?;
        self.grid = grid;
        self.seed = seed;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.phase = Phase::Resolving;
        self.selected = None;
        self.pending_undo = None;
        self.next_ready_ms = 0;
        self.cascade = None;
        self.total_bonus = MatchBonus::default();
        self.swaps_performed = 0;
        self.swaps_undone = 0;
        self.events.clear();
        tracing::info!(episode_id = self.episode_id, seed, "restarted");
        Ok(())
    }

    /// Would a click passed to `advance(now_ms, ..)` reach the selection
    /// rules?
    pub fn accepting_input(&self, now_ms: u64) -> bool {
        now_ms >= self.next_ready_ms && self.pending_undo.is_none() && self.grid.is_stable()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected(&self) -> Option<CellPos> {
        self.selected
    }

    pub fn next_ready_ms(&self) -> u64 {
        self.next_ready_ms
    }

    pub fn total_bonus(&self) -> MatchBonus {
        self.total_bonus
    }

    pub fn swaps_performed(&self) -> u32 {
        self.swaps_performed
    }

    pub fn swaps_undone(&self) -> u32 {
        self.swaps_undone
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, TurnEvent> {
        self.events.drain(..)
    }

    /// Visual notifications produced by the grid since the last drain
    pub fn drain_grid_events(&mut self) -> std::vec::Drain<'_, GridEvent> {
        self.grid.drain_events()
    }

    pub fn snapshot(&self) -> TurnSnapshot {
        TurnSnapshot {
            episode_id: self.episode_id,
            seed: self.seed,
            phase: self.phase,
            selected: self.selected,
            next_ready_ms: self.next_ready_ms,
            total_bonus: self.total_bonus,
            swaps_performed: self.swaps_performed,
            swaps_undone: self.swaps_undone,
            grid: self.grid.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Layout;
    use crate::types::{TileKind, Vec3};

    const MOVE: u64 = 100;

    fn config() -> EngineConfig {
        EngineConfig {
            move_ms: MOVE as u32,
            ..EngineConfig::default()
        }
    }

    /// Controller over a fixed board given as rows, top row first.
    fn controller(rows: &[&[TileKind]]) -> TurnController {
        let height = rows.len();
        let width = rows[0].len();
        let grid = Grid::from_fn(width as u16, height as u16, Layout::default(), 5, 7, |h, v| {
            rows[height - 1 - v][h]
        })
        .unwrap();
        TurnController::from_grid(config(), grid)
    }

    fn cell(h: i32, v: i32) -> Option<Click> {
        Some(Click::Cell(CellPos::new(h, v)))
    }

    // Stable 4x3 board; swapping (0,0) with (1,0) is unproductive,
    // swapping (2,1) with (3,1) completes a row of 1s at v = 1.
    const STABLE: &[&[TileKind]] = &[
        &[2, 3, 4, 0],
        &[1, 1, 0, 1],
        &[0, 2, 3, 4],
    ];

    #[test]
    fn first_advance_on_stable_board_goes_idle() {
        let mut c = controller(STABLE);
        assert_eq!(c.phase(), Phase::Resolving);
        c.advance(0, None);
        assert_eq!(c.phase(), Phase::Idle);
        assert!(c.accepting_input(0));
    }

    #[test]
    fn select_then_neighbour_swaps() {
        let mut c = controller(STABLE);
        c.advance(0, cell(0, 0));
        assert_eq!(c.selected(), Some(CellPos::new(0, 0)));

        c.advance(10, cell(1, 0));
        assert_eq!(c.selected(), None);
        assert_eq!(c.phase(), Phase::Resolving);
        assert_eq!(c.next_ready_ms(), 10 + MOVE);
        assert_eq!(c.swaps_performed(), 1);

        let events: Vec<_> = c.drain_events().collect();
        assert_eq!(
            events,
            vec![
                TurnEvent::Selected {
                    at: CellPos::new(0, 0)
                },
                TurnEvent::SwapPerformed {
                    a: CellPos::new(0, 0),
                    b: CellPos::new(1, 0)
                },
            ]
        );
    }

    #[test]
    fn unproductive_swap_is_undone() {
        let mut c = controller(STABLE);
        let before = c.grid().kinds();

        c.advance(0, cell(0, 0));
        c.advance(0, cell(1, 0));
        assert_ne!(c.grid().kinds(), before);

        // Swap animation finishes, nothing matched: undo.
        c.advance(MOVE, None);
        assert_eq!(c.phase(), Phase::AwaitingUndo);
        assert_eq!(c.grid().kinds(), before);
        assert_eq!(c.swaps_undone(), 1);
        assert!(!c.accepting_input(MOVE));

        c.advance(2 * MOVE, None);
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.grid().kinds(), before);
        assert!(c
            .drain_events()
            .any(|e| matches!(e, TurnEvent::SwapUndone { .. })));
    }

    #[test]
    fn productive_swap_cascades_and_settles() {
        let mut c = controller(STABLE);
        c.advance(0, cell(2, 1));
        c.advance(0, cell(3, 1));

        c.advance(MOVE, None);
        assert_eq!(c.phase(), Phase::Resolving);
        assert!(c.total_bonus().runs() >= 1);

        let mut now = MOVE;
        while c.phase() != Phase::Idle {
            now += MOVE;
            c.advance(now, None);
            assert!(now < 100 * MOVE, "cascade did not settle");
        }
        assert!(c.grid().is_stable());
        assert_eq!(c.swaps_undone(), 0);

        let events: Vec<_> = c.drain_events().collect();
        let settled = events
            .iter()
            .filter(|e| matches!(e, TurnEvent::CascadeSettled { .. }))
            .count();
        assert_eq!(settled, 1);
        assert!(matches!(
            events.iter().find(|e| matches!(e, TurnEvent::CascadeRound { .. })),
            Some(TurnEvent::CascadeRound { round: 1, bonus }) if bonus.three >= 1
        ));
    }

    #[test]
    fn new_rejects_single_kind_board() {
        let err = TurnController::new(EngineConfig {
            tile_kinds: 1,
            ..EngineConfig::default()
        })
        .err()
        .unwrap();
        assert!(matches!(err, GridError::NeverSettles { .. }));
    }

    #[test]
    fn instant_moves_keep_productive_swap() {
        let grid = controller(STABLE).grid().clone();
        let mut c = TurnController::from_grid(
            EngineConfig {
                move_ms: 0,
                ..config()
            },
            grid,
        );
        c.advance(0, cell(2, 1));
        c.advance(0, cell(3, 1));

        for now in 1..20 {
            c.advance(now, None);
        }
        assert_eq!(c.phase(), Phase::Idle);
        assert_eq!(c.swaps_performed(), 1);
        assert_eq!(c.swaps_undone(), 0);
        assert!(c.total_bonus().three >= 1);
        assert!(c.grid().is_stable());
        assert!(c
            .drain_events()
            .any(|e| matches!(e, TurnEvent::CascadeRound { round: 1, .. })));
    }

    #[test]
    fn clicks_are_ignored_while_busy() {
        let mut c = controller(STABLE);
        c.advance(0, cell(0, 0));
        c.advance(0, cell(1, 0));
        c.drain_events().for_each(drop);

        c.advance(MOVE - 1, cell(3, 2));
        assert_eq!(c.selected(), None);
        assert_eq!(c.drain_events().count(), 0);
    }

    #[test]
    fn far_click_moves_selection() {
        let mut c = controller(STABLE);
        c.advance(0, cell(0, 0));
        c.advance(1, cell(3, 2));
        assert_eq!(c.selected(), Some(CellPos::new(3, 2)));
        assert_eq!(c.swaps_performed(), 0);
        assert!(c.drain_events().any(|e| e
            == TurnEvent::SwapRejected {
                from: CellPos::new(0, 0),
                to: CellPos::new(3, 2)
            }));
    }

    #[test]
    fn off_board_click_keeps_selection() {
        let mut c = controller(STABLE);
        c.advance(0, cell(1, 1));
        c.advance(1, Some(Click::World(Vec3::new(10.0, 10.0, 0.0))));
        assert_eq!(c.selected(), Some(CellPos::new(1, 1)));
    }

    #[test]
    fn world_clicks_resolve_through_layout() {
        let mut c = controller(STABLE);
        c.advance(0, Some(Click::World(Vec3::new(1.2, 1.9, 0.0))));
        assert_eq!(c.selected(), Some(CellPos::new(1, 2)));
    }

    #[test]
    fn custom_resolver_is_used() {
        let mut c = controller(STABLE).with_resolver(|_: &Grid, _: Click| Some(CellPos::new(2, 2)));
        c.advance(0, Some(Click::World(Vec3::ZERO)));
        assert_eq!(c.selected(), Some(CellPos::new(2, 2)));
    }

    #[test]
    fn random_start_settles_before_input() {
        let mut c = TurnController::new(EngineConfig {
            seed: 4242,
            ..config()
        })
        .unwrap();
        let mut now = 0;
        c.advance(now, cell(0, 0));
        while c.phase() != Phase::Idle {
            now += MOVE;
            c.advance(now, None);
        }
        assert!(c.grid().is_stable());
        assert!(c.accepting_input(now));
    }

    #[test]
    fn restart_resets_episode_state() {
        let mut c = controller(STABLE);
        c.advance(0, cell(0, 0));
        c.advance(0, cell(1, 0));
        c.restart(11).unwrap();

        assert_eq!(c.episode_id(), 1);
        assert_eq!(c.seed(), 11);
        assert_eq!(c.swaps_performed(), 0);
        assert_eq!(c.selected(), None);
        assert_eq!(c.next_ready_ms(), 0);
        assert_eq!(c.grid().width(), 4);
        assert_eq!(c.grid().height(), 3);
        assert_eq!(c.drain_events().count(), 0);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut c = controller(STABLE);
        c.advance(0, cell(2, 1));
        let snap = c.snapshot();
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.selected, Some(CellPos::new(2, 1)));
        assert_eq!(snap.grid.width, 4);
        assert_eq!(snap.grid.kind(CellPos::new(0, 2)), Some(2));
    }
}
