use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Playing
/// - Playing -> GameOver
/// - Playing -> AllCleared
///
/// Restarting replaces the round with a new `Playing` one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundState {
    #[default]
    Idle,
    Playing,
    GameOver,
    AllCleared,
}

impl RoundState {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::AllCleared)
    }
}

/// Authoritative state of one playthrough, only changed through its transition methods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    config: GameConfig,
    tiles: Vec<Tile>,
    state: RoundState,
    elapsed_ticks: u32,
    expected: TileId,
    auto_play: bool,
    top_stack_order: u32,
    clicked_count: u32,
    running_fades: u32,
    pending_clear: bool,
}

impl Round {
    /// A round that has not been started, with an empty board.
    pub fn idle(config: GameConfig) -> Self {
        Self {
            config,
            tiles: Vec::new(),
            state: RoundState::Idle,
            elapsed_ticks: 0,
            expected: 1,
            auto_play: false,
            top_stack_order: Tile::INITIAL_STACK_ORDER,
            clicked_count: 0,
            running_fades: 0,
            pending_clear: false,
        }
    }

    /// Starts playing on `layout`, the layout's size wins over `config.point_count`.
    pub fn start(config: GameConfig, layout: Layout, auto_play: bool) -> Self {
        let config = config.with_point_count(layout.point_count());
        let tiles = layout
            .iter()
            .map(|(id, position)| Tile::new(id, position))
            .collect();

        log::debug!(
            "round started, points: {}, auto-play: {}",
            config.point_count,
            auto_play
        );
        Self {
            tiles,
            state: RoundState::Playing,
            auto_play,
            ..Self::idle(config)
        }
    }

    /// Fresh round with the same settings on a new layout.
    pub fn restart(&self, layout: Layout) -> Self {
        Self::start(self.config, layout, self.auto_play)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn point_count(&self) -> u32 {
        self.config.point_count
    }

    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    pub fn elapsed_secs(&self) -> f32 {
        ticks_to_secs(self.elapsed_ticks)
    }

    /// Next tile to click, one past the last tile once everything was clicked.
    pub fn expected(&self) -> TileId {
        self.expected
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    /// All tiles clicked, waiting on running fades.
    pub fn is_pending_clear(&self) -> bool {
        self.pending_clear
    }

    pub fn running_fades(&self) -> u32 {
        self.running_fades
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tile_index(id).ok().map(|index| &self.tiles[index])
    }

    pub fn set_auto_play(&mut self, enabled: bool) -> Result<bool> {
        self.check_playing()?;
        let changed = self.auto_play != enabled;
        self.auto_play = enabled;
        Ok(changed)
    }

    pub fn toggle_auto_play(&mut self) -> Result<bool> {
        self.set_auto_play(!self.auto_play)?;
        Ok(self.auto_play)
    }

    pub fn click(&mut self, id: TileId) -> Result<ClickOutcome> {
        self.check_playing()?;
        let index = self.tile_index(id)?;

        if id != self.expected {
            log::debug!("wrong tile: {}, expected: {}", id, self.expected);
            self.end_with_mistake();
            return Ok(ClickOutcome::Mistake);
        }

        self.top_stack_order = self.top_stack_order.saturating_add(1);
        self.tiles[index].select(self.top_stack_order);
        self.expected += 1;
        self.clicked_count += 1;
        self.running_fades += 1;

        if self.clicked_count == self.point_count() {
            log::debug!("every tile clicked, waiting on {} fades", self.running_fades);
            self.pending_clear = true;
            Ok(ClickOutcome::AwaitingClear)
        } else {
            Ok(ClickOutcome::Advanced)
        }
    }

    pub fn tick_clock(&mut self) -> Result<TickOutcome> {
        self.check_playing()?;
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
        Ok(TickOutcome::Ticked)
    }

    pub fn tick_fade(&mut self, id: TileId) -> Result<TickOutcome> {
        self.check_playing()?;
        let index = self.tile_index(id)?;

        let Some(fade) = self.tiles[index].fade_mut() else {
            return Ok(TickOutcome::NoChange);
        };
        if fade.is_finished() {
            return Ok(TickOutcome::NoChange);
        }
        if !fade.step() {
            return Ok(TickOutcome::Ticked);
        }

        log::trace!("tile {} faded out", id);
        self.running_fades -= 1;
        if self.pending_clear && self.running_fades == 0 {
            log::debug!("all cleared after {} ticks", self.elapsed_ticks);
            self.pending_clear = false;
            self.state = RoundState::AllCleared;
            Ok(TickOutcome::AllCleared)
        } else {
            Ok(TickOutcome::FadeFinished)
        }
    }

    /// Clicks the expected tile on behalf of the player, a no-op once it is past the last tile.
    pub fn auto_click(&mut self) -> Result<TickOutcome> {
        self.check_playing()?;
        if !self.auto_play {
            return Err(GameError::AutoPlayDisabled);
        }

        match self.click(self.expected) {
            Ok(outcome) => Ok(TickOutcome::AutoClick(outcome)),
            Err(GameError::UnknownTile(_)) => Ok(TickOutcome::NoChange),
            Err(err) => Err(err),
        }
    }

    /// Runs the callback of one timer from [`Round::active_timers`].
    pub fn fire(&mut self, key: TimerKey) -> Result<TickOutcome> {
        match key {
            TimerKey::Clock => self.tick_clock(),
            TimerKey::AutoPlay { next } if next == self.expected => self.auto_click(),
            TimerKey::AutoPlay { .. } => Ok(TickOutcome::NoChange),
            TimerKey::Fade(id) => self.tick_fade(id),
        }
    }

    /// Timers the current state needs, empty once the round left `Playing`.
    pub fn active_timers(&self) -> impl Iterator<Item = TimerSpec> + '_ {
        let playing = self.state.is_playing();
        let clock = playing.then_some(TimerSpec::new(TimerKey::Clock, TICK_MS));
        let auto_play = (playing && self.auto_play).then(|| {
            TimerSpec::new(
                TimerKey::AutoPlay {
                    next: self.expected,
                },
                self.config.click_interval_ms,
            )
        });
        let fades = self
            .tiles
            .iter()
            .filter(move |tile| playing && tile.is_fading())
            .map(|tile| TimerSpec::new(TimerKey::Fade(tile.id()), TICK_MS));

        clock.into_iter().chain(auto_play).chain(fades)
    }

    fn end_with_mistake(&mut self) {
        self.state = RoundState::GameOver;
        self.pending_clear = false;
        self.running_fades = 0;
        for fade in self.tiles.iter_mut().filter_map(Tile::fade_mut) {
            fade.pin_visible();
        }
    }

    fn check_playing(&self) -> Result<()> {
        if self.state.is_playing() {
            Ok(())
        } else {
            Err(GameError::NotPlaying)
        }
    }

    fn tile_index(&self, id: TileId) -> Result<usize> {
        usize::try_from(id)
            .ok()
            .and_then(|id| id.checked_sub(1))
            .filter(|&index| index < self.tiles.len())
            .ok_or(GameError::UnknownTile(id))
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::idle(GameConfig::default())
    }
}
