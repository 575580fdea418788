use serde::{Deserialize, Serialize};

use crate::*;

/// Top-left corner of a tile inside the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub top: f32,
    pub left: f32,
}

impl Position {
    pub const fn new(top: f32, left: f32) -> Self {
        Self { top, left }
    }

    /// Whether both axes are within [`MIN_SEPARATION`] of `other`.
    pub fn is_near(&self, other: &Self) -> bool {
        let near = |a: f32, b: f32| a - b < MIN_SEPARATION && b - a < MIN_SEPARATION;
        near(self.top, other.top) && near(self.left, other.left)
    }

    pub fn is_on_board(&self) -> bool {
        (0.0..PLACEMENT_SPAN).contains(&self.top) && (0.0..PLACEMENT_SPAN).contains(&self.left)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FadeTint {
    Selected,
    Faded,
}

/// Post-click decay of a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fade {
    opacity: f32,
    countdown_ticks: u8,
    tint: FadeTint,
}

impl Fade {
    pub const fn new() -> Self {
        Self {
            opacity: 1.0,
            countdown_ticks: FADE_TICKS,
            tint: FadeTint::Selected,
        }
    }

    pub const fn opacity(&self) -> f32 {
        self.opacity
    }

    pub const fn countdown_ticks(&self) -> u8 {
        self.countdown_ticks
    }

    pub const fn countdown_secs(&self) -> f32 {
        ticks_to_secs(self.countdown_ticks as u32)
    }

    pub const fn tint(&self) -> FadeTint {
        self.tint
    }

    pub const fn is_finished(&self) -> bool {
        self.countdown_ticks == 0
    }

    /// Advances one tick, returns `true` only on the tick that finishes the fade.
    pub(crate) fn step(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }

        self.opacity = (self.opacity - FADE_OPACITY_STEP).max(0.0);
        self.countdown_ticks -= 1;
        if self.opacity < FADE_TINT_THRESHOLD {
            self.tint = FadeTint::Faded;
        }

        if self.is_finished() {
            self.opacity = 0.0;
            true
        } else {
            false
        }
    }

    pub(crate) fn pin_visible(&mut self) {
        self.opacity = 1.0;
    }
}

impl Default for Fade {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    position: Position,
    stack_order: u32,
    fade: Option<Fade>,
}

impl Tile {
    pub const INITIAL_STACK_ORDER: u32 = 1;

    pub(crate) const fn new(id: TileId, position: Position) -> Self {
        Self {
            id,
            position,
            stack_order: Self::INITIAL_STACK_ORDER,
            fade: None,
        }
    }

    pub const fn id(&self) -> TileId {
        self.id
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn stack_order(&self) -> u32 {
        self.stack_order
    }

    /// Present only once the tile has been clicked.
    pub const fn fade(&self) -> Option<Fade> {
        self.fade
    }

    pub const fn is_clicked(&self) -> bool {
        self.fade.is_some()
    }

    /// Clicked and still counting down.
    pub const fn is_fading(&self) -> bool {
        matches!(self.fade, Some(fade) if !fade.is_finished())
    }

    pub const fn opacity(&self) -> f32 {
        match self.fade {
            Some(fade) => fade.opacity(),
            None => 1.0,
        }
    }

    pub(crate) fn select(&mut self, stack_order: u32) {
        self.stack_order = stack_order;
        self.fade = Some(Fade::new());
    }

    pub(crate) fn fade_mut(&mut self) -> Option<&mut Fade> {
        self.fade.as_mut()
    }
}
