/// The closed input variant set the core consumes.
///
/// How raw key or pointer events map onto these is a platform concern
/// that lives outside this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Directional intent; each axis is -1, 0, or 1 by convention, but
    /// consumers only test the sign.
    Direction { dx: i32, dy: i32 },
    Confirm,
    Cancel,
    /// Pointer click in screen-space pixels.
    Click { x: f32, y: f32 },
}

impl Input {
    pub fn up() -> Self {
        Self::Direction { dx: 0, dy: -1 }
    }

    pub fn down() -> Self {
        Self::Direction { dx: 0, dy: 1 }
    }

    pub fn left() -> Self {
        Self::Direction { dx: -1, dy: 0 }
    }

    pub fn right() -> Self {
        Self::Direction { dx: 1, dy: 0 }
    }

    pub fn is_directional(&self) -> bool {
        matches!(self, Self::Direction { .. })
    }
}
