//! Per-screen element state.

/// A signed translation in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offset {
    /// Horizontal translation, positive moves right.
    pub dx: i32,
    /// Vertical translation, positive moves down.
    pub dy: i32,
}

impl Offset {
    /// The identity translation.
    pub const ZERO: Self = Self { dx: 0, dy: 0 };

    /// Creates an offset.
    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    /// Returns whether this is the identity translation.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

/// Render state for a screen's root element.
///
/// Screens start hidden; transitions mutate opacity, translation and
/// stacking order, and panel reveals additionally toggle the synthetic
/// shadow and obstruction overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Whether the element is off-stage.
    pub hidden: bool,
    /// Opacity; animated entrances start transparent.
    pub opacity: f32,
    /// Current translation from the viewport origin.
    pub offset: Offset,
    /// Stacking order; higher draws on top.
    pub z: i32,
    /// Drop shadow drawn along the exposed edge while a panel is open.
    pub shadow: bool,
    /// Input-obstruction overlay while a panel is open.
    pub obstructed: bool,
}

impl Element {
    /// Creates a hidden element with default styling.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hidden: true,
            opacity: 1.0,
            offset: Offset::ZERO,
            z: 0,
            shadow: false,
            obstructed: false,
        }
    }

    /// Restores every property to its default, as after a panel conceal.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_restores_defaults() {
        let mut element = Element::new();
        element.hidden = false;
        element.opacity = 0.0;
        element.offset = Offset::new(12, -3);
        element.z = 7;
        element.shadow = true;

        element.reset();
        assert_eq!(element, Element::new());
        assert!(element.hidden);
        assert!(element.offset.is_zero());
    }
}
