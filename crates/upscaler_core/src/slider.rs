//! Before/after comparison slider geometry.

pub const INITIAL_REVEAL_PERCENT: f64 = 50.0;

/// Horizontal extent of the comparison wrapper in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub left: f64,
    pub width: f64,
}

/// Converts a pointer x coordinate into a divider position in `[0, 100]`.
///
/// Returns `None` for a collapsed container or a non-finite pointer position.
pub fn reveal_percent(pointer_x: f64, bounds: ContainerBounds) -> Option<f64> {
    if !pointer_x.is_finite() || !bounds.left.is_finite() {
        return None;
    }
    if !(bounds.width.is_finite() && bounds.width > 0.0) {
        return None;
    }
    let offset = (pointer_x - bounds.left).clamp(0.0, bounds.width);
    Some(offset / bounds.width * 100.0)
}

/// CSS `left` of the divider.
pub fn divider_left(percent: f64) -> String {
    format!("{percent}%")
}

/// CSS `clip-path` of the upscaled layer: only the part right of the divider shows.
pub fn overlay_clip(percent: f64) -> String {
    format!("inset(0 0 0 {percent}%)")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderState {
    dragging: bool,
    percent: f64,
}

impl SliderState {
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns `true` when tracking starts; a second grab while dragging is ignored.
    pub fn grab(&mut self) -> bool {
        if self.dragging {
            return false;
        }
        self.dragging = true;
        true
    }

    pub fn release(&mut self) -> bool {
        if !self.dragging {
            return false;
        }
        self.dragging = false;
        true
    }

    pub fn move_to(&mut self, pointer_x: f64, bounds: Option<ContainerBounds>) -> bool {
        if !self.dragging {
            return false;
        }
        let Some(percent) = bounds.and_then(|bounds| reveal_percent(pointer_x, bounds)) else {
            return false;
        };
        if percent == self.percent {
            return false;
        }
        self.percent = percent;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Default for SliderState {
    fn default() -> Self {
        Self {
            dragging: false,
            percent: INITIAL_REVEAL_PERCENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: ContainerBounds = ContainerBounds {
        left: 100.0,
        width: 400.0,
    };

    #[test]
    fn pointer_inside_container_maps_linearly() {
        assert_eq!(reveal_percent(100.0, BOUNDS), Some(0.0));
        assert_eq!(reveal_percent(200.0, BOUNDS), Some(25.0));
        assert_eq!(reveal_percent(500.0, BOUNDS), Some(100.0));
    }

    #[test]
    fn pointer_outside_container_is_clamped() {
        assert_eq!(reveal_percent(-50.0, BOUNDS), Some(0.0));
        assert_eq!(reveal_percent(9000.0, BOUNDS), Some(100.0));
    }

    #[test]
    fn collapsed_container_yields_nothing() {
        let collapsed = ContainerBounds {
            left: 0.0,
            width: 0.0,
        };
        assert_eq!(reveal_percent(10.0, collapsed), None);
        assert_eq!(reveal_percent(f64::NAN, BOUNDS), None);
    }

    #[test]
    fn css_values_follow_percent() {
        assert_eq!(divider_left(25.0), "25%");
        assert_eq!(overlay_clip(0.0), "inset(0 0 0 0%)");
        assert_eq!(overlay_clip(100.0), "inset(0 0 0 100%)");
    }
}
