//! Pointer and wheel input decoded into orbit gestures.

use crate::constants::WHEEL_ZOOM_STEP;
use glam::Vec2;

/// Motion produced by one input event, in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureFrame {
    pub rotate: Vec2,
    pub pan: Vec2,
    /// Multiplicative dolly; `> 1` zooms in, `1.0` means none.
    pub dolly: f32,
}

impl Default for GestureFrame {
    fn default() -> Self {
        Self {
            rotate: Vec2::ZERO,
            pan: Vec2::ZERO,
            dolly: 1.0,
        }
    }
}

impl GestureFrame {
    pub fn is_empty(&self) -> bool {
        self.rotate == Vec2::ZERO && self.pan == Vec2::ZERO && self.dolly == 1.0
    }
}

#[derive(Clone, Copy, Debug)]
struct ActivePointer {
    id: i32,
    pos: Vec2,
    secondary: bool,
}

/// Tracks active pointers and maps their motion onto gestures:
/// one primary pointer rotates, one secondary (right-button) pointer pans,
/// two pointers pinch to dolly and pan by their centroid.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    pointers: Vec<ActivePointer>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_count(&self) -> usize {
        self.pointers.len()
    }

    pub fn pointer_down(&mut self, id: i32, pos: Vec2, secondary: bool) {
        if let Some(p) = self.pointers.iter_mut().find(|p| p.id == id) {
            p.pos = pos;
            p.secondary = secondary;
            return;
        }
        // Only the first two contacts take part in a gesture.
        if self.pointers.len() < 2 {
            self.pointers.push(ActivePointer { id, pos, secondary });
        }
    }

    pub fn pointer_up(&mut self, id: i32) {
        self.pointers.retain(|p| p.id != id);
    }

    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    pub fn pointer_move(&mut self, id: i32, pos: Vec2) -> GestureFrame {
        let Some(idx) = self.pointers.iter().position(|p| p.id == id) else {
            return GestureFrame::default();
        };
        match self.pointers.len() {
            1 => {
                let p = &mut self.pointers[idx];
                let delta = pos - p.pos;
                p.pos = pos;
                if p.secondary {
                    GestureFrame {
                        pan: delta,
                        ..Default::default()
                    }
                } else {
                    GestureFrame {
                        rotate: delta,
                        ..Default::default()
                    }
                }
            }
            _ => {
                let (a0, b0) = (self.pointers[0].pos, self.pointers[1].pos);
                self.pointers[idx].pos = pos;
                let (a1, b1) = (self.pointers[0].pos, self.pointers[1].pos);
                let before = a0.distance(b0);
                let after = a1.distance(b1);
                let dolly = if before > f32::EPSILON && after > f32::EPSILON {
                    after / before
                } else {
                    1.0
                };
                GestureFrame {
                    rotate: Vec2::ZERO,
                    pan: (a1 + b1) * 0.5 - (a0 + b0) * 0.5,
                    dolly,
                }
            }
        }
    }

    /// One wheel event. Positive `delta_y` (scrolling down) zooms out.
    pub fn wheel(&self, delta_y: f64) -> GestureFrame {
        let dolly = if delta_y > 0.0 {
            WHEEL_ZOOM_STEP
        } else if delta_y < 0.0 {
            1.0 / WHEEL_ZOOM_STEP
        } else {
            1.0
        };
        GestureFrame {
            dolly,
            ..Default::default()
        }
    }
}
