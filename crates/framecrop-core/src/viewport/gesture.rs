use tracing::trace;

use super::{ClampPolicy, Point, ViewportState};

/// Identifier of the pointer (mouse, pen, touch contact) that owns a drag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u64);

/// Pan bookkeeping for the captured pointer.
#[derive(Clone, Copy, Debug)]
struct DragAnchor {
    pointer: PointerId,
    start_pos: Point,
    start_offset_x: f64,
    start_offset_y: f64,
    last_pos: Point,
}

/// Turns pointer drag, wheel and slider input into viewport updates.
///
/// Every mutator leaves `state()` legal under the owned [`ClampPolicy`].
#[derive(Clone, Debug)]
pub struct GestureController {
    policy: ClampPolicy,
    state: ViewportState,
    wheel_step: f64,
    drag: Option<DragAnchor>,
}

impl GestureController {
    pub fn new(policy: ClampPolicy, wheel_step: f64) -> Self {
        Self {
            state: policy.initialize(),
            policy,
            wheel_step,
            drag: None,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn policy(&self) -> &ClampPolicy {
        &self.policy
    }

    pub fn wheel_step(&self) -> f64 {
        self.wheel_step
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Pointer currently holding capture, if any.
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.drag.map(|d| d.pointer)
    }

    /// Start a pan. A second call while a drag is active re-targets capture.
    pub fn begin_drag(&mut self, pointer: PointerId, pos: Point) {
        self.drag = Some(DragAnchor {
            pointer,
            start_pos: pos,
            start_offset_x: self.state.offset_x,
            start_offset_y: self.state.offset_y,
            last_pos: pos,
        });
    }

    /// Apply a move for `pointer`. Returns false when the event was ignored
    /// (no active drag, or another pointer holds capture).
    pub fn continue_drag(&mut self, pointer: PointerId, pos: Point) -> bool {
        let Some(anchor) = self.drag.as_mut() else {
            return false;
        };
        if anchor.pointer != pointer {
            return false;
        }
        anchor.last_pos = pos;

        let scale = self.state.scale;
        let ox = anchor.start_offset_x + (pos.x - anchor.start_pos.x);
        let oy = anchor.start_offset_y + (pos.y - anchor.start_pos.y);
        self.state.offset_x = self.policy.clamp_offset_x(ox, scale);
        self.state.offset_y = self.policy.clamp_offset_y(oy, scale);
        true
    }

    /// Release capture held by `pointer`. Releases from other pointers are ignored.
    pub fn release_pointer(&mut self, pointer: PointerId) {
        if self.captured_pointer() == Some(pointer) {
            self.drag = None;
        }
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Zoom to `requested` keeping the image point under `pivot` fixed,
    /// unless coverage forces the offsets to move.
    pub fn zoom_at(&mut self, pivot: Point, requested: f64) {
        let old = self.state;
        let new_scale = self.policy.clamp_scale(requested);
        let image_pt = old.frame_to_image(pivot);
        let ox = pivot.x - image_pt.x * new_scale;
        let oy = pivot.y - image_pt.y * new_scale;
        self.state = ViewportState {
            scale: new_scale,
            offset_x: self.policy.clamp_offset_x(ox, new_scale),
            offset_y: self.policy.clamp_offset_y(oy, new_scale),
        };
        trace!(from = old.scale, to = new_scale, "zoom");

        // Re-anchor an active pan so the next move continues from here.
        if let Some(anchor) = self.drag.as_mut() {
            anchor.start_pos = anchor.last_pos;
            anchor.start_offset_x = self.state.offset_x;
            anchor.start_offset_y = self.state.offset_y;
        }
    }

    /// One wheel notch at `cursor`. Positive `delta_y` (towards the user)
    /// zooms out, negative zooms in, zero is ignored.
    pub fn wheel(&mut self, delta_y: f64, cursor: Point) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        let step = if delta_y > 0.0 {
            -self.wheel_step
        } else {
            self.wheel_step
        };
        self.zoom_at(cursor, self.state.scale + step);
    }

    /// Slider input: absolute scale pivoted at the frame center.
    pub fn set_zoom(&mut self, value: f64) {
        let center = self.policy.frame().center();
        self.zoom_at(center, value);
    }

    /// Back to cover scale, centered. Any active drag is dropped.
    pub fn reset(&mut self) {
        self.drag = None;
        self.state = self.policy.initialize();
    }
}
