//! # Calendar Grid Interactions
//!
//! Container-level pointer handling for the month grid. The grid cells
//! already report clicks through their own responses; this module watches
//! the raw pointer stream for the same area, which is what makes swipes and
//! pull-to-refresh possible at all, and it reports plain releases as taps
//! too. Both sources feed the one arbiter, which guarantees each physical
//! gesture resolves to at most one action.

use eframe::egui;

use crate::ui::app_state::BizflowApp;

impl BizflowApp {
    /// Process the raw pointer stream against the last rendered grid area.
    /// Called once per frame, after the grid has rendered; skipped while a
    /// modal overlay captures input.
    pub fn handle_pointer_gestures(&mut self, ctx: &egui::Context) {
        let Some(geometry) = self.calendar.grid_geometry else {
            return;
        };

        let (now_ms, pressed, released, pos) = ctx.input(|i| {
            (
                i.time * 1000.0,
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.interact_pos(),
            )
        });
        let Some(pos) = pos else { return };

        if pressed && geometry.rect.contains(pos) {
            // The grid is not scrollable, so a gesture starting on it is
            // always at scroll-top for pull-to-refresh purposes
            self.gesture.drag_begin(pos.x, pos.y, now_ms, true);
        }

        if released {
            if let Some(action) = self.gesture.drag_end(pos.x, pos.y, now_ms) {
                self.dispatch_gesture(action);
                return;
            }
            // Not a swipe or pull: report the release as a container-level
            // tap on whatever day cell it landed on
            if let Some(date) = geometry.date_at(pos) {
                if let Some(action) = self.gesture.tap(date, now_ms) {
                    self.dispatch_gesture(action);
                }
            }
        }
    }
}
