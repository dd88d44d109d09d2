//! # Gesture Module
//!
//! Classifies raw day-cell interactions into exactly one logical action.
//!
//! ## Why this exists:
//! The grid widget's own click response and the surrounding container's raw
//! pointer stream both observe the same physical tap, and a naive handler
//! double-counts it or misreads a double-tap as two single-taps. This
//! arbiter is the single owner of "has this physical gesture already been
//! classified" state; both event sources feed it and it answers at most one
//! action per gesture.
//!
//! Timestamps are injected by the caller (milliseconds on any monotonic
//! scale), so tests drive the windows with a fake clock.

use chrono::NaiveDate;

/// One logical outcome of a user interaction with the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    /// Single tap: make this day the agenda selection.
    Select(NaiveDate),
    /// Double tap: open the create form prefilled with this day.
    CreateNew(NaiveDate),
    /// Horizontal swipe: move the visible month by the delta.
    NavigateMonth(i32),
    /// Pull-to-refresh: refetch the visible month.
    Refresh,
}

/// Tuning windows for gesture classification.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Two taps on the same day within this window become a create action.
    pub double_tap_window_ms: f64,
    /// A second physical report of the same tap within this window is
    /// discarded (grid response + container handler firing together).
    pub duplicate_window_ms: f64,
    /// Minimum horizontal displacement for a swipe.
    pub min_swipe_distance: f32,
    /// Swipes and pulls must complete within this duration.
    pub max_swipe_ms: f64,
    /// Minimum downward displacement for pull-to-refresh.
    pub pull_refresh_distance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_window_ms: 450.0,
            duplicate_window_ms: 100.0,
            min_swipe_distance: 50.0,
            max_swipe_ms: 500.0,
            pull_refresh_distance: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct DragStart {
    x: f32,
    y: f32,
    started_ms: f64,
    at_scroll_top: bool,
}

/// Per-gesture-stream classification state. Create one per calendar view
/// and feed it every tap report and drag start/end.
#[derive(Debug, Default)]
pub struct GestureArbiter {
    config: GestureConfig,
    /// First tap of a potential double-tap: (date, honored-at)
    armed: Option<(NaiveDate, f64)>,
    /// Most recently honored tap, for duplicate suppression
    last_honored: Option<(NaiveDate, f64)>,
    drag: Option<DragStart>,
    /// Taps reported up to this instant are fallout of a classified drag
    suppress_taps_until: f64,
}

impl GestureArbiter {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Report one physical tap on a day cell. Both the grid's click
    /// response and the container's pointer handler call this for the same
    /// tap; only the first report within the duplicate window is honored.
    pub fn tap(&mut self, date: NaiveDate, now_ms: f64) -> Option<GestureAction> {
        if now_ms < self.suppress_taps_until {
            return None;
        }
        if let Some((last_date, last_ms)) = self.last_honored {
            if last_date == date && now_ms - last_ms <= self.config.duplicate_window_ms {
                // Same physical tap arriving through the second source
                return None;
            }
        }

        if let Some((armed_date, armed_ms)) = self.armed.take() {
            if armed_date == date && now_ms - armed_ms <= self.config.double_tap_window_ms {
                self.last_honored = Some((date, now_ms));
                return Some(GestureAction::CreateNew(date));
            }
            // Different date or expired window: fall through as a new
            // first tap
        }

        self.armed = Some((date, now_ms));
        self.last_honored = Some((date, now_ms));
        Some(GestureAction::Select(date))
    }

    /// Report the press that may become a swipe or a pull.
    pub fn drag_begin(&mut self, x: f32, y: f32, now_ms: f64, at_scroll_top: bool) {
        self.drag = Some(DragStart {
            x,
            y,
            started_ms: now_ms,
            at_scroll_top,
        });
    }

    /// Report the matching release. A recognized swipe or pull claims the
    /// whole gesture: pending double-tap state is cleared and tap reports
    /// from the same release are swallowed.
    pub fn drag_end(&mut self, x: f32, y: f32, now_ms: f64) -> Option<GestureAction> {
        let start = self.drag.take()?;
        let dx = x - start.x;
        let dy = y - start.y;
        let elapsed = now_ms - start.started_ms;

        if elapsed > self.config.max_swipe_ms {
            return None;
        }

        if dx.abs() >= self.config.min_swipe_distance && dx.abs() > dy.abs() {
            self.claim_gesture(now_ms);
            // Drag left advances, drag right goes back
            let delta = if dx < 0.0 { 1 } else { -1 };
            return Some(GestureAction::NavigateMonth(delta));
        }

        if dy >= self.config.pull_refresh_distance && dy.abs() > dx.abs() && start.at_scroll_top {
            self.claim_gesture(now_ms);
            return Some(GestureAction::Refresh);
        }

        None
    }

    fn claim_gesture(&mut self, now_ms: f64) {
        self.armed = None;
        self.suppress_taps_until = now_ms + self.config.duplicate_window_ms;
    }
}
