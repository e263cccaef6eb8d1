//! Swipe-to-reveal state machine for one task list item.
//!
//! A single signed horizontal offset in `[-width, 0]` drives the
//! edit/delete action panel anchored to the item's right edge. The
//! machine is purely local: it never touches task data — a tap outcome
//! tells the caller to forward a completion toggle.

use tracing::trace;

/// Width of the reveal-action panel
pub const REVEAL_WIDTH: f32 = 140.0;

/// Movement at or below this (on both axes) counts as a tap; horizontal
/// travel must exceed it before page scrolling is suppressed
pub const DEADZONE: f32 = 5.0;

/// What the caller should do after a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Tap on a closed item: forward it as a completion toggle
    Tap,
    /// Tap while the panel was open: the panel closed, nothing is forwarded
    Closed,
    /// The drag snapped shut
    SnappedClosed,
    /// The drag snapped open, revealing the action panel
    SnappedOpen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    start_x: f32,
    start_y: f32,
    last_x: f32,
    /// Whether the press happened on an already-open panel
    from_open: bool,
    /// Farthest absolute displacement seen per axis since the press
    max_dx: f32,
    max_dy: f32,
    /// Latched once horizontal travel dominates beyond the deadzone
    suppress_scroll: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Dragging(Drag),
    Open,
}

/// Per-item swipe controller
#[derive(Debug, Clone, PartialEq)]
pub struct Swipe {
    phase: Phase,
    offset: f32,
    width: f32,
}

impl Default for Swipe {
    fn default() -> Self {
        Swipe::new(REVEAL_WIDTH)
    }
}

impl Swipe {
    pub fn new(width: f32) -> Self {
        Swipe {
            phase: Phase::Idle,
            offset: 0.0,
            width,
        }
    }

    /// Current horizontal reveal offset, always within `[-width, 0]`
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase, Phase::Open)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging(_))
    }

    /// Whether page scrolling should stay suppressed for the active
    /// gesture (horizontal travel dominates beyond the deadzone)
    pub fn scroll_suppressed(&self) -> bool {
        matches!(self.phase, Phase::Dragging(d) if d.suppress_scroll)
    }

    /// Pointer/touch down. Starts a drag from Idle (origin offset 0) or
    /// Open (origin offset −width); ignored while a drag is already
    /// active.
    pub fn press(&mut self, x: f32, y: f32) {
        let from_open = match self.phase {
            Phase::Dragging(_) => return,
            Phase::Idle => false,
            Phase::Open => true,
        };
        self.phase = Phase::Dragging(Drag {
            start_x: x,
            start_y: y,
            last_x: x,
            from_open,
            max_dx: 0.0,
            max_dy: 0.0,
            suppress_scroll: false,
        });
    }

    /// Pointer moved. Updates are accepted from any source (element- or
    /// document-level tracking), so a fast swipe that leaves the item's
    /// bounds keeps dragging. Dragging right from an open panel is how it
    /// re-closes.
    pub fn drag(&mut self, x: f32, y: f32) {
        let Phase::Dragging(ref mut d) = self.phase else {
            return;
        };
        self.offset = (self.offset + (x - d.last_x)).clamp(-self.width, 0.0);
        d.last_x = x;
        d.max_dx = d.max_dx.max((x - d.start_x).abs());
        d.max_dy = d.max_dy.max((y - d.start_y).abs());
        if !d.suppress_scroll && d.max_dx > DEADZONE && d.max_dx > d.max_dy {
            d.suppress_scroll = true;
            trace!("suppressing page scroll for swipe");
        }
    }

    /// Pointer up. A press with negligible movement is a tap: from Idle
    /// it asks the caller to toggle completion, from Open it just closes
    /// the panel. Anything else snaps: closed when the offset is closer
    /// to 0 than to −width, open otherwise. Returns `None` when no drag
    /// was active.
    pub fn release(&mut self) -> Option<SwipeOutcome> {
        let Phase::Dragging(d) = self.phase else {
            return None;
        };
        if d.max_dx <= DEADZONE && d.max_dy <= DEADZONE {
            self.phase = Phase::Idle;
            self.offset = 0.0;
            return Some(if d.from_open {
                SwipeOutcome::Closed
            } else {
                SwipeOutcome::Tap
            });
        }
        Some(self.snap())
    }

    /// An interrupted gesture (pointer lost without a release event) is
    /// an implicit release: the snap rule applies immediately, and a tap
    /// is never synthesized.
    pub fn cancel(&mut self) -> Option<SwipeOutcome> {
        match self.phase {
            Phase::Dragging(_) => Some(self.snap()),
            _ => None,
        }
    }

    fn snap(&mut self) -> SwipeOutcome {
        if self.offset > -self.width / 2.0 {
            self.phase = Phase::Idle;
            self.offset = 0.0;
            SwipeOutcome::SnappedClosed
        } else {
            self.phase = Phase::Open;
            self.offset = -self.width;
            SwipeOutcome::SnappedOpen
        }
    }
}
