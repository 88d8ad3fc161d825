//! Drag-gesture state machine, independent of any input-event plumbing.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::mask::Layer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Rectangle,
    Freehand,
}

/// `Idle → Dragging` on begin, `Dragging → Idle` on end.
///
/// Tool and layer are captured when the drag begins, so switching either
/// mid-drag only affects the next stroke.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StrokeState {
    #[default]
    Idle,
    Dragging {
        tool: Tool,
        layer: Layer,
        anchor: Point,
        current: Point,
    },
}

/// A finished drag, handed back to the engine to paint and commit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletedStroke {
    pub tool: Tool,
    pub layer: Layer,
    pub anchor: Point,
    pub release: Point,
}

impl StrokeState {
    /// Start a drag at `point`. Beginning again while dragging restarts the gesture.
    pub fn begin(&mut self, tool: Tool, layer: Layer, point: Point) {
        *self = StrokeState::Dragging { tool, layer, anchor: point, current: point };
    }

    /// Move the drag to `point`. Returns the tool and layer when a drag is in progress.
    pub fn update(&mut self, point: Point) -> Option<(Tool, Layer)> {
        match self {
            StrokeState::Dragging { tool, layer, current, .. } => {
                *current = point;
                Some((*tool, *layer))
            }
            StrokeState::Idle => None,
        }
    }

    /// Release at `point`, returning to idle. `None` if no drag was in progress.
    pub fn end(&mut self, point: Point) -> Option<CompletedStroke> {
        match std::mem::take(self) {
            StrokeState::Dragging { tool, layer, anchor, .. } => Some(CompletedStroke {
                tool,
                layer,
                anchor,
                release: point,
            }),
            StrokeState::Idle => None,
        }
    }

    /// Drop an in-progress drag without producing a stroke.
    pub fn cancel(&mut self) {
        *self = StrokeState::Idle;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, StrokeState::Dragging { .. })
    }

    /// Corners and layer of the rectangle being dragged out, for the preview guide.
    pub fn pending_rect(&self) -> Option<(Point, Point, Layer)> {
        match *self {
            StrokeState::Dragging { tool: Tool::Rectangle, layer, anchor, current } => {
                Some((anchor, current, layer))
            }
            _ => None,
        }
    }
}
