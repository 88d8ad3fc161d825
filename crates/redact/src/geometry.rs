//! Points, pixel rectangles and viewport → image coordinate mapping.

/// A position in either viewport or image space, depending on context.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// On-screen size of the element displaying the image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Map a viewport point into image pixel space using the ratio
    /// `image dimension / rendered dimension` on each axis.
    ///
    /// A degenerate viewport (zero, negative or NaN size) maps 1:1.
    pub fn to_image(&self, point: Point, image_width: u32, image_height: u32) -> Point {
        Point {
            x: point.x * axis_scale(image_width, self.width),
            y: point.y * axis_scale(image_height, self.height),
        }
    }
}

fn axis_scale(image_len: u32, rendered_len: f32) -> f32 {
    if rendered_len > 0.0 && rendered_len.is_finite() {
        image_len as f32 / rendered_len
    } else {
        1.0
    }
}

/// Half-open pixel rectangle `[left, right) × [top, bottom)` clamped to an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelRect {
    /// Rectangle spanned by two corners in any order, clamped to `width × height`.
    ///
    /// Corners are normalized before rounding so the result does not depend on
    /// drag direction. Returns `None` when nothing is left after clamping.
    pub fn from_corners(a: Point, b: Point, width: u32, height: u32) -> Option<Self> {
        let (min_x, max_x) = normalize_span(a.x, b.x);
        let (min_y, max_y) = normalize_span(a.y, b.y);

        let rect = PixelRect {
            left: clamp_coord(min_x, width),
            top: clamp_coord(min_y, height),
            right: clamp_coord(max_x, width),
            bottom: clamp_coord(max_y, height),
        };
        (!rect.is_empty()).then_some(rect)
    }

    /// Full-width band covering rows `[top, bottom)`.
    pub fn band(top: u32, bottom: u32, width: u32, height: u32) -> Option<Self> {
        let rect = PixelRect {
            left: 0,
            top: top.min(height),
            right: width,
            bottom: bottom.min(height),
        };
        (!rect.is_empty()).then_some(rect)
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

fn normalize_span(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

// NaN and negatives land on 0 via the saturating float cast.
fn clamp_coord(v: f32, limit: u32) -> u32 {
    (v.round() as u32).min(limit)
}
