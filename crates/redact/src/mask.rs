//! Per-layer selection masks.
//!
//! A mask stores one byte per pixel behind an `Arc`, so cloning a mask for
//! the history log is a pointer copy. Paint operations take the mask by value
//! and return the painted mask; the buffer is only duplicated when a history
//! snapshot still shares it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geometry::{PixelRect, Point};

const SELECTED: u8 = 0xFF;
const CLEAR: u8 = 0x00;

/// The two independent redaction layers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Permanently redacted personal data.
    #[default]
    Sensitive,
    /// Prices hidden until the total is revealed.
    Price,
}

impl Layer {
    /// Fixed compositing order.
    pub const ALL: [Layer; 2] = [Layer::Sensitive, Layer::Price];

    /// Flat colour mixed over the layer in the live preview.
    pub fn tint(self) -> [u8; 3] {
        match self {
            Layer::Sensitive => [0xFF, 0x00, 0x00],
            Layer::Price => [0x00, 0x80, 0x00],
        }
    }

    /// Colour of the dashed rectangle guide while dragging on this layer.
    pub fn outline(self) -> [u8; 3] {
        match self {
            Layer::Sensitive => [0xEF, 0x44, 0x44],
            Layer::Price => [0x22, 0xC5, 0x5E],
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Sensitive => write!(f, "sensitive"),
            Layer::Price => write!(f, "price"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Arc<Vec<u8>>,
}

impl Mask {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: Arc::new(vec![CLEAR; width as usize * height as usize]),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn is_selected(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.data[self.index(x, y)] == SELECTED
    }

    pub fn selected_count(&self) -> usize {
        self.data.iter().filter(|&&b| b == SELECTED).count()
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&b| b == CLEAR)
    }

    /// Whether both masks point at the same pixel buffer.
    pub fn shares_buffer_with(&self, other: &Mask) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Mark every pixel of `rect` as selected.
    pub fn fill_rect(mut self, rect: PixelRect) -> Self {
        let right = rect.right.min(self.width);
        let bottom = rect.bottom.min(self.height);
        if rect.left >= right || rect.top >= bottom {
            return self;
        }
        let width = self.width as usize;
        let data = Arc::make_mut(&mut self.data);
        for y in rect.top..bottom {
            let row = y as usize * width;
            data[row + rect.left as usize..row + right as usize].fill(SELECTED);
        }
        self
    }

    /// Mark every pixel whose centre lies within `radius` of `center`.
    pub fn fill_disc(mut self, center: Point, radius: f32) -> Self {
        if radius <= 0.0 || self.width == 0 || self.height == 0 {
            return self;
        }
        let x0 = ((center.x - radius).floor() as u32).min(self.width);
        let x1 = ((center.x + radius).ceil() as u32).min(self.width);
        let y0 = ((center.y - radius).floor() as u32).min(self.height);
        let y1 = ((center.y + radius).ceil() as u32).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            return self;
        }

        let r2 = radius * radius;
        let width = self.width as usize;
        let data = Arc::make_mut(&mut self.data);
        for y in y0..y1 {
            let dy = y as f32 + 0.5 - center.y;
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - center.x;
                if dx * dx + dy * dy <= r2 {
                    data[y as usize * width + x as usize] = SELECTED;
                }
            }
        }
        self
    }

    /// Erase every pixel.
    pub fn cleared(self) -> Self {
        Mask::empty(self.width, self.height)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Both layers' masks, the unit captured by each history snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerMasks {
    pub sensitive: Mask,
    pub price: Mask,
}

impl LayerMasks {
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            sensitive: Mask::empty(width, height),
            price: Mask::empty(width, height),
        }
    }

    pub fn get(&self, layer: Layer) -> &Mask {
        match layer {
            Layer::Sensitive => &self.sensitive,
            Layer::Price => &self.price,
        }
    }

    /// Replace one layer's mask with `paint(mask)`.
    pub fn paint(&mut self, layer: Layer, paint: impl FnOnce(Mask) -> Mask) {
        let slot = match layer {
            Layer::Sensitive => &mut self.sensitive,
            Layer::Price => &mut self.price,
        };
        *slot = paint(std::mem::take(slot));
    }
}
