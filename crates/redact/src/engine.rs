//! The editing session: two masks over one immutable photo, an undo log,
//! a live preview and the two baked exports.

use image::{DynamicImage, RgbaImage};
use tracing::{debug, info, warn};

use crate::composite;
use crate::config::EditorConfig;
use crate::error::RedactError;
use crate::geometry::{PixelRect, Point, Viewport};
use crate::history::History;
use crate::mask::{Layer, LayerMasks};
use crate::stroke::{StrokeState, Tool};

/// The two PNG blobs handed to persistence on submit.
#[derive(Debug, Clone)]
pub struct ExportedBills {
    /// Sensitive layer blurred; prices still readable.
    pub sensitive_only: Vec<u8>,
    /// Both layers blurred.
    pub full: Vec<u8>,
}

struct Session {
    base: RgbaImage,
    blurred: RgbaImage,
    masks: LayerMasks,
    history: History<LayerMasks>,
    stroke: StrokeState,
}

impl Session {
    fn dimensions(&self) -> (u32, u32) {
        self.base.dimensions()
    }

    fn commit(&mut self) {
        self.history.commit(self.masks.clone());
        debug!(step = self.history.cursor(), "committed mask snapshot");
    }

    /// Drop an in-progress drag and any uncommitted paint. Returns whether
    /// there was one.
    fn abandon_stroke(&mut self) -> bool {
        if !self.stroke.is_dragging() {
            return false;
        }
        self.stroke.cancel();
        self.masks = self.history.current().clone();
        true
    }
}

/// Mask/compositing engine for one bill photo at a time.
///
/// Until a photo decodes successfully the engine is inert: paint, history and
/// export calls do nothing.
pub struct RedactionEngine {
    config: EditorConfig,
    session: Option<Session>,
    layer: Layer,
    tool: Tool,
    viewport: Option<Viewport>,
    redraw: bool,
}

impl Default for RedactionEngine {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl RedactionEngine {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            session: None,
            layer: Layer::default(),
            tool: Tool::default(),
            viewport: None,
            redraw: false,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ── Session lifecycle ─────────────────────────────────────────────────────

    /// Decode an encoded photo and start a fresh session on it.
    ///
    /// On failure any previous session is dropped and the engine stays inert.
    pub fn load_image_bytes(&mut self, data: &[u8]) -> Result<(), RedactError> {
        match image::load_from_memory(data) {
            Ok(img) => self.load_image(img),
            Err(e) => {
                warn!("bill photo failed to decode: {e}");
                self.session = None;
                Err(e.into())
            }
        }
    }

    /// Start a fresh session on an already decoded photo. Masks start empty.
    pub fn load_image(&mut self, image: DynamicImage) -> Result<(), RedactError> {
        let base = image.to_rgba8();
        let (width, height) = base.dimensions();
        if width == 0 || height == 0 {
            self.session = None;
            return Err(RedactError::EmptyImage);
        }

        let blurred = composite::blurred_copy(&base, self.config.blur_sigma);
        let masks = LayerMasks::empty(width, height);
        let history = History::new(masks.clone(), self.config.max_history);
        self.session = Some(Session {
            base,
            blurred,
            masks,
            history,
            stroke: StrokeState::Idle,
        });
        self.redraw = true;
        info!(width, height, "loaded bill photo for redaction");
        Ok(())
    }

    /// End the session and discard both masks.
    pub fn unload(&mut self) {
        self.session = None;
        self.redraw = true;
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.session.as_ref().map(Session::dimensions)
    }

    /// Size the image is currently displayed at. Incoming points are rescaled
    /// from this size to native pixels; without it they are taken as native.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    // ── Selection ─────────────────────────────────────────────────────────────

    pub fn select_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    pub fn active_layer(&self) -> Layer {
        self.layer
    }

    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn mask(&self, layer: Layer) -> Option<&crate::mask::Mask> {
        self.session.as_ref().map(|s| s.masks.get(layer))
    }

    pub fn is_dragging(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.stroke.is_dragging())
    }

    // ── Gestures ──────────────────────────────────────────────────────────────

    pub fn begin_stroke(&mut self, point: Point) {
        let Some(p) = self.to_image_space(point) else {
            return;
        };
        let (tool, layer, radius) = (self.tool, self.layer, self.config.brush_radius);
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.stroke.begin(tool, layer, p);
        if tool == Tool::Freehand {
            session.masks.paint(layer, |m| m.fill_disc(p, radius));
        }
        self.redraw = true;
    }

    pub fn update_stroke(&mut self, point: Point) {
        let Some(p) = self.to_image_space(point) else {
            return;
        };
        let radius = self.config.brush_radius;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some((tool, layer)) = session.stroke.update(p) else {
            return;
        };
        if tool == Tool::Freehand {
            session.masks.paint(layer, |m| m.fill_disc(p, radius));
        }
        self.redraw = true;
    }

    /// Finish the drag. Rectangles are stamped here; either tool commits once.
    pub fn end_stroke(&mut self, point: Point) {
        let Some(p) = self.to_image_space(point) else {
            return;
        };
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(done) = session.stroke.end(p) else {
            return;
        };
        if done.tool == Tool::Rectangle {
            let (width, height) = session.dimensions();
            if let Some(rect) = PixelRect::from_corners(done.anchor, done.release, width, height) {
                session.masks.paint(done.layer, |m| m.fill_rect(rect));
            }
        }
        session.commit();
        self.redraw = true;
    }

    // ── Atomic edits ──────────────────────────────────────────────────────────

    /// Blur a band across the top and bottom of the photo on the sensitive
    /// layer, whichever layer is active.
    pub fn auto_blur_edges(&mut self) {
        let fraction = self.config.edge_band_fraction as f64;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let (width, height) = session.dimensions();
        let band = ((height as f64 * fraction).round() as u32).min(height);

        let top = PixelRect::band(0, band, width, height);
        let bottom = PixelRect::band(height - band, height, width, height);
        session.masks.paint(Layer::Sensitive, |m| {
            [top, bottom].into_iter().flatten().fold(m, |m, r| m.fill_rect(r))
        });
        session.commit();
        self.redraw = true;
    }

    /// Erase the active layer only.
    pub fn clear_active_layer(&mut self) {
        let layer = self.layer;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.masks.paint(layer, |m| m.cleared());
        session.commit();
        self.redraw = true;
    }

    // ── History ───────────────────────────────────────────────────────────────

    pub fn undo(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.abandon_stroke() {
            self.redraw = true;
        }
        if let Some(state) = session.history.undo() {
            session.masks = state.clone();
            debug!(step = session.history.cursor(), "undo");
            self.redraw = true;
        }
    }

    pub fn redo(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.abandon_stroke() {
            self.redraw = true;
        }
        if let Some(state) = session.history.redo() {
            session.masks = state.clone();
            debug!(step = session.history.cursor(), "redo");
            self.redraw = true;
        }
    }

    pub fn can_undo(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.history.can_undo())
    }

    pub fn can_redo(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.history.can_redo())
    }

    /// `(cursor, len)` of the undo log.
    pub fn history_position(&self) -> Option<(usize, usize)> {
        self.session.as_ref().map(|s| (s.history.cursor(), s.history.len()))
    }

    // ── Output ────────────────────────────────────────────────────────────────

    /// Whether anything changed since the last call; clears the flag.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Live preview: each layer blurred and tinted, plus the rectangle guide
    /// while one is being dragged. Never touches the masks.
    pub fn render(&self) -> Option<RgbaImage> {
        let session = self.session.as_ref()?;
        let mut out = session.base.clone();

        for layer in Layer::ALL {
            let mask = session.masks.get(layer);
            composite::apply_blur(&mut out, &session.blurred, mask);
            composite::apply_tint(&mut out, mask, layer.tint(), self.config.tint_opacity);
        }

        if let Some((anchor, current, layer)) = session.stroke.pending_rect() {
            composite::draw_dashed_outline(
                &mut out,
                anchor,
                current,
                layer.outline(),
                self.config.outline_width,
                self.config.outline_dash,
            );
        }
        Some(out)
    }

    /// Flattened export from the clean photo: the sensitive layer is always
    /// blurred, the price layer only when `include_price` is set. No tint.
    ///
    /// Each call writes into its own buffer and only reads shared state.
    pub fn export_composite(&self, include_price: bool) -> Option<RgbaImage> {
        let session = self.session.as_ref()?;
        let mut out = session.base.clone();
        composite::apply_blur(&mut out, &session.blurred, &session.masks.sensitive);
        if include_price {
            composite::apply_blur(&mut out, &session.blurred, &session.masks.price);
        }
        Some(out)
    }

    /// [`export_composite`](Self::export_composite) encoded as PNG.
    pub fn export_png(&self, include_price: bool) -> Result<Vec<u8>, RedactError> {
        let img = self.export_composite(include_price).ok_or(RedactError::NotInitialized)?;
        composite::encode_png(&img)
    }

    /// Both exports: the one safe to show before the reveal, and the full one.
    pub fn export_pair(&self) -> Result<ExportedBills, RedactError> {
        let sensitive_only = self.export_png(false)?;
        let full = self.export_png(true)?;
        info!(
            sensitive_bytes = sensitive_only.len(),
            full_bytes = full.len(),
            "exported redacted bill images"
        );
        Ok(ExportedBills { sensitive_only, full })
    }

    fn to_image_space(&self, point: Point) -> Option<Point> {
        let (width, height) = self.dimensions()?;
        Some(match self.viewport {
            Some(vp) => vp.to_image(point, width, height),
            None => point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::Mask;
    use image::Rgba;
    use std::io::Cursor;

    fn test_config() -> EditorConfig {
        EditorConfig { blur_sigma: 2.0, ..EditorConfig::default() }
    }

    fn checker(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(w, h, |x, y| {
            let v = if (x / 2 + y / 2) % 2 == 0 { 20 } else { 235 };
            Rgba([v, v / 2, 255 - v, 255])
        }))
    }

    fn engine_with(w: u32, h: u32) -> RedactionEngine {
        let mut e = RedactionEngine::new(test_config());
        e.load_image(checker(w, h)).unwrap();
        e
    }

    fn drag(e: &mut RedactionEngine, from: (f32, f32), to: (f32, f32)) {
        e.begin_stroke(Point::new(from.0, from.1));
        e.update_stroke(Point::new(to.0, to.1));
        e.end_stroke(Point::new(to.0, to.1));
    }

    fn masks(e: &RedactionEngine) -> (Mask, Mask) {
        (
            e.mask(Layer::Sensitive).unwrap().clone(),
            e.mask(Layer::Price).unwrap().clone(),
        )
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    #[test]
    fn uninitialized_engine_is_inert() {
        let mut e = RedactionEngine::default();
        drag(&mut e, (0.0, 0.0), (10.0, 10.0));
        e.auto_blur_edges();
        e.clear_active_layer();
        e.undo();
        e.redo();
        assert!(!e.is_ready());
        assert!(e.mask(Layer::Sensitive).is_none());
        assert!(e.render().is_none());
        assert!(e.export_composite(true).is_none());
        assert!(matches!(e.export_png(false), Err(RedactError::NotInitialized)));
        assert_eq!(e.history_position(), None);
    }

    #[test]
    fn decode_failure_drops_previous_session() {
        let mut e = engine_with(8, 8);
        assert!(e.is_ready());
        let err = e.load_image_bytes(b"definitely not a png").unwrap_err();
        assert!(matches!(err, RedactError::Decode(_)));
        assert!(!e.is_ready());
        e.begin_stroke(Point::new(1.0, 1.0));
        assert!(!e.is_dragging());
    }

    #[test]
    fn load_from_encoded_bytes() {
        let mut png = Vec::new();
        checker(12, 6)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let mut e = RedactionEngine::new(test_config());
        e.load_image_bytes(&png).unwrap();
        assert_eq!(e.dimensions(), Some((12, 6)));
        assert_eq!(e.history_position(), Some((0, 1)));
        assert!(e.mask(Layer::Price).unwrap().is_empty());
    }

    #[test]
    fn empty_image_is_rejected() {
        let mut e = RedactionEngine::new(test_config());
        let err = e.load_image(DynamicImage::new_rgba8(0, 5)).unwrap_err();
        assert!(matches!(err, RedactError::EmptyImage));
        assert!(!e.is_ready());
    }

    #[test]
    fn new_photo_discards_masks() {
        let mut e = engine_with(20, 20);
        drag(&mut e, (0.0, 0.0), (10.0, 10.0));
        e.load_image(checker(30, 10)).unwrap();
        assert!(e.mask(Layer::Sensitive).unwrap().is_empty());
        assert_eq!(e.history_position(), Some((0, 1)));
    }

    // ── Gestures ──────────────────────────────────────────────────────────────

    #[test]
    fn rectangle_only_paints_on_release() {
        let mut e = engine_with(40, 40);
        e.select_tool(Tool::Rectangle);
        e.begin_stroke(Point::new(5.0, 5.0));
        e.update_stroke(Point::new(20.0, 20.0));
        assert!(e.is_dragging());
        assert!(e.mask(Layer::Sensitive).unwrap().is_empty());
        assert_eq!(e.history_position(), Some((0, 1)));

        e.end_stroke(Point::new(25.0, 15.0));
        assert!(!e.is_dragging());
        let m = e.mask(Layer::Sensitive).unwrap();
        assert_eq!(m.selected_count(), 20 * 10);
        assert!(m.is_selected(5, 5));
        assert!(m.is_selected(24, 14));
        assert!(!m.is_selected(25, 15));
        assert_eq!(e.history_position(), Some((1, 2)));
    }

    #[test]
    fn rectangle_direction_does_not_matter() {
        let corners = [
            ((3.0, 4.0), (30.0, 22.0)),
            ((30.0, 22.0), (3.0, 4.0)),
            ((3.0, 22.0), (30.0, 4.0)),
            ((30.0, 4.0), (3.0, 22.0)),
        ];
        let results: Vec<Mask> = corners
            .iter()
            .map(|&(a, b)| {
                let mut e = engine_with(40, 40);
                drag(&mut e, a, b);
                e.mask(Layer::Sensitive).unwrap().clone()
            })
            .collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(results[0].selected_count(), 27 * 18);
    }

    #[test]
    fn rectangle_targets_active_layer() {
        let mut e = engine_with(20, 20);
        e.select_layer(Layer::Price);
        drag(&mut e, (0.0, 0.0), (10.0, 10.0));
        assert!(e.mask(Layer::Sensitive).unwrap().is_empty());
        assert_eq!(e.mask(Layer::Price).unwrap().selected_count(), 100);
    }

    #[test]
    fn freehand_stamps_immediately_and_commits_once() {
        let mut e = engine_with(200, 200);
        e.select_tool(Tool::Freehand);
        e.begin_stroke(Point::new(50.0, 50.0));
        assert!(e.mask(Layer::Sensitive).unwrap().is_selected(50, 50));
        assert_eq!(e.history_position(), Some((0, 1)));

        e.update_stroke(Point::new(120.0, 50.0));
        e.update_stroke(Point::new(150.0, 150.0));
        let m = e.mask(Layer::Sensitive).unwrap();
        assert!(m.is_selected(120, 50));
        assert!(m.is_selected(150, 150));
        // Discs are stamped at sample points, not interpolated between them.
        assert!(!m.is_selected(85, 50));
        assert_eq!(e.history_position(), Some((0, 1)));

        e.end_stroke(Point::new(150.0, 150.0));
        assert_eq!(e.history_position(), Some((1, 2)));
    }

    #[test]
    fn freehand_disc_has_configured_radius() {
        let mut e = engine_with(100, 100);
        e.select_tool(Tool::Freehand);
        e.begin_stroke(Point::new(50.0, 50.0));
        e.end_stroke(Point::new(50.0, 50.0));
        let m = e.mask(Layer::Sensitive).unwrap();
        assert!(m.is_selected(50, 26));
        assert!(!m.is_selected(50, 24));
    }

    #[test]
    fn update_without_begin_does_nothing() {
        let mut e = engine_with(20, 20);
        e.select_tool(Tool::Freehand);
        e.update_stroke(Point::new(10.0, 10.0));
        e.end_stroke(Point::new(10.0, 10.0));
        assert!(e.mask(Layer::Sensitive).unwrap().is_empty());
        assert_eq!(e.history_position(), Some((0, 1)));
    }

    #[test]
    fn viewport_points_are_rescaled() {
        let mut e = engine_with(100, 100);
        e.set_viewport(Viewport::new(50.0, 50.0));
        drag(&mut e, (5.0, 5.0), (10.0, 10.0));
        let m = e.mask(Layer::Sensitive).unwrap();
        assert!(m.is_selected(10, 10));
        assert!(m.is_selected(19, 19));
        assert!(!m.is_selected(20, 20));
        assert_eq!(m.selected_count(), 100);
    }

    #[test]
    fn layer_switch_mid_drag_applies_to_next_stroke() {
        let mut e = engine_with(20, 20);
        e.begin_stroke(Point::new(0.0, 0.0));
        e.select_layer(Layer::Price);
        e.end_stroke(Point::new(5.0, 5.0));
        assert_eq!(e.mask(Layer::Sensitive).unwrap().selected_count(), 25);
        assert!(e.mask(Layer::Price).unwrap().is_empty());
    }

    // ── Atomic edits ──────────────────────────────────────────────────────────

    #[test]
    fn auto_blur_covers_fifteen_percent_bands() {
        let mut e = engine_with(4, 1000);
        e.select_layer(Layer::Price);
        e.auto_blur_edges();

        let m = e.mask(Layer::Sensitive).unwrap();
        for y in 0..1000 {
            let expected = y < 150 || y >= 850;
            assert_eq!(m.is_selected(0, y), expected, "row {y}");
            assert_eq!(m.is_selected(3, y), expected, "row {y}");
        }
        assert!(e.mask(Layer::Price).unwrap().is_empty());
        assert_eq!(e.history_position(), Some((1, 2)));
    }

    #[test]
    fn clear_only_touches_active_layer() {
        let mut e = engine_with(20, 20);
        drag(&mut e, (0.0, 0.0), (10.0, 10.0));
        e.select_layer(Layer::Price);
        drag(&mut e, (10.0, 10.0), (20.0, 20.0));

        e.clear_active_layer();
        assert!(e.mask(Layer::Price).unwrap().is_empty());
        assert_eq!(e.mask(Layer::Sensitive).unwrap().selected_count(), 100);
        assert_eq!(e.history_position(), Some((3, 4)));
    }

    // ── History ───────────────────────────────────────────────────────────────

    #[test]
    fn undo_redo_restores_bit_for_bit() {
        let mut e = engine_with(60, 60);
        let mut after_each = Vec::new();

        drag(&mut e, (0.0, 0.0), (20.0, 20.0));
        after_each.push(masks(&e));
        e.select_layer(Layer::Price);
        e.select_tool(Tool::Freehand);
        drag(&mut e, (40.0, 40.0), (45.0, 50.0));
        after_each.push(masks(&e));
        e.auto_blur_edges();
        after_each.push(masks(&e));
        e.clear_active_layer();
        after_each.push(masks(&e));

        let n = after_each.len();
        for _ in 0..n {
            e.undo();
        }
        assert!(e.mask(Layer::Sensitive).unwrap().is_empty());
        assert!(e.mask(Layer::Price).unwrap().is_empty());
        assert!(!e.can_undo());

        for expected in &after_each {
            e.redo();
            assert_eq!(&masks(&e), expected);
        }
        assert!(!e.can_redo());
    }

    #[test]
    fn undo_redo_are_noops_at_boundaries() {
        let mut e = engine_with(10, 10);
        e.undo();
        assert_eq!(e.history_position(), Some((0, 1)));
        drag(&mut e, (0.0, 0.0), (5.0, 5.0));
        e.redo();
        assert_eq!(e.history_position(), Some((1, 2)));
    }

    #[test]
    fn new_edit_after_undo_truncates_redo() {
        let mut e = engine_with(30, 30);
        for i in 0..4 {
            let o = i as f32 * 5.0;
            drag(&mut e, (o, o), (o + 4.0, o + 4.0));
        }
        assert_eq!(e.history_position(), Some((4, 5)));

        e.undo();
        e.undo();
        assert_eq!(e.history_position(), Some((2, 5)));

        drag(&mut e, (25.0, 0.0), (30.0, 5.0));
        assert_eq!(e.history_position(), Some((3, 4)));
        assert!(!e.can_redo());
        e.redo();
        assert_eq!(e.history_position(), Some((3, 4)));
    }

    #[test]
    fn snapshots_share_unchanged_layers() {
        let mut e = engine_with(10, 10);
        let price_before = e.mask(Layer::Price).unwrap().clone();
        drag(&mut e, (0.0, 0.0), (5.0, 5.0));
        assert!(e.mask(Layer::Price).unwrap().shares_buffer_with(&price_before));
    }

    // ── Output ────────────────────────────────────────────────────────────────

    #[test]
    fn redraw_is_requested_by_edits() {
        let mut e = engine_with(10, 10);
        assert!(e.take_redraw_request());
        assert!(!e.take_redraw_request());
        e.undo();
        assert!(!e.take_redraw_request());
        e.select_tool(Tool::Freehand);
        e.begin_stroke(Point::new(2.0, 2.0));
        assert!(e.take_redraw_request());
    }

    #[test]
    fn undo_mid_stroke_discards_uncommitted_paint() {
        let mut e = engine_with(20, 20);
        drag(&mut e, (0.0, 0.0), (5.0, 5.0));
        let committed = masks(&e);

        e.select_tool(Tool::Freehand);
        e.begin_stroke(Point::new(15.0, 15.0));
        assert!(e.mask(Layer::Sensitive).unwrap().is_selected(15, 15));
        e.undo();
        assert!(!e.is_dragging());
        assert!(e.mask(Layer::Sensitive).unwrap().is_empty());

        e.redo();
        assert_eq!(masks(&e), committed);
        e.end_stroke(Point::new(15.0, 15.0));
        assert_eq!(e.history_position(), Some((1, 2)));
    }

    #[test]
    fn render_tints_and_leaves_masks_untouched() {
        let mut e = engine_with(40, 40);
        drag(&mut e, (0.0, 0.0), (20.0, 20.0));
        let before = masks(&e);

        let preview = e.render().unwrap();
        let export = e.export_composite(true).unwrap();
        assert_eq!(masks(&e), before);
        assert_eq!(e.render().unwrap(), preview);

        // Tinted inside the mask, identical outside.
        assert_ne!(preview.get_pixel(10, 10), export.get_pixel(10, 10));
        assert_eq!(preview.get_pixel(30, 30), export.get_pixel(30, 30));
    }

    #[test]
    fn render_shows_guide_only_while_dragging_rectangle() {
        let mut e = engine_with(40, 40);
        let idle = e.render().unwrap();
        e.begin_stroke(Point::new(5.0, 5.0));
        e.update_stroke(Point::new(30.0, 30.0));
        let dragging = e.render().unwrap();
        assert_ne!(idle, dragging);
        assert!(e.mask(Layer::Sensitive).unwrap().is_empty());
    }

    #[test]
    fn exports_keep_price_layer_apart() {
        let mut e = engine_with(60, 60);
        drag(&mut e, (0.0, 0.0), (20.0, 20.0));
        e.select_layer(Layer::Price);
        drag(&mut e, (30.0, 30.0), (50.0, 50.0));

        let base = checker(60, 60).to_rgba8();
        let blurred = composite::blurred_copy(&base, test_config().blur_sigma);
        let sensitive_only = e.export_composite(false).unwrap();
        let full = e.export_composite(true).unwrap();

        let sensitive = e.mask(Layer::Sensitive).unwrap();
        let price = e.mask(Layer::Price).unwrap();
        for (x, y, px) in sensitive_only.enumerate_pixels() {
            let expected = if sensitive.is_selected(x, y) { blurred.get_pixel(x, y) } else { base.get_pixel(x, y) };
            assert_eq!(px, expected, "sensitive-only export at ({x}, {y})");
        }
        for (x, y, px) in full.enumerate_pixels() {
            let in_union = sensitive.is_selected(x, y) || price.is_selected(x, y);
            let expected = if in_union { blurred.get_pixel(x, y) } else { base.get_pixel(x, y) };
            assert_eq!(px, expected, "full export at ({x}, {y})");
        }
        // The blur actually changed something in the price region.
        assert_ne!(full.get_pixel(40, 40), base.get_pixel(40, 40));
    }

    #[test]
    fn export_pair_produces_two_pngs() {
        let mut e = engine_with(30, 30);
        e.select_layer(Layer::Price);
        drag(&mut e, (0.0, 0.0), (15.0, 15.0));

        let bills = e.export_pair().unwrap();
        assert_eq!(&bills.sensitive_only[..4], b"\x89PNG");
        assert_eq!(&bills.full[..4], b"\x89PNG");
        assert_ne!(bills.sensitive_only, bills.full);

        let decoded = image::load_from_memory(&bills.full).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (30, 30));
    }

    #[test]
    fn history_is_capped() {
        let config = EditorConfig { max_history: 3, ..test_config() };
        let mut e = RedactionEngine::new(config);
        e.load_image(checker(20, 20)).unwrap();
        for i in 0..5 {
            let o = i as f32 * 3.0;
            drag(&mut e, (o, 0.0), (o + 2.0, 2.0));
        }
        assert_eq!(e.history_position(), Some((2, 3)));
        e.undo();
        e.undo();
        e.undo();
        // Oldest reachable state already holds the first three strokes.
        assert_eq!(e.mask(Layer::Sensitive).unwrap().selected_count(), 3 * 4);
    }
}
