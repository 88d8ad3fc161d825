//! Raster compositing: blur-through-mask, preview tint, rectangle guide, PNG encoding.

use std::io::Cursor;

use image::{imageops, DynamicImage, RgbaImage};
use tiny_skia::{
    ColorU8, Paint, PathBuilder, Pixmap, PremultipliedColorU8, Stroke, StrokeDash, Transform,
};

use crate::error::RedactError;
use crate::geometry::Point;
use crate::mask::Mask;

/// Gaussian-blurred copy of `base`. A zero sigma returns an unblurred copy.
pub fn blurred_copy(base: &RgbaImage, sigma: f32) -> RgbaImage {
    if sigma > 0.0 {
        imageops::blur(base, sigma)
    } else {
        base.clone()
    }
}

/// Copy `blurred` pixels into `out` wherever `mask` is selected.
pub fn apply_blur(out: &mut RgbaImage, blurred: &RgbaImage, mask: &Mask) {
    for ((dst, src), &m) in out
        .pixels_mut()
        .zip(blurred.pixels())
        .zip(mask.as_bytes())
    {
        if m != 0 {
            *dst = *src;
        }
    }
}

/// Mix a flat colour over the selected pixels at `opacity`.
pub fn apply_tint(out: &mut RgbaImage, mask: &Mask, color: [u8; 3], opacity: f32) {
    let keep = 1.0 - opacity;
    for (px, &m) in out.pixels_mut().zip(mask.as_bytes()) {
        if m == 0 {
            continue;
        }
        for c in 0..3 {
            let mixed = px[c] as f32 * keep + color[c] as f32 * opacity;
            px[c] = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Run `f` on a premultiplied copy of `img` and write back every pixel it
/// touched, demultiplied. Untouched pixels keep their exact bytes.
fn with_pixmap(img: &mut RgbaImage, f: impl FnOnce(&mut Pixmap)) {
    let Some(mut pixmap) = Pixmap::new(img.width(), img.height()) else {
        return;
    };
    for (dst, px) in pixmap.pixels_mut().iter_mut().zip(img.pixels()) {
        *dst = premultiplied(px);
    }

    f(&mut pixmap);

    for (px, drawn) in img.pixels_mut().zip(pixmap.pixels()) {
        if *drawn == premultiplied(px) {
            continue;
        }
        let c = drawn.demultiply();
        *px = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
}

fn premultiplied(px: &image::Rgba<u8>) -> PremultipliedColorU8 {
    ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply()
}

/// Stroke a dashed outline of the rectangle spanned by `a` and `b`.
pub fn draw_dashed_outline(
    img: &mut RgbaImage,
    a: Point,
    b: Point,
    color: [u8; 3],
    width: f32,
    dash: f32,
) {
    if a == b {
        return;
    }

    let mut pb = PathBuilder::new();
    pb.move_to(a.x, a.y);
    pb.line_to(b.x, a.y);
    pb.line_to(b.x, b.y);
    pb.line_to(a.x, b.y);
    pb.close();
    let Some(path) = pb.finish() else {
        return;
    };

    with_pixmap(img, |pixmap| {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color[0], color[1], color[2], 255);
        paint.anti_alias = true;

        let stroke = Stroke {
            width,
            dash: StrokeDash::new(vec![dash, dash], 0.0),
            ..Default::default()
        };
        pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    });
}

/// Encode a composite as PNG.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, RedactError> {
    let mut buf = Vec::new();
    DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| RedactError::Encode(e.to_string()))?;
    Ok(buf)
}
