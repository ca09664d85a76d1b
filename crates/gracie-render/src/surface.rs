//! Software raster surface: premultiplied RGBA f32, one owner per animator

use std::path::Path;

use crate::gradient::{BlendMode, RadialGradient};
use gracie_core::{Color, GracieError, Result, Vec2};

/// A drawable raster sized in device pixels
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pixels: Vec<[f32; 4]>,
    width: u32,
    height: u32,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![[0.0; 4]; width as usize * height as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    /// Reallocate to new dimensions; contents are discarded
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, [0.0; 4]);
    }

    /// Premultiplied pixel, or None out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// True if every pixel is fully transparent
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|p| p[3] == 0.0)
    }

    /// Blend a premultiplied source into one pixel with the given coverage
    #[inline]
    fn blend_at(&mut self, x: u32, y: u32, src: [f32; 4], coverage: f32, mode: BlendMode) {
        if coverage <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) as usize;
        let c = coverage.min(1.0);
        let src = [src[0] * c, src[1] * c, src[2] * c, src[3] * c];
        self.pixels[idx] = mode.blend(src, self.pixels[idx]);
    }

    /// Inclusive pixel bounds covering a box, or None when it misses the surface
    fn clip_box(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32 - 1.0);
        let y1 = max.y.ceil().min(self.height as f32 - 1.0);
        if x0 > x1 || y0 > y1 || !x0.is_finite() || !y0.is_finite() {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Fill a full disc with a radial gradient, anti-aliased at the rim
    pub fn fill_disc(&mut self, radius: f32, gradient: &RadialGradient, mode: BlendMode) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        let center = gradient.center;
        let reach = Vec2::new(radius + 1.0, radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip_box(center - reach, center + reach) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = p.distance(center);
                let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    let src = gradient.color_at(d).premultiplied();
                    self.blend_at(x, y, src, coverage, mode);
                }
            }
        }
    }

    /// Fill a full disc with a solid color
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, mode: BlendMode) {
        let solid = RadialGradient::new(center, 0.0, radius).with_stop(0.0, color);
        self.fill_disc(radius, &solid, mode);
    }

    /// Stroke a straight segment with round caps
    pub fn stroke_segment(&mut self, a: Vec2, b: Vec2, width: f32, color: Color, mode: BlendMode) {
        if width <= 0.0 || color.a <= 0.0 {
            return;
        }
        let half = width / 2.0;
        let reach = half + 1.0;
        let min = Vec2::new(a.x.min(b.x) - reach, a.y.min(b.y) - reach);
        let max = Vec2::new(a.x.max(b.x) + reach, a.y.max(b.y) + reach);
        let Some((x0, y0, x1, y1)) = self.clip_box(min, max) else {
            return;
        };
        let src = color.premultiplied();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = distance_to_segment(p, a, b);
                self.blend_at(x, y, src, (half - d + 0.5).clamp(0.0, 1.0), mode);
            }
        }
    }

    /// Blend another surface of the same size on top of this one.
    /// Mismatched sizes blend only the overlapping region.
    pub fn composite_from(&mut self, other: &Surface, mode: BlendMode) {
        let w = self.width.min(other.width);
        let h = self.height.min(other.height);
        for y in 0..h {
            for x in 0..w {
                let src = other.pixels[(y * other.width + x) as usize];
                if src[3] > 0.0 {
                    self.blend_at(x, y, src, 1.0, mode);
                }
            }
        }
    }

    /// Convert to 8-bit straight-alpha RGBA
    pub fn to_rgba_image(&self) -> Result<image::RgbaImage> {
        let texels: Vec<[u8; 4]> = self
            .pixels
            .iter()
            .map(|p| {
                let a = p[3];
                let unpremul = |c: f32| if a > 0.0 { (c / a).clamp(0.0, 1.0) } else { 0.0 };
                [
                    (unpremul(p[0]) * 255.0).round() as u8,
                    (unpremul(p[1]) * 255.0).round() as u8,
                    (unpremul(p[2]) * 255.0).round() as u8,
                    (a.clamp(0.0, 1.0) * 255.0).round() as u8,
                ]
            })
            .collect();
        let data: Vec<u8> = bytemuck::cast_slice(&texels).to_vec();
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| GracieError::RenderError("Failed to create image buffer".to_string()))
    }

    /// Encode the surface as PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let img = self.to_rgba_image()?;
        img.save(path)
            .map_err(|e| GracieError::RenderError(format!("Failed to save PNG: {}", e)))?;
        tracing::debug!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            "surface saved"
        );
        Ok(())
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_blank() {
        let s = Surface::new(4, 3);
        assert_eq!(s.width(), 4);
        assert_eq!(s.height(), 3);
        assert!(s.is_blank());
    }

    #[test]
    fn zero_sized_surface_draws_nothing() {
        let mut s = Surface::new(0, 0);
        s.fill_circle(Vec2::new(0.0, 0.0), 5.0, Color::WHITE, BlendMode::SourceOver);
        s.stroke_segment(Vec2::ZERO, Vec2::new(3.0, 3.0), 2.0, Color::WHITE, BlendMode::Screen);
        assert!(s.is_empty());
        assert!(s.is_blank());
    }

    #[test]
    fn circle_covers_centre_not_corner() {
        let mut s = Surface::new(20, 20);
        s.fill_circle(Vec2::new(10.0, 10.0), 4.0, Color::WHITE, BlendMode::SourceOver);
        assert_eq!(s.pixel(10, 10), Some([1.0, 1.0, 1.0, 1.0]));
        assert_eq!(s.pixel(0, 0), Some([0.0; 4]));
    }

    #[test]
    fn offscreen_circle_is_clipped() {
        let mut s = Surface::new(10, 10);
        s.fill_circle(Vec2::new(-50.0, -50.0), 4.0, Color::WHITE, BlendMode::SourceOver);
        assert!(s.is_blank());
    }

    #[test]
    fn segment_touches_pixels_along_its_length() {
        let mut s = Surface::new(20, 5);
        s.stroke_segment(
            Vec2::new(2.0, 2.5),
            Vec2::new(18.0, 2.5),
            1.0,
            Color::WHITE,
            BlendMode::SourceOver,
        );
        for x in 3..17 {
            assert!(s.pixel(x, 2).map(|p| p[3] > 0.5).unwrap_or(false), "x = {x}");
        }
        assert_eq!(s.pixel(10, 0).map(|p| p[3]), Some(0.0));
    }

    #[test]
    fn resize_discards_contents() {
        let mut s = Surface::new(8, 8);
        s.fill_circle(Vec2::new(4.0, 4.0), 3.0, Color::WHITE, BlendMode::SourceOver);
        s.resize(16, 4);
        assert_eq!((s.width(), s.height()), (16, 4));
        assert!(s.is_blank());
    }

    #[test]
    fn rgba_image_unpremultiplies() {
        let mut s = Surface::new(2, 1);
        s.fill_circle(
            Vec2::new(0.5, 0.5),
            0.7,
            Color::new(1.0, 0.0, 0.0, 0.5),
            BlendMode::SourceOver,
        );
        let img = s.to_rgba_image().unwrap();
        let px = img.get_pixel(0, 0);
        assert_eq!(px[0], 255);
        assert_eq!(px[1], 0);
        assert_eq!(px[3], 128);
    }

    #[test]
    fn rgba_image_keeps_pixel_order() {
        let mut s = Surface::new(3, 2);
        s.fill_circle(Vec2::new(2.5, 1.5), 0.5, Color::WHITE, BlendMode::SourceOver);
        let img = s.to_rgba_image().unwrap();
        assert_eq!(img.as_raw().len(), 3 * 2 * 4);
        assert_eq!(img.get_pixel(2, 1).0, [255, 255, 255, 255]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }
}
