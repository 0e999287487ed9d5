use thiserror::Error;

use crate::transform::Transform;

/// RGBA, 8 bits per channel.
pub type Color = [u8; 4];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },
}

/// An exclusively owned off-screen render target.
///
/// All draw calls clip against the frame bounds; geometry that lands
/// entirely outside is a no-op, never a panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * 4],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let mut color = [0u8; 4];
        color.copy_from_slice(&self.pixels[offset..offset + 4]);
        Some(color)
    }

    /// Overwrites every pixel, alpha included.
    pub fn fill(&mut self, color: Color) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: Color) {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = x.saturating_add(width).min(self.width as i32);
        let end_y = y.saturating_add(height).min(self.height as i32);
        if end_x <= start_x || end_y <= start_y {
            return;
        }
        for py in start_y..end_y {
            for px in start_x..end_x {
                self.write_pixel(px as usize, py as usize, color);
            }
        }
    }

    pub fn stroke_rect(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        thickness: i32,
        color: Color,
    ) {
        if width <= 0 || height <= 0 || thickness <= 0 {
            return;
        }
        let t = thickness.min(width).min(height);
        self.fill_rect(x, y, width, t, color);
        self.fill_rect(x, y + height - t, width, t, color);
        self.fill_rect(x, y, t, height, color);
        self.fill_rect(x + width - t, y, t, height, color);
    }

    /// Blends a single pixel (source-over) if it lands inside the frame.
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let Some(existing) = self.pixel(x, y) else {
            return;
        };
        self.write_pixel(x as usize, y as usize, blend(existing, color));
    }

    /// Composites `src` onto this frame at the transform's translation,
    /// source-over per pixel.
    pub fn blit(&mut self, src: &Frame, transform: Transform) {
        let (origin_x, origin_y) = transform.apply(0.0, 0.0);
        let origin_x = origin_x.round() as i32;
        let origin_y = origin_y.round() as i32;
        for sy in 0..src.height as i32 {
            for sx in 0..src.width as i32 {
                let Some(color) = src.pixel(sx, sy) else {
                    continue;
                };
                if color[3] == 0 {
                    continue;
                }
                self.blend_pixel(origin_x + sx, origin_y + sy, color);
            }
        }
    }

    fn write_pixel(&mut self, x: usize, y: usize, color: Color) {
        let Some(pixel_offset) = y.checked_mul(self.width as usize).and_then(|row| row.checked_add(x))
        else {
            return;
        };
        let Some(byte_offset) = pixel_offset.checked_mul(4) else {
            return;
        };
        let Some(end) = byte_offset.checked_add(4) else {
            return;
        };
        if end > self.pixels.len() {
            return;
        }
        self.pixels[byte_offset..end].copy_from_slice(&color);
    }
}

fn blend(dst: Color, src: Color) -> Color {
    let alpha = src[3] as u32;
    if alpha == 255 {
        return src;
    }
    if alpha == 0 {
        return dst;
    }
    let inverse = 255 - alpha;
    let mix = |s: u8, d: u8| ((s as u32 * alpha + d as u32 * inverse) / 255) as u8;
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (alpha + dst[3] as u32 * inverse / 255).min(255) as u8,
    ]
}
