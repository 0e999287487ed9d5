use burrow_engine::{Color, Frame, FrameError, Transform};

use crate::actor::DrawMode;

const HIGHLIGHT: Color = [255, 238, 130, 255];
const LIGHTEN_PER_LAYER: i32 = 12;

/// A stack of equally sized image layers drawn bottom-up, each one
/// pixel higher than the last. Index 0 is the bottom layer.
#[derive(Debug)]
pub struct SpriteStack {
    layers: Vec<Frame>,
}

impl SpriteStack {
    /// Builds `depth` solid layers, each lightened a step toward the
    /// top to fake shading. `depth` is clamped to at least one.
    pub fn solid(width: u32, height: u32, depth: u32, color: Color) -> Result<Self, FrameError> {
        let depth = depth.max(1);
        let mut layers = Vec::with_capacity(depth as usize);
        for level in 0..depth {
            let mut layer = Frame::new(width, height)?;
            layer.fill(lighten(color, level as i32 * LIGHTEN_PER_LAYER));
            layers.push(layer);
        }
        Ok(Self { layers })
    }

    pub fn from_layers(layers: Vec<Frame>) -> Self {
        Self { layers }
    }

    pub fn width(&self) -> u32 {
        self.layers.first().map_or(0, Frame::width)
    }

    pub fn height(&self) -> u32 {
        self.layers.first().map_or(0, Frame::height)
    }

    pub fn layer_count(&self) -> u32 {
        self.layers.len() as u32
    }

    /// Pixel height of the drawn stack, layer lift included.
    pub fn footprint_height(&self) -> u32 {
        self.height() + self.layer_count().saturating_sub(1)
    }

    pub fn draw(&self, surface: &mut Frame, transform: Transform, mode: DrawMode) {
        for (level, layer) in self.layers.iter().enumerate() {
            let lift = Transform::translate(0.0, -(level as f32));
            surface.blit(layer, transform.concat(lift));
        }
        if mode == DrawMode::Highlighted {
            let (x, y) = transform.apply(0.0, 0.0);
            let lift = self.layer_count().saturating_sub(1) as i32;
            surface.stroke_rect(
                x.round() as i32 - 1,
                y.round() as i32 - lift - 1,
                self.width() as i32 + 2,
                self.footprint_height() as i32 + 2,
                1,
                HIGHLIGHT,
            );
        }
    }
}

fn lighten(color: Color, amount: i32) -> Color {
    [
        (color[0] as i32 + amount).clamp(0, 255) as u8,
        (color[1] as i32 + amount).clamp(0, 255) as u8,
        (color[2] as i32 + amount).clamp(0, 255) as u8,
        color[3],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solid_builds_the_requested_depth() {
        let stack = SpriteStack::solid(8, 8, 3, [100, 100, 100, 255]).expect("stack");
        assert_eq!(stack.layer_count(), 3);
        assert_eq!(stack.width(), 8);
        assert_eq!(stack.height(), 8);
        assert_eq!(stack.footprint_height(), 10);
    }

    #[test]
    fn zero_depth_is_clamped_to_one() {
        let stack = SpriteStack::solid(8, 8, 0, [100, 100, 100, 255]).expect("stack");
        assert_eq!(stack.layer_count(), 1);
        assert_eq!(stack.footprint_height(), 8);
    }

    #[test]
    fn lighten_clamps_at_white() {
        assert_eq!(lighten([250, 10, 128, 200], 20), [255, 30, 148, 200]);
    }

    #[test]
    fn upper_layers_are_lighter() {
        let stack = SpriteStack::solid(2, 2, 2, [100, 100, 100, 255]).expect("stack");
        let bottom = stack.layers[0].pixel(0, 0).expect("pixel");
        let top = stack.layers[1].pixel(0, 0).expect("pixel");
        assert!(top[0] > bottom[0]);
    }

    #[test]
    fn draw_lifts_each_layer_one_pixel() {
        let stack = SpriteStack::solid(2, 2, 2, [100, 100, 100, 255]).expect("stack");
        let mut surface = Frame::new(16, 16).expect("surface");
        stack.draw(&mut surface, Transform::translate(4.0, 4.0), DrawMode::Normal);
        // top layer reaches one pixel above the tile origin
        assert!(surface.pixel(4, 3).expect("pixel")[3] > 0);
        assert_eq!(surface.pixel(4, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn highlight_outlines_the_footprint() {
        let stack = SpriteStack::solid(2, 2, 1, [100, 100, 100, 255]).expect("stack");
        let mut surface = Frame::new(16, 16).expect("surface");
        stack.draw(
            &mut surface,
            Transform::translate(4.0, 4.0),
            DrawMode::Highlighted,
        );
        assert_eq!(surface.pixel(3, 3), Some(HIGHLIGHT));
        assert_eq!(surface.pixel(6, 6), Some(HIGHLIGHT));
    }
}
