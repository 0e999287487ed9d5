pub mod frame;
pub mod input;
pub mod prompt;
pub mod text;
pub mod transform;

pub use frame::{Color, Frame, FrameError, Rect};
pub use input::Input;
pub use prompt::{Prompt, PromptCallback, CANCEL_INDEX};
pub use text::{
    draw_text, draw_text_wrapped, measure_text_wrapped, wrap_text, TextStyle, GLYPH_HEIGHT,
    GLYPH_WIDTH,
};
pub use transform::Transform;
