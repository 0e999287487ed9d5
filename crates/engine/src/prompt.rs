use tracing::{debug, trace};

use crate::frame::{Color, Frame, FrameError, Rect};
use crate::input::Input;
use crate::text::{self, TextStyle};
use crate::transform::Transform;

/// Resolution callback: `(index, label)`, with `(-1, "")` on cancel.
/// Returning `true` tells the owning context to drop the prompt.
pub type PromptCallback = Box<dyn FnMut(i32, &str) -> bool>;

/// Index reported to the callback on cancellation, never a valid selection.
pub const CANCEL_INDEX: i32 = -1;

const PANEL_FILL: Color = [24, 26, 31, 208];
const PANEL_BORDER: Color = [222, 224, 202, 255];
const BORDER_THICKNESS: i32 = 2;
const PADDING_X: i32 = 4;
const PADDING_TOP: i32 = 3;
const BANNER_COLOR: Color = [219, 116, 52, 220];
const MESSAGE_COLOR: Color = [240, 240, 240, 220];
const ITEM_COLOR: Color = [64, 230, 96, 220];
const TEXT_SCALE: i32 = 1;
const ITEM_ADVANCE: i32 = 8;
// Items never start above this row, so short messages still leave the
// list where pointer users expect it.
const MIN_ITEMS_TOP: i32 = 48;
const SELECTED_PREFIX: &str = "> ";
const UNSELECTED_PREFIX: &str = "  ";

const BANNER_TEXT: &str = concat!("burrowOS ", env!("CARGO_PKG_VERSION"));

/// A modal, input-exclusive selection overlay.
///
/// Geometry and item set are fixed at construction; only the selection
/// and the backing image change afterwards. The prompt has no closed
/// state of its own: the owner drops it when the callback returns `true`.
pub struct Prompt {
    frame: Frame,
    offset: Transform,
    message: String,
    items: Vec<String>,
    item_bounds: Vec<Rect>,
    selected: usize,
    callback: PromptCallback,
    show_banner: bool,
}

impl Prompt {
    pub fn new(
        width: u32,
        height: u32,
        items: Vec<String>,
        message: impl Into<String>,
        callback: PromptCallback,
        show_banner: bool,
    ) -> Result<Self, FrameError> {
        let mut prompt = Self {
            frame: Frame::new(width, height)?,
            offset: Transform::default(),
            message: message.into(),
            item_bounds: Vec::with_capacity(items.len()),
            items,
            selected: 0,
            callback,
            show_banner,
        };
        prompt.refresh();
        Ok(prompt)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn item_bounds(&self) -> &[Rect] {
        &self.item_bounds
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Screen position of the prompt's top-left corner; click hit-testing
    /// subtracts this offset to reach frame-local coordinates.
    pub fn set_offset(&mut self, tx: f32, ty: f32) {
        self.offset = Transform::translate(tx, ty);
    }

    pub fn offset(&self) -> Transform {
        self.offset
    }

    /// Feeds one input event through the state machine. Returns `true`
    /// when the callback asked for the prompt to be closed.
    pub fn input(&mut self, input: Input) -> bool {
        let mut close = false;
        match input {
            Input::Direction { dy, .. } => {
                if dy < 0 {
                    self.selected = self.selected.saturating_sub(1);
                }
                if dy > 0 && !self.items.is_empty() {
                    self.selected = (self.selected + 1).min(self.items.len() - 1);
                }
                trace!(selected = self.selected, "prompt selection moved");
            }
            Input::Confirm => {
                // Guarded: an empty item list makes the selection
                // meaningless, so confirm is a no-op.
                if self.selected < self.items.len() {
                    let index = self.selected as i32;
                    debug!(index, label = %self.items[self.selected], "prompt confirmed");
                    close = (self.callback)(index, &self.items[self.selected]);
                }
            }
            Input::Cancel => {
                debug!("prompt cancelled");
                close = (self.callback)(CANCEL_INDEX, "");
            }
            Input::Click { x, y } => {
                let (local_x, local_y) = self.offset.unapply(x, y);
                let local_x = local_x.round() as i32;
                let local_y = local_y.round() as i32;
                let hit = self
                    .item_bounds
                    .iter()
                    .position(|bounds| bounds.contains(local_x, local_y));
                if let Some(index) = hit {
                    // A pointer confirm selects and resolves in one step.
                    self.selected = index;
                    debug!(index, label = %self.items[index], "prompt clicked");
                    close = (self.callback)(index as i32, &self.items[index]);
                }
            }
        }
        self.refresh();
        close
    }

    /// Composites the pre-rendered prompt image onto `screen`.
    pub fn draw(&self, screen: &mut Frame, transform: Transform) {
        screen.blit(&self.frame, self.offset.concat(transform));
    }

    /// Full synchronous re-render of the backing image, recording each
    /// item's drawn bounds for pointer hit-testing.
    fn refresh(&mut self) {
        self.frame.fill(PANEL_FILL);
        let width = self.frame.width() as i32;
        let height = self.frame.height() as i32;
        self.frame
            .stroke_rect(0, 0, width, height, BORDER_THICKNESS, PANEL_BORDER);

        let x = BORDER_THICKNESS + PADDING_X;
        let mut y = BORDER_THICKNESS + PADDING_TOP;
        let wrap_width = width - 2 * (BORDER_THICKNESS + PADDING_X);

        if self.show_banner {
            let style = TextStyle::new(BANNER_COLOR, TEXT_SCALE);
            y += text::draw_text_wrapped(&mut self.frame, &style, x, y, wrap_width, BANNER_TEXT);
        }

        let style = TextStyle::new(MESSAGE_COLOR, TEXT_SCALE);
        y += text::draw_text_wrapped(&mut self.frame, &style, x, y, wrap_width, &self.message);

        if y < MIN_ITEMS_TOP {
            y = MIN_ITEMS_TOP;
        }

        let style = TextStyle::new(ITEM_COLOR, TEXT_SCALE);
        self.item_bounds.clear();
        for index in 0..self.items.len() {
            let prefix = if index == self.selected {
                SELECTED_PREFIX
            } else {
                UNSELECTED_PREFIX
            };
            let line = format!("{prefix}{}", self.items[index]);
            let bounds = text::draw_text(&mut self.frame, &style, x, y, &line);
            self.item_bounds.push(bounds);
            y += ITEM_ADVANCE;
        }
    }
}

impl std::fmt::Debug for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompt")
            .field("message", &self.message)
            .field("items", &self.items)
            .field("selected", &self.selected)
            .field("show_banner", &self.show_banner)
            .finish_non_exhaustive()
    }
}
