use crate::frame::{Color, Frame, Rect};

pub const GLYPH_WIDTH: i32 = 3;
pub const GLYPH_HEIGHT: i32 = 5;

/// 3x5 bitmap font for printable ASCII. One `u16` per glyph: five rows of
/// three bits, top row in the most significant octal digit.
const GLYPHS: [u16; 95] = [
    0o00000, 0o22202, 0o55000, 0o57575, 0o76737, 0o51245, 0o25253, 0o22000,
    0o12221, 0o42224, 0o05250, 0o02720, 0o00024, 0o00700, 0o00002, 0o11244,
    0o75557, 0o26227, 0o71747, 0o71717, 0o55711, 0o74717, 0o74757, 0o71222,
    0o75757, 0o75717, 0o02020, 0o02024, 0o12421, 0o07070, 0o42124, 0o71302,
    0o75747, 0o25755, 0o65656, 0o74447, 0o65556, 0o74647, 0o74644, 0o74557,
    0o55755, 0o72227, 0o71157, 0o55655, 0o44447, 0o57755, 0o57775, 0o75557,
    0o65644, 0o75571, 0o65655, 0o74717, 0o72222, 0o55557, 0o55552, 0o55775,
    0o55255, 0o55222, 0o71247, 0o64446, 0o44211, 0o31113, 0o25000, 0o00007,
    0o42000, 0o07177, 0o44656, 0o07447, 0o11757, 0o07647, 0o34644, 0o07571,
    0o44655, 0o20222, 0o10152, 0o45655, 0o44447, 0o06755, 0o06555, 0o07557,
    0o06564, 0o07571, 0o06544, 0o07617, 0o27223, 0o05557, 0o05552, 0o05572,
    0o05225, 0o05571, 0o07127, 0o32623, 0o22222, 0o62326, 0o03600,
];

fn glyph_bits(ch: char) -> Option<u16> {
    if !ch.is_ascii() || (ch as u32) < 0x20 || (ch as u32) > 0x7e {
        return None;
    }
    Some(GLYPHS[ch as usize - 0x20])
}

/// Explicit, locally scoped style context for text drawing. Constructed
/// per call site and discarded after; there is no process-wide text state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub color: Color,
    pub scale: i32,
}

impl TextStyle {
    pub fn new(color: Color, scale: i32) -> Self {
        Self {
            color,
            scale: scale.max(1),
        }
    }

    pub fn glyph_advance(&self) -> i32 {
        (GLYPH_WIDTH + 1) * self.scale
    }

    pub fn line_advance(&self) -> i32 {
        (GLYPH_HEIGHT + 2) * self.scale
    }

    /// Width and height of a single line, trailing glyph spacing included.
    pub fn measure(&self, text: &str) -> (i32, i32) {
        let chars = text.chars().count() as i32;
        (chars * self.glyph_advance(), GLYPH_HEIGHT * self.scale)
    }
}

/// Draws one line of text and returns its bounding box. Characters
/// without a glyph render as blank space; drawing clips at the frame edge.
pub fn draw_text(frame: &mut Frame, style: &TextStyle, x: i32, y: i32, text: &str) -> Rect {
    let mut pen_x = x;
    for ch in text.chars() {
        if let Some(bits) = glyph_bits(ch) {
            draw_glyph(frame, style, pen_x, y, bits);
        }
        pen_x += style.glyph_advance();
    }
    let (width, height) = style.measure(text);
    Rect::new(x, y, width, height)
}

/// Greedy word wrap. Explicit newlines always break; a single word wider
/// than `max_width` is left on its own line and clipped at draw time.
pub fn wrap_text(style: &TextStyle, max_width: i32, text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut line = String::new();
        for word in paragraph.split(' ') {
            if line.is_empty() {
                line.push_str(word);
                continue;
            }
            let candidate_chars = (line.chars().count() + 1 + word.chars().count()) as i32;
            if candidate_chars * style.glyph_advance() > max_width {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
            } else {
                line.push(' ');
                line.push_str(word);
            }
        }
        lines.push(line);
    }
    lines
}

/// Draws wrapped text and returns the total height advanced.
pub fn draw_text_wrapped(
    frame: &mut Frame,
    style: &TextStyle,
    x: i32,
    y: i32,
    max_width: i32,
    text: &str,
) -> i32 {
    let lines = wrap_text(style, max_width, text);
    let mut offset = 0;
    for line in &lines {
        draw_text(frame, style, x, y + offset, line);
        offset += style.line_advance();
    }
    offset
}

pub fn measure_text_wrapped(style: &TextStyle, max_width: i32, text: &str) -> (i32, i32) {
    let lines = wrap_text(style, max_width, text);
    let width = lines
        .iter()
        .map(|line| style.measure(line).0)
        .max()
        .unwrap_or(0);
    (width, lines.len() as i32 * style.line_advance())
}

fn draw_glyph(frame: &mut Frame, style: &TextStyle, x: i32, y: i32, bits: u16) {
    for row in 0..GLYPH_HEIGHT {
        let row_bits = (bits >> ((GLYPH_HEIGHT - 1 - row) * GLYPH_WIDTH)) & 0b111;
        for col in 0..GLYPH_WIDTH {
            if row_bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                continue;
            }
            for sy in 0..style.scale {
                for sx in 0..style.scale {
                    frame.blend_pixel(
                        x + col * style.scale + sx,
                        y + row * style.scale + sy,
                        style.color,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = [255, 255, 255, 255];

    #[test]
    fn every_printable_ascii_char_has_a_glyph() {
        for code in 0x20u8..=0x7e {
            assert!(
                glyph_bits(char::from(code)).is_some(),
                "missing glyph for {:?}",
                char::from(code)
            );
        }
    }

    #[test]
    fn control_and_non_ascii_chars_have_no_glyph() {
        assert!(glyph_bits('\n').is_none());
        assert!(glyph_bits('\u{7f}').is_none());
        assert!(glyph_bits('é').is_none());
    }

    #[test]
    fn style_scale_is_clamped_to_at_least_one() {
        let style = TextStyle::new(WHITE, 0);
        assert_eq!(style.scale, 1);
        assert_eq!(style.glyph_advance(), GLYPH_WIDTH + 1);
    }

    #[test]
    fn measure_counts_chars_times_advance() {
        let style = TextStyle::new(WHITE, 2);
        let (width, height) = style.measure("abc");
        assert_eq!(width, 3 * style.glyph_advance());
        assert_eq!(height, GLYPH_HEIGHT * 2);
    }

    #[test]
    fn draw_text_returns_bounds_at_pen_origin() {
        let mut frame = Frame::new(64, 16).expect("frame");
        let style = TextStyle::new(WHITE, 1);
        let bounds = draw_text(&mut frame, &style, 5, 3, "hi");
        assert_eq!(bounds, Rect::new(5, 3, 2 * style.glyph_advance(), GLYPH_HEIGHT));
    }

    #[test]
    fn draw_text_writes_pixels_inside_bounds_only() {
        let mut frame = Frame::new(32, 16).expect("frame");
        let style = TextStyle::new(WHITE, 1);
        let bounds = draw_text(&mut frame, &style, 2, 2, "T");
        let mut lit = 0;
        for y in 0..16 {
            for x in 0..32 {
                if frame.pixel(x, y) != Some([0, 0, 0, 0]) {
                    assert!(bounds.contains(x, y), "pixel outside bounds at {x},{y}");
                    lit += 1;
                }
            }
        }
        assert!(lit > 0);
    }

    #[test]
    fn draw_text_off_frame_is_safe() {
        let mut frame = Frame::new(8, 8).expect("frame");
        let style = TextStyle::new(WHITE, 3);
        draw_text(&mut frame, &style, -40, -40, "clip");
        draw_text(&mut frame, &style, 100, 100, "clip");
    }

    #[test]
    fn unknown_characters_draw_like_space() {
        let mut frame = Frame::new(16, 8).expect("frame");
        let style = TextStyle::new(WHITE, 1);
        draw_text(&mut frame, &style, 0, 0, "\u{1f980}");
        for y in 0..8 {
            for x in 0..16 {
                assert_eq!(frame.pixel(x, y), Some([0, 0, 0, 0]));
            }
        }
    }

    #[test]
    fn wrap_honors_explicit_newlines() {
        let style = TextStyle::new(WHITE, 1);
        let lines = wrap_text(&style, 1000, "one\ntwo\n\nthree");
        assert_eq!(lines, vec!["one", "two", "", "three"]);
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        let style = TextStyle::new(WHITE, 1);
        // advance is 4px at scale 1; 10 chars fit in 40px
        let lines = wrap_text(&style, 40, "aaa bbb ccc ddd");
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn overlong_word_gets_its_own_line() {
        let style = TextStyle::new(WHITE, 1);
        let lines = wrap_text(&style, 12, "a verylongword b");
        assert_eq!(lines, vec!["a", "verylongword", "b"]);
    }

    #[test]
    fn wrapped_height_grows_with_line_count() {
        let style = TextStyle::new(WHITE, 1);
        let (_, one) = measure_text_wrapped(&style, 1000, "short");
        let (_, three) = measure_text_wrapped(&style, 1000, "a\nb\nc");
        assert_eq!(one, style.line_advance());
        assert_eq!(three, 3 * style.line_advance());
    }

    #[test]
    fn draw_wrapped_advance_matches_measure() {
        let mut frame = Frame::new(64, 64).expect("frame");
        let style = TextStyle::new(WHITE, 1);
        let text = "the quick brown fox jumps";
        let drawn = draw_text_wrapped(&mut frame, &style, 0, 0, 40, text);
        let (_, measured) = measure_text_wrapped(&style, 40, text);
        assert_eq!(drawn, measured);
    }
}
