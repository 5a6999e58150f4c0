#![forbid(unsafe_code)]

//! A character grid with per-cell foreground color.
//!
//! All writers clip at the surface edges instead of panicking, so
//! callers can draw with extrapolated coordinates and let the surface
//! keep only what is visible. Wide glyphs (CJK and friends) occupy two
//! columns; the shadowed column holds a continuation marker that the
//! line emitters skip.

use gantt_core::Rgba;
use unicode_width::UnicodeWidthChar;

/// Marks the second column of a wide glyph.
const CONTINUATION: char = '\0';

/// SGR reset: `CSI 0 m`.
const SGR_RESET: &str = "\x1b[0m";

/// A width x height grid of `(char, Option<Rgba>)` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSurface {
    width: usize,
    height: usize,
    cells: Vec<(char, Option<Rgba>)>,
}

impl TextSurface {
    /// A blank surface of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![(' ', None); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every cell to an uncolored space.
    pub fn clear(&mut self) {
        self.cells.fill((' ', None));
    }

    /// Write one narrow glyph. Out-of-bounds writes are dropped.
    pub fn put(&mut self, x: usize, y: usize, ch: char, color: Option<Rgba>) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = (ch, color);
        }
    }

    /// Write a string starting at `(x, y)`, advancing by display width.
    ///
    /// Wide glyphs take two columns. A glyph that would cross the right
    /// edge is dropped along with the rest of the string.
    pub fn put_str(&mut self, x: usize, y: usize, text: &str, color: Option<Rgba>) {
        if y >= self.height {
            return;
        }
        let mut cursor = x;
        for ch in text.chars() {
            let glyph_width = ch.width().unwrap_or(0);
            if glyph_width == 0 {
                continue;
            }
            if cursor + glyph_width > self.width {
                break;
            }
            self.cells[y * self.width + cursor] = (ch, color);
            if glyph_width == 2 {
                self.cells[y * self.width + cursor + 1] = (CONTINUATION, color);
            }
            cursor += glyph_width;
        }
    }

    /// Fill columns `[x0, x1)` of row `y` with one glyph, clipped.
    pub fn fill_row(&mut self, y: usize, x0: usize, x1: usize, ch: char, color: Option<Rgba>) {
        if y >= self.height {
            return;
        }
        for x in x0..x1.min(self.width) {
            self.cells[y * self.width + x] = (ch, color);
        }
    }

    /// Rows as plain text, colors dropped, trailing blanks trimmed.
    pub fn to_plain_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                let line: String = row
                    .iter()
                    .filter(|(ch, _)| *ch != CONTINUATION)
                    .map(|(ch, _)| *ch)
                    .collect();
                line.trim_end().to_string()
            })
            .collect()
    }

    /// Rows as ANSI text with truecolor SGR runs.
    ///
    /// Consecutive cells of one color share a single escape, and every
    /// row that set a color ends with a reset so lines stay
    /// independent.
    pub fn to_ansi_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                let mut line = String::with_capacity(self.width);
                let mut current: Option<Rgba> = None;
                for &(ch, color) in row {
                    if ch == CONTINUATION {
                        continue;
                    }
                    if color != current {
                        match color {
                            Some(rgba) => {
                                line.push_str(&format!(
                                    "\x1b[38;2;{};{};{}m",
                                    rgba.r(),
                                    rgba.g(),
                                    rgba.b()
                                ));
                            }
                            None => line.push_str(SGR_RESET),
                        }
                        current = color;
                    }
                    line.push(ch);
                }
                if current.is_some() {
                    line.push_str(SGR_RESET);
                }
                line
            })
            .collect()
    }

    fn rows(&self) -> impl Iterator<Item = &[(char, Option<Rgba>)]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }
}
