// this_file: crates/textsrc-layout/src/lines.rs

//! Line breaking and measurement
//!
//! Hard breaks come from `\n` (a `\r` before it is dropped). With a flow
//! limit, lines also break greedily at word boundaries found by the ICU
//! word segmenter; a word longer than the limit is split between
//! characters. Whitespace at a soft break disappears, everywhere else it
//! is measured like any other character.

use icu_segmenter::{options::WordBreakInvariantOptions, WordSegmenter};
use textsrc_core::{types::SizeF, ResolvedFont};

/// Slack when comparing accumulated advances against a limit
const FIT_EPSILON: f32 = 1e-3;

/// One laid-out line and its length along the reading direction
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub text: String,
    pub advance: f32,
}

impl Line {
    fn push_str(&mut self, text: &str, advance: f32) {
        self.text.push_str(text);
        self.advance += advance;
    }

    fn push_char(&mut self, ch: char, advance: f32) {
        self.text.push(ch);
        self.advance += advance;
    }
}

/// Breaks text into lines for one font and direction
pub struct LineBreaker<'a> {
    font: &'a ResolvedFont,
    vertical: bool,
}

impl<'a> LineBreaker<'a> {
    pub fn new(font: &'a ResolvedFont, vertical: bool) -> Self {
        Self { font, vertical }
    }

    /// Distance one character moves the pen along the reading direction
    pub fn char_advance(&self, ch: char) -> f32 {
        if self.vertical {
            self.font.vertical_advance()
        } else {
            self.font.advance(ch)
        }
    }

    /// Length of `text` along the reading direction
    pub fn measure_str(&self, text: &str) -> f32 {
        text.chars().map(|ch| self.char_advance(ch)).sum()
    }

    /// Split `text` into lines, wrapping at `limit` when one is given
    pub fn break_lines(&self, text: &str, limit: Option<f32>) -> Vec<Line> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
            match limit {
                Some(limit) => self.wrap_paragraph(paragraph, limit, &mut lines),
                None => lines.push(Line {
                    text: paragraph.to_string(),
                    advance: self.measure_str(paragraph),
                }),
            }
        }
        lines
    }

    fn wrap_paragraph(&self, paragraph: &str, limit: f32, lines: &mut Vec<Line>) {
        let first = lines.len();
        let mut current = Line::default();
        let mut after_soft_break = false;

        let boundaries: Vec<usize> = WordSegmenter::new_auto(WordBreakInvariantOptions::default())
            .segment_str(paragraph)
            .collect();

        for pair in boundaries.windows(2) {
            let segment = &paragraph[pair[0]..pair[1]];
            let is_space = segment.chars().all(char::is_whitespace);

            if is_space && after_soft_break && current.text.is_empty() {
                continue;
            }

            let width = self.measure_str(segment);
            if current.advance + width <= limit + FIT_EPSILON {
                current.push_str(segment, width);
                continue;
            }

            if is_space {
                self.finish(&mut current, lines);
                after_soft_break = true;
                continue;
            }

            if !current.text.is_empty() {
                self.finish(&mut current, lines);
                after_soft_break = true;
            }

            if width <= limit + FIT_EPSILON {
                current.push_str(segment, width);
                continue;
            }

            for ch in segment.chars() {
                let advance = self.char_advance(ch);
                if !current.text.is_empty() && current.advance + advance > limit + FIT_EPSILON {
                    self.finish(&mut current, lines);
                }
                current.push_char(ch, advance);
            }
        }

        if !current.text.is_empty() || lines.len() == first {
            lines.push(current);
        }
    }

    /// Close a line at a soft break, dropping its trailing whitespace
    fn finish(&self, current: &mut Line, lines: &mut Vec<Line>) {
        let text = current.text.trim_end().to_string();
        let advance = self.measure_str(&text);
        lines.push(Line { text, advance });
        *current = Line::default();
    }
}

/// Size of the block of `lines`, in pixels
pub fn measure(lines: &[Line], font: &ResolvedFont, vertical: bool) -> SizeF {
    let flow = lines.iter().map(|line| line.advance).fold(0.0, f32::max);
    let across = font.line_height() * lines.len() as f32;
    if vertical {
        SizeF::new(across, flow)
    } else {
        SizeF::new(flow, across)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use textsrc_core::{testing::BlockFace, FontFlags};

    fn font() -> ResolvedFont {
        ResolvedFont::new(Arc::new(BlockFace::new("Block")), 20.0, FontFlags::empty())
    }

    fn texts(lines: &[Line]) -> Vec<&str> {
        lines.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn test_hard_breaks_drop_carriage_returns() {
        let font = font();
        let lines = LineBreaker::new(&font, false).break_lines("one\r\ntwo\n\nfour", None);
        assert_eq!(texts(&lines), vec!["one", "two", "", "four"]);
        assert_eq!(lines[0].advance, 30.0);
        assert_eq!(lines[2].advance, 0.0);
    }

    #[test]
    fn test_trailing_spaces_are_measured() {
        let font = font();
        let lines = LineBreaker::new(&font, false).break_lines("ab  ", None);
        assert_eq!(lines[0].advance, 40.0);
    }

    #[test]
    fn test_wrap_breaks_at_words_and_eats_the_space() {
        let font = font();
        let lines = LineBreaker::new(&font, false).break_lines("hello world", Some(60.0));
        assert_eq!(texts(&lines), vec!["hello", "world"]);
        assert_eq!(lines[0].advance, 50.0);
    }

    #[test]
    fn test_wrap_keeps_words_that_fit_together() {
        let font = font();
        let lines = LineBreaker::new(&font, false).break_lines("a b c d", Some(35.0));
        assert_eq!(texts(&lines), vec!["a b", "c d"]);
    }

    #[test]
    fn test_long_word_breaks_between_characters() {
        let font = font();
        let lines = LineBreaker::new(&font, false).break_lines("abcdefg", Some(30.0));
        assert_eq!(texts(&lines), vec!["abc", "def", "g"]);
    }

    #[test]
    fn test_tiny_limit_still_places_one_character_per_line() {
        let font = font();
        let lines = LineBreaker::new(&font, false).break_lines("abc", Some(0.0));
        assert_eq!(texts(&lines), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_wrap_keeps_leading_space_of_a_paragraph() {
        let font = font();
        let lines = LineBreaker::new(&font, false).break_lines("  ab", Some(100.0));
        assert_eq!(texts(&lines), vec!["  ab"]);
    }

    #[test]
    fn test_empty_paragraph_survives_wrapping() {
        let font = font();
        let lines = LineBreaker::new(&font, false).break_lines("a\n\nb", Some(100.0));
        assert_eq!(texts(&lines), vec!["a", "", "b"]);
    }

    #[test]
    fn test_vertical_advance_is_one_cell_per_character() {
        let font = font();
        let breaker = LineBreaker::new(&font, true);
        assert_eq!(breaker.measure_str("abc"), 60.0);

        let lines = breaker.break_lines("abcd", Some(40.0));
        assert_eq!(texts(&lines), vec!["ab", "cd"]);
    }

    #[test]
    fn test_measure_swaps_axes_when_vertical() {
        let font = font();
        let lines = LineBreaker::new(&font, false).break_lines("abc\nd", None);
        assert_eq!(measure(&lines, &font, false), SizeF::new(30.0, 40.0));

        let lines = LineBreaker::new(&font, true).break_lines("abc\nd", None);
        assert_eq!(measure(&lines, &font, true), SizeF::new(40.0, 60.0));
    }
}
