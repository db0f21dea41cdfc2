//!
//! Layout and drawing of the card-entry.
//!
//! The layout is host independent. It needs the width of the
//! glyphs via [GlyphMetrics] and draws with a [GlyphCanvas].
//!
//! The digits are placed in cells of equal width. After each part
//! there is a gap of space_count spaces. Below each part there is a
//! line, which is drawn in the filled color once the part is
//! complete.
//!
//! The layout is a pure function of its inputs and can be
//! recomputed as often as necessary.
//!

use crate::animation::TailFrame;
use crate::PartitionSpec;
use std::ops::Range;

/// Measure glyphs.
pub trait GlyphMetrics {
    /// Width of the glyph.
    fn glyph_width(&self, c: char) -> f32;
}

/// Draw glyphs.
pub trait GlyphCanvas {
    type Color: Copy;

    /// Draw the glyph with its left edge at x and its baseline at y.
    fn draw_glyph(&mut self, c: char, x: f32, y: f32, color: Self::Color, alpha: u8);

    /// Fill the rectangle.
    fn draw_rect(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Self::Color);
}

/// Colors for drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStyle<C> {
    pub text: C,
    pub selection: C,
    /// Line below a part that is not complete.
    pub line: C,
    /// Line below a complete part.
    pub filled_line: C,
}

/// Geometry of the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Width of a digit cell. Uses the width of '8' if None.
    pub char_width: Option<f32>,
    /// Distance between the baseline of the digits and the line.
    pub line_spacing: f32,
    /// Height of the line.
    pub line_thickness: f32,
    pub padding_left: f32,
    pub padding_right: f32,
    /// Y-position of the line.
    pub bottom: f32,
    /// Draw the lines.
    pub has_line: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            char_width: None,
            line_spacing: 12.0,
            line_thickness: 2.0,
            padding_left: 0.0,
            padding_right: 0.0,
            bottom: 0.0,
            has_line: true,
        }
    }
}

/// One digit ready for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderGlyph {
    pub ch: char,
    /// Raw index.
    pub idx: usize,
    /// Left edge.
    pub x: f32,
    /// Baseline.
    pub y: f32,
    pub alpha: u8,
    pub selected: bool,
    /// This is the last digit and currently animated.
    pub animated_tail: bool,
}

/// Line below a part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentIndicator {
    pub index: usize,
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
    pub filled: bool,
}

/// Computed layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub glyphs: Vec<RenderGlyph>,
    pub segments: Vec<SegmentIndicator>,
    /// Total width including padding.
    pub width: f32,
    pub char_width: f32,
    /// Gap between two parts.
    pub group_gap: f32,

    partition: PartitionSpec,
    padding_left: f32,
    has_line: bool,
}

impl CardLayout {
    /// Calculate the layout.
    ///
    /// * raw: the digits.
    /// * selection: selected range of raw digits.
    /// * tail: frame for the last digit, if it is animated.
    pub fn compute(
        partition: &PartitionSpec,
        raw: &str,
        selection: Range<usize>,
        tail: Option<TailFrame>,
        config: &LayoutConfig,
        metrics: &dyn GlyphMetrics,
    ) -> CardLayout {
        let part_length = partition.part_length();
        let char_width = match config.char_width {
            Some(v) => v,
            None => metrics.glyph_width('8'),
        };
        let group_gap = partition.space_count() as f32 * metrics.glyph_width(' ');
        let part_size = char_width * part_length as f32;

        let width = partition.max_length() as f32 * char_width
            + partition.part_count().saturating_sub(1) as f32 * group_gap
            + config.padding_left
            + config.padding_right;

        let filled = partition.filled_parts(raw.len());
        let mut segments = Vec::with_capacity(partition.part_count());
        let mut x = config.padding_left;
        for index in 0..partition.part_count() {
            segments.push(SegmentIndicator {
                index,
                x0: x,
                x1: x + part_size,
                y0: config.bottom,
                y1: config.bottom + config.line_thickness,
                filled: index < filled,
            });
            x += part_size + group_gap;
        }

        let len = raw.chars().count();
        let mut glyphs = Vec::with_capacity(len);
        let mut x = config.padding_left;
        for (idx, ch) in raw.chars().enumerate() {
            let middle = x + char_width / 2.0;
            let glyph_x = middle - metrics.glyph_width(ch) / 2.0;

            let (y, alpha, animated_tail) = match tail {
                Some(frame) if idx + 1 == len => (config.bottom - frame.offset, frame.alpha, true),
                _ => (config.bottom - config.line_spacing, 255, false),
            };

            glyphs.push(RenderGlyph {
                ch,
                idx,
                x: glyph_x,
                y,
                alpha,
                selected: selection.contains(&idx),
                animated_tail,
            });

            x += char_width;
            if idx % part_length == part_length - 1 {
                x += group_gap;
            }
        }

        CardLayout {
            glyphs,
            segments,
            width,
            char_width,
            group_gap,
            partition: *partition,
            padding_left: config.padding_left,
            has_line: config.has_line,
        }
    }

    /// Left edge of the cell for the raw index.
    ///
    /// With before_gap a position at the end of a part is placed
    /// directly after the last digit instead of after the gap.
    pub fn cell_x(&self, raw_idx: usize, before_gap: bool) -> f32 {
        let part_length = self.partition.part_length();
        let raw_idx = raw_idx.min(self.partition.max_length());
        let mut gaps = (raw_idx / part_length).min(self.partition.part_count() - 1);
        if before_gap && raw_idx > 0 && raw_idx % part_length == 0 {
            gaps = (raw_idx - 1) / part_length;
        }
        self.padding_left + raw_idx as f32 * self.char_width + gaps as f32 * self.group_gap
    }

    /// Raw index for the x position.
    ///
    /// Positions in the right half of a cell go to the next index.
    pub fn raw_at(&self, x: f32, raw_len: usize) -> usize {
        for idx in 0..raw_len {
            let middle = self.cell_x(idx, false) + self.char_width / 2.0;
            if x < middle {
                return idx;
            }
        }
        raw_len
    }

    /// Draw everything.
    pub fn draw<C: GlyphCanvas>(&self, canvas: &mut C, style: &LayoutStyle<C::Color>) {
        if self.has_line {
            for s in &self.segments {
                let color = if s.filled {
                    style.filled_line
                } else {
                    style.line
                };
                canvas.draw_rect(s.x0, s.y0, s.x1, s.y1, color);
            }
        }
        for g in &self.glyphs {
            let color = if g.selected {
                style.selection
            } else {
                style.text
            };
            canvas.draw_glyph(g.ch, g.x, g.y, color, g.alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Mono;

    impl GlyphMetrics for Mono {
        fn glyph_width(&self, c: char) -> f32 {
            if c == '1' { 6.0 } else { 10.0 }
        }
    }

    #[test]
    fn test_positions() {
        let p = PartitionSpec::default();
        let config = LayoutConfig {
            padding_left: 2.0,
            padding_right: 3.0,
            bottom: 20.0,
            ..Default::default()
        };
        let l = CardLayout::compute(&p, "23451", 1..2, None, &config, &Mono);

        assert_eq!(l.char_width, 10.0);
        assert_eq!(l.group_gap, 10.0);
        assert_eq!(l.width, 16.0 * 10.0 + 3.0 * 10.0 + 5.0);

        assert_eq!(l.glyphs.len(), 5);
        assert_eq!(l.glyphs[0].x, 2.0);
        assert_eq!(l.glyphs[3].x, 32.0);
        // narrow glyph centered in the cell, after the gap
        assert_eq!(l.glyphs[4].x, 52.0 + 2.0);
        assert_eq!(l.glyphs[4].y, 8.0);
        assert!(l.glyphs[1].selected);
        assert!(!l.glyphs[2].selected);

        assert_eq!(l.segments.len(), 4);
        assert_eq!((l.segments[1].x0, l.segments[1].x1), (52.0, 92.0));
        assert_eq!((l.segments[1].y0, l.segments[1].y1), (20.0, 22.0));
        assert!(l.segments[0].filled);
        assert!(!l.segments[1].filled);
    }

    #[test]
    fn test_tail() {
        let p = PartitionSpec::default();
        let config = LayoutConfig {
            char_width: Some(10.0),
            line_spacing: 10.0,
            bottom: 20.0,
            ..Default::default()
        };
        let tail = TailFrame::at(0.5, 10.0);
        let l = CardLayout::compute(&p, "123", 0..0, Some(tail), &config, &Mono);
        assert!(!l.glyphs[1].animated_tail);
        assert_eq!(l.glyphs[1].y, 10.0);
        assert!(l.glyphs[2].animated_tail);
        assert_eq!(l.glyphs[2].y, 15.0);
        assert_eq!(l.glyphs[2].alpha, 128);
    }

    #[test]
    fn test_cell_x() {
        let p = PartitionSpec::default();
        let config = LayoutConfig {
            char_width: Some(1.0),
            ..Default::default()
        };
        let l = CardLayout::compute(&p, "12345", 0..0, None, &config, &Mono);
        assert_eq!(l.cell_x(0, false), 0.0);
        assert_eq!(l.cell_x(4, true), 4.0);
        assert_eq!(l.cell_x(4, false), 14.0);
        assert_eq!(l.cell_x(16, false), 46.0);
        assert_eq!(l.raw_at(0.0, 5), 0);
        assert_eq!(l.raw_at(14.6, 5), 5);
        assert_eq!(l.raw_at(100.0, 5), 5);
    }
}
