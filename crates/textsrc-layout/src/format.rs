//! How text sits inside its box
//!
//! A [`StringFormat`] names two alignments: `alignment` along the reading
//! direction and `line_alignment` across it. Vertical text reads top to
//! bottom with columns stacked right to left, so the source's align and
//! valign settings trade places there.

use textsrc_core::{Align, RenderState, VAlign};

/// Position along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Start of the axis in reading order
    #[default]
    Near,
    Center,
    /// End of the axis in reading order
    Far,
}

impl Alignment {
    /// Offset of a run of length `used` inside `available`
    ///
    /// Negative when the run overflows the space.
    pub fn offset(self, available: f32, used: f32) -> f32 {
        match self {
            Alignment::Near => 0.0,
            Alignment::Center => (available - used) / 2.0,
            Alignment::Far => available - used,
        }
    }

    /// The same position seen from the other end of the axis
    pub fn reversed(self) -> Self {
        match self {
            Alignment::Near => Alignment::Far,
            Alignment::Center => Alignment::Center,
            Alignment::Far => Alignment::Near,
        }
    }
}

/// Layout rules derived from the source settings
///
/// Trailing spaces always count towards a line's length. In a constrained
/// box lines wrap at word boundaries, and lines past its end are not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StringFormat {
    /// Top-to-bottom columns, right to left
    pub vertical: bool,
    /// Placement of each line along the reading direction
    pub alignment: Alignment,
    /// Placement of the block of lines across the reading direction
    pub line_alignment: Alignment,
}

impl StringFormat {
    pub fn new(align: Align, valign: VAlign, vertical: bool) -> Self {
        let (alignment, line_alignment) = if vertical {
            let line_alignment = match align {
                Align::Left => Alignment::Far,
                Align::Center => Alignment::Center,
                Align::Right => Alignment::Near,
            };
            (from_valign(valign), line_alignment)
        } else {
            (from_align(align), from_valign(valign))
        };

        Self {
            vertical,
            alignment,
            line_alignment,
        }
    }

    pub fn from_state(state: &RenderState) -> Self {
        Self::new(state.align, state.valign, state.vertical)
    }

    /// Offset of a run along the reading axis
    pub fn flow_offset(&self, available: f32, used: f32) -> f32 {
        self.alignment.offset(available, used)
    }

    /// Offset of the line block across the reading axis, left or top edge
    ///
    /// Columns progress right to left, so `Near` is the right edge there.
    pub fn line_offset(&self, available: f32, used: f32) -> f32 {
        if self.vertical {
            self.line_alignment.reversed().offset(available, used)
        } else {
            self.line_alignment.offset(available, used)
        }
    }
}

fn from_align(align: Align) -> Alignment {
    match align {
        Align::Left => Alignment::Near,
        Align::Center => Alignment::Center,
        Align::Right => Alignment::Far,
    }
}

fn from_valign(valign: VAlign) -> Alignment {
    match valign {
        VAlign::Top => Alignment::Near,
        VAlign::Center => Alignment::Center,
        VAlign::Bottom => Alignment::Far,
    }
}
