/// Which edge a caption's line block hangs from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// First line sits at the anchor; the block grows downward.
    Top,
    /// Last line sits at the anchor; the block grows upward.
    Bottom,
}

/// Wrapped lines of one caption, positioned as a unit.
///
/// For [`Anchor::Top`] each line's y is the top edge of its line box; for
/// [`Anchor::Bottom`] it is the bottom edge.
#[derive(Clone, Debug, PartialEq)]
pub struct LineBlock {
    /// Lines in reading order.
    pub lines: Vec<String>,
    /// Anchor y in canvas pixels.
    pub start_y: f32,
    /// Vertical advance between consecutive lines.
    pub line_height: f32,
    /// Growth direction.
    pub anchor: Anchor,
}

impl LineBlock {
    /// Construct a block.
    pub fn new(lines: Vec<String>, start_y: f32, line_height: f32, anchor: Anchor) -> Self {
        Self {
            lines,
            start_y,
            line_height,
            anchor,
        }
    }

    /// Y position of line `i`.
    pub fn line_y(&self, i: usize) -> f32 {
        match self.anchor {
            Anchor::Top => self.start_y + i as f32 * self.line_height,
            Anchor::Bottom => {
                let below = self.lines.len().saturating_sub(1).saturating_sub(i);
                self.start_y - below as f32 * self.line_height
            }
        }
    }

    /// Y positions of all lines, in line order.
    pub fn line_ys(&self) -> Vec<f32> {
        (0..self.lines.len()).map(|i| self.line_y(i)).collect()
    }

    /// Lines paired with their y positions.
    pub fn positioned(&self) -> impl Iterator<Item = (&str, f32)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, l)| (l.as_str(), self.line_y(i)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/block.rs"]
mod tests;
