// Linear color scale across an ordered list of anchors.
// Used for the gradient preview bars.

use crate::color::Color;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scale {
    anchors: Vec<Color>,
}

impl Scale {
    pub fn new(anchors: Vec<Color>) -> Result<Self> {
        if anchors.len() < 2 {
            return Err(Error::ScaleTooShort(anchors.len()));
        }
        Ok(Self { anchors })
    }

    /// Color at position `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f64) -> Color {
        let segments = self.anchors.len() - 1;
        let position = t.clamp(0.0, 1.0) * segments as f64;
        // t == 1 lands on the end of the last segment, not past it
        let index = (position.floor() as usize).min(segments - 1);
        let fraction = position - index as f64;
        self.anchors[index].overlay(self.anchors[index + 1], fraction)
    }

    /// `count` evenly spaced samples from `0` up to, not including, `1`.
    pub fn samples(&self, count: usize) -> Vec<Color> {
        (0..count)
            .map(|i| self.at(i as f64 / count as f64))
            .collect()
    }
}
