#![forbid(unsafe_code)]

//! Height equalization.

use super::host::AccordionHost;

/// Computes one height shared by every panel.
pub trait HeightEqualizer {
    /// The current uniform height in pixels.
    fn max_height(&self) -> f64;

    /// Re-measure the panels and refresh [`HeightEqualizer::max_height`].
    fn reset_height(&mut self, host: &dyn AccordionHost, panel_count: usize);
}

/// Uses the tallest panel's natural height.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TallestPanel {
    max_height: f64,
}

impl TallestPanel {
    /// Measure `panel_count` panels.
    #[must_use]
    pub fn measure(host: &dyn AccordionHost, panel_count: usize) -> Self {
        let mut equalizer = Self::default();
        equalizer.reset_height(host, panel_count);
        equalizer
    }
}

impl HeightEqualizer for TallestPanel {
    fn max_height(&self) -> f64 {
        self.max_height
    }

    fn reset_height(&mut self, host: &dyn AccordionHost, panel_count: usize) {
        self.max_height = (0..panel_count)
            .map(|i| host.natural_height(i))
            .filter(|h| h.is_finite())
            .fold(0.0, f64::max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;

    #[test]
    fn picks_tallest_panel() {
        let host = MemoryHost::new([80.0, 240.0, 120.0]);
        let eq = TallestPanel::measure(&host, 3);
        assert_eq!(eq.max_height(), 240.0);
    }

    #[test]
    fn reset_follows_content_changes() {
        let mut host = MemoryHost::new([80.0, 240.0]);
        let mut eq = TallestPanel::measure(&host, 2);
        host.set_content_height(0, 400.0);
        eq.reset_height(&host, 2);
        assert_eq!(eq.max_height(), 400.0);
    }

    #[test]
    fn no_panels_measures_zero() {
        let host = MemoryHost::new([]);
        assert_eq!(TallestPanel::measure(&host, 0).max_height(), 0.0);
    }
}
