//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (position, color).
//! Based on the Grammar of Graphics [Wilkinson 2005].

use crate::color::{Rgba, YL_GN_BU};
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain_min: f32,
    domain_max: f32,
    range_min: f32,
    range_max: f32,
}

impl LinearScale {
    /// Create a new linear scale.
    ///
    /// # Errors
    ///
    /// Returns an error if domain_min equals domain_max.
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Result<Self> {
        if (domain.0 - domain.1).abs() < f32::EPSILON {
            return Err(Error::ScaleDomain("Domain min and max cannot be equal".to_string()));
        }

        Ok(Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        })
    }

    /// Scale from zero to `max`, widened to 1 when `max` is not positive.
    #[must_use]
    pub fn from_zero(max: f32, range: (f32, f32)) -> Self {
        let max = if max > 0.0 { max } else { 1.0 };
        Self { domain_min: 0.0, domain_max: max, range_min: range.0, range_max: range.1 }
    }
}

impl Scale<f32, f32> for LinearScale {
    fn scale(&self, value: f32) -> f32 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f32, f32) {
        (self.range_min, self.range_max)
    }
}

/// Color scale for mapping values to colors.
#[derive(Debug, Clone)]
pub struct ColorScale {
    colors: Vec<Rgba>,
    domain_min: f32,
    domain_max: f32,
}

impl ColorScale {
    /// Yellow-green-blue sequential scale.
    ///
    /// A degenerate domain (single value) is widened by one unit on each side
    /// so the value lands mid-ramp.
    #[must_use]
    pub fn yl_gn_bu(domain: (f32, f32)) -> Self {
        let (lo, hi) = if (domain.0 - domain.1).abs() < f32::EPSILON {
            (domain.0 - 1.0, domain.1 + 1.0)
        } else {
            domain
        };
        Self { colors: YL_GN_BU.to_vec(), domain_min: lo, domain_max: hi }
    }

    /// Color stops of the ramp.
    #[must_use]
    pub fn stops(&self) -> &[Rgba] {
        &self.colors
    }
}

impl Scale<f32, Rgba> for ColorScale {
    fn scale(&self, value: f32) -> Rgba {
        let t = ((value - self.domain_min) / (self.domain_max - self.domain_min)).clamp(0.0, 1.0);

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let segment_count = self.colors.len() - 1;
        let segment = (t * segment_count as f32).floor() as usize;
        let segment = segment.min(segment_count - 1);

        let local_t = t * segment_count as f32 - segment as f32;

        self.colors[segment].lerp(self.colors[segment + 1], local_t)
    }

    fn domain(&self) -> (f32, f32) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (Rgba, Rgba) {
        (*self.colors.first().unwrap_or(&Rgba::BLACK), *self.colors.last().unwrap_or(&Rgba::WHITE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_scale() {
        let scale = LinearScale::new((0.0, 100.0), (0.0, 1.0)).unwrap();
        assert!((scale.scale(0.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(50.0) - 0.5).abs() < 0.001);
        assert!((scale.scale(100.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_inverted_range() {
        // SVG y grows downwards
        let scale = LinearScale::new((0.0, 10.0), (200.0, 0.0)).unwrap();
        assert!((scale.scale(10.0) - 0.0).abs() < 0.001);
        assert!((scale.scale(0.0) - 200.0).abs() < 0.001);
    }

    #[test]
    fn test_linear_scale_equal_domain() {
        assert!(LinearScale::new((5.0, 5.0), (0.0, 1.0)).is_err());
    }

    #[test]
    fn test_from_zero_degenerate() {
        let scale = LinearScale::from_zero(0.0, (0.0, 100.0));
        assert_eq!(scale.domain(), (0.0, 1.0));
    }

    #[test]
    fn test_color_scale_endpoints() {
        let scale = ColorScale::yl_gn_bu((0.0, 1.0));
        assert_eq!(scale.scale(0.0), YL_GN_BU[0]);
        assert_eq!(scale.scale(1.0), YL_GN_BU[8]);
        assert_eq!(scale.scale(-5.0), YL_GN_BU[0]);
    }

    #[test]
    fn test_color_scale_single_value_domain() {
        let scale = ColorScale::yl_gn_bu((120_000.0, 120_000.0));
        assert_eq!(scale.scale(120_000.0), YL_GN_BU[4]);
    }
}
