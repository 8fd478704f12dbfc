use crate::error::{PlotError, PlotResult};

/// Linear mapping between a plot-space domain and a pixel extent.
///
/// Pixel `0` maps to `domain_start` unless the scale is inverted, in which
/// case it maps to `domain_end` (screen y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    inverted: bool,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> PlotResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(PlotError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            inverted: false,
        })
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn domain_to_pixel(self, value: f64, extent_px: f64) -> PlotResult<f64> {
        validate_extent(extent_px)?;
        if !value.is_finite() {
            return Err(PlotError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        let normalized = if self.inverted {
            1.0 - normalized
        } else {
            normalized
        };
        Ok(normalized * extent_px)
    }

    pub fn pixel_to_domain(self, pixel: f64, extent_px: f64) -> PlotResult<f64> {
        validate_extent(extent_px)?;
        if !pixel.is_finite() {
            return Err(PlotError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / extent_px;
        let normalized = if self.inverted {
            1.0 - normalized
        } else {
            normalized
        };
        Ok(self.domain_start + normalized * span)
    }
}

fn validate_extent(extent_px: f64) -> PlotResult<()> {
    if !extent_px.is_finite() || extent_px <= 0.0 {
        return Err(PlotError::InvalidData(
            "pixel extent must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::LinearScale;

    #[test]
    fn inverted_scale_maps_top_pixel_to_domain_end() {
        let scale = LinearScale::new(-5.0, 5.0).expect("scale").with_inverted(true);
        assert_relative_eq!(scale.pixel_to_domain(0.0, 100.0).expect("top"), 5.0);
        assert_relative_eq!(scale.pixel_to_domain(100.0, 100.0).expect("bottom"), -5.0);
    }

    #[test]
    fn inverted_scale_puts_domain_end_at_top() {
        let scale = LinearScale::new(-5.0, 5.0).expect("scale").with_inverted(true);
        assert_relative_eq!(scale.domain_to_pixel(5.0, 200.0).expect("top"), 0.0);
        assert_relative_eq!(scale.domain_to_pixel(0.0, 200.0).expect("middle"), 100.0);
        assert!(scale.domain_to_pixel(f64::NAN, 200.0).is_err());
    }

    #[test]
    fn zero_width_domain_is_rejected() {
        assert!(LinearScale::new(1.0, 1.0).is_err());
        assert!(LinearScale::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn zero_extent_is_rejected() {
        let scale = LinearScale::new(0.0, 1.0).expect("scale");
        assert!(scale.pixel_to_domain(1.0, 0.0).is_err());
    }
}
