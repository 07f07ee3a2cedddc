//! Weight limit emphasis
//!
//! Values that strictly exceed a limit are rendered bold red; values
//! at or below the limit keep the plain style. Equality never trips
//! the limit.

use pdf_fill::{Color, TextStyle};

/// Per-axle and total weight limits in tons
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRule {
    /// Limit for a single axle load
    pub limit_axle: f64,
    /// Limit for the summed axle loads
    pub limit_total: f64,
}

impl ThresholdRule {
    /// Strictly greater than the given limit
    pub fn exceeds(&self, value: f64, limit: f64) -> bool {
        value > limit
    }

    /// Whether a single axle load violates the axle limit
    pub fn exceeds_axle(&self, value: f64) -> bool {
        self.exceeds(value, self.limit_axle)
    }

    /// Whether the summed load violates the total limit
    pub fn exceeds_total(&self, value: f64) -> bool {
        self.exceeds(value, self.limit_total)
    }

    /// Placement style for a weight value
    pub fn style_for(&self, font_size: f32, violates: bool) -> TextStyle {
        let style = TextStyle::new(font_size);
        if violates {
            style.bold().color(Color::red())
        } else {
            style
        }
    }
}

impl Default for ThresholdRule {
    fn default() -> Self {
        Self {
            limit_axle: 11.0,
            limit_total: 44.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_limits_are_strict() {
        let rule = ThresholdRule::default();
        assert!(!rule.exceeds_axle(11.0));
        assert!(rule.exceeds_axle(11.01));
        assert!(!rule.exceeds_total(44.0));
        assert!(rule.exceeds_total(44.01));
    }

    #[test]
    fn test_style_for_violation() {
        let rule = ThresholdRule::default();

        let plain = rule.style_for(9.0, false);
        assert_eq!(plain, TextStyle::new(9.0));

        let emphasized = rule.style_for(9.0, true);
        assert!(emphasized.bold);
        assert_eq!(emphasized.color, Color::red());
        assert_eq!(emphasized.size, 9.0);
    }

    #[test]
    fn test_custom_limits() {
        let rule = ThresholdRule {
            limit_axle: 10.0,
            limit_total: 40.0,
        };
        assert!(rule.exceeds_axle(10.5));
        assert!(!rule.exceeds_total(40.0));
    }
}
