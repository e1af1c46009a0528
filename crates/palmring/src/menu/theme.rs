use handkit::Color;
use palette::Srgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub primary: Color,
    pub common: Color,
    pub highlight: Color,
    pub guide: Color,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: Srgba::new(1.0, 1.0, 1.0, 1.0),
            common: Srgba::new(1.0, 1.0, 1.0, 0.5),
            highlight: Srgba::new(0.4, 0.6, 1.0, 1.0),
            guide: Srgba::new(1.0, 1.0, 1.0, 0.35),
        }
    }
}

impl ThemeColors {
    /// Colour of the palm indicator, shifting from common to primary as the grip closes.
    pub fn indicator(&self, grip: f32) -> Color {
        let t = grip.clamp(0.0, 1.0);
        let (r0, g0, b0, a0) = self.common.into_components();
        let (r1, g1, b1, a1) = self.primary.into_components();
        let lerp = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Srgba::new(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1), lerp(a0, a1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_blends_with_grip() {
        let colors = ThemeColors::default();
        assert_eq!(colors.indicator(0.0), colors.common);
        assert_eq!(colors.indicator(1.0), colors.primary);
        assert_eq!(colors.indicator(7.0), colors.primary);
        let half = colors.indicator(0.5);
        assert!((half.alpha - 0.75).abs() < 1e-6);
    }
}
