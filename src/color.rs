use palette::Srgb;

// ---------------------------------------------------------------------------
// Fixed colours of the world map
// ---------------------------------------------------------------------------

/// Light end of the choropleth gradient (lavender).
pub const GRADIENT_LIGHT: Srgb<u8> = Srgb::new(0xb9, 0xb5, 0xdd);
/// Dark end of the choropleth gradient (blue).
pub const GRADIENT_DARK: Srgb<u8> = Srgb::new(0x00, 0x33, 0x99);
/// Fill for countries without data.
pub const DEFAULT_FILL: Srgb<u8> = Srgb::new(0xb4, 0xb4, 0xb4);
/// Bubble fill, used for every bubble whatever its country colour is.
pub const BUBBLE_ACCENT: Srgb<u8> = Srgb::new(0x00, 0x5a, 0x63);

// ---------------------------------------------------------------------------
// Two-stop gradient
// ---------------------------------------------------------------------------

/// Linear gradient between two colours.
///
/// Interpolation is component-wise on the gamma-encoded 8-bit sRGB values,
/// like d3's `interpolateRgb`: each channel is `a + (b - a) * t`, rounded half
/// up and clamped to `0..=255`. `t` itself is not clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub from: Srgb<u8>,
    pub to: Srgb<u8>,
}

impl Gradient {
    pub const fn new(from: Srgb<u8>, to: Srgb<u8>) -> Self {
        Gradient { from, to }
    }

    /// Colour at position `t`; `0.0` is `from`, `1.0` is `to`.
    pub fn at(&self, t: f64) -> Srgb<u8> {
        let lerp = |x: u8, y: u8| {
            let (x, y) = (f64::from(x), f64::from(y));
            (x + (y - x) * t + 0.5).floor().clamp(0.0, 255.0) as u8
        };
        Srgb::new(
            lerp(self.from.red, self.to.red),
            lerp(self.from.green, self.to.green),
            lerp(self.from.blue, self.to.blue),
        )
    }

    pub fn midpoint(&self) -> Srgb<u8> {
        self.at(0.5)
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient::new(GRADIENT_LIGHT, GRADIENT_DARK)
    }
}

/// `#rrggbb` notation.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        let g = Gradient::default();
        assert_eq!(g.at(0.0), GRADIENT_LIGHT);
        assert_eq!(g.at(1.0), GRADIENT_DARK);
    }

    #[test]
    fn midpoint_averages_components() {
        let g = Gradient::new(Srgb::new(0, 100, 200), Srgb::new(100, 200, 250));
        assert_eq!(g.midpoint(), Srgb::new(50, 150, 225));
    }

    #[test]
    fn ties_round_up_like_d3() {
        // red: 185 → 0 gives 92.5 at the middle.
        assert_eq!(Gradient::default().midpoint(), Srgb::new(93, 116, 187));
        assert_eq!(Gradient::default().at(0.25), Srgb::new(139, 149, 204));
    }

    #[test]
    fn extrapolation_saturates_at_quantization() {
        let g = Gradient::new(Srgb::new(100, 100, 100), Srgb::new(200, 200, 200));
        assert_eq!(g.at(2.0), Srgb::new(255, 255, 255));
        assert_eq!(g.at(-0.5), Srgb::new(50, 50, 50));
        assert_eq!(g.at(-2.0), Srgb::new(0, 0, 0));
    }

    #[test]
    fn hex_is_lowercase_and_padded() {
        assert_eq!(to_hex(GRADIENT_DARK), "#003399");
        assert_eq!(to_hex(BUBBLE_ACCENT), "#005a63");
    }
}
