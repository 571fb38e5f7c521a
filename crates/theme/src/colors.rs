/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BASE:    Self = Self { r: 0.118, g: 0.118, b: 0.180, a: 1.0 }; // #1e1e2e
    pub const TEXT:    Self = Self { r: 0.804, g: 0.839, b: 0.957, a: 1.0 }; // #cdd6f4
    pub const BLUE:    Self = Self { r: 0.537, g: 0.706, b: 0.980, a: 1.0 }; // #89b4fa
    pub const YELLOW:  Self = Self { r: 0.976, g: 0.886, b: 0.686, a: 1.0 }; // #f9e2af
    pub const SURFACE: Self = Self { r: 0.192, g: 0.196, b: 0.267, a: 1.0 }; // #313244

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let channel = |i: usize| -> Option<f32> {
            u8::from_str_radix(hex.get(i..i + 2)?, 16)
                .ok()
                .map(|v| f32::from(v) / 255.0)
        };

        match hex.len() {
            6 => Some(Self { r: channel(0)?, g: channel(2)?, b: channel(4)?, a: 1.0 }),
            8 => Some(Self { r: channel(0)?, g: channel(2)?, b: channel(4)?, a: channel(6)? }),
            _ => None,
        }
    }

    /// Convert to an [`iced::Color`] for use in Iced widgets.
    #[inline]
    pub fn to_iced(self) -> iced::Color {
        iced::Color::from_rgba(self.r, self.g, self.b, self.a)
    }

    /// Return a copy with the alpha channel set to `alpha`.
    #[inline]
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!(
            Color::from_hex("#ff0000"),
            Some(Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 })
        );
        assert_eq!(Color::from_hex("00000000").map(|c| c.a), Some(0.0));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
        assert_eq!(Color::from_hex("#ééé"), None);
    }

    #[test]
    fn with_alpha_clamps() {
        assert_eq!(Color::TEXT.with_alpha(3.0).a, 1.0);
    }
}
