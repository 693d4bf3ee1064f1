use std::fmt;

use rand::Rng;

/// A 24-bit RGB display color, printed as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const GREEN: Color = Color(0x008000);
    pub const BLUE: Color = Color(0x0000FF);
    pub const GRAY: Color = Color(0x808080);
    pub const LIGHT_BLUE: Color = Color(0xADD8E6);
    pub const BLACK: Color = Color(0x000000);
    pub const WHITE: Color = Color(0xFFFFFF);

    /// Builds a color from the lower 24 bits of `value`.
    pub const fn from_u32(value: u32) -> Self {
        Self(value & 0xFF_FFFF)
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Draws a uniformly random color from the supplied source.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self(rng.random_range(0..=0xFF_FFFF))
    }

    pub fn red(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(&self) -> u8 {
        self.0 as u8
    }

    /// Hex form used by the HTML renderer.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn hex_is_zero_padded_upper_case() {
        assert_eq!(Color::from_u32(0xab).to_hex(), "#0000AB");
        assert_eq!(Color::LIGHT_BLUE.to_string(), "#ADD8E6");
    }

    #[test]
    fn from_u32_drops_high_bits() {
        assert_eq!(Color::from_u32(0xFF12_3456), Color::from_u32(0x12_3456));
    }

    #[test]
    fn channels_round_trip() {
        let color = Color::rgb(0x12, 0x34, 0x56);
        assert_eq!(color, Color::from_u32(0x123456));
        assert_eq!((color.red(), color.green(), color.blue()), (0x12, 0x34, 0x56));
    }

    #[test]
    fn seeded_random_colors_repeat() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first: Vec<Color> = (0..5).map(|_| Color::random(&mut a)).collect();
        let second: Vec<Color> = (0..5).map(|_| Color::random(&mut b)).collect();
        assert_eq!(first, second);
    }
}
