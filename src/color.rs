//! Color types and the dashboard palettes.
//!
//! Categorical charts cycle through a pastel qualitative palette; the
//! choropleth uses the sequential yellow-green-blue ramp.
//!
//! # References
//!
//! - Brewer, C. A. (2003). *ColorBrewer*. Sequential scheme "YlGnBu".

use serde::{Serialize, Serializer};

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Light sea green, the selection accent.
    pub const ACCENT: Self = Self::rgb(0x20, 0xB2, 0xAA);
    /// Slate text color for titles and labels.
    pub const SLATE: Self = Self::rgb(51, 65, 85);
    /// Light grey for grid lines and placeholders.
    pub const GRID: Self = Self::rgb(226, 232, 240);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parse `#RRGGBB` (the leading `#` is optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#rrggbb` (alpha dropped).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self::new(
            (f32::from(self.r) * inv_t + f32::from(other.r) * t) as u8,
            (f32::from(self.g) * inv_t + f32::from(other.g) * t) as u8,
            (f32::from(self.b) * inv_t + f32::from(other.b) * t) as u8,
            (f32::from(self.a) * inv_t + f32::from(other.a) * t) as u8,
        )
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Pastel qualitative palette.
pub const PASTEL: [Rgba; 11] = [
    Rgba::rgb(102, 197, 204),
    Rgba::rgb(246, 207, 113),
    Rgba::rgb(248, 156, 116),
    Rgba::rgb(220, 176, 242),
    Rgba::rgb(135, 197, 95),
    Rgba::rgb(158, 185, 243),
    Rgba::rgb(254, 136, 177),
    Rgba::rgb(201, 219, 116),
    Rgba::rgb(139, 224, 164),
    Rgba::rgb(180, 151, 231),
    Rgba::rgb(179, 179, 179),
];

/// Yellow-green-blue sequential ramp, light to dark.
pub const YL_GN_BU: [Rgba; 9] = [
    Rgba::rgb(255, 255, 217),
    Rgba::rgb(237, 248, 177),
    Rgba::rgb(199, 233, 180),
    Rgba::rgb(127, 205, 187),
    Rgba::rgb(65, 182, 196),
    Rgba::rgb(29, 145, 192),
    Rgba::rgb(34, 94, 168),
    Rgba::rgb(37, 52, 148),
    Rgba::rgb(8, 29, 88),
];

/// The `index`-th pastel color, cycling.
#[must_use]
pub fn pastel(index: usize) -> Rgba {
    PASTEL[index % PASTEL.len()]
}
