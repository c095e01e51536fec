mod named;

pub use named::*;
use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Split a color into its `[r, g, b]` components
#[inline]
pub const fn components(color: Rgb) -> [u8; 3] {
    [color.r, color.g, color.b]
}

/// Build a color from `[r, g, b]` components
#[inline]
pub const fn from_components([r, g, b]: [u8; 3]) -> Rgb {
    Rgb { r, g, b }
}
