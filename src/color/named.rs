//! Named colors for building palettes

use super::Rgb;

pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const YELLOW: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 0,
};
pub const PINK: Rgb = Rgb {
    r: 255,
    g: 0,
    b: 255,
};
pub const CYAN: Rgb = Rgb {
    r: 0,
    g: 255,
    b: 255,
};
pub const ORANGE: Rgb = Rgb {
    r: 255,
    g: 128,
    b: 0,
};
pub const PURPLE: Rgb = Rgb {
    r: 186,
    g: 85,
    b: 211,
};
pub const GOLD: Rgb = Rgb {
    r: 255,
    g: 150,
    b: 37,
};
