//! Colors used by the charge scene (Catppuccin Mocha)

use catppuccin::PALETTE;

/// sRGB color, 0-255 per channel
pub type Rgb = [u8; 3];

fn rgb(color: &catppuccin::Color) -> Rgb {
    [color.rgb.r, color.rgb.g, color.rgb.b]
}

/// Marker colors, cycled by charge index
pub fn charge_colors() -> [Rgb; 10] {
    let c = &PALETTE.mocha.colors;
    [
        rgb(&c.blue),
        rgb(&c.red),
        rgb(&c.green),
        rgb(&c.peach),
        rgb(&c.mauve),
        rgb(&c.maroon),
        rgb(&c.pink),
        rgb(&c.overlay1),
        rgb(&c.sky),
        rgb(&c.flamingo),
    ]
}

/// Color of the charge at `index` (0-based)
pub fn charge_color(index: usize) -> Rgb {
    let colors = charge_colors();
    colors[index % colors.len()]
}

/// Dashed lines joining each pair of charges
pub fn distance_line_color() -> Rgb {
    rgb(&PALETTE.mocha.colors.yellow)
}

/// Distance labels and axis titles
pub fn label_color() -> Rgb {
    rgb(&PALETTE.mocha.colors.text)
}

/// Force glyph color
pub fn force_color() -> Rgb {
    rgb(&PALETTE.mocha.colors.teal)
}

/// Viewport clear color
pub fn background_color() -> Rgb {
    rgb(&PALETTE.mocha.colors.base)
}

/// Error text
pub fn error_color() -> Rgb {
    rgb(&PALETTE.mocha.colors.red)
}
