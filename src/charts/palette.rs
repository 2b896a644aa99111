//! Series colors shared by the interactive and static renderers.

use egui::Color32;
use plotters::style::RGBColor;

const PALETTE: [(u8, u8, u8); 10] = [
    (52, 152, 219),  // Blue
    (231, 76, 60),   // Red
    (46, 204, 113),  // Green
    (155, 89, 182),  // Purple
    (243, 156, 18),  // Orange
    (26, 188, 156),  // Teal
    (233, 30, 99),   // Pink
    (0, 188, 212),   // Cyan
    (121, 85, 72),   // Brown
    (96, 125, 139),  // Blue Grey
];

fn rgb(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

pub fn egui_color(index: usize) -> Color32 {
    let (r, g, b) = rgb(index);
    Color32::from_rgb(r, g, b)
}

pub fn plotters_color(index: usize) -> RGBColor {
    let (r, g, b) = rgb(index);
    RGBColor(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_wrap_around() {
        assert_eq!(egui_color(0), egui_color(PALETTE.len()));
        let (a, b) = (plotters_color(3), plotters_color(3 + PALETTE.len()));
        assert_eq!((a.0, a.1, a.2), (b.0, b.1, b.2));
        assert_ne!(egui_color(0), egui_color(1));
    }
}
