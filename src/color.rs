use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 210.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Main series colour (first palette entry, a muted blue).
pub fn primary() -> RGBColor {
    series(0, 3)
}

/// Accent colour for overlays such as trend lines.
pub fn accent() -> RGBColor {
    series(1, 3)
}

/// Colour `i` of an `n`-colour palette, wrapping around.
pub fn series(i: usize, n: usize) -> RGBColor {
    let palette = generate_palette(n.max(1));
    palette[i % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let p: Vec<(u8, u8, u8)> = generate_palette(5)
            .into_iter()
            .map(|c| (c.0, c.1, c.2))
            .collect();
        assert_eq!(p.len(), 5);
        for (i, a) in p.iter().enumerate() {
            for b in &p[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn series_wraps_around() {
        let rgb = |c: RGBColor| (c.0, c.1, c.2);
        assert_eq!(rgb(series(4, 3)), rgb(series(1, 3)));
        assert_eq!(rgb(series(0, 0)), rgb(series(0, 1)));
        assert_ne!(rgb(primary()), rgb(accent()));
    }
}
