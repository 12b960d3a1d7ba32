use std::io::Write;

use image::{GrayImage, Luma};
use itertools::Itertools;

use qrdesk_core::{ModuleMatrix, ModuleRect, Svg};

const FOREGROUND: &str = "#000000";
const BACKGROUND: &str = "#ffffff";

/// Renders a [ModuleMatrix] as black vector squares on a white square drawing of fixed size.
#[derive(Debug, Clone, Copy)]
pub struct SvgRenderer {
    size: u32,
}

impl SvgRenderer {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Render `matrix`, one square per dark module, each of side `size / module_count`.
    pub fn render(&self, matrix: &ModuleMatrix) -> Svg {
        let module_count = matrix.size();
        let module_size = if module_count == 0 {
            0.0
        } else {
            self.size as f64 / module_count as f64
        };
        let shapes = matrix
            .dark_modules()
            .map(|(row, col)| ModuleRect {
                row,
                col,
                x: col as f64 * module_size,
                y: row as f64 * module_size,
                size: module_size,
            })
            .collect();
        Svg {
            size: self.size,
            module_count,
            module_size,
            foreground: FOREGROUND.into(),
            background: BACKGROUND.into(),
            shapes,
        }
    }
}

const DARK_GLYPH: &str = "██";
const LIGHT_GLYPH: &str = "  ";

/// Renders a [ModuleMatrix] as text, two characters per module.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiRenderer {
    inverted: bool,
}

impl AsciiRenderer {
    /// Construct a new [AsciiRenderer] that draws dark modules as "██" and light ones as blanks.
    pub fn new() -> Self {
        Self { inverted: false }
    }

    /// Swap the glyphs of dark and light modules, for terminals printing light text on a dark background.
    pub fn inverted(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    fn glyph(&self, dark: bool) -> &'static str {
        if dark != self.inverted {
            DARK_GLYPH
        } else {
            LIGHT_GLYPH
        }
    }

    /// Render `matrix` into `output`, surrounded by a quiet zone of `quiet_zone` light modules.
    pub fn render<W: Write>(
        &self,
        output: &mut W,
        matrix: &ModuleMatrix,
        quiet_zone: usize,
    ) -> std::io::Result<()> {
        let light = self.glyph(false);
        let blank_row = light.repeat(matrix.size() + 2 * quiet_zone);
        for _ in 0..quiet_zone {
            writeln!(output, "{}", blank_row)?;
        }
        let margin = light.repeat(quiet_zone);
        for row in matrix.rows() {
            let modules = row.iter().map(|bit| self.glyph(*bit)).join("");
            writeln!(output, "{}{}{}", margin, modules, margin)?;
        }
        for _ in 0..quiet_zone {
            writeln!(output, "{}", blank_row)?;
        }
        Ok(())
    }
}

/// Rasterize `matrix` to a grayscale bitmap with `scale` pixels per module and a quiet zone of `quiet_zone`
/// modules on every side.
pub fn rasterize(matrix: &ModuleMatrix, scale: u32, quiet_zone: u32) -> GrayImage {
    let scale = scale.max(1);
    let side = (matrix.size() as u32 + 2 * quiet_zone) * scale;
    let offset = quiet_zone * scale;
    GrayImage::from_fn(side, side, |x, y| {
        let inside = x >= offset && y >= offset;
        let (col, row) = ((x - offset.min(x)) / scale, (y - offset.min(y)) / scale);
        if inside && matrix.is_dark(row as usize, col as usize) {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use qrdesk_core::Module;

    fn checkerboard(size: usize) -> ModuleMatrix {
        ModuleMatrix::from_fn(size, |row, col| (row + col) % 2 == 0)
    }

    #[test]
    fn test_svg_shapes_match_dark_modules() {
        let matrix = checkerboard(5);
        let svg = SvgRenderer::new(200).render(&matrix);
        assert_eq!(svg.module_count, 5);
        assert_eq!(svg.module_size, 40.0);
        assert_eq!(svg.shapes.len(), matrix.dark_count());
        for shape in &svg.shapes {
            assert!(matrix.is_dark(shape.row, shape.col));
            assert_eq!(shape.x, shape.col as f64 * 40.0);
            assert_eq!(shape.y, shape.row as f64 * 40.0);
        }
    }

    #[test]
    fn test_svg_of_light_matrix_is_empty() {
        let matrix = ModuleMatrix::filled(21, Module::Light);
        let svg = SvgRenderer::new(200).render(&matrix);
        assert!(svg.shapes.is_empty());
        assert_eq!(svg.to_string().matches("<rect").count(), 0);
    }

    #[test]
    fn test_svg_colors() {
        let markup = SvgRenderer::new(10).render(&checkerboard(1)).to_string();
        assert!(markup.contains(r##"fill="#000000""##));
        assert!(markup.contains("background-color:#ffffff"));
    }

    #[test]
    fn test_ascii_rendering() {
        let mut output = Vec::new();
        AsciiRenderer::new()
            .render(&mut output, &checkerboard(2), 1)
            .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "        \n  ██    \n    ██  \n        \n"
        );
    }

    #[test]
    fn test_ascii_inverted() {
        let mut output = Vec::new();
        AsciiRenderer::new()
            .inverted()
            .render(&mut output, &checkerboard(2), 1)
            .unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "████████\n██  ████\n████  ██\n████████\n"
        );
    }

    #[test]
    fn test_rasterize() {
        let image = rasterize(&checkerboard(2), 3, 1);
        assert_eq!(image.dimensions(), (12, 12));
        assert_eq!(image.get_pixel(0, 0), &Luma([255]));
        assert_eq!(image.get_pixel(3, 3), &Luma([0]));
        assert_eq!(image.get_pixel(5, 5), &Luma([0]));
        assert_eq!(image.get_pixel(6, 3), &Luma([255]));
        assert_eq!(image.get_pixel(6, 6), &Luma([0]));
    }
}
