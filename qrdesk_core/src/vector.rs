use std::fmt;

/// A square shape covering one dark module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModuleRect {
    pub row: usize,
    pub col: usize,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Vector rendering of a module matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Svg {
    /// Width and height of the drawing, in user units.
    pub size: u32,
    /// Number of modules per side.
    pub module_count: usize,
    /// Side of a single module, in user units.
    pub module_size: f64,
    pub foreground: String,
    pub background: String,
    /// One shape per dark module, nothing for light ones.
    pub shapes: Vec<ModuleRect>,
}

impl fmt::Display for Svg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}" style="background-color:{bg}" shape-rendering="crispEdges">"#,
            size = self.size,
            bg = self.background,
        )?;
        for rect in &self.shapes {
            writeln!(
                f,
                r#"  <rect x="{}" y="{}" width="{s}" height="{s}" fill="{}"/>"#,
                rect.x,
                rect.y,
                self.foreground,
                s = rect.size,
            )?;
        }
        write!(f, "</svg>")
    }
}

/// Child node of a [Container](crate::Container).
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Svg(Svg),
    Text(String),
}
