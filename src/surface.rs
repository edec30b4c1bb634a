//! Drawing surface with a canvas-like path API, serialized as an SVG document.
//!
//! Paths are built with `begin_path`/`move_to`/`line_to`/`arc` and then
//! committed with `fill` or `stroke`. Every commit becomes one [`Mark`].

use geo::Coord;
use svg::node::element::{Path, Text};
use svg::Document;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PathOp {
    MoveTo(Coord<f64>),
    LineTo(Coord<f64>),
    Close,
    Circle { center: Coord<f64>, radius: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Fill {
        d: String,
        color: String,
        alpha: f64,
    },
    Stroke {
        d: String,
        color: String,
        width: f64,
        alpha: f64,
    },
    Text {
        text: String,
        at: Coord<f64>,
        color: String,
        font: String,
    },
}

#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    path: Vec<PathOp>,
    marks: Vec<Mark>,
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            path: Vec::new(),
            marks: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn begin_path(&mut self) {
        self.path.clear();
    }

    pub fn move_to(&mut self, p: Coord<f64>) {
        self.path.push(PathOp::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Coord<f64>) {
        self.path.push(PathOp::LineTo(p));
    }

    pub fn close_path(&mut self) {
        self.path.push(PathOp::Close);
    }

    /// Adds a full circle to the current path.
    pub fn arc(&mut self, center: Coord<f64>, radius: f64) {
        self.path.push(PathOp::Circle { center, radius });
    }

    pub fn fill(&mut self, color: &str, alpha: f64) {
        if let Some(d) = self.path_data() {
            self.marks.push(Mark::Fill {
                d,
                color: color.to_string(),
                alpha,
            });
        }
    }

    pub fn stroke(&mut self, color: &str, width: f64, alpha: f64) {
        if let Some(d) = self.path_data() {
            self.marks.push(Mark::Stroke {
                d,
                color: color.to_string(),
                width,
                alpha,
            });
        }
    }

    pub fn fill_text(&mut self, text: &str, at: Coord<f64>, color: &str, font: &str) {
        self.marks.push(Mark::Text {
            text: text.to_string(),
            at,
            color: color.to_string(),
            font: font.to_string(),
        });
    }

    /// Wipes everything drawn so far, like `clearRect` over the whole canvas.
    pub fn clear(&mut self) {
        self.path.clear();
        self.marks.clear();
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn is_blank(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn fill_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark::Fill { .. }))
            .count()
    }

    pub fn stroke_count(&self) -> usize {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark::Stroke { .. }))
            .count()
    }

    fn path_data(&self) -> Option<String> {
        if self.path.is_empty() {
            return None;
        }
        let mut d = String::new();
        for op in &self.path {
            if !d.is_empty() {
                d.push(' ');
            }
            match op {
                PathOp::MoveTo(p) => d.push_str(&format!("M{:.2},{:.2}", p.x, p.y)),
                PathOp::LineTo(p) => d.push_str(&format!("L{:.2},{:.2}", p.x, p.y)),
                PathOp::Close => d.push('Z'),
                PathOp::Circle { center, radius } => d.push_str(&format!(
                    "M{:.2},{:.2} a{r:.2},{r:.2} 0 1,0 {:.2},0 a{r:.2},{r:.2} 0 1,0 {:.2},0",
                    center.x - radius,
                    center.y,
                    2.0 * radius,
                    -2.0 * radius,
                    r = radius,
                )),
            }
        }
        Some(d)
    }

    /// Layers several surfaces of the same size into one document, first at the bottom.
    pub fn compose(layers: &[&Surface]) -> Document {
        let (width, height) = layers
            .first()
            .map(|s| (s.width, s.height))
            .unwrap_or((0, 0));
        let mut document = Document::new()
            .set("width", width.to_string())
            .set("height", height.to_string())
            .set("viewBox", format!("0 0 {} {}", width, height));
        for layer in layers {
            for mark in &layer.marks {
                document = match mark {
                    Mark::Fill { d, color, alpha } => document.add(
                        Path::new()
                            .set("d", d.as_str())
                            .set("fill", color.as_str())
                            .set("fill-opacity", format!("{}", alpha))
                            .set("stroke", "none"),
                    ),
                    Mark::Stroke {
                        d,
                        color,
                        width,
                        alpha,
                    } => document.add(
                        Path::new()
                            .set("d", d.as_str())
                            .set("fill", "none")
                            .set("stroke", color.as_str())
                            .set("stroke-width", format!("{}", width))
                            .set("stroke-opacity", format!("{}", alpha)),
                    ),
                    Mark::Text {
                        text,
                        at,
                        color,
                        font,
                    } => document.add(
                        Text::new(text.as_str())
                            .set("x", format!("{:.2}", at.x))
                            .set("y", format!("{:.2}", at.y))
                            .set("fill", color.as_str())
                            .set("text-anchor", "middle")
                            .set("style", format!("font: {}", font)),
                    ),
                };
            }
        }
        document
    }

    pub fn to_svg(&self) -> String {
        Self::compose(&[self]).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_without_path_draws_nothing() {
        let mut surface = Surface::new(10, 10);
        surface.begin_path();
        surface.fill("#000", 1.0);
        assert!(surface.is_blank());
    }

    #[test]
    fn path_commands_are_serialized() {
        let mut surface = Surface::new(10, 10);
        surface.begin_path();
        surface.move_to(Coord { x: 1.0, y: 2.0 });
        surface.line_to(Coord { x: 3.5, y: 4.0 });
        surface.close_path();
        surface.stroke("#000", 0.5, 1.0);

        match &surface.marks()[0] {
            Mark::Stroke { d, width, .. } => {
                assert_eq!(d, "M1.00,2.00 L3.50,4.00 Z");
                assert_eq!(*width, 0.5);
            }
            other => panic!("unexpected mark {:?}", other),
        }
    }

    #[test]
    fn fill_and_stroke_share_the_current_path() {
        let mut surface = Surface::new(10, 10);
        surface.begin_path();
        surface.arc(Coord { x: 5.0, y: 5.0 }, 4.0);
        surface.fill("red", 1.0);
        surface.stroke("black", 1.0, 1.0);
        assert_eq!(surface.fill_count(), 1);
        assert_eq!(surface.stroke_count(), 1);
    }

    #[test]
    fn clear_wipes_marks() {
        let mut surface = Surface::new(10, 10);
        surface.fill_text("ISS", Coord { x: 1.0, y: 1.0 }, "#333", "bold 11px sans-serif");
        assert!(!surface.is_blank());
        surface.clear();
        assert!(surface.is_blank());
    }

    #[test]
    fn svg_output_contains_dimensions_and_marks() {
        let mut surface = Surface::new(960, 600);
        surface.begin_path();
        surface.move_to(Coord { x: 0.0, y: 0.0 });
        surface.line_to(Coord { x: 10.0, y: 10.0 });
        surface.stroke("#000", 1.0, 1.0);
        let svg = surface.to_svg();
        assert!(svg.contains("width=\"960\""));
        assert!(svg.contains("M0.00,0.00 L10.00,10.00"));
    }
}
