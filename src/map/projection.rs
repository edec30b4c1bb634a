use geo::{Coord, LineString, MultiPolygon, Polygon};
use std::f64::consts::PI;

use crate::surface::Surface;

/// Kavrayskiy VII pseudocylindrical projection, scaled and centred on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub scale: f64,
    pub translate: Coord<f64>,
}

impl Projection {
    pub fn kavrayskiy7(scale: f64, width: u32, height: u32) -> Self {
        Self {
            scale,
            translate: Coord {
                x: width as f64 / 2.0,
                y: height as f64 / 2.0,
            },
        }
    }

    /// Maps longitude/latitude in degrees to canvas pixels (y grows downwards).
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> Coord<f64> {
        let lambda = lon_deg.to_radians();
        let phi = lat_deg.to_radians();
        let x = 3.0 * lambda / (2.0 * PI) * (PI * PI / 3.0 - phi * phi).sqrt();
        let y = phi;
        Coord {
            x: self.translate.x + x * self.scale,
            y: self.translate.y - y * self.scale,
        }
    }

    /// Appends one open polyline to the current path. A jump of more than half
    /// the globe in longitude starts a new sub-path instead of smearing a line
    /// across the map.
    pub fn trace_line(&self, surface: &mut Surface, line: &LineString<f64>) {
        let mut previous: Option<Coord<f64>> = None;
        for c in line.coords() {
            if !c.x.is_finite() || !c.y.is_finite() {
                previous = None;
                continue;
            }
            let p = self.project(c.x, c.y);
            match previous {
                Some(prev) if (c.x - prev.x).abs() <= 180.0 => surface.line_to(p),
                _ => surface.move_to(p),
            }
            previous = Some(*c);
        }
    }

    fn trace_ring(&self, surface: &mut Surface, ring: &LineString<f64>) {
        let mut coords = ring.coords();
        let Some(first) = coords.next() else {
            return;
        };
        surface.move_to(self.project(first.x, first.y));
        for c in coords {
            surface.line_to(self.project(c.x, c.y));
        }
        surface.close_path();
    }

    pub fn trace_polygon(&self, surface: &mut Surface, polygon: &Polygon<f64>) {
        self.trace_ring(surface, polygon.exterior());
        for hole in polygon.interiors() {
            self.trace_ring(surface, hole);
        }
    }

    pub fn trace_multi_polygon(&self, surface: &mut Surface, shape: &MultiPolygon<f64>) {
        for polygon in shape {
            self.trace_polygon(surface, polygon);
        }
    }
}
