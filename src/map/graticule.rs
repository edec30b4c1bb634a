use geo::{Coord, LineString};

/// Latitude/longitude grid with d3's default extents: minor lines every 10°
/// up to ±80° latitude, major meridians every 90° reaching the poles.
#[derive(Debug, Clone, Copy)]
pub struct Graticule {
    pub minor_step: f64,
    pub major_step: f64,
    pub minor_lat_limit: f64,
    pub precision: f64,
}

impl Default for Graticule {
    fn default() -> Self {
        Self {
            minor_step: 10.0,
            major_step: 90.0,
            minor_lat_limit: 80.0,
            precision: 2.5,
        }
    }
}

impl Graticule {
    pub fn lines(&self) -> Vec<LineString<f64>> {
        let mut lines = Vec::new();

        for lon in steps(-180.0, 180.0, self.major_step) {
            lines.push(self.meridian(lon, 90.0));
        }
        for lon in steps(-180.0, 180.0, self.minor_step) {
            if is_multiple(lon, self.major_step) {
                continue;
            }
            lines.push(self.meridian(lon, self.minor_lat_limit));
        }
        for lat in steps(-self.minor_lat_limit, self.minor_lat_limit + 1e-6, self.minor_step) {
            lines.push(self.parallel(lat));
        }

        lines
    }

    /// Boundary of the major extent, traced clockwise from the south-west corner.
    pub fn outline(&self) -> LineString<f64> {
        let mut coords = Vec::new();
        coords.extend(sample(-90.0, 90.0, self.precision).map(|lat| Coord { x: -180.0, y: lat }));
        coords.extend(sample(-180.0, 180.0, self.precision).skip(1).map(|lon| Coord { x: lon, y: 90.0 }));
        coords.extend(sample(-90.0, 90.0, self.precision).rev().skip(1).map(|lat| Coord { x: 180.0, y: lat }));
        coords.extend(sample(-180.0, 180.0, self.precision).rev().skip(1).map(|lon| Coord { x: lon, y: -90.0 }));
        LineString::new(coords)
    }

    fn meridian(&self, lon: f64, lat_limit: f64) -> LineString<f64> {
        sample(-lat_limit, lat_limit, self.precision)
            .map(|lat| Coord { x: lon, y: lat })
            .collect()
    }

    fn parallel(&self, lat: f64) -> LineString<f64> {
        sample(-180.0, 180.0, self.precision)
            .map(|lon| Coord { x: lon, y: lat })
            .collect()
    }
}

/// Values from `start` up to but excluding `end`.
fn steps(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = ((end - start) / step).ceil() as usize;
    (0..n).map(move |i| start + i as f64 * step)
}

/// Values from `start` to `end` inclusive, never stepping past `end`.
fn sample(start: f64, end: f64, step: f64) -> impl DoubleEndedIterator<Item = f64> {
    let n = ((end - start) / step).ceil() as usize;
    (0..=n).map(move |i| (start + i as f64 * step).min(end))
}

fn is_multiple(value: f64, step: f64) -> bool {
    (value / step).fract().abs() < 1e-9
}
