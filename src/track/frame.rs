use geo::{Coord, LineString};

use super::palette::Palette;
use super::types::PositionSeries;
use crate::map::Projection;
use crate::surface::Surface;

const MARKER_RADIUS: f64 = 4.0;
const LABEL_OFFSET: f64 = 14.0;
const TRAIL_WIDTH: f64 = 1.5;
const CLOCK_COLOR: &str = "#333";
const CLOCK_FONT: &str = "bold 14px sans-serif";
const LABEL_FONT: &str = "bold 11px sans-serif";

/// Transparent surface layered above the map. Trails persist on their own
/// layer; markers, labels and the clock are redrawn every frame.
pub struct TrackSurface {
    trails: Surface,
    overlay: Surface,
    frames_drawn: usize,
}

impl TrackSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            trails: Surface::new(width, height),
            overlay: Surface::new(width, height),
            frames_drawn: 0,
        }
    }

    pub fn clear(&mut self) {
        self.trails.clear();
        self.overlay.clear();
        self.frames_drawn = 0;
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames_drawn
    }

    pub fn trails(&self) -> &Surface {
        &self.trails
    }

    pub fn overlay(&self) -> &Surface {
        &self.overlay
    }

    pub fn is_blank(&self) -> bool {
        self.trails.is_blank() && self.overlay.is_blank()
    }

    pub fn to_svg(&self) -> String {
        Surface::compose(&[&self.trails, &self.overlay]).to_string()
    }

    /// Draws the frame at sample index `frame`. `previous` is the index of
    /// the frame drawn before it in this cycle; each trail is extended from
    /// there. A series shorter than `frame` is drawn at its last sample, once,
    /// and skipped on later frames.
    pub fn draw_frame(
        &mut self,
        projection: &Projection,
        palette: &mut Palette,
        series: &[PositionSeries],
        previous: Option<usize>,
        frame: usize,
    ) {
        self.overlay.clear();

        let clock = series
            .iter()
            .max_by_key(|s| s.positions.len())
            .and_then(|s| s.positions.get(frame.min(s.positions.len().saturating_sub(1))))
            .and_then(|sample| sample.time());
        if let Some(time) = clock {
            let at = Coord {
                x: self.overlay.width() as f64 / 2.0,
                y: 16.0,
            };
            self.overlay.fill_text(
                &time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
                at,
                CLOCK_COLOR,
                CLOCK_FONT,
            );
        }

        for s in series {
            let Some(last) = s.positions.len().checked_sub(1) else {
                continue;
            };
            if previous.is_some_and(|p| p >= last) {
                continue;
            }
            let index = frame.min(last);
            let current = &s.positions[index];
            let color = palette.color_for(s.info.satid);

            let start = previous.map_or(index, |p| p.min(index));
            let segment = &s.positions[start..=index];
            if segment.iter().filter(|p| p.is_plottable()).count() > 1 {
                let trail: LineString<f64> = segment
                    .iter()
                    .map(|p| Coord {
                        x: p.satlongitude,
                        y: p.satlatitude,
                    })
                    .collect();
                self.trails.begin_path();
                projection.trace_line(&mut self.trails, &trail);
                self.trails.stroke(color, TRAIL_WIDTH, 1.0);
            }

            if !current.is_plottable() {
                continue;
            }
            let xy = projection.project(current.satlongitude, current.satlatitude);
            self.overlay.begin_path();
            self.overlay.arc(xy, MARKER_RADIUS);
            self.overlay.fill(color, 1.0);
            self.overlay.fill_text(
                &s.info.satname,
                Coord {
                    x: xy.x,
                    y: xy.y + LABEL_OFFSET,
                },
                color,
                LABEL_FONT,
            );
        }

        self.frames_drawn += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Mark;
    use crate::track::types::{PositionSample, SeriesInfo};

    fn series(satid: u32, name: &str, n: usize) -> PositionSeries {
        PositionSeries {
            info: SeriesInfo {
                satid,
                satname: name.to_string(),
                transactionscount: 0,
            },
            positions: (0..n)
                .map(|i| PositionSample {
                    satlatitude: i as f64,
                    satlongitude: i as f64 * 2.0,
                    sataltitude: 400.0,
                    azimuth: 0.0,
                    elevation: 0.0,
                    ra: 0.0,
                    dec: 0.0,
                    timestamp: 1_700_000_000 + i as i64,
                    eclipsed: false,
                })
                .collect(),
        }
    }

    fn projection() -> Projection {
        Projection::kavrayskiy7(170.0, 960, 600)
    }

    #[test]
    fn first_frame_draws_markers_but_no_trail() {
        let mut surface = TrackSurface::new(960, 600);
        let mut palette = Palette::default();
        let data = vec![series(1, "ONE", 5), series(2, "TWO", 5)];

        surface.draw_frame(&projection(), &mut palette, &data, None, 0);

        assert!(surface.trails().is_blank());
        assert_eq!(surface.overlay().fill_count(), 2);
        let texts: Vec<_> = surface
            .overlay()
            .marks()
            .iter()
            .filter_map(|m| match m {
                Mark::Text { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["2023-11-14 22:13:20 UTC", "ONE", "TWO"]);
    }

    #[test]
    fn trails_accumulate_while_overlay_is_replaced() {
        let mut surface = TrackSurface::new(960, 600);
        let mut palette = Palette::default();
        let data = vec![series(1, "ONE", 5)];

        surface.draw_frame(&projection(), &mut palette, &data, None, 0);
        surface.draw_frame(&projection(), &mut palette, &data, Some(0), 2);
        surface.draw_frame(&projection(), &mut palette, &data, Some(2), 4);

        assert_eq!(surface.trails().stroke_count(), 2);
        assert_eq!(surface.overlay().fill_count(), 1);
        assert_eq!(surface.frames_drawn(), 3);
    }

    #[test]
    fn exhausted_series_is_skipped() {
        let mut surface = TrackSurface::new(960, 600);
        let mut palette = Palette::default();
        let data = vec![series(1, "SHORT", 2), series(2, "LONG", 6)];

        surface.draw_frame(&projection(), &mut palette, &data, Some(2), 4);

        assert_eq!(surface.overlay().fill_count(), 1);
        match &surface.trails().marks()[0] {
            Mark::Stroke { color, .. } => assert_eq!(color, palette.color_for(2)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unplottable_sample_has_no_marker() {
        let mut surface = TrackSurface::new(960, 600);
        let mut palette = Palette::default();
        let mut data = vec![series(1, "ONE", 3)];
        data[0].positions[0].satlatitude = f64::NAN;

        surface.draw_frame(&projection(), &mut palette, &data, None, 0);

        assert_eq!(surface.overlay().fill_count(), 0);
    }

    fn line_to(lon: f64, lat: f64) -> String {
        let p = projection().project(lon, lat);
        format!("L{:.2},{:.2}", p.x, p.y)
    }

    fn stroke_data(surface: &Surface) -> Vec<String> {
        surface
            .marks()
            .iter()
            .filter_map(|m| match m {
                Mark::Stroke { d, .. } => Some(d.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn shorter_series_reaches_its_last_sample() {
        let mut surface = TrackSurface::new(960, 600);
        let mut palette = Palette::default();
        let data = vec![series(1, "FOUR", 4), series(2, "FIVE", 5)];

        surface.draw_frame(&projection(), &mut palette, &data, None, 0);
        surface.draw_frame(&projection(), &mut palette, &data, Some(0), 2);
        surface.draw_frame(&projection(), &mut palette, &data, Some(2), 4);

        let trails = stroke_data(surface.trails()).join(" ");
        // sample i of series() sits at (2i, i)
        assert!(trails.contains(&line_to(6.0, 3.0)));
        assert!(trails.contains(&line_to(8.0, 4.0)));
        assert_eq!(surface.overlay().fill_count(), 2);

        // once drawn at its last sample the short series is left alone
        surface.draw_frame(&projection(), &mut palette, &data, Some(4), 5);
        assert_eq!(surface.overlay().fill_count(), 0);
    }

    #[test]
    fn trail_breaks_at_missing_sample() {
        let mut surface = TrackSurface::new(960, 600);
        let mut palette = Palette::default();
        let mut data = vec![series(1, "ONE", 3)];
        data[0].positions[1].satlongitude = f64::NAN;

        surface.draw_frame(&projection(), &mut palette, &data, None, 0);
        surface.draw_frame(&projection(), &mut palette, &data, Some(0), 2);

        let strokes = stroke_data(surface.trails());
        assert_eq!(strokes.len(), 1);
        assert_eq!(strokes[0].matches('M').count(), 2);
        assert!(!strokes[0].contains('L'));
    }

    #[test]
    fn clear_resets_everything() {
        let mut surface = TrackSurface::new(960, 600);
        let mut palette = Palette::default();
        let data = vec![series(1, "ONE", 3)];
        surface.draw_frame(&projection(), &mut palette, &data, Some(0), 2);
        assert!(!surface.is_blank());

        surface.clear();
        assert!(surface.is_blank());
        assert_eq!(surface.frames_drawn(), 0);
    }
}
