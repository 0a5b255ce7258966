use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::models::chart::{ScreenPoint, ValueRange};
use crate::models::quote::Series;
use crate::models::settings::ChartGeometry;

use super::canvas::{Anchor, Canvas};

/// Labels are drawn on every x gridline up to this many points...
const LABEL_ALL_MAX: usize = 15;
/// ...on every third up to this many...
const LABEL_THIRD_MAX: usize = 45;
/// ...and on every sixth beyond that.
const SPARSE_STEP: usize = 6;

/// Baseline nudge that centres value-axis labels on their gridline.
const Y_LABEL_BASELINE_SHIFT: i32 = 3;

/// Spacing between labelled x gridlines for a series of `count` points.
pub fn label_step(count: usize) -> usize {
    if count <= LABEL_ALL_MAX {
        1
    } else if count <= LABEL_THIRD_MAX {
        3
    } else {
        SPARSE_STEP
    }
}

/// Horizontal gridline on the value axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YTick {
    pub y: i32,
    pub value: f64,
    pub label: String,
}

/// Vertical gridline for one data point, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XTick {
    pub x: i32,
    /// Date text, present only on gridlines picked by [`label_step`].
    pub label: Option<String>,
}

/// A plotted data point with the value text drawn above it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotPoint {
    pub position: ScreenPoint,
    pub label: String,
}

/// Screen-space layout of one chart. `points` follow series order, so
/// `points[0]` is the first row of the file (the rightmost point).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub y_ticks: Vec<YTick>,
    pub x_ticks: Vec<XTick>,
    pub points: Vec<PlotPoint>,
}

impl ChartLayout {
    /// Straight segments joining consecutive points.
    pub fn segments(&self) -> impl Iterator<Item = (ScreenPoint, ScreenPoint)> + '_ {
        self.points
            .windows(2)
            .map(|pair| (pair[0].position, pair[1].position))
    }
}

/// Maps a series into pixel space and draws it.
///
/// Row 0 lands on the right edge and each later row steps left, so a file
/// ordered newest-first reads left to right in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartRenderer {
    geometry: ChartGeometry,
}

impl ChartRenderer {
    pub fn new(geometry: ChartGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &ChartGeometry {
        &self.geometry
    }

    /// Pixel row of a value. A degenerate range puts everything at mid-height.
    pub fn value_to_y(&self, value: f64, range: ValueRange) -> i32 {
        let g = &self.geometry;
        if range.is_degenerate() {
            return g.top() + g.plot_height() / 2;
        }
        (g.top() as f64 + g.plot_height() as f64 * (range.top - value) / range.span()) as i32
    }

    /// Value at a pixel row; inverse of [`Self::value_to_y`].
    pub fn y_to_value(&self, y: i32, range: ValueRange) -> f64 {
        let g = &self.geometry;
        if range.is_degenerate() {
            return range.top;
        }
        range.top - (y - g.top()) as f64 * range.span() / g.plot_height() as f64
    }

    /// Pixel column of row `index` in a series of `count` points.
    /// A single point sits at mid-width.
    pub fn index_to_x(&self, index: usize, count: usize) -> i32 {
        let g = &self.geometry;
        let last = count.saturating_sub(1);
        if last == 0 {
            return g.left() + g.plot_width() / 2;
        }
        (g.right() as f64 - g.plot_width() as f64 * index as f64 / last as f64) as i32
    }

    /// Row index nearest to pixel column `x`, clamped to the series.
    pub fn x_to_index(&self, x: i32, count: usize) -> Option<usize> {
        let g = &self.geometry;
        let last = count.checked_sub(1)?;
        if last == 0 {
            return Some(0);
        }
        let raw = (g.right() - x) as f64 * last as f64 / g.plot_width() as f64;
        Some(raw.round().clamp(0.0, last as f64) as usize)
    }

    /// Compute gridlines, labels and points for a series. Pure: the same
    /// input always yields the same layout.
    pub fn layout(&self, series: &Series, range: ValueRange) -> Result<ChartLayout, CoreError> {
        let g = &self.geometry;
        let values = series.values()?;
        let count = values.len();

        let divisions = g.y_divisions.max(1);
        let y_ticks = (0..=divisions)
            .map(|i| {
                let fraction = f64::from(i) / f64::from(divisions);
                let from_top = f64::from(divisions - i) / f64::from(divisions);
                let value = range.bottom + range.span() * fraction;
                YTick {
                    y: (g.plot_height() as f64 * from_top) as i32 + g.top(),
                    value,
                    label: format!("{value:.2}"),
                }
            })
            .collect();

        let step = label_step(count);
        let points = series.points();
        let x_ticks = (0..count)
            .map(|i| {
                let row = count - 1 - i;
                XTick {
                    x: self.index_to_x(row, count),
                    label: (i % step == 0).then(|| points[row].date.clone()),
                }
            })
            .collect();

        let plotted = values
            .iter()
            .zip(points)
            .enumerate()
            .map(|(row, (&value, point))| PlotPoint {
                position: ScreenPoint::new(self.index_to_x(row, count), self.value_to_y(value, range)),
                label: point.value.clone(),
            })
            .collect();

        Ok(ChartLayout {
            y_ticks,
            x_ticks,
            points: plotted,
        })
    }

    /// Draw a series onto `canvas`.
    pub fn draw(&self, canvas: &mut dyn Canvas, series: &Series, range: ValueRange) -> Result<(), CoreError> {
        let layout = self.layout(series, range)?;
        self.draw_layout(canvas, &layout);
        Ok(())
    }

    /// Emit a precomputed layout.
    pub fn draw_layout(&self, canvas: &mut dyn Canvas, layout: &ChartLayout) {
        let g = &self.geometry;
        let (left, right, top, bottom) = (g.left(), g.right(), g.top(), g.bottom());

        canvas.fill_rect(ScreenPoint::new(left, top), g.plot_width(), g.plot_height(), g.background);

        for tick in &layout.y_ticks {
            canvas.line(ScreenPoint::new(left, tick.y), ScreenPoint::new(right, tick.y), g.grid);
            canvas.line(
                ScreenPoint::new(left, tick.y),
                ScreenPoint::new(left + g.tick_length, tick.y),
                g.foreground,
            );
            canvas.text(
                ScreenPoint::new(
                    left - g.tick_length,
                    tick.y + g.label_height / 2 - Y_LABEL_BASELINE_SHIFT,
                ),
                &tick.label,
                Anchor::End,
                g.foreground,
            );
        }

        // x axis
        canvas.line(ScreenPoint::new(left, bottom), ScreenPoint::new(right, bottom), g.foreground);

        for tick in &layout.x_ticks {
            canvas.line(ScreenPoint::new(tick.x, top), ScreenPoint::new(tick.x, bottom), g.grid);
            canvas.line(
                ScreenPoint::new(tick.x, bottom - g.tick_length),
                ScreenPoint::new(tick.x, bottom),
                g.foreground,
            );
            if let Some(label) = &tick.label {
                canvas.text(
                    ScreenPoint::new(tick.x, bottom + g.label_height),
                    label,
                    Anchor::Middle,
                    g.foreground,
                );
            }
        }

        // y axis
        canvas.line(ScreenPoint::new(left, top), ScreenPoint::new(left, bottom), g.foreground);

        for (from, to) in layout.segments() {
            canvas.line(from, to, g.foreground);
        }

        for point in &layout.points {
            canvas.text(
                ScreenPoint::new(point.position.x, point.position.y - g.label_height),
                &point.label,
                Anchor::Middle,
                g.foreground,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_step_thresholds() {
        assert_eq!(label_step(0), 1);
        assert_eq!(label_step(15), 1);
        assert_eq!(label_step(16), 3);
        assert_eq!(label_step(45), 3);
        assert_eq!(label_step(46), 6);
    }

    #[test]
    fn y_round_trip() {
        let r = ChartRenderer::new(ChartGeometry::default());
        let range = ValueRange { top: 200.0, bottom: 100.0 };
        assert_eq!(r.value_to_y(200.0, range), 50);
        assert_eq!(r.value_to_y(100.0, range), 670);
        assert!((r.y_to_value(360, range) - 150.0).abs() < 1e-9);
    }
}
