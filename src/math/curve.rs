//! Curve interpolation families used to turn ordered samples into paths.
//!
//! The tracers follow the usual line/area generator protocol: a line is a
//! `line_start`, a run of points and a `line_end`; an area traces its upper
//! bound forward and its lower bound backward, then closes.

use serde::{Deserialize, Serialize};

use super::{AreaPoint, Point};

/// Receiver for path construction commands.
pub trait PathSink {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn bezier_curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64);
    fn close_path(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    #[default]
    Linear,
    /// Steps at the midpoint between samples.
    Step,
    /// Vertical segment first, then horizontal.
    StepBefore,
    /// Horizontal segment first, then vertical.
    StepAfter,
    /// Uniform cubic B-spline through the samples' control polygon.
    Basis,
}

impl CurveKind {
    fn step_t(self) -> f64 {
        match self {
            Self::StepBefore => 0.0,
            Self::StepAfter => 1.0,
            _ => 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineMode {
    Standalone,
    AreaUpper,
    AreaLower,
}

#[derive(Debug)]
struct Tracer {
    kind: CurveKind,
    mode: LineMode,
    point: u8,
    t: f64,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Tracer {
    fn new(kind: CurveKind) -> Self {
        Self {
            kind,
            mode: LineMode::Standalone,
            point: 0,
            t: kind.step_t(),
            x0: f64::NAN,
            y0: f64::NAN,
            x1: f64::NAN,
            y1: f64::NAN,
        }
    }

    fn area_start(&mut self) {
        self.mode = LineMode::AreaUpper;
    }

    fn area_end(&mut self) {
        self.mode = LineMode::Standalone;
        self.t = self.kind.step_t();
    }

    fn line_start(&mut self) {
        self.point = 0;
        self.x0 = f64::NAN;
        self.y0 = f64::NAN;
        self.x1 = f64::NAN;
        self.y1 = f64::NAN;
    }

    fn first_point<S: PathSink + ?Sized>(&mut self, sink: &mut S, x: f64, y: f64) {
        if self.mode == LineMode::AreaLower {
            sink.line_to(x, y);
        } else {
            sink.move_to(x, y);
        }
    }

    fn point<S: PathSink + ?Sized>(&mut self, sink: &mut S, x: f64, y: f64) {
        match self.kind {
            CurveKind::Linear => {
                if self.point == 0 {
                    self.point = 1;
                    self.first_point(sink, x, y);
                } else {
                    self.point = 2;
                    sink.line_to(x, y);
                }
            }
            CurveKind::Step | CurveKind::StepBefore | CurveKind::StepAfter => {
                if self.point == 0 {
                    self.point = 1;
                    self.first_point(sink, x, y);
                } else {
                    self.point = 2;
                    if self.t <= 0.0 {
                        sink.line_to(self.x1, y);
                        sink.line_to(x, y);
                    } else {
                        let mid = self.x1 * (1.0 - self.t) + x * self.t;
                        sink.line_to(mid, self.y1);
                        sink.line_to(mid, y);
                    }
                }
                self.x1 = x;
                self.y1 = y;
            }
            CurveKind::Basis => {
                match self.point {
                    0 => {
                        self.point = 1;
                        self.first_point(sink, x, y);
                    }
                    1 => self.point = 2,
                    2 => {
                        self.point = 3;
                        sink.line_to(
                            (5.0 * self.x0 + self.x1) / 6.0,
                            (5.0 * self.y0 + self.y1) / 6.0,
                        );
                        self.basis_segment(sink, x, y);
                    }
                    _ => self.basis_segment(sink, x, y),
                }
                self.x0 = self.x1;
                self.x1 = x;
                self.y0 = self.y1;
                self.y1 = y;
            }
        }
    }

    fn basis_segment<S: PathSink + ?Sized>(&self, sink: &mut S, x: f64, y: f64) {
        sink.bezier_curve_to(
            (2.0 * self.x0 + self.x1) / 3.0,
            (2.0 * self.y0 + self.y1) / 3.0,
            (self.x0 + 2.0 * self.x1) / 3.0,
            (self.y0 + 2.0 * self.y1) / 3.0,
            (self.x0 + 4.0 * self.x1 + x) / 6.0,
            (self.y0 + 4.0 * self.y1 + y) / 6.0,
        );
    }

    fn line_end<S: PathSink + ?Sized>(&mut self, sink: &mut S) {
        match self.kind {
            CurveKind::Linear => {}
            CurveKind::Step | CurveKind::StepBefore | CurveKind::StepAfter => {
                if 0.0 < self.t && self.t < 1.0 && self.point == 2 {
                    sink.line_to(self.x1, self.y1);
                }
            }
            CurveKind::Basis => match self.point {
                3 => {
                    let (x1, y1) = (self.x1, self.y1);
                    self.basis_segment(sink, x1, y1);
                    sink.line_to(x1, y1);
                }
                2 => sink.line_to(self.x1, self.y1),
                _ => {}
            },
        }

        match self.mode {
            LineMode::Standalone => {}
            LineMode::AreaUpper => {
                self.mode = LineMode::AreaLower;
                self.t = 1.0 - self.t;
            }
            LineMode::AreaLower => {
                sink.close_path();
                self.mode = LineMode::AreaUpper;
                self.t = 1.0 - self.t;
            }
        }
    }
}

/// Traces `points` as an open path. Non-finite samples split the line into
/// separate runs; runs with a single sample produce only a `move_to`.
pub fn trace_line<S: PathSink + ?Sized>(sink: &mut S, points: &[Point], curve: CurveKind) {
    let mut tracer = Tracer::new(curve);
    for run in points.split(|point| !point.is_finite()) {
        if run.is_empty() {
            continue;
        }
        tracer.line_start();
        for point in run {
            tracer.point(sink, point.x, point.y);
        }
        tracer.line_end(sink);
    }
}

/// Traces the closed region between `y1` (forward) and `y0` (backward) for
/// each run of finite samples.
pub fn trace_area<S: PathSink + ?Sized>(sink: &mut S, points: &[AreaPoint], curve: CurveKind) {
    let mut tracer = Tracer::new(curve);
    for run in points.split(|point| !point.is_finite()) {
        if run.is_empty() {
            continue;
        }
        tracer.area_start();
        tracer.line_start();
        for point in run {
            tracer.point(sink, point.x, point.y1);
        }
        tracer.line_end(sink);
        tracer.line_start();
        for point in run.iter().rev() {
            tracer.point(sink, point.x, point.y0);
        }
        tracer.line_end(sink);
        tracer.area_end();
    }
}

#[cfg(test)]
mod tests {
    use super::{CurveKind, PathSink, trace_area, trace_line};
    use crate::math::{AreaPoint, Point};

    #[derive(Debug, Default)]
    struct Log(Vec<String>);

    impl PathSink for Log {
        fn move_to(&mut self, x: f64, y: f64) {
            self.0.push(format!("M{x},{y}"));
        }
        fn line_to(&mut self, x: f64, y: f64) {
            self.0.push(format!("L{x},{y}"));
        }
        fn bezier_curve_to(&mut self, _: f64, _: f64, _: f64, _: f64, x: f64, y: f64) {
            self.0.push(format!("C{x},{y}"));
        }
        fn close_path(&mut self) {
            self.0.push("Z".to_owned());
        }
    }

    fn samples() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)]
    }

    #[test]
    fn step_after_moves_horizontally_first() {
        let mut log = Log::default();
        trace_line(&mut log, &samples(), CurveKind::StepAfter);
        assert_eq!(log.0, vec!["M0,0", "L10,0", "L10,5"]);
    }

    #[test]
    fn step_before_moves_vertically_first() {
        let mut log = Log::default();
        trace_line(&mut log, &samples(), CurveKind::StepBefore);
        assert_eq!(log.0, vec!["M0,0", "L0,5", "L10,5"]);
    }

    #[test]
    fn non_finite_samples_split_runs() {
        let mut log = Log::default();
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(f64::NAN, 2.0),
            Point::new(3.0, 3.0),
            Point::new(4.0, 4.0),
        ];
        trace_line(&mut log, &points, CurveKind::Linear);
        assert_eq!(log.0, vec!["M0,0", "L1,1", "M3,3", "L4,4"]);
    }

    #[test]
    fn linear_area_closes_between_bounds() {
        let mut log = Log::default();
        let points = vec![AreaPoint::new(0.0, 10.0, 2.0), AreaPoint::new(5.0, 10.0, 4.0)];
        trace_area(&mut log, &points, CurveKind::Linear);
        assert_eq!(log.0, vec!["M0,2", "L5,4", "L5,10", "L0,10", "Z"]);
    }

    #[test]
    fn basis_ends_on_last_sample() {
        let mut log = Log::default();
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(6.0, 6.0),
            Point::new(12.0, 0.0),
        ];
        trace_line(&mut log, &points, CurveKind::Basis);
        assert_eq!(log.0.first().map(String::as_str), Some("M0,0"));
        assert_eq!(log.0.last().map(String::as_str), Some("L12,0"));
    }
}
