//! 2D wires: segments, closed profiles and the drawing pen.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::LINEAR_TOLERANCE;

/// Errors raised while building 2D profiles.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("segment {index} has zero length")]
    DegenerateSegment { index: usize },

    #[error("profile needs at least {required} segments to close, got {actual}")]
    TooFewSegments { required: usize, actual: usize },

    #[error("pointer can only be moved before the first segment")]
    PointerAlreadyDrawn,

    #[error("invalid dimension for {shape}: {reason}")]
    InvalidDimension { shape: String, reason: String },
}

/// A single edge of a 2D wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Segment {
    Line {
        start: [f64; 2],
        end: [f64; 2],
    },
    /// Circular arc; angles in radians, `sweep` is signed (positive = CCW).
    Arc {
        center: [f64; 2],
        radius: f64,
        start_angle: f64,
        sweep: f64,
    },
}

impl Segment {
    pub fn start(&self) -> [f64; 2] {
        match *self {
            Segment::Line { start, .. } => start,
            Segment::Arc {
                center,
                radius,
                start_angle,
                ..
            } => polar(center, radius, start_angle),
        }
    }

    pub fn end(&self) -> [f64; 2] {
        match *self {
            Segment::Line { end, .. } => end,
            Segment::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => polar(center, radius, start_angle + sweep),
        }
    }

    /// Point halfway along the segment.
    pub fn midpoint(&self) -> [f64; 2] {
        self.point_at(0.5)
    }

    /// Point at normalized parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> [f64; 2] {
        match *self {
            Segment::Line { start, end } => [
                start[0] + (end[0] - start[0]) * t,
                start[1] + (end[1] - start[1]) * t,
            ],
            Segment::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => polar(center, radius, start_angle + sweep * t),
        }
    }

    pub fn length(&self) -> f64 {
        match *self {
            Segment::Line { start, end } => distance(start, end),
            Segment::Arc { radius, sweep, .. } => radius * sweep.abs(),
        }
    }

    pub fn is_full_circle(&self) -> bool {
        matches!(self, Segment::Arc { sweep, .. } if sweep.abs() >= TAU - 1e-12)
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Segment {
        match *self {
            Segment::Line { start, end } => Segment::Line {
                start: [start[0] + dx, start[1] + dy],
                end: [end[0] + dx, end[1] + dy],
            },
            Segment::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Segment::Arc {
                center: [center[0] + dx, center[1] + dy],
                radius,
                start_angle,
                sweep,
            },
        }
    }

    /// The same segment traversed backwards.
    pub fn reversed(&self) -> Segment {
        match *self {
            Segment::Line { start, end } => Segment::Line {
                start: end,
                end: start,
            },
            Segment::Arc {
                center,
                radius,
                start_angle,
                sweep,
            } => Segment::Arc {
                center,
                radius,
                start_angle: start_angle + sweep,
                sweep: -sweep,
            },
        }
    }

    /// Points whose bounding rectangle is the segment's bounding rectangle:
    /// the endpoints plus every quadrant extreme an arc passes through.
    pub fn extreme_points(&self) -> Vec<[f64; 2]> {
        let mut points = vec![self.start(), self.end()];
        if let Segment::Arc {
            center,
            radius,
            start_angle,
            sweep,
        } = *self
        {
            let (lo, hi) = if sweep >= 0.0 {
                (start_angle, start_angle + sweep)
            } else {
                (start_angle + sweep, start_angle)
            };
            let mut k = (lo / FRAC_PI_2).ceil();
            while k * FRAC_PI_2 <= hi {
                points.push(polar(center, radius, k * FRAC_PI_2));
                k += 1.0;
            }
        }
        points
    }

    /// Polyline approximation; arcs are split into `arc_steps` pieces.
    /// The end point is not included.
    fn sample_into(&self, arc_steps: usize, out: &mut Vec<[f64; 2]>) {
        match self {
            Segment::Line { start, .. } => out.push(*start),
            Segment::Arc { .. } => {
                let steps = arc_steps.max(2);
                for i in 0..steps {
                    out.push(self.point_at(i as f64 / steps as f64));
                }
            }
        }
    }
}

/// An ordered chain of connected segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl Profile {
    /// Axis-aligned rectangle centred on the origin with optional rounded
    /// corners. A zero `corner_radius` gives sharp corners.
    pub fn rounded_rectangle(
        width: f64,
        height: f64,
        corner_radius: f64,
    ) -> Result<Profile, ProfileError> {
        let invalid = |reason: String| ProfileError::InvalidDimension {
            shape: "rounded rectangle".to_string(),
            reason,
        };
        if !(width > 0.0) || !(height > 0.0) {
            return Err(invalid(format!(
                "width and height must be positive, got {width} x {height}"
            )));
        }
        if corner_radius < 0.0 || corner_radius > width.min(height) / 2.0 {
            return Err(invalid(format!(
                "corner radius {corner_radius} does not fit in {width} x {height}"
            )));
        }

        let (hw, hh, r) = (width / 2.0, height / 2.0, corner_radius);
        if r <= LINEAR_TOLERANCE {
            return draw()
                .move_pointer_to([-hw, -hh])
                .h_line(width)
                .v_line(height)
                .h_line(-width)
                .close();
        }

        let mut segments = Vec::with_capacity(8);
        let corners = [
            ([hw - r, -hh + r], -FRAC_PI_2),
            ([hw - r, hh - r], 0.0),
            ([-hw + r, hh - r], FRAC_PI_2),
            ([-hw + r, -hh + r], PI),
        ];
        for (i, (center, start_angle)) in corners.iter().enumerate() {
            let prev = corners[(i + 3) % 4];
            let from = polar(prev.0, r, prev.1 + FRAC_PI_2);
            let to = polar(*center, r, *start_angle);
            if distance(from, to) > LINEAR_TOLERANCE {
                segments.push(Segment::Line {
                    start: from,
                    end: to,
                });
            }
            segments.push(Segment::Arc {
                center: *center,
                radius: r,
                start_angle: *start_angle,
                sweep: FRAC_PI_2,
            });
        }
        Ok(Profile {
            segments,
            closed: true,
        })
    }

    /// Full circle centred on the origin.
    pub fn circle(radius: f64) -> Result<Profile, ProfileError> {
        if !(radius > 0.0) {
            return Err(ProfileError::InvalidDimension {
                shape: "circle".to_string(),
                reason: format!("radius must be positive, got {radius}"),
            });
        }
        Ok(Profile {
            segments: vec![Segment::Arc {
                center: [0.0, 0.0],
                radius,
                start_angle: 0.0,
                sweep: TAU,
            }],
            closed: true,
        })
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Profile {
        Profile {
            segments: self.segments.iter().map(|s| s.translated(dx, dy)).collect(),
            closed: self.closed,
        }
    }

    /// The profile traversed in the opposite direction.
    pub fn reversed(&self) -> Profile {
        Profile {
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
            closed: self.closed,
        }
    }

    /// Bounding rectangle as `(min, max)`.
    pub fn bounds(&self) -> ([f64; 2], [f64; 2]) {
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for p in self.segments.iter().flat_map(Segment::extreme_points) {
            for i in 0..2 {
                min[i] = min[i].min(p[i]);
                max[i] = max[i].max(p[i]);
            }
        }
        (min, max)
    }

    /// Polygon approximation of the wire (arcs split into `arc_steps`).
    pub fn polygon(&self, arc_steps: usize) -> Vec<[f64; 2]> {
        let mut out = Vec::new();
        for segment in &self.segments {
            segment.sample_into(arc_steps, &mut out);
        }
        if !self.closed {
            if let Some(last) = self.segments.last() {
                out.push(last.end());
            }
        }
        out
    }

    /// Shoelace area of the polygon approximation; positive when CCW.
    pub fn signed_area(&self) -> f64 {
        let pts = self.polygon(32);
        let n = pts.len();
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += pts[i][0] * pts[j][1] - pts[j][0] * pts[i][1];
        }
        area / 2.0
    }
}

/// Start a new pen at the origin.
pub fn draw() -> Pen {
    Pen::default()
}

/// Turtle-style builder for line wires.
///
/// Moves are relative to the current pointer. Errors are collected and
/// reported by [`Pen::close`] or [`Pen::done`].
#[derive(Debug, Clone, Default)]
pub struct Pen {
    start: [f64; 2],
    cursor: [f64; 2],
    segments: Vec<Segment>,
    error: Option<ProfileError>,
}

impl Pen {
    pub fn move_pointer_to(mut self, point: [f64; 2]) -> Self {
        if !self.segments.is_empty() {
            self.fail(ProfileError::PointerAlreadyDrawn);
            return self;
        }
        self.start = point;
        self.cursor = point;
        self
    }

    pub fn h_line(self, dx: f64) -> Self {
        self.line(dx, 0.0)
    }

    pub fn v_line(self, dy: f64) -> Self {
        self.line(0.0, dy)
    }

    /// Line by a relative offset.
    pub fn line(self, dx: f64, dy: f64) -> Self {
        let to = [self.cursor[0] + dx, self.cursor[1] + dy];
        self.line_to(to)
    }

    /// Line of `distance` at `angle_deg` degrees from the +u axis.
    pub fn polar_line(self, distance: f64, angle_deg: f64) -> Self {
        let a = angle_deg.to_radians();
        self.line(distance * a.cos(), distance * a.sin())
    }

    pub fn line_to(mut self, to: [f64; 2]) -> Self {
        let segment = Segment::Line {
            start: self.cursor,
            end: to,
        };
        self.push(segment);
        self
    }

    /// Current pointer position.
    pub fn pointer(&self) -> [f64; 2] {
        self.cursor
    }

    /// Close the wire back to its start point.
    pub fn close(mut self) -> Result<Profile, ProfileError> {
        if distance(self.cursor, self.start) > LINEAR_TOLERANCE {
            let segment = Segment::Line {
                start: self.cursor,
                end: self.start,
            };
            self.push(segment);
        }
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.segments.len() < 3 {
            return Err(ProfileError::TooFewSegments {
                required: 3,
                actual: self.segments.len(),
            });
        }
        Ok(Profile {
            segments: self.segments,
            closed: true,
        })
    }

    /// Finish as an open wire.
    pub fn done(self) -> Result<Profile, ProfileError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.segments.is_empty() {
            return Err(ProfileError::TooFewSegments {
                required: 1,
                actual: 0,
            });
        }
        Ok(Profile {
            segments: self.segments,
            closed: false,
        })
    }

    fn push(&mut self, segment: Segment) {
        if segment.length() <= LINEAR_TOLERANCE {
            self.fail(ProfileError::DegenerateSegment {
                index: self.segments.len(),
            });
        }
        self.cursor = segment.end();
        self.segments.push(segment);
    }

    fn fail(&mut self, err: ProfileError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

fn polar(center: [f64; 2], radius: f64, angle: f64) -> [f64; 2] {
    [
        center[0] + radius * angle.cos(),
        center[1] + radius * angle.sin(),
    ]
}

fn distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt()
}
