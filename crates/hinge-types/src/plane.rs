use serde::{Deserialize, Serialize};

/// A global coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Unit vector along the axis.
    pub fn vector(self) -> [f64; 3] {
        match self {
            Axis::X => [1.0, 0.0, 0.0],
            Axis::Y => [0.0, 1.0, 0.0],
            Axis::Z => [0.0, 0.0, 1.0],
        }
    }

    /// Index of the axis in a `[x, y, z]` triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Named construction planes through the origin.
///
/// The name lists the plane's local x direction first; the normal follows
/// the right-hand rule except for the reversed names (XZ, YX, ZY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaneName {
    XY,
    YZ,
    ZX,
    XZ,
    YX,
    ZY,
}

impl PlaneName {
    /// `(x_dir, normal)` of the named plane.
    fn frame(self) -> ([f64; 3], [f64; 3]) {
        match self {
            PlaneName::XY => ([1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            PlaneName::YZ => ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
            PlaneName::ZX => ([0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            PlaneName::XZ => ([1.0, 0.0, 0.0], [0.0, -1.0, 0.0]),
            PlaneName::YX => ([0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
            PlaneName::ZY => ([0.0, 0.0, 1.0], [-1.0, 0.0, 0.0]),
        }
    }

    /// Unit normal of the named plane.
    pub fn normal(self) -> [f64; 3] {
        self.frame().1
    }

    /// The global axis the normal lies on.
    pub fn normal_axis(self) -> Axis {
        match self {
            PlaneName::XY | PlaneName::YX => Axis::Z,
            PlaneName::YZ | PlaneName::ZY => Axis::X,
            PlaneName::ZX | PlaneName::XZ => Axis::Y,
        }
    }
}

/// An oriented plane in space: origin plus an orthonormal frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub origin: [f64; 3],
    pub x_dir: [f64; 3],
    pub normal: [f64; 3],
}

impl Plane {
    /// Named plane shifted by `offset` along its normal.
    pub fn named(name: PlaneName, offset: f64) -> Self {
        let (x_dir, normal) = name.frame();
        Self {
            origin: scale(normal, offset),
            x_dir,
            normal,
        }
    }

    /// Local y direction, `normal × x_dir`.
    pub fn y_dir(&self) -> [f64; 3] {
        cross(self.normal, self.x_dir)
    }

    /// Map local `(u, v)` plane coordinates to world space.
    pub fn to_world(&self, uv: [f64; 2]) -> [f64; 3] {
        let y_dir = self.y_dir();
        [
            self.origin[0] + self.x_dir[0] * uv[0] + y_dir[0] * uv[1],
            self.origin[1] + self.x_dir[1] * uv[0] + y_dir[1] * uv[1],
            self.origin[2] + self.x_dir[2] * uv[0] + y_dir[2] * uv[1],
        ]
    }

    /// Signed distance from the plane along its normal.
    pub fn signed_distance(&self, p: [f64; 3]) -> f64 {
        dot(sub(p, self.origin), self.normal)
    }

    /// Whether `p` lies on the plane within `tolerance`.
    pub fn contains(&self, p: [f64; 3], tolerance: f64) -> bool {
        self.signed_distance(p).abs() <= tolerance
    }
}

pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub fn scale(a: [f64; 3], s: f64) -> [f64; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}
