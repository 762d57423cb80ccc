use serde::{Deserialize, Serialize};

use crate::plane::{Plane, PlaneName};
use crate::profile::Profile;

/// A 2D region built from closed profiles with boolean combinations.
///
/// Drawings are plain values: every operation returns a new drawing and
/// the kernel evaluates the tree when the drawing is swept into a solid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Drawing {
    Profile { profile: Profile },
    Fuse { a: Box<Drawing>, b: Box<Drawing> },
    Cut { base: Box<Drawing>, tool: Box<Drawing> },
}

impl From<Profile> for Drawing {
    fn from(profile: Profile) -> Self {
        Drawing::Profile { profile }
    }
}

impl Drawing {
    pub fn fuse(self, other: impl Into<Drawing>) -> Drawing {
        Drawing::Fuse {
            a: Box::new(self),
            b: Box::new(other.into()),
        }
    }

    pub fn cut(self, tool: impl Into<Drawing>) -> Drawing {
        Drawing::Cut {
            base: Box::new(self),
            tool: Box::new(tool.into()),
        }
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Drawing {
        match self {
            Drawing::Profile { profile } => Drawing::Profile {
                profile: profile.translated(dx, dy),
            },
            Drawing::Fuse { a, b } => Drawing::Fuse {
                a: Box::new(a.translate(dx, dy)),
                b: Box::new(b.translate(dx, dy)),
            },
            Drawing::Cut { base, tool } => Drawing::Cut {
                base: Box::new(base.translate(dx, dy)),
                tool: Box::new(tool.translate(dx, dy)),
            },
        }
    }

    /// Lift the drawing onto a named plane shifted by `offset` along its normal.
    pub fn sketch_on_plane(self, plane: PlaneName, offset: f64) -> Sketch {
        Sketch {
            drawing: self,
            plane: Plane::named(plane, offset),
        }
    }

    /// Profiles that add material, in drawing order.
    pub fn solid_profiles(&self) -> Vec<&Profile> {
        let mut out = Vec::new();
        self.collect_profiles(false, &mut out);
        out
    }

    /// Profiles that remove material, in drawing order.
    pub fn cutting_profiles(&self) -> Vec<&Profile> {
        let mut out = Vec::new();
        self.collect_profiles(true, &mut out);
        out
    }

    fn collect_profiles<'a>(&'a self, cutting: bool, out: &mut Vec<&'a Profile>) {
        match self {
            Drawing::Profile { profile } => {
                if !cutting {
                    out.push(profile)
                }
            }
            Drawing::Fuse { a, b } => {
                a.collect_profiles(cutting, out);
                b.collect_profiles(cutting, out);
            }
            Drawing::Cut { base, tool } => {
                base.collect_profiles(cutting, out);
                if cutting {
                    tool.collect_all(out);
                }
            }
        }
    }

    fn collect_all<'a>(&'a self, out: &mut Vec<&'a Profile>) {
        match self {
            Drawing::Profile { profile } => out.push(profile),
            Drawing::Fuse { a, b } => {
                a.collect_all(out);
                b.collect_all(out);
            }
            Drawing::Cut { base, tool } => {
                base.collect_all(out);
                tool.collect_all(out);
            }
        }
    }

    /// Bounding rectangle of the material-adding profiles.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let profiles = self.solid_profiles();
        if profiles.is_empty() {
            return None;
        }
        let mut min = [f64::INFINITY; 2];
        let mut max = [f64::NEG_INFINITY; 2];
        for (lo, hi) in profiles.iter().map(|p| p.bounds()) {
            for i in 0..2 {
                min[i] = min[i].min(lo[i]);
                max[i] = max[i].max(hi[i]);
            }
        }
        Some((min, max))
    }
}

/// Fuse a list of drawings left to right; `None` when the list is empty.
pub fn fuse_all(drawings: impl IntoIterator<Item = Drawing>) -> Option<Drawing> {
    drawings.into_iter().reduce(|acc, d| acc.fuse(d))
}

/// A drawing placed on a plane, ready to be extruded or revolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sketch {
    pub drawing: Drawing,
    pub plane: Plane,
}

impl Sketch {
    /// World-space position of a point given in plane coordinates.
    pub fn to_world(&self, uv: [f64; 2]) -> [f64; 3] {
        self.plane.to_world(uv)
    }
}
