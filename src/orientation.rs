//! Orientation classification from a 3-axis accelerometer.
//!
//! At rest the gravity vector dominates one axis; that axis and its sign
//! name which face of the enclosure points up.  The tracker reports a
//! face only when it differs from the last reported one, so a node lying
//! still produces exactly one report no matter how often it is polled.
//!
//! Single-sample decision, no temporal smoothing.  A sample where no
//! axis reaches the confidence floor (free-fall, a 45 degree balance
//! point) classifies as [`Face::Unknown`] rather than guessing.

use log::debug;

/// Acceleration sample in g.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Which face of the enclosure points up.
///
/// The uplink carries these as integer codes: 0 for unknown, 1..=6 for
/// the six faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Unknown,
    /// +Z dominant.
    FlatUp,
    /// -Z dominant.
    FlatDown,
    /// +X dominant.
    TiltForward,
    /// -X dominant.
    TiltBack,
    /// +Y dominant.
    TiltLeft,
    /// -Y dominant.
    TiltRight,
}

impl Face {
    /// Integer code carried in reports.
    pub fn code(self) -> u8 {
        match self {
            Self::Unknown => 0,
            Self::FlatUp => 1,
            Self::FlatDown => 2,
            Self::TiltForward => 3,
            Self::TiltBack => 4,
            Self::TiltLeft => 5,
            Self::TiltRight => 6,
        }
    }
}

/// Classify one sample.
///
/// The dominant axis is the one with the largest absolute component;
/// ties resolve in X, Y, Z order so the result is deterministic.  Any
/// non-finite component or a dominant magnitude below `min_g` yields
/// [`Face::Unknown`].
pub fn classify(v: Vector3, min_g: f32) -> Face {
    if !v.is_finite() {
        return Face::Unknown;
    }
    let (ax, ay, az) = (v.x.abs(), v.y.abs(), v.z.abs());

    if ax >= ay && ax >= az {
        if ax < min_g {
            Face::Unknown
        } else if v.x > 0.0 {
            Face::TiltForward
        } else {
            Face::TiltBack
        }
    } else if ay >= az {
        if ay < min_g {
            Face::Unknown
        } else if v.y > 0.0 {
            Face::TiltLeft
        } else {
            Face::TiltRight
        }
    } else if az < min_g {
        Face::Unknown
    } else if v.z > 0.0 {
        Face::FlatUp
    } else {
        Face::FlatDown
    }
}

/// Report-on-change wrapper around [`classify`].
pub struct OrientationTracker {
    min_g: f32,
    last_reported: Face,
}

impl OrientationTracker {
    /// `min_g` is the dominant-axis magnitude below which a sample is
    /// too ambiguous to name a face.
    pub fn new(min_g: f32) -> Self {
        Self {
            min_g,
            last_reported: Face::Unknown,
        }
    }

    /// Feed a sample.  `Some(face)` only when the classification differs
    /// from the last reported face; starting state is `Unknown`, so the
    /// first confident sample always reports.
    pub fn update(&mut self, v: Vector3) -> Option<Face> {
        let face = classify(v, self.min_g);
        if face == self.last_reported {
            return None;
        }
        debug!("orientation: {:?} -> {:?}", self.last_reported, face);
        self.last_reported = face;
        Some(face)
    }

    /// Last reported face.
    pub fn current(&self) -> Face {
        self.last_reported
    }
}
