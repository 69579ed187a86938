use clockface::geometry::{self, CIRCLE_LENGTH, CIRCLE_RADIUS, Coordinate, Point};
use derive_more::{Display, From, Into};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
#[display("point{_0}")]
pub struct PointerId(usize);

impl PointerId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid pointer id '{0}', expected e.g. point0")]
pub struct ParsePointerIdError(String);

impl FromStr for PointerId {
    type Err = ParsePointerIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix("point")
            .and_then(|index| index.parse().ok())
            .map(Self)
            .ok_or_else(|| ParsePointerIdError(s.to_string()))
    }
}

/// Vector from the circle center to angle zero (3 o'clock), in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceVector {
    pub center: Point,
    pub zero: Point,
    pub length: f64,
}

impl ReferenceVector {
    pub fn new(center: Point) -> Self {
        let zero = Point::new(CIRCLE_RADIUS, 0.0);
        Self {
            center,
            zero,
            length: zero.x.hypot(zero.y),
        }
    }

    /// Clockwise angle between angle zero and `cursor`, in `(0, 360)`.
    ///
    /// Returns `None` when the angle comes out as exactly zero or undefined,
    /// which is what happens when the cursor sits on the center.
    pub fn angle_to(&self, cursor: Point) -> Option<f64> {
        let (dx, dy) = (cursor.x - self.center.x, cursor.y - self.center.y);
        let dot = self.zero.x * dx + self.zero.y * dy;
        let cosine = (dot / (self.length * dx.hypot(dy))).clamp(-1.0, 1.0);
        let angle = cosine.acos().to_degrees();

        if !angle.is_finite() || angle == 0.0 {
            return None;
        }

        // acos only covers the lower half; screen y grows downwards
        if cursor.y < self.center.y {
            Some(CIRCLE_LENGTH - angle)
        } else {
            Some(angle)
        }
    }
}

/// A pointer's request to be moved to a raw (unquantized) angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerMove {
    pub id: PointerId,
    pub degree: f64,
}

/// A draggable range boundary. `H` is whatever the host wants to keep per
/// pointer (an element handle, a key) across rebuilds.
#[derive(Debug, Clone)]
pub struct Pointer<H = ()> {
    id: PointerId,
    time: f64,
    coordinate: Coordinate,
    active: bool,
    disabled: bool,
    handle: Option<H>,
}

impl<H> Pointer<H> {
    pub fn new(id: PointerId, time: f64) -> Self {
        let time = geometry::wrap_time(time);
        Self {
            id,
            time,
            coordinate: geometry::coordinate_for_time(time, 0.0),
            active: false,
            disabled: false,
            handle: None,
        }
    }

    pub fn id(&self) -> PointerId {
        self.id
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn start_move(&mut self) {
        self.active = true;
    }

    pub fn complete_move(&mut self) {
        self.active = false;
    }

    /// Works out where a drag to `cursor` wants this pointer to go. The
    /// pointer itself is left untouched; the owning range set applies the move.
    pub fn drag_to(&self, reference: &ReferenceVector, cursor: Point) -> Option<PointerMove> {
        if self.disabled || !self.active {
            return None;
        }
        reference.angle_to(cursor).map(|degree| PointerMove {
            id: self.id,
            degree,
        })
    }

    pub(crate) fn place(&mut self, time: f64, coordinate: Coordinate) {
        self.time = time;
        self.coordinate = coordinate;
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn attach(&mut self, handle: H) {
        self.handle = Some(handle);
    }

    pub fn take_handle(&mut self) -> Option<H> {
        self.handle.take()
    }
}
