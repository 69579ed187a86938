use crate::picker::pointer::{Pointer, PointerId};
use clockface::geometry::{self, Coordinate, HALF_DAY, HOURS_AMOUNT};
use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgb;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct ArcName(String);

clockface::impl_string_newtype!(ArcName);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct RangeName(String);

clockface::impl_string_newtype!(RangeName);

/// A renderable piece of a range. Never wider than half the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub name: ArcName,
    pub start: Coordinate,
    pub end: Coordinate,
}

impl Arc {
    pub fn sweep(&self) -> f64 {
        geometry::arc_sweep(self.start.degree, self.end.degree)
    }
}

#[derive(Debug, Clone)]
pub struct Range {
    name: RangeName,
    start: PointerId,
    end: PointerId,
    color: Srgb<u8>,
    arcs: Vec<Arc>,
}

impl Range {
    pub fn new<H>(start: &Pointer<H>, end: &Pointer<H>, color: Srgb<u8>) -> Self {
        Self {
            name: RangeName::new(format!("{}-{}-range", start.id(), end.id())),
            start: start.id(),
            end: end.id(),
            color,
            arcs: create_arcs(start, end),
        }
    }

    pub fn name(&self) -> &RangeName {
        &self.name
    }

    pub fn start(&self) -> PointerId {
        self.start
    }

    pub fn end(&self) -> PointerId {
        self.end
    }

    pub fn color(&self) -> Srgb<u8> {
        self.color
    }

    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    pub(crate) fn refresh<H>(&mut self, start: &Pointer<H>, end: &Pointer<H>) {
        self.arcs = create_arcs(start, end);
    }
}

/// Builds the arcs for the clockwise sweep from `start` to `end`.
///
/// Anything wider than 12 hours can't be drawn as a single circular arc
/// without the renderer guessing major vs minor, so it is split at the time
/// opposite `start`.
pub fn create_arcs<H>(start: &Pointer<H>, end: &Pointer<H>) -> Vec<Arc> {
    let diff = geometry::clockwise_hours(start.time(), end.time());

    if diff <= HALF_DAY {
        return vec![Arc {
            name: ArcName::new(format!("{}-{}-arc", start.time(), end.time())),
            start: start.coordinate(),
            end: end.coordinate(),
        }];
    }

    let mut border_time = start.time() + HALF_DAY;
    if border_time >= HOURS_AMOUNT {
        border_time -= HOURS_AMOUNT;
    }
    let border = geometry::coordinate_for_time(border_time, 0.0);

    vec![
        Arc {
            name: ArcName::new(format!("{}-arc", start.id())),
            start: start.coordinate(),
            end: border,
        },
        Arc {
            name: ArcName::new(format!("{}-arc", end.id())),
            start: border,
            end: end.coordinate(),
        },
    ]
}
