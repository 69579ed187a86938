use crate::picker::STEP_OF_MOVING;
use crate::picker::pointer::{Pointer, PointerId, ReferenceVector};
use crate::picker::range::Range;
use clockface::geometry::{self, CIRCLE_LENGTH, ONE_HOUR_DEGREE, Point};
use palette::Srgb;

/// One entry of the input value, already parsed into hours.
///
/// Only `start` places a pointer; a range ends where the next one starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    pub start: f64,
    pub end: f64,
    pub color: Srgb<u8>,
}

/// Per-instance drag state shared by every pointer of one range set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub step: f64,
    pub reference: Option<ReferenceVector>,
}

impl DragSession {
    pub fn new(step: f64) -> Self {
        Self {
            step,
            reference: None,
        }
    }
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new(STEP_OF_MOVING)
    }
}

/// Snaps `degree` onto the grid of `step` hours, rounding up only when past
/// the half-step.
pub fn quantize_degree(degree: f64, step: f64) -> f64 {
    let step_degree = ONE_HOUR_DEGREE * step;
    if !(step_degree.is_finite() && step_degree > 0.0) {
        return degree;
    }

    let remainder = degree % step_degree;
    let floor = degree - remainder;
    if remainder > step_degree / 2.0 {
        floor + step_degree
    } else {
        floor
    }
}

/// Whether `moving` lies strictly inside the clockwise window from `back` to
/// `forward`.
pub fn is_moving_allowed(moving: f64, back: f64, forward: f64) -> bool {
    if forward >= back {
        moving > back && moving < forward
    } else {
        // window wraps through midnight
        moving < forward || moving > back
    }
}

/// Pointers and ranges laid out as a single cycle: range `i` runs from
/// pointer `i` to pointer `(i + 1) % n`, so neighbouring ranges share a
/// pointer.
#[derive(Debug, Clone)]
pub struct RangeSet<H = ()> {
    pointers: Vec<Pointer<H>>,
    ranges: Vec<Range>,
    session: DragSession,
}

impl<H> RangeSet<H> {
    pub fn new(specs: &[RangeSpec], step: f64) -> Self {
        let pointers: Vec<Pointer<H>> = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| Pointer::new(PointerId::new(i), spec.start))
            .collect();

        let ranges = specs
            .iter()
            .enumerate()
            .map(|(i, spec)| {
                let end = &pointers[(i + 1) % pointers.len()];
                Range::new(&pointers[i], end, spec.color)
            })
            .collect();

        Self {
            pointers,
            ranges,
            session: DragSession::new(step),
        }
    }

    /// Rebuilds from a new value. Host handles carry over pointer by pointer
    /// as long as the number of ranges stays the same.
    pub fn replace_ranges(&mut self, specs: &[RangeSpec]) {
        let mut rebuilt = Self::new(specs, self.session.step);

        if rebuilt.pointers.len() == self.pointers.len() {
            for (new, old) in rebuilt.pointers.iter_mut().zip(self.pointers.iter_mut()) {
                if let Some(handle) = old.take_handle() {
                    new.attach(handle);
                }
            }
        } else {
            log::debug!(
                "Range count changed from {} to {}, pointer identities rebuilt",
                self.pointers.len(),
                rebuilt.pointers.len()
            );
        }

        *self = rebuilt;
    }

    pub fn pointers(&self) -> &[Pointer<H>] {
        &self.pointers
    }

    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    pub fn set_quantization_step(&mut self, step: f64) {
        self.session.step = step;
    }

    pub fn set_reference_vector(&mut self, center_x: f64, center_y: f64) {
        self.session.reference = Some(ReferenceVector::new(Point::new(center_x, center_y)));
    }

    pub fn find_pointer(&self, id: PointerId) -> Option<&Pointer<H>> {
        self.pointers.get(id.index()).filter(|p| p.id() == id)
    }

    fn find_pointer_mut(&mut self, id: PointerId) -> Option<&mut Pointer<H>> {
        self.pointers.get_mut(id.index()).filter(|p| p.id() == id)
    }

    pub fn attach(&mut self, id: PointerId, handle: H) -> bool {
        self.find_pointer_mut(id)
            .map(|pointer| pointer.attach(handle))
            .is_some()
    }

    pub fn start_move(&mut self, id: PointerId) -> bool {
        self.find_pointer_mut(id)
            .map(Pointer::start_move)
            .is_some()
    }

    pub fn active_dragged_pointers(&self) -> Vec<&Pointer<H>> {
        self.pointers.iter().filter(|p| p.is_active()).collect()
    }

    /// Start and end time of every range, in range order.
    pub fn boundaries(&self) -> Vec<(f64, f64)> {
        self.ranges
            .iter()
            .map(|range| {
                (
                    self.pointers[range.start().index()].time(),
                    self.pointers[range.end().index()].time(),
                )
            })
            .collect()
    }

    /// Quantizes `raw_degree` and moves the pointer there unless that would
    /// touch or cross a neighbouring boundary. Any finite degree is accepted
    /// and taken modulo a full turn. Returns whether it moved.
    pub fn handle_pointer_move(&mut self, id: PointerId, raw_degree: f64) -> bool {
        if !raw_degree.is_finite() || self.find_pointer(id).is_none() {
            return false;
        }

        let count = self.pointers.len();
        let index = id.index();
        let degree = quantize_degree(raw_degree.rem_euclid(CIRCLE_LENGTH), self.session.step);
        let time = geometry::degree_to_time(degree);
        let coordinate = geometry::coordinate_for_time(time, 0.0);

        // `index` is the range this pointer starts, `previous` the one it ends
        let previous = (index + count - 1) % count;

        // with two pointers each one is both neighbours of the other
        if count > 2 {
            let back = self.pointers[previous].time();
            let forward = self.pointers[(index + 1) % count].time();
            if !is_moving_allowed(time, back, forward) {
                log::trace!(
                    "Rejected {} -> {} (window {} .. {})",
                    id,
                    time,
                    back,
                    forward
                );
                return false;
            }
        }

        self.pointers[index].place(time, coordinate);
        self.refresh_range(index);
        self.refresh_range(previous);
        true
    }

    fn refresh_range(&mut self, index: usize) {
        let count = self.pointers.len();
        let start = &self.pointers[index];
        let end = &self.pointers[(index + 1) % count];
        self.ranges[index].refresh(start, end);
    }

    /// Drags one pointer towards a screen position.
    pub fn move_pointer(&mut self, id: PointerId, cursor: Point) -> bool {
        let Some(reference) = self.session.reference else {
            log::warn!("{} moved before a reference vector was set", id);
            return false;
        };

        let request = self
            .find_pointer(id)
            .and_then(|pointer| pointer.drag_to(&reference, cursor));

        request.is_some_and(|request| self.handle_pointer_move(request.id, request.degree))
    }

    /// Drags every active pointer towards `cursor`; returns how many moved.
    pub fn move_active(&mut self, cursor: Point) -> usize {
        let active: Vec<PointerId> = self
            .pointers
            .iter()
            .filter(|p| p.is_active())
            .map(Pointer::id)
            .collect();

        active
            .into_iter()
            .filter(|&id| self.move_pointer(id, cursor))
            .count()
    }

    pub fn complete_move(&mut self) {
        self.pointers
            .iter_mut()
            .filter(|p| p.is_active())
            .for_each(Pointer::complete_move);
    }
}
