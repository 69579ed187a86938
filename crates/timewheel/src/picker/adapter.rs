use crate::error::PickerError;
use crate::picker::controller::{RangeSet, RangeSpec};
use crate::picker::pointer::{Pointer, PointerId};
use crate::picker::{DEFAULT_RANGE_COLOR, EXTRA_POINTER_RADIUS, STEP_OF_MOVING};
use clockface::clock::{self, ClockMode};
use clockface::geometry::{CENTER, Point};
use palette::Srgb;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A range as the host sees it: clock text in the configured mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeDescriptor {
    #[serde(alias = "start_time", alias = "starttime")]
    pub start_time: String,
    #[serde(alias = "end_time", alias = "endtime")]
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RangeDescriptor {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickerOptions {
    pub step: f64,
    pub detection_radius: f64,
    pub mode: ClockMode,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            step: STEP_OF_MOVING,
            detection_radius: EXTRA_POINTER_RADIUS,
            mode: ClockMode::default(),
        }
    }
}

/// Where the 180x180 view box sits on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub origin: Point,
    pub scale: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            origin: Point::default(),
            scale: 1.0,
        }
    }
}

impl Surface {
    pub fn new(origin: Point, scale: f64) -> Self {
        Self { origin, scale }
    }

    pub fn to_screen(&self, point: Point) -> Point {
        Point::new(
            self.origin.x + point.x * self.scale,
            self.origin.y + point.y * self.scale,
        )
    }

    pub fn center(&self) -> Point {
        self.to_screen(CENTER)
    }
}

/// A pointer-down as delivered by the host: where it happened and, if the
/// host hit-tested a pointer element itself, which one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Point,
    pub target: Option<PointerId>,
}

/// Closest pointer to `position` by Manhattan distance on screen, if any is
/// strictly within `radius`.
pub fn nearest_pointer<H>(
    pointers: &[Pointer<H>],
    surface: &Surface,
    position: Point,
    radius: f64,
) -> Option<PointerId> {
    pointers
        .iter()
        .map(|p| {
            let screen = surface.to_screen(p.coordinate().point());
            (p.id(), screen.manhattan_distance(position))
        })
        .filter(|(_, distance)| *distance < radius)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}

/// Resolves which pointer a drag-start grabs: the hit-tested one if it
/// exists, else the nearest within `radius`.
pub fn resolve_target<H>(
    ranges: &RangeSet<H>,
    surface: &Surface,
    event: &PointerEvent,
    radius: f64,
) -> Option<PointerId> {
    event
        .target
        .and_then(|id| ranges.find_pointer(id))
        .map(Pointer::id)
        .or_else(|| nearest_pointer(ranges.pointers(), surface, event.position, radius))
}

fn parse_color(index: usize, text: &str) -> Result<Srgb<u8>, PickerError> {
    Srgb::<u8>::from_str(text.trim()).map_err(|_| PickerError::Color {
        index,
        color: text.to_string(),
    })
}

pub fn parse_value(
    value: &[RangeDescriptor],
    mode: ClockMode,
) -> Result<Vec<RangeSpec>, PickerError> {
    let (r, g, b) = DEFAULT_RANGE_COLOR;

    value
        .iter()
        .enumerate()
        .map(|(index, descriptor)| -> Result<RangeSpec, PickerError> {
            let time = |text: &str| {
                clock::parse_time(text, mode).map_err(|source| PickerError::Time { index, source })
            };
            let color = match &descriptor.color {
                Some(text) => parse_color(index, text)?,
                None => Srgb::<u8>::new(r, g, b),
            };
            Ok(RangeSpec {
                start: time(&descriptor.start_time)?,
                end: time(&descriptor.end_time)?,
                color,
            })
        })
        .collect()
}

/// The widget-facing side of the engine: turns pointer events into range
/// set calls and range state back into clock text.
#[derive(Debug, Clone)]
pub struct Picker<H = ()> {
    ranges: RangeSet<H>,
    surface: Surface,
    options: PickerOptions,
}

impl<H> Picker<H> {
    pub fn new(value: &[RangeDescriptor], options: PickerOptions) -> Result<Self, PickerError> {
        let specs = parse_value(value, options.mode)?;
        log::debug!("Picker created with {} ranges", specs.len());
        Ok(Self {
            ranges: RangeSet::new(&specs, options.step),
            surface: Surface::default(),
            options,
        })
    }

    pub fn range_set(&self) -> &RangeSet<H> {
        &self.ranges
    }

    pub fn range_set_mut(&mut self) -> &mut RangeSet<H> {
        &mut self.ranges
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn set_surface(&mut self, surface: Surface) {
        self.surface = surface;
    }

    pub fn set_step(&mut self, step: f64) {
        self.options.step = step;
        self.ranges.set_quantization_step(step);
    }

    pub fn set_detection_radius(&mut self, radius: f64) {
        self.options.detection_radius = radius;
    }

    /// Changes how clock text is read and written. Existing ranges keep their
    /// times; only later `set_value` and `value` calls are affected.
    pub fn set_mode(&mut self, mode: ClockMode) {
        self.options.mode = mode;
    }

    /// Replaces the ranges from host text. Nothing changes if any entry fails
    /// to parse.
    pub fn set_value(&mut self, value: &[RangeDescriptor]) -> Result<(), PickerError> {
        let specs = parse_value(value, self.options.mode)?;
        self.ranges.replace_ranges(&specs);
        Ok(())
    }

    pub fn value(&self) -> Vec<RangeDescriptor> {
        let mode = self.options.mode;
        self.ranges
            .boundaries()
            .into_iter()
            .map(|(start, end)| {
                RangeDescriptor::new(clock::format_time(start, mode), clock::format_time(end, mode))
            })
            .collect()
    }

    pub fn drag_start(&mut self, event: PointerEvent) -> Option<PointerId> {
        let id = resolve_target(
            &self.ranges,
            &self.surface,
            &event,
            self.options.detection_radius,
        )?;

        let center = self.surface.center();
        self.ranges.set_reference_vector(center.x, center.y);
        self.ranges.start_move(id);
        log::debug!("Drag started on {}", id);
        Some(id)
    }

    pub fn drag_move(&mut self, position: Point) -> usize {
        self.ranges.move_active(position)
    }

    /// Ends the drag session. Returns the new value if anything was being
    /// dragged.
    pub fn drag_end(&mut self) -> Option<Vec<RangeDescriptor>> {
        if self.ranges.active_dragged_pointers().is_empty() {
            return None;
        }
        self.ranges.complete_move();
        let value = self.value();
        log::debug!("Drag completed: {:?}", value);
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn working_day() -> Vec<RangeDescriptor> {
        vec![
            RangeDescriptor::new("08:00", "17:00"),
            RangeDescriptor::new("17:00", "08:00"),
        ]
    }

    fn screen_of(picker: &Picker, time: f64) -> Point {
        let coordinate = clockface::geometry::coordinate_for_time(time, 0.0);
        picker.surface().to_screen(coordinate.point())
    }

    #[test]
    fn descriptors_use_camel_case() {
        let json = r##"[{"startTime":"08:00","endTime":"17:00","color":"#ff8800"}]"##;
        let value: Vec<RangeDescriptor> = serde_json::from_str(json).unwrap();
        assert_eq!(value[0].start_time, "08:00");
        assert_eq!(value[0].color.as_deref(), Some("#ff8800"));

        let out = serde_json::to_string(&RangeDescriptor::new("08:00", "17:00")).unwrap();
        assert_eq!(out, r#"{"startTime":"08:00","endTime":"17:00"}"#);
    }

    #[test]
    fn parses_colors_and_defaults() {
        let mut value = working_day();
        value[0].color = Some("#ff8800".to_string());
        let specs = parse_value(&value, ClockMode::TwentyFour).unwrap();
        assert_eq!(specs[0].color, Srgb::<u8>::new(255, 136, 0));
        assert_eq!(specs[1].color, Srgb::<u8>::new(128, 128, 128));
    }

    #[test]
    fn bad_entries_leave_picker_untouched() {
        let mut picker: Picker = Picker::new(&working_day(), PickerOptions::default()).unwrap();

        let broken = vec![
            RangeDescriptor::new("09:00", "10:00"),
            RangeDescriptor::new("ten", "08:00"),
        ];
        assert!(matches!(
            picker.set_value(&broken),
            Err(PickerError::Time { index: 1, .. })
        ));

        let mut colored = working_day();
        colored[1].color = Some("not-a-color".to_string());
        assert!(matches!(
            picker.set_value(&colored),
            Err(PickerError::Color { index: 1, .. })
        ));

        assert_eq!(picker.value(), working_day());
    }

    #[test]
    fn exact_target_wins_over_distance() {
        let mut picker: Picker = Picker::new(&working_day(), PickerOptions::default()).unwrap();
        let near_first = screen_of(&picker, 8.0);
        let event = PointerEvent {
            position: near_first,
            target: Some(PointerId::new(1)),
        };
        assert_eq!(picker.drag_start(event), Some(PointerId::new(1)));
    }

    #[test]
    fn falls_back_to_nearest_pointer() {
        let mut picker: Picker = Picker::new(&working_day(), PickerOptions::default()).unwrap();
        let near = screen_of(&picker, 17.0);
        let event = PointerEvent {
            position: Point::new(near.x + 3.0, near.y - 2.0),
            target: Some(PointerId::new(9)),
        };
        assert_eq!(picker.drag_start(event), Some(PointerId::new(1)));
        assert_eq!(picker.range_set().active_dragged_pointers().len(), 1);
    }

    #[test]
    fn misses_start_nothing() {
        let mut picker: Picker = Picker::new(&working_day(), PickerOptions::default()).unwrap();
        picker.set_detection_radius(5.0);
        let event = PointerEvent {
            position: Point::new(-500.0, -500.0),
            target: None,
        };
        assert_eq!(picker.drag_start(event), None);
        assert!(picker.range_set().session().reference.is_none());
        assert_eq!(picker.drag_end(), None);
    }

    #[test]
    fn nearest_breaks_ties_by_distance() {
        let picker: Picker = Picker::new(
            &[
                RangeDescriptor::new("00:00", "00:30"),
                RangeDescriptor::new("00:30", "00:00"),
            ],
            PickerOptions::default(),
        )
        .unwrap();
        let second = screen_of(&picker, 0.5);
        let found = nearest_pointer(
            picker.range_set().pointers(),
            picker.surface(),
            Point::new(second.x + 0.5, second.y),
            EXTRA_POINTER_RADIUS,
        );
        assert_eq!(found, Some(PointerId::new(1)));
    }

    #[test]
    fn scaled_surface_moves_center() {
        let surface = Surface::new(Point::new(100.0, 50.0), 2.0);
        assert_eq!(surface.center(), Point::new(280.0, 230.0));
    }

    #[test]
    fn full_drag_emits_twelve_hour_value() {
        let options = PickerOptions {
            mode: ClockMode::Twelve,
            ..PickerOptions::default()
        };
        let value = vec![
            RangeDescriptor::new("8:00 AM", "5:00 PM"),
            RangeDescriptor::new("5:00 PM", "8:00 AM"),
        ];
        let mut picker: Picker = Picker::new(&value, options).unwrap();
        picker.set_surface(Surface::new(Point::new(10.0, 20.0), 2.0));

        let start = screen_of(&picker, 8.0);
        assert_eq!(
            picker.drag_start(PointerEvent {
                position: start,
                target: None
            }),
            Some(PointerId::new(0))
        );

        let target = screen_of(&picker, 9.5);
        assert_eq!(picker.drag_move(target), 1);

        let emitted = picker.drag_end().unwrap();
        assert_eq!(
            emitted,
            vec![
                RangeDescriptor::new("9:30 AM", "5:00 PM"),
                RangeDescriptor::new("5:00 PM", "9:30 AM"),
            ]
        );
        assert!(picker.range_set().active_dragged_pointers().is_empty());
    }
}
