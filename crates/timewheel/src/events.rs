use crate::picker::{PointerId, RangeDescriptor};
use clockface::geometry::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    DragStart {
        position: Point,
        target: Option<PointerId>,
    },
    DragMove(Point),
    DragEnd,
    SetStep(f64),
    SetValue(Vec<RangeDescriptor>),
    Print,
    ConfigReload,
    Quit,
}
