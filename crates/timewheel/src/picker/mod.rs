pub mod adapter;
pub mod controller;
pub mod pointer;
pub mod range;

pub use adapter::{Picker, PickerOptions, PointerEvent, RangeDescriptor, Surface};
pub use controller::{DragSession, RangeSet, RangeSpec};
pub use pointer::{Pointer, PointerId, PointerMove, ReferenceVector};
pub use range::{Arc, ArcName, Range, RangeName};

pub const STEP_OF_MOVING: f64 = 0.5; // hours per drag step
pub const EXTRA_POINTER_RADIUS: f64 = 70.0; // nearest-pointer fallback distance
pub const DEFAULT_RANGE_COLOR: (u8, u8, u8) = (128, 128, 128);
