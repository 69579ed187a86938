pub mod clock;
pub mod geometry;
pub mod macros;
