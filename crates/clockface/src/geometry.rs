use std::f64::consts::PI;

pub const CIRCLE_LENGTH: f64 = 360.0;
pub const HOURS_AMOUNT: f64 = 24.0;
pub const HALF_DAY: f64 = HOURS_AMOUNT / 2.0;
pub const ONE_HOUR_DEGREE: f64 = CIRCLE_LENGTH / HOURS_AMOUNT;
// one degree of arc per unit of circumference
pub const CIRCLE_RADIUS: f64 = CIRCLE_LENGTH / (2.0 * PI);
pub const VIEW_BOX_SIZE: f64 = 180.0;
pub const CENTER: Point = Point::new(VIEW_BOX_SIZE / 2.0, VIEW_BOX_SIZE / 2.0);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn manhattan_distance(self, other: Point) -> f64 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// A position on the clock circle together with the angle it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub degree: f64,
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Folds any hour value into `[0, 24)`, so `24.0` and `0.0` are the same time.
pub fn wrap_time(time: f64) -> f64 {
    time.rem_euclid(HOURS_AMOUNT)
}

/// Maps a time of day onto the circle, with 0:00 at the top. Result is in `(0, 360]`.
pub fn time_to_degree(time: f64) -> f64 {
    let degree = time * ONE_HOUR_DEGREE - 90.0;
    if degree <= 0.0 {
        CIRCLE_LENGTH + degree
    } else {
        degree
    }
}

/// Inverse of [`time_to_degree`]. Result is in `[0, 24)`.
pub fn degree_to_time(degree: f64) -> f64 {
    let time = (degree + 90.0) / ONE_HOUR_DEGREE;
    if time >= HOURS_AMOUNT {
        time - HOURS_AMOUNT
    } else {
        time
    }
}

pub fn coordinate_for_time(time: f64, radius_offset: f64) -> Coordinate {
    let degree = time_to_degree(time);
    let radius = CIRCLE_RADIUS + radius_offset;
    let radians = degree * PI / 180.0;
    Coordinate {
        degree,
        x: CENTER.x + radius * radians.cos(),
        y: CENTER.y + radius * radians.sin(),
    }
}

/// Hours swept going clockwise from `start` to `end`, in `[0, 24)`.
pub fn clockwise_hours(start: f64, end: f64) -> f64 {
    let diff = end - start;
    if diff < 0.0 { HOURS_AMOUNT + diff } else { diff }
}

/// Degrees swept going clockwise from `start` to `end`, in `[0, 360)`.
pub fn arc_sweep(start: f64, end: f64) -> f64 {
    (end - start).rem_euclid(CIRCLE_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn time_degree_round_trip() {
        for step in 0..(24 * 60) {
            let time = step as f64 / 60.0;
            let back = degree_to_time(time_to_degree(time));
            assert!((back - time).abs() < EPS, "{time} came back as {back}");
        }
    }

    #[test]
    fn degree_time_round_trip() {
        for step in 1..=720 {
            let degree = step as f64 / 2.0;
            let back = time_to_degree(degree_to_time(degree));
            assert!((back - degree).abs() < EPS, "{degree} came back as {back}");
        }
    }

    #[test]
    fn quarter_hours_land_on_axes() {
        assert_eq!(time_to_degree(0.0), 270.0);
        assert_eq!(time_to_degree(6.0), 360.0);
        assert_eq!(time_to_degree(12.0), 90.0);
        assert_eq!(time_to_degree(18.0), 180.0);
        assert_eq!(degree_to_time(270.0), 0.0);
    }

    #[test]
    fn midnight_wraps() {
        assert_eq!(time_to_degree(24.0), time_to_degree(0.0));
        assert_eq!(coordinate_for_time(24.0, 0.0), coordinate_for_time(0.0, 0.0));
        assert_eq!(wrap_time(24.0), 0.0);
        assert_eq!(wrap_time(-1.0), 23.0);
    }

    #[test]
    fn coordinates_follow_clock_face() {
        let top = coordinate_for_time(0.0, 0.0);
        assert!((top.x - CENTER.x).abs() < EPS);
        assert!((top.y - (CENTER.y - CIRCLE_RADIUS)).abs() < EPS);

        let right = coordinate_for_time(6.0, 0.0);
        assert!((right.x - (CENTER.x + CIRCLE_RADIUS)).abs() < EPS);
        assert!((right.y - CENTER.y).abs() < EPS);

        let inner = coordinate_for_time(12.0, -15.0);
        assert!((inner.point().distance(CENTER) - (CIRCLE_RADIUS - 15.0)).abs() < EPS);
    }

    #[test]
    fn clockwise_spans_wrap_through_midnight() {
        assert_eq!(clockwise_hours(22.0, 2.0), 4.0);
        assert_eq!(clockwise_hours(8.0, 17.0), 9.0);
        assert_eq!(clockwise_hours(5.0, 5.0), 0.0);
        assert_eq!(arc_sweep(350.0, 10.0), 20.0);
    }

    #[test]
    fn manhattan_distance_sums_axes() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, -2.0);
        assert_eq!(a.manhattan_distance(b), 7.0);
        assert_eq!(a.distance(b), 5.0);
    }
}
