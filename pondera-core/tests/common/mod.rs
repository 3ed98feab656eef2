//! Shared fixtures for pondera-core integration tests.

use pondera_core::Point;

/// Six points in three well-separated close pairs, with pair weights of 0.3.
///
/// A budget below 0.6 keeps the three pairs apart; a budget of 0.6 or more
/// lets the two nearest pairs coalesce further.
#[must_use]
pub fn sector_grid() -> Vec<Point> {
    vec![
        Point::new(1.0, 1.0, 0.1),
        Point::new(2.0, 2.0, 0.2),
        Point::new(10.0, 10.0, 0.1),
        Point::new(11.0, 11.0, 0.2),
        Point::new(20.0, 20.0, 0.1),
        Point::new(21.0, 21.0, 0.2),
    ]
}
