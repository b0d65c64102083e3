/// Tracking wheel offset calibration
/// Turns in place and averages arc length over angle
pub mod calibration;
/// Bounded retry for drives that get blocked
pub mod recovery;
/// Leaf routines that call the utilities above
pub mod routines;
