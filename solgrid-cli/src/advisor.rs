pub mod dispatch;
pub mod sizing;
pub mod smoothing;
