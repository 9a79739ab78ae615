// Domain layer - pure analysis core, no I/O
pub mod analysis;
pub mod conclusion;
pub mod error;
pub mod forecast;
pub mod kpi;
pub mod reading;
pub mod sampling;
pub mod series;
