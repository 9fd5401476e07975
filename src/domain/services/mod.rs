pub mod availability;
pub mod hours;
pub mod interval;
pub mod lifecycle;
pub mod scheduler;
