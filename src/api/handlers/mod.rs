pub mod availability;
pub mod booking;
pub mod business;
pub mod health;
pub mod lifecycle;
pub mod service;
