pub mod booking;
pub mod business;
pub mod service;
pub mod slot;
