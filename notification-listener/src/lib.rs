#![deny(clippy::all, clippy::pedantic, clippy::nursery, dead_code)]

pub mod classifier;
pub mod listener;
pub mod types;
pub mod worker;

pub use listener::NotificationListener;
