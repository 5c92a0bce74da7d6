pub mod analytics;
pub mod breaks;
pub mod calculator;
pub mod clock;
pub mod log;
pub mod projects;
pub mod session;
pub mod store;
pub mod ticker;
pub mod timer;
