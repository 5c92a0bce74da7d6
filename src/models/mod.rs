pub mod break_settings;
pub mod entry;
pub mod project;
pub mod session;
