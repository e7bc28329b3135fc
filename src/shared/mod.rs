pub mod clock;
pub mod config;
pub mod datetime;
pub mod field_path;
