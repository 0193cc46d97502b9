//! TUI widgets

pub mod details;
pub mod help;
pub mod loading;
pub mod metrics;
pub mod tabs;
