pub mod action;
pub mod app;
pub mod config;
pub mod event;
pub mod format;
pub mod logging;
pub mod record;
pub mod scheduler;
pub mod system;
pub mod ui;
