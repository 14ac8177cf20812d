//! Embassy async tasks

pub mod presence;

pub use presence::{presence_task, DockDisplay, DockSensor};
