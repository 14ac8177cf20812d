//! Face rendering for the StudyBuddy dock
//!
//! This crate provides:
//! - `FaceCanvas` trait with the handful of primitives the face needs
//! - A blanket `FaceCanvas` implementation for every RGB565
//!   `embedded-graphics` `DrawTarget`
//! - `render` and `FaceDisplay`, which paint a `FaceRenderState`
//!
//! # Architecture
//!
//! Layout lives in `studybuddy-core` and is pure arithmetic. This crate
//! turns a laid-out face into drawing calls. The panel driver (GC9A01 on
//! the reference board) only has to be a `DrawTarget`; its errors pass
//! through `FaceDisplay::draw` untouched.

#![no_std]

#[cfg(test)]
extern crate std;

pub mod backend;
pub mod color;
pub mod face;

// Re-export key types
pub use backend::{FaceCanvas, TextStyle};
pub use color::{color565, rgb565};
pub use face::{render, FaceDisplay};
