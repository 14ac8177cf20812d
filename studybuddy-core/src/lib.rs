//! Board-agnostic core logic for the StudyBuddy phone dock
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Configuration type definitions and the `device.toml` parser
//! - Echo timing to distance conversion
//! - Three-sample median filter
//! - Presence decision against the configured threshold
//! - Face expression selection and layout

#![no_std]
#![deny(unsafe_code)]

// proptest expands to `::std` paths
#[cfg(test)]
extern crate std;

pub mod config;
pub mod face;
pub mod filter;
pub mod presence;
