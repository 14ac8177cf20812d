//! Hardware driver implementations
//!
//! This crate provides the concrete sensor driver for the dock, written
//! against the traits in studybuddy-hal:
//!
//! - Ultrasonic distance sensor (HC-SR04)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod sensor;
