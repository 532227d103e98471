//! Common test utilities and helpers
//!
//! Fixture trees on disk and stand-in collaborators for the scanner.

#![allow(dead_code)]

pub mod fakes;
pub mod fixtures;
