//! Vixen Control
//!
//! Turns a momentary push button wired to a single-board computer into a
//! play/stop toggle for a sequence on a Vixen show-control server.
//!
//! This library provides:
//! - Strict configuration loading
//! - A small HTTP client for the Vixen play API
//! - Rising-edge detection over a polled input pin
//! - The toggle controller loop and its shutdown plumbing

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

#![deny(unsafe_code)]
#![deny(unused_must_use)]

pub mod cli;
pub mod config;
pub mod controller;
pub mod input;
pub mod remote;
pub mod shutdown;
