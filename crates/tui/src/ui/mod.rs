//! UI rendering module for the pin code demo.
//!
//! `components` holds the reusable pin code widget; `main` draws the demo
//! screen around it and `runtime` drives the terminal event loop.

pub mod components;
pub mod main;
pub mod runtime;
