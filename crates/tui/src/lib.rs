//! # Pincode TUI Library
//!
//! A segmented pin code input for ratatui applications: a row of fixed-size
//! cells, one per character of a fixed-length code, with focus highlight,
//! placeholder and masking support, drawn over an invisible capture surface
//! that receives the keyboard input.
//!
//! ## Architecture
//!
//! - [`PinCodeState`] is the controller. It mirrors the caller-owned value,
//!   turns terminal events into [`PinEvent`]s and owns the reveal timer.
//! - [`PinCode`] is the stateful widget that draws the cells.
//! - [`run`] hosts the widget in a full-screen demo.

mod app;
pub mod ui;

use anyhow::Result;

pub use pincode_types::{KeyboardType, PinEvent, PinSettings};
pub use ui::components::pin_code::{
    CaptureOptions, CellStyle, Content, PinCode, PinCodeProps, PinCodeState, PinHandlers, PinStyles, render_pin_code,
};

/// Runs the interactive demo until the user quits or submits a full code.
///
/// # Errors
///
/// Returns an error when the terminal cannot be put into (or restored from)
/// raw mode and the alternate screen.
pub async fn run(props: PinCodeProps) -> Result<Option<String>> {
    ui::runtime::run_app(props).await
}
