//! Segmented pin code input.
//!
//! A row of fixed-size cells, one per character of a fixed-length code, drawn
//! over an invisible capture surface that receives the actual keyboard input.
//! The code itself is owned by the caller; see [`PinCodeState`] for the
//! controlled-value contract.

mod capture;
mod cell;
mod content;
mod handlers;
mod reveal;
mod state;
mod style;
mod widget;

pub use capture::{CaptureOptions, CaptureProps, CaptureSignal, CaptureSurface};
pub use cell::{CellContent, CellView, derive_cells};
pub use content::Content;
pub use handlers::PinHandlers;
pub use reveal::RevealTimer;
pub use state::{PinCodeProps, PinCodeState, filter_digits};
pub use style::{CellStyle, PinStyles};
pub use widget::{PinCode, render_pin_code};
