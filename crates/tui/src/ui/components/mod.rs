//! UI components.

pub mod pin_code;

pub use pin_code::{PinCode, PinCodeProps, PinCodeState};
