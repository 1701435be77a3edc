//! Core types, constants and angle primitives shared by every conversion

pub mod angles;
pub mod constants;
pub mod types;

pub use angles::*;
pub use constants::*;
pub use types::*;
