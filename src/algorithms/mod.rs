//! Conversion algorithms

pub mod aer;
pub mod ecef;
pub mod elementwise;
pub mod ellipsoid;
pub mod enu;
pub mod local_frame;

pub use ellipsoid::Ellipsoid;
pub use local_frame::LocalFrame;
