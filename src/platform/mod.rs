//! Platform abstraction layer
//!
//! The session never reaches into device singletons. Hosts hand it an
//! [`InputSource`] at construction instead.

pub mod input;

pub use input::{InputSource, TiltInput};
