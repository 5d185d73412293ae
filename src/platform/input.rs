//! Continuous steering input

use std::cell::Cell;
use std::rc::Rc;

/// Supplies the lateral steering value (e.g. device roll in radians).
/// Sampled once per playing tick.
pub trait InputSource {
    fn velocity(&mut self) -> f32;
}

/// No input: the ship holds its lane
impl InputSource for () {
    fn velocity(&mut self) -> f32 {
        0.0
    }
}

/// Shared tilt value written by the host's motion callback.
///
/// Clones share the same cell; the host keeps one handle and the session
/// owns another.
#[derive(Debug, Clone, Default)]
pub struct TiltInput {
    roll: Rc<Cell<f32>>,
}

impl TiltInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the latest roll reading. Non-finite readings are treated as level.
    pub fn set(&self, roll: f32) {
        self.roll.set(if roll.is_finite() { roll } else { 0.0 });
    }

    pub fn get(&self) -> f32 {
        self.roll.get()
    }
}

impl InputSource for TiltInput {
    fn velocity(&mut self) -> f32 {
        self.roll.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_share_value() {
        let host = TiltInput::new();
        let mut session_side = host.clone();
        host.set(0.4);
        assert_eq!(session_side.velocity(), 0.4);
        host.set(f32::NAN);
        assert_eq!(session_side.velocity(), 0.0);
    }
}
