//! Ship health and the health-bar presentation derived from it

use serde::{Deserialize, Serialize};

/// Health bar color tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorBand {
    Safe,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthModel {
    max_health: u32,
    current_health: u32,
    warning_threshold: f32,
    critical_threshold: f32,
    /// Set once health hits zero; cleared by reset
    depleted: bool,
}

impl HealthModel {
    pub fn new(max_health: u32, warning_threshold: f32, critical_threshold: f32) -> Self {
        Self {
            max_health,
            current_health: max_health,
            warning_threshold,
            critical_threshold,
            depleted: false,
        }
    }

    pub fn reset(&mut self) {
        self.current_health = self.max_health;
        self.depleted = false;
    }

    /// Subtract `amount`, saturating at zero.
    /// Returns true only on the first call that brings health to zero since the last reset.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        self.current_health = self.current_health.saturating_sub(amount);
        if self.current_health == 0 && !self.depleted {
            self.depleted = true;
            return true;
        }
        false
    }

    pub fn current(&self) -> u32 {
        self.current_health
    }

    pub fn max(&self) -> u32 {
        self.max_health
    }

    pub fn is_depleted(&self) -> bool {
        self.current_health == 0
    }

    /// Current over max, used as the bar's horizontal scale
    pub fn percentage(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.current_health as f32 / self.max_health as f32
    }

    pub fn color_band(&self) -> ColorBand {
        let pct = self.percentage();
        if pct > self.warning_threshold {
            ColorBand::Safe
        } else if pct > self.critical_threshold {
            ColorBand::Warning
        } else {
            ColorBand::Critical
        }
    }
}
