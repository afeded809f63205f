//! Timed power-up effects.

use super::types::PowerUpKind;

/// Remaining lifetime of an active effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectTimer {
    pub remaining_ms: u64,
}

/// One expiry timer per power-up kind. `None` means inactive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEffects {
    pub speed_boost: Option<EffectTimer>,
    pub shield: Option<EffectTimer>,
}

impl ActiveEffects {
    fn slot(&self, kind: PowerUpKind) -> &Option<EffectTimer> {
        match kind {
            PowerUpKind::SpeedBoost => &self.speed_boost,
            PowerUpKind::Shield => &self.shield,
        }
    }

    fn slot_mut(&mut self, kind: PowerUpKind) -> &mut Option<EffectTimer> {
        match kind {
            PowerUpKind::SpeedBoost => &mut self.speed_boost,
            PowerUpKind::Shield => &mut self.shield,
        }
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.slot(kind).is_some()
    }

    pub fn remaining_ms(&self, kind: PowerUpKind) -> Option<u64> {
        self.slot(kind).map(|timer| timer.remaining_ms)
    }

    /// Start `kind` for `duration_ms`. Re-activating an active effect restarts
    /// its timer; effects never stack.
    pub fn activate(&mut self, kind: PowerUpKind, duration_ms: u64) {
        *self.slot_mut(kind) = Some(EffectTimer {
            remaining_ms: duration_ms,
        });
    }

    /// Kinds currently active, in `PowerUpKind::ALL` order.
    pub fn active_kinds(&self) -> Vec<PowerUpKind> {
        PowerUpKind::ALL
            .into_iter()
            .filter(|kind| self.is_active(*kind))
            .collect()
    }

    /// Run the expiry timers forward. Returns the kinds that expired.
    pub fn advance(&mut self, dt_ms: u64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        for kind in PowerUpKind::ALL {
            let slot = self.slot_mut(kind);
            match slot.map(|timer| timer.remaining_ms) {
                Some(remaining_ms) if remaining_ms <= dt_ms => {
                    *slot = None;
                    expired.push(kind);
                }
                Some(remaining_ms) => {
                    *slot = Some(EffectTimer {
                        remaining_ms: remaining_ms - dt_ms,
                    });
                }
                None => {}
            }
        }
        expired
    }

    /// Cancel every effect.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_and_expire() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::Shield, 1000);
        assert!(effects.is_active(PowerUpKind::Shield));
        assert!(!effects.is_active(PowerUpKind::SpeedBoost));

        assert!(effects.advance(999).is_empty());
        assert_eq!(effects.remaining_ms(PowerUpKind::Shield), Some(1));

        assert_eq!(effects.advance(1), vec![PowerUpKind::Shield]);
        assert!(!effects.is_active(PowerUpKind::Shield));
    }

    #[test]
    fn test_reactivation_restarts_timer() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::SpeedBoost, 1000);
        effects.advance(800);
        effects.activate(PowerUpKind::SpeedBoost, 1000);
        assert_eq!(effects.remaining_ms(PowerUpKind::SpeedBoost), Some(1000));
    }

    #[test]
    fn test_independent_timers() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::SpeedBoost, 500);
        effects.activate(PowerUpKind::Shield, 2000);

        assert_eq!(effects.advance(600), vec![PowerUpKind::SpeedBoost]);
        assert_eq!(effects.active_kinds(), vec![PowerUpKind::Shield]);
    }

    #[test]
    fn test_clear_cancels_all() {
        let mut effects = ActiveEffects::default();
        effects.activate(PowerUpKind::SpeedBoost, 500);
        effects.activate(PowerUpKind::Shield, 500);
        effects.clear();
        assert!(effects.active_kinds().is_empty());
        assert!(effects.advance(1000).is_empty());
    }
}
