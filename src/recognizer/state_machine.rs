use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::label::GestureLabel;

/// Streak progress only. Cooldown windows are kept per label beside this
/// state, so right after an emission it reads `Accumulating { count: 0 }`;
/// ask [`StateMachine::cooldown_active`] or
/// [`StateMachine::label_cooling_down`] for the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    Idle,
    Accumulating { label: GestureLabel, count: u32 },
}

impl ConfirmationState {
    pub fn new() -> Self {
        ConfirmationState::Idle
    }

    pub fn label(&self) -> Option<GestureLabel> {
        match self {
            ConfirmationState::Idle => None,
            ConfirmationState::Accumulating { label, .. } => Some(*label),
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            ConfirmationState::Idle => 0,
            ConfirmationState::Accumulating { count, .. } => *count,
        }
    }
}

impl Default for ConfirmationState {
    fn default() -> Self {
        Self::new()
    }
}

/// What an elapsed cooldown window does to a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CooldownPolicy {
    /// Never blocks. Once the window has passed, the next frame carrying the
    /// cooled-down label restarts its streak from zero.
    Soft,
    /// A label cannot be emitted again while its own window is open; reaching
    /// the threshold inside the window restarts the streak instead.
    #[default]
    Blocking,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    pub required_consecutive: u32,
    pub cooldown_ms: u64,
    pub cooldown_policy: CooldownPolicy,
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            required_consecutive: 5,
            cooldown_ms: 1500,
            cooldown_policy: CooldownPolicy::default(),
        }
    }
}

impl ConfirmationConfig {
    pub fn for_fast_signing() -> Self {
        Self {
            required_consecutive: 3,
            cooldown_ms: 1000,
            ..Default::default()
        }
    }

    pub fn for_deliberate_signing() -> Self {
        Self {
            required_consecutive: 8,
            cooldown_ms: 2000,
            ..Default::default()
        }
    }

    fn threshold(&self) -> u32 {
        self.required_consecutive.max(1)
    }
}

/// Debounces per-frame classifications into confirmed emissions.
pub struct StateMachine {
    state: ConfirmationState,
    /// Cooldown expiry per emitted label, in frame timestamps.
    cooldowns: HashMap<GestureLabel, u64>,
    config: ConfirmationConfig,
    frame_counter: u64,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::with_config(ConfirmationConfig::default())
    }

    pub fn with_config(config: ConfirmationConfig) -> Self {
        Self {
            state: ConfirmationState::new(),
            cooldowns: HashMap::new(),
            config,
            frame_counter: 0,
        }
    }

    /// Feed one classification. Returns the label when this frame confirms it.
    pub fn process(
        &mut self,
        detected: Option<GestureLabel>,
        timestamp_ms: u64,
    ) -> Option<GestureLabel> {
        self.frame_counter += 1;

        let label = match detected {
            Some(label) => label,
            None => {
                self.state = ConfirmationState::Idle;
                self.cooldowns.retain(|_, expires| *expires > timestamp_ms);
                return None;
            }
        };

        let mut count = match self.state {
            ConfirmationState::Accumulating { label: current, count } if current == label => count,
            _ => 0,
        };

        // Deferred soft reset: the window ran out while this label kept
        // accumulating, so its streak starts over.
        let soft_reset_due = self.config.cooldown_policy == CooldownPolicy::Soft
            && count > 0
            && self
                .cooldowns
                .get(&label)
                .is_some_and(|expires| *expires <= timestamp_ms);
        if soft_reset_due {
            debug!("Cooldown elapsed for {:?}, restarting streak", label);
            count = 0;
        }
        self.cooldowns.retain(|_, expires| *expires > timestamp_ms);

        count += 1;

        if count < self.config.threshold() {
            self.state = ConfirmationState::Accumulating { label, count };
            return None;
        }

        self.state = ConfirmationState::Accumulating { label, count: 0 };

        if self.config.cooldown_policy == CooldownPolicy::Blocking
            && self.cooldowns.contains_key(&label)
        {
            debug!("Suppressed {:?}: still cooling down", label);
            return None;
        }

        self.cooldowns
            .insert(label, timestamp_ms.saturating_add(self.config.cooldown_ms));
        debug!("Confirmed {:?} at {}ms", label, timestamp_ms);
        Some(label)
    }

    pub fn current_state(&self) -> &ConfirmationState {
        &self.state
    }

    pub fn last_label(&self) -> Option<GestureLabel> {
        self.state.label()
    }

    pub fn consecutive_count(&self) -> u32 {
        self.state.count()
    }

    /// Whether any label is still inside its cooldown window at `timestamp_ms`.
    pub fn cooldown_active(&self, timestamp_ms: u64) -> bool {
        self.cooldowns.values().any(|expires| *expires > timestamp_ms)
    }

    pub fn label_cooling_down(&self, label: GestureLabel, timestamp_ms: u64) -> bool {
        self.cooldowns
            .get(&label)
            .is_some_and(|expires| *expires > timestamp_ms)
    }

    pub fn config(&self) -> &ConfirmationConfig {
        &self.config
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_counter
    }

    pub fn reset(&mut self) {
        self.state = ConfirmationState::new();
        self.cooldowns.clear();
        self.frame_counter = 0;
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
