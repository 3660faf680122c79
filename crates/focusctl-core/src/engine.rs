//! Focus mode activation state.
//!
//! State lives in the injected [`KvStore`] under two key families:
//!
//! ```text
//! focusMode.<identifier>.enabled       bool       per-mode flag
//! focusMode.<identifier>.activatedAt   timestamp  when the flag was set
//! com.apple.focus.enabled              bool       global focus flag
//! com.apple.focus.activeMode           string     most recently enabled mode
//! ```
//!
//! Enabling a mode makes it the active mode but leaves every other mode's
//! per-mode flag untouched, so several modes can report enabled at once.
//! Disabling a mode clears the global pair only when that mode is the
//! active one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::error::{FocusError, Result};
use crate::mode::FocusMode;
use crate::store::{KvStore, StoreOp, StoreValue};

pub const MODE_KEY_PREFIX: &str = "focusMode.";
pub const GLOBAL_ENABLED_KEY: &str = "com.apple.focus.enabled";
pub const ACTIVE_MODE_KEY: &str = "com.apple.focus.activeMode";

const EVENT_CAPACITY: usize = 64;

fn enabled_key(mode: FocusMode) -> String {
    format!("{MODE_KEY_PREFIX}{}.enabled", mode.identifier())
}

fn activated_at_key(mode: FocusMode) -> String {
    format!("{MODE_KEY_PREFIX}{}.activatedAt", mode.identifier())
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeActivation {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalFocusState {
    pub focus_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_mode_id: Option<String>,
}

impl GlobalFocusState {
    pub fn active_mode(&self) -> Option<FocusMode> {
        self.active_mode_id
            .as_deref()
            .and_then(FocusMode::from_identifier)
    }
}

/// Notification sent to subscribers after a successful `set_mode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeChange {
    pub mode: FocusMode,
    pub enabled: bool,
}

/// One row of `list_all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeStatus {
    pub mode: FocusMode,
    pub name: String,
    pub enabled: bool,
}

// ---------------------------------------------------------------------------
// FocusEngine
// ---------------------------------------------------------------------------

pub struct FocusEngine<S: KvStore> {
    store: S,
    events: broadcast::Sender<ModeChange>,
}

impl<S: KvStore> FocusEngine<S> {
    pub fn new(store: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { store, events }
    }

    /// Receive a `ModeChange` for every successful `set_mode` after this call.
    ///
    /// Delivery is best-effort: a receiver that falls more than 64 events
    /// behind loses the oldest ones.
    pub fn subscribe(&self) -> broadcast::Receiver<ModeChange> {
        self.events.subscribe()
    }

    /// Turn `mode` on or off, persist, then notify subscribers.
    pub fn set_mode(&self, mode: FocusMode, enabled: bool) -> Result<()> {
        let result = if enabled {
            self.write_enabled(mode)
        } else {
            self.write_disabled(mode)
        };
        result.map_err(|e| FocusError::System {
            mode: mode.display_name().to_string(),
            operation: if enabled { "enable" } else { "disable" }.to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(mode = %mode, enabled, "focus mode updated");

        let change = ModeChange { mode, enabled };
        if self.events.send(change).is_err() {
            tracing::debug!(mode = %mode, "no subscribers for focus mode change");
        }
        Ok(())
    }

    fn write_enabled(&self, mode: FocusMode) -> Result<()> {
        self.store.apply(&[
            StoreOp::set(enabled_key(mode), StoreValue::Bool(true)),
            StoreOp::set(activated_at_key(mode), StoreValue::Timestamp(Utc::now())),
            StoreOp::set(GLOBAL_ENABLED_KEY, StoreValue::Bool(true)),
            StoreOp::set(ACTIVE_MODE_KEY, StoreValue::String(mode.identifier().to_string())),
        ])
    }

    fn write_disabled(&self, mode: FocusMode) -> Result<()> {
        let mut ops = vec![
            StoreOp::delete(enabled_key(mode)),
            StoreOp::delete(activated_at_key(mode)),
        ];
        if self.store.get_string(ACTIVE_MODE_KEY)?.as_deref() == Some(mode.identifier()) {
            ops.push(StoreOp::set(GLOBAL_ENABLED_KEY, StoreValue::Bool(false)));
            ops.push(StoreOp::delete(ACTIVE_MODE_KEY));
        }
        self.store.apply(&ops)
    }

    /// Whether `mode` reports on. Store failures read as `false`.
    pub fn is_enabled(&self, mode: FocusMode) -> bool {
        match self.try_is_enabled(mode) {
            Ok(enabled) => enabled,
            Err(e) => {
                tracing::warn!(mode = %mode, error = %e, "failed to read focus mode status");
                false
            }
        }
    }

    fn try_is_enabled(&self, mode: FocusMode) -> Result<bool> {
        let mode_enabled = self.store.get_bool(&enabled_key(mode))?.unwrap_or(false);
        let global = self.global_state()?;
        let is_active = global.active_mode_id.as_deref() == Some(mode.identifier());
        Ok(mode_enabled || (is_active && global.focus_enabled))
    }

    /// Flip `mode` and return its new state.
    ///
    /// Read and write are separate store operations; a concurrent writer
    /// between them wins.
    pub fn toggle(&self, mode: FocusMode) -> Result<bool> {
        let target = !self.is_enabled(mode);
        self.set_mode(mode, target)?;
        Ok(target)
    }

    /// Every catalog mode with its current status, in catalog order.
    pub fn list_all(&self) -> Vec<ModeStatus> {
        FocusMode::all()
            .iter()
            .map(|&mode| ModeStatus {
                mode,
                name: mode.display_name().to_string(),
                enabled: self.is_enabled(mode),
            })
            .collect()
    }

    pub fn global_state(&self) -> Result<GlobalFocusState> {
        Ok(GlobalFocusState {
            focus_enabled: self.store.get_bool(GLOBAL_ENABLED_KEY)?.unwrap_or(false),
            active_mode_id: self.store.get_string(ACTIVE_MODE_KEY)?,
        })
    }

    pub fn activation(&self, mode: FocusMode) -> Result<Option<ModeActivation>> {
        match self.store.get_bool(&enabled_key(mode))? {
            Some(enabled) => Ok(Some(ModeActivation {
                enabled,
                activated_at: self.store.get_timestamp(&activated_at_key(mode))?,
            })),
            None => Ok(None),
        }
    }

    /// Stored activation records, in catalog order.
    ///
    /// Keys under the mode prefix that do not belong to a catalog mode are
    /// ignored.
    pub fn activations(&self) -> Result<Vec<(FocusMode, ModeActivation)>> {
        let keys = self.store.keys_with_prefix(MODE_KEY_PREFIX)?;
        let mut result = Vec::new();
        for &mode in FocusMode::all() {
            if !keys.iter().any(|k| *k == enabled_key(mode)) {
                continue;
            }
            if let Some(activation) = self.activation(mode)? {
                result.push((mode, activation));
            }
        }
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
