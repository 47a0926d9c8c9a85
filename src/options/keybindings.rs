use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "BindingTable", into = "BindingTable")]
/// Configurable keyboard bindings mapping actions to key codes.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format
/// (`"ArrowUp"`, `"Digit1"`, ...). Actions missing from a TOML file keep
/// their default key. A key drives at most one action: binding a key that
/// is already taken unbinds the previous action.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `IncreaseLevel` → `"ArrowUp"`).
    bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (key string → action).
    key_to_action: HashMap<String, KeyAction>,
}

/// Serialized form: only the forward map.
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
struct BindingTable {
    bindings: HashMap<KeyAction, String>,
}

impl From<BindingTable> for KeybindingOptions {
    fn from(table: BindingTable) -> Self {
        let mut opts = Self::default();
        let mut explicit: Vec<_> = table.bindings.into_iter().collect();
        explicit.sort_by_key(|(action, _)| *action);
        for (action, key) in explicit {
            opts.bind(action, key);
        }
        opts
    }
}

impl From<KeybindingOptions> for BindingTable {
    fn from(opts: KeybindingOptions) -> Self {
        Self {
            bindings: opts.bindings,
        }
    }
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::IncreaseLevel, "ArrowUp".into()),
            (KeyAction::DecreaseLevel, "ArrowDown".into()),
            (KeyAction::SelectUniform, "Digit1".into()),
            (KeyAction::SelectDistance, "Digit2".into()),
            (KeyAction::SelectEdge, "Digit3".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

impl KeybindingOptions {
    /// Bind `action` to `key`, replacing its previous key. Any other action
    /// bound to `key` becomes unbound.
    pub fn bind(&mut self, action: KeyAction, key: impl Into<String>) {
        let key = key.into();
        let displaced: Vec<KeyAction> = self
            .bindings
            .iter()
            .filter(|&(other, bound)| *other != action && *bound == key)
            .map(|(other, _)| *other)
            .collect();
        for other in displaced {
            log::warn!(
                "key {key} rebound from {other:?} to {action:?}; \
                 {other:?} is now unbound"
            );
            let _ = self.bindings.remove(&other);
        }
        let _ = self.bindings.insert(action, key);
        self.rebuild_reverse_map();
    }

    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(key.clone(), *action);
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }

    /// The key currently bound to `action`.
    #[must_use]
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.bindings.get(&action).map(String::as_str)
    }
}
