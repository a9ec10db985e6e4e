//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. Label and
//! note editing consume keys before this map is consulted.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Delete the selected node (cascades its connections).
    DeleteSelection,
    ZoomIn,
    ZoomOut,
    ZoomToFit,
    /// Abandon the current gesture and selection.
    Cancel,
}

/// Resolves key events into shortcut actions.
///
/// Platform-aware: ⌘ on macOS and Ctrl elsewhere are interchangeable.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"Delete"`, `"0"`).
    /// Returns `None` if the combo has no binding.
    pub fn resolve(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.command() {
            return match key {
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ZoomToFit),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::DeleteSelection),
            "Escape" => Some(ShortcutAction::Cancel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CMD: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
        alt: false,
        meta: false,
    };

    #[test]
    fn delete_keys_map_to_delete() {
        assert_eq!(
            ShortcutMap::resolve("Delete", Modifiers::NONE),
            Some(ShortcutAction::DeleteSelection)
        );
        assert_eq!(
            ShortcutMap::resolve("Backspace", Modifiers::NONE),
            Some(ShortcutAction::DeleteSelection)
        );
    }

    #[test]
    fn zoom_combos_need_command() {
        assert_eq!(ShortcutMap::resolve("=", CMD), Some(ShortcutAction::ZoomIn));
        assert_eq!(ShortcutMap::resolve("-", CMD), Some(ShortcutAction::ZoomOut));
        assert_eq!(ShortcutMap::resolve("0", CMD), Some(ShortcutAction::ZoomToFit));
        assert_eq!(ShortcutMap::resolve("=", Modifiers::NONE), None);
    }

    #[test]
    fn unbound_keys_resolve_to_none() {
        assert_eq!(ShortcutMap::resolve("q", Modifiers::NONE), None);
    }
}
