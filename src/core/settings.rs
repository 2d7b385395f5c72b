/*
 * The shared modifier configuration: whether a modifier is applied at all,
 * and which kind is selected. A single instance is owned by the presenter;
 * the Settings dialog edits a working copy and hands the final state back
 * exactly once when it closes. Nothing here is persisted across runs.
 */
use super::modifier::ModifierKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierSettings {
    /// Whether any modifier is applied to submitted text.
    pub enabled: bool,
    /// Selected modifier; meaningful only while `enabled` is true.
    pub kind: ModifierKind,
}

impl ModifierSettings {
    /*
     * Applies the configured modifier to `text`. When modifiers are
     * disabled the input is returned unchanged, regardless of `kind`.
     */
    pub fn apply(&self, text: &str) -> String {
        if self.enabled {
            self.kind.apply(text)
        } else {
            text.to_owned()
        }
    }

    /*
     * The human-readable status shown in the main window: the kind's name
     * while modifiers are enabled, a fixed "Disabled" otherwise.
     */
    pub fn status_text(&self) -> String {
        if self.enabled {
            self.kind.to_string()
        } else {
            "Disabled".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_disabled_none() {
        // Arrange / Act
        let settings = ModifierSettings::default();

        // Assert
        assert!(!settings.enabled);
        assert_eq!(settings.kind, ModifierKind::None);
    }

    #[test]
    fn test_apply_ignores_kind_while_disabled() {
        // Arrange
        let settings = ModifierSettings {
            enabled: false,
            kind: ModifierKind::Uppercase,
        };

        // Act / Assert
        assert_eq!(settings.apply("abc"), "abc");
    }

    #[test]
    fn test_apply_uses_kind_while_enabled() {
        // Arrange
        let settings = ModifierSettings {
            enabled: true,
            kind: ModifierKind::Reverse,
        };

        // Act / Assert
        assert_eq!(settings.apply("abc"), "cba");
    }

    #[test]
    fn test_status_text_reflects_enablement() {
        // Arrange
        let mut settings = ModifierSettings {
            enabled: true,
            kind: ModifierKind::Uppercase,
        };

        // Act / Assert
        assert_eq!(settings.status_text(), "Uppercase");

        settings.enabled = false;
        assert_eq!(settings.status_text(), "Disabled");
    }
}
