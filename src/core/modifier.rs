/*
 * Defines the closed set of text modifiers the application can apply to
 * submitted input, together with the actual string operations. The enum is
 * deliberately exhaustive: there is no string-based lookup anywhere, so an
 * "unknown modifier" cannot exist at runtime. `ModifierKind::None` is the
 * defined pass-through for anything that does not transform.
 */
use std::fmt;

/// One of the four fixed text-processing modes applied to submitted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifierKind {
    #[default]
    None,
    Uppercase,
    ToggleCase,
    Reverse,
}

impl ModifierKind {
    /// All kinds, in the order they are presented in the Settings dialog.
    pub const ALL: [ModifierKind; 4] = [
        ModifierKind::None,
        ModifierKind::Uppercase,
        ModifierKind::ToggleCase,
        ModifierKind::Reverse,
    ];

    /*
     * Applies this modifier to `text`, returning the transformed string.
     * `None` returns the input unchanged.
     */
    pub fn apply(self, text: &str) -> String {
        match self {
            ModifierKind::None => text.to_owned(),
            ModifierKind::Uppercase => text.to_uppercase(),
            ModifierKind::ToggleCase => toggle_case(text),
            ModifierKind::Reverse => text.chars().rev().collect(),
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModifierKind::None => "None",
            ModifierKind::Uppercase => "Uppercase",
            ModifierKind::ToggleCase => "Toggle case",
            ModifierKind::Reverse => "Reverse",
        };
        f.write_str(name)
    }
}

/*
 * Swaps the case of every cased character. Case mappings may expand to
 * several characters (e.g. 'ß' uppercases to "SS"), so the result is built
 * by extending rather than by a one-to-one map.
 */
fn toggle_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_lowercase() {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_pass_through() {
        assert_eq!(ModifierKind::None.apply("xyz"), "xyz");
        assert_eq!(ModifierKind::None.apply(""), "");
    }

    #[test]
    fn test_uppercase() {
        assert_eq!(ModifierKind::Uppercase.apply("Hello World"), "HELLO WORLD");
    }

    #[test]
    fn test_toggle_case() {
        assert_eq!(ModifierKind::ToggleCase.apply("Hello World"), "hELLO wORLD");
    }

    #[test]
    fn test_toggle_case_leaves_uncased_characters_alone() {
        assert_eq!(ModifierKind::ToggleCase.apply("a1 B2 #"), "A1 b2 #");
    }

    #[test]
    fn test_reverse() {
        assert_eq!(ModifierKind::Reverse.apply("Hello World"), "dlroW olleH");
    }

    #[test]
    fn test_reverse_is_character_based() {
        // Reversal operates on characters, not bytes.
        assert_eq!(ModifierKind::Reverse.apply("aéb"), "béa");
    }

    #[test]
    fn test_default_kind_is_none() {
        assert_eq!(ModifierKind::default(), ModifierKind::None);
    }

    #[test]
    fn test_display_names() {
        let names: Vec<String> = ModifierKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, ["None", "Uppercase", "Toggle case", "Reverse"]);
    }
}
