/*
 * This module consolidates the core, platform-agnostic logic of the
 * application: the text modifier kinds and their string operations, the
 * shared modifier configuration, and the About-dialog content loader
 * (behind the `AboutReaderOperations` abstraction so tests can substitute
 * a mock source).
 */
pub mod about;
pub mod modifier;
pub mod settings;

// Re-export key structures and enums
pub use about::{AboutContent, AboutReaderOperations, FileAboutReader};
pub use modifier::ModifierKind;
pub use settings::ModifierSettings;

#[cfg(test)]
pub use about::AboutError;
