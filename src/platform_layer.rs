/*
 * The platform abstraction layer. `types` and `error` are platform-neutral
 * and are all the presenter ever sees; the remaining modules implement the
 * native Win32 windowing and are only compiled on Windows.
 */
pub mod error;
pub mod types;

#[cfg(target_os = "windows")]
pub mod app;
#[cfg(target_os = "windows")]
pub(crate) mod command_executor;
#[cfg(target_os = "windows")]
pub(crate) mod controls;
#[cfg(target_os = "windows")]
pub(crate) mod window_common;

#[cfg(target_os = "windows")]
pub use app::PlatformInterface;
pub use error::{PlatformError, Result as PlatformResult};
pub use types::{
    AboutDialogContent, AppEvent, DockStyle, LabelKind, LayoutRule, MenuAction, MenuItemConfig,
    MessageSeverity, PlatformCommand, PlatformEventHandler, WindowConfig, WindowId,
};
