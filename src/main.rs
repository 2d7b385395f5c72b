/*
 * Process entry point: initializes logging, stands up the platform layer
 * and the presenter, describes the main window, and runs the message loop
 * until the window closes. The process exit code is the loop's own exit
 * status.
 */

mod app_logic;
mod core;
mod platform_layer;
mod ui_description_layer;

use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::sync::Once;

static LOGGING_INIT: Once = Once::new();

/*
 * Initializes the terminal logger exactly once. Tests call this from their
 * setup as well, so repeated invocations must be harmless.
 */
pub fn initialize_logging() {
    LOGGING_INIT.call_once(|| {
        let level = if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let config = ConfigBuilder::new()
            .set_time_format_custom(time::macros::format_description!(
                "[hour]:[minute]:[second]"
            ))
            .build();
        if let Err(e) = TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto) {
            eprintln!("Logger initialization failed: {e}");
        }
    });
}

#[cfg(target_os = "windows")]
fn main() -> platform_layer::PlatformResult<()> {
    use crate::app_logic::MyAppLogic;
    use crate::core::FileAboutReader;
    use crate::core::about::{APP_ICON_PATH, APP_NAME, APP_VERSION};
    use crate::platform_layer::{PlatformEventHandler, PlatformInterface, WindowConfig};
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    initialize_logging();
    log::info!("{APP_NAME} - v {APP_VERSION}");
    log::info!("App started");

    let platform = PlatformInterface::new(APP_NAME.to_string())?;
    let window_id = platform.create_window(WindowConfig {
        title: APP_NAME,
        width: 500,
        height: 500,
    })?;
    platform.set_window_icon_from_file(window_id, Path::new(APP_ICON_PATH));

    let mut logic = MyAppLogic::new(Arc::new(FileAboutReader::new()));
    logic.on_main_window_created(window_id);

    let handler: Arc<Mutex<dyn PlatformEventHandler>> = Arc::new(Mutex::new(logic));
    platform.run(handler)
}

#[cfg(not(target_os = "windows"))]
fn main() {
    initialize_logging();
    log::error!(
        "{} requires the native Win32 windowing layer and cannot run on this platform.",
        crate::core::about::APP_NAME
    );
    std::process::exit(1);
}
