/*
 * The Win32 platform entry: owns the shared internal state, creates native
 * windows, dispatches `PlatformCommand`s to the control handlers, and runs
 * the message loop. Events flow out through `send_event`, which forwards
 * them to the registered `PlatformEventHandler` and then drains whatever
 * commands the handler enqueued in response.
 */

use super::command_executor;
use super::error::{PlatformError, Result as PlatformResult};
use super::types::{AppEvent, PlatformCommand, PlatformEventHandler, WindowConfig, WindowId};
use super::window_common::{self, NativeWindowData};

use std::collections::HashMap;
use std::path::Path;
use std::sync::{
    Arc, Mutex, RwLock, Weak,
    atomic::{AtomicUsize, Ordering},
};

use windows::{
    Win32::{
        Foundation::{HINSTANCE, LPARAM, WPARAM},
        System::LibraryLoader::GetModuleHandleW,
        UI::{
            Controls::{ICC_STANDARD_CLASSES, INITCOMMONCONTROLSEX, InitCommonControlsEx},
            WindowsAndMessaging::{
                DispatchMessageW, GetMessageW, ICON_BIG, ICON_SMALL, IMAGE_ICON, LR_DEFAULTSIZE,
                LR_LOADFROMFILE, LoadImageW, MSG, PostQuitMessage, SendMessageW, TranslateMessage,
                WM_SETICON,
            },
        },
    },
    core::{HSTRING, PCWSTR},
};

/// Internal state for the Win32 platform layer.
///
/// Holds the module handle and the per-window native data required to manage
/// the application's lifecycle and controls. It is shared (via `Arc`) with
/// the WndProc and the command handlers.
pub(crate) struct Win32ApiInternalState {
    h_instance: HINSTANCE,
    next_window_id_counter: AtomicUsize,
    /// Maps platform-agnostic `WindowId`s to native window data.
    pub(crate) active_windows: RwLock<HashMap<WindowId, NativeWindowData>>,
    /// Weak reference to the event handler provided by the application
    /// logic. Weak to avoid a cycle if the handler holds the interface.
    pub(crate) application_event_handler: Mutex<Option<Weak<Mutex<dyn PlatformEventHandler>>>>,
    /// The application name, used for window class registration.
    app_name_for_class: String,
    /// Active top-level windows; the loop quits when this reaches zero.
    active_windows_count: AtomicUsize,
}

impl Win32ApiInternalState {
    fn new(app_name_for_class: String) -> PlatformResult<Arc<Self>> {
        unsafe {
            let icex = INITCOMMONCONTROLSEX {
                dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
                dwICC: ICC_STANDARD_CLASSES,
            };
            if !InitCommonControlsEx(&icex).as_bool() {
                log::warn!("Platform: InitCommonControlsEx failed; continuing with defaults.");
            }

            let h_instance = HINSTANCE(GetModuleHandleW(PCWSTR::null())?.0);
            Ok(Arc::new(Self {
                h_instance,
                next_window_id_counter: AtomicUsize::new(1),
                active_windows: RwLock::new(HashMap::new()),
                application_event_handler: Mutex::new(None),
                app_name_for_class,
                active_windows_count: AtomicUsize::new(0),
            }))
        }
    }

    pub(crate) fn h_instance(&self) -> HINSTANCE {
        self.h_instance
    }

    pub(crate) fn app_name_for_class(&self) -> &str {
        &self.app_name_for_class
    }

    pub(crate) fn generate_window_id(&self) -> WindowId {
        WindowId(self.next_window_id_counter.fetch_add(1, Ordering::Relaxed))
    }

    /*
     * Runs a closure with read access to one window's native data. The lock
     * is held only for the closure's duration; callers should return any
     * handles they need and make Win32 calls after this returns, since such
     * calls can synchronously re-enter the WndProc.
     */
    pub(crate) fn with_window_data_read<T>(
        &self,
        window_id: WindowId,
        f: impl FnOnce(&NativeWindowData) -> PlatformResult<T>,
    ) -> PlatformResult<T> {
        let windows_guard = self.active_windows.read().map_err(|_| {
            PlatformError::OperationFailed("Failed to acquire read lock on windows map".into())
        })?;
        let window_data = windows_guard.get(&window_id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!("WindowId {window_id:?} not found"))
        })?;
        f(window_data)
    }

    /// Write-access counterpart of `with_window_data_read`.
    pub(crate) fn with_window_data_write<T>(
        &self,
        window_id: WindowId,
        f: impl FnOnce(&mut NativeWindowData) -> PlatformResult<T>,
    ) -> PlatformResult<T> {
        let mut windows_guard = self.active_windows.write().map_err(|_| {
            PlatformError::OperationFailed("Failed to acquire write lock on windows map".into())
        })?;
        let window_data = windows_guard.get_mut(&window_id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!("WindowId {window_id:?} not found"))
        })?;
        f(window_data)
    }

    pub(crate) fn increment_active_windows(&self) {
        self.active_windows_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Decrements the active window count and posts WM_QUIT when the last
    /// window goes away.
    pub(crate) fn decrement_active_windows(&self) {
        let prev_count = self.active_windows_count.fetch_sub(1, Ordering::Relaxed);
        if prev_count <= 1 {
            log::info!("Platform: Last window destroyed, posting WM_QUIT.");
            unsafe { PostQuitMessage(0) };
        }
    }

    /*
     * Delivers an event to the application logic and then executes every
     * command the handler enqueued in response. The handler lock is never
     * held across command execution, so commands that run nested message
     * loops (modal dialogs) can safely re-enter this function.
     */
    pub(crate) fn send_event(self: &Arc<Self>, event: AppEvent) {
        let handler_arc_opt = {
            let handler_guard = match self.application_event_handler.lock() {
                Ok(guard) => guard,
                Err(_) => {
                    log::error!("Platform: Event handler mutex poisoned; dropping event.");
                    return;
                }
            };
            handler_guard.as_ref().and_then(Weak::upgrade)
        };

        let Some(handler_arc) = handler_arc_opt else {
            // Normal for events generated during window creation, before
            // `run` registers the handler.
            log::debug!("Platform: No event handler registered yet; dropping event {event:?}.");
            return;
        };

        if let Ok(mut handler) = handler_arc.lock() {
            handler.handle_event(event);
        } else {
            log::error!("Platform: Failed to lock event handler for event dispatch.");
            return;
        }

        self.drain_commands(&handler_arc);
    }

    /// Dequeues and executes commands until the handler's queue is empty.
    pub(crate) fn drain_commands(self: &Arc<Self>, handler_arc: &Arc<Mutex<dyn PlatformEventHandler>>) {
        loop {
            let command = match handler_arc.lock() {
                Ok(mut handler) => handler.try_dequeue_command(),
                Err(_) => {
                    log::error!("Platform: Failed to lock event handler for command dequeue.");
                    return;
                }
            };
            let Some(command) = command else { break };
            if let Err(e) = command_executor::execute(self, command) {
                log::error!("Platform: Error executing command: {e}");
            }
        }
    }
}

/// The primary interface to the platform abstraction layer.
pub struct PlatformInterface {
    internal_state: Arc<Win32ApiInternalState>,
}

impl PlatformInterface {
    pub fn new(app_name_for_class: String) -> PlatformResult<Self> {
        let internal_state = Win32ApiInternalState::new(app_name_for_class)?;
        window_common::register_window_class(&internal_state)?;
        Ok(PlatformInterface { internal_state })
    }

    /*
     * Creates a native top-level window and returns its logical ID. A
     * preliminary `NativeWindowData` entry is inserted before the native
     * creation call so the WndProc can find it while handling WM_CREATE.
     */
    pub fn create_window(&self, config: WindowConfig) -> PlatformResult<WindowId> {
        let window_id = self.internal_state.generate_window_id();

        {
            let mut windows_guard = self.internal_state.active_windows.write().map_err(|_| {
                PlatformError::OperationFailed(
                    "Failed to lock windows map for preliminary insert".into(),
                )
            })?;
            windows_guard.insert(window_id, NativeWindowData::new(window_id));
        }

        let hwnd = match window_common::create_native_window(
            &self.internal_state,
            window_id,
            config.title,
            config.width,
            config.height,
        ) {
            Ok(h) => h,
            Err(e) => {
                if let Ok(mut windows_guard) = self.internal_state.active_windows.write() {
                    windows_guard.remove(&window_id);
                }
                return Err(e);
            }
        };

        self.internal_state
            .with_window_data_write(window_id, |window_data| {
                window_data.set_hwnd(hwnd);
                Ok(())
            })?;
        self.internal_state.increment_active_windows();
        log::debug!("Platform: Created window {window_id:?} with HWND {hwnd:?}.");
        Ok(window_id)
    }

    /*
     * Loads an icon from an image file on disk and assigns it to the window.
     * A missing or unreadable icon is not fatal; the window keeps the class
     * default.
     */
    pub fn set_window_icon_from_file(&self, window_id: WindowId, icon_path: &Path) {
        let hwnd = match self
            .internal_state
            .with_window_data_read(window_id, |window_data| Ok(window_data.hwnd()))
        {
            Ok(hwnd) => hwnd,
            Err(e) => {
                log::warn!("Platform: Cannot set icon, window lookup failed: {e}");
                return;
            }
        };

        let path_hstring = HSTRING::from(icon_path.to_string_lossy().as_ref());
        let icon_handle = unsafe {
            LoadImageW(
                None,
                PCWSTR(path_hstring.as_ptr()),
                IMAGE_ICON,
                0,
                0,
                LR_LOADFROMFILE | LR_DEFAULTSIZE,
            )
        };
        match icon_handle {
            Ok(handle) => unsafe {
                SendMessageW(
                    hwnd,
                    WM_SETICON,
                    Some(WPARAM(ICON_BIG as usize)),
                    Some(LPARAM(handle.0 as isize)),
                );
                SendMessageW(
                    hwnd,
                    WM_SETICON,
                    Some(WPARAM(ICON_SMALL as usize)),
                    Some(LPARAM(handle.0 as isize)),
                );
                log::debug!("Platform: Window icon loaded from {icon_path:?}.");
            },
            Err(e) => {
                log::warn!("Platform: Could not load window icon from {icon_path:?}: {e}");
            }
        }
    }

    /*
     * Registers the event handler, executes any commands it has already
     * enqueued (the static UI description), and runs the message loop until
     * WM_QUIT. Returns when the application is shutting down.
     */
    pub fn run(&self, event_handler: Arc<Mutex<dyn PlatformEventHandler>>) -> PlatformResult<()> {
        {
            let mut handler_guard = self
                .internal_state
                .application_event_handler
                .lock()
                .map_err(|_| {
                    PlatformError::InitializationFailed(
                        "Failed to lock event handler slot".into(),
                    )
                })?;
            *handler_guard = Some(Arc::downgrade(&event_handler));
        }

        // Execute startup commands enqueued before the loop starts.
        self.internal_state.drain_commands(&event_handler);

        unsafe {
            let mut msg = MSG::default();
            loop {
                let result = GetMessageW(&mut msg, None, 0, 0);
                if result.0 > 0 {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                } else if result.0 == 0 {
                    log::debug!("Platform: WM_QUIT received, leaving message loop.");
                    break;
                } else {
                    let err = windows::core::Error::from_win32();
                    log::error!("Platform: GetMessageW failed: {err}");
                    return Err(PlatformError::OperationFailed(format!(
                        "GetMessageW failed: {err}"
                    )));
                }
            }
        }

        if let Ok(mut handler) = event_handler.lock() {
            handler.on_quit();
        }
        if let Ok(mut handler_guard) = self.internal_state.application_event_handler.lock() {
            *handler_guard = None;
        }
        log::info!("Platform: Message loop exited cleanly.");
        Ok(())
    }
}
