/*
 * Encapsulates Win32-specific operations for button controls: creation of
 * push buttons and translation of click notifications into platform-agnostic
 * `AppEvent`s.
 */

use crate::platform_layer::app::Win32ApiInternalState;
use crate::platform_layer::error::{PlatformError, Result as PlatformResult};
use crate::platform_layer::types::{AppEvent, WindowId};
use crate::platform_layer::window_common::WC_BUTTON;

use std::sync::Arc;
use windows::Win32::UI::WindowsAndMessaging::{
    BS_PUSHBUTTON, CreateWindowExW, HMENU, WINDOW_EX_STYLE, WINDOW_STYLE, WS_CHILD, WS_TABSTOP,
    WS_VISIBLE,
};
use windows::core::HSTRING;

/*
 * Creates a native push button and registers the resulting HWND in the
 * window's `NativeWindowData`. Position and size are placeholders; layout
 * rules position the control on the first WM_SIZE.
 */
pub(crate) fn handle_create_button_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    parent_control_id: Option<i32>,
    control_id: i32,
    text: String,
) -> PlatformResult<()> {
    log::debug!(
        "ButtonHandler: Creating button '{text}' (ID {control_id}) in window {window_id:?}."
    );

    let h_instance = internal_state.h_instance();
    internal_state.with_window_data_write(window_id, |window_data| {
        if window_data.has_control(control_id) {
            return Err(PlatformError::OperationFailed(format!(
                "Button with ID {control_id} already exists for window {window_id:?}"
            )));
        }

        let hwnd_parent = match parent_control_id {
            Some(id) => window_data.get_control_hwnd(id).ok_or_else(|| {
                PlatformError::InvalidHandle(format!(
                    "Parent control {id} not found for CreateButton in {window_id:?}"
                ))
            })?,
            None => window_data.hwnd(),
        };
        if hwnd_parent.is_invalid() {
            return Err(PlatformError::InvalidHandle(format!(
                "Parent HWND invalid for CreateButton (WinID: {window_id:?})"
            )));
        }

        let hwnd_button = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                WC_BUTTON,
                &HSTRING::from(text.as_str()),
                WS_CHILD | WS_VISIBLE | WS_TABSTOP | WINDOW_STYLE(BS_PUSHBUTTON as u32),
                0,
                0,
                10,
                10,
                Some(hwnd_parent),
                Some(HMENU(control_id as *mut _)),
                Some(h_instance),
                None,
            )?
        };
        window_data.register_control_hwnd(control_id, hwnd_button);
        Ok(())
    })
}

/// Translates a BN_CLICKED notification into an `AppEvent::ButtonClicked`.
pub(crate) fn handle_bn_clicked(window_id: WindowId, control_id: i32) -> AppEvent {
    log::debug!("ButtonHandler: BN_CLICKED for ID {control_id} in window {window_id:?}.");
    AppEvent::ButtonClicked {
        window_id,
        control_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_bn_clicked_returns_event() {
        // Arrange
        let win_id = WindowId::for_test(1);

        // Act
        let evt = handle_bn_clicked(win_id, 42);

        // Assert
        assert_eq!(
            evt,
            AppEvent::ButtonClicked {
                window_id: win_id,
                control_id: 42
            }
        );
    }
}
