/*
 * Handles plain container panels. A panel is a borderless STATIC control
 * that exists only so layout rules can dock children inside it (e.g. the
 * input field and its button sharing one row).
 */

use crate::platform_layer::app::Win32ApiInternalState;
use crate::platform_layer::error::{PlatformError, Result as PlatformResult};
use crate::platform_layer::types::WindowId;
use crate::platform_layer::window_common::WC_STATIC;

use std::sync::Arc;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, HMENU, WINDOW_EX_STYLE, WS_CHILD, WS_VISIBLE,
};

/// Creates a container panel and registers its HWND under `panel_id`.
pub(crate) fn handle_create_panel_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    parent_control_id: Option<i32>,
    panel_id: i32,
) -> PlatformResult<()> {
    log::debug!("PanelHandler: Creating panel (ID {panel_id}) in window {window_id:?}.");

    let h_instance = internal_state.h_instance();
    internal_state.with_window_data_write(window_id, |window_data| {
        if window_data.has_control(panel_id) {
            return Err(PlatformError::OperationFailed(format!(
                "Panel with ID {panel_id} already exists for window {window_id:?}"
            )));
        }

        let hwnd_parent = match parent_control_id {
            Some(id) => window_data.get_control_hwnd(id).ok_or_else(|| {
                PlatformError::InvalidHandle(format!(
                    "Parent control {id} not found for CreatePanel in {window_id:?}"
                ))
            })?,
            None => window_data.hwnd(),
        };
        if hwnd_parent.is_invalid() {
            return Err(PlatformError::InvalidHandle(format!(
                "Parent HWND for CreatePanel is invalid (WinID: {window_id:?})"
            )));
        }

        let hwnd_panel = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                WC_STATIC,
                None,
                WS_CHILD | WS_VISIBLE,
                0,
                0,
                10,
                10,
                Some(hwnd_parent),
                Some(HMENU(panel_id as *mut _)),
                Some(h_instance),
                None,
            )?
        };
        window_data.register_control_hwnd(panel_id, hwnd_panel);
        Ok(())
    })
}
