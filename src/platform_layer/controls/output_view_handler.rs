/*
 * Handles the output log view: a read-only, scrollable, multi-line EDIT
 * control. The app logic owns the log contents; this handler only mirrors
 * them by appending lines and clearing the view wholesale.
 */

use crate::platform_layer::app::Win32ApiInternalState;
use crate::platform_layer::error::{PlatformError, Result as PlatformResult};
use crate::platform_layer::types::WindowId;
use crate::platform_layer::window_common::WC_EDIT;

use std::sync::Arc;
use windows::Win32::{
    Foundation::{HWND, LPARAM, WPARAM},
    UI::WindowsAndMessaging::{
        CreateWindowExW, ES_AUTOVSCROLL, ES_MULTILINE, ES_READONLY, GetWindowTextLengthW, HMENU,
        SendMessageW, SetWindowTextW, WINDOW_STYLE, WS_BORDER, WS_CHILD, WS_EX_CLIENTEDGE,
        WS_VISIBLE, WS_VSCROLL,
    },
};
use windows::core::HSTRING;

// Edit control messages not exposed as typed constants by the bindings.
const EM_SETSEL: u32 = 0x00B1;
const EM_REPLACESEL: u32 = 0x00C2;

/// Creates the read-only multi-line output view.
pub(crate) fn handle_create_output_view_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    control_id: i32,
) -> PlatformResult<()> {
    log::debug!("OutputViewHandler: Creating output view (ID {control_id}) in window {window_id:?}.");

    let h_instance = internal_state.h_instance();
    internal_state.with_window_data_write(window_id, |window_data| {
        if window_data.has_control(control_id) {
            return Err(PlatformError::ControlCreationFailed(format!(
                "Output view with ID {control_id} already exists for window {window_id:?}"
            )));
        }

        let style = WS_CHILD
            | WS_VISIBLE
            | WS_BORDER
            | WS_VSCROLL
            | WINDOW_STYLE((ES_MULTILINE | ES_READONLY | ES_AUTOVSCROLL) as u32);
        let hwnd_view = unsafe {
            CreateWindowExW(
                WS_EX_CLIENTEDGE,
                WC_EDIT,
                None,
                style,
                0,
                0,
                10,
                10,
                Some(window_data.hwnd()),
                Some(HMENU(control_id as *mut _)),
                Some(h_instance),
                None,
            )?
        };
        window_data.register_control_hwnd(control_id, hwnd_view);
        Ok(())
    })
}

/*
 * Appends one line to the output view. The caret is moved to the end and
 * the line (plus CRLF) is inserted through EM_REPLACESEL, which also keeps
 * the view scrolled to the newest entry.
 */
pub(crate) fn handle_append_output_line_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    control_id: i32,
    line: &str,
) -> PlatformResult<()> {
    let hwnd = lookup_view(internal_state, window_id, control_id)?;
    let text_with_break = format!("{line}\r\n");
    let text_utf16 = HSTRING::from(text_with_break.as_str());
    unsafe {
        let end = GetWindowTextLengthW(hwnd);
        SendMessageW(
            hwnd,
            EM_SETSEL,
            Some(WPARAM(end as usize)),
            Some(LPARAM(end as isize)),
        );
        SendMessageW(
            hwnd,
            EM_REPLACESEL,
            Some(WPARAM(0)),
            Some(LPARAM(text_utf16.as_ptr() as isize)),
        );
    }
    Ok(())
}

/// Empties the output view.
pub(crate) fn handle_clear_output_view_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    control_id: i32,
) -> PlatformResult<()> {
    let hwnd = lookup_view(internal_state, window_id, control_id)?;
    unsafe { SetWindowTextW(hwnd, &HSTRING::new())? };
    Ok(())
}

fn lookup_view(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    control_id: i32,
) -> PlatformResult<HWND> {
    internal_state.with_window_data_read(window_id, |window_data| {
        window_data.get_control_hwnd(control_id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!(
                "Output view with ID {control_id} not found in {window_id:?}"
            ))
        })
    })
}
