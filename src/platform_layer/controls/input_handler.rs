/*
 * Provides handling for single-line input (EDIT) controls: creation, text
 * updates from the app logic, and translation of edit notifications into
 * `AppEvent`s. The control is subclassed so that pressing Return inside it
 * produces an `InputSubmitted` event instead of the default beep.
 */

use crate::platform_layer::app::Win32ApiInternalState;
use crate::platform_layer::error::{PlatformError, Result as PlatformResult};
use crate::platform_layer::types::{AppEvent, WindowId};
use crate::platform_layer::window_common::WC_EDIT;

use std::sync::{Arc, Weak};
use windows::Win32::{
    Foundation::{HWND, LPARAM, LRESULT, WPARAM},
    UI::Input::KeyboardAndMouse::VK_RETURN,
    UI::Shell::{DefSubclassProc, RemoveWindowSubclass, SetWindowSubclass},
    UI::WindowsAndMessaging::{
        CreateWindowExW, ES_AUTOHSCROLL, GetWindowTextLengthW, GetWindowTextW, HMENU,
        SetWindowTextW, WINDOW_STYLE, WM_CHAR, WM_KEYDOWN, WM_NCDESTROY, WS_BORDER, WS_CHILD,
        WS_EX_CLIENTEDGE, WS_TABSTOP, WS_VISIBLE,
    },
};
use windows::core::HSTRING;

const INPUT_SUBCLASS_ID: usize = 1;

/// Per-control context handed to the Return-key subclass procedure.
struct InputSubclassData {
    internal_state: Weak<Win32ApiInternalState>,
    window_id: WindowId,
    control_id: i32,
}

/*
 * Creates a native single-line EDIT control, registers its HWND and
 * installs the Return-key subclass. Position and size are placeholders
 * until the layout rules run.
 */
pub(crate) fn handle_create_input_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    parent_control_id: Option<i32>,
    control_id: i32,
    initial_text: String,
) -> PlatformResult<()> {
    log::debug!("InputHandler: Creating input (ID {control_id}) in window {window_id:?}.");

    let h_instance = internal_state.h_instance();
    let state_weak = Arc::downgrade(internal_state);
    internal_state.with_window_data_write(window_id, |window_data| {
        if window_data.has_control(control_id) {
            return Err(PlatformError::OperationFailed(format!(
                "Input with ID {control_id} already exists for window {window_id:?}"
            )));
        }

        let hwnd_parent = match parent_control_id {
            Some(id) => window_data.get_control_hwnd(id).ok_or_else(|| {
                PlatformError::InvalidHandle(format!(
                    "Parent control {id} not found for CreateInput in {window_id:?}"
                ))
            })?,
            None => window_data.hwnd(),
        };

        let hwnd_input = unsafe {
            CreateWindowExW(
                WS_EX_CLIENTEDGE,
                WC_EDIT,
                &HSTRING::from(initial_text.as_str()),
                WS_CHILD
                    | WS_VISIBLE
                    | WS_TABSTOP
                    | WS_BORDER
                    | WINDOW_STYLE(ES_AUTOHSCROLL as u32),
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

        let subclass_data = Box::new(InputSubclassData {
            internal_state: state_weak,
            window_id,
            control_id,
        });
        let data_ptr = Box::into_raw(subclass_data);
        let installed = unsafe {
            SetWindowSubclass(
                hwnd_input,
                Some(input_subclass_proc),
                INPUT_SUBCLASS_ID,
                data_ptr as usize,
            )
        };
        if !installed.as_bool() {
            // Reclaim the context; the control still works, minus Return handling.
            let _ = unsafe { Box::from_raw(data_ptr) };
            log::error!(
                "InputHandler: SetWindowSubclass failed for input ID {control_id}; Return submission disabled."
            );
        }

        window_data.register_control_hwnd(control_id, hwnd_input);
        Ok(())
    })
}

/*
 * Subclass procedure for the input field. Return generates an
 * `InputSubmitted` event carrying the field's current text; the key is
 * swallowed (including its WM_CHAR) so the default handler does not beep.
 */
unsafe extern "system" fn input_subclass_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    _subclass_id: usize,
    ref_data: usize,
) -> LRESULT {
    let data_ptr = ref_data as *mut InputSubclassData;
    match msg {
        WM_KEYDOWN if (wparam.0 & 0xFFFF) as u16 == VK_RETURN.0 => {
            if !data_ptr.is_null() {
                let data = unsafe { &*data_ptr };
                if let Some(internal_state) = data.internal_state.upgrade() {
                    let text = read_window_text(hwnd);
                    internal_state.send_event(AppEvent::InputSubmitted {
                        window_id: data.window_id,
                        control_id: data.control_id,
                        text,
                    });
                }
            }
            LRESULT(0)
        }
        WM_CHAR if (wparam.0 & 0xFFFF) as u16 == VK_RETURN.0 => LRESULT(0),
        WM_NCDESTROY => {
            unsafe {
                let _ = RemoveWindowSubclass(hwnd, Some(input_subclass_proc), INPUT_SUBCLASS_ID);
                if !data_ptr.is_null() {
                    let _ = Box::from_raw(data_ptr);
                }
                DefSubclassProc(hwnd, msg, wparam, lparam)
            }
        }
        _ => unsafe { DefSubclassProc(hwnd, msg, wparam, lparam) },
    }
}

/*
 * Translates an EN_CHANGE notification into an `AppEvent::InputTextChanged`
 * carrying the control's current text. The app logic filters by control ID,
 * so notifications from other EDIT-class controls are harmless.
 */
pub(crate) fn handle_en_change(
    window_id: WindowId,
    control_id: i32,
    hwnd_control: HWND,
) -> Option<AppEvent> {
    let text = read_window_text(hwnd_control);
    Some(AppEvent::InputTextChanged {
        window_id,
        control_id,
        text,
    })
}

/// Handles the `SetInputText` command.
pub(crate) fn handle_set_input_text_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    control_id: i32,
    text: String,
) -> PlatformResult<()> {
    let hwnd = internal_state.with_window_data_read(window_id, |window_data| {
        window_data.get_control_hwnd(control_id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!(
                "Input with ID {control_id} not found for SetInputText in {window_id:?}"
            ))
        })
    })?;
    unsafe { SetWindowTextW(hwnd, &HSTRING::from(text.as_str()))? };
    Ok(())
}

/// Reads the full text of a window into a `String`.
pub(crate) fn read_window_text(hwnd: HWND) -> String {
    let len = unsafe { GetWindowTextLengthW(hwnd) };
    if len <= 0 {
        return String::new();
    }
    let mut buffer = vec![0u16; len as usize + 1];
    let copied = unsafe { GetWindowTextW(hwnd, &mut buffer) };
    String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
}
