/*
 * Handles label (STATIC) controls: creation of text labels and etched
 * separators, text updates with a severity, and WM_CTLCOLORSTATIC handling
 * so warning and error text is tinted accordingly.
 */

use crate::platform_layer::app::Win32ApiInternalState;
use crate::platform_layer::error::{PlatformError, Result as PlatformResult};
use crate::platform_layer::types::{LabelKind, MessageSeverity, WindowId};
use crate::platform_layer::window_common::{SS_ETCHEDHORZ, SS_LEFT, WC_STATIC};

use std::sync::Arc;
use windows::Win32::{
    Foundation::{COLORREF, HWND, LRESULT},
    Graphics::Gdi::{
        COLOR_WINDOW, COLOR_WINDOWTEXT, GetSysColor, GetSysColorBrush, HBRUSH, HDC, InvalidateRect,
        SetBkMode, SetTextColor, TRANSPARENT,
    },
    UI::WindowsAndMessaging::{
        CreateWindowExW, GetDlgCtrlID, HMENU, SetWindowTextW, WINDOW_EX_STYLE, WS_CHILD,
        WS_VISIBLE,
    },
};
use windows::core::HSTRING;

/*
 * Creates a native STATIC control, either an ordinary text label or an
 * etched horizontal separator, and registers its HWND. Text labels start
 * with `Information` severity.
 */
pub(crate) fn handle_create_label_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    parent_control_id: Option<i32>,
    label_id: i32,
    initial_text: String,
    kind: LabelKind,
) -> PlatformResult<()> {
    log::debug!(
        "LabelHandler: Creating label '{initial_text}' (ID {label_id}, {kind:?}) in window {window_id:?}."
    );

    let h_instance = internal_state.h_instance();
    internal_state.with_window_data_write(window_id, |window_data| {
        if window_data.has_control(label_id) {
            return Err(PlatformError::OperationFailed(format!(
                "Label with ID {label_id} already exists for window {window_id:?}"
            )));
        }

        let hwnd_parent = match parent_control_id {
            Some(id) => window_data.get_control_hwnd(id).ok_or_else(|| {
                PlatformError::InvalidHandle(format!(
                    "Parent control {id} not found for CreateLabel in {window_id:?}"
                ))
            })?,
            None => window_data.hwnd(),
        };

        let style = match kind {
            LabelKind::Text => WS_CHILD | WS_VISIBLE | SS_LEFT,
            LabelKind::Separator => WS_CHILD | WS_VISIBLE | SS_ETCHEDHORZ,
        };
        let hwnd_label = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                WC_STATIC,
                &HSTRING::from(initial_text.as_str()),
                style,
                0,
                0,
                10,
                10,
                Some(hwnd_parent),
                Some(HMENU(label_id as *mut _)),
                Some(h_instance),
                None,
            )?
        };
        window_data.register_control_hwnd(label_id, hwnd_label);
        if kind == LabelKind::Text {
            window_data.set_label_severity(label_id, MessageSeverity::Information);
        }
        Ok(())
    })
}

/*
 * Updates a label's text and severity. The write lock is released before
 * `SetWindowTextW`, which can synchronously dispatch messages back into the
 * window procedure.
 */
pub(crate) fn handle_update_label_text_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    label_id: i32,
    text: String,
    severity: MessageSeverity,
) -> PlatformResult<()> {
    log::debug!(
        "LabelHandler: Updating label {label_id} in window {window_id:?} to '{text}' ({severity:?})."
    );

    let hwnd_label = internal_state.with_window_data_write(window_id, |window_data| {
        let hwnd = window_data.get_control_hwnd(label_id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!(
                "Label with ID {label_id} not found for UpdateLabelText in {window_id:?}"
            ))
        })?;
        window_data.set_label_severity(label_id, severity);
        Ok(hwnd)
    })?;

    unsafe {
        SetWindowTextW(hwnd_label, &HSTRING::from(text.as_str()))?;
        // Repaint so WM_CTLCOLORSTATIC applies the new severity color.
        let _ = InvalidateRect(Some(hwnd_label), None, true);
    }
    Ok(())
}

/*
 * Handles WM_CTLCOLORSTATIC for labels. Colors the text according to the
 * label's stored severity and keeps the background transparent against the
 * window brush. Returns `None` for controls without a severity entry so the
 * default processing applies.
 */
pub(crate) fn handle_wm_ctlcolorstatic(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    hdc_static_ctrl: HDC,
    hwnd_static_ctrl: HWND,
) -> Option<LRESULT> {
    let control_id = unsafe { GetDlgCtrlID(hwnd_static_ctrl) };
    if control_id == 0 {
        return None;
    }

    let result: PlatformResult<Option<LRESULT>> =
        internal_state.with_window_data_read(window_id, |window_data| {
            let Some(severity) = window_data.get_label_severity(control_id) else {
                return Ok(None);
            };
            let color = match severity {
                MessageSeverity::Error => COLORREF(0x0000_00FF),
                MessageSeverity::Warning => COLORREF(0x0000_A5FF),
                MessageSeverity::Information => {
                    COLORREF(unsafe { GetSysColor(COLOR_WINDOWTEXT) })
                }
            };
            unsafe {
                SetTextColor(hdc_static_ctrl, color);
                SetBkMode(hdc_static_ctrl, TRANSPARENT);
                let brush: HBRUSH = GetSysColorBrush(COLOR_WINDOW);
                Ok(Some(LRESULT(brush.0 as isize)))
            }
        });
    result.ok().flatten()
}
