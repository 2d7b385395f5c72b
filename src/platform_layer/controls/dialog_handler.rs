/*
 * This module is responsible for the application's modal dialogs: the
 * Settings dialog (modifier configuration) and the read-only About dialog.
 * Both are built from dialog templates constructed in memory and run with
 * `DialogBoxIndirectParamW`, so no resource files are involved. The
 * Settings dialog communicates its result back to the application logic via
 * `AppEvent::SettingsDialogCompleted`; the About dialog has no feedback
 * path.
 */

use crate::core::ModifierKind;
use crate::platform_layer::app::Win32ApiInternalState;
use crate::platform_layer::error::{PlatformError, Result as PlatformResult};
use crate::platform_layer::types::{AboutDialogContent, AppEvent, WindowId};
use crate::platform_layer::window_common::{
    self, ID_DIALOG_ABOUT_AUTHOR, ID_DIALOG_ABOUT_BODY, ID_DIALOG_ABOUT_NAME,
    ID_DIALOG_ABOUT_VERSION, ID_DIALOG_SETTINGS_ENABLE_CHECKBOX, ID_DIALOG_SETTINGS_HEADING,
    ID_DIALOG_SETTINGS_RADIO_BASE,
};

use std::mem::{align_of, size_of};
use std::sync::Arc;

use windows::{
    Win32::{
        Foundation::{FALSE, HWND, LPARAM, TRUE, WPARAM},
        UI::Input::KeyboardAndMouse::EnableWindow,
        UI::WindowsAndMessaging::*,
    },
    core::HSTRING,
};

// Helper to extract the low word from WPARAM, typically a command ID.
fn loword_from_wparam(wparam: WPARAM) -> u16 {
    (wparam.0 & 0xFFFF) as u16
}

// Helper to push a u16 word (little-endian) to a byte vector.
fn push_word(vec: &mut Vec<u8>, word: u16) {
    vec.extend_from_slice(&word.to_le_bytes());
}

// Helper to push a null-terminated UTF-16 string to a byte vector.
fn push_str_utf16(vec: &mut Vec<u8>, s: &str) {
    for c in s.encode_utf16() {
        push_word(vec, c);
    }
    push_word(vec, 0);
}

// Helper to align a byte vector to a DWORD (4-byte) boundary.
fn align_to_dword(vec: &mut Vec<u8>) {
    while vec.len() % align_of::<u32>() != 0 {
        vec.push(0);
    }
}

/// Appends the fixed-size `DLGTEMPLATE` header plus menu/class/title/font
/// trailer to the template byte stream.
fn push_dialog_header(
    template_bytes: &mut Vec<u8>,
    title: &str,
    control_count: u16,
    width_du: i16,
    height_du: i16,
) {
    let style = DS_CENTER | DS_MODALFRAME | DS_SETFONT;
    let dlg_template = DLGTEMPLATE {
        style: style as u32 | WS_CAPTION.0 | WS_SYSMENU.0 | WS_POPUP.0,
        dwExtendedStyle: 0,
        cdit: control_count,
        x: 0,
        y: 0,
        cx: width_du,
        cy: height_du,
    };
    template_bytes.extend_from_slice(unsafe {
        &*(std::ptr::addr_of!(dlg_template) as *const [u8; size_of::<DLGTEMPLATE>()])
    });

    // Menu (none), class (default), title.
    push_word(template_bytes, 0);
    push_word(template_bytes, 0);
    push_str_utf16(template_bytes, title);

    // Font (point size, face name), required by DS_SETFONT.
    push_word(template_bytes, 8);
    push_str_utf16(template_bytes, "MS Shell Dlg");
}

/// Appends one `DLGITEMTEMPLATE` with the given window class and text.
#[allow(clippy::too_many_arguments)]
fn push_dialog_item(
    template_bytes: &mut Vec<u8>,
    style: u32,
    x: i16,
    y: i16,
    cx: i16,
    cy: i16,
    id: i32,
    class: &str,
    text: &str,
) {
    align_to_dword(template_bytes);
    let item = DLGITEMTEMPLATE {
        style,
        dwExtendedStyle: 0,
        x,
        y,
        cx,
        cy,
        id: id as u16,
    };
    template_bytes.extend_from_slice(unsafe {
        &*(std::ptr::addr_of!(item) as *const [u8; size_of::<DLGITEMTEMPLATE>()])
    });
    push_str_utf16(template_bytes, class);
    push_str_utf16(template_bytes, text);
    push_word(template_bytes, 0); // No creation data.
}

// --- Settings Dialog ---

/*
 * Working copy edited by the Settings dialog proc. Checkbox and radio
 * changes are written here immediately (live-writes); the state as of
 * dismissal is what the completion event carries.
 */
struct SettingsDialogState {
    enabled: bool,
    kind: ModifierKind,
}

fn radio_id_for_kind(kind: ModifierKind) -> i32 {
    let index = ModifierKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(0);
    ID_DIALOG_SETTINGS_RADIO_BASE + index as i32
}

fn kind_for_radio_id(radio_id: i32) -> Option<ModifierKind> {
    let index = radio_id - ID_DIALOG_SETTINGS_RADIO_BASE;
    ModifierKind::ALL.get(usize::try_from(index).ok()?).copied()
}

/// Enables or disables all four radio buttons; disabled radios keep their
/// selection.
fn set_radio_group_enabled(hdlg: HWND, enabled: bool) {
    for index in 0..ModifierKind::ALL.len() as i32 {
        if let Ok(hwnd_radio) =
            unsafe { GetDlgItem(Some(hdlg), ID_DIALOG_SETTINGS_RADIO_BASE + index) }
        {
            unsafe {
                let _ = EnableWindow(hwnd_radio, enabled);
            }
        }
    }
}

/*
 * Dialog procedure for the Settings dialog. Initializes the controls from
 * the working copy, commits every toggle immediately, and ends the dialog
 * on dismissal. There is no OK/Cancel distinction; closing by any means
 * keeps the edits already made.
 */
unsafe extern "system" fn settings_dialog_proc(
    hdlg: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> isize {
    match msg {
        WM_INITDIALOG => {
            unsafe { SetWindowLongPtrW(hdlg, GWLP_USERDATA, lparam.0) };
            let state = unsafe { &*(lparam.0 as *const SettingsDialogState) };
            unsafe {
                let check = if state.enabled {
                    DLG_BUTTON_CHECK_STATE(1)
                } else {
                    DLG_BUTTON_CHECK_STATE(0)
                };
                CheckDlgButton(hdlg, ID_DIALOG_SETTINGS_ENABLE_CHECKBOX, check)
                    .unwrap_or_default();
                CheckRadioButton(
                    hdlg,
                    ID_DIALOG_SETTINGS_RADIO_BASE,
                    ID_DIALOG_SETTINGS_RADIO_BASE + ModifierKind::ALL.len() as i32 - 1,
                    radio_id_for_kind(state.kind),
                )
                .unwrap_or_default();
            }
            set_radio_group_enabled(hdlg, state.enabled);
            TRUE.0 as isize
        }
        WM_COMMAND => {
            let command_id = loword_from_wparam(wparam) as i32;
            let state_ptr =
                unsafe { GetWindowLongPtrW(hdlg, GWLP_USERDATA) } as *mut SettingsDialogState;
            if state_ptr.is_null() {
                return FALSE.0 as isize;
            }
            let state = unsafe { &mut *state_ptr };

            if command_id == ID_DIALOG_SETTINGS_ENABLE_CHECKBOX {
                let checked = unsafe {
                    IsDlgButtonChecked(hdlg, ID_DIALOG_SETTINGS_ENABLE_CHECKBOX) == 1
                };
                state.enabled = checked;
                set_radio_group_enabled(hdlg, checked);
                log::debug!("SettingsDialog: Modifiers enabled: {checked}");
                return TRUE.0 as isize;
            }
            if let Some(kind) = kind_for_radio_id(command_id) {
                state.kind = kind;
                log::debug!("SettingsDialog: Modifier selected: {kind}");
                return TRUE.0 as isize;
            }
            // Escape, the title-bar close box and Enter all dismiss the
            // dialog; edits are already committed, so they are equivalent.
            if command_id == IDCANCEL.0 || command_id == IDOK.0 {
                unsafe { EndDialog(hdlg, command_id as isize).unwrap_or_default() };
                return TRUE.0 as isize;
            }
            FALSE.0 as isize
        }
        _ => FALSE.0 as isize,
    }
}

/*
 * Builds the Settings dialog template in memory: a heading, the activation
 * checkbox, and one auto radio button per modifier kind.
 */
fn build_settings_dialog_template(template_bytes: &mut Vec<u8>) {
    let control_count = 2 + ModifierKind::ALL.len() as u16;
    push_dialog_header(template_bytes, "Settings", control_count, 160, 110);

    push_dialog_item(
        template_bytes,
        WS_CHILD.0 | WS_VISIBLE.0 | window_common::SS_LEFT.0,
        10,
        8,
        140,
        10,
        ID_DIALOG_SETTINGS_HEADING,
        "Static",
        "Output text modifiers",
    );
    push_dialog_item(
        template_bytes,
        WS_CHILD.0 | WS_VISIBLE.0 | WS_TABSTOP.0 | BS_AUTOCHECKBOX as u32,
        10,
        22,
        140,
        12,
        ID_DIALOG_SETTINGS_ENABLE_CHECKBOX,
        "Button",
        "Activate modifiers",
    );

    for (index, kind) in ModifierKind::ALL.iter().enumerate() {
        let mut style = WS_CHILD.0 | WS_VISIBLE.0 | BS_AUTORADIOBUTTON as u32;
        if index == 0 {
            style |= WS_GROUP.0 | WS_TABSTOP.0;
        }
        push_dialog_item(
            template_bytes,
            style,
            18,
            42 + (index as i16) * 15,
            120,
            12,
            ID_DIALOG_SETTINGS_RADIO_BASE + index as i32,
            "Button",
            &kind.to_string(),
        );
    }
}

/*
 * Handles the `ShowSettingsDialog` platform command. Runs the modal dialog
 * seeded with the current configuration and, once it is dismissed (by any
 * means), sends `AppEvent::SettingsDialogCompleted` with the final state of
 * the working copy, exactly once per invocation.
 */
pub(crate) fn handle_show_settings_dialog_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    enabled: bool,
    kind: ModifierKind,
) -> PlatformResult<()> {
    log::info!("DialogHandler: Settings dialog opened.");
    let hwnd_owner = get_hwnd_owner(internal_state, window_id)?;

    let mut dialog_state = SettingsDialogState { enabled, kind };
    let mut template_bytes = Vec::<u8>::new();
    build_settings_dialog_template(&mut template_bytes);

    let dialog_result = unsafe {
        DialogBoxIndirectParamW(
            Some(internal_state.h_instance()),
            template_bytes.as_ptr() as *const DLGTEMPLATE,
            Some(hwnd_owner),
            Some(settings_dialog_proc),
            LPARAM(&mut dialog_state as *mut _ as isize),
        )
    };
    if dialog_result == -1 {
        return Err(PlatformError::OperationFailed(
            "DialogBoxIndirectParamW failed for Settings dialog".into(),
        ));
    }

    log::debug!("DialogHandler: Settings dialog closed.");
    internal_state.send_event(AppEvent::SettingsDialogCompleted {
        window_id,
        enabled: dialog_state.enabled,
        kind: dialog_state.kind,
    });
    Ok(())
}

// --- About Dialog ---

/*
 * Dialog procedure for the About dialog. All content is set during
 * WM_INITDIALOG from the `AboutDialogContent` passed through the LPARAM;
 * afterwards the dialog is inert until dismissed.
 */
unsafe extern "system" fn about_dialog_proc(
    hdlg: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> isize {
    match msg {
        WM_INITDIALOG => {
            let content = unsafe { &*(lparam.0 as *const AboutDialogContent) };
            unsafe {
                SetDlgItemTextW(
                    hdlg,
                    ID_DIALOG_ABOUT_NAME,
                    &HSTRING::from(content.app_name.as_str()),
                )
                .unwrap_or_default();
                SetDlgItemTextW(
                    hdlg,
                    ID_DIALOG_ABOUT_VERSION,
                    &HSTRING::from(format!("v {}", content.version)),
                )
                .unwrap_or_default();
                SetDlgItemTextW(
                    hdlg,
                    ID_DIALOG_ABOUT_AUTHOR,
                    &HSTRING::from(format!("{}\n{}", content.author, content.created)),
                )
                .unwrap_or_default();
                SetDlgItemTextW(
                    hdlg,
                    ID_DIALOG_ABOUT_BODY,
                    &HSTRING::from(content.body.as_str()),
                )
                .unwrap_or_default();
            }
            TRUE.0 as isize
        }
        WM_COMMAND => {
            let command_id = loword_from_wparam(wparam) as i32;
            if command_id == IDCANCEL.0 || command_id == IDOK.0 {
                unsafe { EndDialog(hdlg, command_id as isize).unwrap_or_default() };
                return TRUE.0 as isize;
            }
            FALSE.0 as isize
        }
        _ => FALSE.0 as isize,
    }
}

/*
 * Builds the About dialog template: centered name, version and author
 * lines, then the word-wrapped body text. Texts are placeholders; the real
 * content is set in WM_INITDIALOG.
 */
fn build_about_dialog_template(template_bytes: &mut Vec<u8>) {
    push_dialog_header(template_bytes, "About", 4, 220, 150);

    push_dialog_item(
        template_bytes,
        WS_CHILD.0 | WS_VISIBLE.0 | window_common::SS_CENTER.0,
        10,
        8,
        200,
        12,
        ID_DIALOG_ABOUT_NAME,
        "Static",
        "",
    );
    push_dialog_item(
        template_bytes,
        WS_CHILD.0 | WS_VISIBLE.0 | window_common::SS_CENTER.0,
        10,
        22,
        200,
        10,
        ID_DIALOG_ABOUT_VERSION,
        "Static",
        "",
    );
    push_dialog_item(
        template_bytes,
        WS_CHILD.0 | WS_VISIBLE.0 | window_common::SS_CENTER.0,
        10,
        34,
        200,
        20,
        ID_DIALOG_ABOUT_AUTHOR,
        "Static",
        "",
    );
    push_dialog_item(
        template_bytes,
        WS_CHILD.0 | WS_VISIBLE.0 | window_common::SS_LEFT.0,
        16,
        60,
        188,
        80,
        ID_DIALOG_ABOUT_BODY,
        "Static",
        "",
    );
}

/*
 * Handles the `ShowAboutDialog` platform command. The content (including
 * the externally loaded body text) is fully resolved by the caller; this
 * function only renders it modally. No completion event exists.
 */
pub(crate) fn handle_show_about_dialog_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    content: AboutDialogContent,
) -> PlatformResult<()> {
    log::info!("DialogHandler: About dialog opened.");
    let hwnd_owner = get_hwnd_owner(internal_state, window_id)?;

    let mut template_bytes = Vec::<u8>::new();
    build_about_dialog_template(&mut template_bytes);

    let dialog_result = unsafe {
        DialogBoxIndirectParamW(
            Some(internal_state.h_instance()),
            template_bytes.as_ptr() as *const DLGTEMPLATE,
            Some(hwnd_owner),
            Some(about_dialog_proc),
            LPARAM(&content as *const _ as isize),
        )
    };
    if dialog_result == -1 {
        return Err(PlatformError::OperationFailed(
            "DialogBoxIndirectParamW failed for About dialog".into(),
        ));
    }
    log::debug!("DialogHandler: About dialog closed.");
    Ok(())
}

/*
 * Retrieves the owner HWND for a given WindowId, failing with
 * `InvalidHandle` when the window is gone or was never fully created.
 */
fn get_hwnd_owner(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
) -> PlatformResult<HWND> {
    internal_state.with_window_data_read(window_id, |window_data| {
        let hwnd = window_data.hwnd();
        if hwnd.is_invalid() {
            return Err(PlatformError::InvalidHandle(format!(
                "HWND for {window_id:?} is invalid"
            )));
        }
        Ok(hwnd)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radio_id_round_trip() {
        // Arrange / Act / Assert
        for kind in ModifierKind::ALL {
            let id = radio_id_for_kind(kind);
            assert_eq!(kind_for_radio_id(id), Some(kind));
        }
    }

    #[test]
    fn test_unknown_radio_id_maps_to_none() {
        assert_eq!(kind_for_radio_id(ID_DIALOG_SETTINGS_RADIO_BASE - 1), None);
        assert_eq!(
            kind_for_radio_id(ID_DIALOG_SETTINGS_RADIO_BASE + ModifierKind::ALL.len() as i32),
            None
        );
    }

    #[test]
    fn test_dialog_templates_build_past_their_headers() {
        // Arrange / Act
        let mut settings_bytes = Vec::new();
        build_settings_dialog_template(&mut settings_bytes);
        let mut about_bytes = Vec::new();
        build_about_dialog_template(&mut about_bytes);

        // Assert
        assert!(settings_bytes.len() > size_of::<DLGTEMPLATE>());
        assert!(about_bytes.len() > size_of::<DLGTEMPLATE>());
    }
}
