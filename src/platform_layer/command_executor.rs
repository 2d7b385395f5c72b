/*
 * Dispatches `PlatformCommand`s to the control handlers. This keeps the
 * command-to-implementation mapping in one place, so `app.rs` only drains
 * the queue and the handlers stay focused on their control family.
 */

use super::app::Win32ApiInternalState;
use super::controls::{
    button_handler, dialog_handler, input_handler, label_handler, menu_handler,
    output_view_handler, panel_handler,
};
use super::error::{PlatformError, Result as PlatformResult};
use super::types::{AppEvent, PlatformCommand, WindowId};
use super::window_common;

use std::sync::Arc;
use windows::Win32::UI::Input::KeyboardAndMouse::EnableWindow;
use windows::Win32::UI::WindowsAndMessaging::PostQuitMessage;

/// Executes a single platform command, routing it to the matching handler.
pub(crate) fn execute(
    internal_state: &Arc<Win32ApiInternalState>,
    command: PlatformCommand,
) -> PlatformResult<()> {
    match command {
        PlatformCommand::SetWindowTitle { window_id, title } => {
            window_common::set_window_title(internal_state, window_id, &title)
        }
        PlatformCommand::ShowWindow { window_id } => {
            window_common::show_window(internal_state, window_id, true)
        }
        PlatformCommand::CloseWindow { window_id } => {
            window_common::destroy_native_window(internal_state, window_id)
        }
        PlatformCommand::QuitApplication => {
            log::debug!("CommandExecutor: QuitApplication, posting WM_QUIT.");
            unsafe { PostQuitMessage(0) };
            Ok(())
        }
        PlatformCommand::CreateMainMenu {
            window_id,
            menu_items,
        } => menu_handler::handle_create_main_menu_command(internal_state, window_id, menu_items),
        PlatformCommand::CreatePanel {
            window_id,
            parent_control_id,
            panel_id,
        } => panel_handler::handle_create_panel_command(
            internal_state,
            window_id,
            parent_control_id,
            panel_id,
        ),
        PlatformCommand::CreateLabel {
            window_id,
            parent_control_id,
            label_id,
            initial_text,
            kind,
        } => label_handler::handle_create_label_command(
            internal_state,
            window_id,
            parent_control_id,
            label_id,
            initial_text,
            kind,
        ),
        PlatformCommand::CreateButton {
            window_id,
            parent_control_id,
            control_id,
            text,
        } => button_handler::handle_create_button_command(
            internal_state,
            window_id,
            parent_control_id,
            control_id,
            text,
        ),
        PlatformCommand::CreateInput {
            window_id,
            parent_control_id,
            control_id,
            initial_text,
        } => input_handler::handle_create_input_command(
            internal_state,
            window_id,
            parent_control_id,
            control_id,
            initial_text,
        ),
        PlatformCommand::CreateOutputView {
            window_id,
            control_id,
        } => output_view_handler::handle_create_output_view_command(
            internal_state,
            window_id,
            control_id,
        ),
        PlatformCommand::SetControlEnabled {
            window_id,
            control_id,
            enabled,
        } => execute_set_control_enabled(internal_state, window_id, control_id, enabled),
        PlatformCommand::SetInputText {
            window_id,
            control_id,
            text,
        } => input_handler::handle_set_input_text_command(internal_state, window_id, control_id, text),
        PlatformCommand::UpdateLabelText {
            window_id,
            control_id,
            text,
            severity,
        } => label_handler::handle_update_label_text_command(
            internal_state,
            window_id,
            control_id,
            text,
            severity,
        ),
        PlatformCommand::AppendOutputLine {
            window_id,
            control_id,
            line,
        } => output_view_handler::handle_append_output_line_command(
            internal_state,
            window_id,
            control_id,
            &line,
        ),
        PlatformCommand::ClearOutputView {
            window_id,
            control_id,
        } => output_view_handler::handle_clear_output_view_command(
            internal_state,
            window_id,
            control_id,
        ),
        PlatformCommand::DefineLayout { window_id, rules } => {
            log::debug!(
                "CommandExecutor: Storing {} layout rules for window {window_id:?}.",
                rules.len()
            );
            internal_state.with_window_data_write(window_id, |window_data| {
                window_data.set_layout_rules(rules);
                Ok(())
            })?;
            // Position the freshly created controls right away; the first
            // WM_SIZE only arrives once the user resizes the window.
            window_common::apply_layout_for_current_size(internal_state, window_id)
        }
        PlatformCommand::ShowSettingsDialog {
            window_id,
            enabled,
            kind,
        } => dialog_handler::handle_show_settings_dialog_command(
            internal_state,
            window_id,
            enabled,
            kind,
        ),
        PlatformCommand::ShowAboutDialog { window_id, content } => {
            dialog_handler::handle_show_about_dialog_command(internal_state, window_id, content)
        }
        PlatformCommand::SignalMainWindowUiSetupComplete { window_id } => {
            internal_state.send_event(AppEvent::MainWindowUiSetupComplete { window_id });
            Ok(())
        }
    }
}

/// Enables or disables a specific control within a window.
fn execute_set_control_enabled(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    control_id: i32,
    enabled: bool,
) -> PlatformResult<()> {
    let hwnd_ctrl = internal_state.with_window_data_read(window_id, |window_data| {
        window_data.get_control_hwnd(control_id).ok_or_else(|| {
            PlatformError::InvalidHandle(format!(
                "Control ID {control_id} not found in window {window_id:?}"
            ))
        })
    })?;
    unsafe {
        let _ = EnableWindow(hwnd_ctrl, enabled);
    }
    Ok(())
}
