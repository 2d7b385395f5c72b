/*
 * Encapsulates Win32-specific menu creation and command routing. Menu items
 * carry semantic `MenuAction`s; native menu item IDs are generated per
 * window and mapped back to their action when WM_COMMAND arrives.
 */

use crate::platform_layer::app::Win32ApiInternalState;
use crate::platform_layer::error::{PlatformError, Result as PlatformResult};
use crate::platform_layer::types::{AppEvent, MenuItemConfig, WindowId};
use crate::platform_layer::window_common::NativeWindowData;

use std::sync::Arc;
use windows::Win32::{
    Foundation::GetLastError,
    UI::WindowsAndMessaging::{
        AppendMenuW, CreateMenu, CreatePopupMenu, DestroyMenu, HMENU, MF_POPUP, MF_STRING, SetMenu,
    },
};
use windows::core::HSTRING;

/*
 * Handles the `CreateMainMenu` command: builds the native menu structure
 * and attaches it to the window. On any failure the partially built menu is
 * destroyed.
 */
pub(crate) fn handle_create_main_menu_command(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    menu_items: Vec<MenuItemConfig>,
) -> PlatformResult<()> {
    log::debug!("MenuHandler: Creating main menu for window {window_id:?}.");
    let h_main_menu = unsafe { CreateMenu()? };

    let build_result = internal_state.with_window_data_write(window_id, |window_data| {
        if window_data.hwnd().is_invalid() {
            return Err(PlatformError::InvalidHandle(format!(
                "HWND not yet valid for {window_id:?} during menu creation"
            )));
        }
        for item_config in &menu_items {
            unsafe { add_menu_item_recursive(h_main_menu, item_config, window_data)? };
        }
        Ok(window_data.hwnd())
    });

    let hwnd_owner = match build_result {
        Ok(hwnd) => hwnd,
        Err(e) => {
            unsafe { DestroyMenu(h_main_menu).unwrap_or_default() };
            return Err(e);
        }
    };

    if unsafe { SetMenu(hwnd_owner, Some(h_main_menu)) }.is_err() {
        unsafe { DestroyMenu(h_main_menu).unwrap_or_default() };
        return Err(PlatformError::OperationFailed(format!(
            "SetMenu failed for window {window_id:?}: {:?}",
            unsafe { GetLastError() }
        )));
    }
    Ok(())
}

/*
 * Recursively appends menu items. Leaf items with an action get a generated
 * native ID registered in the window's action map; items with children
 * become popup submenus.
 */
unsafe fn add_menu_item_recursive(
    parent_menu_handle: HMENU,
    item_config: &MenuItemConfig,
    window_data: &mut NativeWindowData,
) -> PlatformResult<()> {
    if item_config.children.is_empty() {
        if let Some(action) = item_config.action {
            let generated_id = window_data.generate_menu_item_id();
            window_data.register_menu_action(generated_id, action);
            unsafe {
                AppendMenuW(
                    parent_menu_handle,
                    MF_STRING,
                    generated_id as usize,
                    &HSTRING::from(item_config.text.as_str()),
                )?
            };
        } else {
            log::warn!(
                "MenuHandler: Menu item '{}' has neither children nor an action; it will be inert.",
                item_config.text
            );
        }
    } else {
        let h_submenu = unsafe { CreatePopupMenu()? };
        for child_config in &item_config.children {
            unsafe { add_menu_item_recursive(h_submenu, child_config, window_data)? };
        }
        unsafe {
            AppendMenuW(
                parent_menu_handle,
                MF_POPUP,
                h_submenu.0 as usize,
                &HSTRING::from(item_config.text.as_str()),
            )?
        };
    }
    Ok(())
}

/*
 * Translates a menu-sourced WM_COMMAND into an `AppEvent::MenuActionClicked`
 * when the native ID maps to a registered action.
 */
pub(crate) fn handle_wm_command_for_menu(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    native_menu_id: i32,
) -> Option<AppEvent> {
    let action = internal_state
        .with_window_data_read(window_id, |window_data| {
            Ok(window_data.get_menu_action(native_menu_id))
        })
        .ok()
        .flatten()?;
    log::debug!("MenuHandler: Menu action {action:?} clicked in window {window_id:?}.");
    Some(AppEvent::MenuActionClicked { action })
}
