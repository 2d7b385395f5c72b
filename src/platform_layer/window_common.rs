/*
 * Shared Win32 windowing machinery: the per-window native data, window
 * class registration, the WndProc that translates native messages into
 * `AppEvent`s, and the rule-based docking layout applied on WM_SIZE.
 */

use super::app::Win32ApiInternalState;
use super::controls::{button_handler, input_handler, label_handler, menu_handler};
use super::error::{PlatformError, Result as PlatformResult};
use super::types::{AppEvent, DockStyle, LayoutRule, MenuAction, MessageSeverity, WindowId};

use windows::{
    Win32::{
        Foundation::{
            ERROR_INVALID_WINDOW_HANDLE, GetLastError, HWND, LPARAM, LRESULT, RECT, WPARAM,
        },
        Graphics::Gdi::{COLOR_WINDOW, HBRUSH, HDC},
        UI::WindowsAndMessaging::*,
    },
    core::{HSTRING, PCWSTR, w},
};

use std::collections::HashMap;
use std::ffi::c_void;
use std::sync::Arc;

// Native control class names.
pub(crate) const WC_BUTTON: PCWSTR = w!("BUTTON");
pub(crate) const WC_STATIC: PCWSTR = w!("STATIC");
pub(crate) const WC_EDIT: PCWSTR = w!("EDIT");

// STATIC control styles not exposed as typed constants by the bindings.
pub(crate) const SS_LEFT: WINDOW_STYLE = WINDOW_STYLE(0x0000_0000);
pub(crate) const SS_CENTER: WINDOW_STYLE = WINDOW_STYLE(0x0000_0001);
pub(crate) const SS_ETCHEDHORZ: WINDOW_STYLE = WINDOW_STYLE(0x0000_0010);

// Edit control notification codes (HIWORD of WM_COMMAND's wParam).
pub(crate) const EN_CHANGE_CODE: u32 = 0x0300;
pub(crate) const BN_CLICKED_CODE: u32 = 0;

// Control IDs used inside the modal dialog templates.
pub(crate) const ID_DIALOG_SETTINGS_HEADING: i32 = 2001;
pub(crate) const ID_DIALOG_SETTINGS_ENABLE_CHECKBOX: i32 = 2002;
/// First radio button ID; the remaining kinds follow consecutively.
pub(crate) const ID_DIALOG_SETTINGS_RADIO_BASE: i32 = 2010;
pub(crate) const ID_DIALOG_ABOUT_NAME: i32 = 2101;
pub(crate) const ID_DIALOG_ABOUT_VERSION: i32 = 2102;
pub(crate) const ID_DIALOG_ABOUT_AUTHOR: i32 = 2103;
pub(crate) const ID_DIALOG_ABOUT_BODY: i32 = 2104;

/// Holds native data associated with one window managed by the platform layer.
#[derive(Debug)]
pub(crate) struct NativeWindowData {
    this_window_hwnd: HWND,
    logical_window_id: WindowId,
    /// Maps logical control IDs to native control handles.
    control_hwnd_map: HashMap<i32, HWND>,
    /// Maps generated native menu item IDs to semantic actions.
    menu_action_map: HashMap<i32, MenuAction>,
    next_menu_item_id: i32,
    layout_rules: Option<Vec<LayoutRule>>,
    label_severities: HashMap<i32, MessageSeverity>,
}

impl NativeWindowData {
    pub(crate) fn new(logical_window_id: WindowId) -> Self {
        NativeWindowData {
            this_window_hwnd: HWND(std::ptr::null_mut()),
            logical_window_id,
            control_hwnd_map: HashMap::new(),
            menu_action_map: HashMap::new(),
            next_menu_item_id: 30000,
            layout_rules: None,
            label_severities: HashMap::new(),
        }
    }

    pub(crate) fn hwnd(&self) -> HWND {
        self.this_window_hwnd
    }

    pub(crate) fn set_hwnd(&mut self, hwnd: HWND) {
        self.this_window_hwnd = hwnd;
    }

    pub(crate) fn has_control(&self, control_id: i32) -> bool {
        self.control_hwnd_map.contains_key(&control_id)
    }

    pub(crate) fn register_control_hwnd(&mut self, control_id: i32, hwnd: HWND) {
        self.control_hwnd_map.insert(control_id, hwnd);
    }

    pub(crate) fn get_control_hwnd(&self, control_id: i32) -> Option<HWND> {
        self.control_hwnd_map.get(&control_id).copied()
    }

    pub(crate) fn generate_menu_item_id(&mut self) -> i32 {
        let id = self.next_menu_item_id;
        self.next_menu_item_id += 1;
        id
    }

    pub(crate) fn register_menu_action(&mut self, native_id: i32, action: MenuAction) {
        log::debug!(
            "Platform: Mapping menu action {action:?} to native ID {native_id} for window {:?}.",
            self.logical_window_id
        );
        self.menu_action_map.insert(native_id, action);
    }

    pub(crate) fn get_menu_action(&self, native_id: i32) -> Option<MenuAction> {
        self.menu_action_map.get(&native_id).copied()
    }

    pub(crate) fn set_layout_rules(&mut self, rules: Vec<LayoutRule>) {
        self.layout_rules = Some(rules);
    }

    pub(crate) fn set_label_severity(&mut self, control_id: i32, severity: MessageSeverity) {
        self.label_severities.insert(control_id, severity);
    }

    pub(crate) fn get_label_severity(&self, control_id: i32) -> Option<MessageSeverity> {
        self.label_severities.get(&control_id).copied()
    }
}

/// Context passed to `CreateWindowExW` via `lpCreateParams` so the static
/// WndProc can recover the shared state for this window instance.
struct WindowCreationContext {
    internal_state_arc: Arc<Win32ApiInternalState>,
    window_id: WindowId,
}

fn window_class_name(internal_state: &Arc<Win32ApiInternalState>) -> HSTRING {
    HSTRING::from(format!(
        "{}_PlatformWindowClass",
        internal_state.app_name_for_class()
    ))
}

/*
 * Registers the main window class for the application. Called once during
 * platform initialization; registering an already-registered class is a
 * silent no-op.
 */
pub(crate) fn register_window_class(
    internal_state: &Arc<Win32ApiInternalState>,
) -> PlatformResult<()> {
    let class_name_hstring = window_class_name(internal_state);
    let class_name_pcwstr = PCWSTR(class_name_hstring.as_ptr());

    unsafe {
        let mut wc_probe = WNDCLASSEXW::default();
        if GetClassInfoExW(
            Some(internal_state.h_instance()),
            class_name_pcwstr,
            &mut wc_probe,
        )
        .is_ok()
        {
            return Ok(());
        }

        let wc = WNDCLASSEXW {
            cbSize: std::mem::size_of::<WNDCLASSEXW>() as u32,
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc_router),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: internal_state.h_instance(),
            hIcon: LoadIconW(None, IDI_APPLICATION)?,
            hCursor: LoadCursorW(None, IDC_ARROW)?,
            hbrBackground: HBRUSH((COLOR_WINDOW.0 + 1) as *mut c_void),
            lpszMenuName: PCWSTR::null(),
            lpszClassName: class_name_pcwstr,
            hIconSm: LoadIconW(None, IDI_APPLICATION)?,
        };

        if RegisterClassExW(&wc) == 0 {
            let error = GetLastError();
            Err(PlatformError::InitializationFailed(format!(
                "RegisterClassExW failed: {error:?}"
            )))
        } else {
            Ok(())
        }
    }
}

/// Creates a native top-level window with the registered class.
pub(crate) fn create_native_window(
    internal_state_arc: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    title: &str,
    width: i32,
    height: i32,
) -> PlatformResult<HWND> {
    let class_name_hstring = window_class_name(internal_state_arc);

    let creation_context = Box::new(WindowCreationContext {
        internal_state_arc: Arc::clone(internal_state_arc),
        window_id,
    });

    unsafe {
        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            &class_name_hstring,
            &HSTRING::from(title),
            WS_OVERLAPPEDWINDOW,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            width,
            height,
            None,
            None,
            Some(internal_state_arc.h_instance()),
            Some(Box::into_raw(creation_context) as *mut c_void),
        )?;
        Ok(hwnd)
    }
}

/// Extracts the low-order 16-bit value from an LPARAM (e.g. a width).
#[inline]
pub(crate) fn loword_from_lparam(lparam: LPARAM) -> i32 {
    (lparam.0 & 0xFFFF) as i32
}

/// Extracts the high-order 16-bit value from an LPARAM (e.g. a height).
#[inline]
pub(crate) fn hiword_from_lparam(lparam: LPARAM) -> i32 {
    ((lparam.0 >> 16) & 0xFFFF) as i32
}

#[inline]
fn loword_from_wparam(wparam: WPARAM) -> i32 {
    (wparam.0 & 0xFFFF) as i32
}

#[inline]
fn hiword_from_wparam(wparam: WPARAM) -> u32 {
    ((wparam.0 >> 16) & 0xFFFF) as u32
}

/*
 * The window procedure router for all windows created by this platform
 * layer. It recovers the per-window `WindowCreationContext` stored in
 * GWLP_USERDATA and delegates to `handle_window_message`.
 */
unsafe extern "system" fn wnd_proc_router(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let context_ptr = if msg == WM_NCCREATE {
        let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
        let context_raw_ptr = create_struct.lpCreateParams as *mut WindowCreationContext;
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, context_raw_ptr as isize) };
        context_raw_ptr
    } else {
        unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut WindowCreationContext }
    };

    if context_ptr.is_null() {
        // Messages before WM_NCCREATE or after WM_NCDESTROY cleanup.
        return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
    }

    let context = unsafe { &*context_ptr };
    let internal_state_arc = Arc::clone(&context.internal_state_arc);
    let window_id = context.window_id;

    let result = handle_window_message(&internal_state_arc, hwnd, msg, wparam, lparam, window_id);

    if msg == WM_NCDESTROY {
        // Final message; reclaim and drop the context box.
        let _ = unsafe { Box::from_raw(context_ptr) };
        unsafe { SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) };
    }

    result
}

fn handle_window_message(
    internal_state: &Arc<Win32ApiInternalState>,
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
    window_id: WindowId,
) -> LRESULT {
    match msg {
        WM_SIZE => {
            let width = loword_from_lparam(lparam);
            let height = hiword_from_lparam(lparam);
            apply_layout(internal_state, window_id, width, height);
            internal_state.send_event(AppEvent::WindowResized {
                window_id,
                width,
                height,
            });
            LRESULT(0)
        }
        WM_COMMAND => {
            let command_id = loword_from_wparam(wparam);
            let notification_code = hiword_from_wparam(wparam);
            let event = if lparam.0 == 0 {
                // Menu item (or accelerator) source.
                menu_handler::handle_wm_command_for_menu(internal_state, window_id, command_id)
            } else {
                let hwnd_control = HWND(lparam.0 as *mut c_void);
                match notification_code {
                    BN_CLICKED_CODE => {
                        Some(button_handler::handle_bn_clicked(window_id, command_id))
                    }
                    EN_CHANGE_CODE => input_handler::handle_en_change(
                        window_id,
                        command_id,
                        hwnd_control,
                    ),
                    _ => None,
                }
            };
            if let Some(event) = event {
                internal_state.send_event(event);
                return LRESULT(0);
            }
            unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
        }
        WM_CTLCOLORSTATIC => {
            let hdc = HDC(wparam.0 as *mut c_void);
            let hwnd_static = HWND(lparam.0 as *mut c_void);
            match label_handler::handle_wm_ctlcolorstatic(internal_state, window_id, hdc, hwnd_static)
            {
                Some(result) => result,
                None => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
            }
        }
        WM_CLOSE => {
            log::debug!("Platform: WM_CLOSE for window {window_id:?}.");
            // The app logic decides whether the window actually closes; it
            // answers with a CloseWindow command which destroys the window.
            internal_state.send_event(AppEvent::WindowCloseRequested { window_id });
            LRESULT(0)
        }
        WM_DESTROY => {
            log::debug!("Platform: WM_DESTROY for window {window_id:?}.");
            if let Ok(mut windows_guard) = internal_state.active_windows.write() {
                windows_guard.remove(&window_id);
            }
            internal_state.send_event(AppEvent::WindowDestroyed { window_id });
            internal_state.decrement_active_windows();
            LRESULT(0)
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

// --- Rule-based docking layout ---

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

/*
 * Applies the stored layout rules to the window's current client size.
 * Used right after `DefineLayout` so controls are positioned even before
 * the first real WM_SIZE arrives.
 */
pub(crate) fn apply_layout_for_current_size(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
) -> PlatformResult<()> {
    let hwnd = internal_state.with_window_data_read(window_id, |window_data| Ok(window_data.hwnd()))?;
    let mut client_rect = RECT::default();
    unsafe { GetClientRect(hwnd, &mut client_rect)? };
    apply_layout(
        internal_state,
        window_id,
        client_rect.right - client_rect.left,
        client_rect.bottom - client_rect.top,
    );
    Ok(())
}

/*
 * Applies the window's stored layout rules to the new client size. The
 * target rectangles are computed under the read lock, but the actual
 * `SetWindowPos` calls happen after the lock is released since moving
 * controls can synchronously re-enter the WndProc.
 */
fn apply_layout(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    client_width: i32,
    client_height: i32,
) {
    let placements: PlatformResult<Vec<(HWND, Rect)>> =
        internal_state.with_window_data_read(window_id, |window_data| {
            let Some(rules) = window_data.layout_rules.as_ref() else {
                return Ok(Vec::new());
            };
            Ok(compute_placements(
                rules,
                client_width,
                client_height,
                |control_id| window_data.get_control_hwnd(control_id),
            ))
        });

    let placements = match placements {
        Ok(p) => p,
        Err(e) => {
            log::warn!("Platform: Layout skipped for {window_id:?}: {e}");
            return;
        }
    };

    for (hwnd_control, rect) in placements {
        unsafe {
            if let Err(e) = SetWindowPos(
                hwnd_control,
                None,
                rect.x,
                rect.y,
                rect.width.max(0),
                rect.height.max(0),
                SWP_NOZORDER | SWP_NOACTIVATE,
            ) {
                log::warn!("Platform: SetWindowPos failed during layout: {e}");
            }
        }
    }
}

/*
 * Computes target rectangles for every control with a layout rule. Controls
 * parented to the main window are placed first; controls inside panels are
 * then placed in panel-local coordinates using the panel's computed size.
 */
fn compute_placements(
    rules: &[LayoutRule],
    client_width: i32,
    client_height: i32,
    lookup_hwnd: impl Fn(i32) -> Option<HWND>,
) -> Vec<(HWND, Rect)> {
    let mut placements = Vec::new();
    let mut computed_sizes: HashMap<i32, (i32, i32)> = HashMap::new();

    let mut top_level: Vec<&LayoutRule> = rules
        .iter()
        .filter(|r| r.parent_control_id.is_none())
        .collect();
    top_level.sort_by_key(|r| r.order);
    dock_into(
        &top_level,
        Rect {
            x: 0,
            y: 0,
            width: client_width,
            height: client_height,
        },
        &lookup_hwnd,
        &mut placements,
        &mut computed_sizes,
    );

    let mut panel_ids: Vec<i32> = rules
        .iter()
        .filter_map(|r| r.parent_control_id)
        .collect();
    panel_ids.sort_unstable();
    panel_ids.dedup();

    for panel_id in panel_ids {
        let Some(&(panel_width, panel_height)) = computed_sizes.get(&panel_id) else {
            log::warn!("Platform: Layout rule references unplaced panel {panel_id}.");
            continue;
        };
        let mut children: Vec<&LayoutRule> = rules
            .iter()
            .filter(|r| r.parent_control_id == Some(panel_id))
            .collect();
        children.sort_by_key(|r| r.order);
        dock_into(
            &children,
            Rect {
                x: 0,
                y: 0,
                width: panel_width,
                height: panel_height,
            },
            &lookup_hwnd,
            &mut placements,
            &mut computed_sizes,
        );
    }

    placements
}

fn dock_into(
    rules: &[&LayoutRule],
    mut remaining: Rect,
    lookup_hwnd: &impl Fn(i32) -> Option<HWND>,
    placements: &mut Vec<(HWND, Rect)>,
    computed_sizes: &mut HashMap<i32, (i32, i32)>,
) {
    for rule in rules {
        let (m_top, m_right, m_bottom, m_left) = rule.margin;
        let fixed = rule.fixed_size.unwrap_or(0);
        let rect = match rule.dock_style {
            DockStyle::Top => {
                let rect = Rect {
                    x: remaining.x + m_left,
                    y: remaining.y + m_top,
                    width: remaining.width - m_left - m_right,
                    height: fixed,
                };
                let consumed = m_top + fixed + m_bottom;
                remaining.y += consumed;
                remaining.height -= consumed;
                rect
            }
            DockStyle::Bottom => {
                let rect = Rect {
                    x: remaining.x + m_left,
                    y: remaining.y + remaining.height - m_bottom - fixed,
                    width: remaining.width - m_left - m_right,
                    height: fixed,
                };
                remaining.height -= m_top + fixed + m_bottom;
                rect
            }
            DockStyle::Left => {
                let rect = Rect {
                    x: remaining.x + m_left,
                    y: remaining.y + m_top,
                    width: fixed,
                    height: remaining.height - m_top - m_bottom,
                };
                let consumed = m_left + fixed + m_right;
                remaining.x += consumed;
                remaining.width -= consumed;
                rect
            }
            DockStyle::Right => {
                let rect = Rect {
                    x: remaining.x + remaining.width - m_right - fixed,
                    y: remaining.y + m_top,
                    width: fixed,
                    height: remaining.height - m_top - m_bottom,
                };
                remaining.width -= m_left + fixed + m_right;
                rect
            }
            DockStyle::Fill => Rect {
                x: remaining.x + m_left,
                y: remaining.y + m_top,
                width: remaining.width - m_left - m_right,
                height: remaining.height - m_top - m_bottom,
            },
        };

        computed_sizes.insert(rule.control_id, (rect.width, rect.height));
        match lookup_hwnd(rule.control_id) {
            Some(hwnd_control) => placements.push((hwnd_control, rect)),
            None => log::warn!(
                "Platform: Layout rule for unknown control ID {}.",
                rule.control_id
            ),
        }
    }
}

// --- Helpers used by the command executor ---

pub(crate) fn set_window_title(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    title: &str,
) -> PlatformResult<()> {
    let hwnd = internal_state.with_window_data_read(window_id, |window_data| Ok(window_data.hwnd()))?;
    unsafe { SetWindowTextW(hwnd, &HSTRING::from(title))? };
    Ok(())
}

pub(crate) fn show_window(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
    show: bool,
) -> PlatformResult<()> {
    let hwnd = internal_state.with_window_data_read(window_id, |window_data| Ok(window_data.hwnd()))?;
    let cmd = if show { SW_SHOW } else { SW_HIDE };
    unsafe {
        let _ = ShowWindow(hwnd, cmd);
    }
    Ok(())
}

/// Destroys a native window. Called in response to the app logic confirming
/// a close; WM_DESTROY handling takes care of the bookkeeping.
pub(crate) fn destroy_native_window(
    internal_state: &Arc<Win32ApiInternalState>,
    window_id: WindowId,
) -> PlatformResult<()> {
    let hwnd = match internal_state.with_window_data_read(window_id, |window_data| Ok(window_data.hwnd()))
    {
        Ok(hwnd) => hwnd,
        // Already gone; not an error.
        Err(_) => return Ok(()),
    };
    if hwnd.is_invalid() {
        return Ok(());
    }
    unsafe {
        if let Err(e) = DestroyWindow(hwnd) {
            let last_error = GetLastError();
            if last_error.0 != ERROR_INVALID_WINDOW_HANDLE.0 {
                log::error!("Platform: DestroyWindow failed for {window_id:?}: {e}");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(
        control_id: i32,
        parent: Option<i32>,
        dock_style: DockStyle,
        order: u32,
        fixed_size: Option<i32>,
    ) -> LayoutRule {
        LayoutRule {
            control_id,
            parent_control_id: parent,
            dock_style,
            order,
            fixed_size,
            margin: (0, 0, 0, 0),
        }
    }

    fn fake_hwnd(control_id: i32) -> Option<HWND> {
        Some(HWND(control_id as usize as *mut c_void))
    }

    #[test]
    fn test_dock_top_then_fill_consumes_in_order() {
        // Arrange
        let rules = vec![
            rule(1, None, DockStyle::Top, 0, Some(20)),
            rule(2, None, DockStyle::Fill, 10, None),
        ];

        // Act
        let placements = compute_placements(&rules, 200, 100, fake_hwnd);

        // Assert
        assert_eq!(placements.len(), 2);
        let (_, top) = placements[0];
        let (_, fill) = placements[1];
        assert_eq!((top.x, top.y, top.width, top.height), (0, 0, 200, 20));
        assert_eq!((fill.x, fill.y, fill.width, fill.height), (0, 20, 200, 80));
    }

    #[test]
    fn test_dock_bottom_and_margins() {
        // Arrange
        let mut bottom = rule(1, None, DockStyle::Bottom, 0, Some(30));
        bottom.margin = (2, 4, 6, 8);
        let rules = vec![bottom];

        // Act
        let placements = compute_placements(&rules, 100, 100, fake_hwnd);

        // Assert
        let (_, r) = placements[0];
        assert_eq!((r.x, r.y, r.width, r.height), (8, 64, 88, 30));
    }

    #[test]
    fn test_panel_children_use_panel_local_coordinates() {
        // Arrange
        let rules = vec![
            rule(10, None, DockStyle::Top, 0, Some(30)),
            rule(11, Some(10), DockStyle::Right, 0, Some(40)),
            rule(12, Some(10), DockStyle::Fill, 1, None),
        ];

        // Act
        let placements = compute_placements(&rules, 200, 100, fake_hwnd);

        // Assert
        assert_eq!(placements.len(), 3);
        let (_, button) = placements[1];
        let (_, input) = placements[2];
        // The right-docked child sits at the panel's right edge, locally.
        assert_eq!((button.x, button.y, button.width, button.height), (160, 0, 40, 30));
        assert_eq!((input.x, input.y, input.width, input.height), (0, 0, 160, 30));
    }

    #[test]
    fn test_unknown_control_is_skipped() {
        // Arrange
        let rules = vec![rule(1, None, DockStyle::Top, 0, Some(20))];

        // Act
        let placements = compute_placements(&rules, 100, 100, |_| None);

        // Assert
        assert!(placements.is_empty());
    }
}
