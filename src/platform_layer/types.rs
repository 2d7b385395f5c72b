/*
 * This module defines the data types used for communication between the
 * application logic and the platform layer: identifiers for windows and
 * controls, configurations for UI elements (windows, menus, layout rules),
 * platform-agnostic event types (`AppEvent`), commands for the platform
 * layer (`PlatformCommand`), and the `PlatformEventHandler` trait that the
 * application logic implements. Everything here is plain data; nothing
 * depends on the native toolkit.
 */

use crate::core::ModifierKind;

// An opaque identifier for a native window, managed by the platform layer.
//
// The application logic layer uses this ID to refer to specific windows
// when sending commands or receiving events, without needing to know about
// native window handles like HWND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) usize);

#[cfg(test)]
impl WindowId {
    /// Test-only constructor so presenter tests can fabricate window IDs.
    pub(crate) fn for_test(raw: usize) -> Self {
        WindowId(raw)
    }
}

// --- Semantic Menu Action Identifiers ---

/*
 * Represents logical menu actions in a platform-agnostic way. The platform
 * layer manages the mapping from these actions to dynamically assigned
 * native menu item IDs.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuAction {
    OpenSettings,
    Exit,
    OpenAbout,
}

// --- Data Structures for UI Description (Platform-Agnostic) ---

// Configuration for creating a new native window.
#[derive(Debug, Clone)]
pub struct WindowConfig<'a> {
    pub title: &'a str,
    pub width: i32,
    pub height: i32,
}

/*
 * Configuration for a single menu item, used by `PlatformCommand::CreateMainMenu`.
 * Items that are themselves popups (e.g. a "File" menu opening a submenu)
 * have `action: None` and a non-empty `children` list.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemConfig {
    pub action: Option<MenuAction>,
    pub text: String,
    pub children: Vec<MenuItemConfig>,
}

// Distinguishes ordinary text labels from the etched horizontal separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Text,
    Separator,
}

// --- Layout Primitives ---

/*
 * Defines how a control docks within its parent container. Docked edges are
 * consumed in rule order; a single `Fill` control takes whatever remains.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockStyle {
    Top,
    Bottom,
    Left,
    Right,
    Fill,
}

/*
 * A rule that associates a control (by its logical ID) with a docking style.
 * `order` determines the sequence in which docking calculations are
 * performed; lower values are processed first. `parent_control_id` names the
 * logical ID of the containing panel; `None` means the main window client
 * area.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutRule {
    pub control_id: i32,
    pub parent_control_id: Option<i32>,
    pub dock_style: DockStyle,
    pub order: u32,
    /// For Top/Bottom this is a height, for Left/Right a width. Unused for Fill.
    pub fixed_size: Option<i32>,
    /// (top, right, bottom, left) margins around the control.
    pub margin: (i32, i32, i32, i32),
}

// Everything the About dialog renders, already resolved by the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AboutDialogContent {
    pub app_name: String,
    pub version: String,
    pub author: String,
    pub created: String,
    pub body: String,
}

// Defines the severity of a label message, used for status coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MessageSeverity {
    Information,
    Warning,
    Error,
}

// --- Events from Platform to App Logic ---

/*
 * Platform-agnostic UI events generated by the native toolkit. The platform
 * layer translates native OS events into these and delivers them to the
 * application logic layer.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    WindowCloseRequested {
        window_id: WindowId,
    },
    // Signals that a window and its native resources have been destroyed.
    // The `WindowId` is invalid after this event.
    WindowDestroyed {
        window_id: WindowId,
    },
    WindowResized {
        window_id: WindowId,
        width: i32,
        height: i32,
    },
    // Signals that the initial static UI setup for the main window is complete.
    MainWindowUiSetupComplete {
        window_id: WindowId,
    },
    ButtonClicked {
        window_id: WindowId,
        control_id: i32,
    },
    // Signals that a menu item was clicked, identified by its semantic action.
    MenuActionClicked {
        action: MenuAction,
    },
    // The text of an input field changed; carries the field's current text.
    InputTextChanged {
        window_id: WindowId,
        control_id: i32,
        text: String,
    },
    // Return was pressed inside an input field; carries the field's text.
    InputSubmitted {
        window_id: WindowId,
        control_id: i32,
        text: String,
    },
    /*
     * The modal Settings dialog was dismissed (by any means). Carries the
     * final state of the dialog's working copy; edits were committed live
     * while the dialog was open, so dismissal is the single commit point
     * seen by the presenter.
     */
    SettingsDialogCompleted {
        window_id: WindowId,
        enabled: bool,
        kind: ModifierKind,
    },
}

// --- Commands from App Logic to Platform ---

/*
 * Platform-agnostic commands sent from the application logic to the
 * platform layer, instructing it to create or mutate native UI elements.
 */
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformCommand {
    SetWindowTitle {
        window_id: WindowId,
        title: String,
    },
    ShowWindow {
        window_id: WindowId,
    },
    CloseWindow {
        window_id: WindowId,
    },
    QuitApplication,
    CreateMainMenu {
        window_id: WindowId,
        menu_items: Vec<MenuItemConfig>,
    },
    CreatePanel {
        window_id: WindowId,
        parent_control_id: Option<i32>,
        panel_id: i32,
    },
    CreateLabel {
        window_id: WindowId,
        parent_control_id: Option<i32>,
        label_id: i32,
        initial_text: String,
        kind: LabelKind,
    },
    CreateButton {
        window_id: WindowId,
        parent_control_id: Option<i32>,
        control_id: i32,
        text: String,
    },
    CreateInput {
        window_id: WindowId,
        parent_control_id: Option<i32>,
        control_id: i32,
        initial_text: String,
    },
    // A read-only, scrollable, multi-line text view for the output log.
    CreateOutputView {
        window_id: WindowId,
        control_id: i32,
    },
    SetControlEnabled {
        window_id: WindowId,
        control_id: i32,
        enabled: bool,
    },
    SetInputText {
        window_id: WindowId,
        control_id: i32,
        text: String,
    },
    UpdateLabelText {
        window_id: WindowId,
        control_id: i32,
        text: String,
        severity: MessageSeverity,
    },
    AppendOutputLine {
        window_id: WindowId,
        control_id: i32,
        line: String,
    },
    ClearOutputView {
        window_id: WindowId,
        control_id: i32,
    },
    DefineLayout {
        window_id: WindowId,
        rules: Vec<LayoutRule>,
    },
    // Runs the modal Settings dialog seeded with the current configuration.
    // Completion is reported through `AppEvent::SettingsDialogCompleted`.
    ShowSettingsDialog {
        window_id: WindowId,
        enabled: bool,
        kind: ModifierKind,
    },
    // Runs the modal, read-only About dialog. No completion event exists;
    // the dialog has no feedback path.
    ShowAboutDialog {
        window_id: WindowId,
        content: AboutDialogContent,
    },
    // Signals that all initial UI description commands for the main window
    // have been enqueued and processed.
    SignalMainWindowUiSetupComplete {
        window_id: WindowId,
    },
}

// --- Trait for App Logic to Handle Events ---

// Implemented by the application logic layer to handle UI events.
//
// The platform layer calls `handle_event` to notify the application logic
// about user interactions, then drains the resulting commands through
// `try_dequeue_command` and executes them.
pub trait PlatformEventHandler: Send + Sync + 'static {
    // Handle a single event, enqueueing any `PlatformCommand`s it implies.
    fn handle_event(&mut self, event: AppEvent);

    // Called when the application is about to exit its main loop.
    fn on_quit(&mut self) {}

    // Dequeues a single pending `PlatformCommand`, if any. Called in a loop
    // by the platform layer after each event dispatch.
    fn try_dequeue_command(&mut self) -> Option<PlatformCommand>;
}
