use super::handler::MyAppLogic;
use crate::app_logic::ui_constants;
use crate::core::{
    AboutContent, AboutError, AboutReaderOperations, ModifierKind, ModifierSettings,
};
use crate::platform_layer::{
    AppEvent, MenuAction, PlatformCommand, PlatformEventHandler, WindowId,
};

use std::io;
use std::sync::{Arc, Mutex};

/*
 * Unit tests for `MyAppLogic`. A mock `AboutReaderOperations` isolates the
 * presenter from the filesystem; commands are inspected by draining the
 * pending queue after each event, mirroring how the platform layer consumes
 * them.
 */

// --- MockAboutReader ---
struct MockAboutReader {
    content: Mutex<Option<AboutContent>>,
}

impl MockAboutReader {
    fn new() -> Self {
        MockAboutReader {
            content: Mutex::new(Some(AboutContent {
                app_name: "TextForge".to_string(),
                version: "1.0.0".to_string(),
                author: "TextForge contributors".to_string(),
                created: "2025-06".to_string(),
                body: "Mock about body.".to_string(),
            })),
        }
    }

    fn set_unreadable(&self) {
        *self.content.lock().unwrap() = None;
    }
}

impl AboutReaderOperations for MockAboutReader {
    fn load(&self) -> Result<AboutContent, AboutError> {
        match self.content.lock().unwrap().as_ref() {
            Some(content) => Ok(content.clone()),
            None => Err(AboutError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "mocked missing about text",
            ))),
        }
    }
}
// --- End MockAboutReader ---

const MAIN_WINDOW: usize = 1;

fn main_window_id() -> WindowId {
    WindowId::for_test(MAIN_WINDOW)
}

fn setup_logic() -> (MyAppLogic, Arc<MockAboutReader>) {
    crate::initialize_logging();
    let about_reader = Arc::new(MockAboutReader::new());
    let logic = MyAppLogic::new(about_reader.clone());
    (logic, about_reader)
}

/// Drains every pending command, the way the platform's command loop does.
fn drain_commands(logic: &mut MyAppLogic) -> Vec<PlatformCommand> {
    let mut commands = Vec::new();
    while let Some(command) = logic.try_dequeue_command() {
        commands.push(command);
    }
    commands
}

/// Creates the main window and throws away the startup commands.
fn setup_logic_with_window() -> (MyAppLogic, Arc<MockAboutReader>) {
    let (mut logic, about_reader) = setup_logic();
    logic.on_main_window_created(main_window_id());
    drain_commands(&mut logic);
    (logic, about_reader)
}

fn type_text(logic: &mut MyAppLogic, text: &str) -> Vec<PlatformCommand> {
    logic.handle_event(AppEvent::InputTextChanged {
        window_id: main_window_id(),
        control_id: ui_constants::INPUT_FIELD_ID,
        text: text.to_string(),
    });
    drain_commands(logic)
}

fn click_button(logic: &mut MyAppLogic, control_id: i32) -> Vec<PlatformCommand> {
    logic.handle_event(AppEvent::ButtonClicked {
        window_id: main_window_id(),
        control_id,
    });
    drain_commands(logic)
}

/// Types `text` and clicks Enter, returning the submission's commands.
fn submit_text(logic: &mut MyAppLogic, text: &str) -> Vec<PlatformCommand> {
    type_text(logic, text);
    click_button(logic, ui_constants::ENTER_BUTTON_ID)
}

fn apply_settings(
    logic: &mut MyAppLogic,
    enabled: bool,
    kind: ModifierKind,
) -> Vec<PlatformCommand> {
    logic.handle_event(AppEvent::SettingsDialogCompleted {
        window_id: main_window_id(),
        enabled,
        kind,
    });
    drain_commands(logic)
}

fn appended_lines(commands: &[PlatformCommand]) -> Vec<String> {
    commands
        .iter()
        .filter_map(|cmd| match cmd {
            PlatformCommand::AppendOutputLine { line, .. } => Some(line.clone()),
            _ => None,
        })
        .collect()
}

fn enablement_of(commands: &[PlatformCommand], target_control_id: i32) -> Option<bool> {
    commands.iter().rev().find_map(|cmd| match cmd {
        PlatformCommand::SetControlEnabled {
            control_id,
            enabled,
            ..
        } if *control_id == target_control_id => Some(*enabled),
        _ => None,
    })
}

fn status_label_text(commands: &[PlatformCommand]) -> Option<String> {
    commands.iter().rev().find_map(|cmd| match cmd {
        PlatformCommand::UpdateLabelText {
            control_id, text, ..
        } if *control_id == ui_constants::STATUS_LABEL_ID => Some(text.clone()),
        _ => None,
    })
}

// --- Startup ---

#[test]
fn test_startup_builds_ui_then_shows_window() {
    // Arrange
    let (mut logic, _) = setup_logic();

    // Act
    logic.on_main_window_created(main_window_id());
    let commands = drain_commands(&mut logic);

    // Assert: the static description comes first, the window is shown last.
    assert!(matches!(
        commands.first(),
        Some(PlatformCommand::CreateMainMenu { .. })
    ));
    let show_pos = commands
        .iter()
        .position(|c| matches!(c, PlatformCommand::ShowWindow { .. }))
        .expect("ShowWindow must be issued");
    let setup_complete_pos = commands
        .iter()
        .position(|c| matches!(c, PlatformCommand::SignalMainWindowUiSetupComplete { .. }))
        .expect("Setup-complete signal must be issued");
    assert!(show_pos < setup_complete_pos);
}

#[test]
fn test_startup_disables_both_buttons_and_shows_disabled_status() {
    // Arrange
    let (mut logic, _) = setup_logic();

    // Act
    logic.on_main_window_created(main_window_id());
    let commands = drain_commands(&mut logic);

    // Assert
    assert_eq!(
        enablement_of(&commands, ui_constants::ENTER_BUTTON_ID),
        Some(false)
    );
    assert_eq!(
        enablement_of(&commands, ui_constants::CLEAR_BUTTON_ID),
        Some(false)
    );
    assert_eq!(
        status_label_text(&commands).as_deref(),
        Some("Modifier: Disabled")
    );
}

// --- Submit ---

#[test]
fn test_submit_appends_raw_text_when_modifiers_disabled() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();
    // The selected kind must be irrelevant while disabled.
    apply_settings(&mut logic, false, ModifierKind::Reverse);

    // Act
    let commands = submit_text(&mut logic, "abc");

    // Assert
    assert_eq!(appended_lines(&commands), ["abc"]);
    assert_eq!(logic.output_log, ["abc"]);
}

#[test]
fn test_submit_applies_uppercase() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();
    apply_settings(&mut logic, true, ModifierKind::Uppercase);

    // Act
    let commands = submit_text(&mut logic, "Hello World");

    // Assert
    assert_eq!(appended_lines(&commands), ["HELLO WORLD"]);
}

#[test]
fn test_submit_applies_toggle_case() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();
    apply_settings(&mut logic, true, ModifierKind::ToggleCase);

    // Act
    let commands = submit_text(&mut logic, "Hello World");

    // Assert
    assert_eq!(appended_lines(&commands), ["hELLO wORLD"]);
}

#[test]
fn test_submit_applies_reverse() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();
    apply_settings(&mut logic, true, ModifierKind::Reverse);

    // Act
    let commands = submit_text(&mut logic, "Hello World");

    // Assert
    assert_eq!(appended_lines(&commands), ["dlroW olleH"]);
}

#[test]
fn test_submit_with_none_kind_enabled_passes_through() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();
    apply_settings(&mut logic, true, ModifierKind::None);

    // Act
    let commands = submit_text(&mut logic, "xyz");

    // Assert
    assert_eq!(appended_lines(&commands), ["xyz"]);
}

#[test]
fn test_submit_clears_input_and_disables_enter() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act
    let commands = submit_text(&mut logic, "abc");

    // Assert: the field is cleared unconditionally after submission.
    assert!(commands.iter().any(|cmd| matches!(
        cmd,
        PlatformCommand::SetInputText { control_id, text, .. }
            if *control_id == ui_constants::INPUT_FIELD_ID && text.is_empty()
    )));
    assert_eq!(
        enablement_of(&commands, ui_constants::ENTER_BUTTON_ID),
        Some(false)
    );
    assert!(logic.current_input_text.is_empty());
}

#[test]
fn test_submit_via_return_key_uses_submitted_text() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act
    logic.handle_event(AppEvent::InputSubmitted {
        window_id: main_window_id(),
        control_id: ui_constants::INPUT_FIELD_ID,
        text: "typed".to_string(),
    });
    let commands = drain_commands(&mut logic);

    // Assert
    assert_eq!(appended_lines(&commands), ["typed"]);
}

#[test]
fn test_empty_submission_appends_nothing_but_still_clears_field() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act: the guard normally prevents this path; exercise it anyway.
    let commands = click_button(&mut logic, ui_constants::ENTER_BUTTON_ID);

    // Assert
    assert!(appended_lines(&commands).is_empty());
    assert!(logic.output_log.is_empty());
    assert!(commands.iter().any(|cmd| matches!(
        cmd,
        PlatformCommand::SetInputText { text, .. } if text.is_empty()
    )));
}

#[test]
fn test_repeated_submissions_keep_order() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();
    apply_settings(&mut logic, true, ModifierKind::Uppercase);

    // Act
    submit_text(&mut logic, "one");
    submit_text(&mut logic, "two");
    submit_text(&mut logic, "one");

    // Assert: the log tail equals the transformed strings in submission order.
    assert_eq!(logic.output_log, ["ONE", "TWO", "ONE"]);
}

// --- Enablement ---

#[test]
fn test_enter_enabled_iff_input_non_empty() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act / Assert: every edit re-derives the state.
    let commands = type_text(&mut logic, "a");
    assert_eq!(
        enablement_of(&commands, ui_constants::ENTER_BUTTON_ID),
        Some(true)
    );

    let commands = type_text(&mut logic, "ab");
    assert_eq!(
        enablement_of(&commands, ui_constants::ENTER_BUTTON_ID),
        Some(true)
    );

    let commands = type_text(&mut logic, "");
    assert_eq!(
        enablement_of(&commands, ui_constants::ENTER_BUTTON_ID),
        Some(false)
    );
}

#[test]
fn test_clear_enabled_iff_log_non_empty() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act: first submission enables Clear.
    let commands = submit_text(&mut logic, "abc");
    assert_eq!(
        enablement_of(&commands, ui_constants::CLEAR_BUTTON_ID),
        Some(true)
    );

    // Act: clearing empties the log and disables Clear again.
    let commands = click_button(&mut logic, ui_constants::CLEAR_BUTTON_ID);

    // Assert
    assert!(logic.output_log.is_empty());
    assert!(commands
        .iter()
        .any(|cmd| matches!(cmd, PlatformCommand::ClearOutputView { .. })));
    assert_eq!(
        enablement_of(&commands, ui_constants::CLEAR_BUTTON_ID),
        Some(false)
    );
}

#[test]
fn test_clear_with_empty_log_is_a_no_op() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act
    let commands = click_button(&mut logic, ui_constants::CLEAR_BUTTON_ID);

    // Assert
    assert!(commands.is_empty());
}

// --- Settings ---

#[test]
fn test_open_settings_carries_current_configuration() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();
    apply_settings(&mut logic, true, ModifierKind::ToggleCase);

    // Act
    logic.handle_event(AppEvent::MenuActionClicked {
        action: MenuAction::OpenSettings,
    });
    let commands = drain_commands(&mut logic);

    // Assert
    assert!(commands.iter().any(|cmd| matches!(
        cmd,
        PlatformCommand::ShowSettingsDialog { enabled: true, kind: ModifierKind::ToggleCase, .. }
    )));
}

#[test]
fn test_settings_round_trip_updates_status_label() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act: enable Uppercase.
    let commands = apply_settings(&mut logic, true, ModifierKind::Uppercase);

    // Assert
    assert_eq!(
        status_label_text(&commands).as_deref(),
        Some("Modifier: Uppercase")
    );
    assert_eq!(
        logic.settings,
        ModifierSettings {
            enabled: true,
            kind: ModifierKind::Uppercase
        }
    );

    // Act: disabling shows "Disabled" regardless of the kept kind.
    let commands = apply_settings(&mut logic, false, ModifierKind::Uppercase);

    // Assert
    assert_eq!(
        status_label_text(&commands).as_deref(),
        Some("Modifier: Disabled")
    );
}

// --- About ---

#[test]
fn test_open_about_shows_dialog_with_resource_body() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act
    logic.handle_event(AppEvent::MenuActionClicked {
        action: MenuAction::OpenAbout,
    });
    let commands = drain_commands(&mut logic);

    // Assert
    let content = commands.iter().find_map(|cmd| match cmd {
        PlatformCommand::ShowAboutDialog { content, .. } => Some(content),
        _ => None,
    });
    let content = content.expect("About dialog must be shown");
    assert_eq!(content.app_name, "TextForge");
    assert_eq!(content.body, "Mock about body.");
}

#[test]
fn test_unreadable_about_resource_suppresses_dialog() {
    // Arrange
    let (mut logic, about_reader) = setup_logic_with_window();
    about_reader.set_unreadable();

    // Act
    logic.handle_event(AppEvent::MenuActionClicked {
        action: MenuAction::OpenAbout,
    });
    let commands = drain_commands(&mut logic);

    // Assert: the resource error is fatal to the dialog, nothing is shown.
    assert!(commands.is_empty());
}

// --- Window lifecycle ---

#[test]
fn test_close_request_is_unconditionally_accepted() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();
    submit_text(&mut logic, "unsaved output");

    // Act
    logic.handle_event(AppEvent::WindowCloseRequested {
        window_id: main_window_id(),
    });
    let commands = drain_commands(&mut logic);

    // Assert: no confirmation step, just the close command.
    assert_eq!(
        commands,
        vec![PlatformCommand::CloseWindow {
            window_id: main_window_id()
        }]
    );
}

#[test]
fn test_exit_menu_closes_window() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act
    logic.handle_event(AppEvent::MenuActionClicked {
        action: MenuAction::Exit,
    });
    let commands = drain_commands(&mut logic);

    // Assert
    assert_eq!(
        commands,
        vec![PlatformCommand::CloseWindow {
            window_id: main_window_id()
        }]
    );
}

#[test]
fn test_window_destroyed_clears_presenter_state() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();
    submit_text(&mut logic, "abc");

    // Act
    logic.handle_event(AppEvent::WindowDestroyed {
        window_id: main_window_id(),
    });
    drain_commands(&mut logic);

    // Assert
    assert_eq!(logic.main_window_id, None);
    assert!(logic.output_log.is_empty());
    assert!(logic.current_input_text.is_empty());
}

#[test]
fn test_events_for_other_windows_are_ignored() {
    // Arrange
    let (mut logic, _) = setup_logic_with_window();

    // Act
    logic.handle_event(AppEvent::ButtonClicked {
        window_id: WindowId::for_test(99),
        control_id: ui_constants::ENTER_BUTTON_ID,
    });
    let commands = drain_commands(&mut logic);

    // Assert
    assert!(commands.is_empty());
}
