use crate::app_logic::ui_constants;
use crate::core::{AboutReaderOperations, ModifierSettings};
use crate::platform_layer::{
    AboutDialogContent, AppEvent, MenuAction, MessageSeverity, PlatformCommand,
    PlatformEventHandler, WindowId,
};
use crate::ui_description_layer;

use std::collections::VecDeque;
use std::sync::Arc;

/*
 * Manages the application state and UI logic in a platform-agnostic manner:
 * the Presenter. It owns the modifier configuration and the output log,
 * processes UI events received from the platform layer, and enqueues
 * commands to update the UI. The About-dialog content comes through the
 * `AboutReaderOperations` trait so tests can substitute a mock source.
 *
 * Control enablement is derived, never cached: the Enter button tracks
 * "input field is non-empty" on every text change, and the Clear button
 * tracks "output log is non-empty" on every log mutation.
 */
pub struct MyAppLogic {
    pub(crate) main_window_id: Option<WindowId>,
    pub(crate) settings: ModifierSettings,
    pub(crate) output_log: Vec<String>,
    pub(crate) current_input_text: String,
    about_reader: Arc<dyn AboutReaderOperations>,
    pending_commands: VecDeque<PlatformCommand>,
}

impl MyAppLogic {
    pub fn new(about_reader: Arc<dyn AboutReaderOperations>) -> Self {
        MyAppLogic {
            main_window_id: None,
            settings: ModifierSettings::default(),
            output_log: Vec::new(),
            current_input_text: String::new(),
            about_reader,
            pending_commands: VecDeque::new(),
        }
    }

    fn enqueue_command(&mut self, command: PlatformCommand) {
        self.pending_commands.push_back(command);
    }

    /*
     * Handles the main window having been created: enqueues the static UI
     * description, the initial enablement and status state, and finally
     * shows the window. The platform executes these before entering the
     * message loop.
     */
    pub fn on_main_window_created(&mut self, window_id: WindowId) {
        self.main_window_id = Some(window_id);

        for command in ui_description_layer::build_main_window_static_layout(window_id) {
            self.enqueue_command(command);
        }

        self.update_enter_enablement(window_id);
        self.update_clear_enablement(window_id);
        self.refresh_modifier_status(window_id);

        self.enqueue_command(PlatformCommand::ShowWindow { window_id });
        self.enqueue_command(PlatformCommand::SignalMainWindowUiSetupComplete { window_id });
    }

    /// Re-derives the Enter button's enabled state from the input field.
    fn update_enter_enablement(&mut self, window_id: WindowId) {
        let enabled = !self.current_input_text.is_empty();
        self.enqueue_command(PlatformCommand::SetControlEnabled {
            window_id,
            control_id: ui_constants::ENTER_BUTTON_ID,
            enabled,
        });
    }

    /// Re-derives the Clear button's enabled state from the output log.
    fn update_clear_enablement(&mut self, window_id: WindowId) {
        let enabled = !self.output_log.is_empty();
        self.enqueue_command(PlatformCommand::SetControlEnabled {
            window_id,
            control_id: ui_constants::CLEAR_BUTTON_ID,
            enabled,
        });
    }

    /// Recomputes the modifier status label from the current configuration.
    fn refresh_modifier_status(&mut self, window_id: WindowId) {
        let text = format!(
            "{}{}",
            ui_constants::MODIFIER_STATUS_PREFIX,
            self.settings.status_text()
        );
        self.enqueue_command(PlatformCommand::UpdateLabelText {
            window_id,
            control_id: ui_constants::STATUS_LABEL_ID,
            text,
            severity: MessageSeverity::Information,
        });
    }

    /*
     * Submits the given input text: applies the configured modifier, appends
     * the result to the output log, and unconditionally clears the input
     * field afterwards. An empty submission appends nothing (the disabled
     * Enter button normally prevents that path) but still clears the field.
     */
    fn submit_input(&mut self, window_id: WindowId, text: &str) {
        log::debug!("AppLogic: Text entered: {text}");

        if !text.is_empty() {
            let line = self.settings.apply(text);
            self.output_log.push(line.clone());
            self.enqueue_command(PlatformCommand::AppendOutputLine {
                window_id,
                control_id: ui_constants::OUTPUT_VIEW_ID,
                line,
            });
            self.update_clear_enablement(window_id);
        }

        self.current_input_text.clear();
        self.enqueue_command(PlatformCommand::SetInputText {
            window_id,
            control_id: ui_constants::INPUT_FIELD_ID,
            text: String::new(),
        });
        self.update_enter_enablement(window_id);
    }

    /// Empties the output log; a no-op when it is already empty.
    fn clear_output(&mut self, window_id: WindowId) {
        if self.output_log.is_empty() {
            return;
        }
        self.output_log.clear();
        self.enqueue_command(PlatformCommand::ClearOutputView {
            window_id,
            control_id: ui_constants::OUTPUT_VIEW_ID,
        });
        self.update_clear_enablement(window_id);
    }

    fn open_settings_dialog(&mut self, window_id: WindowId) {
        log::debug!("AppLogic: Requesting settings dialog.");
        self.enqueue_command(PlatformCommand::ShowSettingsDialog {
            window_id,
            enabled: self.settings.enabled,
            kind: self.settings.kind,
        });
    }

    /*
     * Opens the About dialog. The body text is read from the external
     * resource on every open; when that read fails the dialog cannot be
     * shown and the resource error is logged; there is no fallback text.
     */
    fn open_about_dialog(&mut self, window_id: WindowId) {
        log::debug!("AppLogic: Requesting about dialog.");
        match self.about_reader.load() {
            Ok(content) => {
                self.enqueue_command(PlatformCommand::ShowAboutDialog {
                    window_id,
                    content: AboutDialogContent {
                        app_name: content.app_name,
                        version: content.version,
                        author: content.author,
                        created: content.created,
                        body: content.body,
                    },
                });
            }
            Err(e) => {
                log::error!("AppLogic: Cannot open about dialog: {e}");
            }
        }
    }
}

impl PlatformEventHandler for MyAppLogic {
    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowCloseRequested { window_id } => {
                if self.main_window_id == Some(window_id) {
                    // Closing is unconditionally accepted; there is no
                    // unsaved state to confirm.
                    log::info!("AppLogic: App closed by user.");
                    self.enqueue_command(PlatformCommand::CloseWindow { window_id });
                }
            }
            AppEvent::WindowDestroyed { window_id } => {
                if self.main_window_id == Some(window_id) {
                    log::debug!("AppLogic: Main window destroyed.");
                    self.main_window_id = None;
                    self.output_log.clear();
                    self.current_input_text.clear();
                }
            }
            AppEvent::WindowResized { .. } => {}
            AppEvent::MainWindowUiSetupComplete { window_id } => {
                log::debug!("AppLogic: Main window UI setup complete for {window_id:?}.");
            }
            AppEvent::ButtonClicked {
                window_id,
                control_id,
            } => {
                if self.main_window_id != Some(window_id) {
                    return;
                }
                match control_id {
                    ui_constants::ENTER_BUTTON_ID => {
                        let text = self.current_input_text.clone();
                        self.submit_input(window_id, &text);
                    }
                    ui_constants::CLEAR_BUTTON_ID => {
                        self.clear_output(window_id);
                    }
                    _ => {}
                }
            }
            AppEvent::InputTextChanged {
                window_id,
                control_id,
                text,
            } => {
                if self.main_window_id == Some(window_id)
                    && control_id == ui_constants::INPUT_FIELD_ID
                {
                    self.current_input_text = text;
                    self.update_enter_enablement(window_id);
                }
            }
            AppEvent::InputSubmitted {
                window_id,
                control_id,
                text,
            } => {
                if self.main_window_id == Some(window_id)
                    && control_id == ui_constants::INPUT_FIELD_ID
                {
                    self.current_input_text = text.clone();
                    self.submit_input(window_id, &text);
                }
            }
            AppEvent::MenuActionClicked { action } => {
                let Some(window_id) = self.main_window_id else {
                    return;
                };
                match action {
                    MenuAction::OpenSettings => self.open_settings_dialog(window_id),
                    MenuAction::OpenAbout => self.open_about_dialog(window_id),
                    MenuAction::Exit => {
                        log::info!("AppLogic: Exit requested from menu.");
                        self.enqueue_command(PlatformCommand::CloseWindow { window_id });
                    }
                }
            }
            AppEvent::SettingsDialogCompleted {
                window_id,
                enabled,
                kind,
            } => {
                if self.main_window_id == Some(window_id) {
                    self.settings = ModifierSettings { enabled, kind };
                    log::info!("AppLogic: Settings saved.");
                    log::debug!("AppLogic: Modifiers enabled: {enabled}");
                    log::debug!("AppLogic: Modifier selected: {kind}");
                    self.refresh_modifier_status(window_id);
                }
            }
        }
    }

    fn on_quit(&mut self) {
        log::info!("AppLogic: Application exiting.");
    }

    fn try_dequeue_command(&mut self) -> Option<PlatformCommand> {
        self.pending_commands.pop_front()
    }
}
