/*
 * This module defines the static structure of the main window's UI. It
 * generates the series of `PlatformCommand`s describing the menu bar, the
 * controls, and the layout rules that position them. This decouples the UI
 * definition from the platform-specific implementation.
 */
use crate::app_logic::ui_constants;
use crate::platform_layer::{
    DockStyle, LabelKind, LayoutRule, MenuAction, MenuItemConfig, PlatformCommand, WindowId,
};

// Fixed control heights/widths, in pixels.
const LABEL_HEIGHT: i32 = 18;
const INPUT_ROW_HEIGHT: i32 = 26;
const ENTER_BUTTON_WIDTH: i32 = 80;
const SEPARATOR_HEIGHT: i32 = 2;
const CLEAR_BUTTON_HEIGHT: i32 = 40;

/*
 * Generates the `PlatformCommand`s that describe the initial static UI of
 * the main window: the menu, the input row, the modifier status display,
 * the output view, and the layout rules tying them together. Intended to be
 * called exactly once per window, during initial construction.
 */
pub fn build_main_window_static_layout(window_id: WindowId) -> Vec<PlatformCommand> {
    log::debug!("ui_description_layer: Describing main window layout.");

    let mut commands = Vec::new();

    // 1. Menu bar: File (Settings, Exit) and About.
    commands.push(PlatformCommand::CreateMainMenu {
        window_id,
        menu_items: vec![
            MenuItemConfig {
                action: None,
                text: "&File".to_string(),
                children: vec![
                    MenuItemConfig {
                        action: Some(MenuAction::OpenSettings),
                        text: "&Settings".to_string(),
                        children: Vec::new(),
                    },
                    MenuItemConfig {
                        action: Some(MenuAction::Exit),
                        text: "E&xit".to_string(),
                        children: Vec::new(),
                    },
                ],
            },
            MenuItemConfig {
                action: None,
                text: "&About".to_string(),
                children: vec![MenuItemConfig {
                    action: Some(MenuAction::OpenAbout),
                    text: "About TextForge".to_string(),
                    children: Vec::new(),
                }],
            },
        ],
    });

    // 2. Input half: label, then a panel holding the field and its button.
    commands.push(PlatformCommand::CreateLabel {
        window_id,
        parent_control_id: None,
        label_id: ui_constants::INPUT_LABEL_ID,
        initial_text: "Input".to_string(),
        kind: LabelKind::Text,
    });
    commands.push(PlatformCommand::CreatePanel {
        window_id,
        parent_control_id: None,
        panel_id: ui_constants::INPUT_ROW_PANEL_ID,
    });
    commands.push(PlatformCommand::CreateInput {
        window_id,
        parent_control_id: Some(ui_constants::INPUT_ROW_PANEL_ID),
        control_id: ui_constants::INPUT_FIELD_ID,
        initial_text: String::new(),
    });
    commands.push(PlatformCommand::CreateButton {
        window_id,
        parent_control_id: Some(ui_constants::INPUT_ROW_PANEL_ID),
        control_id: ui_constants::ENTER_BUTTON_ID,
        text: "Enter".to_string(),
    });

    // 3. Separator and modifier status.
    commands.push(PlatformCommand::CreateLabel {
        window_id,
        parent_control_id: None,
        label_id: ui_constants::SEPARATOR_ID,
        initial_text: String::new(),
        kind: LabelKind::Separator,
    });
    commands.push(PlatformCommand::CreateLabel {
        window_id,
        parent_control_id: None,
        label_id: ui_constants::STATUS_LABEL_ID,
        initial_text: String::new(),
        kind: LabelKind::Text,
    });

    // 4. Output half: label, the log view, and the clear button.
    commands.push(PlatformCommand::CreateLabel {
        window_id,
        parent_control_id: None,
        label_id: ui_constants::OUTPUT_LABEL_ID,
        initial_text: "Output".to_string(),
        kind: LabelKind::Text,
    });
    commands.push(PlatformCommand::CreateOutputView {
        window_id,
        control_id: ui_constants::OUTPUT_VIEW_ID,
    });
    commands.push(PlatformCommand::CreateButton {
        window_id,
        parent_control_id: None,
        control_id: ui_constants::CLEAR_BUTTON_ID,
        text: "Clear".to_string(),
    });

    // 5. Layout rules. Top-docked rows first, then the bottom button; the
    // output view fills whatever remains.
    let layout_rules = vec![
        LayoutRule {
            control_id: ui_constants::INPUT_LABEL_ID,
            parent_control_id: None,
            dock_style: DockStyle::Top,
            order: 0,
            fixed_size: Some(LABEL_HEIGHT),
            margin: (8, 8, 0, 8),
        },
        LayoutRule {
            control_id: ui_constants::INPUT_ROW_PANEL_ID,
            parent_control_id: None,
            dock_style: DockStyle::Top,
            order: 1,
            fixed_size: Some(INPUT_ROW_HEIGHT),
            margin: (2, 8, 0, 8),
        },
        LayoutRule {
            control_id: ui_constants::ENTER_BUTTON_ID,
            parent_control_id: Some(ui_constants::INPUT_ROW_PANEL_ID),
            dock_style: DockStyle::Right,
            order: 0,
            fixed_size: Some(ENTER_BUTTON_WIDTH),
            margin: (0, 0, 0, 6),
        },
        LayoutRule {
            control_id: ui_constants::INPUT_FIELD_ID,
            parent_control_id: Some(ui_constants::INPUT_ROW_PANEL_ID),
            dock_style: DockStyle::Fill,
            order: 1,
            fixed_size: None,
            margin: (0, 0, 0, 0),
        },
        LayoutRule {
            control_id: ui_constants::SEPARATOR_ID,
            parent_control_id: None,
            dock_style: DockStyle::Top,
            order: 2,
            fixed_size: Some(SEPARATOR_HEIGHT),
            margin: (8, 8, 0, 8),
        },
        LayoutRule {
            control_id: ui_constants::STATUS_LABEL_ID,
            parent_control_id: None,
            dock_style: DockStyle::Top,
            order: 3,
            fixed_size: Some(LABEL_HEIGHT),
            margin: (6, 8, 0, 8),
        },
        LayoutRule {
            control_id: ui_constants::OUTPUT_LABEL_ID,
            parent_control_id: None,
            dock_style: DockStyle::Top,
            order: 4,
            fixed_size: Some(LABEL_HEIGHT),
            margin: (6, 8, 0, 8),
        },
        LayoutRule {
            control_id: ui_constants::CLEAR_BUTTON_ID,
            parent_control_id: None,
            dock_style: DockStyle::Bottom,
            order: 5,
            fixed_size: Some(CLEAR_BUTTON_HEIGHT),
            margin: (6, 8, 8, 8),
        },
        LayoutRule {
            control_id: ui_constants::OUTPUT_VIEW_ID,
            parent_control_id: None,
            dock_style: DockStyle::Fill,
            order: 10,
            fixed_size: None,
            margin: (2, 8, 0, 8),
        },
    ];
    commands.push(PlatformCommand::DefineLayout {
        window_id,
        rules: layout_rules,
    });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created_control_ids(commands: &[PlatformCommand]) -> Vec<i32> {
        commands
            .iter()
            .filter_map(|cmd| match cmd {
                PlatformCommand::CreatePanel { panel_id, .. } => Some(*panel_id),
                PlatformCommand::CreateLabel { label_id, .. } => Some(*label_id),
                PlatformCommand::CreateButton { control_id, .. }
                | PlatformCommand::CreateInput { control_id, .. }
                | PlatformCommand::CreateOutputView { control_id, .. } => Some(*control_id),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_every_control_is_created_exactly_once() {
        // Arrange / Act
        let commands = build_main_window_static_layout(WindowId::for_test(1));

        // Assert
        let mut ids = created_control_ids(&commands);
        ids.sort_unstable();
        let mut expected = vec![
            ui_constants::INPUT_LABEL_ID,
            ui_constants::INPUT_ROW_PANEL_ID,
            ui_constants::INPUT_FIELD_ID,
            ui_constants::ENTER_BUTTON_ID,
            ui_constants::SEPARATOR_ID,
            ui_constants::STATUS_LABEL_ID,
            ui_constants::OUTPUT_LABEL_ID,
            ui_constants::OUTPUT_VIEW_ID,
            ui_constants::CLEAR_BUTTON_ID,
        ];
        expected.sort_unstable();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_layout_rules_cover_all_created_controls() {
        // Arrange
        let commands = build_main_window_static_layout(WindowId::for_test(1));
        let created = created_control_ids(&commands);

        // Act
        let rules: Vec<&LayoutRule> = commands
            .iter()
            .filter_map(|cmd| match cmd {
                PlatformCommand::DefineLayout { rules, .. } => Some(rules.iter()),
                _ => None,
            })
            .flatten()
            .collect();

        // Assert
        for control_id in created {
            assert!(
                rules.iter().any(|r| r.control_id == control_id),
                "Control {control_id} has no layout rule."
            );
        }
    }

    #[test]
    fn test_menu_carries_all_three_actions() {
        // Arrange
        let commands = build_main_window_static_layout(WindowId::for_test(1));

        // Act
        fn collect_actions(items: &[MenuItemConfig], actions: &mut Vec<MenuAction>) {
            for item in items {
                if let Some(action) = item.action {
                    actions.push(action);
                }
                collect_actions(&item.children, actions);
            }
        }
        let mut actions = Vec::new();
        for cmd in &commands {
            if let PlatformCommand::CreateMainMenu { menu_items, .. } = cmd {
                collect_actions(menu_items, &mut actions);
            }
        }

        // Assert
        assert!(actions.contains(&MenuAction::OpenSettings));
        assert!(actions.contains(&MenuAction::Exit));
        assert!(actions.contains(&MenuAction::OpenAbout));
    }
}
