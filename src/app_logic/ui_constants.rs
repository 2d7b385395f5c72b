/*
 * Defines shared constants for logical UI control identifiers. These IDs
 * are used by the `ui_description_layer` to define the initial UI structure
 * and by the `app_logic` (Presenter) to target specific controls for
 * dynamic updates. The `platform_layer` maps these logical IDs to native
 * UI element handles.
 */

// Label above the input field.
pub const INPUT_LABEL_ID: i32 = 1001;

// Panel holding the input field and the Enter button on one row.
pub const INPUT_ROW_PANEL_ID: i32 = 1002;

// The single-line text entry field.
pub const INPUT_FIELD_ID: i32 = 1003;

// Submits the input field's text to the output log.
pub const ENTER_BUTTON_ID: i32 = 1004;

// Etched horizontal line between the input and output halves.
pub const SEPARATOR_ID: i32 = 1005;

// Shows the active modifier ("Modifier: Uppercase" / "Modifier: Disabled").
pub const STATUS_LABEL_ID: i32 = 1006;

// Label above the output view.
pub const OUTPUT_LABEL_ID: i32 = 1007;

// The read-only, scrollable output log view.
pub const OUTPUT_VIEW_ID: i32 = 1008;

// Empties the output log.
pub const CLEAR_BUTTON_ID: i32 = 1009;

/// Prefix of the modifier status label text.
pub const MODIFIER_STATUS_PREFIX: &str = "Modifier: ";
