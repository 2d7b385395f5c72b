/*
 * Win32-specific handlers for individual control families. Each module
 * encapsulates creation and message translation for one kind of control so
 * the command executor and window procedure stay free of raw control code.
 */
pub(crate) mod button_handler;
pub(crate) mod dialog_handler;
pub(crate) mod input_handler;
pub(crate) mod label_handler;
pub(crate) mod menu_handler;
pub(crate) mod output_view_handler;
pub(crate) mod panel_handler;
