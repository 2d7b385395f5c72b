/*
 * This module provides the application logic layer, centered around
 * `MyAppLogic` which acts as the Presenter: it owns the modifier
 * configuration and the output log, reacts to `AppEvent`s and enqueues
 * `PlatformCommand`s. Unit tests for `MyAppLogic` are in `handler_tests.rs`.
 */
pub mod handler;
pub mod ui_constants;

#[cfg(test)]
mod handler_tests;

pub use handler::MyAppLogic;
