//! Enumerations for TUI state management.

/// Screen currently shown by the terminal user interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    Timeline,
    Detail,
    Notes,
    Settings,
    Confirm,
    Help,
}

/// Input mode for single-line entry fields.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    None,
    Text,
}
