//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Modifier for the submit and quit shortcuts
/// - macOS: SUPER (Cmd key), CONTROL also accepted
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for the help line
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Quit shortcut display
#[cfg(target_os = "macos")]
pub const QUIT_SHORTCUT: &str = "Cmd+Q";

#[cfg(not(target_os = "macos"))]
pub const QUIT_SHORTCUT: &str = "Ctrl+Q";
