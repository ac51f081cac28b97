//! Console setup.

/// Turn on ANSI escape handling in Windows consoles.
#[cfg(windows)]
pub fn enable_virtual_terminal() {
    if colored::control::set_virtual_terminal(true).is_err() {
        colored::control::set_override(false);
    }
}

/// Terminals elsewhere already understand ANSI escapes.
#[cfg(not(windows))]
pub fn enable_virtual_terminal() {}
