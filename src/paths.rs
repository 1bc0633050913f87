//! XDG-style path utilities for configuration and data directories.

use std::path::PathBuf;

const APP_DIR: &str = "wordwise";

/// Returns the configuration directory for wordwise.
///
/// `$XDG_CONFIG_HOME/wordwise` when the variable is set, `~/.config/wordwise`
/// otherwise.
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Returns the data directory for wordwise, home of the history database.
///
/// `$XDG_DATA_HOME/wordwise` when the variable is set,
/// `~/.local/share/wordwise` otherwise.
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

#[allow(clippy::expect_used)]
fn xdg_dir(env_var: &str, home_relative: &str) -> PathBuf {
    std::env::var(env_var).map_or_else(
        |_| {
            dirs::home_dir()
                .expect("Failed to determine home directory")
                .join(home_relative)
                .join(APP_DIR)
        },
        |base| PathBuf::from(base).join(APP_DIR),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_default() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::remove_var("XDG_CONFIG_HOME") };

        assert!(config_dir().ends_with(".config/wordwise"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        }
    }

    #[test]
    #[serial]
    fn test_config_dir_xdg_override() {
        let original = std::env::var("XDG_CONFIG_HOME").ok();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", "/custom/config") };

        assert_eq!(config_dir(), PathBuf::from("/custom/config/wordwise"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_CONFIG_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_CONFIG_HOME") };
        }
    }

    #[test]
    #[serial]
    fn test_data_dir_default() {
        let original = std::env::var("XDG_DATA_HOME").ok();
        unsafe { std::env::remove_var("XDG_DATA_HOME") };

        assert!(data_dir().ends_with(".local/share/wordwise"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_DATA_HOME", val) };
        }
    }

    #[test]
    #[serial]
    fn test_data_dir_xdg_override() {
        let original = std::env::var("XDG_DATA_HOME").ok();
        unsafe { std::env::set_var("XDG_DATA_HOME", "/custom/data") };

        assert_eq!(data_dir(), PathBuf::from("/custom/data/wordwise"));

        if let Some(val) = original {
            unsafe { std::env::set_var("XDG_DATA_HOME", val) };
        } else {
            unsafe { std::env::remove_var("XDG_DATA_HOME") };
        }
    }
}
