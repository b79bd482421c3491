//! Firefox profile management.
//!
//! Creates the profile directory Firefox is launched with and writes the
//! `user.js` preference file that configures it for automation: no first-run
//! UI, no update or crash-restore prompts, and the remote agent enabled for
//! WebSocket control.
//!
//! Profiles are temporary by default and deleted on drop; an existing
//! directory can be reused with [`Profile::from_path`].

// ============================================================================
// Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Header comment for the generated `user.js` file.
const USER_JS_HEADER: &str = "// Auto-generated preferences for automation\n\n";

// ============================================================================
// PreferenceValue
// ============================================================================

/// A typed Firefox preference value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceValue {
    /// Boolean preference.
    Bool(bool),
    /// Integer preference.
    Int(i64),
    /// String preference.
    String(String),
}

impl PreferenceValue {
    /// Renders the value as it appears inside a `user_pref` call.
    #[must_use]
    pub fn to_js(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::String(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        }
    }
}

// ============================================================================
// Preference
// ============================================================================

/// A single `user.js` preference line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preference {
    /// Preference name, e.g. `browser.startup.page`.
    pub name: String,
    /// Preference value.
    pub value: PreferenceValue,
}

impl Preference {
    /// Creates a new preference.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, value: PreferenceValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Renders the `user_pref("name", value);` line.
    #[must_use]
    pub fn to_user_pref_line(&self) -> String {
        format!("user_pref(\"{}\", {});", self.name, self.value.to_js())
    }
}

// ============================================================================
// Profile
// ============================================================================

/// A Firefox profile directory.
///
/// Temporary profiles (from [`Profile::new_temp`]) are deleted when the
/// `Profile` is dropped. Persistent profiles (from [`Profile::from_path`])
/// are left on disk.
pub struct Profile {
    /// Keeps the temp dir alive for the lifetime of the profile.
    _temp_dir: Option<TempDir>,

    /// Path to the profile directory.
    path: PathBuf,
}

// ============================================================================
// Profile - Constructors
// ============================================================================

impl Profile {
    /// Creates a new temporary profile directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new_temp() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("ricoh-address-book-")
            .map_err(|e| Error::profile(format!("Failed to create temp profile: {e}")))?;

        let path = temp_dir.path().to_path_buf();
        debug!(path = %path.display(), "Created temporary profile");

        Ok(Self {
            _temp_dir: Some(temp_dir),
            path,
        })
    }

    /// Uses an existing profile directory, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            fs::create_dir_all(&path).map_err(|e| {
                Error::profile(format!(
                    "Failed to create profile directory at {}: {e}",
                    path.display()
                ))
            })?;
            debug!(path = %path.display(), "Created profile directory");
        } else {
            debug!(path = %path.display(), "Using existing profile directory");
        }

        Ok(Self {
            _temp_dir: None,
            path,
        })
    }
}

// ============================================================================
// Profile - Accessors
// ============================================================================

impl Profile {
    /// Returns the path to the profile directory.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ============================================================================
// Profile - Preferences
// ============================================================================

impl Profile {
    /// Writes preferences to `user.js` in the profile directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_prefs(&self, prefs: &[Preference]) -> Result<()> {
        let file_path = self.path.join("user.js");

        let mut content = String::from(USER_JS_HEADER);
        for pref in prefs {
            let _ = writeln!(content, "{}", pref.to_user_pref_line());
        }

        fs::write(&file_path, content).map_err(|e| {
            Error::profile(format!(
                "Failed to write user.js at {}: {e}",
                file_path.display()
            ))
        })?;

        debug!(
            path = %file_path.display(),
            pref_count = prefs.len(),
            "Wrote preferences to user.js"
        );

        Ok(())
    }

    /// Returns the default preferences for automation.
    ///
    /// These configure Firefox to start on a blank page, skip every first-run
    /// and upgrade prompt, and accept remote-agent connections without the
    /// user-prompt gate.
    #[must_use]
    pub fn default_prefs() -> Vec<Preference> {
        use PreferenceValue as Val;

        vec![
            // Remote agent: skip the connection consent prompt.
            Preference::new("remote.prefs.recommended", Val::Bool(true)),
            // Startup: blank page, no default-browser or session-restore UI.
            Preference::new("browser.startup.page", Val::Int(0)),
            Preference::new("browser.startup.homepage", Val::String("about:blank".into())),
            Preference::new("browser.shell.checkDefaultBrowser", Val::Bool(false)),
            Preference::new(
                "browser.startup.homepage_override.mstone",
                Val::String("ignore".into()),
            ),
            Preference::new("browser.sessionstore.resume_from_crash", Val::Bool(false)),
            Preference::new("toolkit.startup.max_resumed_crashes", Val::Int(-1)),
            Preference::new("browser.tabs.warnOnClose", Val::Bool(false)),
            Preference::new("browser.warnOnQuit", Val::Bool(false)),
            // No background update or telemetry traffic during automation.
            Preference::new("app.update.disabledForTesting", Val::Bool(true)),
            Preference::new("datareporting.policy.dataSubmissionEnabled", Val::Bool(false)),
            Preference::new("datareporting.healthreport.uploadEnabled", Val::Bool(false)),
            // Embedded device panels navigate frames on a timer; never block.
            Preference::new("dom.disable_beforeunload", Val::Bool(true)),
            Preference::new("dom.successive_dialog_time_limit", Val::Int(0)),
        ]
    }
}

impl std::fmt::Debug for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Profile")
            .field("path", &self.path)
            .field("temporary", &self._temp_dir.is_some())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pref_value_bool() {
        assert_eq!(PreferenceValue::Bool(true).to_js(), "true");
        assert_eq!(PreferenceValue::Bool(false).to_js(), "false");
    }

    #[test]
    fn test_pref_value_int() {
        assert_eq!(PreferenceValue::Int(-1).to_js(), "-1");
        assert_eq!(PreferenceValue::Int(8080).to_js(), "8080");
    }

    #[test]
    fn test_pref_value_string_escaping() {
        let value = PreferenceValue::String("say \"hi\"".into());
        assert_eq!(value.to_js(), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_user_pref_line() {
        let pref = Preference::new("browser.startup.page", PreferenceValue::Int(0));
        assert_eq!(
            pref.to_user_pref_line(),
            "user_pref(\"browser.startup.page\", 0);"
        );
    }

    #[test]
    fn test_new_temp_creates_directory() {
        let profile = Profile::new_temp().unwrap();
        assert!(profile.path().exists());
    }

    #[test]
    fn test_temp_profile_removed_on_drop() {
        let path = {
            let profile = Profile::new_temp().unwrap();
            profile.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_write_prefs_creates_user_js() {
        let profile = Profile::new_temp().unwrap();
        profile.write_prefs(&Profile::default_prefs()).unwrap();

        let content = fs::read_to_string(profile.path().join("user.js")).unwrap();
        assert!(content.contains("user_pref(\"browser.startup.page\", 0);"));
        assert!(content.contains("remote.prefs.recommended"));
    }

    #[test]
    fn test_from_path_creates_missing_directory() {
        let base = TempDir::new().unwrap();
        let target = base.path().join("profile");
        let profile = Profile::from_path(&target).unwrap();
        assert!(profile.path().exists());
    }
}
