//! Local user preferences. Only the theme is persisted.

use crate::fs::FileSystem;
use crate::view::Theme;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("Failed to access preferences: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to encode preferences: {0}")]
    Encode(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: Theme,
}

impl Preferences {
    /// Missing file means defaults.
    pub fn load(path: &Path, fs: &dyn FileSystem) -> Result<Self, PrefsError> {
        if !fs.exists(path) {
            return Ok(Self::default());
        }
        Ok(toml::from_str(&fs.read_to_string(path)?)?)
    }

    pub fn save(&self, path: &Path, fs: &dyn FileSystem) -> Result<(), PrefsError> {
        fs.write(path, &toml::to_string(self)?)?;
        Ok(())
    }

    /// Flips the theme and persists it, returning the new theme.
    pub fn toggle_theme(&mut self, path: &Path, fs: &dyn FileSystem) -> Result<Theme, PrefsError> {
        self.theme = self.theme.toggled();
        self.save(path, fs)?;
        Ok(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFs;

    #[test]
    fn test_toggle_persists_theme() {
        let fs = MockFs::new();
        let path = Path::new("/prefs.toml");
        let mut prefs = Preferences::load(path, &fs).unwrap();
        assert_eq!(prefs.theme, Theme::Light);

        assert_eq!(prefs.toggle_theme(path, &fs).unwrap(), Theme::Dark);
        assert_eq!(fs.read_to_string(path).unwrap().trim(), "theme = \"dark\"");
        assert_eq!(Preferences::load(path, &fs).unwrap().theme, Theme::Dark);
    }

    #[test]
    fn test_empty_file_defaults_to_light() {
        let fs = MockFs::with_files([(Path::new("/p.toml"), "")]);
        assert_eq!(Preferences::load(Path::new("/p.toml"), &fs).unwrap().theme, Theme::Light);
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let fs = MockFs::with_files([(Path::new("/p.toml"), "theme = \"sepia\"")]);
        assert!(matches!(
            Preferences::load(Path::new("/p.toml"), &fs),
            Err(PrefsError::Parse(_))
        ));
    }
}
