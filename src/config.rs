use std::path::{Path, PathBuf};

use crate::export;

/// Where the exporter writes. All directories are parameters so tests can
/// point the whole run at a temp directory.
pub struct ExportConfig {
    /// Destination for the PNG table, icon.ico and icon.icns.
    pub icons_dir: PathBuf,
    /// Destination for the two preview images.
    pub preview_dir: PathBuf,
    /// hicolor theme root; `None` skips the theme install entirely.
    pub theme_dir: Option<PathBuf>,
    /// Invoked once after the theme install, with the theme root.
    pub refresh_hook: Option<fn(&Path)>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let theme_dir = directories::BaseDirs::new()
            .map(|dirs| dirs.data_dir().join("icons").join("hicolor"));
        ExportConfig {
            icons_dir: PathBuf::from("icons"),
            preview_dir: PathBuf::from("."),
            theme_dir,
            refresh_hook: Some(export::refresh_icon_caches),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_targets_local_icons_dir() {
        let cfg = ExportConfig::default();
        assert_eq!(cfg.icons_dir, PathBuf::from("icons"));
        assert_eq!(cfg.preview_dir, PathBuf::from("."));
        assert!(cfg.refresh_hook.is_some());
        if let Some(theme) = &cfg.theme_dir {
            assert!(theme.ends_with("icons/hicolor"));
        }
    }
}
