//! General utility functions: dashboard data directory and JSON helpers.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Name of the folder holding settings, logs and chart output
pub const DASHBOARD_FOLDER: &str = ".stockdash";

/// Get dashboard directory
fn get_dashboard_dir(temp_name: &str) -> (PathBuf, PathBuf) {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let temp_path = cwd.join(temp_name);

    // If the folder exists in current working directory, use it
    if temp_path.exists() {
        return (cwd, temp_path);
    }

    // Otherwise use home path
    let home_path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let temp_path = home_path.join(temp_name);

    if !temp_path.exists() {
        let _ = fs::create_dir_all(&temp_path);
    }

    (home_path, temp_path)
}

/// Dashboard working directory
pub static DASHBOARD_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    let (dashboard_dir, _) = get_dashboard_dir(DASHBOARD_FOLDER);
    dashboard_dir
});

/// Temp directory
pub static TEMP_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    let (_, temp_dir) = get_dashboard_dir(DASHBOARD_FOLDER);
    temp_dir
});

/// Get path for temp file with filename
pub fn get_file_path(filename: &str) -> PathBuf {
    TEMP_DIR.join(filename)
}

/// Get path for temp folder with folder name
pub fn get_folder_path(folder_name: &str) -> PathBuf {
    let folder_path = TEMP_DIR.join(folder_name);
    if !folder_path.exists() {
        let _ = fs::create_dir_all(&folder_path);
    }
    folder_path
}

/// Turn a display code into a file-system friendly name
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

/// Write pretty JSON to a path, creating parent folders
pub fn save_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("^TNX-^IRX"), "_TNX-_IRX");
        assert_eq!(sanitize_file_name("2330.TW"), "2330.TW");
        assert_eq!(sanitize_file_name("a b/c"), "a_b_c");
    }

    #[test]
    fn test_save_json_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charts").join("out.json");

        save_json(&path, &serde_json::json!({"height": 500})).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("500"));
    }
}
