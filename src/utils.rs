use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for swot
/// If profile is Dev, uses "swot-dev" instead of "swot"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "swot-dev",
        Profile::Prod => "swot",
    };
    // Use "com" as qualifier for better cross-platform compatibility
    ProjectDirs::from("com", "swot", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for swot
/// If profile is Dev, uses "swot-dev" instead of "swot"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "swot-dev",
        Profile::Prod => "swot",
    };
    ProjectDirs::from("com", "swot", app_name).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<chrono::NaiveDate, chrono::ParseError> {
    chrono::NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Get the current local date as an ISO 8601 string (YYYY-MM-DD).
/// Journal keys always come from this, never from the client.
pub fn get_current_date_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
