//! Platform path helpers.
//!
//! The data directory holds the pin list, the preferences and the trace file.
//! It follows the XDG base directory convention: `$XDG_DATA_HOME/quicklaunch`,
//! falling back to `~/.local/share/quicklaunch`.

use std::path::PathBuf;

const APP_DIR: &str = "quicklaunch";

/// Returns the default data directory.
///
/// If neither `XDG_DATA_HOME` nor `HOME` is set, a relative `.quicklaunch`
/// directory in the working directory is used.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    resolve_data_dir(
        std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
        home_dir(),
    )
}

fn resolve_data_dir(xdg_data_home: Option<PathBuf>, home: Option<PathBuf>) -> PathBuf {
    match (xdg_data_home, home) {
        (Some(xdg), _) if xdg.is_absolute() => xdg.join(APP_DIR),
        (_, Some(home)) => home.join(".local").join("share").join(APP_DIR),
        _ => PathBuf::from(format!(".{APP_DIR}")),
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, or any path when no home is known, are
/// returned unchanged.
///
/// ```
/// use quicklaunch::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("/absolute/path"), std::path::PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_with_home(path, home_dir())
}

fn expand_with_home(path: &str, home: Option<PathBuf>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(rest.trim_start_matches('/')),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_takes_precedence_over_home() {
        let dir = resolve_data_dir(Some("/xdg".into()), Some("/home/me".into()));
        assert_eq!(dir, PathBuf::from("/xdg/quicklaunch"));
    }

    #[test]
    fn relative_xdg_is_ignored() {
        let dir = resolve_data_dir(Some("xdg".into()), Some("/home/me".into()));
        assert_eq!(dir, PathBuf::from("/home/me/.local/share/quicklaunch"));
    }

    #[test]
    fn no_home_falls_back_to_working_directory() {
        assert_eq!(resolve_data_dir(None, None), PathBuf::from(".quicklaunch"));
    }

    #[test]
    fn tilde_expansion() {
        let home = Some(PathBuf::from("/home/me"));
        assert_eq!(expand_with_home("~", home.clone()), PathBuf::from("/home/me"));
        assert_eq!(expand_with_home("~/apps.json", home.clone()), PathBuf::from("/home/me/apps.json"));
        assert_eq!(expand_with_home("~other/x", home.clone()), PathBuf::from("~other/x"));
        assert_eq!(expand_with_home("/etc/x", home), PathBuf::from("/etc/x"));
        assert_eq!(expand_with_home("~/x", None), PathBuf::from("~/x"));
    }
}
