//! Git plumbing for `git-cmt`: read the working-tree status, stage, commit,
//! and pick an editor for the commit message.

use anyhow::{Context, Result, bail};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Editors tried in order when `$EDITOR` is unset
pub const FALLBACK_EDITORS: &[&str] = &["vim", "nano"];

/// A git working tree rooted at `dir`
#[derive(Debug, Clone)]
pub struct GitRepo {
    dir: PathBuf,
}

impl GitRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn current() -> Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn is_repo(&self) -> bool {
        Command::new("git")
            .args(["rev-parse", "--git-dir"])
            .current_dir(&self.dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    /// `git status --short`, trimmed. Empty means nothing to commit.
    pub fn changes(&self) -> Result<String> {
        let output = self.run(&["status", "--short"])?;
        Ok(output.trim().to_string())
    }

    /// `git add .`
    pub fn add_all(&self) -> Result<()> {
        self.run(&["add", "."]).map(|_| ())
    }

    /// `git commit -m <message>`
    pub fn commit(&self, message: &str) -> Result<String> {
        self.run(&["commit", "-m", message])
    }

    fn run(&self, args: &[&str]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.dir)
            .output()
            .with_context(|| format!("Failed to run git {}", args.join(" ")))?;

        if !output.status.success() {
            bail!(
                "'git {}' failed: {}",
                args.join(" "),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Pick the editor: a non-blank `$EDITOR`, else the first fallback on `PATH`.
pub fn resolve_editor(editor_var: Option<String>, path_var: Option<&OsStr>) -> Option<String> {
    if let Some(editor) = editor_var.filter(|e| !e.trim().is_empty()) {
        return Some(editor);
    }
    FALLBACK_EDITORS
        .iter()
        .find(|name| find_in_path(name, path_var).is_some())
        .map(|name| name.to_string())
}

/// Locate an executable named `name` in a `PATH`-style list
pub fn find_in_path(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    std::env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Open `file` in `editor`, inheriting the terminal.
///
/// `editor` may carry arguments, e.g. `code --wait`.
pub fn open_in_editor(editor: &str, file: &Path) -> Result<()> {
    let mut parts = editor.split_whitespace();
    let Some(program) = parts.next() else {
        bail!("Editor command is empty");
    };

    let status = Command::new(program)
        .args(parts)
        .arg(file)
        .status()
        .with_context(|| format!("Failed to launch editor '{editor}'"))?;

    if !status.success() {
        bail!("Editor '{editor}' exited with {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    #[test]
    fn editor_var_wins() {
        assert_eq!(
            resolve_editor(Some("hx".to_string()), None),
            Some("hx".to_string())
        );
    }

    #[test]
    fn falls_back_to_editor_found_on_path() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nano"), "").unwrap();
        let path_var = dir.path().as_os_str();

        assert_eq!(
            resolve_editor(Some("  ".to_string()), Some(path_var)),
            Some("nano".to_string())
        );

        fs::write(dir.path().join("vim"), "").unwrap();
        assert_eq!(resolve_editor(None, Some(path_var)), Some("vim".to_string()));
    }

    #[test]
    fn editor_launch_errors_name_the_editor() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("COMMIT_MSG");

        let err = open_in_editor("aicli-no-such-editor --wait", &file).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to launch editor 'aicli-no-such-editor --wait'"
        );
        assert!(open_in_editor("   ", &file).is_err());
    }

    #[test]
    fn no_editor_anywhere() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_editor(None, Some(dir.path().as_os_str())), None);
        assert_eq!(resolve_editor(None, None), None);
    }

    #[test]
    fn status_lists_untracked_files() {
        if !git_available() {
            return;
        }
        let dir = TempDir::new().unwrap();
        let repo = GitRepo::new(dir.path());

        Command::new("git")
            .args(["init", "-q"])
            .current_dir(dir.path())
            .status()
            .unwrap();
        assert!(repo.is_repo());
        assert_eq!(repo.changes().unwrap(), "");

        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        assert_eq!(repo.changes().unwrap(), "?? notes.txt");
    }
}
