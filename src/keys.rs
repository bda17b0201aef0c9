// Credential store: the API key lives in `~/.pushbulletkey` as the raw
// secret string. It is written once, on first run, and only ever read
// afterwards; this tool never rewrites or deletes it.

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const KEY_FILE: &str = ".pushbulletkey";

/// Path of the credential file in the user's home directory.
pub fn key_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(KEY_FILE)
}

/// Return the cached API key, prompting for one on the terminal and
/// persisting it if this is the first run.
pub fn get_api_key() -> Result<String> {
    let stdin = io::stdin();
    read_or_prompt(&key_path(), &mut stdin.lock(), &mut io::stdout())
}

/// Testable core of `get_api_key`: the prompt reads from `input` and
/// writes to `out` instead of the process's terminal.
///
/// An existing key file is returned verbatim (no trimming); a freshly
/// prompted key is trimmed before it is stored and returned.
pub fn read_or_prompt(path: &Path, input: &mut impl BufRead, out: &mut impl Write) -> Result<String> {
    if path.is_file() {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read API key from {}", path.display()));
    }

    writeln!(out, "What's your API key?")?;
    writeln!(out, "Find it at <https://www.pushbullet.com/account>.")?;
    write!(out, "> ")?;
    out.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read API key from input")?;
    if read == 0 {
        anyhow::bail!("No input available for API key");
    }
    let api_key = line.trim().to_string();

    // The key file must never be group/world readable. The mask guard
    // covers exactly the write and restores the previous mask on every
    // exit path, including a failed write.
    {
        let _mask = private_files();
        fs::write(path, &api_key)
            .with_context(|| format!("Failed to write API key to {}", path.display()))?;
    }

    Ok(api_key)
}

#[cfg(unix)]
fn private_files() -> impl Drop {
    use nix::sys::stat::{umask, Mode};

    struct MaskGuard(Mode);

    impl Drop for MaskGuard {
        fn drop(&mut self) {
            umask(self.0);
        }
    }

    MaskGuard(umask(Mode::from_bits_truncate(0o077)))
}

#[cfg(not(unix))]
fn private_files() -> impl Drop {
    struct MaskGuard;
    impl Drop for MaskGuard {
        fn drop(&mut self) {}
    }
    MaskGuard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompts_persists_and_returns_trimmed_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pushbulletkey");

        let mut input = Cursor::new(b"ABC123\n".to_vec());
        let mut out = Vec::new();
        let key = read_or_prompt(&path, &mut input, &mut out).unwrap();

        assert_eq!(key, "ABC123");
        assert_eq!(fs::read_to_string(&path).unwrap(), "ABC123");

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("What's your API key?"));
        assert!(printed.contains("pushbullet.com/account"));
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pushbulletkey");

        let mut input = Cursor::new(b"ABC123\n".to_vec());
        read_or_prompt(&path, &mut input, &mut Vec::new()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "key file readable by group/other");
    }

    #[test]
    fn existing_key_is_returned_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pushbulletkey");
        fs::write(&path, "ABC123").unwrap();

        // Empty input: any attempt to prompt would fail on EOF.
        let mut input = Cursor::new(Vec::new());
        let mut out = Vec::new();
        let key = read_or_prompt(&path, &mut input, &mut out).unwrap();

        assert_eq!(key, "ABC123");
        assert!(out.is_empty());
    }

    #[test]
    fn existing_key_is_not_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pushbulletkey");
        fs::write(&path, "ABC123\n").unwrap();

        let mut input = Cursor::new(Vec::new());
        let key = read_or_prompt(&path, &mut input, &mut Vec::new()).unwrap();
        assert_eq!(key, "ABC123\n");
    }

    #[test]
    fn eof_on_prompt_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".pushbulletkey");

        let mut input = Cursor::new(Vec::new());
        let err = read_or_prompt(&path, &mut input, &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("No input"));
        assert!(!path.exists());
    }
}
