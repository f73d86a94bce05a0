//! Secret reference resolver.
//!
//! Credential values in `config.toml` can use special prefixes to
//! reference secrets stored outside the file:
//!
//! - `pass::path/in/store` — runs `pass show path/in/store`, returns first line
//! - `env::VAR_NAME` — reads `$VAR_NAME` from the environment
//! - `file::/path/to/file` — reads the first line of the file
//! - anything else — returned as-is (plain text)

/// Resolves a value that may contain a secret reference prefix.
pub fn resolve(value: &str) -> Result<String, String> {
    if let Some(path) = value.strip_prefix("pass::") {
        resolve_pass(path)
    } else if let Some(var) = value.strip_prefix("env::") {
        resolve_env(var)
    } else if let Some(path) = value.strip_prefix("file::") {
        resolve_file(path)
    } else {
        Ok(value.to_string())
    }
}

/// Runs `pass show <path>` and returns the first line of stdout.
fn resolve_pass(path: &str) -> Result<String, String> {
    let output = std::process::Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!(
            "`pass show {}` failed (exit {}): {}",
            path,
            output.status,
            stderr.trim()
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .next()
        .map(|s| s.to_string())
        .ok_or_else(|| format!("`pass show {}` produced no output", path))
}

/// Reads an environment variable.
fn resolve_env(var: &str) -> Result<String, String> {
    std::env::var(var).map_err(|_| format!("environment variable `{}` is not set", var))
}

/// Reads the first line of a file, trimmed.
fn resolve_file(path: &str) -> Result<String, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read `{}`: {}", path, e))?;
    let first = content.lines().next().unwrap_or("").trim();
    if first.is_empty() {
        return Err(format!("`{}` is empty", path));
    }
    Ok(first.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn plain_text_passthrough() {
        assert_eq!(resolve("hello").unwrap(), "hello");
        assert_eq!(resolve("").unwrap(), "");
        assert_eq!(resolve("abc123rapidapikey").unwrap(), "abc123rapidapikey");
    }

    #[test]
    fn env_prefix_resolves() {
        unsafe {
            std::env::set_var("_MATCHCAL_TEST_SECRET", "my-secret-value");
        }
        assert_eq!(
            resolve("env::_MATCHCAL_TEST_SECRET").unwrap(),
            "my-secret-value"
        );
        unsafe {
            std::env::remove_var("_MATCHCAL_TEST_SECRET");
        }
    }

    #[test]
    fn env_prefix_missing_var_errors() {
        let result = resolve("env::_MATCHCAL_NONEXISTENT_VAR_12345");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not set"));
    }

    #[test]
    fn file_prefix_reads_first_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "  the-token  ").unwrap();
        writeln!(file, "second line is ignored").unwrap();

        let reference = format!("file::{}", path.display());
        assert_eq!(resolve(&reference).unwrap(), "the-token");
    }

    #[test]
    fn file_prefix_empty_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::File::create(&path).unwrap();

        let reference = format!("file::{}", path.display());
        assert!(resolve(&reference).unwrap_err().contains("empty"));
    }

    #[test]
    fn file_prefix_missing_file_errors() {
        let result = resolve("file::/nonexistent/path/to/token/12345");
        assert!(result.is_err());
    }

    #[test]
    fn pass_prefix_missing_entry_errors() {
        // Works whether or not `pass` is installed: either the command is
        // missing or the entry is.
        let result = resolve("pass::nonexistent/entry/that/should/not/exist/12345");
        assert!(result.is_err());
    }
}
