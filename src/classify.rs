//! Python file classification.
//!
//! A path is analyzed when its name carries the `.py` suffix or its first
//! line is a shebang naming a Python interpreter (`python`, `python3`,
//! `pythonw`, ...). Classification never fails: a path that cannot be
//! opened or read is simply not a Python file.

use lazy_static::lazy_static;
use regex::bytes::Regex;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Canonical source suffix for Python files.
const PYTHON_SUFFIX: &str = ".py";

/// How far into the first line the shebang probe reads.
const SHEBANG_PROBE_LEN: usize = 100;

lazy_static! {
    /// Shebang directive naming a Python interpreter, with an optional
    /// single trailing version/variant character.
    static ref SHEBANG_RE: Regex = Regex::new(r"^#!.*\bpython[23w]?\b").unwrap();
}

/// Decide whether a path should be analyzed as Python source.
pub fn is_python_file<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();

    let by_suffix = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(PYTHON_SUFFIX))
        .unwrap_or(false);
    if by_suffix {
        return true;
    }

    match read_first_line(path) {
        Ok(line) => SHEBANG_RE.is_match(&line),
        Err(_) => false,
    }
}

/// Read at most the first [`SHEBANG_PROBE_LEN`] bytes of a file's first line.
///
/// The line need not be valid UTF-8; matching happens on raw bytes.
fn read_first_line(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut buf = [0u8; SHEBANG_PROBE_LEN];
    let mut filled = 0;
    while filled < buf.len() {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }

    let mut line = &buf[..filled];
    if let Some(pos) = line.iter().position(|&b| b == b'\n') {
        line = &line[..pos];
    }
    Ok(line.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_accepts_py_suffix() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "module.py", b"x = 1\n");
        assert!(is_python_file(path));
    }

    #[test]
    fn test_suffix_wins_without_reading() {
        // The file does not exist; the suffix alone is enough.
        assert!(is_python_file("no/such/dir/module.py"));
    }

    #[test]
    fn test_accepts_python_shebang() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "run", b"#!/usr/bin/python\nprint('x')\n");
        assert!(is_python_file(path));
    }

    #[test]
    fn test_accepts_env_shebang_with_version() {
        let temp = TempDir::new().unwrap();
        for interp in ["python2", "python3", "pythonw"] {
            let content = format!("#!/usr/bin/env {}\n", interp);
            let path = write_file(&temp, interp, content.as_bytes());
            assert!(is_python_file(&path), "should accept {}", interp);
        }
    }

    #[test]
    fn test_accepts_minor_version_interpreter() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "tool", b"#!/usr/bin/python2.7\n");
        assert!(is_python_file(path));
    }

    #[test]
    fn test_rejects_other_interpreters() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "script", b"#!/usr/bin/env perl\nprint 1;\n");
        assert!(!is_python_file(path));

        // "pythonic" has no word boundary after "python" + one char
        let path = write_file(&temp, "odd", b"#!/usr/bin/pythonista\n");
        assert!(!is_python_file(path));
    }

    #[test]
    fn test_rejects_plain_text() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "notes.txt", b"import this is prose\n");
        assert!(!is_python_file(path));
    }

    #[test]
    fn test_probe_is_bounded() {
        let temp = TempDir::new().unwrap();
        // The interpreter name sits past the 100-byte probe window.
        let mut content = b"#!".to_vec();
        content.extend(std::iter::repeat(b'x').take(120));
        content.extend_from_slice(b"python\n");
        let path = write_file(&temp, "longline", &content);
        assert!(!is_python_file(path));
    }

    #[test]
    fn test_unreadable_paths_are_not_python() {
        let temp = TempDir::new().unwrap();
        // A directory cannot be read as a file.
        assert!(!is_python_file(temp.path()));
        // A missing path cannot be opened.
        assert!(!is_python_file(temp.path().join("missing")));
    }
}
