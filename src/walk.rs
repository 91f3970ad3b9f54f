//! Lazy traversal of candidate paths.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A lazy, finite stream of candidate file paths under a root.
///
/// A directory root yields every regular file beneath it exactly once, in
/// directory-entry order; unreadable entries are skipped. Any other root (a
/// file, a dangling path, a special file) is yielded once unchanged -
/// classification and existence checks happen downstream.
pub struct Walker {
    state: State,
}

enum State {
    Descend(walkdir::IntoIter),
    Single(Option<PathBuf>),
}

impl Walker {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        let state = if root.is_dir() {
            State::Descend(WalkDir::new(root).into_iter())
        } else {
            State::Single(Some(root.to_path_buf()))
        };
        Walker { state }
    }
}

impl Iterator for Walker {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        match &mut self.state {
            State::Descend(walk) => {
                for entry in walk {
                    let entry = match entry {
                        Ok(e) => e,
                        Err(_) => continue,
                    };
                    if entry.file_type().is_file() {
                        return Some(entry.into_path());
                    }
                }
                None
            }
            State::Single(slot) => slot.take(),
        }
    }
}
