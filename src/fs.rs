//! Filesystem capability and the working-directory guard.

use crate::error::{TaskError, TaskResult};
use std::env as stdenv;
use std::io;
use std::path::{Path, PathBuf};

/// The slice of filesystem state that tasks are allowed to observe or change.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;

    fn current_dir(&self) -> io::Result<PathBuf>;

    fn set_current_dir(&self, path: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by the real process state.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFileSystem;

impl FileSystem for HostFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn current_dir(&self) -> io::Result<PathBuf> {
        stdenv::current_dir()
    }

    fn set_current_dir(&self, path: &Path) -> io::Result<()> {
        stdenv::set_current_dir(path)
    }
}

/// Scoped change of the working directory.
///
/// [`DirGuard::enter`] acquires: it remembers the current directory and
/// switches to the target. [`DirGuard::restore`] releases and reports whether
/// switching back worked. If the guard is dropped without `restore` (early
/// return, `?`, panic) the previous directory is restored from `Drop`.
pub struct DirGuard<'a> {
    fs: &'a dyn FileSystem,
    previous: PathBuf,
    restored: bool,
}

impl<'a> DirGuard<'a> {
    pub fn enter(fs: &'a dyn FileSystem, target: &Path) -> TaskResult<Self> {
        let previous = fs
            .current_dir()
            .map_err(|e| TaskError::io("can't read current directory", e))?;
        fs.set_current_dir(target)
            .map_err(|e| TaskError::io(format!("can't chdir to {}", target.display()), e))?;
        tracing::debug!(from = %previous.display(), to = %target.display(), "entered directory");
        Ok(Self {
            fs,
            previous,
            restored: false,
        })
    }

    /// Directory that will be restored.
    pub fn previous(&self) -> &Path {
        &self.previous
    }

    pub fn restore(mut self) -> TaskResult<()> {
        self.restored = true;
        self.fs.set_current_dir(&self.previous).map_err(|e| {
            TaskError::io(format!("can't restore {}", self.previous.display()), e)
        })
    }
}

impl Drop for DirGuard<'_> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(e) = self.fs.set_current_dir(&self.previous) {
            tracing::warn!(
                dir = %self.previous.display(),
                error = %e,
                "failed to restore directory"
            );
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::FileSystem;
    use std::cell::{Cell, RefCell};
    use std::collections::HashSet;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    /// In-memory filesystem: a set of existing paths and a recorded cwd.
    ///
    /// `cwd` is shared so a fake launcher can observe it at spawn time.
    pub struct FakeFileSystem {
        pub paths: HashSet<PathBuf>,
        pub cwd: Rc<RefCell<PathBuf>>,
        pub visited: RefCell<Vec<PathBuf>>,
        pub probes: Cell<usize>,
    }

    impl FakeFileSystem {
        pub fn new(cwd: &str, paths: &[&str]) -> Self {
            Self {
                paths: paths.iter().map(PathBuf::from).collect(),
                cwd: Rc::new(RefCell::new(PathBuf::from(cwd))),
                visited: RefCell::new(Vec::new()),
                probes: Cell::new(0),
            }
        }
    }

    impl FileSystem for FakeFileSystem {
        fn exists(&self, path: &Path) -> bool {
            self.probes.set(self.probes.get() + 1);
            self.paths.contains(path)
        }

        fn current_dir(&self) -> io::Result<PathBuf> {
            Ok(self.cwd.borrow().clone())
        }

        fn set_current_dir(&self, path: &Path) -> io::Result<()> {
            if !self.paths.contains(path) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
            }
            self.visited.borrow_mut().push(path.to_path_buf());
            *self.cwd.borrow_mut() = path.to_path_buf();
            Ok(())
        }
    }
}
