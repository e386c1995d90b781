
use crate::crypto::SecureRng;
use crate::error::{classify_io, ErrorReporter, LogReporter};
use crate::ui::progress::ProgressBar;
use crate::{CancelToken, EraseError, EraseResult, PassType};
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Fixed overwrite block size; cancellation is polled at this granularity
pub const BLOCK_SIZE: usize = 8192;

/// Length of the randomly generated replacement filename
const RENAME_LEN: usize = 16;

/// Progress redraw interval during a pass
const PROGRESS_STEP: u64 = 4 * 1024 * 1024;

pub struct SecureEraseEngine {
    reporter: Box<dyn ErrorReporter>,
    show_progress: bool,
}

impl Default for SecureEraseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SecureEraseEngine {
    pub fn new() -> Self {
        Self {
            reporter: Box::new(LogReporter),
            show_progress: false,
        }
    }

    /// Route failure descriptions to a caller-supplied sink instead of the
    /// tracing subscriber
    pub fn with_reporter(reporter: Box<dyn ErrorReporter>) -> Self {
        Self {
            reporter,
            show_progress: false,
        }
    }

    /// Render a per-pass progress bar to stdout while overwriting
    pub fn show_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Erase one file. Applies every pass in `plan` in order, then truncates
    /// and deletes the file. On failure the error has already been handed to
    /// the reporter; the filesystem is left wherever the failing stage
    /// stopped (in particular, a cancelled erase leaves the renamed,
    /// partially overwritten file in place).
    pub fn erase(&self, path: &str, plan: &[PassType], cancel: &CancelToken) -> EraseResult<()> {
        tracing::info!(path, passes = plan.len(), "starting secure erase");
        match self.run(path, plan, cancel) {
            Ok(()) => {
                tracing::info!(path, "secure erase complete");
                Ok(())
            }
            Err(err) => {
                self.reporter.report(&err);
                Err(err)
            }
        }
    }

    fn run(&self, path: &str, plan: &[PassType], cancel: &CancelToken) -> EraseResult<()> {
        let target = Self::validate(path)?;

        Self::clear_attributes(&target).map_err(|e| classify_io(e, path))?;

        // A failed rename leaves the file untouched under its original name;
        // past this point the original directory entry is gone for good.
        let renamed = Self::rename_target(&target).map_err(|e| classify_io(e, path))?;
        let renamed_str = renamed.display().to_string();

        let mut file =
            Self::open_exclusive(&renamed).map_err(|e| classify_io(e, &renamed_str))?;

        self.overwrite(&mut file, plan, cancel)?;

        file.set_len(0).map_err(|e| classify_io(e, &renamed_str))?;
        file.sync_all().map_err(|e| classify_io(e, &renamed_str))?;

        // The handle (and its lock) must be released before the unlink on
        // platforms that refuse to delete open files.
        drop(file);
        fs::remove_file(&renamed).map_err(|e| classify_io(e, &renamed_str))?;

        Ok(())
    }

    /// Stage 1: the path must be non-empty and name an existing regular file
    fn validate(path: &str) -> EraseResult<PathBuf> {
        if path.trim().is_empty() {
            return Err(EraseError::FileNotFound("<empty path>".to_string()));
        }

        let target = PathBuf::from(path);
        let meta = fs::metadata(&target).map_err(|e| classify_io(e, path))?;
        if !meta.is_file() {
            return Err(EraseError::FileNotFound(format!(
                "{}: not a regular file",
                path
            )));
        }

        Ok(target)
    }

    /// Stage 2: strip attributes that would block the overwrite
    #[cfg(unix)]
    fn clear_attributes(path: &Path) -> io::Result<()> {
        use std::os::unix::fs::PermissionsExt;

        // Read-only is the only blocking bit Unix knows; hidden/system are
        // Windows directory metadata.
        let mut perms = fs::metadata(path)?.permissions();
        if perms.readonly() {
            perms.set_mode(perms.mode() | 0o200);
            fs::set_permissions(path, perms)?;
        }
        Ok(())
    }

    /// Stage 2: strip read-only, hidden, and system attribute bits
    #[cfg(windows)]
    fn clear_attributes(path: &Path) -> io::Result<()> {
        use std::os::windows::ffi::OsStrExt;
        use winapi::um::fileapi::{
            GetFileAttributesW, SetFileAttributesW, INVALID_FILE_ATTRIBUTES,
        };
        use winapi::um::winnt::{
            FILE_ATTRIBUTE_HIDDEN, FILE_ATTRIBUTE_NORMAL, FILE_ATTRIBUTE_READONLY,
            FILE_ATTRIBUTE_SYSTEM,
        };

        let wide: Vec<u16> = path
            .as_os_str()
            .encode_wide()
            .chain(std::iter::once(0))
            .collect();

        let attrs = unsafe { GetFileAttributesW(wide.as_ptr()) };
        if attrs == INVALID_FILE_ATTRIBUTES {
            return Err(io::Error::last_os_error());
        }

        let cleared =
            attrs & !(FILE_ATTRIBUTE_READONLY | FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM);
        let cleared = if cleared == 0 {
            FILE_ATTRIBUTE_NORMAL
        } else {
            cleared
        };

        if cleared != attrs && unsafe { SetFileAttributesW(wide.as_ptr(), cleared) } == 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }

    /// Stage 3: move the file to a random, collision-free name in the same
    /// directory, removing the original name from directory metadata before
    /// content destruction begins
    fn rename_target(path: &Path) -> io::Result<PathBuf> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut rng = rand::thread_rng();
        let renamed = loop {
            let name: String = (&mut rng)
                .sample_iter(Alphanumeric)
                .take(RENAME_LEN)
                .map(char::from)
                .collect();
            let candidate = dir.join(name);
            if !candidate.exists() {
                break candidate;
            }
        };

        fs::rename(path, &renamed)?;
        tracing::debug!(
            from = %path.display(),
            to = %renamed.display(),
            "original directory entry unlinked"
        );
        Ok(renamed)
    }

    /// Stage 4: open for writing with no sharing; a concurrent holder makes
    /// this fail at the filesystem level
    #[cfg(unix)]
    fn open_exclusive(path: &Path) -> io::Result<File> {
        use nix::fcntl::{flock, FlockArg};
        use std::os::unix::io::AsRawFd;

        let file = OpenOptions::new().write(true).open(path)?;
        flock(file.as_raw_fd(), FlockArg::LockExclusiveNonblock)
            .map_err(|errno| io::Error::from_raw_os_error(errno as i32))?;
        Ok(file)
    }

    #[cfg(windows)]
    fn open_exclusive(path: &Path) -> io::Result<File> {
        use std::os::windows::fs::OpenOptionsExt;

        OpenOptions::new().write(true).share_mode(0).open(path)
    }

    /// Stage 5: apply every pass in order. Each pass rewrites the full
    /// length from offset 0 in fixed blocks and is flushed to persistent
    /// storage before the next begins. Cancellation is polled before every
    /// block; honoring it returns immediately without truncating or
    /// deleting.
    fn overwrite(&self, file: &mut File, plan: &[PassType], cancel: &CancelToken) -> EraseResult<()> {
        let length = file.metadata()?.len();
        let rng = SecureRng::new();
        let mut block = [0u8; BLOCK_SIZE];

        for (index, pass) in plan.iter().enumerate() {
            tracing::info!(
                pass = index + 1,
                total = plan.len(),
                kind = %pass,
                "overwrite pass started"
            );

            let mut bar = self.show_progress.then(|| ProgressBar::new(48));
            file.seek(SeekFrom::Start(0))?;

            let mut written = 0u64;
            while written < length {
                if cancel.is_cancelled() {
                    tracing::warn!(
                        pass = index + 1,
                        bytes_written = written,
                        "cancellation honored mid-pass; file left at renamed path"
                    );
                    return Err(EraseError::Cancelled);
                }

                let chunk = (length - written).min(BLOCK_SIZE as u64) as usize;
                match pass {
                    PassType::Zeros => block[..chunk].fill(0x00),
                    PassType::Ones => block[..chunk].fill(0xFF),
                    // Fresh random bytes per block, never reused across
                    // blocks or passes
                    PassType::Random => rng.fill_bytes(&mut block[..chunk])?,
                }
                file.write_all(&block[..chunk])?;
                written += chunk as u64;

                if let Some(bar) = bar.as_mut() {
                    if written.is_multiple_of(PROGRESS_STEP) || written >= length {
                        let pct = written as f64 / length as f64 * 100.0;
                        bar.render(pct, Some(written), Some(length));
                    }
                }
            }

            // Physical flush, not just the OS cache, before the next pattern
            // goes down
            file.sync_all()?;
        }

        Ok(())
    }
}
