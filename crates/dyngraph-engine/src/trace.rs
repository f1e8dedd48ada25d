//! Debug trace sinks keyed by filename.
//!
//! Opening a sink creates (or appends to) the file; while it is open every
//! traced graph operation appends one line to it. There is no reference
//! counting: opening twice or closing a sink that is not open is an error.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use dyngraph_core::TraceError;

/// Registry of open trace files.
pub struct TraceRegistry {
    dir: Option<PathBuf>,
    append: bool,
    sinks: IndexMap<String, BufWriter<File>>,
}

impl TraceRegistry {
    /// A registry resolving relative filenames against `dir` (or the
    /// working directory when `None`).
    pub fn new(dir: Option<PathBuf>, append: bool) -> Self {
        Self {
            dir,
            append,
            sinks: IndexMap::new(),
        }
    }

    /// Path a filename resolves to.
    pub fn resolve(&self, filename: &str) -> PathBuf {
        let path = Path::new(filename);
        match &self.dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Open the sink `filename`.
    pub fn open(&mut self, filename: &str) -> Result<(), TraceError> {
        if self.sinks.contains_key(filename) {
            return Err(TraceError::AlreadyOpen {
                filename: filename.to_owned(),
            });
        }
        let path = self.resolve(filename);
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(self.append)
            .truncate(!self.append)
            .open(&path)
            .map_err(|e| TraceError::Io {
                filename: filename.to_owned(),
                reason: e.to_string(),
            })?;
        tracing::debug!(filename, path = %path.display(), "trace sink opened");
        self.sinks.insert(filename.to_owned(), BufWriter::new(file));
        Ok(())
    }

    /// Flush and close the sink `filename`.
    pub fn close(&mut self, filename: &str) -> Result<(), TraceError> {
        let mut sink = self
            .sinks
            .shift_remove(filename)
            .ok_or_else(|| TraceError::NotOpen {
                filename: filename.to_owned(),
            })?;
        sink.flush().map_err(|e| TraceError::Io {
            filename: filename.to_owned(),
            reason: e.to_string(),
        })?;
        tracing::debug!(filename, "trace sink closed");
        Ok(())
    }

    /// Whether `filename` is open.
    pub fn is_open(&self, filename: &str) -> bool {
        self.sinks.contains_key(filename)
    }

    /// Filenames of the open sinks, in opening order.
    pub fn open_files(&self) -> Vec<String> {
        self.sinks.keys().cloned().collect()
    }

    /// Append one line to every open sink and flush it.
    ///
    /// Write failures are logged and otherwise ignored so that tracing
    /// never changes the outcome of the traced operation.
    pub fn write(&mut self, line: fmt::Arguments<'_>) {
        for (filename, sink) in &mut self.sinks {
            if let Err(e) = writeln!(sink, "{line}").and_then(|()| sink.flush()) {
                tracing::warn!(filename = %filename, error = %e, "trace write failed");
            }
        }
    }
}

impl fmt::Debug for TraceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceRegistry")
            .field("dir", &self.dir)
            .field("append", &self.append)
            .field("open", &self.open_files())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    fn scratch_dir() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!(
            "dyngraph-trace-unit-{}-{n}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn open_write_close() {
        let dir = scratch_dir();
        let mut reg = TraceRegistry::new(Some(dir.clone()), false);
        reg.open("t.log").unwrap();
        assert!(reg.is_open("t.log"));
        reg.write(format_args!("hello {}", 1));
        reg.close("t.log").unwrap();
        assert!(!reg.is_open("t.log"));
        let text = std::fs::read_to_string(dir.join("t.log")).unwrap();
        assert_eq!(text, "hello 1\n");
    }

    #[test]
    fn lines_reach_the_file_while_the_sink_is_open() {
        let dir = scratch_dir();
        let mut reg = TraceRegistry::new(Some(dir.clone()), false);
        reg.open("live.log").unwrap();
        reg.write(format_args!("one"));
        assert_eq!(std::fs::read_to_string(dir.join("live.log")).unwrap(), "one\n");
        reg.write(format_args!("two"));
        assert_eq!(
            std::fs::read_to_string(dir.join("live.log")).unwrap(),
            "one\ntwo\n"
        );
        reg.close("live.log").unwrap();
    }

    #[test]
    fn closing_an_unopened_sink_fails() {
        let mut reg = TraceRegistry::new(Some(scratch_dir()), false);
        assert_eq!(
            reg.close("neverOpened"),
            Err(TraceError::NotOpen {
                filename: "neverOpened".into()
            })
        );
    }

    #[test]
    fn double_open_and_double_close_fail() {
        let mut reg = TraceRegistry::new(Some(scratch_dir()), false);
        reg.open("f").unwrap();
        assert!(matches!(reg.open("f"), Err(TraceError::AlreadyOpen { .. })));
        reg.close("f").unwrap();
        assert!(matches!(reg.close("f"), Err(TraceError::NotOpen { .. })));
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = scratch_dir();
        let mut reg = TraceRegistry::new(Some(dir), false);
        let err = reg.open("missing-subdir/trace.log").unwrap_err();
        assert!(matches!(err, TraceError::Io { .. }));
        assert!(!reg.is_open("missing-subdir/trace.log"));
    }

    #[test]
    fn append_mode_keeps_previous_lines() {
        let dir = scratch_dir();
        let mut reg = TraceRegistry::new(Some(dir.clone()), true);
        reg.open("a.log").unwrap();
        reg.write(format_args!("first"));
        reg.close("a.log").unwrap();
        reg.open("a.log").unwrap();
        reg.write(format_args!("second"));
        reg.close("a.log").unwrap();
        let text = std::fs::read_to_string(dir.join("a.log")).unwrap();
        assert_eq!(text, "first\nsecond\n");
    }

    #[test]
    fn absolute_paths_ignore_the_directory() {
        let reg = TraceRegistry::new(Some(PathBuf::from("/nowhere")), false);
        let abs = std::env::temp_dir().join("x.log");
        assert_eq!(reg.resolve(abs.to_str().unwrap()), abs);
        assert_eq!(reg.resolve("y.log"), PathBuf::from("/nowhere/y.log"));
    }
}
