//! One writer per destination: a pending queue filled by producer threads
//! and drained by a dedicated consumer thread. Producers only ever pay for
//! formatting and a queue push; file I/O stays on the consumer side.

use crate::fmt::{self, DisplayOptions};
use crate::level::{FileHandling, FileTag, Level, Mode};
use crate::record::Record;
use crate::rotate::RotationPolicy;
use std::fs::OpenOptions;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

/// Destination files are rotated once they reach a mebibyte unless overridden.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Owns one log destination: its file, threshold, mode, and pending queue.
///
/// Cheap to share: all mutable state sits behind one internal lock, and the
/// consumer thread holds it only long enough to swap the queue out.
pub struct Writer {
    shared: Arc<Shared>,
    /// Join handle of the consumer loop; taken exactly once at close.
    thread: Mutex<Option<JoinHandle<()>>>,
}

struct Shared {
    /// Identity, fixed for the writer's lifetime. The file is only ever
    /// opened, appended, and renamed from the consumer loop.
    path: PathBuf,
    state: Mutex<State>,
    /// Signals "queue non-empty or quit" to the consumer loop.
    wake: Condvar,
    /// Signals "batch flushed" back to `flush` callers.
    drained: Condvar,
}

struct State {
    level: Level,
    mode: Mode,
    tag: FileTag,
    handling: FileHandling,
    max_size: u64,
    display: DisplayOptions,
    /// Rendered lines, paired with their level for console routing.
    queue: Vec<(Level, String)>,
    stopped: bool,
    quit: bool,
    /// A batch is being written; the queue being empty does not yet mean flushed.
    draining: bool,
    running: bool,
}

/// Per-batch snapshot so the consumer works from one coherent view even if
/// mode or size limits change mid-write.
#[derive(Clone, Copy)]
struct BatchContext {
    mode: Mode,
    tag: FileTag,
    handling: FileHandling,
    max_size: u64,
}

impl State {
    const fn context(&self) -> BatchContext {
        BatchContext {
            mode: self.mode,
            tag: self.tag,
            handling: self.handling,
            max_size: self.max_size,
        }
    }
}

impl Writer {
    /// A new writer is idle: nothing runs until [`Writer::start`] or a mode
    /// change away from `Disabled`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, level: Level, mode: Mode) -> Self {
        Self {
            shared: Arc::new(Shared {
                path: path.into(),
                state: Mutex::new(State {
                    level,
                    mode,
                    tag: FileTag::default(),
                    handling: FileHandling::default(),
                    max_size: DEFAULT_MAX_FILE_SIZE,
                    display: DisplayOptions::default(),
                    queue: Vec::new(),
                    stopped: false,
                    quit: false,
                    draining: false,
                    running: false,
                }),
                wake: Condvar::new(),
                drained: Condvar::new(),
            }),
            thread: Mutex::new(None),
        }
    }

    /// Naming style for rotated files.
    #[must_use]
    pub fn tag(self, tag: FileTag) -> Self {
        self.state().tag = tag;
        self
    }

    /// Whether the file is size-split at all. Tagged initial naming is the
    /// registry's job; the path passed to [`Writer::new`] is used as-is.
    #[must_use]
    pub fn handling(self, handling: FileHandling) -> Self {
        self.state().handling = handling;
        self
    }

    /// Which fields each rendered line carries.
    #[must_use]
    pub fn display(self, display: DisplayOptions) -> Self {
        self.state().display = display;
        self
    }

    /// Rotation threshold in bytes.
    #[must_use]
    pub fn max_file_size(self, bytes: u64) -> Self {
        self.state().max_size = bytes;
        self
    }

    /// Formats the record with this writer's own display options and
    /// threshold, pushes the line, and wakes the consumer unless paused.
    /// Never performs I/O on the caller's thread; a `Disabled` writer
    /// returns without even formatting.
    pub fn enqueue(&self, record: &Record) {
        let mut st = self.state();
        if st.mode == Mode::Disabled {
            return;
        }
        let line = fmt::render(record, &st.display, st.level);
        st.queue.push((record.level, line));
        let stopped = st.stopped;
        drop(st);

        if !stopped {
            self.shared.wake.notify_one();
        }
    }

    pub fn set_level(&self, level: Level) {
        self.state().level = level;
    }

    /// Entering a file-writing mode creates the destination directory up
    /// front; leaving `Disabled` starts the consumer loop if it never ran.
    pub fn set_mode(&self, mode: Mode) {
        let needs_start = {
            let mut st = self.state();
            st.mode = mode;
            mode != Mode::Disabled && !st.running && !st.quit
        };

        if mode.to_file()
            && let Some(parent) = self.shared.path.parent()
        {
            let _ = std::fs::create_dir_all(parent);
        }
        if needs_start {
            self.start();
        }
    }

    pub fn set_max_file_size(&self, bytes: u64) {
        self.state().max_size = bytes;
    }

    /// Soft pause: enqueue keeps accepting and buffering, but the consumer
    /// is not woken, so no I/O happens until resumed. Resuming wakes the
    /// loop so retained messages are written immediately, and starts it if
    /// the writer was registered while paused and never ran.
    pub fn stop(&self, stop: bool) {
        let needs_start = {
            let mut st = self.state();
            st.stopped = stop;
            !stop && !st.running && st.mode != Mode::Disabled && !st.quit
        };

        if !stop {
            if needs_start {
                self.start();
            }
            self.shared.wake.notify_all();
        }
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.state().stopped
    }

    /// Current level threshold.
    #[must_use]
    pub fn threshold(&self) -> Level {
        self.state().level
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.state().mode
    }

    /// The file this writer appends to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// Whether the consumer loop is live. Mostly a test-support surface.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state().running
    }

    /// Spawns the consumer loop. Idempotent; a no-op after close or while
    /// the mode is `Disabled`.
    pub fn start(&self) {
        let mut slot = self
            .thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        {
            let mut st = self.state();
            if st.running || st.quit || st.mode == Mode::Disabled {
                return;
            }
            st.running = true;
        }

        let shared = Arc::clone(&self.shared);
        let name = self
            .shared
            .path
            .file_name()
            .map_or_else(|| "modulog".to_string(), |n| {
                format!("modulog-{}", n.to_string_lossy())
            });
        match std::thread::Builder::new()
            .name(name)
            .spawn(move || shared.run())
        {
            Ok(handle) => *slot = Some(handle),
            Err(_) => self.state().running = false,
        }
    }

    /// Blocks until the queue and any in-flight batch are on disk. Returns
    /// immediately when nothing will drain (paused, never started, closed).
    pub fn flush(&self) {
        let mut st = self.state();
        if !st.running || st.stopped {
            return;
        }
        self.shared.wake.notify_all();
        while (!st.queue.is_empty() || st.draining) && !st.quit {
            st = self
                .shared
                .drained
                .wait(st)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// One-way terminal shutdown: sets quit, wakes the consumer so it
    /// observes it, and blocks until the final batch is flushed and the
    /// thread is gone. Messages enqueued strictly before this call are
    /// written; later ones are best-effort.
    pub fn close(&self) {
        let inline = {
            let mut st = self.state();
            st.quit = true;
            if st.running || st.queue.is_empty() {
                None
            } else {
                // Registered-but-never-started writers drain on the closing
                // thread so teardown still flushes everything.
                Some((std::mem::take(&mut st.queue), st.context()))
            }
        };
        self.shared.wake.notify_all();

        let handle = self
            .thread
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            let _ = handle.join();
        }
        if let Some((batch, ctx)) = inline {
            self.shared.write_batch(&batch, ctx);
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Writer {
    /// Dropping without an explicit close still joins the consumer thread
    /// and flushes whatever is queued.
    fn drop(&mut self) {
        self.close();
    }
}

impl Shared {
    /// Consumer loop: wait for work (or quit), swap the whole queue out so
    /// producers are blocked only for the swap, then write without the lock.
    /// Exits only after observing quit AND draining the last batch.
    fn run(&self) {
        loop {
            let (batch, ctx) = {
                let st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                let mut st = self
                    .wake
                    .wait_while(st, |s| (s.queue.is_empty() || s.stopped) && !s.quit)
                    .unwrap_or_else(PoisonError::into_inner);
                if st.queue.is_empty() {
                    // Only reachable via quit.
                    st.running = false;
                    self.drained.notify_all();
                    return;
                }
                st.draining = true;
                (std::mem::take(&mut st.queue), st.context())
            };

            self.write_batch(&batch, ctx);

            let mut st = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            st.draining = false;
            self.drained.notify_all();
            if st.quit && st.queue.is_empty() {
                st.running = false;
                return;
            }
        }
    }

    /// Rotation is checked once per batch, before the append, so a full file
    /// is renamed away and already-written bytes are never overwritten. All
    /// failures degrade to dropped lines, never a panic or an error on
    /// the producer side.
    fn write_batch(&self, batch: &[(Level, String)], ctx: BatchContext) {
        if ctx.mode.to_file() {
            let rotated = if ctx.handling == FileHandling::Split {
                RotationPolicy::new(ctx.max_size, ctx.tag).rotate_if_full(&self.path)
            } else {
                None
            };

            if let Some(parent) = self.path.parent()
                && !parent.exists()
            {
                let _ = std::fs::create_dir_all(parent);
            }

            if let Ok(mut file) = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)
            {
                if let Some(previous) = rotated {
                    let _ = writeln!(file, "Previous log: {}", previous.display());
                }
                for (_, line) in batch {
                    let _ = file.write_all(line.as_bytes());
                }
            }
        }

        if ctx.mode.to_console() {
            let mut out = io::stdout().lock();
            let mut err = io::stderr().lock();
            for (level, line) in batch {
                // Warning and above go to stderr, the rest to stdout.
                if *level >= Level::Warning {
                    let _ = err.write_all(line.as_bytes());
                } else {
                    let _ = out.write_all(line.as_bytes());
                }
            }
        }
    }
}
