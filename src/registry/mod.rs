//! Process-wide router from module name to writer, plus the bounded buffer
//! for messages that arrive before any destination exists for their module.
//!
//! The registry is an explicit handle rather than a hidden global: create
//! one near `main`, share it (`Arc` if needed), and it tears itself down on
//! drop after draining everything still queued.

use crate::config::Config;
use crate::fmt::DisplayOptions;
use crate::level::{FileHandling, FileTag, Level, Mode};
use crate::record::Record;
use crate::rotate;
use crate::writer::{DEFAULT_MAX_FILE_SIZE, Writer};
use chrono::Local;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Per-module cap on the pre-registration buffer; the 101st message for a
/// module with no destination is dropped, not queued.
pub const QUEUE_LIMIT: usize = 100;

/// One destination to register: a file plus the module(s) routed into it.
///
/// Unset options fall back to the registry's defaults at registration time,
/// so a bare `Destination::new("net.log").module("net")` is enough.
#[derive(Debug, Clone, Default)]
pub struct Destination {
    file: String,
    modules: Vec<String>,
    level: Option<Level>,
    folder: Option<PathBuf>,
    mode: Option<Mode>,
    tag: Option<FileTag>,
    handling: Option<FileHandling>,
    display: Option<DisplayOptions>,
    quiet: bool,
}

impl Destination {
    /// An empty file name falls back to the registry default, and failing
    /// that to the date-named `yyyy-MM-dd.log`.
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Adds one module routed into this destination.
    #[must_use]
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.modules.push(module.into());
        self
    }

    /// Adds several modules sharing this destination (one writer, one file).
    #[must_use]
    pub fn modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules.extend(modules.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Parent of the destination's `logs/` directory.
    #[must_use]
    pub fn folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.folder = Some(folder.into());
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub const fn tag(mut self, tag: FileTag) -> Self {
        self.tag = Some(tag);
        self
    }

    #[must_use]
    pub const fn handling(mut self, handling: FileHandling) -> Self {
        self.handling = Some(handling);
        self
    }

    #[must_use]
    pub const fn display(mut self, display: DisplayOptions) -> Self {
        self.display = Some(display);
        self
    }

    /// Suppresses the synthetic "Adding destination!" message.
    #[must_use]
    pub const fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }
}

/// Defaults applied to destinations registered without explicit options.
#[derive(Debug, Clone)]
struct Defaults {
    file: String,
    folder: PathBuf,
    level: Level,
    mode: Mode,
    tag: FileTag,
    handling: FileHandling,
    max_size: u64,
    display: DisplayOptions,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            file: String::new(),
            folder: PathBuf::from("."),
            level: Level::Warning,
            mode: Mode::OnlyFile,
            tag: FileTag::DateTime,
            handling: FileHandling::Split,
            max_size: DEFAULT_MAX_FILE_SIZE,
            display: DisplayOptions::default(),
        }
    }
}

struct Inner {
    /// At most one writer per module for its lifetime; several modules may
    /// share one writer.
    writers: HashMap<String, Arc<Writer>>,
    /// Messages submitted before their module had a destination, in
    /// submission order, capped at [`QUEUE_LIMIT`] each.
    pending: HashMap<String, Vec<Record>>,
    paused: bool,
    closed: bool,
    defaults: Defaults,
}

/// Routes submitted messages to writers and replays messages that were
/// buffered before their writer existed.
pub struct Registry {
    inner: Mutex<Inner>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(Defaults::default())
    }

    /// Builds a registry whose destination defaults come from a loaded
    /// config file instead of the built-ins.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_defaults(Defaults {
            file: config.file.name.clone(),
            folder: config.resolve_folder(),
            level: config.parse_level(),
            mode: config.parse_mode(),
            tag: config.parse_tag(),
            handling: config.parse_handling(),
            max_size: config.parse_max_size(),
            display: config.display_options(),
        })
    }

    fn with_defaults(defaults: Defaults) -> Self {
        Self {
            inner: Mutex::new(Inner {
                writers: HashMap::new(),
                pending: HashMap::new(),
                paused: false,
                closed: false,
                defaults,
            }),
        }
    }

    /// Registers a destination for the given module(s).
    ///
    /// Creates one writer shared by every module in the list that is not
    /// already bound; bound modules are skipped, not an error. Returns
    /// whether at least one new binding was created. Messages buffered for
    /// the newly bound modules are replayed immediately, re-filtered by the
    /// new writer's threshold. The welcome message is emitted after the
    /// registry lock is released, so registration never re-enters the
    /// submission path.
    pub fn add_destination(&self, dest: Destination) -> bool {
        let (writer, welcome_module, start_now) = {
            let mut inner = self.lock();
            if inner.closed {
                return false;
            }

            let unbound: Vec<String> = dest
                .modules
                .iter()
                .filter(|m| !inner.writers.contains_key(*m))
                .cloned()
                .collect();
            if unbound.is_empty() {
                return false;
            }

            let d = &inner.defaults;
            let level = dest.level.unwrap_or(d.level);
            let mode = dest.mode.unwrap_or(d.mode);
            let tag = dest.tag.unwrap_or(d.tag);
            let handling = dest.handling.unwrap_or(d.handling);
            let display = dest.display.unwrap_or(d.display);
            let max_size = d.max_size;
            let folder = dest.folder.clone().unwrap_or_else(|| d.folder.clone());

            let mut file = dest.file.clone();
            if file.is_empty() {
                file.clone_from(&d.file);
            }
            if file.is_empty() {
                file = Local::now().format("%Y-%m-%d.log").to_string();
            }

            let mut path = folder.join("logs").join(file);
            if handling == FileHandling::SingleTagged {
                path = rotate::tagged_initial(&path, tag, Local::now());
            }

            let writer = Arc::new(
                Writer::new(path, level, mode)
                    .tag(tag)
                    .handling(handling)
                    .display(display)
                    .max_file_size(max_size),
            );
            writer.stop(inner.paused);

            for module in &unbound {
                inner
                    .writers
                    .insert(module.clone(), Arc::clone(&writer));
            }
            for module in &unbound {
                Self::drain_pending(&mut inner, module);
            }

            let start_now = !inner.paused && mode != Mode::Disabled;
            (writer, unbound[0].clone(), start_now)
        };

        if !dest.quiet {
            writer.enqueue(&Record::stamp(
                &welcome_module,
                Level::Info,
                "Adding destination!",
                None,
                None,
                None,
            ));
        }
        if start_now {
            writer.start();
        }

        true
    }

    /// Core submission path: stamps timestamp and thread id, then routes.
    ///
    /// With a live writer that accepts the level, buffered messages for the
    /// module are delivered first so file order matches submission order.
    /// With no writer, the message is parked (up to [`QUEUE_LIMIT`] per
    /// module); past the cap it is silently dropped, since logging overflow
    /// must never disturb the caller.
    pub fn log_at(
        &self,
        module: &str,
        level: Level,
        message: &str,
        function: Option<&str>,
        file: Option<&str>,
        line: Option<u32>,
    ) {
        let record = Record::stamp(module, level, message, function, file, line);

        let mut inner = self.lock();
        if inner.closed {
            return;
        }

        if let Some(writer) = inner.writers.get(module).map(Arc::clone) {
            // A stopped writer still accepts: its queue retains messages
            // until resume, only the background drain is parked.
            if writer.mode() != Mode::Disabled && writer.threshold() <= level {
                Self::drain_pending(&mut inner, module);
                writer.enqueue(&record);
            }
        } else {
            let queued = inner.pending.entry(module.to_string()).or_default();
            if queued.len() < QUEUE_LIMIT {
                queued.push(record);
            }
        }
    }

    /// Level-agnostic entry point without source coordinates.
    pub fn log(&self, module: &str, level: Level, message: &str) {
        self.log_at(module, level, message, None, None, None);
    }

    pub fn trace(&self, module: &str, message: &str) {
        self.log(module, Level::Trace, message);
    }

    pub fn debug(&self, module: &str, message: &str) {
        self.log(module, Level::Debug, message);
    }

    pub fn info(&self, module: &str, message: &str) {
        self.log(module, Level::Info, message);
    }

    pub fn warning(&self, module: &str, message: &str) {
        self.log(module, Level::Warning, message);
    }

    pub fn error(&self, module: &str, message: &str) {
        self.log(module, Level::Error, message);
    }

    pub fn fatal(&self, module: &str, message: &str) {
        self.log(module, Level::Fatal, message);
    }

    /// Pauses every writer: messages keep queueing, background drains stop.
    pub fn pause(&self) {
        let mut inner = self.lock();
        inner.paused = true;
        for writer in inner.writers.values() {
            writer.stop(true);
        }
    }

    /// Resumes every writer; messages retained while paused are written
    /// immediately, in order.
    pub fn resume(&self) {
        let mut inner = self.lock();
        inner.paused = false;
        for writer in inner.writers.values() {
            writer.stop(false);
        }
    }

    /// New default level, pushed onto every registered writer.
    pub fn overwrite_level(&self, level: Level) {
        let mut inner = self.lock();
        inner.defaults.level = level;
        for writer in inner.writers.values() {
            writer.set_level(level);
        }
    }

    /// New default mode, pushed onto every registered writer.
    pub fn overwrite_mode(&self, mode: Mode) {
        let mut inner = self.lock();
        inner.defaults.mode = mode;
        for writer in inner.writers.values() {
            writer.set_mode(mode);
        }
    }

    /// New default rotation threshold, pushed onto every registered writer.
    pub fn overwrite_max_file_size(&self, bytes: u64) {
        let mut inner = self.lock();
        inner.defaults.max_size = bytes;
        for writer in inner.writers.values() {
            writer.set_max_file_size(bytes);
        }
    }

    /// Changes where destinations registered from now on place their files.
    pub fn set_default_folder(&self, folder: impl Into<PathBuf>) {
        self.lock().defaults.folder = folder.into();
    }

    /// Blocks until every writer's queue is on disk. Paused writers are
    /// skipped; their queues drain on resume.
    pub fn flush(&self) {
        let writers = self.distinct_writers();
        for writer in writers {
            writer.flush();
        }
    }

    /// Tears the registry down: force-drains every module's buffered
    /// messages through its writer (threshold still applies), then closes
    /// every writer, blocking until their final batches are flushed. Runs
    /// at most once; later submissions are dropped.
    pub fn shutdown(&self) {
        let writers = {
            let mut inner = self.lock();
            if inner.closed {
                return;
            }
            inner.closed = true;

            let modules: Vec<String> = inner.writers.keys().cloned().collect();
            for module in &modules {
                Self::drain_pending(&mut inner, module);
            }
            inner.pending.clear();
            std::mem::take(&mut inner.writers)
        };

        // Modules may share a writer; close each one exactly once.
        let mut seen: Vec<Arc<Writer>> = Vec::new();
        for writer in writers.into_values() {
            if !seen.iter().any(|w| Arc::ptr_eq(w, &writer)) {
                seen.push(writer);
            }
        }
        for writer in &seen {
            writer.close();
        }
    }

    /// Number of modules currently bound to a writer.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.lock().writers.len()
    }

    /// Number of distinct destinations (shared writers counted once).
    #[must_use]
    pub fn destination_count(&self) -> usize {
        self.distinct_writers().len()
    }

    /// Whether a module currently routes to a writer.
    #[must_use]
    pub fn is_bound(&self, module: &str) -> bool {
        self.lock().writers.contains_key(module)
    }

    /// Buffered message count for a module with no destination yet.
    #[must_use]
    pub fn pending_len(&self, module: &str) -> usize {
        self.lock().pending.get(module).map_or(0, Vec::len)
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    /// Delivers a module's buffered messages to its writer, oldest first,
    /// each re-filtered by the writer's current threshold. Delivery and
    /// buffering are mutually exclusive: the entry is removed before any
    /// message is enqueued, all under the registry lock.
    fn drain_pending(inner: &mut Inner, module: &str) {
        let Some(writer) = inner.writers.get(module).map(Arc::clone) else {
            return;
        };
        let Some(queued) = inner.pending.remove(module) else {
            return;
        };
        let threshold = writer.threshold();
        for record in queued {
            if threshold <= record.level {
                writer.enqueue(&record);
            }
        }
    }

    fn distinct_writers(&self) -> Vec<Arc<Writer>> {
        let inner = self.lock();
        let mut seen: Vec<Arc<Writer>> = Vec::new();
        for writer in inner.writers.values() {
            if !seen.iter().any(|w| Arc::ptr_eq(w, writer)) {
                seen.push(Arc::clone(writer));
            }
        }
        seen
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Registry {
    /// Teardown happens exactly once; an explicit [`Registry::shutdown`]
    /// beforehand makes this a no-op.
    fn drop(&mut self) {
        self.shutdown();
    }
}
