//! Logger facade
//!
//! `Logger` moves once from uninitialized to initialized and stays there. The
//! engine sits behind a reader/writer lock: `log` calls share the read side,
//! `initialize` takes the write side for its one-time setup. A separate flag
//! answers `is_initialized` without touching the lock.

use crate::engine::{LoggingEngine, SessionInfo};
use crate::mirror::report_to_stderr;
use rollsink_core::{CallSite, ExError, LoggerConfiguration, RollsinkError, Severity};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{OnceLock, PoisonError, RwLock, RwLockReadGuard};

/// Handle to a lazily started logging engine
///
/// # Example
///
/// ```no_run
/// use rollsink_engine::{Logger, LoggerConfiguration, Severity};
///
/// let logger = Logger::new();
/// logger.initialize(Some(LoggerConfiguration::production()))?;
/// logger.log(Severity::Info, None, "Startup", "ready")?;
/// # Ok::<(), rollsink_engine::ExError>(())
/// ```
#[derive(Debug, Default)]
pub struct Logger {
    engine: RwLock<Option<LoggingEngine>>,
    initialized: AtomicBool,
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

impl Logger {
    pub fn new() -> Self {
        Self {
            engine: RwLock::new(None),
            initialized: AtomicBool::new(false),
        }
    }

    /// Process-wide logger used by the free functions and `log_*!` macros
    pub fn global() -> &'static Logger {
        GLOBAL.get_or_init(Logger::new)
    }

    /// Start the engine; defaults apply when `config` is `None`
    ///
    /// # Errors
    ///
    /// `LoggerAlreadyInitialized` if an engine is already running (it is kept),
    /// otherwise whatever engine construction reports.
    pub fn initialize(&self, config: Option<LoggerConfiguration>) -> Result<(), ExError> {
        let mut slot = self.engine.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            let err: ExError = RollsinkError::LoggerAlreadyInitialized.into();
            report_to_stderr("initialize", &err);
            return Err(err);
        }

        let config = config.unwrap_or_default();
        *slot = Some(LoggingEngine::new(&config)?);
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    /// Install an engine built by the caller
    ///
    /// # Errors
    ///
    /// `LoggerAlreadyInitialized` if an engine is already running. The
    /// rejected engine is dropped.
    pub fn install(&self, engine: LoggingEngine) -> Result<(), ExError> {
        let mut slot = self.engine.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(RollsinkError::LoggerAlreadyInitialized.into());
        }
        *slot = Some(engine);
        self.initialized.store(true, Ordering::Release);
        Ok(())
    }

    /// Log one record
    ///
    /// A record the disk refused is still `Ok`; the engine has already
    /// reported it.
    ///
    /// # Errors
    ///
    /// `LoggerNotInitialized` before `initialize`; nothing is written.
    pub fn log(
        &self,
        severity: Severity,
        call_site: Option<CallSite>,
        title: &str,
        message: &str,
    ) -> Result<(), ExError> {
        match self.read_engine().as_ref() {
            Some(engine) => {
                engine.log(severity, call_site, title, message);
                Ok(())
            }
            None => {
                let err: ExError = RollsinkError::LoggerNotInitialized.into();
                report_to_stderr(title, &err);
                Err(err)
            }
        }
    }

    /// Whether an engine is running, without waiting on the lock
    ///
    /// Reports `false` until the first `initialize` has finished.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    pub fn flush(&self) {
        if let Some(engine) = self.read_engine().as_ref() {
            engine.flush();
        }
    }

    /// Id and directory of the running session
    pub fn session(&self) -> Option<SessionInfo> {
        self.read_engine()
            .as_ref()
            .map(|engine| engine.session().clone())
    }

    fn read_engine(&self) -> RwLockReadGuard<'_, Option<LoggingEngine>> {
        self.engine.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Initialize the global logger
///
/// # Errors
///
/// See [`Logger::initialize`].
pub fn initialize(config: Option<LoggerConfiguration>) -> Result<(), ExError> {
    Logger::global().initialize(config)
}

/// Log through the global logger
///
/// # Errors
///
/// See [`Logger::log`].
pub fn log(
    severity: Severity,
    call_site: Option<CallSite>,
    title: &str,
    message: &str,
) -> Result<(), ExError> {
    Logger::global().log(severity, call_site, title, message)
}

pub fn flush() {
    Logger::global().flush();
}

pub fn is_initialized() -> bool {
    Logger::global().is_initialized()
}
