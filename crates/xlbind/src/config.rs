//! Binding configuration

/// Settings applied when the bindings start
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Maximum threads running async work units
    pub worker_threads: usize,
    /// Name given to worker threads
    pub thread_name: String,
    /// Locale set on every new book
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worker_threads: 4,
            thread_name: "xlbind-worker".to_string(),
            locale: "UTF-8".to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker thread limit
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = threads;
        self
    }

    /// Set the worker thread name
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.thread_name = name.into();
        self
    }

    /// Set the locale of new books
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}
