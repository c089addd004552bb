use std::borrow::Cow;

/// Errors that can occur while installing the global subscriber.
#[rally_derive::rally_error]
pub enum LoggerError {
    /// The rolling file appender rejected its settings (e.g., unwritable directory).
    #[error("Rolling file appender error{}: {source}", format_context(.context))]
    Appender { source: tracing_appender::rolling::InitError, context: Option<Cow<'static, str>> },

    /// A global tracing subscriber is already installed in this process.
    #[error("Tracing subscriber error{}: {source}", format_context(.context))]
    Subscriber {
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    /// The log directory could not be created.
    #[error("Log directory error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    /// Invalid settings: empty name, unknown level, malformed filter directive.
    #[error("Invalid logger configuration{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
