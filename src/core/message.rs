// buslog - core/message.rs
//
// The value handed to `Logger::write`: plain text or an error-like value
// carrying a type name, its text and an optional trace.

use serde::Deserialize;
use std::fmt;

/// A message accepted by the logging surface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum LogMessage {
    Text(String),
    Error(ErrorInfo),
}

impl LogMessage {
    /// Returns the error payload, if this message carries one.
    pub fn as_error(&self) -> Option<&ErrorInfo> {
        match self {
            LogMessage::Error(info) => Some(info),
            LogMessage::Text(_) => None,
        }
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogMessage::Text(text) => f.write_str(text),
            LogMessage::Error(info) => write!(f, "{}", info.header()),
        }
    }
}

impl From<&str> for LogMessage {
    fn from(text: &str) -> Self {
        LogMessage::Text(text.to_string())
    }
}

impl From<String> for LogMessage {
    fn from(text: String) -> Self {
        LogMessage::Text(text)
    }
}

impl From<ErrorInfo> for LogMessage {
    fn from(info: ErrorInfo) -> Self {
        LogMessage::Error(info)
    }
}

// =============================================================================
// Error-like payloads
// =============================================================================

/// An error-like value: type name, text and optional trace.
///
/// `stack` follows the convention of runtimes whose traces start with a
/// `"<name>: <message>"` header line. Traces without that header are still
/// accepted; [`ErrorInfo::trace`] adds the header when it is missing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorInfo {
    #[serde(default = "default_error_name")]
    pub name: String,
    pub message: String,
    #[serde(default)]
    pub stack: Option<String>,
}

fn default_error_name() -> String {
    "Error".to_string()
}

impl ErrorInfo {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Build from a Rust error. The name is the type's last path segment and
    /// the trace lists the `source()` chain.
    pub fn from_error<E: std::error::Error>(error: &E) -> Self {
        let full = std::any::type_name::<E>();
        let name = full
            .split('<')
            .next()
            .and_then(|path| path.rsplit("::").next())
            .unwrap_or(full);

        let mut info = Self::new(name, error.to_string());
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(format!("    caused by: {cause}"));
            source = cause.source();
        }
        if !causes.is_empty() {
            info.stack = Some(format!("{}\n{}", info.header(), causes.join("\n")));
        }
        info
    }

    /// `"<name>: <message>"`.
    pub fn header(&self) -> String {
        format!("{}: {}", self.name, self.message)
    }

    /// Header followed by the trace, without duplicating the header when the
    /// trace already starts with it.
    pub fn trace(&self) -> String {
        let header = self.header();
        match self.stack.as_deref() {
            None | Some("") => header,
            Some(stack) if stack.starts_with(&header) => stack.to_string(),
            Some(stack) => format!("{header}\n{stack}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_trace_keeps_existing_header() {
        let info = ErrorInfo::new("TypeError", "boom").with_stack("TypeError: boom\n  at main");
        assert_eq!(info.trace(), "TypeError: boom\n  at main");
    }

    #[test]
    fn test_trace_adds_missing_header() {
        let info = ErrorInfo::new("RangeError", "too big").with_stack("  at check");
        assert_eq!(info.trace(), "RangeError: too big\n  at check");
        assert_eq!(ErrorInfo::new("E", "m").trace(), "E: m");
    }

    #[test]
    fn test_from_io_error() {
        let err = io::Error::new(io::ErrorKind::NotFound, "missing file");
        let info = ErrorInfo::from_error(&err);
        assert_eq!(info.name, "Error");
        assert_eq!(info.message, "missing file");
    }

    #[test]
    fn test_untagged_deserialise() {
        let text: LogMessage = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(text, LogMessage::from("hello"));

        let error: LogMessage =
            serde_json::from_str(r#"{"name":"TypeError","message":"boom"}"#).unwrap();
        assert_eq!(error.as_error().unwrap().header(), "TypeError: boom");
        assert_eq!(error.to_string(), "TypeError: boom");
    }
}
