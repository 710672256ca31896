//! Per-operation logging.
//!
//! A session optionally carries an [`OperationLog`] and hands it one line per
//! call (`ftpwrap: cd /home/user`, `ftpwrap: put a.txt as b.txt`, ...) before
//! delegating to the transport.  [`LogSink`] routes those lines into the
//! `log` facade; any `Fn(&str)` closure works as a sink too.

use std::sync::Arc;

pub trait OperationLog: Send + Sync {
    fn info(&self, line: &str);
}

/// Shared handle stored by sessions.
pub type SharedLog = Arc<dyn OperationLog>;

impl<F> OperationLog for F
where
    F: Fn(&str) + Send + Sync,
{
    fn info(&self, line: &str) {
        self(line)
    }
}

/// Forwards operation lines to `log::info!` under a fixed target.
#[derive(Debug, Clone)]
pub struct LogSink {
    target: String,
}

impl LogSink {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    pub fn shared(self) -> SharedLog {
        Arc::new(self)
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(crate::LOG_PREFIX)
    }
}

impl OperationLog for LogSink {
    fn info(&self, line: &str) {
        log::info!(target: self.target.as_str(), "{}", line);
    }
}

/// Emit `ftpwrap: <message>` to `sink` when one is configured.
pub fn emit(sink: Option<&SharedLog>, message: std::fmt::Arguments<'_>) {
    if let Some(sink) = sink {
        sink.info(&format!("{}: {}", crate::LOG_PREFIX, message));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn closures_are_sinks() {
        let lines = Arc::new(Mutex::new(Vec::<String>::new()));
        let captured = Arc::clone(&lines);
        let sink: SharedLog = Arc::new(move |line: &str| {
            captured.lock().unwrap().push(line.to_string());
        });

        emit(Some(&sink), format_args!("cd {}", "/tmp"));
        emit(None, format_args!("ignored"));

        assert_eq!(*lines.lock().unwrap(), vec!["ftpwrap: cd /tmp".to_string()]);
    }

    #[test]
    fn log_sink_accepts_lines_without_a_logger() {
        LogSink::default().shared().info("ftpwrap: ls .");
    }
}
