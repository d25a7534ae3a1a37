use std::sync::Mutex;
use tracing::info;

/// Surfaces an out-of-range alert to a human operator.
///
/// Evaluation treats this as an opaque side effect. Implementations shared
/// across threads must be `Sync`; the evaluator itself never requires it.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Receives one human-readable status line per classified vital.
pub trait StatusSink {
    fn emit(&self, line: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

impl<A: Notifier, B: Notifier> Notifier for (A, B) {
    fn notify(&self, message: &str) {
        self.0.notify(message);
        self.1.notify(message);
    }
}

/// A disabled notifier drops alerts.
impl<N: Notifier> Notifier for Option<N> {
    fn notify(&self, message: &str) {
        if let Some(inner) = self {
            inner.notify(message);
        }
    }
}

impl<S: StatusSink + ?Sized> StatusSink for &S {
    fn emit(&self, line: &str) {
        (**self).emit(line)
    }
}

/// Prints alerts to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        println!("{}", message);
    }
}

/// Buffers alerts so they can be delivered in one batch later.
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    messages: Mutex<Vec<String>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.messages().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn take(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut guard) => guard.push(message.to_string()),
            Err(poisoned) => poisoned.into_inner().push(message.to_string()),
        }
    }
}

/// Logs status lines through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn emit(&self, line: &str) {
        info!("{}", line);
    }
}

/// Keeps status lines in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    lines: Mutex<Vec<String>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl StatusSink for CollectingSink {
    fn emit(&self, line: &str) {
        match self.lines.lock() {
            Ok(mut guard) => guard.push(line.to_string()),
            Err(poisoned) => poisoned.into_inner().push(line.to_string()),
        }
    }
}
