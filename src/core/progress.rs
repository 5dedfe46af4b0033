//! Step-based progress reporting
//!
//! A [`ProgressReporter`] counts steps against a total that grows as work is
//! discovered, indents messages for nested work, and broadcasts every step to
//! its subscribers. It is a single-producer object: the conversion owns it
//! mutably while any number of observers read events from their receivers.

use crate::domain::{ConverterError, Result};
use tokio::sync::mpsc;

/// Event broadcast to progress subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A step was reported
    Step {
        current: usize,
        total: usize,
        message: String,
    },
    /// All work is done
    Finished { message: String },
}

/// Two-level step counter with indentation and subscribers
#[derive(Debug, Default)]
pub struct ProgressReporter {
    current: usize,
    total: usize,
    indent: usize,
    subscribers: Vec<mpsc::UnboundedSender<ProgressEvent>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new observer
    ///
    /// Dropping the receiver unsubscribes it on the next emitted event.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ProgressEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Announces `steps` more steps of work
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::InvalidArgument`] if the total would overflow.
    pub fn increase_total(&mut self, steps: usize) -> Result<()> {
        self.total = self.total.checked_add(steps).ok_or_else(|| {
            ConverterError::InvalidArgument(format!(
                "cannot add {steps} steps to a total of {}",
                self.total
            ))
        })?;
        Ok(())
    }

    /// Reports one completed step
    ///
    /// # Errors
    ///
    /// - [`ConverterError::ProgressNotInitialized`] if no total was announced
    /// - [`ConverterError::ProgressOverrun`] if this step exceeds the total;
    ///   the counter is left unchanged
    pub fn report_step(&mut self, message: impl AsRef<str>) -> Result<()> {
        if self.total == 0 {
            return Err(ConverterError::ProgressNotInitialized);
        }
        let next = self.current + 1;
        if next > self.total {
            return Err(ConverterError::ProgressOverrun {
                current: next,
                total: self.total,
            });
        }
        self.current = next;

        let message = format!("{}{}", "  ".repeat(self.indent), message.as_ref());
        tracing::info!(current = self.current, total = self.total, "{}", message.trim_start());
        self.emit(ProgressEvent::Step {
            current: self.current,
            total: self.total,
            message,
        });
        Ok(())
    }

    /// Indents subsequently reported messages one level deeper
    pub fn push_indent(&mut self) {
        self.indent += 1;
    }

    /// Removes one indentation level
    pub fn pop_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
    }

    /// Zeroes both counters
    pub fn reset(&mut self) {
        self.current = 0;
        self.total = 0;
    }

    /// Marks all work as done
    ///
    /// Jumps the counter to the total with one final step event if it has not
    /// reached it, then always emits [`ProgressEvent::Finished`].
    pub fn complete(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.current < self.total {
            self.current = self.total;
            self.emit(ProgressEvent::Step {
                current: self.current,
                total: self.total,
                message: message.clone(),
            });
        }
        tracing::info!(total = self.total, "{}", message);
        self.emit(ProgressEvent::Finished { message });
    }

    fn emit(&mut self, event: ProgressEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
