use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Toaster {
    duration: Duration,
    current: Option<Toast>,
}

impl Toaster {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: None,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) {
        self.current = Some(Toast {
            message: message.into(),
            expires_at: now + self.duration,
        });
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        if self.current.as_ref().is_some_and(|toast| now >= toast.expires_at) {
            self.current = None;
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.current.as_ref().map(|toast| toast.message.as_str())
    }
}
