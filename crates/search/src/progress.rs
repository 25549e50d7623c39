/// Receives short status messages while a query runs (spinner labels).
pub trait Progress: Send + Sync {
    fn update(&self, message: &str);
}

/// Discards every message
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&self, _message: &str) {}
}
