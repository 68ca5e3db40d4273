//! Platform collaborators consumed by the session manager.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Answers whether the player may start unlimited rounds per day.
pub trait AccessProvider: Send + Sync {
    fn has_unlimited_plays(&self) -> bool;
}

/// Fixed capability, e.g. read from configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticAccess(pub bool);

impl AccessProvider for StaticAccess {
    fn has_unlimited_plays(&self) -> bool {
        self.0
    }
}

impl AccessProvider for AtomicBool {
    fn has_unlimited_plays(&self) -> bool {
        self.load(Ordering::SeqCst)
    }
}

impl<T: AccessProvider + ?Sized> AccessProvider for Arc<T> {
    fn has_unlimited_plays(&self) -> bool {
        (**self).has_unlimited_plays()
    }
}

/// Clears any pending "new station available" alert when a round starts.
pub trait AlertClearer: Send + Sync {
    fn clear_pending_alert(&self) -> anyhow::Result<()>;
}

/// Clearer for platforms without alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAlerts;

impl AlertClearer for NoAlerts {
    fn clear_pending_alert(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
