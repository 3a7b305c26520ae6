//! The delivery seam. Dispatch fan-out only ever sees this trait; the
//! production implementation lives in `azonbot-telegram`.

use async_trait::async_trait;

use crate::error::Result;

/// Sends one rendered message to one recipient. A failure is isolated to
/// that recipient — callers log and continue.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<()>;
}
