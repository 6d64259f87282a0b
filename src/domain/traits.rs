// ============================================================
// Layer 3 - Core Traits
// ============================================================
// The application layer loads intents through IntentSource so a
// use case can be driven from a file in production and from an
// in-memory list in tests.

use anyhow::Result;

use crate::domain::intent::IntentRecord;

// ─── IntentSource ─────────────────────────────────────────────────────────────
/// Anything that can produce the labelled intent records.
///
/// Implementations:
///   - IntentsLoader → reads an intents JSON file
///   - Vec<IntentRecord> → already in memory
pub trait IntentSource {
    fn load_intents(&self) -> Result<Vec<IntentRecord>>;
}

impl IntentSource for Vec<IntentRecord> {
    fn load_intents(&self) -> Result<Vec<IntentRecord>> {
        Ok(self.clone())
    }
}
