use tracing::{debug, info, warn};

use crate::db::kv_store::KvStore;
use crate::error::DuesResult;
use crate::migrate;
use crate::model::{Participant, Roster};

/// Slot the roster is stored under.
pub const ROSTER_KEY: &str = "weekly-dues.roster.v1";

/// Loads the stored roster, normalizing its shape. Anything unreadable is
/// logged and replaced with a freshly seeded blank roster.
pub fn load_or_seed(store: &dyn KvStore) -> Roster {
    let raw = match store.get(ROSTER_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("no stored roster, seeding blank rows");
            return Roster::seeded();
        }
        Err(e) => {
            warn!(error = %e, "could not read stored roster, seeding blank rows");
            return Roster::seeded();
        }
    };

    match migrate::normalize_roster(&raw) {
        Ok(participants) => {
            info!(count = participants.len(), "loaded roster");
            Roster::new(participants)
        }
        Err(e) => {
            warn!(error = %e, "stored roster is corrupt, seeding blank rows");
            Roster::seeded()
        }
    }
}

pub fn save(store: &dyn KvStore, participants: &[Participant]) -> DuesResult<()> {
    let json = serde_json::to_string(participants)?;
    store.set(ROSTER_KEY, &json)?;
    debug!(count = participants.len(), bytes = json.len(), "saved roster");
    Ok(())
}
