use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::db::kv_store::KvStore;
use crate::db::roster_repo::{self, ROSTER_KEY};
use crate::error::{DuesError, DuesResult};
use crate::model::{Participant, ParticipantId, WEEK_COUNT};

/// A participant as it may appear in stored JSON: any field can be
/// missing or null, ids may be numbers, and `weeks` may have any length
/// and hold non-boolean junk.
#[derive(Debug, Deserialize)]
struct StoredParticipant {
    #[serde(default)]
    id: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    whatsapp: Option<String>,
    #[serde(default)]
    weeks: Value,
}

/// Pads with `false` or truncates so exactly `WEEK_COUNT` flags remain.
/// Only a literal `true` counts as paid.
pub fn normalize_weeks(weeks: &[Value]) -> [bool; WEEK_COUNT] {
    let mut fixed = [false; WEEK_COUNT];
    for (slot, paid) in fixed.iter_mut().zip(weeks) {
        *slot = matches!(paid, Value::Bool(true));
    }
    fixed
}

fn is_well_formed(weeks: &[Value]) -> bool {
    weeks.len() == WEEK_COUNT && weeks.iter().all(Value::is_boolean)
}

/// Parses a stored roster and brings every participant to the current
/// shape. Running it over its own serialized output changes nothing.
pub fn normalize_roster(raw: &str) -> DuesResult<Vec<Participant>> {
    let stored: Vec<StoredParticipant> = serde_json::from_str(raw)?;
    let mut seen = HashSet::new();
    let mut reshaped = 0usize;

    let participants = stored
        .into_iter()
        .map(|s| {
            let weeks = match s.weeks {
                Value::Array(items) => items,
                _ => Vec::new(),
            };
            if !is_well_formed(&weeks) {
                reshaped += 1;
            }

            let mut id = stored_id(&s.id);
            if id.is_blank() || seen.contains(&id) {
                let fresh = ParticipantId::generate();
                warn!(stored = %id, assigned = %fresh, "replacing blank or duplicate participant id");
                id = fresh;
            }
            seen.insert(id.clone());

            Participant {
                id,
                name: s.name.unwrap_or_default(),
                whatsapp: s.whatsapp.unwrap_or_default(),
                weeks: normalize_weeks(&weeks),
            }
        })
        .collect::<Vec<_>>();

    if reshaped > 0 {
        info!(reshaped, "normalized week arrays to {} entries", WEEK_COUNT);
    }
    Ok(participants)
}

fn stored_id(value: &Value) -> ParticipantId {
    match value {
        Value::String(s) => ParticipantId::from(s.as_str()),
        Value::Number(n) => ParticipantId::from(n.to_string()),
        _ => ParticipantId::from(""),
    }
}

/// Imports a roster JSON file into the store. Refuses to replace an
/// existing roster unless `force` is set. Returns the participant count.
pub fn import_json(json_path: &Path, store: &dyn KvStore, force: bool) -> DuesResult<usize> {
    let raw = std::fs::read_to_string(json_path)?;
    let participants = normalize_roster(&raw)?;

    if !force && store.get(ROSTER_KEY)?.is_some() {
        return Err(DuesError::AlreadyStored {
            key: ROSTER_KEY.to_string(),
        });
    }

    roster_repo::save(store, &participants)?;
    info!(count = participants.len(), path = %json_path.display(), "imported roster");
    Ok(participants.len())
}

/// Writes the roster in its persisted shape as pretty JSON.
pub fn export_json(json_path: &Path, participants: &[Participant]) -> DuesResult<()> {
    let json = serde_json::to_string_pretty(participants)?;
    std::fs::write(json_path, json)?;
    info!(count = participants.len(), path = %json_path.display(), "exported roster");
    Ok(())
}
