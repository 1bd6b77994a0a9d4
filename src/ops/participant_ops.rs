use tracing::{debug, warn};

use crate::error::DuesResult;
use crate::model::{Participant, ParticipantField, ParticipantId, Roster};
use crate::validation;

pub fn add_participant(roster: &mut Roster) -> ParticipantId {
    let participant = Participant::blank();
    let id = participant.id.clone();

    let mut next = roster.snapshot();
    next.push(participant);
    roster.replace(next);

    debug!(%id, "added participant");
    id
}

/// Replaces a text field. Returns false (and leaves the roster alone) when
/// no participant has `id`.
pub fn update_field(
    roster: &mut Roster,
    id: &ParticipantId,
    field: ParticipantField,
    value: &str,
) -> bool {
    let Some(pos) = position(roster, id) else {
        warn!(%id, field = field.label(), "update for unknown participant ignored");
        return false;
    };

    let mut next = roster.snapshot();
    match field {
        ParticipantField::Name => next[pos].name = value.to_string(),
        ParticipantField::Whatsapp => next[pos].whatsapp = value.to_string(),
    }
    roster.replace(next);
    true
}

/// Sets one week flag. An out-of-range `week_index` is rejected before the
/// roster is touched.
pub fn toggle_week(
    roster: &mut Roster,
    id: &ParticipantId,
    week_index: usize,
    value: bool,
) -> DuesResult<bool> {
    let week = validation::week_index(week_index)?;

    let Some(pos) = position(roster, id) else {
        warn!(%id, week, "week toggle for unknown participant ignored");
        return Ok(false);
    };

    let mut next = roster.snapshot();
    next[pos].weeks[week] = value;
    roster.replace(next);
    Ok(true)
}

pub fn delete_participant(roster: &mut Roster, id: &ParticipantId) -> bool {
    if position(roster, id).is_none() {
        warn!(%id, "delete for unknown participant ignored");
        return false;
    }

    let next: Vec<Participant> = roster
        .participants()
        .iter()
        .filter(|p| &p.id != id)
        .cloned()
        .collect();
    roster.replace(next);
    debug!(%id, "deleted participant");
    true
}

/// Removes every inactive participant and returns how many went.
pub fn clear_empty(roster: &mut Roster) -> usize {
    let next: Vec<Participant> = roster
        .participants()
        .iter()
        .filter(|p| p.is_active())
        .cloned()
        .collect();
    let removed = roster.len() - next.len();

    if removed > 0 {
        roster.replace(next);
    }
    debug!(removed, "cleared empty rows");
    removed
}

fn position(roster: &Roster, id: &ParticipantId) -> Option<usize> {
    roster.participants().iter().position(|p| &p.id == id)
}
