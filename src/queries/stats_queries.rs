use crate::model::{Participant, WEEK_COUNT};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStats {
    pub total_rows: usize,
    pub active: usize,
    /// Paid week slots across active participants.
    pub paid_slots: usize,
    /// Share of `active * WEEK_COUNT` slots that are paid, rounded half-up. 0 when nobody is active.
    pub paid_percent: u32,
}

pub fn roster_stats(participants: &[Participant]) -> RosterStats {
    let active: Vec<&Participant> = participants.iter().filter(|p| p.is_active()).collect();
    let paid_slots: usize = active.iter().map(|p| p.paid_count()).sum();
    let total_slots = active.len() * WEEK_COUNT;

    let paid_percent = if total_slots == 0 {
        0
    } else {
        ((paid_slots * 200 + total_slots) / (total_slots * 2)) as u32
    };

    RosterStats {
        total_rows: participants.len(),
        active: active.len(),
        paid_slots,
        paid_percent,
    }
}
