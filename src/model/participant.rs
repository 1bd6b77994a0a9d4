use serde::{Deserialize, Serialize};

use super::ids::ParticipantId;

/// Number of payment weeks in one dues cycle.
pub const WEEK_COUNT: usize = 5;

/// The editable text fields of a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantField {
    Name,
    Whatsapp,
}

impl ParticipantField {
    pub fn label(self) -> &'static str {
        match self {
            ParticipantField::Name => "name",
            ParticipantField::Whatsapp => "whatsapp",
        }
    }
}

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub whatsapp: String,
    pub weeks: [bool; WEEK_COUNT],
}

impl Participant {
    pub fn blank() -> Self {
        Self {
            id: ParticipantId::generate(),
            name: String::new(),
            whatsapp: String::new(),
            weeks: [false; WEEK_COUNT],
        }
    }

    pub fn create(name: String, whatsapp: String) -> Self {
        let mut p = Self::blank();
        p.name = name;
        p.whatsapp = whatsapp;
        p
    }

    /// A participant counts toward stats and AI analysis once either
    /// text field holds something other than whitespace.
    pub fn is_active(&self) -> bool {
        !self.name.trim().is_empty() || !self.whatsapp.trim().is_empty()
    }

    pub fn paid_count(&self) -> usize {
        self.weeks.iter().filter(|paid| **paid).count()
    }

    pub fn missed_count(&self) -> usize {
        WEEK_COUNT - self.paid_count()
    }

    /// 1-indexed week numbers that have not been paid.
    pub fn unpaid_weeks(&self) -> Vec<usize> {
        self.weeks
            .iter()
            .enumerate()
            .filter(|(_, paid)| !**paid)
            .map(|(i, _)| i + 1)
            .collect()
    }
}
