use super::ids::ParticipantId;
use super::participant::Participant;

/// Number of blank rows a brand-new roster starts with.
pub const SEED_ROWS: usize = 50;

/// The ordered participant list plus a revision counter that every
/// mutation bumps. Order is insertion order and is never re-sorted.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
    revision: u64,
}

impl Roster {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self {
            participants,
            revision: 0,
        }
    }

    pub fn seeded() -> Self {
        Self::new((0..SEED_ROWS).map(|_| Participant::blank()).collect())
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn find(&self, id: &ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn snapshot(&self) -> Vec<Participant> {
        self.participants.clone()
    }

    /// Installs a new sequence wholesale. All mutation goes through here.
    pub(crate) fn replace(&mut self, participants: Vec<Participant>) {
        self.participants = participants;
        self.revision += 1;
    }
}
