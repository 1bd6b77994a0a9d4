pub mod ids;
pub mod participant;
pub mod roster;

// Re-exports for convenience
pub use ids::ParticipantId;
pub use participant::{Participant, ParticipantField, WEEK_COUNT};
pub use roster::{Roster, SEED_ROWS};
