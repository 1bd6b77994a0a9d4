use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::ai::gemini_service::TextGenerator;
use crate::model::{Participant, Roster, WEEK_COUNT};

/// Participants listed individually in an analysis prompt.
pub const ANALYSIS_LIMIT: usize = 50;

pub const NOT_ENOUGH_DATA: &str =
    "Not enough data to analyze yet. Fill in at least one participant's name or WhatsApp first.";
pub const ANALYSIS_ERROR: &str =
    "Could not generate the analysis right now. Check your API key and connection, then try again.";
pub const DRAFT_ERROR: &str =
    "Could not draft the message right now. Check your API key and connection, then try again.";

/// Builds the roster analysis prompt, or None when nobody is active.
pub fn analysis_prompt(participants: &[Participant]) -> Option<String> {
    let active: Vec<&Participant> = participants.iter().filter(|p| p.is_active()).collect();
    if active.is_empty() {
        return None;
    }

    let mut summary: Vec<String> = active
        .iter()
        .take(ANALYSIS_LIMIT)
        .map(|p| {
            format!(
                "- {}: paid {} week(s), missed {} week(s)",
                display_name(p),
                p.paid_count(),
                p.missed_count()
            )
        })
        .collect();
    if active.len() > ANALYSIS_LIMIT {
        summary.push(format!(
            "...and {} more participants not listed.",
            active.len() - ANALYSIS_LIMIT
        ));
    }

    Some(format!(
        r#"You are assisting the organizer of a weekly dues group that collects one payment per week over a {WEEK_COUNT}-week cycle.
There are {count} active participants. Payment status per participant:
{summary}

Write a short report with these sections:
1. Overall health of the collection.
2. Who is most behind and needs follow-up.
3. Two practical suggestions to improve on-time payments.
Keep it under 200 words and use plain text."#,
        count = active.len(),
        summary = summary.join("\n"),
    ))
}

/// Builds the outreach message prompt for one participant.
pub fn draft_prompt(participant: &Participant) -> String {
    let unpaid = participant.unpaid_weeks();
    let name = display_name(participant);

    if unpaid.is_empty() {
        format!(
            r#"Write a short, friendly WhatsApp message to {name}, a member of our weekly dues group.
They have paid all {WEEK_COUNT} weeks of the current cycle. Thank them warmly for being up to date.
Keep it to two or three sentences. Return only the message text."#
        )
    } else {
        let weeks: Vec<String> = unpaid.iter().map(|w| w.to_string()).collect();
        format!(
            r#"Write a short, friendly WhatsApp message to {name}, a member of our weekly dues group.
Payment for week(s) {weeks} of the current {WEEK_COUNT}-week cycle is still pending. Remind them politely and without pressure, and offer help if they have any difficulty.
Keep it to two or three sentences. Return only the message text."#,
            weeks = weeks.join(", ")
        )
    }
}

/// Asks the generator for a roster report. Never fails: problems come back
/// as a fixed message.
pub fn analyze_roster(generator: &dyn TextGenerator, participants: &[Participant]) -> String {
    let Some(prompt) = analysis_prompt(participants) else {
        return NOT_ENOUGH_DATA.to_string();
    };

    match generator.generate(&prompt) {
        Ok(text) => {
            info!(chars = text.len(), "roster analysis generated");
            text
        }
        Err(e) => {
            warn!(error = %e, "roster analysis failed");
            ANALYSIS_ERROR.to_string()
        }
    }
}

/// Asks the generator for an outreach message. Never fails: problems come
/// back as a fixed message.
pub fn draft_message(generator: &dyn TextGenerator, participant: &Participant) -> String {
    match generator.generate(&draft_prompt(participant)) {
        Ok(text) => {
            info!(id = %participant.id, chars = text.len(), "message drafted");
            text
        }
        Err(e) => {
            warn!(id = %participant.id, error = %e, "message draft failed");
            DRAFT_ERROR.to_string()
        }
    }
}

fn display_name(p: &Participant) -> String {
    let name = p.name.trim();
    if name.is_empty() {
        format!("(unnamed, WhatsApp {})", p.whatsapp.trim())
    } else {
        name.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub text: String,
    pub generated_at: DateTime<Local>,
}

#[derive(Debug, Clone)]
pub struct DraftResult {
    /// The participant as it was when the draft was requested.
    pub participant: Participant,
    pub text: String,
    pub generated_at: DateTime<Local>,
}

/// How a stored draft relates to the current roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftFreshness {
    Current,
    Changed,
    Deleted,
}

/// Last advisory results, kept apart from the roster for re-display.
#[derive(Debug, Default)]
pub struct AdvisoryState {
    pub last_analysis: Option<AnalysisResult>,
    pub last_draft: Option<DraftResult>,
}

impl AdvisoryState {
    pub fn record_analysis(&mut self, text: String) {
        self.last_analysis = Some(AnalysisResult {
            text,
            generated_at: Local::now(),
        });
    }

    pub fn record_draft(&mut self, participant: &Participant, text: String) {
        self.last_draft = Some(DraftResult {
            participant: participant.clone(),
            text,
            generated_at: Local::now(),
        });
    }

    pub fn draft_freshness(&self, roster: &Roster) -> Option<DraftFreshness> {
        let draft = self.last_draft.as_ref()?;
        Some(match roster.find(&draft.participant.id) {
            None => DraftFreshness::Deleted,
            Some(current) if current == &draft.participant => DraftFreshness::Current,
            Some(_) => DraftFreshness::Changed,
        })
    }
}
