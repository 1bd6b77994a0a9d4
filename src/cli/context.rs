use std::io::{self, Write};

use crate::ai::advisory::AdvisoryState;
use crate::ai::gemini_service::TextGenerator;
use crate::db::autosave::Autosaver;
use crate::model::*;
use crate::queries::roster_queries::RosterView;
use crate::validation;

pub struct CLIContext {
    pub roster: Roster,
    pub view: RosterView,
    pub advisory: AdvisoryState,
    generator: Box<dyn TextGenerator>,
    autosaver: Autosaver,
    saved_revision: u64,
}

impl CLIContext {
    pub fn new(roster: Roster, generator: Box<dyn TextGenerator>, autosaver: Autosaver) -> Self {
        let saved_revision = roster.revision();
        Self {
            roster,
            view: RosterView::default(),
            advisory: AdvisoryState::default(),
            generator,
            autosaver,
            saved_revision,
        }
    }

    pub fn generator(&self) -> &dyn TextGenerator {
        self.generator.as_ref()
    }

    /// Hands the roster to the autosaver if anything changed since the last hand-off.
    pub fn sync(&mut self) {
        if self.roster.revision() != self.saved_revision {
            self.autosaver.schedule(self.roster.snapshot());
            self.saved_revision = self.roster.revision();
        }
    }

    /// Writes any pending change now.
    pub fn flush(&mut self) {
        self.sync();
        self.autosaver.flush();
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Ask a yes/no question. Anything but "y"/"yes" is a no.
    pub fn confirm(&self, question: &str) -> bool {
        matches!(
            self.prompt(&format!("{} (y/n): ", question)).map(|s| s.to_lowercase()).as_deref(),
            Some("y") | Some("yes")
        )
    }

    /// Resolve a row number from the current listing. Prints why on failure.
    pub fn find_row(&self, args: &str) -> Option<Participant> {
        let row = match validation::row_number(args) {
            Ok(r) => r,
            Err(e) => {
                println!("Error: {}", e);
                return None;
            }
        };

        match self.view.row(self.roster.participants(), row) {
            Some(p) => Some(p.clone()),
            None => {
                println!("No row {} in the current listing. Use 'list' to see row numbers.", row);
                None
            }
        }
    }

    /// Label used when talking about a participant.
    pub fn label(p: &Participant) -> String {
        match (p.name.trim(), p.whatsapp.trim()) {
            ("", "") => "(empty row)".into(),
            ("", w) => w.to_string(),
            (n, _) => n.to_string(),
        }
    }

    pub fn week_boxes(p: &Participant) -> String {
        p.weeks
            .iter()
            .map(|paid| if *paid { "[x]" } else { "[ ]" })
            .collect::<Vec<_>>()
            .join("")
    }

    /// Print an error.
    pub fn print_error(&self, e: &crate::error::DuesError) {
        println!("Error: {}", e);
    }
}
