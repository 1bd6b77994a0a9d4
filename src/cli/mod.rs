pub mod advisory_commands;
pub mod context;
pub mod roster_commands;

use tracing::{error, info};

use crate::config::Args;
use crate::db::autosave::{Autosaver, SAVE_DELAY};
use crate::db::kv_store::SqliteKvStore;
use crate::db::roster_repo;
use crate::model::ParticipantField;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(args: &Args) {
    println!("Weekly Dues Tracker");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let store = match SqliteKvStore::open(&args.db_path) {
        Ok(s) => s,
        Err(e) => {
            error!(path = %args.db_path.display(), error = %e, "could not open database");
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    let roster = roster_repo::load_or_seed(&store);
    let client = args.gemini_client();
    if !client.has_credential() {
        println!("No GEMINI_API_KEY set; 'analyze' and 'draft' will report an error.");
    }
    info!(model = client.model(), rows = roster.len(), "roster ready");

    let autosaver = Autosaver::spawn(Box::new(store), SAVE_DELAY);
    let mut ctx = CLIContext::new(roster, Box::new(client), autosaver);

    roster_commands::list(&mut ctx);
    repl_loop(&mut ctx);

    ctx.flush();
    info!("roster saved, exiting");
}

fn repl_loop(ctx: &mut CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Listing
            "list" | "ls" => roster_commands::list(ctx),
            "search" | "find" => roster_commands::search(ctx, args),
            "next" | "n" => roster_commands::next_page(ctx),
            "prev" | "p" => roster_commands::prev_page(ctx),
            "page" => roster_commands::goto_page(ctx, args),
            "show" | "view" => roster_commands::show(ctx, args),

            // Editing
            "add" => roster_commands::add(ctx, args),
            "name" => roster_commands::edit_field(ctx, ParticipantField::Name, args),
            "whatsapp" | "wa" => roster_commands::edit_field(ctx, ParticipantField::Whatsapp, args),
            "pay" => roster_commands::set_weeks(ctx, args, true),
            "unpay" => roster_commands::set_weeks(ctx, args, false),
            "delete" | "rm" => roster_commands::delete(ctx, args),
            "clear-empty" => roster_commands::clear_empty(ctx),

            // AI-assisted
            "analyze" => advisory_commands::analyze(ctx),
            "draft" => advisory_commands::draft(ctx, args),
            "last" => advisory_commands::last(ctx),

            // Other
            "stats" => roster_commands::print_stats(ctx),
            "export" => roster_commands::export(ctx, args),
            "save" => {
                ctx.flush();
                println!("Saved.");
            }

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }

        ctx.sync();
    }
}

/// Split input into command and args.
fn parse_command(input: &str) -> (&str, &str) {
    roster_commands::split_first(input)
}

fn print_help() {
    println!(r#"
COMMANDS:

  Listing:
    list                    Show the current page
    search [term]           Filter by name or WhatsApp (no term clears)
    next / prev             Move between pages
    page <n>                Jump to page n
    show <row>              Show one row in detail

  Editing:
    add [name]              Add a row (jumps to the last page)
    name <row> <text>       Set a row's name
    whatsapp <row> <text>   Set a row's WhatsApp
    pay <row> <week...>     Mark week(s) 1-5 as paid
    unpay <row> <week...>   Mark week(s) 1-5 as pending
    delete <row>            Delete a row (asks first)
    clear-empty             Remove all empty rows (asks first)

  AI-assisted:
    analyze                 Summarize the roster's payment status
    draft <row>             Draft a WhatsApp message for a row
    last                    Show the last analysis and draft

  Other:
    stats                   Show active rows and paid percentage
    export <path>           Write the roster to a JSON file
    save                    Save now instead of waiting
    help                    Show this help
    exit / quit / q         Exit

TIPS:
  - Row numbers refer to the current listing, including any search
  - Changes are saved automatically a second after you stop editing"#);
}
