use std::path::Path;

use crate::cli::context::CLIContext;
use crate::migrate;
use crate::model::*;
use crate::ops::*;
use crate::queries::*;
use crate::validation;

pub fn list(ctx: &mut CLIContext) {
    let page = ctx.view.render(ctx.roster.participants());

    println!();
    if ctx.view.search().is_empty() {
        println!("Roster: {} rows", page.matched);
    } else {
        println!("Search '{}': {} matching", ctx.view.search(), page.matched);
    }

    if page.rows.is_empty() {
        println!("  (no rows)");
    } else {
        println!("  {:>4}  {:<24} {:<18} {}", "#", "Name", "WhatsApp", "Weeks 1-5");
        for (row, p) in &page.rows {
            println!(
                "  {:>4}  {:<24} {:<18} {} {}/{}",
                row,
                truncate(&p.name, 24),
                truncate(&p.whatsapp, 18),
                CLIContext::week_boxes(p),
                p.paid_count(),
                WEEK_COUNT
            );
        }
    }
    println!("Page {} of {}", page.page, page.page_count);
    println!();
}

pub fn search(ctx: &mut CLIContext, args: &str) {
    ctx.view.set_search(args);
    list(ctx);
}

pub fn next_page(ctx: &mut CLIContext) {
    ctx.view.next_page(ctx.roster.participants());
    list(ctx);
}

pub fn prev_page(ctx: &mut CLIContext) {
    ctx.view.prev_page();
    list(ctx);
}

pub fn goto_page(ctx: &mut CLIContext, args: &str) {
    match args.trim().parse::<usize>() {
        Ok(n) if n > 0 => {
            ctx.view.set_page(n);
            list(ctx);
        }
        _ => println!("Usage: page <number>"),
    }
}

pub fn add(ctx: &mut CLIContext, args: &str) {
    let id = participant_ops::add_participant(&mut ctx.roster);
    let name = args.trim();
    if !name.is_empty() {
        participant_ops::update_field(&mut ctx.roster, &id, ParticipantField::Name, name);
    }

    ctx.view.jump_to_last(ctx.roster.participants());
    println!("Added a new row (page {}).", ctx.view.current_page());
    list(ctx);
}

pub fn edit_field(ctx: &mut CLIContext, field: ParticipantField, args: &str) {
    let (row, value) = split_first(args);
    if row.is_empty() {
        println!("Usage: {} <row> <text>", field.label());
        return;
    }

    let person = match ctx.find_row(row) {
        Some(p) => p,
        None => return,
    };

    if participant_ops::update_field(&mut ctx.roster, &person.id, field, value) {
        if value.is_empty() {
            println!("Cleared {} for row {}.", field.label(), row);
        } else {
            println!("Set {} for row {} to '{}'.", field.label(), row, value);
        }
    }
}

pub fn set_weeks(ctx: &mut CLIContext, args: &str, paid: bool) {
    let verb = if paid { "pay" } else { "unpay" };
    let (row, weeks) = split_first(args);
    if row.is_empty() || weeks.is_empty() {
        println!("Usage: {} <row> <week> [week...]", verb);
        return;
    }

    let indices = match weeks
        .split_whitespace()
        .map(validation::week_number)
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(w) => w,
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    let person = match ctx.find_row(row) {
        Some(p) => p,
        None => return,
    };

    for index in indices {
        if let Err(e) = participant_ops::toggle_week(&mut ctx.roster, &person.id, index, paid) {
            ctx.print_error(&e);
            return;
        }
    }

    if let Some(updated) = ctx.roster.find(&person.id) {
        println!(
            "{}: {} {}/{}",
            CLIContext::label(updated),
            CLIContext::week_boxes(updated),
            updated.paid_count(),
            WEEK_COUNT
        );
    }
}

pub fn show(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: show <row>");
        return;
    }
    let person = match ctx.find_row(args) {
        Some(p) => p,
        None => return,
    };

    println!();
    println!("Name: {}", if person.name.is_empty() { "(none)" } else { person.name.as_str() });
    println!("WhatsApp: {}", if person.whatsapp.is_empty() { "(none)" } else { person.whatsapp.as_str() });
    for (i, paid) in person.weeks.iter().enumerate() {
        println!("  Week {}: {}", i + 1, if *paid { "paid" } else { "pending" });
    }
    println!("Paid {} of {}", person.paid_count(), WEEK_COUNT);
    println!();
}

pub fn delete(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: delete <row>");
        return;
    }
    let person = match ctx.find_row(args) {
        Some(p) => p,
        None => return,
    };

    if !ctx.confirm(&format!("Delete {}?", CLIContext::label(&person))) {
        println!("Cancelled.");
        return;
    }

    if participant_ops::delete_participant(&mut ctx.roster, &person.id) {
        println!("Deleted {}.", CLIContext::label(&person));
    }
}

pub fn clear_empty(ctx: &mut CLIContext) {
    let empty = ctx.roster.participants().iter().filter(|p| !p.is_active()).count();
    if empty == 0 {
        println!("No empty rows to clear.");
        return;
    }

    if !ctx.confirm(&format!("Remove {} empty row(s)?", empty)) {
        println!("Cancelled.");
        return;
    }

    let removed = participant_ops::clear_empty(&mut ctx.roster);
    println!("Removed {} empty row(s).", removed);
}

pub fn print_stats(ctx: &mut CLIContext) {
    let s = stats_queries::roster_stats(ctx.roster.participants());
    println!();
    println!("Rows: {} ({} active)", s.total_rows, s.active);
    println!(
        "Paid: {} of {} week slots ({}%)",
        s.paid_slots,
        s.active * WEEK_COUNT,
        s.paid_percent
    );
    println!();
}

pub fn export(ctx: &mut CLIContext, args: &str) {
    let path = match validation::non_blank(args, "path") {
        Ok(p) => p,
        Err(_) => {
            println!("Usage: export <path.json>");
            return;
        }
    };

    match migrate::export_json(Path::new(&path), ctx.roster.participants()) {
        Ok(()) => println!("Exported {} rows to {}.", ctx.roster.len(), path),
        Err(e) => ctx.print_error(&e),
    }
}

/// Splits "<first> <rest>" on the first run of whitespace.
pub fn split_first(args: &str) -> (&str, &str) {
    let args = args.trim();
    match args.find(char::is_whitespace) {
        Some(pos) => (&args[..pos], args[pos..].trim()),
        None => (args, ""),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('~');
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_first_separates_row_from_text() {
        assert_eq!(split_first("3 Ana Maria"), ("3", "Ana Maria"));
        assert_eq!(split_first("  7  "), ("7", ""));
        assert_eq!(split_first(""), ("", ""));
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd~");
    }
}
