use crate::ai::advisory::{self, DraftFreshness};
use crate::cli::context::CLIContext;

pub fn analyze(ctx: &mut CLIContext) {
    println!("Analyzing roster...");
    let text = advisory::analyze_roster(ctx.generator(), ctx.roster.participants());
    print_block(&text);
    ctx.advisory.record_analysis(text);
}

pub fn draft(ctx: &mut CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: draft <row>");
        return;
    }
    let person = match ctx.find_row(args) {
        Some(p) => p,
        None => return,
    };

    println!("Drafting a message for {}...", CLIContext::label(&person));
    let text = advisory::draft_message(ctx.generator(), &person);
    print_block(&text);
    ctx.advisory.record_draft(&person, text);
}

pub fn last(ctx: &mut CLIContext) {
    let freshness = ctx.advisory.draft_freshness(&ctx.roster);

    match &ctx.advisory.last_analysis {
        Some(a) => {
            println!("Last analysis ({}):", a.generated_at.format("%Y-%m-%d %H:%M"));
            print_block(&a.text);
        }
        None => println!("No analysis yet. Use 'analyze'."),
    }

    match &ctx.advisory.last_draft {
        Some(d) => {
            println!(
                "Last draft for {} ({}):",
                CLIContext::label(&d.participant),
                d.generated_at.format("%Y-%m-%d %H:%M")
            );
            match freshness {
                Some(DraftFreshness::Changed) => {
                    println!("  Note: this participant has changed since the draft was made.")
                }
                Some(DraftFreshness::Deleted) => {
                    println!("  Note: this participant has since been deleted.")
                }
                _ => {}
            }
            print_block(&d.text);
        }
        None => println!("No message drafted yet. Use 'draft <row>'."),
    }
}

fn print_block(text: &str) {
    println!("----------------------------------------");
    println!("{}", text.trim());
    println!("----------------------------------------");
}
