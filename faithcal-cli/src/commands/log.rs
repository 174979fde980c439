use anyhow::Result;
use dialoguer::Confirm;
use faithcal_core::audit::AuditLog;
use owo_colors::OwoColorize;

use crate::App;
use crate::render::Render;

pub fn run(
    app: &App,
    limit: Option<usize>,
    event: Option<String>,
    clear: bool,
    force: bool,
) -> Result<()> {
    let mut audit = AuditLog::load(app.storage.clone());

    if clear {
        return run_clear(&mut audit, force);
    }

    let entries: Vec<_> = match &event {
        Some(event_id) => audit
            .entries_for_event(event_id)
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .collect(),
        None => audit.entries(limit).iter().collect(),
    };

    if entries.is_empty() {
        println!("{}", "No audit entries".dimmed());
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.render());
    }

    Ok(())
}

fn run_clear(audit: &mut AuditLog, force: bool) -> Result<()> {
    let count = audit.entries(None).len();
    if count == 0 {
        println!("{}", "Audit log is already empty".dimmed());
        return Ok(());
    }

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Clear {} audit {}?",
                count,
                if count == 1 { "entry" } else { "entries" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    audit.clear();
    println!("Cleared {} audit entries.", count);

    Ok(())
}
