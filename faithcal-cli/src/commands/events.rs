use anyhow::Result;
use chrono::{Local, NaiveDate};
use faithcal_core::catalog::Catalog;
use faithcal_core::date_range::DateRange;
use faithcal_core::event::{CalendarEvent, Tradition};
use faithcal_core::query;
use owo_colors::OwoColorize;

use crate::App;
use crate::commands::saved_selection;

pub async fn run(
    app: &App,
    from: Option<String>,
    to: Option<String>,
    traditions: Vec<String>,
) -> Result<()> {
    let today = Local::now().date_naive();
    let range = DateRange::from_args(from.as_deref(), to.as_deref(), today)
        .map_err(|e| anyhow::anyhow!(e))?;

    // Explicit --tradition flags override the saved filter for this run
    let selected = if traditions.is_empty() {
        saved_selection(&app.storage)
    } else {
        traditions
            .iter()
            .map(|name| name.parse::<Tradition>())
            .collect::<Result<_, _>>()?
    };

    let catalog = Catalog::for_years(range.years());
    let (store, _notices) = app.open_store();
    let personal = store.active_events().await;

    let mut events =
        query::events_overlapping_range(range.from, range.to, catalog.events(), &selected, &personal);
    events.sort_by(|a, b| a.start().cmp(&b.start()).then(a.title().cmp(b.title())));

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        if selected.is_empty() && personal.is_empty() {
            println!(
                "{}",
                "Select traditions with `faithcal traditions <names>` or add events with `faithcal add`"
                    .dimmed()
            );
        }
        return Ok(());
    }

    // Group events by start date and print
    let mut current_date: Option<NaiveDate> = None;

    for event in &events {
        if current_date != Some(event.start()) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(event.start(), today).bold());
            current_date = Some(event.start());
        }

        println!("  {}", render_event(event));
    }

    Ok(())
}

/// Format a date as a human-readable label (e.g. "Today", "Wed Feb 25")
fn format_date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

fn render_event(event: &CalendarEvent) -> String {
    match event {
        CalendarEvent::Religious(e) => {
            let tag = format!("[{} · {}]", e.tradition, e.kind);
            let days = query::span_length_days(e);
            if days > 1 {
                let span = format!(
                    "until {} ({} days)",
                    e.span_end().format("%b %-d"),
                    days
                );
                format!("{} {} {}", e.title, span.dimmed(), tag.dimmed())
            } else {
                format!("{} {}", e.title, tag.dimmed())
            }
        }
        CalendarEvent::Personal(e) => {
            let tag = format!("[personal · {}]", e.id);
            format!("{} {}", e.title, tag.dimmed())
        }
    }
}
