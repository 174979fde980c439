use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Input;
use faithcal_core::event::PersonalEvent;
use owo_colors::OwoColorize;
use uuid::Uuid;

use crate::App;

pub async fn run(
    app: &App,
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let interactive = title.is_none() || date.is_none();

    // --- Title ---
    let title = match title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    // --- Date ---
    let date = if let Some(s) = date {
        parse_event_date(&s)?
    } else {
        prompt_with_retry("  When?")?
    };

    // --- Description ---
    let description = if let Some(desc) = description {
        if desc.is_empty() { None } else { Some(desc) }
    } else if interactive {
        let desc: String = Input::new()
            .with_prompt("  Description? (skip)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;
        if desc.is_empty() { None } else { Some(desc) }
    } else {
        None
    };

    let event = PersonalEvent::new(
        format!("personal-{}", Uuid::new_v4()),
        title,
        date,
        description,
    );

    let (store, _notices) = app.open_store();
    store.add_event(event.clone()).await?;

    if interactive {
        println!();
    }
    println!(
        "{}",
        format!(
            "  Added: {} on {}",
            event.title,
            event.date.format("%a %b %-d %Y")
        )
        .green()
    );

    Ok(())
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry(prompt: &str) -> Result<NaiveDate> {
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse_event_date(&input) {
            Ok(date) => return Ok(date),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}

/// Parse a date, accepting YYYY-MM-DD or natural language ("next friday").
fn parse_event_date(input: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d") {
        return Ok(date);
    }

    let expanded = expand_abbreviations(input);
    fuzzydate::parse(&expanded)
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))
}

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    let abbrevs = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let mut result = String::new();
    let lower = input.to_lowercase();

    for (i, word) in lower.split_whitespace().enumerate() {
        if i > 0 {
            result.push(' ');
        }
        let expanded = abbrevs
            .iter()
            .find(|(abbr, _)| *abbr == word)
            .map(|(_, full)| *full)
            .unwrap_or(word);
        result.push_str(expanded);
    }

    result
}
