use anyhow::Result;
use faithcal_core::event::Tradition;
use faithcal_core::storage::SELECTED_TRADITIONS_KEY;
use owo_colors::OwoColorize;

use crate::App;
use crate::commands::saved_selection;

pub fn run(app: &App, names: Vec<String>, none: bool) -> Result<()> {
    if none {
        app.storage
            .save(SELECTED_TRADITIONS_KEY, &Vec::<String>::new())?;
        println!("Tradition filter cleared.");
        return Ok(());
    }

    if !names.is_empty() {
        let parsed = names
            .iter()
            .map(|name| name.parse::<Tradition>())
            .collect::<Result<Vec<_>, _>>()?;

        // Canonical names, first occurrence wins
        let mut stored: Vec<String> = Vec::new();
        for tradition in parsed {
            if !stored.iter().any(|s| s == tradition.name()) {
                stored.push(tradition.name().to_string());
            }
        }

        app.storage.save(SELECTED_TRADITIONS_KEY, &stored)?;
    }

    let selected = saved_selection(&app.storage);

    for tradition in Tradition::ALL {
        if selected.contains(&tradition) {
            println!("  {} {}", "●".green(), tradition);
        } else {
            println!("  {} {}", "○".dimmed(), tradition.dimmed());
        }
    }

    if selected.is_empty() {
        println!(
            "\n{}",
            "No traditions selected. `faithcal events` will only show personal events.".dimmed()
        );
    }

    Ok(())
}
