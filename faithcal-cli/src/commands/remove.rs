use std::time::{Duration, Instant};

use anyhow::Result;
use faithcal_core::store::{DeleteOutcome, RestoreOutcome, StoreNotice};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

use crate::App;

enum Countdown {
    UndoRequested,
    Elapsed { title: String },
}

pub async fn run(app: &App, id: &str) -> Result<()> {
    let (store, mut notices) = app.open_store();

    let grace = match store.delete_event(id).await {
        DeleteOutcome::NotFound => {
            println!("{}", "Event not found".red());
            return Ok(());
        }
        DeleteOutcome::Pending { grace } => grace,
    };

    println!(
        "Removed. Press {} within {} to undo.",
        "Enter".bold(),
        humantime::format_duration(grace)
    );

    // The store's timer is authoritative; this bar is only feedback
    let bar = countdown_bar(grace);
    let started = Instant::now();
    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    let mut undo = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
    });

    let outcome = loop {
        tokio::select! {
            _ = ticker.tick() => {
                let elapsed = started.elapsed();
                bar.set_position((elapsed.as_millis() / 100) as u64);
                let remaining = grace.saturating_sub(elapsed);
                bar.set_message(format!("{:.0}s left to undo", remaining.as_secs_f32()));
            }
            _ = &mut undo => break Countdown::UndoRequested,
            notice = notices.recv() => {
                if let Some(StoreNotice::PermanentlyDeleted { title, .. }) = notice {
                    break Countdown::Elapsed { title };
                }
            }
        }
    };

    bar.finish_and_clear();

    match outcome {
        Countdown::UndoRequested => match store.restore_event(id).await {
            RestoreOutcome::Restored(event) => {
                println!("{}", format!("Restored: {}", event.title).green());
                Ok(())
            }
            RestoreOutcome::Expired => {
                // The timer won the race against the keypress
                println!("{}", "Cannot restore - the undo window expired".red());
                Ok(())
            }
        },
        Countdown::Elapsed { title } => {
            println!("{}", format!("Permanently deleted: {}", title).dimmed());
            // The stdin read is still blocked; exit instead of waiting for
            // a keypress the user no longer needs to make
            std::process::exit(0);
        }
    }
}

fn countdown_bar(grace: Duration) -> ProgressBar {
    let ticks = ((grace.as_millis() / 100) as u64).max(1);
    let bar = ProgressBar::new(ticks);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("  {bar:30.yellow} {msg}")
            .unwrap(),
    );
    bar
}
