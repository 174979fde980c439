//! Terminal rendering traits for faithcal types.
//!
//! Extension traits that add colored terminal forms to core types using
//! owo_colors, keeping the core crate free of presentation concerns.

use chrono::Local;
use faithcal_core::audit::{AuditAction, AuditLogEntry};
use owo_colors::OwoColorize;

/// Extension trait for terminal rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for AuditAction {
    fn render(&self) -> String {
        match self {
            AuditAction::Delete => "deleted".yellow().to_string(),
            AuditAction::Restore => "restored".green().to_string(),
            AuditAction::PermanentDelete => "permanently deleted".red().to_string(),
        }
    }
}

impl Render for AuditLogEntry {
    fn render(&self) -> String {
        let when = self
            .timestamp
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S");

        let mut line = format!(
            "{}  {} {} ({})",
            when.to_string().dimmed(),
            self.action.render(),
            self.event_title.bold(),
            self.event_id.dimmed(),
        );

        if let Some(details) = &self.details {
            line.push_str(&format!("\n      {}", details.dimmed()));
        }

        line
    }
}
