pub mod add;
pub mod events;
pub mod log;
pub mod remove;
pub mod traditions;

use std::collections::HashSet;

use faithcal_core::event::Tradition;
use faithcal_core::storage::{SELECTED_TRADITIONS_KEY, Storage};
// `log` alone would resolve to the sibling command module above
use ::log::warn;

/// The persisted tradition filter. Unknown names are skipped with a warning
/// so a stale or hand-edited file never blocks a command.
pub(crate) fn saved_selection(storage: &Storage) -> HashSet<Tradition> {
    storage
        .load::<String>(SELECTED_TRADITIONS_KEY)
        .iter()
        .filter_map(|name| match name.parse::<Tradition>() {
            Ok(tradition) => Some(tradition),
            Err(e) => {
                warn!("{e}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_selection_skips_unknown_names() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path());
        storage
            .save(
                SELECTED_TRADITIONS_KEY,
                &["Islam".to_string(), "Jedi".to_string()],
            )
            .unwrap();

        let selected = saved_selection(&storage);
        assert_eq!(selected, HashSet::from([Tradition::Islam]));
    }

    #[test]
    fn saved_selection_is_empty_without_a_stored_filter() {
        let dir = tempfile::tempdir().unwrap();
        assert!(saved_selection(&Storage::open(dir.path())).is_empty());
    }
}
