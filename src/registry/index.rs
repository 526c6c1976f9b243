use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::registry::model::Command;

/// Name → [`Command`] mapping built in one pass over the registry document
/// and read-only afterwards; safe to share across any number of consumers.
///
/// If the registry declares the same command name twice, the later
/// declaration wins (overwrite on insert). That mirrors the registry's
/// observed semantics; see DESIGN.md for why the behavior is preserved
/// rather than rejected.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CommandIndex {
    commands: BTreeMap<String, Command>,
}

impl CommandIndex {
    pub(crate) fn insert(&mut self, command: Command) {
        if let Some(previous) = self.commands.insert(command.name.clone(), command) {
            debug!("duplicate command declaration, keeping the later one: {}", previous.name);
        }
    }

    /// Exact-match lookup; an absent name is not an error.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// All registered command names, lexicographically sorted, no duplicates.
    pub fn list_names(&self) -> Vec<&str> {
        self.commands.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
