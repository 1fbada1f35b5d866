//! Build options and the state shared by a datapack and its namespaces.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, PoisonError, RwLock,
};

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

/// Options for writing a compiled datapack.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Whether independent files are written in parallel.
    pub concurrent_writes: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            concurrent_writes: true,
        }
    }
}

/// `scoreboard objectives add` commands collected from scoreboard declarations.
#[derive(Debug, Clone, Default)]
pub struct ObjectiveList {
    commands: Arc<RwLock<Vec<String>>>,
}

impl ObjectiveList {
    /// Record a command.
    pub fn push(&self, command: String) {
        self.commands
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command);
    }

    /// Get all recorded commands in declaration order.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// State shared by one [`Datapack`](crate::datapack::Datapack) and every
/// [`Namespace`](crate::datapack::Namespace) created from it.
///
/// The objective list is declarative and keeps its entries across builds.
/// Registration queues are not part of the context: every build owns its own.
#[derive(Debug, Getters, CopyGetters)]
pub struct PackContext {
    /// Pack format the file layout is derived from.
    #[get_copy = "pub"]
    pack_format: u8,
    /// Objectives to create in the bootstrap function.
    #[get = "pub"]
    objectives: ObjectiveList,
    generated_functions: AtomicUsize,
}

impl PackContext {
    /// Create a new, empty context.
    #[must_use]
    pub fn new(pack_format: u8) -> Self {
        Self {
            pack_format,
            objectives: ObjectiveList::default(),
            generated_functions: AtomicUsize::new(0),
        }
    }

    /// Request a number that has not been handed out for a generated function yet.
    pub fn next_generated_id(&self) -> usize {
        self.generated_functions.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_unique() {
        let context = PackContext::new(15);
        let a = context.next_generated_id();
        let b = context.next_generated_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_objective_list_order() {
        let list = ObjectiveList::default();
        let shared = list.clone();
        list.push("scoreboard objectives add a.b dummy".to_string());
        shared.push("scoreboard objectives add a.c dummy".to_string());

        assert_eq!(
            list.commands(),
            vec![
                "scoreboard objectives add a.b dummy".to_string(),
                "scoreboard objectives add a.c dummy".to_string()
            ]
        );
    }

    #[test]
    fn test_build_options_default() {
        let options: BuildOptions = serde_json::from_str("{}").expect("invalid options");
        assert!(options.concurrent_writes);
    }
}
