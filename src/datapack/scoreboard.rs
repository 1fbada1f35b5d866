//! Scoreboard objectives.

use std::{fmt::Display, ops::Index};

use getset::Getters;

/// A named scoreboard objective.
///
/// Displays as `<namespace>.<name>`, the name the objective is created with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters)]
pub struct Objective {
    /// Namespace prefix of the objective.
    #[get = "pub"]
    namespace: String,
    /// Variable name of the objective.
    #[get = "pub"]
    name: String,
    /// Criteria the objective tracks, e.g. `dummy`.
    #[get = "pub"]
    criteria: String,
    /// Optional display name.
    #[get = "pub"]
    display_name: Option<String>,
}

impl Objective {
    /// Create a new objective.
    #[must_use]
    pub fn new(namespace: &str, name: &str, criteria: &str, display_name: Option<&str>) -> Self {
        Self {
            namespace: namespace.to_string(),
            name: name.to_string(),
            criteria: criteria.to_string(),
            display_name: display_name.map(str::to_string),
        }
    }

    /// Get the full name the objective is known as in game.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.namespace, self.name)
    }

    /// Get the command that creates the objective.
    #[must_use]
    pub fn add_command(&self) -> String {
        let command = format!(
            "scoreboard objectives add {} {}",
            self.full_name(),
            self.criteria
        );
        match &self.display_name {
            Some(display_name) => {
                format!("{command} {}", serde_json::Value::from(display_name.as_str()))
            }
            None => command,
        }
    }
}

impl Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Objectives declared together, looked up by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    objectives: Vec<Objective>,
}

impl Scoreboard {
    pub(in crate::datapack) fn new(objectives: Vec<Objective>) -> Self {
        Self { objectives }
    }

    /// Get an objective by its variable name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Objective> {
        self.objectives.iter().find(|objective| objective.name == name)
    }

    /// Iterate over the objectives in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Objective> {
        self.objectives.iter()
    }

    /// Get the number of objectives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objectives.len()
    }

    /// Check whether no objectives were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objectives.is_empty()
    }
}

impl Index<&str> for Scoreboard {
    type Output = Objective;

    /// # Panics
    /// - If no objective with the name was declared
    fn index(&self, name: &str) -> &Self::Output {
        self.get(name)
            .unwrap_or_else(|| panic!("no objective named '{name}' in scoreboard"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective() {
        let objective = Objective::new("game", "score", "dummy", None);
        assert_eq!(objective.to_string(), "game.score");
        assert_eq!(objective.full_name(), "game.score");
        assert_eq!(objective.criteria(), "dummy");
        assert_eq!(
            objective.add_command(),
            "scoreboard objectives add game.score dummy"
        );

        let named = Objective::new("game", "deaths", "deathCount", Some("Deaths"));
        assert_eq!(
            named.add_command(),
            r#"scoreboard objectives add game.deaths deathCount "Deaths""#
        );
    }

    #[test]
    fn test_scoreboard_lookup() {
        let scoreboard = Scoreboard::new(vec![
            Objective::new("game", "a", "dummy", None),
            Objective::new("game", "b", "dummy", None),
        ]);

        assert_eq!(scoreboard.len(), 2);
        assert_eq!(scoreboard["b"].to_string(), "game.b");
        assert!(scoreboard.get("c").is_none());
        assert_eq!(
            scoreboard.iter().map(Objective::name).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }
}
