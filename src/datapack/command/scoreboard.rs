use std::fmt::Display;

use crate::datapack::Objective;

use super::{Command, Part};

/// Operation of `scoreboard players operation`.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Assign,
    Min,
    Max,
    Swap,
}

impl Display for ScoreOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self {
            Self::Add => "+=",
            Self::Subtract => "-=",
            Self::Multiply => "*=",
            Self::Divide => "/=",
            Self::Modulo => "%=",
            Self::Assign => "=",
            Self::Min => "<",
            Self::Max => ">",
            Self::Swap => "><",
        };
        f.write_str(op)
    }
}

/// `scoreboard players add <targets> <objective> <score>`
#[must_use]
pub fn scoreboard_players_add(
    targets: impl Into<Part>,
    objective: &Objective,
    score: i32,
) -> Command {
    Command::new("scoreboard players add")
        .arg(targets)
        .arg(objective)
        .arg(score)
}

/// `scoreboard players remove <targets> <objective> <score>`
#[must_use]
pub fn scoreboard_players_remove(
    targets: impl Into<Part>,
    objective: &Objective,
    score: i32,
) -> Command {
    Command::new("scoreboard players remove")
        .arg(targets)
        .arg(objective)
        .arg(score)
}

/// `scoreboard players set <targets> <objective> <score>`
#[must_use]
pub fn scoreboard_players_set(
    targets: impl Into<Part>,
    objective: &Objective,
    score: i32,
) -> Command {
    Command::new("scoreboard players set")
        .arg(targets)
        .arg(objective)
        .arg(score)
}

/// `scoreboard players reset <targets> [<objective>]`
#[must_use]
pub fn scoreboard_players_reset(
    targets: impl Into<Part>,
    objective: Option<&Objective>,
) -> Command {
    Command::new("scoreboard players reset")
        .arg(targets)
        .opt_arg(objective)
}

/// `scoreboard players enable <targets> <objective>`
#[must_use]
pub fn scoreboard_players_enable(targets: impl Into<Part>, objective: &Objective) -> Command {
    Command::new("scoreboard players enable")
        .arg(targets)
        .arg(objective)
}

/// `scoreboard players operation <targets> <objective> <operation> <source> <source objective>`
#[must_use]
pub fn scoreboard_players_operation(
    targets: impl Into<Part>,
    objective: &Objective,
    operation: ScoreOperation,
    source: impl Into<Part>,
    source_objective: &Objective,
) -> Command {
    Command::new("scoreboard players operation")
        .arg(targets)
        .arg(objective)
        .arg(operation.to_string())
        .arg(source)
        .arg(source_objective)
}

/// `scoreboard objectives add <objective> <criteria> [<display name>]`
#[must_use]
pub fn scoreboard_objectives_add(objective: &Objective) -> Command {
    Command::raw(&objective.add_command())
}

/// `scoreboard objectives remove <objective>`
#[must_use]
pub fn scoreboard_objectives_remove(objective: &Objective) -> Command {
    Command::new("scoreboard objectives remove").arg(objective)
}

/// `scoreboard objectives setdisplay <slot> [<objective>]`
#[must_use]
pub fn scoreboard_objectives_setdisplay(slot: &str, objective: Option<&Objective>) -> Command {
    Command::new("scoreboard objectives setdisplay")
        .arg(slot)
        .opt_arg(objective)
}
