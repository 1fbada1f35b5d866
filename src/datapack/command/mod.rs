//! Represents a command that can be included in a function.
//!
//! Commands are stored as parts: plain text, or references to other
//! resources. References are rendered by the build and register the resource
//! they point to, so a function only ends up in the pack if a command that
//! mentions it is part of the pack.

mod data;
mod execute;
mod loot;
mod scoreboard;

pub use data::{
    data_get, data_merge, data_modify, data_remove, DataSource, DataTarget, ModifyOperation,
};
pub use execute::{execute, Condition, Execute, Subcommand};
pub use loot::{loot, LootCommand, LootSource, LootTarget};
pub use scoreboard::{
    scoreboard_objectives_add, scoreboard_objectives_remove, scoreboard_objectives_setdisplay,
    scoreboard_players_add, scoreboard_players_enable, scoreboard_players_operation,
    scoreboard_players_remove, scoreboard_players_reset, scoreboard_players_set,
    ScoreOperation,
};

use std::fmt::{Display, Write as _};

use crate::util::RegistrationQueue;

use super::{Function, LootTable, Objective, ResourceRef, Selector, Tag};

/// A single piece of a command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// Literal text.
    Text(String),
    /// Reference to another resource, registered when rendered.
    Reference(ResourceRef),
}

impl Part {
    /// Render the part, registering referenced resources in the queue.
    #[must_use]
    pub fn render(&self, queue: &RegistrationQueue<ResourceRef>) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Reference(reference) => reference.render(queue),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Reference(reference) => write!(f, "{reference}"),
        }
    }
}

impl From<&str> for Part {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}
impl From<String> for Part {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
impl From<&String> for Part {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}
impl From<Selector> for Part {
    fn from(value: Selector) -> Self {
        Self::Text(value.to_string())
    }
}
impl From<&Selector> for Part {
    fn from(value: &Selector) -> Self {
        Self::Text(value.to_string())
    }
}
impl From<Objective> for Part {
    fn from(value: Objective) -> Self {
        Self::Text(value.to_string())
    }
}
impl From<&Objective> for Part {
    fn from(value: &Objective) -> Self {
        Self::Text(value.to_string())
    }
}
impl From<ResourceRef> for Part {
    fn from(value: ResourceRef) -> Self {
        Self::Reference(value)
    }
}
impl From<&ResourceRef> for Part {
    fn from(value: &ResourceRef) -> Self {
        Self::Reference(value.clone())
    }
}
impl From<&Function> for Part {
    fn from(value: &Function) -> Self {
        Self::Reference(value.reference())
    }
}
impl From<Function> for Part {
    fn from(value: Function) -> Self {
        Self::Reference(ResourceRef::Function(value))
    }
}
impl From<&Tag> for Part {
    fn from(value: &Tag) -> Self {
        Self::Reference(value.reference())
    }
}
impl From<Tag> for Part {
    fn from(value: Tag) -> Self {
        Self::Reference(ResourceRef::Tag(value))
    }
}
impl From<&LootTable> for Part {
    fn from(value: &LootTable) -> Self {
        Self::Reference(value.reference())
    }
}
impl From<LootTable> for Part {
    fn from(value: LootTable) -> Self {
        Self::Reference(ResourceRef::LootTable(value))
    }
}

macro_rules! part_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Part {
                fn from(value: $ty) -> Self {
                    Self::Text(value.to_string())
                }
            }
        )*
    };
}
part_from_display!(bool, i32, i64, u8, u32, u64, f32, f64);

/// A command, possibly spanning several lines.
///
/// Within a line, parts added with [`Command::arg`] are separated by a space.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Command {
    lines: Vec<Vec<Part>>,
}

impl Command {
    /// Create a command starting with the given part.
    #[must_use]
    pub fn new(head: impl Into<Part>) -> Self {
        Self {
            lines: vec![vec![head.into()]],
        }
    }

    /// Create a command from raw text. Every line of the text becomes a line of the command.
    #[must_use]
    pub fn raw(text: &str) -> Self {
        Self {
            lines: text
                .lines()
                .map(|line| vec![Part::Text(line.to_string())])
                .collect(),
        }
    }

    /// Combine several commands into one, keeping each of their lines.
    #[must_use]
    pub fn join(commands: impl IntoIterator<Item = Self>) -> Self {
        Self {
            lines: commands.into_iter().flat_map(|c| c.lines).collect(),
        }
    }

    /// Append a space-separated argument to the last line.
    #[must_use]
    pub fn arg(mut self, part: impl Into<Part>) -> Self {
        let part = part.into();
        match self.lines.last_mut() {
            Some(line) if !line.is_empty() => {
                line.push(Part::Text(" ".to_string()));
                line.push(part);
            }
            Some(line) => line.push(part),
            None => self.lines.push(vec![part]),
        }
        self
    }

    /// Append an argument if it is present.
    #[must_use]
    pub fn opt_arg(self, part: Option<impl Into<Part>>) -> Self {
        match part {
            Some(part) => self.arg(part),
            None => self,
        }
    }

    /// Append several space-separated arguments to the last line.
    #[must_use]
    pub fn args<P: Into<Part>>(self, parts: impl IntoIterator<Item = P>) -> Self {
        parts.into_iter().fold(self, Self::arg)
    }

    /// Append a part to the last line without a separator.
    #[must_use]
    pub fn push(mut self, part: impl Into<Part>) -> Self {
        match self.lines.last_mut() {
            Some(line) => line.push(part.into()),
            None => self.lines.push(vec![part.into()]),
        }
        self
    }

    /// Get the lines of the command.
    #[must_use]
    pub fn lines(&self) -> &[Vec<Part>] {
        &self.lines
    }

    /// Check whether the command has no visible content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().flatten().all(Part::is_blank)
    }

    /// Render the command, registering every referenced resource.
    #[must_use]
    pub fn render(&self, queue: &RegistrationQueue<ResourceRef>) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|part| part.render(queue)).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for part in line {
                write!(f, "{part}")?;
            }
        }
        Ok(())
    }
}

impl From<&str> for Command {
    fn from(value: &str) -> Self {
        Self::raw(value)
    }
}
impl From<String> for Command {
    fn from(value: String) -> Self {
        Self::raw(&value)
    }
}
impl From<ResourceRef> for Command {
    fn from(value: ResourceRef) -> Self {
        Self::new(value)
    }
}
impl From<&Function> for Command {
    fn from(value: &Function) -> Self {
        call(value)
    }
}
impl From<Function> for Command {
    fn from(value: Function) -> Self {
        call(value)
    }
}
impl From<&Tag> for Command {
    fn from(value: &Tag) -> Self {
        call(value)
    }
}
impl From<Tag> for Command {
    fn from(value: Tag) -> Self {
        call(value)
    }
}

/// Build a command from space-separated parts.
#[must_use]
pub fn command<P: Into<Part>>(parts: impl IntoIterator<Item = P>) -> Command {
    Command::default().args(parts)
}

/// A comment line.
#[must_use]
pub fn comment(text: &str) -> Command {
    Command::new(format!("# {text}"))
}

/// Run a function, or every function of a function tag.
#[must_use]
pub fn call(function: impl Into<Part>) -> Command {
    Command::new("function").arg(function)
}

/// Serialize structured data for use as a command argument.
#[must_use]
pub fn nbt(data: &serde_json::Value) -> String {
    data.to_string()
}

/// `say <message>`
#[must_use]
pub fn say(text: &str) -> Command {
    Command::new("say").arg(text)
}

/// `tellraw <targets> <message>`
#[must_use]
pub fn tellraw(targets: impl Into<Part>, message: &serde_json::Value) -> Command {
    Command::new("tellraw").arg(targets).arg(nbt(message))
}

/// `effect give <targets> <effect> [<seconds>] [<amplifier>] [<hideParticles>]`
#[must_use]
pub fn effect_give(
    targets: impl Into<Part>,
    effect: &str,
    seconds: Option<u32>,
    amplifier: Option<u8>,
    hide_particles: Option<bool>,
) -> Command {
    Command::new("effect give")
        .arg(targets)
        .arg(effect)
        .opt_arg(seconds)
        .opt_arg(amplifier)
        .opt_arg(hide_particles)
}

/// `effect clear <targets> [<effect>]`
#[must_use]
pub fn effect_clear(targets: impl Into<Part>, effect: Option<&str>) -> Command {
    Command::new("effect clear").arg(targets).opt_arg(effect)
}

/// `schedule function <function> <time> (append|replace)`
#[must_use]
pub fn schedule(function: impl Into<Part>, time: &str, append: bool) -> Command {
    Command::new("schedule function")
        .arg(function)
        .arg(time)
        .arg(if append { "append" } else { "replace" })
}

/// `schedule clear <function>`
#[must_use]
pub fn schedule_clear(function: impl Into<Part>) -> Command {
    Command::new("schedule clear").arg(function)
}

/// Operations of the `team` command.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum Team {
    Add {
        name: String,
        display_name: Option<serde_json::Value>,
    },
    Empty(String),
    Join {
        name: String,
        members: Part,
    },
    Leave(Part),
    List(Option<String>),
    Modify {
        name: String,
        option: String,
        value: String,
    },
    Remove(String),
}

/// `team ...`
#[must_use]
pub fn team(operation: Team) -> Command {
    let cmd = Command::new("team");
    match operation {
        Team::Add { name, display_name } => cmd
            .arg("add")
            .arg(name)
            .opt_arg(display_name.as_ref().map(nbt)),
        Team::Empty(name) => cmd.arg("empty").arg(name),
        Team::Join { name, members } => cmd.arg("join").arg(name).arg(members),
        Team::Leave(members) => cmd.arg("leave").arg(members),
        Team::List(name) => cmd.arg("list").opt_arg(name),
        Team::Modify {
            name,
            option,
            value,
        } => cmd.arg("modify").arg(name).arg(option).arg(value),
        Team::Remove(name) => cmd.arg("remove").arg(name),
    }
}

/// Actions of the `title` command.
#[derive(Debug, Clone, PartialEq)]
pub enum Title {
    /// Remove the title from the screen.
    Clear,
    /// Reset title options to their defaults.
    Reset,
    /// Show a title.
    Title(serde_json::Value),
    /// Show a subtitle.
    Subtitle(serde_json::Value),
    /// Show text in the action bar.
    Actionbar(serde_json::Value),
    /// Set fade-in, stay and fade-out times in ticks.
    Times {
        /// Fade-in time.
        fade_in: u32,
        /// Time the title stays on screen.
        stay: u32,
        /// Fade-out time.
        fade_out: u32,
    },
}

/// `title <targets> ...`
#[must_use]
pub fn title(targets: impl Into<Part>, action: Title) -> Command {
    let cmd = Command::new("title").arg(targets);
    match action {
        Title::Clear => cmd.arg("clear"),
        Title::Reset => cmd.arg("reset"),
        Title::Title(text) => cmd.arg("title").arg(nbt(&text)),
        Title::Subtitle(text) => cmd.arg("subtitle").arg(nbt(&text)),
        Title::Actionbar(text) => cmd.arg("actionbar").arg(nbt(&text)),
        Title::Times {
            fade_in,
            stay,
            fade_out,
        } => cmd.arg("times").arg(fade_in).arg(stay).arg(fade_out),
    }
}

/// `gamerule <rule> <value>`
#[must_use]
pub fn gamerule(rule: &str, value: impl Display) -> Command {
    Command::new("gamerule").arg(rule).arg(value.to_string())
}

/// `teleport <targets> <destination>`
#[must_use]
pub fn teleport(targets: impl Into<Part>, destination: impl Into<Part>) -> Command {
    Command::new("teleport").arg(targets).arg(destination)
}

/// `teleport <targets> <location> facing <facing location>`
#[must_use]
pub fn teleport_facing(
    targets: impl Into<Part>,
    location: &str,
    facing: impl Into<Part>,
) -> Command {
    Command::new("teleport")
        .arg(targets)
        .arg(location)
        .arg("facing")
        .arg(facing)
}

/// `particle <name> [<arguments>...]`
#[must_use]
pub fn particle<P: Into<Part>>(name: &str, arguments: impl IntoIterator<Item = P>) -> Command {
    Command::new("particle").arg(name).args(arguments)
}
