use super::{Command, Part};

mod conditional;
pub use conditional::Condition;

/// One modifier of an `execute` chain.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum Subcommand {
    Align(Part),
    Anchored(Part),
    As(Part),
    At(Part),
    AsAt(Part),
    Facing(Part),
    In(Part),
    On(Part),
    Positioned(Part),
    Rotated(Part),
    Store(Part),
    Summon(Part),
    If(Condition),
}

impl Subcommand {
    /// Get the variant name of the subcommand.
    #[must_use]
    pub fn variant_name(&self) -> &str {
        match self {
            Self::Align(..) => "align",
            Self::Anchored(..) => "anchored",
            Self::As(..) => "as",
            Self::At(..) => "at",
            Self::AsAt(..) => "as_at",
            Self::Facing(..) => "facing",
            Self::In(..) => "in",
            Self::On(..) => "on",
            Self::Positioned(..) => "positioned",
            Self::Rotated(..) => "rotated",
            Self::Store(..) => "store",
            Self::Summon(..) => "summon",
            Self::If(..) => "if",
        }
    }

    /// Append the subcommand to every prefix line.
    /// Conditions with disjunctions multiply the number of lines.
    fn apply(&self, prefixes: Vec<Vec<Part>>) -> Vec<Vec<Part>> {
        match self {
            Self::If(cond) => {
                let conditions = cond.compile();
                prefixes
                    .into_iter()
                    .flat_map(|prefix| {
                        conditions.iter().map(move |cond| {
                            let mut line = prefix.clone();
                            line.push(Part::from(" "));
                            line.extend(cond.iter().cloned());
                            line
                        })
                    })
                    .collect()
            }
            Self::AsAt(selector) => prefixes
                .into_iter()
                .map(|mut line| {
                    line.extend([
                        Part::from(" as "),
                        selector.clone(),
                        Part::from(" at @s"),
                    ]);
                    line
                })
                .collect(),
            Self::Align(arg)
            | Self::Anchored(arg)
            | Self::As(arg)
            | Self::At(arg)
            | Self::Facing(arg)
            | Self::In(arg)
            | Self::On(arg)
            | Self::Positioned(arg)
            | Self::Rotated(arg)
            | Self::Store(arg)
            | Self::Summon(arg) => {
                let op = format!(" {} ", self.variant_name());
                prefixes
                    .into_iter()
                    .map(|mut line| {
                        line.extend([Part::Text(op.clone()), arg.clone()]);
                        line
                    })
                    .collect()
            }
        }
    }
}

/// Fluent builder for the `execute` command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Execute {
    subcommands: Vec<Subcommand>,
}

/// Start an `execute` chain.
#[must_use]
pub fn execute() -> Execute {
    Execute::default()
}

impl Execute {
    /// Append a subcommand.
    #[must_use]
    pub fn then(mut self, subcommand: Subcommand) -> Self {
        self.subcommands.push(subcommand);
        self
    }

    /// Get the subcommands of the chain.
    #[must_use]
    pub fn subcommands(&self) -> &[Subcommand] {
        &self.subcommands
    }

    /// `align <axes>`
    #[must_use]
    pub fn align(self, axes: impl Into<Part>) -> Self {
        self.then(Subcommand::Align(axes.into()))
    }

    /// `anchored <anchor>`
    #[must_use]
    pub fn anchored(self, anchor: impl Into<Part>) -> Self {
        self.then(Subcommand::Anchored(anchor.into()))
    }

    /// `as <targets>`
    #[must_use]
    pub fn as_(self, targets: impl Into<Part>) -> Self {
        self.then(Subcommand::As(targets.into()))
    }

    /// `at <targets>`
    #[must_use]
    pub fn at(self, targets: impl Into<Part>) -> Self {
        self.then(Subcommand::At(targets.into()))
    }

    /// `as <targets> at @s`
    #[must_use]
    pub fn as_at(self, targets: impl Into<Part>) -> Self {
        self.then(Subcommand::AsAt(targets.into()))
    }

    /// `facing <arguments>`
    #[must_use]
    pub fn facing(self, arguments: impl Into<Part>) -> Self {
        self.then(Subcommand::Facing(arguments.into()))
    }

    /// `in <dimension>`
    #[must_use]
    pub fn in_(self, dimension: impl Into<Part>) -> Self {
        self.then(Subcommand::In(dimension.into()))
    }

    /// `on <relation>`
    #[must_use]
    pub fn on(self, relation: impl Into<Part>) -> Self {
        self.then(Subcommand::On(relation.into()))
    }

    /// `positioned <arguments>`
    #[must_use]
    pub fn positioned(self, arguments: impl Into<Part>) -> Self {
        self.then(Subcommand::Positioned(arguments.into()))
    }

    /// `rotated <arguments>`
    #[must_use]
    pub fn rotated(self, arguments: impl Into<Part>) -> Self {
        self.then(Subcommand::Rotated(arguments.into()))
    }

    /// `store <arguments>`
    #[must_use]
    pub fn store(self, arguments: impl Into<Part>) -> Self {
        self.then(Subcommand::Store(arguments.into()))
    }

    /// `summon <entity>`
    #[must_use]
    pub fn summon(self, entity: impl Into<Part>) -> Self {
        self.then(Subcommand::Summon(entity.into()))
    }

    /// `if <condition>`
    #[must_use]
    pub fn if_(self, condition: impl Into<Part>) -> Self {
        self.when(Condition::Atom(vec![condition.into()]))
    }

    /// `unless <condition>`
    #[must_use]
    pub fn unless(self, condition: impl Into<Part>) -> Self {
        self.when(!Condition::Atom(vec![condition.into()]))
    }

    /// Add a compound condition.
    ///
    /// Each disjunct of the condition produces its own `execute` line.
    #[must_use]
    pub fn when(self, condition: Condition) -> Self {
        self.then(Subcommand::If(condition))
    }

    /// Compile the chain into one prefix line per condition disjunct.
    #[must_use]
    pub fn compile(&self) -> Vec<Vec<Part>> {
        self.subcommands
            .iter()
            .fold(vec![vec![Part::from("execute")]], |prefixes, sub| {
                sub.apply(prefixes)
            })
    }

    /// Finish the chain with `run <command>`.
    ///
    /// Every line of the command is run by every compiled prefix. Comment
    /// lines are kept without a prefix. An empty command leaves the bare
    /// condition check.
    #[must_use]
    pub fn run(self, command: impl Into<Command>) -> Command {
        let command = command.into();
        let prefixes = self.compile();
        if command.is_empty() {
            return Command { lines: prefixes };
        }

        let lines = prefixes
            .into_iter()
            .flat_map(|prefix| {
                command
                    .lines()
                    .iter()
                    .map(move |line| map_run_cmd(&prefix, line))
                    .collect::<Vec<_>>()
            })
            .collect();
        Command { lines }
    }
}

/// Combine prefix and command, respecting if the command is a comment.
fn map_run_cmd(prefix: &[Part], line: &[Part]) -> Vec<Part> {
    let is_comment = matches!(
        line.first(),
        Some(Part::Text(text)) if text.trim_start().starts_with('#')
    );
    if is_comment {
        line.to_vec()
    } else {
        let mut cmd = prefix.to_vec();
        cmd.push(Part::from(" run "));
        cmd.extend(line.iter().cloned());
        cmd
    }
}

impl From<Execute> for Command {
    fn from(ex: Execute) -> Self {
        Self {
            lines: ex.compile(),
        }
    }
}
