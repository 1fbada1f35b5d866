use std::ops::{BitAnd, BitOr, Not};

use crate::datapack::command::Part;

/// Condition for the execute command.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Atom(Vec<Part>),
    Not(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// `if function <function>`, true when the function returns a non-zero value.
    #[must_use]
    pub fn function(function: impl Into<Part>) -> Self {
        Self::Atom(vec![Part::from("function "), function.into()])
    }

    /// `if entity <targets>`
    #[must_use]
    pub fn entity(targets: impl Into<Part>) -> Self {
        Self::Atom(vec![Part::from("entity "), targets.into()])
    }

    /// `if block <position> <block>`
    #[must_use]
    pub fn block(position: &str, block: &str) -> Self {
        Self::Atom(vec![Part::Text(format!("block {position} {block}"))])
    }

    /// `if score <target> <objective> matches <range>`
    #[must_use]
    pub fn score_matches(
        target: impl Into<Part>,
        objective: impl Into<Part>,
        range: &str,
    ) -> Self {
        Self::Atom(vec![
            Part::from("score "),
            target.into(),
            Part::from(" "),
            objective.into(),
            Part::Text(format!(" matches {range}")),
        ])
    }

    /// Normalize the condition to eliminate complex negations.
    /// Uses De Morgan's laws to simplify the condition.
    #[must_use]
    pub fn normalize(&self) -> Self {
        match self {
            Self::Atom(_) => self.clone(),
            Self::Not(c) => match c.as_ref() {
                Self::Atom(_) => self.clone(),
                Self::Not(c) => c.normalize(),
                Self::And(a, b) => (!(**a).clone()).normalize() | (!(**b).clone()).normalize(),
                Self::Or(a, b) => (!(**a).clone()).normalize() & (!(**b).clone()).normalize(),
            },
            Self::And(a, b) => a.normalize() & b.normalize(),
            Self::Or(a, b) => a.normalize() | b.normalize(),
        }
    }

    /// Expand the condition into its disjuncts.
    /// No element contains a disjunction or a negation of anything but an atom.
    #[must_use]
    pub fn to_truth_table(&self) -> Vec<Self> {
        match self.normalize() {
            atom @ (Self::Atom(_) | Self::Not(_)) => vec![atom],
            Self::Or(a, b) => a
                .to_truth_table()
                .into_iter()
                .chain(b.to_truth_table())
                .collect(),
            Self::And(a, b) => {
                let a = a.to_truth_table();
                let b = b.to_truth_table();

                a.into_iter()
                    .flat_map(|el1| {
                        b.iter()
                            .map(move |el2| Self::And(Box::new(el1.clone()), Box::new(el2.clone())))
                    })
                    .collect()
            }
        }
    }

    /// Convert a disjunct into its `if`/`unless` parts.
    ///
    /// Returns `None` for conditions still containing an `Or`.
    fn line(&self) -> Option<Vec<Part>> {
        match self {
            Self::Atom(parts) => Some(
                std::iter::once(Part::from("if "))
                    .chain(parts.iter().cloned())
                    .collect(),
            ),
            Self::Not(n) => match n.as_ref() {
                Self::Atom(parts) => Some(
                    std::iter::once(Part::from("unless "))
                        .chain(parts.iter().cloned())
                        .collect(),
                ),
                _ => None,
            },
            Self::And(a, b) => {
                let mut line = a.line()?;
                line.push(Part::from(" "));
                line.extend(b.line()?);
                Some(line)
            }
            Self::Or(..) => None,
        }
    }

    /// Compile the condition into one line of execute subcommands per disjunct.
    #[must_use]
    pub fn compile(&self) -> Vec<Vec<Part>> {
        self.to_truth_table()
            .iter()
            .filter_map(Self::line)
            .collect()
    }
}

impl From<&str> for Condition {
    fn from(s: &str) -> Self {
        Self::Atom(vec![Part::from(s)])
    }
}

impl Not for Condition {
    type Output = Self;

    fn not(self) -> Self {
        Self::Not(Box::new(self))
    }
}
impl BitAnd for Condition {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::And(Box::new(self), Box::new(rhs))
    }
}
impl BitOr for Condition {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::Or(Box::new(self), Box::new(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(lines: &[Vec<Part>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[allow(clippy::redundant_clone)]
    #[test]
    fn test_normalize() {
        let c1 = Condition::from("foo");
        let c2 = Condition::from("bar");
        let c3 = Condition::from("baz");

        assert_eq!(
            (c1.clone() & c2.clone() | c3.clone()).normalize(),
            c1.clone() & c2.clone() | c3.clone()
        );
        assert_eq!((!!c1.clone()).normalize(), c1.clone());
        assert_eq!(
            (!(c1.clone() | c2.clone())).normalize(),
            !c1.clone() & !c2.clone()
        );
        assert_eq!(
            (!(c1.clone() & c2.clone())).normalize(),
            !c1.clone() | !c2.clone()
        );
    }

    #[allow(clippy::redundant_clone)]
    #[test]
    fn test_truth_table() {
        let c1 = Condition::from("foo");
        let c2 = Condition::from("bar");
        let c3 = Condition::from("baz");

        assert_eq!(
            ((c1.clone() | c2.clone()) & c3.clone()).to_truth_table(),
            vec![c1.clone() & c3.clone(), c2.clone() & c3.clone()]
        );
        assert_eq!(
            (c1.clone() & !(c2.clone() | c3.clone())).to_truth_table(),
            vec![c1.clone() & (!c2.clone() & !c3.clone())]
        );
    }

    #[test]
    fn test_compile() {
        let cond = Condition::entity("@s[tag=a]")
            & !(Condition::from("block ~ ~ ~ air") | Condition::function("foo:check"));

        assert_eq!(
            render(&cond.compile()),
            vec!["if entity @s[tag=a] unless block ~ ~ ~ air unless function foo:check".to_string()]
        );

        let either = Condition::score_matches("@s", "foo.score", "1..")
            | Condition::block("~ ~-1 ~", "minecraft:stone");
        assert_eq!(
            render(&either.compile()),
            vec![
                "if score @s foo.score matches 1..".to_string(),
                "if block ~ ~-1 ~ minecraft:stone".to_string()
            ]
        );
    }
}
