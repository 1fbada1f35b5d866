//! Namespace of a datapack

use std::{fmt::Display, sync::Arc};

use serde::Serialize;

use crate::{
    util::{
        compile::PackContext,
        pack_format::{function_directory_name, loot_table_directory_name},
    },
    DatapackError,
};

use super::{
    command::Command,
    function::Function,
    loot_table::LootTable,
    scoreboard::{Objective, Scoreboard},
    selector::Selector,
    tag::{Tag, TagType},
};

/// Namespace of a datapack.
///
/// Creates the resources of the namespace. Creating a resource does not add it
/// to the pack: it is only written once something references it.
#[derive(Debug, Clone)]
pub struct Namespace {
    name: String,
    context: Arc<PackContext>,
}

impl Namespace {
    /// Create a new namespace.
    pub(in crate::datapack) fn new(name: &str, context: Arc<PackContext>) -> Self {
        Self {
            name: name.to_string(),
            context,
        }
    }

    /// Get the name of the namespace.
    #[must_use]
    pub fn get_name(&self) -> &str {
        &self.name
    }

    /// Create a function.
    ///
    /// The body receives the handle of the function itself and runs once, the
    /// first time the content of the function is needed.
    ///
    /// # Errors
    /// - If the name is empty
    /// - If the name contains characters not allowed in a resource location
    pub fn function<F, I>(&self, name: &str, body: F) -> Result<Function, DatapackError>
    where
        F: FnOnce(&Function) -> I + Send + 'static,
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        validate_name(name)?;
        Ok(self.create_function(name, body))
    }

    /// Create a function named after the `fn` item passed as body.
    ///
    /// # Errors
    /// - If the body is a closure or otherwise has no usable name
    /// - If the derived name contains characters not allowed in a resource location
    pub fn function_from_fn<F, I>(&self, body: F) -> Result<Function, DatapackError>
    where
        F: FnOnce(&Function) -> I + Send + 'static,
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        let name = item_name::<F>().ok_or(DatapackError::MissingName)?;
        self.function(name, body)
    }

    /// Create a function with a generated name, `generated/<hash>`.
    pub fn anonymous_function<F, I>(&self, body: F) -> Function
    where
        F: FnOnce(&Function) -> I + Send + 'static,
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        let id = self.context.next_generated_id();
        let hash = chksum_md5::hash(format!("{}:{id}", self.name)).to_hex_lowercase();
        self.create_function(&format!("generated/{hash}"), body)
    }

    pub(in crate::datapack) fn create_function<F, I>(&self, name: &str, body: F) -> Function
    where
        F: FnOnce(&Function) -> I + Send + 'static,
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        tracing::trace!(namespace = self.name.as_str(), name, "created function");

        Function::new(
            &self.name,
            name,
            self.function_filename(name),
            Box::new(move |function: &Function| {
                body(function).into_iter().map(Into::into).collect::<Vec<Command>>()
            }),
        )
    }

    /// Create a function whose body runs every time its content is compiled.
    pub(in crate::datapack) fn create_live_function<F, I>(&self, name: &str, body: F) -> Function
    where
        F: Fn(&Function) -> I + Send + Sync + 'static,
        I: IntoIterator,
        I::Item: Into<Command>,
    {
        Function::new_live(
            &self.name,
            name,
            self.function_filename(name),
            Box::new(move |function: &Function| {
                body(function).into_iter().map(Into::into).collect::<Vec<Command>>()
            }),
        )
    }

    fn function_filename(&self, name: &str) -> String {
        format!(
            "data/{}/{}/{name}.mcfunction",
            self.name,
            function_directory_name(self.context.pack_format())
        )
    }

    /// Create a loot table, described by the value the builder returns.
    ///
    /// # Errors
    /// - If the name contains characters not allowed in a resource location
    pub fn loot_table<F, T>(&self, name: &str, builder: F) -> Result<LootTable, DatapackError>
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Serialize,
    {
        validate_name(name)?;
        let filename = format!(
            "data/{}/{}/{name}.json",
            self.name,
            loot_table_directory_name(self.context.pack_format())
        );

        Ok(LootTable::new(&self.name, name, filename, builder))
    }

    /// Create an empty tag.
    ///
    /// # Errors
    /// - If the name contains characters not allowed in a resource location
    pub fn tag(&self, tag_type: TagType, name: &str) -> Result<Tag, DatapackError> {
        validate_name(name)?;
        Ok(self.create_tag(tag_type, name))
    }

    pub(in crate::datapack) fn create_tag(&self, tag_type: TagType, name: &str) -> Tag {
        let filename = format!(
            "data/{}/tags/{}/{name}.json",
            self.name,
            tag_type.get_directory_name(self.context.pack_format())
        );

        Tag::new(&self.name, name, tag_type, filename)
    }

    /// Declare objectives from `(variable, criteria)` pairs.
    ///
    /// Every objective is created by the pack's load function.
    pub fn scoreboard<K, V>(&self, declarations: impl IntoIterator<Item = (K, V)>) -> Scoreboard
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Scoreboard::new(
            declarations
                .into_iter()
                .map(|(name, criteria)| self.objective(name.as_ref(), criteria.as_ref(), None))
                .collect(),
        )
    }

    /// Declare a single objective.
    ///
    /// The objective is created by the pack's load function.
    pub fn objective(&self, name: &str, criteria: &str, display_name: Option<&str>) -> Objective {
        let objective = Objective::new(&self.name, name, criteria, display_name);
        self.context.objectives().push(objective.add_command());
        tracing::debug!(objective = %objective, criteria, "declared objective");
        objective
    }

    /// Create a selector.
    #[must_use]
    pub fn selector<K, V>(
        &self,
        name: &str,
        arguments: impl IntoIterator<Item = (K, V)>,
    ) -> Selector
    where
        K: Into<String>,
        V: Display,
    {
        Selector::with_arguments(name, arguments)
    }
}

/// Check that a name is a valid resource path: lowercase letters, digits and
/// `_-./`, with `/` only between segments that are not empty, `.` or `..`.
fn validate_name(name: &str) -> Result<(), DatapackError> {
    if name.is_empty() {
        return Err(DatapackError::MissingName);
    }

    if name.split('/').all(is_valid_segment) {
        Ok(())
    } else {
        Err(DatapackError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Check that a namespace name is a single valid path segment.
pub(in crate::datapack) fn validate_namespace(name: &str) -> Result<(), DatapackError> {
    if name.is_empty() {
        Err(DatapackError::MissingName)
    } else if is_valid_segment(name) {
        Ok(())
    } else {
        Err(DatapackError::InvalidName {
            name: name.to_string(),
        })
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !matches!(segment, "" | "." | "..")
        && segment
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
}

/// Get the name of a `fn` item from its type name.
fn item_name<F>() -> Option<&'static str> {
    let name = std::any::type_name::<F>().rsplit("::").next()?;
    (!name.is_empty() && !name.contains(['{', '<', '>', ' '])).then_some(name)
}
