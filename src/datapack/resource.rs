//! References to resources that become files of the pack.

use std::fmt::Display;

use crate::{
    util::{RegistrationQueue, SameIdentity},
    DatapackError,
};

use super::{Function, LootTable, Tag};

/// A reference to a resource that is written to its own file.
///
/// Rendering a reference registers the resource for the build. Equality is
/// identity: two resources with the same name are still different resources.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceRef {
    /// A function, `namespace:name`.
    Function(Function),
    /// A tag, `#namespace:name`.
    Tag(Tag),
    /// A loot table, `namespace:name`.
    LootTable(LootTable),
}

impl ResourceRef {
    /// Get the path of the resource file, relative to the pack root.
    #[must_use]
    pub fn filename(&self) -> &str {
        match self {
            Self::Function(function) => function.filename(),
            Self::Tag(tag) => tag.filename(),
            Self::LootTable(loot_table) => loot_table.filename(),
        }
    }

    /// Get the kind of the resource.
    #[must_use]
    pub fn variant_name(&self) -> &str {
        match self {
            Self::Function(..) => "function",
            Self::Tag(..) => "tag",
            Self::LootTable(..) => "loot_table",
        }
    }

    /// Register the resource in the queue and return its reference form.
    ///
    /// Registering an already queued resource again has no effect.
    #[must_use]
    pub fn render(&self, queue: &RegistrationQueue<ResourceRef>) -> String {
        if queue.enroll(self) {
            tracing::trace!(
                kind = self.variant_name(),
                filename = self.filename(),
                "registered {}",
                self
            );
        }
        self.to_string()
    }

    /// Compile the resource into the text of its file.
    ///
    /// Returns `None` if no file should be written. Resources referenced by the
    /// content are registered in the queue.
    ///
    /// # Errors
    /// - If a structured document cannot be serialized
    pub fn content(
        &self,
        queue: &RegistrationQueue<ResourceRef>,
    ) -> Result<Option<String>, DatapackError> {
        match self {
            Self::Function(function) => Ok(Some(function.content(queue))),
            Self::Tag(tag) => tag.content(queue),
            Self::LootTable(loot_table) => loot_table.content().map(Some),
        }
    }
}

impl SameIdentity for ResourceRef {
    fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Function(a), Self::Function(b)) => a.same_identity(b),
            (Self::Tag(a), Self::Tag(b)) => a.same_identity(b),
            (Self::LootTable(a), Self::LootTable(b)) => a.same_identity(b),
            _ => false,
        }
    }
}

impl Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Function(function) => Display::fmt(function, f),
            Self::Tag(tag) => Display::fmt(tag, f),
            Self::LootTable(loot_table) => Display::fmt(loot_table, f),
        }
    }
}

impl From<Function> for ResourceRef {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}
impl From<Tag> for ResourceRef {
    fn from(value: Tag) -> Self {
        Self::Tag(value)
    }
}
impl From<LootTable> for ResourceRef {
    fn from(value: LootTable) -> Self {
        Self::LootTable(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::datapack::tag::TagType;

    use super::*;

    #[test]
    fn test_render_registers_once() {
        let tag = Tag::new(
            "foo",
            "bar",
            TagType::Function,
            "data/foo/tags/functions/bar.json".to_string(),
        );
        let queue = RegistrationQueue::default();

        assert_eq!(tag.reference().render(&queue), "#foo:bar");
        assert_eq!(tag.reference().render(&queue), "#foo:bar");
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_display_does_not_register() {
        let function = Function::new(
            "foo",
            "bar",
            "data/foo/functions/bar.mcfunction".to_string(),
            Box::new(|_: &Function| Vec::new()),
        );
        let queue = RegistrationQueue::<ResourceRef>::default();

        assert_eq!(function.reference().to_string(), "foo:bar");
        assert!(!queue.contains(&function.reference()));
    }

    #[test]
    fn test_identity_across_kinds() {
        let function = Function::new(
            "foo",
            "bar",
            "data/foo/functions/bar.mcfunction".to_string(),
            Box::new(|_: &Function| Vec::new()),
        );
        let reference = function.reference();

        assert!(reference.same_identity(&ResourceRef::from(function.clone())));
        assert_eq!(reference, function.reference());
        assert_eq!(reference.variant_name(), "function");
    }
}
