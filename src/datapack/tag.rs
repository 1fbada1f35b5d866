//! A tag for various types.

use std::{
    fmt::Display,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, PoisonError, RwLock,
    },
};

use crate::{util::RegistrationQueue, DatapackError};

use super::{Function, ResourceRef};

/// A tag for various types.
///
/// Values are appended through shared handles; clones refer to the same tag.
/// A tag without values produces no file.
#[derive(Debug, Clone)]
pub struct Tag {
    inner: Arc<TagInner>,
}

#[derive(Debug)]
struct TagInner {
    namespace: String,
    name: String,
    tag_type: TagType,
    filename: String,
    replace: AtomicBool,
    values: RwLock<Vec<TagValue>>,
}

impl Tag {
    pub(in crate::datapack) fn new(
        namespace: &str,
        name: &str,
        tag_type: TagType,
        filename: String,
    ) -> Self {
        Self {
            inner: Arc::new(TagInner {
                namespace: namespace.to_string(),
                name: name.to_string(),
                tag_type,
                filename,
                replace: AtomicBool::new(false),
                values: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get the namespace of the tag.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    /// Get the name of the tag.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the type of the tag.
    #[must_use]
    pub fn tag_type(&self) -> &TagType {
        &self.inner.tag_type
    }

    /// Get the path of the tag file, relative to the pack root.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.inner.filename
    }

    /// Get whether the tag should replace existing values.
    #[must_use]
    pub fn get_replace(&self) -> bool {
        self.inner.replace.load(Ordering::Relaxed)
    }

    /// Set whether the tag should replace existing values.
    pub fn set_replace(&self, replace: bool) {
        self.inner.replace.store(replace, Ordering::Relaxed);
    }

    /// Get a copy of the values of the tag.
    #[must_use]
    pub fn get_values(&self) -> Vec<TagValue> {
        self.inner
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Add a value to the tag.
    pub fn add(&self, value: impl Into<TagValue>) -> &Self {
        self.inner
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(value.into());
        self
    }

    /// Add several values to the tag, keeping their order.
    pub fn extend<V: Into<TagValue>>(&self, values: impl IntoIterator<Item = V>) -> &Self {
        self.inner
            .values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Get a reference to the tag, for use in commands and other tags.
    #[must_use]
    pub fn reference(&self) -> ResourceRef {
        ResourceRef::Tag(self.clone())
    }

    /// Check whether both handles refer to the same tag.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Compile the tag into the text of its file.
    ///
    /// Returns `None` if the tag has no values. Referenced functions and tags
    /// are registered in the queue.
    ///
    /// # Errors
    /// - If the document cannot be serialized
    pub fn content(
        &self,
        queue: &RegistrationQueue<ResourceRef>,
    ) -> Result<Option<String>, DatapackError> {
        let values = self.get_values();
        if values.is_empty() {
            return Ok(None);
        }

        let values = values
            .iter()
            .map(|value| value.compile(queue))
            .collect::<Vec<_>>();
        let json = if self.get_replace() {
            serde_json::json!({ "replace": true, "values": values })
        } else {
            serde_json::json!({ "values": values })
        };

        serde_json::to_string_pretty(&json)
            .map(Some)
            .map_err(|source| DatapackError::Serialize {
                filename: self.inner.filename.clone(),
                source,
            })
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}:{}", self.inner.namespace, self.inner.name)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

/// The type of a tag.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagType {
    /// A tag for blocks.
    Block,
    /// A tag for fluids.
    Fluid,
    /// A tag for items.
    Item,
    /// A tag for entities.
    Entity,
    /// A tag for game events.
    GameEvent,
    /// A tag for functions.
    Function,
    /// A custom tag type.
    /// `Other(<registry path>)` => `data/<namespace>/tags/<registry path>`
    Other(String),
}

impl TagType {
    /// Get the name of the directory below `tags/` depending on the pack format.
    #[must_use]
    pub fn get_directory_name(&self, pack_format: u8) -> &str {
        if pack_format < 43 {
            match self {
                Self::Block => "blocks",
                Self::Fluid => "fluids",
                Self::Item => "items",
                Self::Entity => "entity_types",
                Self::GameEvent => "game_events",
                Self::Function => "functions",
                Self::Other(path) => path.as_str(),
            }
        } else {
            match self {
                Self::Block => "block",
                Self::Fluid => "fluid",
                Self::Item => "item",
                Self::Entity => "entity_type",
                Self::GameEvent => "game_event",
                Self::Function => {
                    if pack_format < 45 {
                        "functions"
                    } else {
                        "function"
                    }
                }
                Self::Other(path) => path.as_str(),
            }
        }
    }
}

impl Display for TagType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            Self::Block => "block",
            Self::Fluid => "fluid",
            Self::Item => "item",
            Self::Entity => "entity_type",
            Self::GameEvent => "game_event",
            Self::Function => "function",
            Self::Other(path) => path.as_str(),
        };
        f.write_str(str)
    }
}

/// The value of a tag.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// A function, written as `namespace:name`.
    Function(Function),
    /// Another tag, written as `#namespace:name`.
    Tag(Tag),
    /// A simple value, either a resource location or an id of another tag.
    Simple(String),
    /// An advanced value, with an id (same as above) and whether the loading of the tag should
    /// fail when entry is not found.
    Advanced {
        /// The id of the tag.
        id: String,
        /// Whether the loading of the tag should fail when the entry is not found.
        required: bool,
    },
}

impl From<&str> for TagValue {
    fn from(value: &str) -> Self {
        Self::Simple(value.to_string())
    }
}
impl From<String> for TagValue {
    fn from(value: String) -> Self {
        Self::Simple(value)
    }
}
impl From<Function> for TagValue {
    fn from(value: Function) -> Self {
        Self::Function(value)
    }
}
impl From<&Function> for TagValue {
    fn from(value: &Function) -> Self {
        Self::Function(value.clone())
    }
}
impl From<Tag> for TagValue {
    fn from(value: Tag) -> Self {
        Self::Tag(value)
    }
}
impl From<&Tag> for TagValue {
    fn from(value: &Tag) -> Self {
        Self::Tag(value.clone())
    }
}

impl TagValue {
    /// Compile the tag value into a JSON value, registering referenced resources.
    #[must_use]
    pub fn compile(&self, queue: &RegistrationQueue<ResourceRef>) -> serde_json::Value {
        match self {
            Self::Function(function) => function.reference().render(queue).into(),
            Self::Tag(tag) => tag.reference().render(queue).into(),
            Self::Simple(value) => serde_json::Value::String(value.clone()),
            Self::Advanced { id, required } => {
                serde_json::json!({
                    "id": id.clone(),
                    "required": *required
                })
            }
        }
    }
}
