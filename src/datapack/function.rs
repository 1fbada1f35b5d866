//! Function struct and implementation

use std::{
    borrow::Cow,
    fmt::Display,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use crate::util::RegistrationQueue;

use super::{command::Command, ResourceRef};

/// First line of every generated function file.
pub const FUNCTION_HEADER: &str = "# Generated by cauldron";

type Body = Box<dyn FnOnce(&Function) -> Vec<Command> + Send>;
type LiveBody = Box<dyn Fn(&Function) -> Vec<Command> + Send + Sync>;

/// Function that can be called by a command.
///
/// The body is produced lazily, the first time the content of the function is
/// requested, and at most once. Functions created with a live body instead run
/// it every time the content is requested. Clones refer to the same function.
#[derive(Clone)]
pub struct Function {
    inner: Arc<FunctionInner>,
}

struct FunctionInner {
    namespace: String,
    name: String,
    filename: String,
    source: Source,
}

enum Source {
    Once {
        body: Mutex<Option<Body>>,
        commands: OnceLock<Vec<Command>>,
    },
    Live(LiveBody),
}

impl Function {
    pub(in crate::datapack) fn new(
        namespace: &str,
        name: &str,
        filename: String,
        body: Body,
    ) -> Self {
        Self::with_source(
            namespace,
            name,
            filename,
            Source::Once {
                body: Mutex::new(Some(body)),
                commands: OnceLock::new(),
            },
        )
    }

    pub(in crate::datapack) fn new_live(
        namespace: &str,
        name: &str,
        filename: String,
        body: LiveBody,
    ) -> Self {
        Self::with_source(namespace, name, filename, Source::Live(body))
    }

    fn with_source(namespace: &str, name: &str, filename: String, source: Source) -> Self {
        Self {
            inner: Arc::new(FunctionInner {
                namespace: namespace.to_string(),
                name: name.to_string(),
                filename,
                source,
            }),
        }
    }

    /// Get the namespace of the function.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    /// Get the name of the function.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the path of the function file, relative to the pack root.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.inner.filename
    }

    /// Get a reference to the function, for use in commands and tags.
    #[must_use]
    pub fn reference(&self) -> ResourceRef {
        ResourceRef::Function(self.clone())
    }

    /// Check whether both handles refer to the same function.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Get the commands of the function, running the body if it has not run yet.
    ///
    /// Live bodies run on every call.
    pub fn commands(&self) -> Cow<'_, [Command]> {
        match &self.inner.source {
            Source::Once { body, commands } => Cow::Borrowed(commands.get_or_init(|| {
                let body = body.lock().unwrap_or_else(PoisonError::into_inner).take();
                body.map(|body| body(self)).unwrap_or_default()
            })),
            Source::Live(body) => Cow::Owned(body(self)),
        }
    }

    /// Compile the function into the text of its file.
    ///
    /// Every referenced resource is registered in the queue. Commands are
    /// separated by a blank line; lines are trimmed and empty commands skipped.
    #[must_use]
    pub fn content(&self, queue: &RegistrationQueue<ResourceRef>) -> String {
        let blocks = std::iter::once(FUNCTION_HEADER.to_string())
            .chain(self.commands().iter().filter_map(|command| {
                let text = command
                    .render(queue)
                    .lines()
                    .map(str::trim)
                    .collect::<Vec<_>>()
                    .join("\n");
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }))
            .collect::<Vec<_>>();

        blocks.join("\n\n") + "\n"
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.inner.namespace, self.inner.name)
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("namespace", &self.inner.namespace)
            .field("name", &self.inner.name)
            .field("filename", &self.inner.filename)
            .field(
                "materialized",
                &match &self.inner.source {
                    Source::Once { commands, .. } => commands.get().is_some(),
                    Source::Live(_) => false,
                },
            )
            .finish()
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}
