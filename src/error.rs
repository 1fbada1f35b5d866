use std::io;

/// Errors that can occur while describing or building a datapack.
#[derive(Debug, thiserror::Error)]
pub enum DatapackError {
    /// A function was created without a name and none could be derived.
    #[error("missing name: either use a named fn item or pass a name")]
    MissingName,

    /// A resource name contains characters that are not allowed in a resource location.
    #[error("invalid resource name '{name}'")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// Two different resources resolve to the same output file.
    #[error("duplicate filename '{filename}'")]
    DuplicateFilename {
        /// Path of the clashing file, relative to the pack root.
        filename: String,
    },

    /// A structured document could not be serialized.
    #[error("failed to serialize '{filename}': {source}")]
    Serialize {
        /// Path of the file being generated.
        filename: String,
        /// The underlying serializer error.
        source: serde_json::Error,
    },

    /// An I/O error occurred while writing the pack.
    #[error(transparent)]
    Io(#[from] io::Error),
}
