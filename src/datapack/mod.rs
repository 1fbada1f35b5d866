//! Datapack module for creating and managing Minecraft datapacks.

pub mod command;
mod function;
pub mod loot_table;
mod namespace;
mod resource;
mod scoreboard;
mod selector;
pub mod tag;
pub use function::{Function, FUNCTION_HEADER};
pub use loot_table::LootTable;
pub use namespace::Namespace;
pub use resource::ResourceRef;
pub use scoreboard::{Objective, Scoreboard};
pub use selector::Selector;
pub use tag::Tag;

use std::{ops::RangeInclusive, sync::Arc};
#[cfg(any(feature = "fs_access", feature = "zip"))]
use std::path::Path;

use command::{comment, Command};
use tag::{TagType, TagValue};

#[cfg(feature = "fs_access")]
use crate::util::compile::BuildOptions;
use crate::{
    util::{compile::PackContext, RegistrationQueue},
    virtual_fs::{VFile, VFolder},
    DatapackError,
};

/// A Minecraft datapack.
///
/// The pack starts out with the `minecraft:tick` and `minecraft:load` function
/// tags and a `cauldron:load` function, added to `minecraft:load`, that creates
/// every declared objective. Everything reachable from the two tags is written
/// when the pack is built.
#[derive(Debug)]
pub struct Datapack {
    description: Option<String>,
    pack_format: u8,
    supported_formats: Option<RangeInclusive<u8>>,
    context: Arc<PackContext>,
    tick: Tag,
    load: Tag,
    custom_files: VFolder,
}

impl Datapack {
    /// Pack format used by [`Datapack::default`].
    pub const DEFAULT_FORMAT: u8 = 15;
    /// Latest pack format whose layout is known.
    pub const LATEST_FORMAT: u8 = 48;

    /// Create a new Minecraft datapack.
    #[must_use]
    pub fn new(pack_format: u8) -> Self {
        let context = Arc::new(PackContext::new(pack_format));

        let minecraft = Namespace::new("minecraft", Arc::clone(&context));
        let tick = minecraft.create_tag(TagType::Function, "tick");
        let load = minecraft.create_tag(TagType::Function, "load");

        let objectives = context.objectives().clone();
        let bootstrap = Namespace::new("cauldron", Arc::clone(&context)).create_live_function(
            "load",
            move |_| {
                std::iter::once(comment("cauldron"))
                    .chain(objectives.commands().into_iter().map(Command::from))
                    .collect::<Vec<_>>()
            },
        );
        load.add(&bootstrap);

        Self {
            description: None,
            pack_format,
            supported_formats: None,
            context,
            tick,
            load,
            custom_files: VFolder::new(),
        }
    }

    /// Set the description of the datapack.
    ///
    /// A `pack.mcmeta` is only generated for packs with a description.
    #[must_use]
    pub fn with_description(self, description: &str) -> Self {
        Self {
            description: Some(description.to_string()),
            ..self
        }
    }

    /// Set the supported pack formats of the datapack.
    #[must_use]
    pub fn with_supported_formats(self, supported_formats: RangeInclusive<u8>) -> Self {
        Self {
            supported_formats: Some(supported_formats),
            ..self
        }
    }

    /// Set the custom files of the datapack.
    ///
    /// # Errors
    /// - If loading the directory fails
    #[cfg(feature = "fs_access")]
    pub fn with_template_folder(self, path: &Path) -> std::io::Result<Self> {
        let mut template = VFolder::try_from(path)?;
        template.merge(self.custom_files);

        Ok(Self {
            custom_files: template,
            ..self
        })
    }

    /// Get the pack format of the datapack.
    #[must_use]
    pub fn pack_format(&self) -> u8 {
        self.pack_format
    }

    /// Get a namespace to create resources in.
    ///
    /// # Errors
    /// - If the name is empty
    /// - If the name is not a single path segment of lowercase letters, digits and `_-.`
    pub fn namespace(&self, name: &str) -> Result<Namespace, DatapackError> {
        namespace::validate_namespace(name)?;
        Ok(Namespace::new(name, Arc::clone(&self.context)))
    }

    /// Get the `minecraft:tick` function tag.
    #[must_use]
    pub fn tick(&self) -> &Tag {
        &self.tick
    }

    /// Get the `minecraft:load` function tag.
    #[must_use]
    pub fn load(&self) -> &Tag {
        &self.load
    }

    /// Add a function to the tick function list.
    pub fn add_tick(&self, function: impl Into<TagValue>) {
        self.tick.add(function);
    }

    /// Add a function to the load function list.
    pub fn add_load(&self, function: impl Into<TagValue>) {
        self.load.add(function);
    }

    /// Add a custom file to the datapack.
    pub fn add_custom_file(&mut self, path: &str, file: VFile) {
        self.custom_files.add_file(path, file);
    }

    /// Get the commands creating the declared objectives, in declaration order.
    #[must_use]
    pub fn objectives(&self) -> Vec<String> {
        self.context.objectives().commands()
    }

    /// Compile the pack into a virtual folder.
    ///
    /// Starts at the tick and load tags and compiles every resource that is
    /// referenced, directly or indirectly. Resources without content, like
    /// empty tags, produce no file.
    ///
    /// # Errors
    /// - If two different resources resolve to the same file
    /// - If a tag or loot table cannot be serialized
    #[tracing::instrument(level = "debug", skip(self), fields(pack_format = self.pack_format))]
    pub fn compile(&self) -> Result<VFolder, DatapackError> {
        self.compile_with(&RegistrationQueue::default())
    }

    /// Compile the pack, registering resources in the given queue.
    fn compile_with(
        &self,
        queue: &RegistrationQueue<ResourceRef>,
    ) -> Result<VFolder, DatapackError> {
        let _ = self.tick.reference().render(queue);
        let _ = self.load.reference().render(queue);

        let mut root_folder = VFolder::new();
        for resource in queue.drain() {
            let Some(content) = resource.content(queue)? else {
                tracing::debug!(
                    filename = resource.filename(),
                    "skipped resource without content"
                );
                continue;
            };

            if root_folder.contains_file(resource.filename()) {
                return Err(DatapackError::DuplicateFilename {
                    filename: resource.filename().to_string(),
                });
            }

            tracing::debug!(
                kind = resource.variant_name(),
                filename = resource.filename(),
                "planned file"
            );
            root_folder.add_file(resource.filename(), VFile::Text(content));
        }

        if let Some(mcmeta) = generate_mcmeta(self)? {
            root_folder.add_file("pack.mcmeta", mcmeta);
        }

        let mut files = self.custom_files.clone();
        files.merge(root_folder);
        Ok(files)
    }

    /// Compile the pack and write it to a directory.
    ///
    /// Files already written are kept if writing fails part way.
    ///
    /// # Errors
    /// - If compiling fails, see [`Datapack::compile`]
    /// - If a file cannot be written
    #[cfg(feature = "fs_access")]
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn build(&self, path: &Path, options: &BuildOptions) -> Result<(), DatapackError> {
        let folder = self.compile()?;
        folder.place(path, options.concurrent_writes)?;
        tracing::debug!(files = folder.flatten().len(), "built datapack");
        Ok(())
    }

    /// Compile the pack and write it to a zip archive.
    ///
    /// # Errors
    /// - If compiling fails, see [`Datapack::compile`]
    /// - If the archive cannot be written
    #[cfg(feature = "zip")]
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn build_zip(&self, path: &Path) -> Result<(), DatapackError> {
        self.compile()?.zip(path)?;
        Ok(())
    }
}

impl Default for Datapack {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FORMAT)
    }
}

fn generate_mcmeta(dp: &Datapack) -> Result<Option<VFile>, DatapackError> {
    let Some(description) = &dp.description else {
        return Ok(None);
    };

    let mut content = serde_json::json!({
        "pack": {
            "description": description,
            "pack_format": dp.pack_format
        }
    });
    if let Some(supported_formats) = &dp.supported_formats {
        content["pack"]["supported_formats"] = serde_json::json!({
            "min_inclusive": *supported_formats.start(),
            "max_inclusive": *supported_formats.end()
        });
    }

    serde_json::to_string_pretty(&content)
        .map(|text| Some(VFile::Text(text)))
        .map_err(|source| DatapackError::Serialize {
            filename: "pack.mcmeta".to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use crate::{
        datapack::command::{call, say},
        util::SameIdentity,
    };

    use super::*;

    fn text<'a>(folder: &'a VFolder, path: &str) -> &'a str {
        folder
            .get_file(path)
            .and_then(VFile::as_text)
            .unwrap_or_else(|| panic!("missing text file {path}"))
    }

    #[test]
    fn test_empty_pack() {
        let dp = Datapack::default();
        let folder = dp.compile().expect("failed to compile");

        assert_eq!(
            folder.paths(),
            vec![
                "data/cauldron/functions/load.mcfunction".to_string(),
                "data/minecraft/tags/functions/load.json".to_string(),
            ]
        );
        assert_eq!(
            text(&folder, "data/minecraft/tags/functions/load.json"),
            "{\n  \"values\": [\n    \"cauldron:load\"\n  ]\n}"
        );
        assert_eq!(
            text(&folder, "data/cauldron/functions/load.mcfunction"),
            "# Generated by cauldron\n\n# cauldron\n"
        );
    }

    #[test]
    fn test_unreferenced_resources_produce_no_file() {
        let dp = Datapack::default();
        let ns = dp.namespace("foo").expect("valid namespace");
        let _unused = ns.function("unused", |_| [say("never")]).expect("valid name");
        let _table = ns
            .loot_table("unused", || serde_json::json!({"pools": []}))
            .expect("valid name");
        let used = ns.function("used", |_| [say("always")]).expect("valid name");
        dp.add_tick(&used);

        let folder = dp.compile().expect("failed to compile");

        assert!(folder.contains_file("data/foo/functions/used.mcfunction"));
        assert!(!folder.contains_file("data/foo/functions/unused.mcfunction"));
        assert!(!folder.contains_file("data/foo/loot_tables/unused.json"));
    }

    #[test]
    fn test_shared_resource_written_once() {
        let dp = Datapack::default();
        let ns = dp.namespace("foo").expect("valid namespace");
        let shared = ns.function("shared", |_| [say("shared")]).expect("valid name");

        let callee = shared.clone();
        let caller = ns
            .function("caller", move |_| [call(&callee), call(&callee)])
            .expect("valid name");
        dp.add_tick(&caller);
        dp.add_tick(&shared);

        let queue = RegistrationQueue::default();
        let folder = dp.compile_with(&queue).expect("failed to compile");

        assert_eq!(
            text(&folder, "data/minecraft/tags/functions/tick.json"),
            "{\n  \"values\": [\n    \"foo:caller\",\n    \"foo:shared\"\n  ]\n}"
        );
        assert_eq!(
            text(&folder, "data/foo/functions/caller.mcfunction"),
            "# Generated by cauldron\n\nfunction foo:shared\n\nfunction foo:shared\n"
        );
        assert_eq!(
            queue
                .snapshot()
                .iter()
                .filter(|resource| resource.same_identity(&shared.reference()))
                .count(),
            1
        );
    }

    #[test]
    fn test_empty_tag_produces_no_file() {
        let dp = Datapack::default();
        let ns = dp.namespace("foo").expect("valid namespace");
        let empty = ns.tag(TagType::Function, "empty").expect("valid name");

        let tag = empty.clone();
        let caller = ns
            .function("caller", move |_| [call(&tag)])
            .expect("valid name");
        dp.add_load(&caller);

        let folder = dp.compile().expect("failed to compile");

        assert!(!folder.contains_file(empty.filename()));
        assert!(
            text(&folder, "data/foo/functions/caller.mcfunction").contains("function #foo:empty")
        );
    }

    #[test]
    fn test_duplicate_filename() {
        let dp = Datapack::default();
        let ns = dp.namespace("foo").expect("valid namespace");
        let first = ns.function("dup", |_| [say("first")]).expect("valid name");
        let second = ns.function("dup", |_| [say("second")]).expect("valid name");
        dp.add_tick(&first);
        dp.add_tick(&second);

        match dp.compile() {
            Err(DatapackError::DuplicateFilename { filename }) => {
                assert_eq!(filename, "data/foo/functions/dup.mcfunction");
            }
            other => panic!("expected duplicate filename error, got {other:?}"),
        }
    }

    #[test]
    fn test_objectives_in_load_function() {
        let dp = Datapack::default();
        let ns = dp.namespace("ns").expect("valid namespace");
        let scores = ns.scoreboard([("score", "dummy")]);

        assert_eq!(scores["score"].to_string(), "ns.score");
        assert_eq!(
            dp.objectives(),
            vec!["scoreboard objectives add ns.score dummy".to_string()]
        );

        let folder = dp.compile().expect("failed to compile");
        assert_eq!(
            text(&folder, "data/cauldron/functions/load.mcfunction"),
            "# Generated by cauldron\n\n# cauldron\n\nscoreboard objectives add ns.score dummy\n"
        );
    }

    #[test]
    fn test_objectives_declared_after_first_build() {
        let dp = Datapack::default();
        let ns = dp.namespace("ns").expect("valid namespace");
        ns.scoreboard([("early", "dummy")]);

        let first = dp.compile().expect("failed to compile");
        assert!(!text(&first, "data/cauldron/functions/load.mcfunction").contains("ns.late"));

        ns.scoreboard([("late", "dummy")]);
        let second = dp.compile().expect("failed to compile");
        assert_eq!(
            text(&second, "data/cauldron/functions/load.mcfunction"),
            "# Generated by cauldron\n\n# cauldron\n\n\
             scoreboard objectives add ns.early dummy\n\n\
             scoreboard objectives add ns.late dummy\n"
        );
    }

    #[test]
    fn test_invalid_namespace() {
        let dp = Datapack::default();

        for name in ["Bad Name", "..", "../escaped", "a/b"] {
            assert!(
                matches!(dp.namespace(name), Err(DatapackError::InvalidName { .. })),
                "{name} should be rejected"
            );
        }
        assert!(matches!(dp.namespace(""), Err(DatapackError::MissingName)));
    }

    #[test]
    fn test_concurrent_compiles() {
        let dp = Datapack::default();
        let ns = dp.namespace("foo").expect("valid namespace");
        let shared = ns.function("shared", |_| [say("shared")]).expect("valid name");
        let callee = shared.clone();
        let main = ns
            .function("main", move |_| [call(&callee)])
            .expect("valid name");
        dp.add_tick(&main);
        let expected = dp.compile().expect("failed to compile");

        let results = std::thread::scope(|scope| {
            let handles = (0..4)
                .map(|_| scope.spawn(|| (0..16).map(|_| dp.compile()).collect::<Vec<_>>()))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .flat_map(|handle| handle.join().expect("compile thread panicked"))
                .collect::<Vec<_>>()
        });

        assert_eq!(results.len(), 64);
        for result in results {
            assert_eq!(result.expect("failed to compile"), expected);
        }
    }

    #[test]
    fn test_repeated_builds_identical() {
        let dp = Datapack::default().with_description("twice");
        let ns = dp.namespace("foo").expect("valid namespace");
        let table = ns
            .loot_table("drops", || serde_json::json!({"pools": []}))
            .expect("valid name");
        let main = ns
            .function("main", move |_| {
                [Command::new("loot spawn ~ ~ ~ loot").arg(table.reference())]
            })
            .expect("valid name");
        dp.add_tick(&main);

        let first = dp.compile().expect("failed to compile");
        let second = dp.compile().expect("failed to compile");

        assert_eq!(first, second);
        assert!(first.contains_file("data/foo/loot_tables/drops.json"));
        assert_eq!(
            text(&first, "data/foo/functions/main.mcfunction"),
            "# Generated by cauldron\n\nloot spawn ~ ~ ~ loot foo:drops\n"
        );
    }

    #[test]
    fn test_latest_format_layout() {
        let dp = Datapack::new(Datapack::LATEST_FORMAT);
        let ns = dp.namespace("foo").expect("valid namespace");
        let main = ns.function("main", |_| [say("hi")]).expect("valid name");
        dp.add_tick(&main);

        let folder = dp.compile().expect("failed to compile");

        assert_eq!(
            folder.paths(),
            vec![
                "data/cauldron/function/load.mcfunction".to_string(),
                "data/foo/function/main.mcfunction".to_string(),
                "data/minecraft/tags/function/load.json".to_string(),
                "data/minecraft/tags/function/tick.json".to_string(),
            ]
        );
    }

    #[test]
    fn test_generate_mcmeta() {
        assert!(generate_mcmeta(&Datapack::default())
            .expect("failed to generate")
            .is_none());

        let dp = Datapack::new(Datapack::LATEST_FORMAT)
            .with_description("foo")
            .with_supported_formats(15..=48);
        let mcmeta = generate_mcmeta(&dp)
            .expect("failed to generate")
            .expect("description is set");

        let json = serde_json::from_str::<serde_json::Value>(
            mcmeta.as_text().expect("mcmeta should be text not binary"),
        )
        .expect("invalid json");

        let pack = json
            .as_object()
            .expect("mcmeta is not object")
            .get("pack")
            .expect("no pack value")
            .as_object()
            .expect("mcmeta pack is not object");
        assert_eq!(
            pack.get("description")
                .expect("no key pack.description")
                .as_str(),
            Some("foo")
        );
        assert_eq!(
            pack.get("pack_format")
                .expect("no key pack.pack_format")
                .as_u64(),
            Some(u64::from(Datapack::LATEST_FORMAT))
        );
        assert_eq!(
            pack.get("supported_formats")
                .expect("no key pack.supported_formats"),
            &serde_json::json!({"min_inclusive": 15, "max_inclusive": 48})
        );
    }

    #[cfg(feature = "fs_access")]
    #[test]
    fn test_build_to_directory() {
        let template_dir = tempfile::tempdir().expect("error creating tempdir");
        std::fs::write(template_dir.path().join("README.txt"), "template")
            .expect("error writing template");
        let target_dir = tempfile::tempdir().expect("error creating tempdir");

        let dp = Datapack::default()
            .with_description("My datapack")
            .with_template_folder(template_dir.path())
            .expect("error reading template folder");
        let ns = dp.namespace("foo").expect("valid namespace");
        let main = ns.function("main", |_| [say("hi")]).expect("valid name");
        dp.add_tick(&main);

        dp.build(target_dir.path(), &BuildOptions::default())
            .expect("failed to build");

        let root = target_dir.path();
        assert_eq!(
            std::fs::read_to_string(root.join("data/foo/functions/main.mcfunction"))
                .expect("function not written"),
            "# Generated by cauldron\n\nsay hi\n"
        );
        assert!(root.join("data/minecraft/tags/functions/tick.json").is_file());
        assert!(root.join("pack.mcmeta").is_file());
        assert!(root.join("README.txt").is_file());
    }

    #[cfg(feature = "fs_access")]
    #[test]
    fn test_failed_build_writes_nothing() {
        let target_dir = tempfile::tempdir().expect("error creating tempdir");
        let dp = Datapack::default();
        let ns = dp.namespace("foo").expect("valid namespace");
        dp.add_tick(ns.function("dup", |_| [say("a")]).expect("valid name"));
        dp.add_tick(ns.function("dup", |_| [say("b")]).expect("valid name"));

        let output = target_dir.path().join("out");
        assert!(dp.build(&output, &BuildOptions::default()).is_err());
        assert!(!output.exists());
    }

    #[cfg(feature = "zip")]
    #[test]
    fn test_build_zip() {
        let target_dir = tempfile::tempdir().expect("error creating tempdir");
        let archive = target_dir.path().join("pack.zip");

        Datapack::default()
            .with_description("zipped")
            .build_zip(&archive)
            .expect("failed to build zip");

        assert!(archive.is_file());
    }
}
