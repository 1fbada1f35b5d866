//! Cauldron is a library for generating Minecraft datapacks from Rust code.
//!
//! Resources (functions, tags and loot tables) are created through a
//! [`Namespace`](datapack::Namespace) and only end up in the generated pack
//! when something references them. The [`Datapack`](datapack::Datapack)
//! starts at its `minecraft:tick` and `minecraft:load` tags and follows every
//! reference from there.

#![warn(
    missing_docs,
    missing_debug_implementations,
    nonstandard_style,
    clippy::complexity,
    clippy::style,
    clippy::suspicious
)]
#![deny(unsafe_code)]

pub mod datapack;
mod error;
pub mod util;
pub mod virtual_fs;

#[doc(inline)]
pub use error::DatapackError;

/// Prelude with the types and command helpers needed to describe a datapack.
pub mod prelude {
    #[doc(inline)]
    pub use crate::datapack::{
        command::*,
        loot_table::{LootEntry, LootFunction, LootPool, LootTableData},
        tag::{TagType, TagValue},
        Datapack, Function, LootTable, Namespace, Objective, ResourceRef, Scoreboard, Selector,
        Tag,
    };
    #[doc(inline)]
    pub use crate::util::compile::BuildOptions;
    #[doc(inline)]
    pub use crate::DatapackError;
}
