use super::{Command, Part};

/// Where the items produced by `loot` go.
#[derive(Debug, Clone, PartialEq)]
pub enum LootTarget {
    /// Drop the items at a position.
    Spawn(Part),
    /// Give the items to players.
    Give(Part),
    /// Insert the items into a container at a position.
    Insert(Part),
    /// Replace slots of entities.
    ReplaceEntity {
        /// The entities whose slots are replaced.
        targets: Part,
        /// First slot to replace.
        slot: String,
        /// Number of slots to replace.
        count: Option<u32>,
    },
    /// Replace slots of a container.
    ReplaceBlock {
        /// Position of the container.
        position: Part,
        /// First slot to replace.
        slot: String,
        /// Number of slots to replace.
        count: Option<u32>,
    },
}

/// Where the items produced by `loot` come from.
#[derive(Debug, Clone, PartialEq)]
pub enum LootSource {
    /// Fish with the given loot table.
    Fish {
        /// Loot table to roll.
        table: Part,
        /// Fishing location.
        position: Part,
        /// Tool used, `mainhand`, `offhand` or an item.
        tool: Option<Part>,
    },
    /// Roll a loot table.
    Loot(Part),
    /// Drops of killing an entity.
    Kill(Part),
    /// Drops of mining a block.
    Mine {
        /// Position of the block.
        position: Part,
        /// Tool used, `mainhand`, `offhand` or an item.
        tool: Option<Part>,
    },
}

/// A `loot` command waiting for its source.
#[derive(Debug, Clone, PartialEq)]
pub struct LootCommand {
    prefix: Command,
}

/// Start a `loot` command.
#[must_use]
pub fn loot(target: LootTarget) -> LootCommand {
    let cmd = Command::new("loot");
    let prefix = match target {
        LootTarget::Spawn(position) => cmd.arg("spawn").arg(position),
        LootTarget::Give(targets) => cmd.arg("give").arg(targets),
        LootTarget::Insert(position) => cmd.arg("insert").arg(position),
        LootTarget::ReplaceEntity {
            targets,
            slot,
            count,
        } => cmd
            .arg("replace entity")
            .arg(targets)
            .arg(slot)
            .opt_arg(count),
        LootTarget::ReplaceBlock {
            position,
            slot,
            count,
        } => cmd
            .arg("replace block")
            .arg(position)
            .arg(slot)
            .opt_arg(count),
    };
    LootCommand { prefix }
}

impl LootCommand {
    /// Finish the command with its source.
    #[must_use]
    pub fn source(self, source: LootSource) -> Command {
        let cmd = self.prefix;
        match source {
            LootSource::Fish {
                table,
                position,
                tool,
            } => cmd.arg("fish").arg(table).arg(position).opt_arg(tool),
            LootSource::Loot(table) => cmd.arg("loot").arg(table),
            LootSource::Kill(target) => cmd.arg("kill").arg(target),
            LootSource::Mine { position, tool } => cmd.arg("mine").arg(position).opt_arg(tool),
        }
    }
}
