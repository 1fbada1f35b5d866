//! Loot tables and the data they are built from.

use std::{fmt::Display, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::DatapackError;

use super::ResourceRef;

type Builder = Box<dyn Fn() -> serde_json::Result<serde_json::Value> + Send + Sync>;

/// A loot table resource.
///
/// The table description is built when the content is requested. Clones
/// refer to the same loot table.
#[derive(Clone)]
pub struct LootTable {
    inner: Arc<LootTableInner>,
}

struct LootTableInner {
    namespace: String,
    name: String,
    filename: String,
    builder: Builder,
}

impl LootTable {
    pub(in crate::datapack) fn new<F, T>(
        namespace: &str,
        name: &str,
        filename: String,
        builder: F,
    ) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
        T: Serialize,
    {
        Self {
            inner: Arc::new(LootTableInner {
                namespace: namespace.to_string(),
                name: name.to_string(),
                filename,
                builder: Box::new(move || serde_json::to_value(builder())),
            }),
        }
    }

    /// Get the namespace of the loot table.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.inner.namespace
    }

    /// Get the name of the loot table.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the path of the loot table file, relative to the pack root.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.inner.filename
    }

    /// Get a reference to the loot table, for use in commands.
    #[must_use]
    pub fn reference(&self) -> ResourceRef {
        ResourceRef::LootTable(self.clone())
    }

    /// Check whether both handles refer to the same loot table.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Compile the loot table into the text of its file.
    ///
    /// # Errors
    /// - If the description cannot be serialized
    pub fn content(&self) -> Result<String, DatapackError> {
        (self.inner.builder)()
            .and_then(|value| serde_json::to_string_pretty(&value))
            .map_err(|source| DatapackError::Serialize {
                filename: self.inner.filename.clone(),
                source,
            })
    }
}

impl Display for LootTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.inner.namespace, self.inner.name)
    }
}

impl std::fmt::Debug for LootTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LootTable")
            .field("namespace", &self.inner.namespace)
            .field("name", &self.inner.name)
            .field("filename", &self.inner.filename)
            .finish_non_exhaustive()
    }
}

impl PartialEq for LootTable {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

/// Description of a loot table: pools of weighted entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootTableData {
    /// Context the table is used in, e.g. `minecraft:entity`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Pools rolled independently of each other.
    #[serde(default)]
    pub pools: Vec<LootPool>,
}

impl LootTableData {
    /// Create an empty table of the given type.
    #[must_use]
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            pools: Vec::new(),
        }
    }

    /// Add a pool.
    #[must_use]
    pub fn with_pool(mut self, pool: LootPool) -> Self {
        self.pools.push(pool);
        self
    }
}

/// A pool of entries, rolled a number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootPool {
    /// Number of rolls.
    pub rolls: u32,
    /// Additional rolls per point of luck.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus_rolls: Option<f32>,
    /// Entries to pick from.
    #[serde(default)]
    pub entries: Vec<LootEntry>,
}

impl LootPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new(rolls: u32) -> Self {
        Self {
            rolls,
            bonus_rolls: None,
            entries: Vec::new(),
        }
    }

    /// Add an entry.
    #[must_use]
    pub fn with_entry(mut self, entry: LootEntry) -> Self {
        self.entries.push(entry);
        self
    }
}

/// A weighted entry of a pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    /// Entry type, e.g. `minecraft:item`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Id of the item, tag or table the entry refers to.
    pub name: String,
    /// Relative chance of the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    /// Item modifiers applied to the result.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<LootFunction>,
}

impl LootEntry {
    /// Create a `minecraft:item` entry.
    #[must_use]
    pub fn item(name: &str) -> Self {
        Self {
            kind: "minecraft:item".to_string(),
            name: name.to_string(),
            weight: None,
            functions: Vec::new(),
        }
    }

    /// Set the weight.
    #[must_use]
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Add an item modifier.
    #[must_use]
    pub fn with_function(mut self, function: LootFunction) -> Self {
        self.functions.push(function);
        self
    }
}

/// An item modifier of a loot entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootFunction {
    /// Id of the modifier, e.g. `minecraft:set_count`.
    pub function: String,
    /// Arguments of the modifier.
    #[serde(flatten)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

impl LootFunction {
    /// Create a modifier without arguments.
    #[must_use]
    pub fn new(function: &str) -> Self {
        Self {
            function: function.to_string(),
            arguments: serde_json::Map::new(),
        }
    }

    /// Set an argument.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.to_string(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_content_is_pretty_json() {
        let table = LootTable::new(
            "foo",
            "cow",
            "data/foo/loot_tables/cow.json".to_string(),
            || {
                LootTableData::new("minecraft:entity").with_pool(
                    LootPool::new(1)
                        .with_entry(LootEntry::item("minecraft:beef").with_weight(3))
                        .with_entry(
                            LootEntry::item("minecraft:leather").with_function(
                                LootFunction::new("minecraft:set_count").with("count", 2),
                            ),
                        ),
                )
            },
        );

        let content = table.content().expect("failed to compile loot table");
        assert!(content.contains("\n  \"type\": \"minecraft:entity\""));
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&content).expect("invalid json"),
            json!({
                "type": "minecraft:entity",
                "pools": [{
                    "rolls": 1,
                    "entries": [
                        {"type": "minecraft:item", "name": "minecraft:beef", "weight": 3},
                        {
                            "type": "minecraft:item",
                            "name": "minecraft:leather",
                            "functions": [{"function": "minecraft:set_count", "count": 2}]
                        }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_raw_json_builder() {
        let table = LootTable::new(
            "foo",
            "raw",
            "data/foo/loot_tables/raw.json".to_string(),
            || json!({"pools": []}),
        );

        assert_eq!(table.to_string(), "foo:raw");
        assert_eq!(
            table.content().expect("failed to compile loot table"),
            "{\n  \"pools\": []\n}"
        );
    }
}
