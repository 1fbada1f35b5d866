use super::{nbt, Command, Part};

/// Target of a `data` command.
#[derive(Debug, Clone, PartialEq)]
pub enum DataTarget {
    /// A block entity at a position.
    Block(Part),
    /// An entity.
    Entity(Part),
    /// A command storage.
    Storage(Part),
}

impl DataTarget {
    fn append_to(self, cmd: Command) -> Command {
        match self {
            Self::Block(pos) => cmd.arg("block").arg(pos),
            Self::Entity(target) => cmd.arg("entity").arg(target),
            Self::Storage(id) => cmd.arg("storage").arg(id),
        }
    }
}

/// How `data modify` changes the target path.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyOperation {
    Append,
    Insert(i32),
    Merge,
    Prepend,
    Set,
}

/// Where `data modify` takes its value from.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Copy from another target's path.
    From(DataTarget, String),
    /// Use a literal value.
    Value(serde_json::Value),
}

/// `data get <target> [<path>] [<scale>]`
#[must_use]
pub fn data_get(target: DataTarget, path: Option<&str>, scale: Option<f64>) -> Command {
    target
        .append_to(Command::new("data get"))
        .opt_arg(path)
        .opt_arg(scale)
}

/// `data merge <target> <nbt>`
#[must_use]
pub fn data_merge(target: DataTarget, data: &serde_json::Value) -> Command {
    target.append_to(Command::new("data merge")).arg(nbt(data))
}

/// `data remove <target> <path>`
#[must_use]
pub fn data_remove(target: DataTarget, path: &str) -> Command {
    target.append_to(Command::new("data remove")).arg(path)
}

/// `data modify <target> <path> <operation> (from <source> <path>|value <value>)`
#[must_use]
pub fn data_modify(
    target: DataTarget,
    path: &str,
    operation: ModifyOperation,
    source: DataSource,
) -> Command {
    let cmd = target.append_to(Command::new("data modify")).arg(path);
    let cmd = match operation {
        ModifyOperation::Append => cmd.arg("append"),
        ModifyOperation::Insert(index) => cmd.arg("insert").arg(index),
        ModifyOperation::Merge => cmd.arg("merge"),
        ModifyOperation::Prepend => cmd.arg("prepend"),
        ModifyOperation::Set => cmd.arg("set"),
    };
    match source {
        DataSource::From(source, source_path) => source
            .append_to(cmd.arg("from"))
            .arg(source_path),
        DataSource::Value(value) => cmd.arg("value").arg(nbt(&value)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_data_commands() {
        assert_eq!(
            data_get(DataTarget::Entity("@s".into()), Some("Pos[0]"), Some(10.0)).to_string(),
            "data get entity @s Pos[0] 10"
        );
        assert_eq!(
            data_merge(DataTarget::Block("~ ~ ~".into()), &json!({"Lock": "key"})).to_string(),
            r#"data merge block ~ ~ ~ {"Lock":"key"}"#
        );
        assert_eq!(
            data_remove(DataTarget::Storage("foo:bar".into()), "list").to_string(),
            "data remove storage foo:bar list"
        );
        assert_eq!(
            data_modify(
                DataTarget::Storage("foo:bar".into()),
                "list",
                ModifyOperation::Insert(0),
                DataSource::From(DataTarget::Entity("@p".into()), "Inventory".to_string())
            )
            .to_string(),
            "data modify storage foo:bar list insert 0 from entity @p Inventory"
        );
        assert_eq!(
            data_modify(
                DataTarget::Entity("@s".into()),
                "Glowing",
                ModifyOperation::Set,
                DataSource::Value(json!(true))
            )
            .to_string(),
            "data modify entity @s Glowing set value true"
        );
    }
}
