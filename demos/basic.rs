use std::path::Path;

// import the prelude to get all the necessary structs
use cauldron::prelude::*;

fn main() -> Result<(), DatapackError> {
    // create a new datapack
    let dp = Datapack::new(15)
        .with_description("Cows drop more leather")
        .with_supported_formats(15..=20);

    // get the namespace "demo"
    let ns = dp.namespace("demo")?;

    // declare objectives, created by the load function of the pack
    let scores = ns.scoreboard([("kills", "playerKillCount"), ("timer", "dummy")]);
    let timer = scores["timer"].clone();

    // a loot table is only written if a command references it
    let drops = ns.loot_table("cow", || {
        LootTableData::new("minecraft:entity").with_pool(
            LootPool::new(1)
                .with_entry(LootEntry::item("minecraft:beef").with_weight(3))
                .with_entry(
                    LootEntry::item("minecraft:leather")
                        .with_function(LootFunction::new("minecraft:set_count").with("count", 2)),
                ),
        )
    })?;

    let cows = ns.selector("@e", [("type", "minecraft:cow")]);
    let reward = ns.function("reward", move |_| {
        [
            say("Extra loot!"),
            loot(LootTarget::Spawn("~ ~ ~".into()))
                .source(LootSource::Loot(drops.reference().into())),
        ]
    })?;

    // functions can refer to themselves, e.g. to reschedule
    let tick = ns.function("tick", move |this| {
        [
            scoreboard_players_add("@a", &timer, 1),
            execute()
                .as_at(cows.with([("tag", "lucky")]))
                .when(
                    Condition::score_matches("@p", &timer, "100..")
                        & !Condition::block("~ ~-1 ~", "minecraft:water"),
                )
                .run(&reward),
            schedule(this, "20t", false),
        ]
    })?;
    dp.add_tick(&tick);

    // the pack only contains what is reachable from the tick and load tags
    dp.build(Path::new("./dist"), &BuildOptions::default())?;

    Ok(())
}
