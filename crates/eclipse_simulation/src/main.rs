//! Headless Eclipse Contract simulation
//!
//! Runs the arena without rendering: one player, a few enemies and ghouls,
//! printing an actor summary every 100 ticks.

use std::path::PathBuf;

use bevy::prelude::*;
use clap::Parser;

use eclipse_simulation::world::{spawn_enemy, spawn_ghoul, spawn_player};
use eclipse_simulation::{
    create_simulation_app, log_error, snapshot_actors, step, ActorRole, EnemyKind,
    SimulationConfig,
};

#[derive(Parser, Debug)]
#[command(name = "eclipse_simulation", about = "Headless arena simulation")]
struct Args {
    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1000)]
    ticks: u64,

    /// JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 2)]
    skeletons: u32,

    #[arg(long, default_value_t = 1)]
    goblins: u32,

    #[arg(long, default_value_t = 2)]
    ghouls: u32,
}

fn main() {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => match SimulationConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("{}: {}", path.display(), err));
                eprintln!("error: {}", err);
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    println!(
        "Starting Eclipse headless simulation (seed: {}, ticks: {})",
        config.seed, args.ticks
    );

    let mut app = create_simulation_app(config);
    populate(app.world_mut(), &args);

    for tick in 1..=args.ticks {
        step(&mut app);

        if tick % 100 == 0 {
            print_summary(tick, app.world_mut());
        }
    }

    println!("Simulation complete!");
}

fn populate(world: &mut World, args: &Args) {
    let player_position = Vec2::new(1000.0, 700.0);
    spawn_player(world, player_position);

    for i in 0..args.skeletons {
        let x = 300.0 + i as f32 * 150.0;
        spawn_enemy(world, EnemyKind::Skeleton, Vec2::new(x, 400.0));
    }
    for i in 0..args.goblins {
        let x = 1500.0 + i as f32 * 120.0;
        spawn_enemy(world, EnemyKind::Goblin, Vec2::new(x, 900.0));
    }

    let behaviors = ["follow", "aggressive", "commandable", "guard"];
    for i in 0..args.ghouls {
        let behavior = behaviors[i as usize % behaviors.len()];
        let offset = Vec2::new(-60.0 - i as f32 * 30.0, 40.0);
        spawn_ghoul(world, behavior, player_position + offset);
    }
}

fn print_summary(tick: u64, world: &mut World) {
    let snapshots = snapshot_actors(world);
    let count = |role: ActorRole| snapshots.iter().filter(|s| s.role == role).count();

    println!(
        "Tick {}: {} enemies, {} units",
        tick,
        count(ActorRole::Enemy),
        count(ActorRole::Unit)
    );

    if let Some(player) = snapshots.iter().find(|s| s.role == ActorRole::Player) {
        println!(
            "  player hp {}/{} at ({:.0}, {:.0})",
            player.hp, player.max_hp, player.x, player.y
        );
    }
}
