mod actor;
mod actors;
mod commands;
mod room;
mod sprite;

use burrow_engine::{Frame, FrameError, Input, Transform};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::actor::Position;
use crate::actors::{Npc, Player, Prop};
use crate::room::{Room, RoomMap, Tile, World};

const SCREEN_WIDTH: u32 = 320;
const SCREEN_HEIGHT: u32 = 180;

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Frame(#[from] FrameError),
}

fn main() {
    init_tracing();
    info!("=== Burrow Startup ===");
    if let Err(err) = run_demo() {
        error!(%err, "demo failed");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// Headless scripted walkthrough of one room: read a sign, answer its
/// prompt, pocket a coin, swing at the air. Each scripted event is one
/// routed input followed by one turn and a full redraw.
fn run_demo() -> Result<(), DemoError> {
    let mut map = RoomMap::filled(16, 10, Tile::Floor);
    for x in 0..16 {
        map.set_tile(x, 0, Tile::Wall);
        map.set_tile(x, 9, Tile::Wall);
    }
    for y in 0..10 {
        map.set_tile(0, y, Tile::Wall);
        map.set_tile(15, y, Tile::Wall);
    }

    let mut room = Room::new(map);
    let player = room.spawn(Box::new(Player::new(Position::new(2, 2, 0))?));
    room.set_focus(Some(player));
    room.spawn(Box::new(Npc::new(
        "rat",
        "Tunnel Rat",
        Position::new(10, 5, 0),
        "player",
    )?));
    room.spawn(Box::new(Prop::sign(
        "signpost",
        "Signpost",
        Position::new(4, 2, 0),
        "welcome to the burrow. mind the rats.",
        vec!["thanks".to_string(), "who wrote this?".to_string()],
    )?));
    room.spawn(Box::new(Prop::loot(
        "coin",
        "Copper Coin",
        Position::new(3, 4, 0),
    )?));

    let mut world = World::new();
    let mut screen = Frame::new(SCREEN_WIDTH, SCREEN_HEIGHT)?;

    let script = [
        Input::right(),  // step toward the sign
        Input::right(),  // bump it; a prompt opens
        Input::down(),   // prompt: move the selection
        Input::Confirm,  // prompt: answer, prompt closes
        Input::down(),
        Input::down(),   // walk onto the coin
        Input::Confirm,  // swing at whatever is adjacent
    ];
    for input in script {
        if !room.route_input(input) {
            info!(?input, "input not consumed");
        }
        room.tick(&mut world);
        screen.fill([12, 12, 16, 255]);
        room.draw(&mut screen, Transform::default());
    }

    if let Some(actor) = room.actor(player) {
        let position = actor.position();
        info!(
            x = position.x,
            y = position.y,
            turn = world.turn(),
            actors = room.actor_count(),
            "demo finished"
        );
    }
    Ok(())
}
