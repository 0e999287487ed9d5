use burrow_engine::{Frame, FrameError, Input, Transform};
use tracing::debug;

use crate::actor::{
    tile_transform, Actor, ActorBody, CombatActor, CombatSheet, DrawMode, Position, Stats, TILE_PX,
};
use crate::commands::Command;
use crate::room::{RoomView, World};
use crate::sprite::SpriteStack;

const PLAYER_COLOR: [u8; 4] = [70, 110, 200, 255];
const PLAYER_DEPTH: u32 = 3;
const PLAYER_STATS: Stats = Stats::new(10, 3, 1);

/// The focused, input-driven actor. Raw input is buffered and turned
/// into a command on the next update; one event, one turn.
pub struct Player {
    body: ActorBody,
    combat: CombatSheet,
    queued: Option<Input>,
    items_held: u32,
    hits_taken: i32,
    last_answer: Option<(i32, String)>,
}

impl Player {
    pub fn new(position: Position) -> Result<Self, FrameError> {
        let sprite = SpriteStack::solid(TILE_PX as u32, TILE_PX as u32, PLAYER_DEPTH, PLAYER_COLOR)?;
        Ok(Self {
            body: ActorBody::new("player", "Burrower", position, sprite),
            combat: CombatSheet::new(PLAYER_STATS, 1, 0),
            queued: None,
            items_held: 0,
            hits_taken: 0,
            last_answer: None,
        })
    }

    pub fn items_held(&self) -> u32 {
        self.items_held
    }

    pub fn hits_taken(&self) -> i32 {
        self.hits_taken
    }

    pub fn last_answer(&self) -> Option<&(i32, String)> {
        self.last_answer.as_ref()
    }
}

impl Actor for Player {
    fn update(&mut self, view: &RoomView<'_>) -> Option<Command> {
        match self.queued.take()? {
            Input::Direction { dx, dy } => Some(Command::Move {
                to: self.body.position().step(dx, dy),
            }),
            Input::Confirm => {
                // swing at the first adjacent actor that can take a hit
                let here = self.body.position();
                view.actors()
                    .find(|(_, actor)| {
                        actor.combat().is_some() && here.chebyshev(actor.position()) == 1
                    })
                    .map(|(_, actor)| Command::Attack {
                        target: actor.tag().to_string(),
                    })
            }
            _ => None,
        }
    }

    fn draw(&self, surface: &mut Frame, _view: &RoomView<'_>, camera: Transform, mode: DrawMode) {
        self.body
            .sprite()
            .draw(surface, camera.concat(tile_transform(self.body.position())), mode);
    }

    fn position(&self) -> Position {
        self.body.position()
    }

    fn set_position(&mut self, position: Position) {
        self.body.set_position(position);
    }

    fn command(&mut self, command: &Command) {
        match command {
            Command::Damaged { amount, from } => {
                self.hits_taken += amount;
                debug!(amount, %from, "player hit");
            }
            Command::Pickup { .. } => {
                self.items_held += 1;
                debug!(items = self.items_held, "item pocketed");
            }
            Command::Answer { choice, label } => {
                self.last_answer = Some((*choice, label.clone()));
            }
            _ => {}
        }
    }

    fn input(&mut self, input: Input) -> bool {
        match input {
            Input::Direction { .. } | Input::Confirm => {
                self.queued = Some(input);
                true
            }
            _ => false,
        }
    }

    fn set_hovered(&mut self, hovered: bool) {
        self.body.set_hovered(hovered);
    }

    fn hovered(&self) -> bool {
        self.body.hovered()
    }

    fn tag(&self) -> &str {
        self.body.tag()
    }

    fn set_tag(&mut self, tag: &str) {
        self.body.set_tag(tag);
    }

    fn name(&self) -> &str {
        self.body.name()
    }

    fn set_name(&mut self, name: &str) {
        self.body.set_name(name);
    }

    fn sprite_stack(&self) -> &SpriteStack {
        self.body.sprite()
    }

    fn interact(&mut self, _world: &World, _view: &RoomView<'_>, other: &dyn Actor) -> Command {
        // shoved by something that can fight: shove back
        if other.combat().is_some() {
            Command::Attack {
                target: other.tag().to_string(),
            }
        } else {
            Command::Wait
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn combat(&self) -> Option<&dyn CombatActor> {
        Some(&self.combat)
    }

    fn combat_mut(&mut self) -> Option<&mut dyn CombatActor> {
        Some(&mut self.combat)
    }
}
