use burrow_engine::{Frame, FrameError, Input, Transform};
use tracing::debug;

use crate::actor::{
    tile_transform, Actor, ActorBody, CombatActor, CombatSheet, DrawMode, Position, Stats, TILE_PX,
};
use crate::commands::Command;
use crate::room::{RoomView, World};
use crate::sprite::SpriteStack;

const NPC_COLOR: [u8; 4] = [160, 70, 60, 255];
const NPC_DEPTH: u32 = 2;
const NPC_STATS: Stats = Stats::new(6, 2, 0);
const NPC_EXP_VALUE: i32 = 25;

const AGGRO_RADIUS: i32 = 3;
const PROVOKED_RADIUS: i32 = 8;
const PATROL_STRIDE: i32 = 2;

/// Hostile wanderer. Patrols an east-west beat around its spawn tile,
/// chases its quarry inside the aggro radius and swings when adjacent.
/// Taking a hit widens the radius for the rest of its life.
pub struct Npc {
    body: ActorBody,
    combat: CombatSheet,
    quarry: String,
    home: Position,
    heading: i32,
    provoked: bool,
}

impl Npc {
    pub fn new(
        tag: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        quarry: impl Into<String>,
    ) -> Result<Self, FrameError> {
        let sprite = SpriteStack::solid(TILE_PX as u32, TILE_PX as u32, NPC_DEPTH, NPC_COLOR)?;
        Ok(Self {
            body: ActorBody::new(tag, name, position, sprite),
            combat: CombatSheet::new(NPC_STATS, 1, NPC_EXP_VALUE),
            quarry: quarry.into(),
            home: position,
            heading: 1,
            provoked: false,
        })
    }

    pub fn provoked(&self) -> bool {
        self.provoked
    }
}

/// One deterministic step, closing the x gap before the y gap.
fn step_toward(from: Position, to: Position) -> Position {
    if from.x != to.x {
        from.step((to.x - from.x).signum(), 0)
    } else {
        from.step(0, (to.y - from.y).signum())
    }
}

impl Actor for Npc {
    fn update(&mut self, view: &RoomView<'_>) -> Option<Command> {
        let here = self.body.position();
        if let Some(target) = view.actor_by_tag(&self.quarry) {
            let there = target.position();
            let distance = here.chebyshev(there);
            let radius = if self.provoked {
                PROVOKED_RADIUS
            } else {
                AGGRO_RADIUS
            };
            if distance == 1 {
                return Some(Command::Attack {
                    target: self.quarry.clone(),
                });
            }
            if distance <= radius {
                let to = step_toward(here, there);
                if view.is_open(to.x, to.y) {
                    return Some(Command::Move { to });
                }
                return None;
            }
        }
        // patrol a short beat around the spawn tile
        let mut to = here.step(self.heading, 0);
        if !view.is_open(to.x, to.y) || (to.x - self.home.x).abs() > PATROL_STRIDE {
            self.heading = -self.heading;
            to = here.step(self.heading, 0);
        }
        if view.is_open(to.x, to.y) {
            return Some(Command::Move { to });
        }
        None
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
        if let Command::Damaged { from, .. } = command {
            if !self.provoked {
                debug!(tag = %self.body.tag(), %from, "provoked");
            }
            self.provoked = true;
        }
    }

    fn input(&mut self, _input: Input) -> bool {
        false
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
