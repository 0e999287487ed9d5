use burrow_engine::{Frame, FrameError, Input, Transform};
use tracing::debug;

use crate::actor::{tile_transform, Actor, ActorBody, DrawMode, Position, TILE_PX};
use crate::commands::Command;
use crate::room::{RoomView, World};
use crate::sprite::SpriteStack;

const SIGN_COLOR: [u8; 4] = [150, 120, 70, 255];
const LOOT_COLOR: [u8; 4] = [210, 180, 70, 255];
const PROP_DEPTH: u32 = 2;
const LOOT_SIZE: u32 = 8;

/// What a prop does when bumped.
#[derive(Debug, Clone, PartialEq)]
pub enum PropKind {
    /// Opens a dialogue prompt with `text` and `options`.
    Sign { text: String, options: Vec<String> },
    /// Vanishes into the pocket of whoever bumped it.
    Loot,
}

/// Inert scenery that only reacts to being bumped. Props have no
/// combat capability and take no turns of their own.
pub struct Prop {
    body: ActorBody,
    kind: PropKind,
    last_answer: Option<(i32, String)>,
}

impl Prop {
    pub fn sign(
        tag: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        text: impl Into<String>,
        options: Vec<String>,
    ) -> Result<Self, FrameError> {
        let sprite = SpriteStack::solid(TILE_PX as u32, TILE_PX as u32, PROP_DEPTH, SIGN_COLOR)?;
        Ok(Self {
            body: ActorBody::new(tag, name, position, sprite),
            kind: PropKind::Sign {
                text: text.into(),
                options,
            },
            last_answer: None,
        })
    }

    pub fn loot(
        tag: impl Into<String>,
        name: impl Into<String>,
        position: Position,
    ) -> Result<Self, FrameError> {
        let sprite = SpriteStack::solid(LOOT_SIZE, LOOT_SIZE, 1, LOOT_COLOR)?;
        Ok(Self {
            body: ActorBody::new(tag, name, position, sprite),
            kind: PropKind::Loot,
            last_answer: None,
        })
    }

    pub fn kind(&self) -> &PropKind {
        &self.kind
    }

    /// The most recent dialogue answer delivered to this prop.
    pub fn last_answer(&self) -> Option<&(i32, String)> {
        self.last_answer.as_ref()
    }
}

impl Actor for Prop {
    fn update(&mut self, _view: &RoomView<'_>) -> Option<Command> {
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
        if let Command::Answer { choice, label } = command {
            debug!(tag = %self.body.tag(), choice, %label, "dialogue answered");
            self.last_answer = Some((*choice, label.clone()));
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
        match &self.kind {
            PropKind::Sign { text, options } => Command::Dialogue {
                message: text.clone(),
                options: options.clone(),
            },
            PropKind::Loot => Command::Pickup {
                collector: other.tag().to_string(),
            },
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}
