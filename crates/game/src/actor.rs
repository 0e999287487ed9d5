use burrow_engine::{Frame, Input, Transform};
use tracing::debug;

use crate::commands::Command;
use crate::room::{RoomView, World};
use crate::sprite::SpriteStack;

/// Tile edge length in screen pixels.
pub const TILE_PX: i32 = 16;
/// Vertical pixels each z layer lifts a sprite off its tile.
pub const LAYER_LIFT_PX: i32 = 4;

/// Experience needed per level is `level * EXP_PER_LEVEL`; the surplus
/// past a threshold rolls into the next level.
pub const EXP_PER_LEVEL: i32 = 100;

const LEVEL_HEALTH_GAIN: i32 = 2;
const LEVEL_ATTACK_GAIN: i32 = 1;
const LEVEL_DEFENSE_GAIN: i32 = 1;

/// Tile-grid placement. `z` only affects drawing, never adjacency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// One grid step; the layer is kept.
    pub fn step(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z,
        }
    }

    /// Chessboard distance on the tile grid, layers ignored.
    pub fn chebyshev(self, other: Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Screen-space placement of a tile position.
pub fn tile_transform(position: Position) -> Transform {
    Transform::translate(
        (position.x * TILE_PX) as f32,
        (position.y * TILE_PX - position.z * LAYER_LIFT_PX) as f32,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    Normal,
    Highlighted,
}

/// Handle the room driver hands out at spawn; never reused within a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

/// Anything that takes a turn in a room.
///
/// Actors never touch each other directly. `update` and `interact`
/// return a [`Command`] and the driver applies it; the only legal
/// relocation path is the driver calling `set_position`.
pub trait Actor {
    /// Called once per turn, before any command from that turn applies.
    fn update(&mut self, view: &RoomView<'_>) -> Option<Command>;

    /// Draws the actor at its tile under `camera`. Pure rendering;
    /// `view` is read access for presentation decisions only.
    fn draw(&self, surface: &mut Frame, view: &RoomView<'_>, camera: Transform, mode: DrawMode);

    fn position(&self) -> Position;

    fn set_position(&mut self, position: Position);

    /// Out-of-band delivery of a command addressed to this actor.
    fn command(&mut self, command: &Command);

    /// Offers a raw input event; `true` claims it.
    fn input(&mut self, input: Input) -> bool;

    fn set_hovered(&mut self, hovered: bool);

    fn hovered(&self) -> bool;

    /// Stable identifier other actors and commands refer to this one by.
    fn tag(&self) -> &str;

    fn set_tag(&mut self, tag: &str);

    /// Display name; free to change without breaking references.
    fn name(&self) -> &str;

    fn set_name(&mut self, name: &str);

    fn sprite_stack(&self) -> &SpriteStack;

    /// Another actor stepped onto this one's tile. The returned command
    /// is queued against `self`; `other` cannot be mutated from here.
    fn interact(&mut self, world: &World, view: &RoomView<'_>, other: &dyn Actor) -> Command;

    /// Escape hatch for callers that know the concrete type.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Combat capability query; `None` means this actor cannot fight
    /// or be fought.
    fn combat(&self) -> Option<&dyn CombatActor> {
        None
    }

    fn combat_mut(&mut self) -> Option<&mut dyn CombatActor> {
        None
    }
}

/// Flat combat numbers. A delta with negative fields subtracts when
/// applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
}

impl Stats {
    pub const fn new(health: i32, attack: i32, defense: i32) -> Self {
        Self {
            health,
            attack,
            defense,
        }
    }
}

pub trait CombatActor {
    fn base_stats(&self) -> Stats;

    fn current_stats(&self) -> Stats;

    /// Applies a delta to current stats. Each component clamps into
    /// `0..=base`, so neither damage nor buffs escape the base sheet.
    fn apply_damage(&mut self, delta: Stats);

    fn level(&self) -> i32;

    fn exp(&self) -> i32;

    /// Grants experience, levelling up while the running total crosses
    /// each threshold.
    fn add_exp(&mut self, amount: i32);

    /// Experience awarded to whoever defeats this actor.
    fn exp_value(&self) -> i32;
}

/// Stock [`CombatActor`] implementation concrete actors embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombatSheet {
    base: Stats,
    current: Stats,
    level: i32,
    exp: i32,
    exp_value: i32,
}

impl CombatSheet {
    pub fn new(base: Stats, level: i32, exp_value: i32) -> Self {
        Self {
            base,
            current: base,
            level: level.max(1),
            exp: 0,
            exp_value,
        }
    }

    fn exp_to_next(&self) -> i32 {
        self.level * EXP_PER_LEVEL
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.base.health += LEVEL_HEALTH_GAIN;
        self.base.attack += LEVEL_ATTACK_GAIN;
        self.base.defense += LEVEL_DEFENSE_GAIN;
        self.current.health = (self.current.health + LEVEL_HEALTH_GAIN).min(self.base.health);
        self.current.attack += LEVEL_ATTACK_GAIN;
        self.current.defense += LEVEL_DEFENSE_GAIN;
        debug!(level = self.level, "level up");
    }
}

impl CombatActor for CombatSheet {
    fn base_stats(&self) -> Stats {
        self.base
    }

    fn current_stats(&self) -> Stats {
        self.current
    }

    fn apply_damage(&mut self, delta: Stats) {
        self.current.health = (self.current.health + delta.health).clamp(0, self.base.health);
        self.current.attack = (self.current.attack + delta.attack).clamp(0, self.base.attack);
        self.current.defense = (self.current.defense + delta.defense).clamp(0, self.base.defense);
    }

    fn level(&self) -> i32 {
        self.level
    }

    fn exp(&self) -> i32 {
        self.exp
    }

    fn add_exp(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        self.exp += amount;
        while self.exp >= self.exp_to_next() {
            self.exp -= self.exp_to_next();
            self.level_up();
        }
    }

    fn exp_value(&self) -> i32 {
        self.exp_value
    }
}

/// Shared identity and placement state every concrete actor embeds and
/// forwards its [`Actor`] accessors to.
#[derive(Debug)]
pub struct ActorBody {
    tag: String,
    name: String,
    position: Position,
    hovered: bool,
    sprite: SpriteStack,
}

impl ActorBody {
    pub fn new(
        tag: impl Into<String>,
        name: impl Into<String>,
        position: Position,
        sprite: SpriteStack,
    ) -> Self {
        Self {
            tag: tag.into(),
            name: name.into(),
            position,
            hovered: false,
            sprite,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn set_tag(&mut self, tag: &str) {
        self.tag = tag.to_string();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn sprite(&self) -> &SpriteStack {
        &self.sprite
    }
}
