use std::sync::mpsc;

use burrow_engine::{Color, Frame, Input, Prompt, PromptCallback, Rect, Transform};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::actor::{tile_transform, Actor, ActorId, DrawMode, Position, Stats, TILE_PX};
use crate::commands::{ActorCommand, Command};

const PROMPT_WIDTH: u32 = 180;
const PROMPT_HEIGHT: u32 = 110;
const PROMPT_OFFSET_X: f32 = 12.0;
const PROMPT_OFFSET_Y: f32 = 12.0;
/// Floor of any attack that lands.
const MIN_ATTACK_DAMAGE: i32 = 1;

const FLOOR_COLOR: Color = [38, 41, 48, 255];
const WALL_COLOR: Color = [88, 74, 60, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Floor,
    Wall,
}

impl Tile {
    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomMapError {
    #[error("tile count {actual} does not match {width}x{height}")]
    TileCountMismatch {
        width: u32,
        height: u32,
        actual: usize,
    },
}

/// Row-major tile grid. Everything outside the grid is unwalkable.
#[derive(Debug, Clone)]
pub struct RoomMap {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl RoomMap {
    pub fn new(width: u32, height: u32, tiles: Vec<Tile>) -> Result<Self, RoomMapError> {
        if tiles.len() != (width * height) as usize {
            return Err(RoomMapError::TileCountMismatch {
                width,
                height,
                actual: tiles.len(),
            });
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    pub fn filled(width: u32, height: u32, tile: Tile) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.index(x, y).map(|index| self.tiles[index])
    }

    /// Writes a tile; out-of-bounds coordinates are ignored.
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(index) = self.index(x, y) {
            self.tiles[index] = tile;
        }
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.tile(x, y).is_some_and(Tile::is_walkable)
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some((y as u32 * self.width + x as u32) as usize)
    }
}

/// Monotonic turn clock shared with actors during interaction.
#[derive(Debug, Default)]
pub struct World {
    turn: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    fn advance(&mut self) {
        self.turn += 1;
    }
}

struct ActorSlot {
    id: ActorId,
    actor: Box<dyn Actor>,
}

/// Read access to the room an actor gets while taking its turn. During
/// the update sweep the acting actor itself is excluded.
pub struct RoomView<'a> {
    before: &'a [ActorSlot],
    after: &'a [ActorSlot],
    map: &'a RoomMap,
}

impl<'a> RoomView<'a> {
    pub fn map(&self) -> &RoomMap {
        self.map
    }

    pub fn actors(&self) -> impl Iterator<Item = (ActorId, &'a dyn Actor)> {
        self.before
            .iter()
            .chain(self.after.iter())
            .map(|slot| (slot.id, slot.actor.as_ref()))
    }

    pub fn actor(&self, id: ActorId) -> Option<&'a dyn Actor> {
        self.actors()
            .find(|(actor_id, _)| *actor_id == id)
            .map(|(_, actor)| actor)
    }

    pub fn actor_by_tag(&self, tag: &str) -> Option<&'a dyn Actor> {
        self.actors()
            .find(|(_, actor)| actor.tag() == tag)
            .map(|(_, actor)| actor)
    }

    /// Whoever stands on tile `(x, y)`, layers ignored.
    pub fn actor_at(&self, x: i32, y: i32) -> Option<&'a dyn Actor> {
        self.actors()
            .find(|(_, actor)| {
                let position = actor.position();
                position.x == x && position.y == y
            })
            .map(|(_, actor)| actor)
    }

    /// A tile an actor could move onto this turn.
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.map.is_walkable(x, y) && self.actor_at(x, y).is_none()
    }
}

/// Owns the actors in one room and drives the turn loop: update sweep,
/// queued-command apply, input routing and drawing.
pub struct Room {
    map: RoomMap,
    slots: Vec<ActorSlot>,
    next_id: u64,
    focus: Option<ActorId>,
    prompt: Option<Prompt>,
    prompt_tx: mpsc::Sender<ActorCommand>,
    prompt_rx: mpsc::Receiver<ActorCommand>,
}

impl Room {
    pub fn new(map: RoomMap) -> Self {
        let (prompt_tx, prompt_rx) = mpsc::channel();
        Self {
            map,
            slots: Vec::new(),
            next_id: 0,
            focus: None,
            prompt: None,
            prompt_tx,
            prompt_rx,
        }
    }

    pub fn map(&self) -> &RoomMap {
        &self.map
    }

    pub fn spawn(&mut self, actor: Box<dyn Actor>) -> ActorId {
        let id = ActorId(self.next_id);
        self.next_id += 1;
        debug!(id = id.0, tag = %actor.tag(), "actor spawned");
        self.slots.push(ActorSlot { id, actor });
        id
    }

    pub fn remove(&mut self, id: ActorId) -> Option<Box<dyn Actor>> {
        let index = self.index_of(id)?;
        if self.focus == Some(id) {
            self.focus = None;
        }
        let slot = self.slots.remove(index);
        debug!(id = id.0, tag = %slot.actor.tag(), "actor removed");
        Some(slot.actor)
    }

    pub fn actor(&self, id: ActorId) -> Option<&dyn Actor> {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| slot.actor.as_ref())
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut dyn Actor> {
        let slot = self.slots.iter_mut().find(|slot| slot.id == id)?;
        Some(slot.actor.as_mut())
    }

    pub fn actor_count(&self) -> usize {
        self.slots.len()
    }

    pub fn set_focus(&mut self, focus: Option<ActorId>) {
        self.focus = focus;
    }

    pub fn focus(&self) -> Option<ActorId> {
        self.focus
    }

    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Full view including every actor; the update sweep builds its own
    /// per-actor views instead.
    pub fn view(&self) -> RoomView<'_> {
        RoomView {
            before: &self.slots,
            after: &[],
            map: &self.map,
        }
    }

    /// Routes one input event. An open prompt captures everything;
    /// otherwise the focused actor gets first refusal and clicks fall
    /// back to hover picking. Returns `false` if nothing consumed it.
    ///
    /// Click coordinates are room-space pixels: callers drawing under a
    /// non-identity camera must unapply it before routing.
    pub fn route_input(&mut self, input: Input) -> bool {
        if let Some(prompt) = self.prompt.as_mut() {
            if prompt.input(input) {
                debug!("prompt resolved");
                self.prompt = None;
            }
            return true;
        }
        if let Some(id) = self.focus {
            if let Some(actor) = self.actor_mut(id) {
                if actor.input(input) {
                    return true;
                }
            }
        }
        if let Input::Click { x, y } = input {
            self.point_at(x, y);
            return true;
        }
        trace!(?input, "input not consumed");
        false
    }

    /// Hover pick at a room-space pixel (pre-camera, like clicks). At
    /// most one actor is hovered afterwards; later spawns draw on top,
    /// so they win ties.
    pub fn point_at(&mut self, x: f32, y: f32) -> Option<ActorId> {
        let px = x.round() as i32;
        let py = y.round() as i32;
        let mut winner = None;
        for slot in self.slots.iter().rev() {
            if footprint(slot.actor.as_ref()).contains(px, py) {
                winner = Some(slot.id);
                break;
            }
        }
        for slot in &mut self.slots {
            slot.actor.set_hovered(Some(slot.id) == winner);
        }
        winner
    }

    /// Runs one turn: every actor updates against a view of the others,
    /// prompt answers are drained, then commands apply with movement
    /// first so positions settle before anything reads them.
    pub fn tick(&mut self, world: &mut World) {
        let mut pending: Vec<ActorCommand> = Vec::new();
        for index in 0..self.slots.len() {
            let (before, rest) = self.slots.split_at_mut(index);
            let Some((slot, after)) = rest.split_first_mut() else {
                continue;
            };
            let view = RoomView {
                before,
                after,
                map: &self.map,
            };
            if let Some(command) = slot.actor.update(&view) {
                trace!(tag = %slot.actor.tag(), kind = command.kind(), "command queued");
                pending.push(ActorCommand {
                    actor: slot.id,
                    command,
                });
            }
        }
        while let Ok(queued) = self.prompt_rx.try_recv() {
            pending.push(queued);
        }
        pending.sort_by_key(|queued| !queued.command.is_move());
        for queued in pending {
            self.apply(world, queued);
        }
        world.advance();
    }

    /// Applies one queued command immediately.
    pub fn apply(&mut self, world: &World, queued: ActorCommand) {
        let ActorCommand { actor: id, command } = queued;
        match command {
            Command::Move { to } => self.apply_move(world, id, to),
            Command::Attack { target } => self.apply_attack(id, &target),
            Command::Dialogue { message, options } => self.open_dialogue(id, message, options),
            Command::Pickup { collector } => self.apply_pickup(id, &collector),
            Command::Answer { .. } | Command::Damaged { .. } => {
                if let Some(actor) = self.actor_mut(id) {
                    actor.command(&command);
                }
            }
            Command::Wait => trace!(id = id.0, "wait"),
        }
    }

    pub fn draw(&self, screen: &mut Frame, camera: Transform) {
        self.draw_map(screen, camera);
        let view = self.view();
        for slot in &self.slots {
            let mode = if slot.actor.hovered() {
                DrawMode::Highlighted
            } else {
                DrawMode::Normal
            };
            slot.actor.draw(screen, &view, camera, mode);
        }
        if let Some(prompt) = &self.prompt {
            prompt.draw(screen, camera);
        }
    }

    fn draw_map(&self, screen: &mut Frame, camera: Transform) {
        for y in 0..self.map.height() as i32 {
            for x in 0..self.map.width() as i32 {
                let Some(tile) = self.map.tile(x, y) else {
                    continue;
                };
                let color = match tile {
                    Tile::Floor => FLOOR_COLOR,
                    Tile::Wall => WALL_COLOR,
                };
                let (px, py) = camera.apply((x * TILE_PX) as f32, (y * TILE_PX) as f32);
                screen.fill_rect(
                    px.round() as i32,
                    py.round() as i32,
                    TILE_PX,
                    TILE_PX,
                    color,
                );
            }
        }
    }

    fn index_of(&self, id: ActorId) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    /// Moving onto an occupied tile does not relocate; it asks the
    /// occupant to interact with the mover and applies the result.
    fn apply_move(&mut self, world: &World, id: ActorId, to: Position) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if !self.map.is_walkable(to.x, to.y) {
            trace!(id = id.0, x = to.x, y = to.y, "move blocked by map");
            return;
        }
        let occupant = self.slots.iter().position(|slot| {
            let position = slot.actor.position();
            position.x == to.x && position.y == to.y
        });
        if let Some(occupant_index) = occupant {
            if occupant_index == index {
                return;
            }
            let follow_up = {
                let (before, rest) = self.slots.split_at_mut(occupant_index);
                let Some((slot, after)) = rest.split_first_mut() else {
                    return;
                };
                let view = RoomView {
                    before,
                    after,
                    map: &self.map,
                };
                let Some(initiator) = view.actor(id) else {
                    return;
                };
                debug!(tag = %slot.actor.tag(), other = %initiator.tag(), "interaction");
                ActorCommand {
                    actor: slot.id,
                    command: slot.actor.interact(world, &view, initiator),
                }
            };
            self.apply(world, follow_up);
            return;
        }
        let slot = &mut self.slots[index];
        trace!(tag = %slot.actor.tag(), x = to.x, y = to.y, "move");
        slot.actor.set_position(to);
    }

    fn apply_attack(&mut self, attacker_id: ActorId, target: &str) {
        let Some(attacker_index) = self.index_of(attacker_id) else {
            return;
        };
        let Some(victim_index) = self
            .slots
            .iter()
            .position(|slot| slot.actor.tag() == target)
        else {
            trace!(target, "attack target not present");
            return;
        };
        if victim_index == attacker_index {
            return;
        }
        let Some(attack) = self.slots[attacker_index]
            .actor
            .combat()
            .map(|combat| combat.current_stats().attack)
        else {
            trace!(id = attacker_id.0, "attacker has no combat stats");
            return;
        };
        let attacker_tag = self.slots[attacker_index].actor.tag().to_string();

        let victim = &mut self.slots[victim_index];
        let victim_id = victim.id;
        let Some(combat) = victim.actor.combat_mut() else {
            trace!(target, "target cannot take damage");
            return;
        };
        let amount = (attack - combat.current_stats().defense).max(MIN_ATTACK_DAMAGE);
        combat.apply_damage(Stats::new(-amount, 0, 0));
        let remaining = combat.current_stats().health;
        let reward = combat.exp_value();
        debug!(attacker = %attacker_tag, target, amount, remaining, "attack landed");
        victim.actor.command(&Command::Damaged {
            amount,
            from: attacker_tag,
        });
        if remaining == 0 {
            if let Some(fallen) = self.remove(victim_id) {
                debug!(name = %fallen.name(), "actor defeated");
            }
            if let Some(combat) = self
                .actor_mut(attacker_id)
                .and_then(|actor| actor.combat_mut())
            {
                combat.add_exp(reward);
            }
        }
    }

    /// The envelope actor for a pickup is the item itself; `collector`
    /// names who bumped it and receives the notice.
    fn apply_pickup(&mut self, item_id: ActorId, collector: &str) {
        let Some(item) = self.remove(item_id) else {
            return;
        };
        let notice = Command::Pickup {
            collector: collector.to_string(),
        };
        if let Some(slot) = self
            .slots
            .iter_mut()
            .find(|slot| slot.actor.tag() == collector)
        {
            slot.actor.command(&notice);
        }
        debug!(item = %item.name(), collector, "item collected");
    }

    /// Opens the modal dialogue prompt. Choices come back as `Answer`
    /// commands through the room's channel and reach `speaker` on the
    /// tick they are made.
    fn open_dialogue(&mut self, speaker: ActorId, message: String, options: Vec<String>) {
        if self.prompt.is_some() {
            warn!("dialogue requested while a prompt is already open");
            return;
        }
        let sink = self.prompt_tx.clone();
        let callback: PromptCallback = Box::new(move |choice, label| {
            let answer = ActorCommand {
                actor: speaker,
                command: Command::Answer {
                    choice,
                    label: label.to_string(),
                },
            };
            // send only fails when the room is gone; nothing to do then
            let _ = sink.send(answer);
            true
        });
        match Prompt::new(PROMPT_WIDTH, PROMPT_HEIGHT, options, message, callback, true) {
            Ok(mut prompt) => {
                prompt.set_offset(PROMPT_OFFSET_X, PROMPT_OFFSET_Y);
                debug!(speaker = speaker.0, "dialogue prompt opened");
                self.prompt = Some(prompt);
            }
            Err(err) => warn!(%err, "dialogue prompt rejected"),
        }
    }
}

fn footprint(actor: &dyn Actor) -> Rect {
    let sprite = actor.sprite_stack();
    let origin = tile_transform(actor.position());
    let lift = sprite.layer_count().saturating_sub(1) as i32;
    Rect::new(
        origin.tx.round() as i32,
        origin.ty.round() as i32 - lift,
        sprite.width() as i32,
        sprite.footprint_height() as i32,
    )
}

#[cfg(test)]
mod tests {
    use burrow_engine::CANCEL_INDEX;

    use super::*;
    use crate::actors::{Npc, Player, Prop};

    fn walled_map(width: u32, height: u32) -> RoomMap {
        let mut map = RoomMap::filled(width, height, Tile::Floor);
        for x in 0..width as i32 {
            map.set_tile(x, 0, Tile::Wall);
            map.set_tile(x, height as i32 - 1, Tile::Wall);
        }
        for y in 0..height as i32 {
            map.set_tile(0, y, Tile::Wall);
            map.set_tile(width as i32 - 1, y, Tile::Wall);
        }
        map
    }

    fn room_with_player(at: Position) -> (Room, ActorId) {
        let mut room = Room::new(walled_map(12, 10));
        let player = room
            .spawn(Box::new(Player::new(at).expect("player")));
        room.set_focus(Some(player));
        (room, player)
    }

    #[test]
    fn map_rejects_wrong_tile_count() {
        let err = RoomMap::new(3, 3, vec![Tile::Floor; 8]).expect_err("must fail");
        assert_eq!(
            err,
            RoomMapError::TileCountMismatch {
                width: 3,
                height: 3,
                actual: 8
            }
        );
    }

    #[test]
    fn outside_the_map_is_unwalkable() {
        let map = RoomMap::filled(4, 4, Tile::Floor);
        assert!(map.is_walkable(0, 0));
        assert!(!map.is_walkable(-1, 0));
        assert!(!map.is_walkable(0, 4));
    }

    #[test]
    fn spawn_hands_out_distinct_ids() {
        let (mut room, player) = room_with_player(Position::new(2, 2, 0));
        let rat = room.spawn(Box::new(
            Npc::new("rat", "Rat", Position::new(5, 5, 0), "player").expect("npc"),
        ));
        assert_ne!(player, rat);
        assert_eq!(room.actor_count(), 2);
        assert_eq!(room.actor(rat).expect("rat").tag(), "rat");
    }

    #[test]
    fn directional_input_moves_the_focused_player() {
        let (mut room, player) = room_with_player(Position::new(2, 2, 0));
        let mut world = World::new();
        assert!(room.route_input(Input::right()));
        room.tick(&mut world);
        assert_eq!(
            room.actor(player).expect("player").position(),
            Position::new(3, 2, 0)
        );
        assert_eq!(world.turn(), 1);
    }

    #[test]
    fn walls_block_movement() {
        let (mut room, player) = room_with_player(Position::new(1, 1, 0));
        let mut world = World::new();
        room.route_input(Input::up());
        room.tick(&mut world);
        assert_eq!(
            room.actor(player).expect("player").position(),
            Position::new(1, 1, 0)
        );
    }

    #[test]
    fn bumping_an_npc_asks_it_to_interact() {
        let (mut room, player) = room_with_player(Position::new(2, 2, 0));
        room.spawn(Box::new(
            Npc::new("rat", "Rat", Position::new(3, 2, 0), "player").expect("npc"),
        ));
        let mut world = World::new();
        room.route_input(Input::right());
        room.tick(&mut world);
        // the rat counter-attacked instead of being displaced
        let p = room.actor(player).expect("player");
        assert_eq!(p.position(), Position::new(2, 2, 0));
        let health = p.combat().expect("combat").current_stats().health;
        assert!(health < p.combat().expect("combat").base_stats().health);
    }

    #[test]
    fn attack_damage_has_a_floor_of_one() {
        let (mut room, player) = room_with_player(Position::new(2, 2, 0));
        let rat = room.spawn(Box::new(
            Npc::new("rat", "Rat", Position::new(3, 2, 0), "player").expect("npc"),
        ));
        // blunt the player's attack to zero so the raw formula is non-positive
        if let Some(combat) = room.actor_mut(player).and_then(|a| a.combat_mut()) {
            combat.apply_damage(Stats::new(0, -100, 0));
        }
        let world = World::new();
        let before = room
            .actor(rat)
            .and_then(|a| a.combat())
            .map(|c| c.current_stats().health)
            .expect("rat health");
        room.apply(
            &world,
            ActorCommand {
                actor: player,
                command: Command::Attack {
                    target: "rat".into(),
                },
            },
        );
        let after = room
            .actor(rat)
            .and_then(|a| a.combat())
            .map(|c| c.current_stats().health)
            .expect("rat health");
        assert_eq!(before - after, 1);
    }

    #[test]
    fn defeat_removes_the_victim_and_rewards_the_attacker() {
        let (mut room, player) = room_with_player(Position::new(2, 2, 0));
        let rat = room.spawn(Box::new(
            Npc::new("rat", "Rat", Position::new(3, 2, 0), "player").expect("npc"),
        ));
        room.set_focus(Some(rat));
        let world = World::new();
        // swing until the rat drops
        for _ in 0..20 {
            room.apply(
                &world,
                ActorCommand {
                    actor: player,
                    command: Command::Attack {
                        target: "rat".into(),
                    },
                },
            );
            if room.actor(rat).is_none() {
                break;
            }
        }
        assert!(room.actor(rat).is_none());
        assert_eq!(room.focus(), None);
        let exp = room
            .actor(player)
            .and_then(|a| a.combat())
            .map(|c| c.exp())
            .expect("player exp");
        assert!(exp > 0);
    }

    #[test]
    fn bumping_loot_collects_it() {
        let (mut room, player) = room_with_player(Position::new(2, 2, 0));
        let coin = room.spawn(Box::new(
            Prop::loot("coin", "Copper Coin", Position::new(3, 2, 0)).expect("coin"),
        ));
        let mut world = World::new();
        room.route_input(Input::right());
        room.tick(&mut world);
        assert!(room.actor(coin).is_none());
        // the collector stayed put; only the item left the room
        assert_eq!(
            room.actor(player).expect("player").position(),
            Position::new(2, 2, 0)
        );
    }

    #[test]
    fn bumping_a_sign_opens_a_prompt() {
        let (mut room, _player) = room_with_player(Position::new(2, 2, 0));
        room.spawn(Box::new(
            Prop::sign(
                "sign",
                "Signpost",
                Position::new(3, 2, 0),
                "hello",
                vec!["ok".into(), "no".into()],
            )
            .expect("sign"),
        ));
        let mut world = World::new();
        room.route_input(Input::right());
        room.tick(&mut world);
        assert!(room.has_prompt());
        let prompt = room.prompt().expect("prompt");
        assert_eq!(prompt.message(), "hello");
        assert_eq!(prompt.items(), ["ok", "no"]);
    }

    #[test]
    fn open_prompt_captures_all_input() {
        let (mut room, player) = room_with_player(Position::new(2, 2, 0));
        room.spawn(Box::new(
            Prop::sign(
                "sign",
                "Signpost",
                Position::new(3, 2, 0),
                "hello",
                vec!["ok".into(), "no".into()],
            )
            .expect("sign"),
        ));
        let mut world = World::new();
        room.route_input(Input::right());
        room.tick(&mut world);
        assert!(room.has_prompt());
        // a direction now moves the prompt selection, not the player
        assert!(room.route_input(Input::down()));
        room.tick(&mut world);
        assert_eq!(
            room.actor(player).expect("player").position(),
            Position::new(2, 2, 0)
        );
        assert_eq!(room.prompt().expect("prompt").selected(), 1);
    }

    #[test]
    fn prompt_answers_reach_the_speaker_the_same_tick() {
        let (mut room, _player) = room_with_player(Position::new(2, 2, 0));
        let sign = room.spawn(Box::new(
            Prop::sign(
                "sign",
                "Signpost",
                Position::new(3, 2, 0),
                "hello",
                vec!["ok".into(), "no".into()],
            )
            .expect("sign"),
        ));
        let mut world = World::new();
        room.route_input(Input::right());
        room.tick(&mut world);
        room.route_input(Input::down());
        room.route_input(Input::Confirm);
        assert!(!room.has_prompt());
        room.tick(&mut world);
        let answered = room
            .actor(sign)
            .and_then(|actor| actor.as_any().downcast_ref::<Prop>())
            .and_then(|sign| sign.last_answer().cloned());
        assert_eq!(answered, Some((1, "no".to_string())));
    }

    #[test]
    fn cancelled_prompts_answer_with_the_sentinel() {
        let (mut room, _player) = room_with_player(Position::new(2, 2, 0));
        let sign = room.spawn(Box::new(
            Prop::sign(
                "sign",
                "Signpost",
                Position::new(3, 2, 0),
                "hello",
                vec!["ok".into()],
            )
            .expect("sign"),
        ));
        let mut world = World::new();
        room.route_input(Input::right());
        room.tick(&mut world);
        room.route_input(Input::Cancel);
        assert!(!room.has_prompt());
        room.tick(&mut world);
        let answered = room
            .actor(sign)
            .and_then(|actor| actor.as_any().downcast_ref::<Prop>())
            .and_then(|sign| sign.last_answer().cloned());
        assert_eq!(answered, Some((CANCEL_INDEX, String::new())));
    }

    #[test]
    fn point_at_hovers_at_most_one_actor() {
        let (mut room, player) = room_with_player(Position::new(2, 2, 0));
        let rat = room.spawn(Box::new(
            Npc::new("rat", "Rat", Position::new(5, 5, 0), "player").expect("npc"),
        ));
        let hit = room.point_at((2 * TILE_PX + 3) as f32, (2 * TILE_PX + 3) as f32);
        assert_eq!(hit, Some(player));
        assert!(room.actor(player).expect("player").hovered());
        assert!(!room.actor(rat).expect("rat").hovered());
        // pointing at empty space clears the hover
        let miss = room.point_at(1.0, 1.0);
        assert_eq!(miss, None);
        assert!(!room.actor(player).expect("player").hovered());
    }

    #[test]
    fn draw_composites_without_panicking() {
        let (mut room, _player) = room_with_player(Position::new(2, 2, 0));
        room.spawn(Box::new(
            Prop::sign(
                "sign",
                "Signpost",
                Position::new(3, 2, 0),
                "hello",
                vec!["ok".into()],
            )
            .expect("sign"),
        ));
        let mut world = World::new();
        room.route_input(Input::right());
        room.tick(&mut world);
        let mut screen = Frame::new(320, 180).expect("screen");
        room.draw(&mut screen, Transform::translate(4.0, 4.0));
        // the prompt border lands on screen over the map
        assert_ne!(screen.pixel(16, 16), Some([0, 0, 0, 0]));
    }
}
