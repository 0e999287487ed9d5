mod npc;
mod player;
mod prop;

pub use npc::Npc;
pub use player::Player;
pub use prop::{Prop, PropKind};
