use crate::actor::{ActorId, Position};

/// Everything an actor can ask the room driver to do on its behalf.
///
/// Commands are data; nothing happens until the driver's apply phase
/// picks them up. `Answer`, `Pickup` and `Damaged` double as delivery
/// notices handed back to an actor through [`crate::actor::Actor::command`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Relocate to `to`, or interact with whatever occupies it.
    Move { to: Position },
    /// Strike the actor carrying `target` as its tag.
    Attack { target: String },
    /// Open a modal prompt over the room.
    Dialogue { message: String, options: Vec<String> },
    /// A prompt choice routed back to the actor that opened it.
    Answer { choice: i32, label: String },
    /// Remove the issuing actor and credit `collector` with the item.
    Pickup { collector: String },
    /// Damage notice delivered to the struck actor.
    Damaged { amount: i32, from: String },
    /// Deliberate no-op; the turn still advances.
    Wait,
}

impl Command {
    /// Movement resolves before every other command in a turn.
    pub fn is_move(&self) -> bool {
        matches!(self, Self::Move { .. })
    }

    /// Stable name for log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Move { .. } => "move",
            Self::Attack { .. } => "attack",
            Self::Dialogue { .. } => "dialogue",
            Self::Answer { .. } => "answer",
            Self::Pickup { .. } => "pickup",
            Self::Damaged { .. } => "damaged",
            Self::Wait => "wait",
        }
    }
}

/// A command addressed to a specific actor for the apply phase.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorCommand {
    pub actor: ActorId,
    pub command: Command,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_move_counts_as_movement() {
        assert!(Command::Move {
            to: Position::new(1, 2, 0)
        }
        .is_move());
        assert!(!Command::Wait.is_move());
        assert!(!Command::Attack {
            target: "rat".into()
        }
        .is_move());
    }

    #[test]
    fn moves_sort_ahead_of_everything_else() {
        let mut pending = vec![
            ActorCommand {
                actor: ActorId(1),
                command: Command::Wait,
            },
            ActorCommand {
                actor: ActorId(2),
                command: Command::Move {
                    to: Position::new(0, 0, 0),
                },
            },
            ActorCommand {
                actor: ActorId(3),
                command: Command::Attack {
                    target: "rat".into(),
                },
            },
            ActorCommand {
                actor: ActorId(4),
                command: Command::Move {
                    to: Position::new(1, 0, 0),
                },
            },
        ];
        pending.sort_by_key(|queued| !queued.command.is_move());
        let order: Vec<u64> = pending.iter().map(|queued| queued.actor.0).collect();
        // stable: relative order inside each class is preserved
        assert_eq!(order, vec![2, 4, 1, 3]);
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            Command::Move {
                to: Position::new(0, 0, 0),
            }
            .kind(),
            Command::Wait.kind(),
            Command::Answer {
                choice: 0,
                label: String::new(),
            }
            .kind(),
        ];
        assert_eq!(kinds, ["move", "wait", "answer"]);
    }
}
