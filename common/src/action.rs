use serde::{Deserialize, Serialize};

use crate::models::Pos;

/// A player input applied to a running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "action")]
pub enum Action {
    #[serde(rename = "reveal")]
    Reveal { pos: Pos },
    #[serde(rename = "flag")]
    Flag { pos: Pos },
    #[serde(rename = "chord")]
    Chord { pos: Pos },
}

impl Action {
    pub fn pos(&self) -> Pos {
        match *self {
            Action::Reveal { pos } | Action::Flag { pos } | Action::Chord { pos } => pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_uses_tagged_representation() {
        let action = Action::Flag {
            pos: Pos { x: 2, y: 5 },
        };
        let json = serde_json::to_string(&action).unwrap();
        assert_eq!(json, r#"{"action":"flag","pos":{"x":2,"y":5}}"#);

        let parsed: Action = serde_json::from_str(r#"{"action":"chord","pos":{"x":1,"y":1}}"#).unwrap();
        assert_eq!(parsed.pos(), Pos { x: 1, y: 1 });
    }
}
