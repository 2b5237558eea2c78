/// The controlled body and the per-frame intent that drives it.

use super::rect::Rect;
use super::tile::TILE;

/// Body edge length in pixels (two tiles).
pub const BODY_SIZE: i32 = 2 * TILE;

/// Frame input, already decoded from whatever device produced it.
/// Movement and jump are level-triggered (held); `cancel` is an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub interact: bool,
    pub cancel: bool,
}

impl Intent {
    /// Field-wise OR, for combining input devices.
    pub fn merge(self, other: Intent) -> Intent {
        Intent {
            left: self.left || other.left,
            right: self.right || other.right,
            jump: self.jump || other.jump,
            interact: self.interact || other.interact,
            cancel: self.cancel || other.cancel,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    pub rect: Rect,
    pub vx: f32,
    pub vy: f32,
    pub on_ground: bool,
}

impl Body {
    /// New body at rest with its top-left corner at `spawn`.
    pub fn new(spawn: (i32, i32)) -> Self {
        Body {
            rect: Rect::new(spawn.0, spawn.1, BODY_SIZE, BODY_SIZE),
            vx: 0.0,
            vy: 0.0,
            on_ground: false,
        }
    }

    pub fn stop(&mut self) {
        self.vx = 0.0;
        self.vy = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_fieldwise_or() {
        let kb = Intent { left: true, cancel: true, ..Intent::default() };
        let pad = Intent { jump: true, ..Intent::default() };
        assert_eq!(kb.merge(pad), Intent { left: true, jump: true, cancel: true, ..Intent::default() });
        assert_eq!(Intent::default().merge(Intent::default()), Intent::default());
    }

    #[test]
    fn new_body_is_at_rest() {
        let b = Body::new((32, 48));
        assert_eq!(b.rect, Rect::new(32, 48, BODY_SIZE, BODY_SIZE));
        assert!(!b.on_ground);
        assert_eq!((b.vx, b.vy), (0.0, 0.0));
    }
}
