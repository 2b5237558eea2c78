/// Body physics: velocity integration and two-pass AABB resolution.
///
/// ## Frame order
///
///   1. `apply_intent`     : horizontal speed from input, jump impulse
///   2. `apply_gravity`    : accelerate down, clamp at terminal speed
///   3. `move_and_collide` : horizontal pass, then vertical pass
///   4. `clamp_to_world`   : left / right / top backstop (no bottom)
///
/// ## Resolution rules
///
/// Horizontal moves the whole delta at once. Vertical walks one pixel at a
/// time so a thin or fast hazard tip can never be skipped over.
/// In both passes lethal hitboxes are tested before solids: touching a tip
/// ends the frame with a death signal and no further resolution.
///
/// Physics never resets anything. The caller decides what death means.

use crate::config::PhysicsConfig;

use super::entity::{Body, Intent};
use super::rect::Rect;

pub fn apply_intent(body: &mut Body, intent: &Intent, cfg: &PhysicsConfig) {
    body.vx = 0.0;
    if intent.left {
        body.vx -= cfg.move_speed;
    }
    if intent.right {
        body.vx += cfg.move_speed;
    }
    if intent.jump && body.on_ground {
        body.vy = -cfg.jump_velocity;
        body.on_ground = false;
    }
}

pub fn apply_gravity(body: &mut Body, cfg: &PhysicsConfig) {
    body.vy = (body.vy + cfg.gravity).min(cfg.max_fall);
}

/// Move the body against `solids`. Returns true on lethal contact.
pub fn move_and_collide(body: &mut Body, solids: &[Rect], lethal: &[Rect]) -> bool {
    // ── Horizontal ──
    body.rect.x += body.vx.round() as i32;
    if touches_any(&body.rect, lethal) {
        return true;
    }
    for s in solids {
        if body.rect.overlaps(s) {
            if body.vx > 0.0 {
                body.rect.set_right(s.left());
            } else if body.vx < 0.0 {
                body.rect.x = s.right();
            }
        }
    }

    // ── Vertical ──
    let dy = body.vy.round() as i32;
    let step = if dy > 0 { 1 } else { -1 };
    let mut grounded = false;
    for _ in 0..dy.abs() {
        body.rect.y += step;
        if touches_any(&body.rect, lethal) {
            return true;
        }
        if let Some(s) = solids.iter().find(|s| body.rect.overlaps(s)) {
            if step > 0 {
                body.rect.set_bottom(s.top());
                grounded = true;
            } else {
                body.rect.y = s.bottom();
            }
            body.vy = 0.0;
            break;
        }
    }
    body.on_ground = grounded;
    false
}

/// Keep the body inside the world on every side but the bottom.
pub fn clamp_to_world(body: &mut Body, world_w: i32) {
    if body.rect.left() < 0 {
        body.rect.x = 0;
    }
    if body.rect.right() > world_w {
        body.rect.set_right(world_w);
    }
    if body.rect.top() < 0 {
        body.rect.y = 0;
    }
}

/// One full physics frame. Returns true on lethal contact, in which case
/// the world clamp is skipped.
pub fn step_body(
    body: &mut Body,
    intent: &Intent,
    solids: &[Rect],
    lethal: &[Rect],
    world_w: i32,
    cfg: &PhysicsConfig,
) -> bool {
    apply_intent(body, intent, cfg);
    apply_gravity(body, cfg);
    if move_and_collide(body, solids, lethal) {
        return true;
    }
    clamp_to_world(body, world_w);
    false
}

#[inline]
fn touches_any(rect: &Rect, hitboxes: &[Rect]) -> bool {
    hitboxes.iter().any(|h| rect.overlaps(h))
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
