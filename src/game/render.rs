//! Gizmo drawing of the playfield.
//!
//! The engine works in playfield pixels (origin top-left, y down). Bevy's
//! world is centred with y up, so everything passes through
//! [`to_world`] on the way to the screen.

use bevy::{color::palettes::css, prelude::*};

use super::{
    aim::PreviewSegment,
    hex::{BUBBLE_RADIUS, CANVAS_HEIGHT, CANVAS_WIDTH},
    session::{Session, SessionSystems},
    shooter::{BARREL_LENGTH, SHOOTER_ORIGIN, SHOOTER_Y},
};

pub(super) fn plugin(app: &mut App) {
    app.insert_resource(ClearColor(Color::srgb_u8(0x1a, 0x1a, 0x2e)));
    app.add_systems(
        Update,
        (draw_playfield, draw_bubbles, draw_shooter).after(SessionSystems),
    );
}

/// Where the queued bubble is shown, left of the shooter.
const QUEUED_PREVIEW: Vec2 = Vec2::new(50.0, SHOOTER_Y);

/// Playfield pixels to Bevy world coordinates.
pub fn to_world(p: Vec2) -> Vec2 {
    Vec2::new(p.x - CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 - p.y)
}

/// Bevy world coordinates to playfield pixels.
pub fn to_playfield(p: Vec2) -> Vec2 {
    Vec2::new(p.x + CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0 - p.y)
}

/// Draw the playfield border and the danger line.
fn draw_playfield(mut gizmos: Gizmos, session: Res<Session>) {
    gizmos.rect_2d(
        Isometry2d::from_translation(Vec2::ZERO),
        Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT),
        css::CORNFLOWER_BLUE,
    );

    let danger_y = session.config().danger_line_y;
    gizmos.line_2d(
        to_world(Vec2::new(0.0, danger_y)),
        to_world(Vec2::new(CANVAS_WIDTH, danger_y)),
        Color::srgba(1.0, 0.2, 0.2, 0.5),
    );
}

/// Draw placed bubbles and the projectile in flight.
fn draw_bubbles(mut gizmos: Gizmos, session: Res<Session>) {
    for bubble in session.grid().iter() {
        draw_bubble(&mut gizmos, bubble.pos(), bubble.color.to_color());
    }

    if let Some(projectile) = session.projectile() {
        draw_bubble(&mut gizmos, projectile.pos, projectile.color.to_color());
    }
}

/// Draw the barrel, loaded and queued bubbles, and the aim preview.
fn draw_shooter(mut gizmos: Gizmos, session: Res<Session>) {
    let shooter = session.shooter();
    let barrel_end = SHOOTER_ORIGIN + shooter.direction() * BARREL_LENGTH;
    gizmos.line_2d(to_world(SHOOTER_ORIGIN), to_world(barrel_end), css::WHITE);

    draw_bubble(&mut gizmos, QUEUED_PREVIEW, shooter.queued.to_color());

    // The loaded bubble leaves the barrel while a shot is in flight
    if !session.is_idle() {
        return;
    }
    if let Some(loaded) = shooter.loaded {
        draw_bubble(&mut gizmos, SHOOTER_ORIGIN, loaded.to_color());
    }
    for segment in session.preview_path() {
        draw_dashed(&mut gizmos, &segment);
    }
}

fn draw_bubble(gizmos: &mut Gizmos, pos: Vec2, color: Color) {
    gizmos.circle_2d(
        Isometry2d::from_translation(to_world(pos)),
        BUBBLE_RADIUS,
        color,
    );
}

/// Draw a dashed segment (5px on, 5px off).
fn draw_dashed(gizmos: &mut Gizmos, segment: &PreviewSegment) {
    const DASH: f32 = 5.0;
    let dir = segment.direction();
    let length = segment.length();

    let mut travelled = 0.0;
    while travelled < length {
        let dash_end = (travelled + DASH).min(length);
        gizmos.line_2d(
            to_world(segment.start + dir * travelled),
            to_world(segment.start + dir * dash_end),
            Color::srgba(1.0, 1.0, 1.0, 0.5),
        );
        travelled += DASH * 2.0;
    }
}
