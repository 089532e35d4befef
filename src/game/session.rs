//! Bevy glue for one running session.
//!
//! Input becomes `set_aim` / `fire` calls, the engine ticks once per frame,
//! and every landing is broadcast as a [`ShotResolved`] message.

use bevy::{prelude::*, window::PrimaryWindow};

use super::{
    bubble::{Bubble, BubbleColor},
    config::GameConfig,
    hex::GridCoord,
    projectile::Projectile,
    render::to_playfield,
    state::{BubbleGame, GameScore, GameStatus},
};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<GridCoord>();
    app.register_type::<Bubble>();
    app.register_type::<BubbleColor>();
    app.register_type::<Projectile>();
    app.register_type::<GameScore>();
    app.register_type::<GameStatus>();

    app.add_message::<ShotResolved>();

    app.add_systems(Startup, start_session);
    app.add_systems(
        Update,
        (
            restart_session,
            update_aim,
            handle_fire_input,
            advance_session,
            announce_shot_results,
        )
            .chain()
            .in_set(SessionSystems),
    );
}

/// System set for the input and tick systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSystems;

/// The running game.
#[derive(Resource, Debug, Deref, DerefMut)]
pub struct Session(pub BubbleGame);

/// Message sent when a projectile settles on the grid.
#[derive(Message, Debug, Clone)]
pub struct ShotResolved {
    pub coord: GridCoord,
    pub color: BubbleColor,
    pub popped: usize,
    pub dropped: usize,
    pub score_delta: u32,
    pub status: GameStatus,
}

fn start_session(mut commands: Commands) {
    commands.insert_resource(Session(BubbleGame::new(GameConfig::load())));
}

/// Start over with `R`, whether or not the current game has ended.
fn restart_session(keyboard_input: Res<ButtonInput<KeyCode>>, mut session: ResMut<Session>) {
    if keyboard_input.just_pressed(KeyCode::KeyR) {
        session.reset();
        info!("Session restarted");
    }
}

/// Update the aim from the pointer's horizontal position.
fn update_aim(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mut session: ResMut<Session>,
) {
    if !session.is_idle() {
        return;
    }
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    // Get cursor position in world coordinates
    let Some(cursor_pos) = window
        .cursor_position()
        .and_then(|p| camera.viewport_to_world_2d(camera_transform, p).ok())
    else {
        return;
    };

    let pointer = to_playfield(cursor_pos);
    session.set_aim_from_pointer(pointer.x);
}

/// Handle fire input (mouse click or spacebar).
fn handle_fire_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
) {
    let fire_pressed =
        mouse_input.just_pressed(MouseButton::Left) || keyboard_input.just_pressed(KeyCode::Space);

    if fire_pressed {
        session.fire();
    }
}

/// Advance the engine one tick.
fn advance_session(mut session: ResMut<Session>, mut resolved: MessageWriter<ShotResolved>) {
    let report = session.tick();
    let Some(landing) = report.landing else {
        return;
    };

    resolved.write(ShotResolved {
        coord: landing.coord,
        color: landing.color,
        popped: landing.matched.cluster.len(),
        dropped: landing.matched.floating.len(),
        score_delta: report.score_delta,
        status: report.status,
    });
}

fn announce_shot_results(mut resolved: MessageReader<ShotResolved>, session: Res<Session>) {
    for shot in resolved.read() {
        if shot.popped > 0 {
            info!(
                "{:?} at {}: popped {}, dropped {}, +{} (score {}/{})",
                shot.color,
                shot.coord,
                shot.popped,
                shot.dropped,
                shot.score_delta,
                session.score().score,
                session.config().target_score
            );
        }

        match shot.status {
            GameStatus::Won => info!("You win! Press R to play again"),
            GameStatus::Lost => info!("Game over! Press R to play again"),
            GameStatus::Playing => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    #[test]
    fn test_plugin_registers_engine_types() {
        let mut app = App::new();
        plugin(&mut app);

        let registry = app.world().resource::<AppTypeRegistry>().read();
        assert!(registry.contains(TypeId::of::<GridCoord>()));
        assert!(registry.contains(TypeId::of::<Bubble>()));
        assert!(registry.contains(TypeId::of::<BubbleColor>()));
        assert!(registry.contains(TypeId::of::<Projectile>()));
        assert!(registry.contains(TypeId::of::<GameScore>()));
        assert!(registry.contains(TypeId::of::<GameStatus>()));
    }
}
