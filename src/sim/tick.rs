//! One simulation step
//!
//! Advances the game by exactly one scheduler tick and records what should be
//! drawn and heard. Ordering matters and is part of the game's behavior:
//! player movement, growth easing, boundary death, pool top-up, items, then
//! enemies in pool order. The first enemy that kills the player ends the
//! scan; enemies after it are neither moved nor drawn that tick.

use glam::Vec2;

use super::behavior::steer;
use super::collision::{Bounds, is_colliding};
use super::population::{self, relocate_if_outside};
use super::state::{DeathCause, GameEvent, GameState};
use crate::audio::{AudioCue, Track};
use crate::render::{Frame, Rect, Sprite, Stroke, TextStyle, colors};
use crate::world_to_screen;

/// Advance the game state by one tick.
///
/// Does nothing (and returns an empty frame) unless the game is running.
/// The host should keep requesting ticks only while
/// [`GameState::is_running`] holds after the call.
pub fn tick(state: &mut GameState) -> Frame {
    let mut frame = Frame::new();
    if !state.is_running() {
        return frame;
    }
    state.time_ticks += 1;

    frame.clear(state.viewport);
    draw_backdrop(state, &mut frame);

    state.player.advance();
    state.player.ease_size(state.tuning.growth_rate);

    if state.player.is_outside(state.tuning.arena_half_extent()) {
        game_over(state, &mut frame, DeathCause::Boundary);
        return frame;
    }

    let player_box = state.player_screen_bounds();
    frame.sprite(Sprite::Player, &player_box);

    population::fill_pools(state);

    collect_items(state, &mut frame, &player_box);

    if let Some(cause) = resolve_enemies(state, &mut frame, &player_box) {
        game_over(state, &mut frame, cause);
        return frame;
    }

    draw_hud(state, &mut frame);
    frame
}

/// Items: eat on contact, otherwise draw
fn collect_items(state: &mut GameState, frame: &mut Frame, player_box: &Bounds) {
    let GameState {
        tuning,
        player,
        items,
        score,
        viewport,
        ..
    } = state;
    let camera = player.pos;

    items.retain(|item| {
        let screen = Bounds::new(world_to_screen(item.pos, camera, *viewport), item.size);
        if is_colliding(player_box, &screen) {
            player.grow(tuning.item_growth, tuning.max_player_size);
            *score += tuning.item_score;
            frame.cue(AudioCue::Once(Track::Collect));
            frame.event(GameEvent::ItemCollected {
                points: tuning.item_score,
            });
            false
        } else {
            frame.sprite(Sprite::Item, &screen);
            true
        }
    });
}

/// Enemies: steer, move, recycle strays, then resolve contact against the
/// box taken before the move.
///
/// Returns the death cause if an enemy won.
fn resolve_enemies(
    state: &mut GameState,
    frame: &mut Frame,
    player_box: &Bounds,
) -> Option<DeathCause> {
    let GameState {
        tuning,
        rng,
        player,
        enemies,
        score,
        viewport,
        ..
    } = state;
    let camera = player.pos;
    // Shared by every enemy this tick, even if eating one raises the score
    let multiplier = tuning.speed_multiplier(*score);

    let mut i = 0;
    while i < enemies.len() {
        let enemy = &mut enemies[i];
        let screen = Bounds::new(world_to_screen(enemy.pos, camera, *viewport), enemy.size);

        steer(enemy, camera, multiplier, tuning.random_turn_chance, rng);
        if relocate_if_outside(enemy, rng, tuning) {
            log::debug!("Relocated stray {:?} enemy", enemy.kind);
            frame.event(GameEvent::EnemyRelocated { kind: enemy.kind });
        }

        if is_colliding(player_box, &screen) {
            let kind = enemy.kind;
            if player.size > enemy.size {
                player.grow(tuning.enemy_growth, tuning.max_player_size);
                *score += tuning.enemy_score;
                frame.event(GameEvent::EnemyEaten {
                    kind,
                    points: tuning.enemy_score,
                });
                enemies.remove(i);
                continue;
            }
            enemies.remove(i);
            return Some(DeathCause::Enemy(kind));
        }

        frame.sprite(enemy.kind.sprite(), &screen);
        i += 1;
    }

    None
}

/// Running -> GameOver: sound, high score, overlay
fn game_over(state: &mut GameState, frame: &mut Frame, cause: DeathCause) {
    frame.cue(AudioCue::Once(Track::Collision));

    let new_high_score = state.end_run();
    frame.event(GameEvent::GameOver {
        cause,
        score: state.score,
    });
    if new_high_score {
        frame.event(GameEvent::NewHighScore { score: state.score });
    }
    log::info!(
        "Game over ({:?}) after {} ticks, final score {}",
        cause,
        state.time_ticks,
        state.score
    );

    draw_game_over(state, frame);
}

/// Parallax background and the dashed arena border
fn draw_backdrop(state: &GameState, frame: &mut Frame) {
    let offset = state.player.pos * crate::consts::PARALLAX;
    frame.fill_rect(
        Rect::new(
            -offset.x,
            -offset.y,
            state.viewport.x * 2.0,
            state.viewport.y * 2.0,
        ),
        colors::SKY,
    );

    let arena_min = world_to_screen(
        -state.tuning.arena_half_extent(),
        state.player.pos,
        state.viewport,
    );
    frame.stroke_rect(
        Rect::new(
            arena_min.x,
            arena_min.y,
            state.tuning.arena_width,
            state.tuning.arena_height,
        ),
        Stroke {
            color: colors::ARENA_BORDER,
            line_width: 5.0,
            dash: Some([10.0, 5.0]),
        },
    );
}

fn draw_hud(state: &GameState, frame: &mut Frame) {
    let style = TextStyle {
        color: colors::HUD_TEXT,
        size_px: 20.0,
    };
    frame.text(format!("Score: {}", state.score), Vec2::new(20.0, 30.0), style.clone());
    frame.text(
        format!("High Score: {}", state.high_score),
        Vec2::new(20.0, 60.0),
        style,
    );
}

fn draw_game_over(state: &GameState, frame: &mut Frame) {
    frame.fill_rect(
        Rect::new(0.0, 0.0, state.viewport.x, state.viewport.y),
        colors::GAME_OVER_BACKDROP,
    );
    let center = state.canvas_center();
    let style = TextStyle {
        color: colors::HUD_TEXT,
        size_px: 50.0,
    };
    frame.text("Game Over!", center + Vec2::new(-150.0, -50.0), style.clone());
    frame.text(
        format!("Final Score: {}", state.score),
        center + Vec2::new(-150.0, 0.0),
        style,
    );
}
