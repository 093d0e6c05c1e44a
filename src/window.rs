//! Raylib frontend.
//!
//! Polls the keyboard into [`InputMessage`]s, ticks the [`Game`] with the
//! frame time and draws the current [`RenderSnapshot`].
use log::{info, warn};
use raylib::prelude::*;

use samurai_sprite::components::movementstate::Facing;
use samurai_sprite::events::input::{InputMessage, Key};
use samurai_sprite::game::Game;
use samurai_sprite::resources::animationstore::FRAME_SIZE;
use samurai_sprite::resources::gameconfig::GameConfig;
use samurai_sprite::resources::rendersnapshot::RenderSnapshot;

const GROUND_MARGIN: f32 = 40.0;

const KEY_BINDINGS: [(KeyboardKey, Key); 12] = [
    (KeyboardKey::KEY_LEFT, Key::ArrowLeft),
    (KeyboardKey::KEY_RIGHT, Key::ArrowRight),
    (KeyboardKey::KEY_A, Key::A),
    (KeyboardKey::KEY_D, Key::D),
    (KeyboardKey::KEY_X, Key::X),
    (KeyboardKey::KEY_Z, Key::Z),
    (KeyboardKey::KEY_C, Key::C),
    (KeyboardKey::KEY_ONE, Key::Digit1),
    (KeyboardKey::KEY_TWO, Key::Digit2),
    (KeyboardKey::KEY_THREE, Key::Digit3),
    (KeyboardKey::KEY_T, Key::T),
    (KeyboardKey::KEY_S, Key::S),
];

pub fn run(mut game: Game) {
    let config = game.config().clone();
    let (mut rl, thread) = raylib::init()
        .size(config.game_width as i32, config.game_height as i32)
        .title("Samurai Sprite")
        .build();
    rl.set_target_fps(config.target_fps);

    let sheet = config.sprite_sheet.to_string_lossy().into_owned();
    let texture = match rl.load_texture(&thread, &sheet) {
        Ok(texture) => {
            info!("Loaded sprite sheet {}", sheet);
            Some(texture)
        }
        Err(e) => {
            warn!("Failed to load sprite sheet {}: {}; drawing a placeholder", sheet, e);
            None
        }
    };

    while !rl.window_should_close() {
        for (rl_key, key) in KEY_BINDINGS {
            if rl.is_key_pressed(rl_key) {
                game.send(InputMessage::Key { key, pressed: true });
            }
            if rl.is_key_released(rl_key) {
                game.send(InputMessage::Key { key, pressed: false });
            }
        }

        let dt = rl.get_frame_time();
        game.tick(dt);
        let snap = game.render();

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        draw_frame(&mut d, texture.as_ref(), &snap, &config);
    }
}

fn draw_frame(
    d: &mut RaylibDrawHandle,
    texture: Option<&Texture2D>,
    snap: &RenderSnapshot,
    config: &GameConfig,
) {
    let ground_y = config.game_height as f32 - GROUND_MARGIN;
    let size = FRAME_SIZE as f32 * config.character_scale;

    d.draw_rectangle(
        0,
        ground_y as i32,
        config.game_width as i32,
        GROUND_MARGIN as i32,
        Color::DARKGRAY,
    );

    // Pivot is the bottom center of the sprite
    let dest = Rectangle {
        x: snap.position_x - size / 2.0,
        y: ground_y - size - snap.vertical_offset,
        width: size,
        height: size,
    };

    match texture {
        Some(tex) => {
            // Negative source width mirrors the frame
            let width = if snap.facing == Facing::Left {
                -(FRAME_SIZE as f32)
            } else {
                FRAME_SIZE as f32
            };
            let src = Rectangle {
                x: snap.sprite_offset_x as f32,
                y: snap.sprite_offset_y as f32,
                width,
                height: FRAME_SIZE as f32,
            };
            d.draw_texture_pro(tex, src, dest, Vector2 { x: 0.0, y: 0.0 }, 0.0, Color::WHITE);
        }
        None => {
            d.draw_rectangle_rec(dest, Color::MAROON);
        }
    }

    let text = format!(
        "{} frame {} x={:.0}",
        snap.animation.name(),
        snap.frame,
        snap.position_x
    );
    d.draw_text(&text, 10, 10, 10, Color::BLACK);
}
