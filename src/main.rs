//! Dusty Engine demo: a spinning cube through the fixed-point pipeline
//!
//! Everything 3D here is integer math: model triangles are transformed
//! with fixed-point matrices built from the 8-bit angle tables, classified
//! against the camera, and drawn as wireframe into a Mode 13h sized byte
//! buffer that macroquad presents.

use macroquad::prelude::*;

use dusty_engine::math::{Fixed, Mat4, TrigTable, Vec3};
use dusty_engine::pipeline::{
    Color as FaceColor, RenderMode, Texture as FaceTexture, Triangle, Vertex,
};
use dusty_engine::services::{scancode, FrameTiming, KeyboardState, SystemClock};
use dusty_engine::VERSION;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Screen dimensions (Mode 13h, the original target)
const WIDTH: usize = 320;
const HEIGHT: usize = 200;

/// Demo configuration, loaded from a RON file
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DemoConfig {
    /// Rotation speed per axis, in angle units (1/256 turn) per second
    steps_per_sec_x: u32,
    steps_per_sec_y: u32,
    steps_per_sec_z: u32,
    /// Attach the checkerboard texture to the cube faces
    textured: bool,
    /// Cube half-extent in world units
    cube_size: i32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            steps_per_sec_x: 24,
            steps_per_sec_y: 40,
            steps_per_sec_z: 0,
            textured: true,
            cube_size: 1,
        }
    }
}

/// Error type for config loading
#[derive(Debug)]
enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
        }
    }
}

fn load_config<P: AsRef<Path>>(path: P) -> Result<DemoConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}

/// Byte framebuffer presented once per frame
struct Framebuffer {
    pixels: Vec<u8>, // RGBA, 4 bytes per pixel
    width: usize,
    height: usize,
}

impl Framebuffer {
    fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            width,
            height,
        }
    }

    fn clear(&mut self, color: FaceColor) {
        let bytes = color.to_bytes();
        for i in 0..(self.width * self.height) {
            self.pixels[i * 4..i * 4 + 4].copy_from_slice(&bytes);
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: FaceColor) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            let idx = (y as usize * self.width + x as usize) * 4;
            self.pixels[idx..idx + 4].copy_from_slice(&color.to_bytes());
        }
    }

    /// Draw a line using Bresenham's algorithm
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: FaceColor) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

/// Build the 12 cube triangles with outward winding
fn cube_triangles(half: i32, texture: Option<&FaceTexture>) -> Vec<Triangle<'_>> {
    let h = half;
    let corners = [
        Vec3::from_int(-h, -h, -h),
        Vec3::from_int(h, -h, -h),
        Vec3::from_int(h, h, -h),
        Vec3::from_int(-h, h, -h),
        Vec3::from_int(-h, -h, h),
        Vec3::from_int(h, -h, h),
        Vec3::from_int(h, h, h),
        Vec3::from_int(-h, h, h),
    ];

    let yellow = FaceColor::new(255, 255, 0);
    let magenta = FaceColor::new(255, 0, 255);

    // Two triangles per face, wound so the face normal points outward
    let faces: [([usize; 3], [usize; 3], FaceColor); 6] = [
        ([0, 2, 1], [0, 3, 2], FaceColor::RED),   // front (-Z)
        ([4, 5, 6], [4, 6, 7], FaceColor::GREEN), // back (+Z)
        ([0, 4, 7], [0, 7, 3], FaceColor::BLUE),  // left (-X)
        ([1, 2, 6], [1, 6, 5], FaceColor::WHITE), // right (+X)
        ([3, 7, 6], [3, 6, 2], yellow),           // top (+Y)
        ([0, 1, 5], [0, 5, 4], magenta),          // bottom (-Y)
    ];

    let mut triangles = Vec::with_capacity(12);
    for (a, b, color) in faces {
        for indices in [a, b] {
            let mut t = Triangle::new(
                Vertex::from_vec(corners[indices[0]]),
                Vertex::from_vec(corners[indices[1]]),
                Vertex::from_vec(corners[indices[2]]),
            );
            t.set_color(color);
            t.set_texture(texture);
            triangles.push(t);
        }
    }

    triangles
}

/// Project a view-space point to screen coordinates; None behind the eye
fn project(v: Vec3) -> Option<(i32, i32)> {
    let depth = -v.z;
    if depth <= Fixed::from_f32(0.1) {
        return None;
    }

    let focal = Fixed::from_int(120);
    let sx = (v.x * focal) / depth;
    let sy = (v.y * focal) / depth;

    Some((
        WIDTH as i32 / 2 + sx.to_int(),
        // Screen Y grows downward
        HEIGHT as i32 / 2 - sy.to_int(),
    ))
}

/// Map macroquad key events onto the polled scancode service
fn poll_keyboard(keyboard: &mut KeyboardState) {
    let bindings = [
        (KeyCode::Escape, scancode::ESC),
        (KeyCode::Up, scancode::UP),
        (KeyCode::Down, scancode::DOWN),
        (KeyCode::Left, scancode::LEFT),
        (KeyCode::Right, scancode::RIGHT),
    ];

    for (key, code) in bindings {
        if is_key_down(key) {
            keyboard.press(code);
        } else {
            keyboard.release(code);
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: format!("Dusty Engine v{}", VERSION),
        window_width: WIDTH as i32 * 3,
        window_height: HEIGHT as i32 * 3,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = match load_config("assets/demo.ron") {
        Ok(config) => {
            println!("Loaded demo config");
            config
        }
        Err(e) => {
            eprintln!("Using default config ({})", e);
            DemoConfig::default()
        }
    };

    let mut trig = TrigTable::empty();
    trig.init();

    let checkerboard =
        FaceTexture::checkerboard(16, 16, FaceColor::WHITE, FaceColor::new(64, 64, 64));
    let texture = config.textured.then_some(&checkerboard);
    let cube = cube_triangles(config.cube_size, texture);

    let mut fb = Framebuffer::new(WIDTH, HEIGHT);
    let clock = SystemClock::new();
    let mut timing = FrameTiming::new();
    let mut keyboard = KeyboardState::new();

    // Extra user-controlled spin, in angle units
    let mut spin_offset_x: u8 = 0;
    let mut spin_offset_y: u8 = 0;

    println!("=== Dusty Engine v{} ===", VERSION);
    println!("Arrows spin the cube, ESC quits");

    while timing.running {
        timing.update(&clock);
        poll_keyboard(&mut keyboard);

        if keyboard.is_key_pressed(scancode::ESC) {
            timing.stop();
        }
        if keyboard.is_key_pressed(scancode::LEFT) {
            spin_offset_y = spin_offset_y.wrapping_sub(1);
        }
        if keyboard.is_key_pressed(scancode::RIGHT) {
            spin_offset_y = spin_offset_y.wrapping_add(1);
        }
        if keyboard.is_key_pressed(scancode::UP) {
            spin_offset_x = spin_offset_x.wrapping_sub(1);
        }
        if keyboard.is_key_pressed(scancode::DOWN) {
            spin_offset_x = spin_offset_x.wrapping_add(1);
        }

        // Angles advance with the tick counter and wrap with the 8-bit type
        let angle_x = ((timing.ticks * config.steps_per_sec_x as u64 / 1000) % 256) as u8;
        let angle_y = ((timing.ticks * config.steps_per_sec_y as u64 / 1000) % 256) as u8;
        let angle_z = ((timing.ticks * config.steps_per_sec_z as u64 / 1000) % 256) as u8;

        // Compose model-to-view: rotate, then push down -Z in front of
        // the camera
        let view = Mat4::translation(Fixed::ZERO, Fixed::ZERO, Fixed::from_int(-6))
            * Mat4::rotation_z(&trig, angle_z)
            * Mat4::rotation_y(&trig, angle_y.wrapping_add(spin_offset_y))
            * Mat4::rotation_x(&trig, angle_x.wrapping_add(spin_offset_x));

        fb.clear(FaceColor::new(20, 20, 28));

        for triangle in &cube {
            let in_view = triangle.transform(&view);

            // Back faces point away from the camera in view space
            if !in_view.is_facing_camera() {
                continue;
            }

            let projected: Vec<_> = in_view
                .vertices
                .iter()
                .filter_map(|v| project(v.position))
                .collect();
            if projected.len() < 3 {
                continue;
            }

            let color = match in_view.render_mode() {
                RenderMode::Flat => in_view.color,
                // Wireframe demo: tint textured faces by their texel at
                // the first vertex
                RenderMode::Textured => in_view
                    .texture()
                    .map(|t| t.sample(in_view.vertices[0].texcoord))
                    .unwrap_or(in_view.color),
            };

            for i in 0..3 {
                let (x0, y0) = projected[i];
                let (x1, y1) = projected[(i + 1) % 3];
                fb.draw_line(x0, y0, x1, y1, color);
            }
        }

        // Present the byte buffer
        let frame = Texture2D::from_rgba8(fb.width as u16, fb.height as u16, &fb.pixels);
        frame.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        let scale = (screen_width() / WIDTH as f32).min(screen_height() / HEIGHT as f32);
        let draw_w = WIDTH as f32 * scale;
        let draw_h = HEIGHT as f32 * scale;
        draw_texture_ex(
            &frame,
            (screen_width() - draw_w) / 2.0,
            (screen_height() - draw_h) / 2.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(draw_w, draw_h)),
                ..Default::default()
            },
        );

        next_frame().await;
    }
}
