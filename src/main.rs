/// Interactive demo: window creation, input and the render loop.
/// The library never touches the window; everything here is glue.
use glam::{IVec2, Vec2, Vec3};
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;
use polyraster::perf::FrameStats;
use polyraster::*;
use std::error::Error;
use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::*,
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowBuilder},
};

const CLEAR_COLOR: u32 = 0xFF10_1018;
const CUBE_COLOR: u32 = 0xFF33_66FF;
const DEFAULT_CONFIG_PATH: &str = "polyraster.toml";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Scene {
    Solids,
    Textured,
    Terrain,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn load_config() -> RenderResult<EngineConfig> {
    match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => EngineConfig::load(DEFAULT_CONFIG_PATH),
        None => Ok(EngineConfig::default()),
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = load_config()?;
    log::info!("{} v{} ({})", config.app_name, config.version, config.mode());
    log::info!("Controls: left-drag orbit | Space auto-rotate | O halve light | 1/2/3 scene | Esc quit");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.app_name.as_str())
            .with_inner_size(winit::dpi::LogicalSize::new(960, 720))
            .build(&event_loop)?,
    );

    // Initialize software presentation
    let context = softbuffer::Context::new(window.clone())?;
    let mut surface = softbuffer::Surface::new(&context, window.clone())?;

    let window_size = window.inner_size();
    let mut framebuffer =
        Framebuffer::new(window_size.width as usize, window_size.height as usize);

    let mut renderer = Renderer::new(config.renderer.clone())?;
    let mut orbit = OrbitController::new(config.renderer.mouse_sensitivity);

    // Scene content
    let cube = Mesh::cube(Vec3::ZERO, 80.0);
    let (quad, quad_uvs) = textured_quad(120.0);
    let texture = RgbaTexture::checkerboard(64, 8, [230, 230, 230], [40, 90, 200]);

    let mut entities = Entities::new();
    spawn_entities(&mut entities);

    let mut voxels = VoxelStore::new(config.voxel.clone());
    let terrain_start = Instant::now();
    let added = voxels.generate_terrain(IVec2::splat(-6), IVec2::splat(6), 12345);
    log::info!(
        "Terrain: {} voxels in {} chunks ({:.2}ms)",
        added,
        voxels.chunk_count(),
        terrain_start.elapsed().as_secs_f64() * 1000.0
    );

    let mut scene = Scene::Solids;
    let mut auto_rotate = true;
    let mut last_frame = Instant::now();
    let mut fps_timer = Instant::now();
    let mut frame_stats = FrameStats::default();

    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::Resized(new_size) => {
                    framebuffer.resize(new_size.width as usize, new_size.height as usize);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.state != ElementState::Pressed || event.repeat {
                        return;
                    }
                    if let PhysicalKey::Code(keycode) = event.physical_key {
                        match keycode {
                            KeyCode::Space => {
                                auto_rotate = !auto_rotate;
                                log::info!("Auto rotation: {}", if auto_rotate { "ON" } else { "OFF" });
                            }
                            KeyCode::KeyO => {
                                renderer.optimize_light();
                                log::info!("Light: {:?}", renderer.light_direction());
                            }
                            KeyCode::Digit1 => scene = Scene::Solids,
                            KeyCode::Digit2 => scene = Scene::Textured,
                            KeyCode::Digit3 => scene = Scene::Terrain,
                            KeyCode::Escape => elwt.exit(),
                            _ => {}
                        }
                    }
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    if button == MouseButton::Left {
                        match state {
                            ElementState::Pressed => orbit.press(),
                            ElementState::Released => orbit.release(),
                        }
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let cursor = Vec2::new(position.x as f32, position.y as f32);
                    orbit.cursor_moved(cursor, renderer.view_angles_mut());
                }
                WindowEvent::RedrawRequested => {
                    let now = Instant::now();
                    let dt = (now - last_frame).as_secs_f32();
                    last_frame = now;

                    if auto_rotate && !orbit.is_dragging() {
                        renderer.step_rotation();
                    }
                    entities.update(dt);

                    framebuffer.clear(CLEAR_COLOR);
                    let drawn = match scene {
                        Scene::Solids => renderer
                            .draw_solid(&cube, CUBE_COLOR, &mut framebuffer)
                            .and_then(|mut stats| {
                                stats += entities.draw(&mut renderer, &mut framebuffer)?;
                                Ok(stats)
                            }),
                        Scene::Textured => {
                            renderer.draw_textured(&quad, &quad_uvs, &texture, &mut framebuffer)
                        }
                        Scene::Terrain => {
                            voxels.draw_visible_chunks(&mut renderer, Vec3::ZERO, &mut framebuffer)
                        }
                    };
                    if let Err(err) = drawn {
                        log::warn!("frame draw failed: {err}");
                    }

                    if let Err(err) = present(&mut surface, &framebuffer) {
                        log::error!("present failed: {err}");
                        elwt.exit();
                        return;
                    }

                    frame_stats.record(now.elapsed());
                    if fps_timer.elapsed().as_secs() >= 1 {
                        frame_stats.flush();
                        fps_timer = Instant::now();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        }
    })?;

    #[cfg(feature = "profiling")]
    polyraster::perf::FUNCTION_COUNTERS.snapshot().log_report();

    Ok(())
}

/// Copy the framebuffer to the window
fn present(
    surface: &mut softbuffer::Surface<Arc<Window>, Arc<Window>>,
    framebuffer: &Framebuffer,
) -> Result<(), softbuffer::SoftBufferError> {
    let (Some(width), Some(height)) = (
        NonZeroU32::new(framebuffer.width as u32),
        NonZeroU32::new(framebuffer.height as u32),
    ) else {
        // Minimized
        return Ok(());
    };
    surface.resize(width, height)?;

    let mut buffer = surface.buffer_mut()?;
    buffer.copy_from_slice(framebuffer.color_buffer_slice());
    buffer.present()
}

/// Two triangles facing the viewer, UVs repeating the texture twice.
fn textured_quad(half: f32) -> (Mesh, Vec<UvTriple>) {
    let mesh = Mesh::new(
        vec![
            Vec3::new(-half, -half, 0.0),
            Vec3::new(half, -half, 0.0),
            Vec3::new(half, half, 0.0),
            Vec3::new(-half, half, 0.0),
        ],
        vec![Face::triangle(0, 1, 2), Face::triangle(0, 2, 3)],
    );
    let (bl, br, tr, tl) = (
        Vec2::new(0.0, 2.0),
        Vec2::new(2.0, 2.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(0.0, 0.0),
    );
    (mesh, vec![[bl, br, tr], [bl, tr, tl]])
}

fn spawn_entities(entities: &mut Entities) {
    for (i, color) in [0xFFFF_5555u32, 0xFF55_FF55, 0xFFFF_CC33].into_iter().enumerate() {
        entities.add(EntityDesc {
            color,
            behavior: Behavior::Orbit {
                center: Vec3::ZERO,
                radius: 120.0,
                angular_speed: 1.2,
                phase: i as f32 * std::f32::consts::TAU / 3.0,
            },
            ..Default::default()
        });
    }
    entities.add(EntityDesc {
        color: 0xFFAA_55FF,
        behavior: Behavior::Bob {
            amplitude: 25.0,
            frequency: 0.5,
            base_y: 90.0,
            time: 0.0,
        },
        ..Default::default()
    });
}
