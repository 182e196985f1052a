//! Overlap demo application
//!
//! Slides a capsule-carrying actor through a row of crates and logs the
//! begin/end/hit traffic each frame. Pass a `.toml` or `.ron` config path as
//! the first argument to override the defaults.

use component_engine::foundation::logging;
use component_engine::prelude::*;

const FRAMES: u32 = 120;
const FRAME_TIME: f32 = 1.0 / 60.0;
const SPEED: f32 = 6.0;

fn load_config() -> ApplicationConfig {
    let Some(path) = std::env::args().nth(1) else {
        return ApplicationConfig::default();
    };
    match ApplicationConfig::load_from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {path}: {e}; using defaults");
            ApplicationConfig::default()
        }
    }
}

/// Spawn a crate actor at `x` and wire its actor-level delegates to the log
fn spawn_crate(world: &mut World, name: &str, x: f32) -> ObjectId {
    let actor = world.spawn_actor(name);
    let body = world.add_shape_component(Some(actor), "body", ShapeComponent::default_box());
    world.set_relative_location(body, Vec3::new(x, 0.0, 0.0));

    if let Some(actor_ref) = world.actor(actor) {
        let label = name.to_string();
        actor_ref.on_actor_begin_overlap.add(move |e| {
            log::info!("{label}: begin overlap with {}", e.other_component);
        });
        let label = name.to_string();
        actor_ref.on_actor_end_overlap.add(move |e| {
            log::info!("{label}: end overlap with {}", e.other_component);
        });
        let label = name.to_string();
        actor_ref.on_actor_hit.add(move |e| {
            let n = e.hit.impact_normal();
            log::info!(
                "{label}: hit by {} normal=({:.2}, {:.2}, {:.2}) depth={:.3}",
                e.other_component,
                n.x,
                n.y,
                n.z,
                e.hit.penetration_depth()
            );
        });
    }
    actor
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config();
    logging::init_with_filter(&config.engine.log_level);
    config.validate()?;

    log::info!("Starting overlap demo");
    let mut world = World::new(config.collision.clone());

    for (i, x) in [2.0_f32, 4.0, 6.0].iter().enumerate() {
        spawn_crate(&mut world, &format!("crate_{i}"), *x);
    }

    let probe = world.spawn_actor("probe");
    let capsule = world.add_shape_component(Some(probe), "capsule", ShapeComponent::default_capsule());
    world.set_relative_location(capsule, Vec3::new(-2.0, 0.0, 0.0));
    world.set_relative_rotation(capsule, Quat::from_euler_angles(0.0, 0.0, std::f32::consts::FRAC_PI_2));

    // Blocking shapes report hits; overlap-only configs report begins
    if let Some(probe_ref) = world.actor(probe) {
        probe_ref.on_actor_begin_overlap.add(|e| {
            log::info!("probe: entered {:?}", e.other_actor);
        });
        probe_ref.on_actor_hit.add(|e| {
            log::info!("probe: struck {:?} at depth {:.3}", e.other_actor, e.hit.penetration_depth());
        });
        probe_ref.on_actor_end_overlap.add(|e| {
            log::info!("probe: left {:?}", e.other_actor);
        });
    }

    let mut debug_lines = DebugLineBatch::new();
    for frame in 0..FRAMES {
        let x = -2.0 + SPEED * FRAME_TIME * frame as f32;
        world.set_relative_location(capsule, Vec3::new(x, 0.0, 0.0));
        world.tick(FRAME_TIME);

        if config.engine.debug_mode {
            let overlaps = world.primitive(capsule).map_or(0, |p| p.overlap_infos().len());
            log::debug!("frame {frame}: probe at x={x:.2}, {overlaps} overlap(s)");
        }
        if config.collision.debug_draw_collision {
            debug_lines.clear();
            let shapes = world.render_debug_shapes(&mut debug_lines);
            log::trace!("frame {frame}: {shapes} shapes, {} debug lines", debug_lines.len());
        }
    }

    let overlapping = world
        .primitive(capsule)
        .map_or(0, |p| p.overlap_infos().len());
    log::info!("Demo finished; probe overlapping {overlapping} component(s)");
    Ok(())
}
