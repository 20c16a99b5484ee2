//! Preview - render engine output to PNG files
//!
//! A minimal host that drives the engine end-to-end on a synthetic timeline
//! and writes a few frames to disk:
//!
//! ```text
//! preview [effect] [frames]
//! preview aurora 4
//! ```
//!
//! Effect names are the stable snake_case ids; run with no arguments for the
//! default effect. Set `RUST_LOG=debug` for engine logs.

use std::time::{Duration, Instant};

use overlay_engine::{EffectId, EngineSettings, OverlayEngine};

const WIDTH: usize = 320;
const HEIGHT: usize = 200;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let effect = args
        .next()
        .map(|name| match EffectId::from_name(&name) {
            Some(id) => id,
            None => {
                log::warn!("unknown effect name '{}', using default", name);
                EffectId::default()
            }
        })
        .unwrap_or_default();
    let frames: u64 = args.next().and_then(|n| n.parse().ok()).unwrap_or(4);

    let t0 = Instant::now();
    let mut engine = OverlayEngine::new(EngineSettings::load(), t0);
    engine.set_active_effect(effect);
    engine.set_activity(true, t0);
    engine.set_focus(false, t0);

    log::info!(
        "rendering {} frames of '{}' at {}x{}",
        frames,
        engine.active_effect().as_str(),
        WIDTH,
        HEIGHT
    );

    // Start past the activation ease so intensity is settled
    for i in 0..frames {
        let now = t0 + Duration::from_millis(500 + i * 250);
        let frame = engine.render(WIDTH, HEIGHT, now);

        let name = format!("preview-{}-{:02}.png", engine.active_effect().as_str(), i);
        let image =
            image::RgbaImage::from_raw(WIDTH as u32, HEIGHT as u32, frame.to_rgba8())
                .expect("frame buffer size mismatch");
        match image.save(&name) {
            Ok(()) => log::info!("wrote {}", name),
            Err(e) => {
                log::error!("failed to write {}: {}", name, e);
                std::process::exit(1);
            }
        }
    }
}
