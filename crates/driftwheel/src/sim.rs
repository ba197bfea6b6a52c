//! Simulated host: a fixed page layout driving the engines.
//!
//! Stands in for the DOM-facing glue of a real page. The scene exposes a
//! viewport and the exclusion rectangles a real host would derive from
//! its UI elements; the event loop "applies" directives by logging them.

use std::{path::PathBuf, sync::Arc};

use config::Config;
use driftwheel_card::{CardRenderer, CardSpec};
use driftwheel_engine::{
    EngineEvent, PlacementEngine, RevealCycle, SceneProvider, SpinController, SpinEngine,
    Viewport, channel, geom::Rect,
};
use image::{Rgba, RgbaImage};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info, warn};

/// Demo run parameters, resolved from the CLI.
pub struct DemoOpts {
    /// Wheel segments / floating elements.
    pub items: usize,
    /// Reveal steps before the cycle is stopped.
    pub reveals: usize,
    /// Whether to trigger a spin at the end.
    pub spin: bool,
    /// Pre-selected winner, if any.
    pub winner: Option<usize>,
    /// Narrow viewport simulation.
    pub narrow: bool,
    /// RNG seed for reproducible runs.
    pub seed: Option<u64>,
    /// Card output path.
    pub card_out: Option<PathBuf>,
    /// Card portrait path.
    pub portrait: Option<PathBuf>,
}

/// A static page: viewport plus stand-ins for the chrome a real page
/// would ask the engine to avoid (header bar, headline block, contract
/// card, CTA row).
struct DemoScene {
    viewport: Viewport,
    zones: Vec<Rect>,
}

impl DemoScene {
    fn new(cfg: &Config, narrow: bool) -> Self {
        let viewport = if narrow {
            Viewport {
                width: 390.0,
                height: 844.0,
            }
        } else {
            Viewport {
                width: 1440.0,
                height: 900.0,
            }
        };
        let raw = if narrow {
            vec![
                Rect::from_origin_size(0.0, 0.0, viewport.width, 64.0),
                Rect::from_origin_size(20.0, 540.0, 350.0, 120.0),
                Rect::from_origin_size(120.0, 700.0, 150.0, 56.0),
            ]
        } else {
            vec![
                Rect::from_origin_size(0.0, 0.0, viewport.width, 80.0),
                Rect::from_origin_size(420.0, 120.0, 600.0, 90.0),
                Rect::from_origin_size(470.0, 640.0, 500.0, 110.0),
                Rect::from_origin_size(560.0, 780.0, 320.0, 70.0),
            ]
        };
        let margin = cfg.placement.exclusion_margin_px;
        let zones = raw.into_iter().map(|rect| rect.expand(margin)).collect();
        Self { viewport, zones }
    }
}

impl SceneProvider for DemoScene {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn exclusion_zones(&self) -> Vec<Rect> {
        self.zones.clone()
    }
}

/// Run the demo until the reveal quota (and optional spin) completes.
pub async fn run(cfg: Config, opts: DemoOpts) {
    let (events, mut rx) = channel();
    let scene = Arc::new(DemoScene::new(&cfg, opts.narrow));
    let cycle = RevealCycle::new(
        opts.items,
        PlacementEngine::new(cfg.placement.clone()),
        cfg.reveal,
        scene,
        events.clone(),
    );
    let stop = cycle.stop_token();
    let reveal_rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    cycle.spawn(reveal_rng);

    let controller = SpinController::new(SpinEngine::new(cfg.spin, opts.items), events);
    let mut spin_rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };

    let mut reveals_seen = 0usize;
    let mut spin_pending = opts.spin;
    let mut spin_started = false;
    while let Some(event) = rx.recv().await {
        match event {
            EngineEvent::Reveal {
                element,
                placement,
                float,
            } => {
                info!(
                    element,
                    left_pct = placement.left_pct,
                    top_pct = placement.top_pct,
                    tilt_deg = placement.tilt_deg,
                    accepted = placement.accepted,
                    float_s = %format!("{:.2}", float.duration_s),
                    "reveal"
                );
                reveals_seen += 1;
                if reveals_seen >= opts.reveals {
                    stop.cancel();
                    if spin_pending {
                        spin_pending = false;
                        spin_started = true;
                        let plan = match opts.winner {
                            Some(winner) => controller.trigger_with_winner(winner),
                            None => controller.trigger(&mut spin_rng),
                        };
                        if let Some(plan) = plan {
                            debug!(
                                total_rotation = plan.total_rotation,
                                ticks = plan.ticks.len(),
                                "spin scheduled"
                            );
                        }
                    } else if !spin_started {
                        break;
                    }
                }
            }
            EngineEvent::Hide { element } => info!(element, "hide"),
            EngineEvent::RotateTo {
                degrees,
                duration_ms,
            } => info!(degrees, duration_ms, "rotate wheel"),
            EngineEvent::Tick { index } => debug!(index, "tick"),
            EngineEvent::SpinFinished { winner_index } => {
                info!(winner_index, "spin finished");
                render_card(&opts, winner_index);
                break;
            }
        }
    }
}

/// Render the winner card when requested. Failures are logged and
/// swallowed: the card is a collaborator, and the spin outcome stands
/// with or without it.
fn render_card(opts: &DemoOpts, winner_index: usize) {
    let Some(out) = &opts.card_out else {
        return;
    };
    let renderer = match CardRenderer::new() {
        Ok(renderer) => renderer,
        Err(e) => {
            warn!("card renderer unavailable: {e}");
            return;
        }
    };
    let portrait = match &opts.portrait {
        Some(path) => match image::open(path) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                warn!("portrait load failed, using flat color: {e}");
                flat_portrait(winner_index)
            }
        },
        None => flat_portrait(winner_index),
    };
    let spec = CardSpec {
        headline: "DRIFTWHEEL".to_string(),
        subline: "PREDICTS".to_string(),
        winner_name: format!("Contender {}", winner_index + 1),
        tagline: "IN 2026".to_string(),
        footer: "driftwheel.example".to_string(),
    };
    match renderer.render_to_png(&spec, &portrait, None, out) {
        Ok(()) => info!(path = %out.display(), "card saved"),
        Err(e) => warn!("card render failed: {e}"),
    }
}

/// A flat-color portrait so the card path works without any assets.
fn flat_portrait(winner_index: usize) -> RgbaImage {
    const PALETTE: [[u8; 3]; 6] = [
        [0x3d, 0xd6, 0xc6],
        [0xe3, 0x5d, 0x5b],
        [0xff, 0xea, 0x00],
        [0x76, 0xff, 0x03],
        [0xa0, 0xc4, 0xff],
        [0xf0, 0x8c, 0x42],
    ];
    let [r, g, b] = PALETTE[winner_index % PALETTE.len()];
    RgbaImage::from_pixel(300, 300, Rgba([r, g, b, 0xff]))
}
