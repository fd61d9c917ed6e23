// What you SEE:
// • A window with the reference drawing faded to gray.
// • Hold Left Mouse (or touch) and drag: your strokes appear in red.
// • P = ink, E = eraser, C = clear, ENTER = done, ESC quits.
// • Below the threshold: "TRY AGAIN" and a fresh sketch. Above it: your
//   score, then the next drawing of the level.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use trace_kiosk::asset::load_reference_asset;
use trace_kiosk::deferred::DeferredQueue;
use trace_kiosk::draw::{draw_crosshair, draw_text_5x7, fill_rect, Drawer};
use trace_kiosk::input::{KioskKey, PointerEvent, PointerTracker};
use trace_kiosk::level::{LogReward, RewardTrigger};
use trace_kiosk::types::FrameBuffer;
use trace_kiosk::{Error, KioskConfig, Session, ToolMode};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Delay between the success screen and the prize.
const REWARD_DELAY: Duration = Duration::from_millis(10);
/// How long a result banner stays up.
const BANNER_TIME: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "trace-kiosk")]
#[command(about = "Trace-and-compare drawing kiosk", version)]
struct Args {
    /// Path to config file (created with defaults if missing)
    #[arg(short, long, default_value = "kiosk.json")]
    config: PathBuf,

    /// Admin: store a new score threshold (0-100) and exit
    #[arg(long, value_name = "N")]
    set_threshold: Option<i64>,

    /// Reference drawings of one level, in order
    images: Vec<PathBuf>,
}

/// Things the loop does a little later.
enum Later {
    Dispense,
    Advance,
    HideBanner,
}

struct Banner {
    text: String,
    color: u32,
}

fn item_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("trace_kiosk=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let mut config = KioskConfig::load_or_create(&args.config)
        .with_context(|| format!("loading config {:?}", args.config))?;
    info!("Score threshold is {}", config.score_threshold);

    /* --- Admin action: update threshold and leave --- */
    if let Some(value) = args.set_threshold {
        config.set_threshold(value)?;
        config.save(&args.config)?;
        return Ok(());
    }

    if args.images.is_empty() {
        bail!("no reference drawings given");
    }

    /* --- Level + canvas setup ---
       Visual: window opens with the first drawing faded to gray. */
    let (w, h) = (config.canvas_width, config.canvas_height);
    let items: Vec<(String, PathBuf)> = args.images.iter().map(|p| (item_name(p), p.clone())).collect();
    // Drawings are known by file stem, so cats/1.png and dogs/1.png can't share a level.
    let mut session = Session::new(&config, items.iter().map(|(n, _)| n.clone()).collect())
        .context("building the level")?;

    let start_item = |session: &mut Session, name: &str| -> Result<()> {
        let path = items
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p)
            .with_context(|| format!("unknown drawing {name:?}"))?;
        let reference = load_reference_asset(path, w, h)
            .with_context(|| format!("loading {:?}", path))?;
        session.start(name, reference)?;
        Ok(())
    };
    start_item(&mut session, &items[0].0)?;

    let mut drawer = Drawer::new("Trace & Compare", w as usize, h as usize)?;
    let mut pointer = PointerTracker::new();
    let mut later: DeferredQueue<Later> = DeferredQueue::new();
    let mut reward = LogReward::default();
    let mut banner: Option<Banner> = None;
    let mut locked = false; // true while a result is on screen and we wait to advance

    /* ------------------------------ Main loop ------------------------------ */
    'frames: while drawer.is_open() {
        let now = Instant::now();

        /* 1) Keys */
        for key in drawer.pressed_keys() {
            match key {
                KioskKey::Quit => break 'frames,
                KioskKey::Ink => session.canvas_mut().set_tool(ToolMode::Ink),
                KioskKey::Erase => session.canvas_mut().set_tool(ToolMode::Erase),
                KioskKey::Clear if !locked => session.canvas_mut().clear_sketch(),
                KioskKey::Submit if !locked && session.current().is_some() => {
                    match session.submit() {
                        Ok(attempt) if attempt.result.passed => {
                            banner = Some(Banner {
                                text: format!("GREAT! SCORE {:.0}", attempt.result.score),
                                color: 0x0033_AA33,
                            });
                            later.clear();
                            if attempt.level_complete {
                                later.schedule(now, REWARD_DELAY, Later::Dispense);
                            }
                            later.schedule(now, BANNER_TIME, Later::Advance);
                            locked = true;
                        }
                        Ok(attempt) => {
                            banner = Some(Banner {
                                text: format!("TRY AGAIN - SCORE {:.0}", attempt.result.score),
                                color: 0x00CC_6600,
                            });
                            later.schedule(now, BANNER_TIME, Later::HideBanner);
                        }
                        Err(Error::EmptyReference) => {
                            warn!("{:?} has nothing to trace; skipping it", session.current());
                            banner = Some(Banner { text: "NOTHING TO TRACE".into(), color: 0x00AA_3333 });
                            later.clear();
                            later.schedule(now, BANNER_TIME, Later::Advance);
                            locked = true;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                _ => {}
            }
        }

        /* 2) Pointer drag -> strokes (ignored while a result is showing) */
        if let Some(event) = pointer.sample(drawer.mouse_pos(), drawer.left_mouse_down()) {
            let canvas = session.canvas_mut();
            match event {
                PointerEvent::Begin(p) if !locked => canvas.begin_stroke(p),
                PointerEvent::Move(p) if !locked => canvas.extend_stroke(p),
                PointerEvent::End => canvas.end_stroke(),
                _ => {}
            }
        }

        /* 3) Deferred actions that are due */
        for due in later.drain_due(now) {
            match due {
                Later::Dispense => reward.dispense(),
                Later::HideBanner => banner = None,
                Later::Advance => {
                    locked = false;
                    banner = None;
                    match session.next_item().map(str::to_owned) {
                        Some(next) => start_item(&mut session, &next)?,
                        None => {
                            let text = if session.level().is_complete() { "LEVEL COMPLETE!" } else { "LEVEL OVER" };
                            info!("Level finished: {}", text);
                            session.abandon();
                            locked = true;
                            banner = Some(Banner { text: text.into(), color: 0x0033_66CC });
                        }
                    }
                }
            }
        }

        /* 4) Compose the screen: preview, crosshair, HUD, banner */
        let mut screen = FrameBuffer::from_raster(session.canvas().composite());
        let (sw, sh) = (screen.width as i32, screen.height as i32);

        if let Some(p) = drawer.mouse_pos() {
            let color = if pointer.is_pressed() { 0x00_FF_33_33 } else { 0x00_33_66_FF };
            draw_crosshair(&mut screen, p.x, p.y, 12, color);
        }

        let level = session.level();
        let best = session
            .current()
            .and_then(|item| level.score_of(item))
            .map(|s| format!(" BEST {s:.0}"))
            .unwrap_or_default();
        let hud = format!(
            "{} | P: INK  E: ERASE  C: CLEAR  ENTER: DONE | {}{} {}/{}",
            session.canvas().tool().label(),
            session.current().unwrap_or("-"),
            best,
            level.completed_count(),
            level.items().len(),
        );
        fill_rect(&mut screen, 0, 0, sw, 20, 0x0030_3030);
        draw_text_5x7(&mut screen, 8, 7, &hud, 0x00_FF_FF_FF);

        if let Some(b) = &banner {
            let y = sh / 2 - 12;
            fill_rect(&mut screen, 0, y, sw, 24, b.color);
            let x = (sw - 6 * b.text.len() as i32) / 2;
            draw_text_5x7(&mut screen, x.max(0), y + 9, &b.text, 0x00_FF_FF_FF);
        }

        /* 5) Present to the window */
        drawer.present(&screen)?;
    }

    Ok(())
}
