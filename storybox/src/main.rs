mod config;
mod entry;
mod landscapes;
mod layout;
mod placeholder;
mod poller;
mod session;
mod story;
mod transcript;

use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use storybox_glow::{BackgroundAnimator, Color, ColorExtractor, FrameLoop, PixmapSurface};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{RenderConfig, StoryboxConfig};
use crate::poller::{spawn_polling, FeedLocation, PollResult, StoryPoller};
use crate::session::Session;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(short, long, env = "STORYBOX_CONFIG", default_value = "storybox.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the feed, animate the background and print the transcript
    Watch {
        /// Feed URL or file path
        #[arg(long)]
        source: Option<String>,
        /// Write a PNG of the background here every few seconds
        #[arg(long)]
        snapshot: Option<PathBuf>,
        #[arg(long)]
        fps: Option<u32>,
    },
    /// Render one sentence headlessly to a PNG
    Render {
        #[arg(long)]
        text: String,
        /// Base colour as r,g,b (defaults to `render.base_color`)
        #[arg(long, value_parser = parse_rgb)]
        rgb: Option<Color>,
        #[arg(long, default_value_t = 120)]
        ticks: u32,
        #[arg(long, default_value = "storybox.png")]
        out: PathBuf,
        /// Seed for the palette jitter
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write a tagged story file into the feed one line at a time
    Replay {
        file: PathBuf,
        /// Feed file to write (defaults to the configured source)
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,
    },
}

fn parse_rgb(s: &str) -> Result<Color, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected r,g,b but got {s:?}"));
    }
    let mut channels = [0.0f32; 3];
    for (slot, part) in channels.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("not a number: {part:?}"))?;
    }
    Ok(Color::from(channels))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storybox=info,storybox_glow=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = StoryboxConfig::load_or_default(&cli.config);

    match cli.command {
        Command::Watch {
            source,
            snapshot,
            fps,
        } => {
            if let Some(source) = source {
                config.feed.source = source;
            }
            if let Some(path) = snapshot {
                config.render.snapshot_path = Some(path);
            }
            if let Some(fps) = fps {
                config.render.fps = fps;
            }
            watch(config).await
        }
        Command::Render {
            text,
            rgb,
            ticks,
            out,
            seed,
        } => {
            let base = rgb.unwrap_or(config.render.base_color);
            render(&config, &text, base, ticks, &out, seed)
        }
        Command::Replay {
            file,
            output,
            interval_ms,
        } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read story file: {}", file.display()))?;
            let items = story::parse_story(&raw);
            if items.is_empty() {
                warn!("No tagged sentences found in {}", file.display());
                return Ok(());
            }
            let output = output.unwrap_or_else(|| PathBuf::from(&config.feed.source));
            let writer = story::FeedWriter::new(output);
            story::replay(&items, &writer, Duration::from_millis(interval_ms)).await
        }
    }
}

fn animator(seed: Option<u64>) -> BackgroundAnimator {
    match seed {
        Some(seed) => BackgroundAnimator::with_extractor(ColorExtractor::with_jitter(
            StdRng::seed_from_u64(seed),
        )),
        None => BackgroundAnimator::new(),
    }
}

fn render(
    config: &StoryboxConfig,
    text: &str,
    base: Color,
    ticks: u32,
    out: &Path,
    seed: Option<u64>,
) -> Result<()> {
    let surface = PixmapSurface::new(config.render.width, config.render.height)?;
    let mut frames = FrameLoop::new(animator(seed), surface);
    frames.animator_mut().on_new_entry(base, text);
    let rendered = frames.run_for(ticks.max(1));

    frames
        .surface()
        .save_png(out)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    info!("Rendered {} frames to {}", rendered, out.display());
    Ok(())
}

async fn watch(config: StoryboxConfig) -> Result<()> {
    let location = FeedLocation::parse(&config.feed.source);
    info!("Watching {}", location);
    let poller = StoryPoller::new(
        location,
        Duration::from_millis(config.feed.request_timeout_ms),
    )?;
    let mut feed = spawn_polling(poller, Duration::from_millis(config.feed.poll_interval_ms.max(1)));

    let surface = PixmapSurface::new(config.render.width, config.render.height)?;
    let mut session = Session::new(FrameLoop::new(animator(None), surface), &config);

    drive(&mut session, &mut feed, &config.render, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Ctrl-C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    })
    .await?;

    info!(
        "Stopped after {} frames, {} transcript rows",
        session.frames().frames(),
        session.transcript().row_count()
    );
    Ok(())
}

/// Render frames and apply feed results until `shutdown` resolves or the
/// frame loop is stopped.
async fn drive<F>(
    session: &mut Session<PixmapSurface>,
    feed: &mut mpsc::Receiver<PollResult>,
    render: &RenderConfig,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()>,
{
    let handle = session.handle();
    let mut frame = tokio::time::interval(Duration::from_secs_f64(1.0 / render.fps.max(1) as f64));
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut snapshot = tokio::time::interval(Duration::from_secs(render.snapshot_every_secs.max(1)));
    snapshot.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Interrupted, stopping");
                handle.stop();
                break;
            }
            result = feed.recv() => match result {
                Some(Ok(entry)) => {
                    let update = session.apply(&entry);
                    if update.new_line {
                        let transcript = session.transcript();
                        if let Some(index) = transcript.current_index() {
                            info!(
                                landscape = ?session.strip().active(),
                                "Line {}: {}",
                                index.saturating_add(1),
                                transcript.line(index).unwrap_or("")
                            );
                        }
                        debug!(background = update.background, chip = ?update.chip, "new line applied");
                        print_lines(&session.render_text())?;
                    } else if let Some(p) = session.placeholder_frame() {
                        print_placeholder(p.visible, p.caret)?;
                    }
                }
                Some(Err(e)) if e.is_transient() => {
                    debug!("Feed not available: {}", e);
                    if let Some(p) = session.placeholder_frame() {
                        print_placeholder(p.visible, p.caret)?;
                    }
                }
                Some(Err(e)) => warn!("Ignoring feed poll: {}", e),
                None => {
                    warn!("Feed poller exited, stopping");
                    break;
                }
            },
            _ = frame.tick() => {
                if !session.step() {
                    break;
                }
            }
            _ = snapshot.tick(), if render.snapshot_path.is_some() => {
                if let Some(path) = &render.snapshot_path {
                    if let Err(e) = session.frames().surface().save_png(path) {
                        warn!("Snapshot to {} failed: {}", path.display(), e);
                    }
                }
            }
        }
    }
    Ok(())
}

fn print_lines(lines: &[String]) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out)?;
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(())
}

fn print_placeholder(visible: &str, caret: bool) -> Result<()> {
    let mut out = std::io::stdout().lock();
    let caret = if caret { "|" } else { " " };
    write!(out, "\r{visible}{caret}")?;
    out.flush()?;
    Ok(())
}
