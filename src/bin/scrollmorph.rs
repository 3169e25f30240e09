use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollmorph::{
    AssetCommand, ElementId, Event, HeadlessLoader, MemoryEnvironment, MorphConfig,
    MorphController, Rect, RecordingSurface,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scrollmorph", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scripted page session headlessly and print one JSON line per step.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Controller configuration JSON.
    #[arg(long)]
    config: PathBuf,

    /// Scripted session JSON (initial page plus steps).
    #[arg(long)]
    script: PathBuf,

    /// Lottie JSON to serve for the configured asset URL. Without it the URL resolves
    /// relative to the config file's directory.
    #[arg(long)]
    asset: Option<PathBuf>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Script {
    environment: MemoryEnvironment,
    #[serde(default = "default_frame_ms")]
    frame_ms: f64,
    #[serde(default)]
    steps: Vec<Step>,
}

fn default_frame_ms() -> f64 {
    16.0
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
enum Step {
    /// Scroll the document, then let one frame render.
    ScrollTo { y: f64 },
    /// Resize the viewport; re-evaluates the media condition too.
    Resize { width: f64, inner_height: f64 },
    /// Move or resize an element (document coordinates).
    SetRect { id: ElementId, rect: Rect },
    /// Remove an element from the page.
    Remove { id: ElementId },
    /// Let time pass, rendering frames and advancing the animation.
    Wait { ms: f64 },
    /// Tear the controller down.
    Teardown,
}

type Controller = MorphController<MemoryEnvironment, HeadlessLoader, RecordingSurface>;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("scrollmorph=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open {what} '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse {what} '{}'", path.display()))
}

fn make_loader(args: &SimulateArgs, cfg: &MorphConfig) -> anyhow::Result<HeadlessLoader> {
    match &args.asset {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read asset '{}'", path.display()))?;
            Ok(HeadlessLoader::in_memory().with_document(cfg.asset_url.clone(), json))
        }
        None => {
            let root = args.config.parent().unwrap_or_else(|| Path::new("."));
            Ok(HeadlessLoader::from_dir(root))
        }
    }
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg: MorphConfig = read_json(&args.config, "config")?;
    let script: Script = read_json(&args.script, "script")?;
    anyhow::ensure!(
        script.frame_ms.is_finite() && script.frame_ms > 0.0,
        "frameMs must be > 0"
    );

    let loader = make_loader(&args, &cfg)?;
    let mut ctl = MorphController::new(cfg, script.environment, loader, RecordingSurface::new())?;
    let mut sim = Sim {
        now_ms: 0.0,
        frame_ms: script.frame_ms,
        seen: (0, 0),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    ctl.start();
    sim.pump(&mut ctl);
    report(&mut out, "start", &mut sim, &ctl)?;

    for step in script.steps {
        let label = sim.apply(&mut ctl, step);
        report(&mut out, label, &mut sim, &ctl)?;
    }
    Ok(())
}

struct Sim {
    now_ms: f64,
    frame_ms: f64,
    /// `(load count, command count)` already reported.
    seen: (usize, usize),
}

impl Sim {
    fn apply(&mut self, ctl: &mut Controller, step: Step) -> &'static str {
        match step {
            Step::ScrollTo { y } => {
                ctl.env_mut().scroll_to(y);
                ctl.handle(Event::Scroll);
                self.tick(ctl);
                "scrollTo"
            }
            Step::Resize {
                width,
                inner_height,
            } => {
                ctl.env_mut().resize(width, inner_height);
                ctl.handle(Event::MediaChanged);
                ctl.handle(Event::Resize);
                "resize"
            }
            Step::SetRect { id, rect } => {
                ctl.env_mut().set_rect(id.clone(), rect);
                ctl.handle(Event::ElementResized(id));
                "setRect"
            }
            Step::Remove { id } => {
                ctl.env_mut().remove(&id);
                ctl.handle(Event::ElementResized(id));
                "remove"
            }
            Step::Wait { ms } => {
                let end = self.now_ms + ms.max(0.0);
                while self.now_ms < end {
                    self.tick(ctl);
                }
                "wait"
            }
            Step::Teardown => {
                ctl.handle(Event::Teardown);
                "teardown"
            }
        }
    }

    /// One frame of wall-clock time: render if asked, then advance the player.
    fn tick(&mut self, ctl: &mut Controller) {
        self.now_ms += self.frame_ms;
        self.pump(ctl);
        if let Some(player) = ctl.loader().current()
            && ctl.is_enabled()
            && player.advance(self.frame_ms)
        {
            ctl.handle(Event::MorphComplete);
        }
    }

    /// Asset commands issued since the previous call.
    fn new_commands(&mut self, ctl: &Controller) -> Vec<AssetCommand> {
        let Some(player) = ctl.loader().current() else {
            return Vec::new();
        };
        let loads = ctl.loader().load_count();
        if self.seen.0 != loads {
            self.seen = (loads, 0);
        }
        let all = player.commands();
        let fresh = all.get(self.seen.1..).unwrap_or_default().to_vec();
        self.seen.1 = all.len();
        fresh
    }

    fn pump(&self, ctl: &mut Controller) {
        if ctl.env_mut().take_frame_request() {
            ctl.handle(Event::AnimationFrame {
                now_ms: self.now_ms,
            });
        }
    }
}

fn report(
    out: &mut impl std::io::Write,
    step: &str,
    sim: &mut Sim,
    ctl: &Controller,
) -> anyhow::Result<()> {
    let frame = ctl.loader().current().map(|p| p.current_frame());
    let commands = sim.new_commands(ctl);
    let line = serde_json::json!({
        "step": step,
        "nowMs": sim.now_ms,
        "enabled": ctl.is_enabled(),
        "active": ctl.active_state(),
        "displayed": ctl.displayed_state(),
        "phase": ctl.morph_phase().map(|p| format!("{p:?}")),
        "position": ctl.position(),
        "frame": frame,
        "commands": commands,
        "visible": ctl.surface().is_visible(),
    });
    writeln!(out, "{line}").context("write report line")?;
    Ok(())
}
