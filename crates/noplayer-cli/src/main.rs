//! noplayer CLI — drives the playback facade against the headless engine.
//!
//! Commands:
//!   noplayer play <locator> [hls|dash|progressive] [start-ms]
//!                                   Load, play, print events and status
//!   noplayer tracks <locator>       Load and list audio/subtitle tracks
//!   noplayer script <file.json>     Run a JSON array of facade commands
//!
//! `NOPLAYER_CONFIG` names an optional JSON config file; `RUST_LOG` sets
//! log verbosity.

mod script;

use std::sync::Arc;

use noplayer_core::backend::{CatalogTrackSelector, HeadlessEngine, RendererTracks, TrackFormat};
use noplayer_core::{
    ContentType, Cue, DefaultSourceResolver, EventForwarder, ListenerBridges, PlaybackFacade, PlayerConfig,
    RendererType, SurfaceHandle, TextOutput, VideoDuration, VideoPosition,
};
use serde_json::json;

const DEMO_SURFACE: SurfaceHandle = SurfaceHandle(1);

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        return;
    }

    let config = match PlayerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("config error: {}", e);
            std::process::exit(2);
        }
    };

    let (engine, mut facade) = demo_facade(config);
    facade.set_subtitle_renderer_output(Arc::new(PrintingOutput));

    let ok = match args[0].as_str() {
        "play" => cmd_play(&engine, &mut facade, &args[1..]),
        "tracks" => cmd_tracks(&mut facade, &args[1..]),
        "script" => cmd_script(&mut facade, &args[1..]),
        other => {
            eprintln!("unknown command: {}", other);
            print_usage();
            false
        }
    };

    facade.release();
    if !ok {
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Headless engine with video/audio/text renderers and a small track catalog.
pub(crate) fn demo_facade(config: PlayerConfig) -> (Arc<HeadlessEngine>, PlaybackFacade) {
    let engine = Arc::new(
        HeadlessEngine::new()
            .with_renderers(vec![RendererType::Video, RendererType::Audio, RendererType::Text])
            .with_duration(VideoDuration::from_millis(596_000))
            .with_buffered_percentage(20)
            .with_video_size(1920, 1080),
    );
    let selector = Arc::new(CatalogTrackSelector::new(vec![
        RendererTracks {
            renderer_index: 1,
            formats: vec![
                TrackFormat::new("audio-en", Some("en"), "audio/mp4a-latm").with_audio(2, 48_000),
                TrackFormat::new("audio-fr", Some("fr"), "audio/ac3").with_audio(6, 48_000),
            ],
        },
        RendererTracks {
            renderer_index: 2,
            formats: vec![
                TrackFormat::new("subs-en", Some("en"), "text/vtt"),
                TrackFormat::new("subs-es", Some("es"), "application/ttml+xml"),
            ],
        },
    ]));
    let facade = PlaybackFacade::with_config(
        engine.clone(),
        Arc::new(DefaultSourceResolver),
        selector.clone(),
        selector,
        config,
    );
    (engine, facade)
}

/// Prints subtitle cues to stdout.
struct PrintingOutput;

impl TextOutput for PrintingOutput {
    fn on_cues(&self, cues: &[Cue]) {
        for cue in cues {
            println!("[{:>7}ms] {}", cue.start_ms, cue.text);
        }
    }
}

fn printing_bridges() -> ListenerBridges {
    let forwarder = EventForwarder::new();
    forwarder.subscribe(|event| match serde_json::to_string(event) {
        Ok(line) => println!("{}", line),
        Err(e) => log::warn!("noplayer: cannot print event: {}", e),
    });
    forwarder.bridges()
}

fn content_type_arg(locator: &str, arg: Option<&String>) -> Result<ContentType, String> {
    match arg {
        Some(raw) => raw.parse(),
        None => Ok(ContentType::infer(locator)),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_play(engine: &HeadlessEngine, facade: &mut PlaybackFacade, args: &[String]) -> bool {
    let Some(locator) = args.first() else {
        eprintln!("usage: noplayer play <locator> [content-type] [start-ms]");
        return false;
    };
    let content_type = match content_type_arg(locator, args.get(1)) {
        Ok(ct) => ct,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };
    let start = match args.get(2).map(|raw| raw.parse::<u64>()) {
        Some(Ok(ms)) => Some(VideoPosition::from_millis(ms)),
        Some(Err(e)) => {
            eprintln!("invalid start position: {}", e);
            return false;
        }
        None => None,
    };

    if let Err(e) = facade.load(locator, content_type, &printing_bridges()) {
        eprintln!("load failed: {}", e);
        return false;
    }
    let played = match start {
        Some(position) => facade.play_from(&DEMO_SURFACE, position),
        None => facade.play(&DEMO_SURFACE),
    };
    if let Err(e) = played {
        eprintln!("play failed: {}", e);
        return false;
    }

    let Some(probe) = engine.last_probe() else {
        return false;
    };
    probe.emit_cues(&[Cue {
        text: format!("now playing {}", locator),
        start_ms: probe.position_ms(),
        end_ms: probe.position_ms() + 2_000,
    }]);
    print_status(facade);
    probe.complete();
    print_status(facade);
    true
}

fn cmd_tracks(facade: &mut PlaybackFacade, args: &[String]) -> bool {
    let Some(locator) = args.first() else {
        eprintln!("usage: noplayer tracks <locator>");
        return false;
    };
    if let Err(e) = facade.load(locator, ContentType::infer(locator), &ListenerBridges::silent()) {
        eprintln!("load failed: {}", e);
        return false;
    }
    match (facade.audio_tracks(), facade.subtitle_tracks()) {
        (Ok(audio), Ok(subtitles)) => {
            println!("{}", json!({"audio": audio, "subtitles": subtitles}));
            true
        }
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("track lookup failed: {}", e);
            false
        }
    }
}

fn cmd_script(facade: &mut PlaybackFacade, args: &[String]) -> bool {
    let Some(path) = args.first() else {
        eprintln!("usage: noplayer script <file.json>");
        return false;
    };
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("cannot read {}: {}", path, e);
            return false;
        }
    };
    let commands = match script::parse(&raw) {
        Ok(commands) => commands,
        Err(e) => {
            eprintln!("invalid script {}: {}", path, e);
            return false;
        }
    };

    let bridges = printing_bridges();
    let mut failures = 0;
    for (step, cmd) in commands.iter().enumerate() {
        match script::run(facade, &bridges, cmd) {
            Ok(result) => println!("{}", json!({"step": step, "ok": result})),
            Err(e) => {
                failures += 1;
                println!("{}", json!({"step": step, "error": e.to_string()}));
            }
        }
    }
    log::info!("noplayer: script finished, {} of {} commands failed", failures, commands.len());
    true
}

fn print_status(facade: &PlaybackFacade) {
    match script::status(facade) {
        Ok(status) => println!("{}", status),
        Err(e) => eprintln!("status unavailable: {}", e),
    }
}

fn print_usage() {
    eprintln!("noplayer — playback facade demo over a headless engine");
    eprintln!();
    eprintln!("  noplayer play <locator> [hls|dash|progressive] [start-ms]");
    eprintln!("  noplayer tracks <locator>");
    eprintln!("  noplayer script <file.json>");
}
