mod api;
mod app;
mod config;
mod input;
mod lyrics;
mod player;
mod queue;
mod view;

use anyhow::Context;
use app::state::{PlayMode, PlayerState};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "lyricue", version, about = "Synchronized lyrics player")]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge lyric files and print them (headless).
    Lyrics {
        /// Line-timed lyrics ([mm:ss.xx]text).
        #[arg(long)]
        lyric: PathBuf,
        /// Line-timed translation.
        #[arg(long)]
        trans: Option<PathBuf>,
        /// Word-timed lyrics ([start,duration]word(start,duration)...).
        #[arg(long)]
        yrc: Option<PathBuf>,
        /// Word-timed romanization.
        #[arg(long)]
        roma: Option<PathBuf>,
        /// Only print the line active at this position, in seconds.
        #[arg(long)]
        at: Option<f64>,
        /// Print merged lines as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Fetch a track from the music server and print its lyrics.
    Detail {
        id: String,
        /// Print merged lines as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Play track files against the playback clock, following lyrics.
    Play {
        /// JSON files holding one track or a list of tracks.
        #[arg(required = true)]
        tracks: Vec<PathBuf>,
        /// Track files queued ahead of the others, last given plays first.
        #[arg(long)]
        next: Vec<PathBuf>,
        #[arg(long, value_enum)]
        mode: Option<PlayMode>,
        /// Stop after this many tracks have finished.
        #[arg(long)]
        max_tracks: Option<usize>,
        /// Never contact the music server for missing lyrics.
        #[arg(long)]
        offline: bool,
    },
    /// Show or persist the default play mode.
    Mode {
        #[arg(long, value_enum)]
        set: Option<PlayMode>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;

    match cli.command {
        Command::Lyrics {
            lyric,
            trans,
            yrc,
            roma,
            at,
            json,
        } => {
            let lyric = read_text(&lyric)?;
            let trans = read_optional(trans.as_deref())?;
            let yrc = read_optional(yrc.as_deref())?;
            let roma = read_optional(roma.as_deref())?;

            let merged = lyrics::format_lyrics(lyrics::LyricPayload {
                lyric: Some(&lyric),
                translation: trans.as_deref(),
                romanization: roma.as_deref(),
                word_timed: yrc.as_deref(),
            });

            let mut state = PlayerState::default();
            state.apply_lyrics(merged);
            match at {
                Some(position) => {
                    state.set_play_position(position);
                    match view::render_active_line(&state) {
                        Some(line) => println!("{line}"),
                        None => println!("(no active line)"),
                    }
                }
                None => print_lyrics(&state, json)?,
            }
        }
        Command::Detail { id, json } => {
            let client = api::MusicApiClient::new(&cfg.api)?;
            let track = client
                .music_detail(&id)
                .await?
                .with_context(|| format!("track {id} not found"))?;
            println!("{}", track.display_title());

            let mut state = PlayerState::default();
            if let Some(extra) = &track.extra {
                state.apply_lyrics(lyrics::format_lyrics(extra.lyric_payload()));
            }
            print_lyrics(&state, json)?;
        }
        Command::Play {
            tracks,
            next,
            mode,
            max_tracks,
            offline,
        } => {
            let mut playlist = queue::Playlist::new();
            for path in &tracks {
                playlist.append(read_tracks(path)?);
            }
            for path in &next {
                playlist.prepend(read_tracks(path)?);
            }
            let first = playlist.get(0).cloned().context("no tracks to play")?;

            let (tx, rx) = tokio::sync::mpsc::channel(256);
            let tick = std::time::Duration::from_millis(cfg.player.tick_ms.max(10));
            let engine = player::ClockEngine::spawn(tx.clone(), tick);
            let client = if offline {
                None
            } else {
                Some(api::MusicApiClient::new(&cfg.api)?)
            };

            let mut app = app::App::new(cfg, engine, client, tx.clone());
            if let Some(mode) = mode {
                app.state_mut().set_play_mode(mode);
            }
            if let Some(max) = max_tracks {
                app.quit_after(max);
            }
            *app.state_mut().playlist_mut() = playlist;

            input::spawn_input_task(tx);
            app.select_track(first).await;
            app.run(rx).await?;
        }
        Command::Mode { set } => match set {
            Some(mode) => {
                let mut cfg = cfg;
                cfg.player.play_mode = mode;
                config::save(&cfg, cli.config.as_deref()).context("save config")?;
                println!("Default play mode: {}", mode.label());
            }
            None => println!("{}", cfg.player.play_mode.label()),
        },
    }

    Ok(())
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn read_optional(path: Option<&Path>) -> anyhow::Result<Option<String>> {
    path.map(read_text).transpose()
}

fn read_tracks(path: &Path) -> anyhow::Result<Vec<api::Track>> {
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum TrackFile {
        Many(Vec<api::Track>),
        One(Box<api::Track>),
    }

    let raw = read_text(path)?;
    let parsed: TrackFile =
        serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(match parsed {
        TrackFile::Many(tracks) => tracks,
        TrackFile::One(track) => vec![*track],
    })
}

fn print_lyrics(state: &PlayerState, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(state.lyrics())?);
        return Ok(());
    }

    if state.lyrics().is_empty() {
        println!("(no lyrics)");
        return Ok(());
    }
    for line in state.lyrics() {
        let mut out = format!("[{}] {}", view::format_clock(line.time as f64 / 1000.0), line.lyric);
        if state.has_romanization()
            && let Some(roma) = &line.roma
        {
            out.push_str(&format!("  <{}>", roma.trim()));
        }
        if let Some(trans) = line.visible_translation() {
            out.push_str(&format!("  ({trans})"));
        }
        println!("{out}");
    }
    Ok(())
}
