//! Robovox CLI - Command-line interface for procedural song generation
//!
//! This binary renders single songs, batches of tracks with their metadata
//! index, and the prompt-driven fallback song, and inspects WAVE files.

mod cli_args;

use std::process::ExitCode;

use clap::Parser;
use robovox_cli::commands::{batch, fallback, inspect, map_vocals, render, styles};
use robovox_cli::config::load_styles;
use tracing_subscriber::EnvFilter;

use cli_args::{Cli, Commands};
use robovox_cli::config::PresetArg;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

/// Preset in effect: the explicit flag, else the command's own default.
fn effective_preset(cli: &Cli) -> PresetArg {
    cli.preset.unwrap_or(match cli.command {
        Commands::Fallback { .. } => PresetArg::Fallback,
        _ => PresetArg::Tracks,
    })
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let preset = effective_preset(&cli);
    let table = load_styles(preset, cli.styles.as_deref())?;

    match cli.command {
        Commands::Batch {
            out,
            count,
            duration,
            sample_rate,
            url_prefix,
            json,
        } => {
            let mut options = batch::BatchOptions::for_preset(preset.into());
            if let Some(out) = out {
                if url_prefix.is_none() {
                    let name = out
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    options.url_prefix = format!("/{}", name);
                }
                options.out_dir = out;
            }
            if let Some(prefix) = url_prefix {
                options.url_prefix = prefix;
            }
            if let Some(count) = count {
                options.count = count;
            }
            if let Some(duration) = duration {
                options.duration = duration;
            }
            options.sample_rate = sample_rate;
            batch::run(&table, &options, json)
        }
        Commands::Render {
            style,
            seed,
            duration,
            sample_rate,
            bpm,
            out,
            json,
        } => render::run(
            &table,
            &render::RenderOptions {
                style,
                seed,
                duration,
                sample_rate,
                bpm,
                out,
            },
            json,
        ),
        Commands::Fallback {
            genre,
            bpm,
            prompt,
            out,
        } => fallback::run(
            &table,
            &fallback::FallbackOptions {
                genre,
                bpm,
                prompt,
                out,
            },
        ),
        Commands::Inspect { file, json } => inspect::run(&file, json),
        Commands::MapVocals {
            tracks,
            source,
            url_prefix,
            json,
        } => map_vocals::run(
            &map_vocals::MapVocalsOptions {
                tracks,
                source,
                url_prefix,
            },
            json,
        ),
        Commands::Styles { json } => styles::run(&table, json),
    }
}

fn main() -> ExitCode {
    init_tracing();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parses_render() {
        let cli = Cli::try_parse_from([
            "robovox", "render", "--style", "rock", "--seed", "7", "--bpm", "128", "--out", "rock.wav",
        ])
        .unwrap();
        assert_eq!(cli.preset, None);
        assert_eq!(effective_preset(&cli), PresetArg::Tracks);
        match cli.command {
            Commands::Render {
                style,
                seed,
                duration,
                sample_rate,
                bpm,
                out,
                json,
            } => {
                assert_eq!(style, "rock");
                assert_eq!(seed, 7);
                assert_eq!(duration, 8.0);
                assert_eq!(sample_rate, 22050);
                assert_eq!(bpm, Some(128));
                assert_eq!(out, PathBuf::from("rock.wav"));
                assert!(!json);
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_cli_parses_batch_with_global_preset() {
        let cli = Cli::try_parse_from(["robovox", "batch", "--preset", "vocal", "--count", "2", "--json"])
            .unwrap();
        assert_eq!(cli.preset, Some(PresetArg::Vocal));
        assert_eq!(effective_preset(&cli), PresetArg::Vocal);
        match cli.command {
            Commands::Batch { count, out, json, .. } => {
                assert_eq!(count, Some(2));
                assert!(out.is_none());
                assert!(json);
            }
            _ => panic!("expected batch command"),
        }
    }

    #[test]
    fn test_cli_parses_fallback_defaults() {
        let cli = Cli::try_parse_from(["robovox", "fallback"]).unwrap();
        assert_eq!(effective_preset(&cli), PresetArg::Fallback);
        match cli.command {
            Commands::Fallback { genre, bpm, prompt, out } => {
                assert_eq!(genre, "Jazz");
                assert!(bpm.is_none());
                assert!(prompt.is_none());
                assert!(out.is_none());
            }
            _ => panic!("expected fallback command"),
        }
    }

    #[test]
    fn test_cli_parses_map_vocals() {
        let cli = Cli::try_parse_from([
            "robovox", "map-vocals", "--tracks", "tracks.json", "--source", "assets",
        ])
        .unwrap();
        match cli.command {
            Commands::MapVocals { url_prefix, .. } => {
                assert_eq!(url_prefix, "/tracks_real_assets");
            }
            _ => panic!("expected map-vocals command"),
        }
    }

    #[test]
    fn test_explicit_preset_overrides_fallback_default() {
        let cli = Cli::try_parse_from(["robovox", "fallback", "--preset", "tracks"]).unwrap();
        assert_eq!(effective_preset(&cli), PresetArg::Tracks);
    }

    #[test]
    fn test_cli_rejects_unknown_preset() {
        assert!(Cli::try_parse_from(["robovox", "styles", "--preset", "polka"]).is_err());
    }

    #[test]
    fn test_cli_requires_render_output() {
        assert!(Cli::try_parse_from(["robovox", "render", "--style", "rock"]).is_err());
    }
}
