//! Fallback command implementation
//!
//! Renders the prompt-driven fallback song a server returns when its
//! external music provider is unavailable, and prints the response payload.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use robovox_spec::{text_seed, GenerationRequest, StyleTable};
use robovox_synth::{generate_with_profile, SynthError};
use serde::Serialize;

use super::{exit_code_for, report_synth_error};
use crate::commands::render::write_output;

/// Length of a fallback song in seconds.
pub const FALLBACK_SECONDS: f64 = 45.0;

/// Melody steps between fresh random degrees.
pub const FALLBACK_PHRASE_LENGTH: u32 = 16;

/// Tempo used when the request names none.
pub const DEFAULT_BPM: u32 = 120;

/// Slowest accepted tempo.
pub const MIN_BPM: u32 = 80;

/// Fastest accepted tempo.
pub const MAX_BPM: u32 = 170;

const DEFAULT_LINE: &str = "We make a new sound tonight";

/// Options for a fallback render.
#[derive(Debug, Clone)]
pub struct FallbackOptions {
    /// Display genre name, e.g. "Hip-hop".
    pub genre: String,
    /// Requested tempo.
    pub bpm: Option<u32>,
    /// Free-text prompt.
    pub prompt: Option<String>,
    /// Write the WAVE here instead of embedding it.
    pub out: Option<PathBuf>,
}

/// Response payload of the fallback path.
#[derive(Debug, Clone, Serialize)]
pub struct FallbackResponse {
    /// Always "fallback".
    pub provider: &'static str,
    /// Always true: the audio is procedural, not a provider render.
    pub is_mock_audio: bool,
    /// Tempo the song was rendered at, after clamping.
    pub bpm: u32,
    /// Genre name as requested.
    pub target_theme: String,
    /// Theme colour as a hex code.
    pub color_code: &'static str,
    /// Prompt as given, or a placeholder when empty.
    pub original_input: String,
    /// Text for a client-side voice-over.
    pub voice_text: String,
    /// `data:audio/wav;base64,...` URL, or the output path with `--out`.
    pub audio_url: String,
}

/// Maps a display genre name to a style id. Unknown names use the "pop"
/// progression.
pub fn style_for_genre(genre: &str) -> &'static str {
    let key: String = genre
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    match key.as_str() {
        "rock" => "rock",
        "hiphop" => "hiphop",
        "kpop" => "kpop",
        "lullaby" => "lullaby",
        "jazz" => "jazz",
        _ => "pop",
    }
}

/// Clamps a requested tempo into the accepted range.
pub fn clamp_bpm(bpm: Option<u32>) -> u32 {
    bpm.unwrap_or(DEFAULT_BPM).clamp(MIN_BPM, MAX_BPM)
}

/// Theme colour shown next to the song.
pub fn color_code(genre: &str) -> &'static str {
    match genre {
        "Rock" => "#ff4500",
        "Hip-hop" => "#b967ff",
        _ => "#01cdfe",
    }
}

/// Text for the client-side voice-over: the prompt, whitespace collapsed,
/// wrapped in a fixed hook.
pub fn voice_text(genre: &str, prompt: Option<&str>) -> Result<String> {
    let collapsed = Regex::new(r"\s+")?
        .replace_all(prompt.unwrap_or(DEFAULT_LINE), " ")
        .trim()
        .to_string();
    let base = if collapsed.is_empty() {
        DEFAULT_LINE.to_string()
    } else {
        collapsed
    };
    let genre = if genre.is_empty() { "Music" } else { genre };
    Ok(format!(
        "{} vibe, here we go. {}. Feel the rhythm, feel the night. {}.",
        genre, base, base
    ))
}

/// Seed of a fallback song, derived from the request text.
pub fn fallback_seed(genre: &str, bpm: Option<u32>, prompt: Option<&str>) -> u32 {
    text_seed(&format!(
        "{}|{}|{}",
        genre,
        bpm.unwrap_or(DEFAULT_BPM),
        prompt.unwrap_or("")
    ))
}

/// Renders the fallback song and builds the response payload.
pub fn build_response(
    styles: &StyleTable,
    options: &FallbackOptions,
) -> Result<std::result::Result<FallbackResponse, SynthError>> {
    let style_id = style_for_genre(&options.genre);
    let Some(base) = styles.get(style_id) else {
        return Ok(Err(SynthError::style_not_found(style_id)));
    };

    let mut style = base.clone();
    style.walk.phrase_length = Some(FALLBACK_PHRASE_LENGTH);

    let bpm = clamp_bpm(options.bpm);
    let prompt = options.prompt.as_deref();
    let seed = fallback_seed(&options.genre, options.bpm, prompt);
    let request = GenerationRequest::new(style_id, seed, FALLBACK_SECONDS).with_tempo(bpm);

    let result = match generate_with_profile(&style, &request) {
        Ok(result) => result,
        Err(err) => return Ok(Err(err)),
    };

    let audio_url = match &options.out {
        Some(path) => {
            write_output(path, &result)?;
            path.display().to_string()
        }
        None => format!("data:audio/wav;base64,{}", STANDARD.encode(&result.audio.wav_data)),
    };

    Ok(Ok(FallbackResponse {
        provider: "fallback",
        is_mock_audio: true,
        bpm,
        target_theme: options.genre.clone(),
        color_code: color_code(&options.genre),
        original_input: prompt.unwrap_or("Generate random music").to_string(),
        voice_text: voice_text(&options.genre, prompt)?,
        audio_url,
    }))
}

/// Run the fallback command
///
/// Prints the response payload as JSON.
pub fn run(styles: &StyleTable, options: &FallbackOptions) -> Result<ExitCode> {
    match build_response(styles, options)? {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            report_synth_error(&err);
            Ok(exit_code_for(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use robovox_spec::Preset;

    #[test]
    fn test_genre_mapping() {
        assert_eq!(style_for_genre("Jazz"), "jazz");
        assert_eq!(style_for_genre("Rock"), "rock");
        assert_eq!(style_for_genre("Hip-hop"), "hiphop");
        assert_eq!(style_for_genre("K-Pop"), "kpop");
        assert_eq!(style_for_genre("Lullaby"), "lullaby");
        assert_eq!(style_for_genre("Polka"), "pop");
        assert_eq!(style_for_genre(""), "pop");
    }

    #[test]
    fn test_bpm_clamped() {
        assert_eq!(clamp_bpm(None), 120);
        assert_eq!(clamp_bpm(Some(40)), 80);
        assert_eq!(clamp_bpm(Some(300)), 170);
        assert_eq!(clamp_bpm(Some(95)), 95);
    }

    #[test]
    fn test_color_codes() {
        assert_eq!(color_code("Rock"), "#ff4500");
        assert_eq!(color_code("Hip-hop"), "#b967ff");
        assert_eq!(color_code("Jazz"), "#01cdfe");
    }

    #[test]
    fn test_voice_text() {
        assert_eq!(
            voice_text("Rock", Some("  neon   lights\n")).unwrap(),
            "Rock vibe, here we go. neon lights. Feel the rhythm, feel the night. neon lights."
        );
        assert_eq!(
            voice_text("", None).unwrap(),
            "Music vibe, here we go. We make a new sound tonight. \
             Feel the rhythm, feel the night. We make a new sound tonight."
        );
    }

    #[test]
    fn test_seed_uses_request_text() {
        assert_eq!(fallback_seed("Rock", None, None), text_seed("Rock|120|"));
        assert_eq!(fallback_seed("Rock", Some(300), Some("hi")), text_seed("Rock|300|hi"));
    }

    #[test]
    fn test_response_embeds_wave() {
        let styles = StyleTable::builtin(Preset::Fallback);
        let options = FallbackOptions {
            genre: "K-Pop".to_string(),
            bpm: Some(200),
            prompt: Some("city lights".to_string()),
            out: None,
        };
        let response = build_response(&styles, &options).unwrap().unwrap();
        assert_eq!(response.provider, "fallback");
        assert!(response.is_mock_audio);
        assert_eq!(response.bpm, 170);
        assert_eq!(response.target_theme, "K-Pop");

        let encoded = response
            .audio_url
            .strip_prefix("data:audio/wav;base64,")
            .unwrap();
        let wav = STANDARD.decode(encoded).unwrap();
        assert_eq!(wav.len(), 44 + 2 * 22050 * 45);
        assert_eq!(&wav[0..4], b"RIFF");
    }

    #[test]
    fn test_unknown_genre_renders_pop() {
        let styles = StyleTable::builtin(Preset::Fallback);
        let options = FallbackOptions {
            genre: "Polka".to_string(),
            bpm: Some(95),
            prompt: None,
            out: None,
        };
        let response = build_response(&styles, &options).unwrap().unwrap();
        assert_eq!(response.bpm, 95);
        assert_eq!(response.color_code, "#01cdfe");

        // The tracks table has no "pop" style.
        let tracks = StyleTable::builtin(Preset::Tracks);
        let err = build_response(&tracks, &options).unwrap().unwrap_err();
        assert!(matches!(err, SynthError::StyleNotFound { ref id } if id == "pop"));
    }

    #[test]
    fn test_missing_style_in_custom_table() {
        let profile = StyleTable::builtin(Preset::Tracks).get("rock").unwrap().clone();
        let styles = StyleTable::new(vec![profile]).unwrap();
        let options = FallbackOptions {
            genre: "Jazz".to_string(),
            bpm: None,
            prompt: None,
            out: None,
        };
        let err = build_response(&styles, &options).unwrap().unwrap_err();
        assert!(matches!(err, SynthError::StyleNotFound { .. }));
    }
}
