//! Built-in style tables.

use super::{
    DrumKit, FormantSet, HarmonyVariation, Hit, Kick, MasteringParams, MelodicWalk, Partial,
    StyleProfile, TempoRange, VocalTimbre, VoiceLevels,
};

/// Built-in preset tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Instrumental backing tracks with a faint harmonic voice.
    Tracks,
    /// Vocal-forward assets with vowel formants.
    Vocal,
    /// Prompt-driven fallback songs with per-song harmony variation.
    Fallback,
}

impl Preset {
    /// All presets in display order.
    pub const ALL: [Preset; 3] = [Preset::Tracks, Preset::Vocal, Preset::Fallback];

    /// Preset name as used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Tracks => "tracks",
            Preset::Vocal => "vocal",
            Preset::Fallback => "fallback",
        }
    }

    /// Looks up a preset by name.
    pub fn by_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    /// Builds the preset's profiles.
    pub(super) fn profiles(&self) -> Vec<StyleProfile> {
        match self {
            Preset::Tracks => tracks_profiles(),
            Preset::Vocal => vocal_profiles(),
            Preset::Fallback => fallback_profiles(),
        }
    }
}

fn base_profile(id: &str, bpm: [u32; 2], roots: &[u8], scale: &[u8], drive: f64) -> StyleProfile {
    StyleProfile {
        id: id.to_string(),
        tempo: TempoRange::from(bpm),
        roots: roots.to_vec(),
        scale: scale.to_vec(),
        drive,
        lead_transpose: 0,
        voices: VoiceLevels::default(),
        walk: MelodicWalk::default(),
        variation: None,
        vocal: None,
        drums: DrumKit::default(),
        mastering: MasteringParams::default(),
    }
}

fn hum() -> VocalTimbre {
    VocalTimbre {
        interval: 5,
        vibrato_rate: 5.0,
        vibrato_depth: 0.012,
        carrier_gain: 1.0,
        level: 0.028,
        syllable_rate: 0.0,
        phrase_rate: 2.0,
        offbeat_level: 1.0,
        degree_shift: 0,
        partials_follow_vibrato: false,
        formants: FormantSet::Harmonic {
            partials: vec![Partial {
                ratio: 2.3,
                gain: 0.3,
            }],
        },
    }
}

fn soft_kit() -> DrumKit {
    let mut kit = DrumKit::default();
    kit.kick.decay = 14.0;
    kit.snare.gain = 0.08;
    kit.hat.gain = 0.03;
    kit
}

fn tracks_profiles() -> Vec<StyleProfile> {
    let mut rock = base_profile("rock", [120, 150], &[40, 43, 45, 38], &[0, 2, 3, 5, 7, 10, 12], 0.9);
    rock.vocal = Some(hum());

    let mut hiphop = base_profile("hiphop", [78, 100], &[33, 36, 31, 29], &[0, 3, 5, 7, 10, 12], 0.75);
    hiphop.vocal = Some(hum());

    let mut kpop = base_profile(
        "kpop",
        [105, 132],
        &[48, 53, 55, 46],
        &[0, 2, 4, 5, 7, 9, 11, 12],
        0.8,
    );
    kpop.lead_transpose = 12;
    kpop.vocal = Some(hum());

    let mut lullaby = base_profile("lullaby", [68, 88], &[45, 48, 50, 43], &[0, 2, 4, 7, 9, 12], 0.45);
    lullaby.drums = soft_kit();

    let mut jazz = base_profile("jazz", [95, 128], &[48, 53, 55, 50], &[0, 2, 3, 5, 7, 10, 12], 0.65);
    jazz.vocal = Some(hum());

    vec![rock, hiphop, kpop, lullaby, jazz]
}

fn vowel(frequencies: [f64; 3]) -> VocalTimbre {
    VocalTimbre {
        interval: 7,
        vibrato_rate: 5.2,
        vibrato_depth: 0.01,
        carrier_gain: 0.45,
        level: 0.22,
        syllable_rate: 0.75,
        phrase_rate: 1.25,
        offbeat_level: 0.55,
        degree_shift: 0,
        partials_follow_vibrato: false,
        formants: FormantSet::Vowel {
            frequencies,
            gains: [0.28, 0.18, 0.12],
        },
    }
}

fn vocal_kit(soft: bool) -> DrumKit {
    DrumKit {
        kick: Kick {
            length: 0.15,
            decay: if soft { 12.0 } else { 19.0 },
            start_freq: 110.0,
            sweep: 65.0,
            gain: 0.5,
        },
        snare: Hit {
            length: 0.12,
            decay: 24.0,
            gain: if soft { 0.07 } else { 0.18 },
        },
        hat: Hit {
            length: 0.025,
            decay: 110.0,
            gain: if soft { 0.025 } else { 0.07 },
        },
    }
}

fn vocal_profile(
    id: &str,
    bpm: [u32; 2],
    roots: &[u8],
    scale: &[u8],
    drive: f64,
    formants: [f64; 3],
) -> StyleProfile {
    let mut profile = base_profile(id, bpm, roots, scale, drive);
    profile.voices = VoiceLevels {
        bass: 0.16,
        lead_accent: 0.12,
        lead_weak: 0.075,
        saw_blend: 0.65,
        ..VoiceLevels::default()
    };
    profile.walk.thresholds = [0.22, 0.5, 0.75, 0.88];
    profile.vocal = Some(vowel(formants));
    profile.drums = vocal_kit(id == "lullaby");
    profile.mastering = MasteringParams {
        drive: 1.25,
        gain: 0.72,
        fade_in: 0.08,
        fade_out: 0.2,
    };
    profile
}

fn vocal_profiles() -> Vec<StyleProfile> {
    let mut kpop = vocal_profile(
        "kpop",
        [104, 132],
        &[48, 53, 55, 46],
        &[0, 2, 4, 5, 7, 9, 11, 12],
        0.82,
        [800.0, 1400.0, 2900.0],
    );
    kpop.lead_transpose = 12;

    vec![
        vocal_profile(
            "rock",
            [118, 146],
            &[40, 43, 45, 38],
            &[0, 2, 3, 5, 7, 10, 12],
            0.9,
            [700.0, 1200.0, 2600.0],
        ),
        vocal_profile(
            "hiphop",
            [76, 98],
            &[33, 36, 31, 29],
            &[0, 3, 5, 7, 10, 12],
            0.75,
            [500.0, 1100.0, 2300.0],
        ),
        kpop,
        vocal_profile(
            "lullaby",
            [66, 86],
            &[45, 48, 50, 43],
            &[0, 2, 4, 7, 9, 12],
            0.45,
            [600.0, 1000.0, 2200.0],
        ),
        vocal_profile(
            "jazz",
            [92, 126],
            &[48, 53, 55, 50],
            &[0, 2, 3, 5, 7, 10, 12],
            0.68,
            [650.0, 1250.0, 2550.0],
        ),
    ]
}

const FALLBACK_SCALES: [&[u8]; 3] = [
    &[0, 2, 3, 5, 7, 10, 12],
    &[0, 2, 4, 5, 7, 9, 12],
    &[0, 3, 5, 7, 10, 12],
];

fn sung_line() -> VocalTimbre {
    VocalTimbre {
        interval: 12,
        vibrato_rate: 5.3,
        vibrato_depth: 0.012,
        carrier_gain: 1.0,
        level: 0.05,
        syllable_rate: 1.0,
        phrase_rate: 1.5,
        offbeat_level: 1.0,
        degree_shift: 1,
        partials_follow_vibrato: true,
        formants: FormantSet::Harmonic {
            partials: vec![
                Partial {
                    ratio: 2.2,
                    gain: 0.35,
                },
                Partial {
                    ratio: 3.1,
                    gain: 0.2,
                },
            ],
        },
    }
}

fn fallback_profile(id: &str, roots: &[u8]) -> StyleProfile {
    let mut profile = base_profile(id, [80, 170], roots, FALLBACK_SCALES[0], 1.0);
    profile.voices = VoiceLevels {
        bass: 0.17,
        lead_accent: 0.09,
        lead_weak: 0.0495,
        saw_blend: 0.7,
        bass_lfo_rate: 0.22,
        bass_lfo_depth: 0.05,
    };
    profile.walk = MelodicWalk {
        thresholds: [0.2, 0.45, 0.7, 0.82],
        phrase_length: Some(16),
    };
    profile.variation = Some(HarmonyVariation {
        lift_threshold: 0.7,
        lift: 2,
        scales: FALLBACK_SCALES.iter().map(|scale| scale.to_vec()).collect(),
        bar_offsets: 4,
    });
    profile.vocal = Some(sung_line());
    profile.drums = DrumKit {
        kick: Kick {
            length: 0.18,
            decay: 20.0,
            start_freq: 120.0,
            sweep: 80.0,
            gain: 0.7,
        },
        snare: Hit {
            length: 0.16,
            decay: 28.0,
            gain: 0.35,
        },
        hat: Hit {
            length: 0.03,
            decay: 120.0,
            gain: 0.11,
        },
    };
    profile.mastering = MasteringParams {
        drive: 1.4,
        gain: 0.65,
        fade_in: 0.0,
        fade_out: 1.0,
    };
    profile
}

fn fallback_profiles() -> Vec<StyleProfile> {
    vec![
        fallback_profile("rock", &[52, 55, 57, 50]),
        fallback_profile("hiphop", &[45, 48, 43, 41]),
        fallback_profile("kpop", &[57, 62, 64, 55]),
        fallback_profile("lullaby", &[53, 57, 60, 55]),
        fallback_profile("jazz", &[60, 65, 67, 62]),
        fallback_profile("pop", &[60, 57, 65, 62]),
    ]
}
