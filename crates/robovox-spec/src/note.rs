//! Equal-tempered pitch helpers.

const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Converts a MIDI-style note number to frequency in Hz (A4 = 69 = 440 Hz).
///
/// Accepts fractional and negative note numbers so semitone offsets can be
/// applied before conversion.
pub fn midi_to_frequency(note: f64) -> f64 {
    440.0 * 2.0_f64.powf((note - 69.0) / 12.0)
}

/// Returns the scientific pitch name of a MIDI note (60 = "C4").
pub fn note_name(midi_note: u8) -> String {
    let pitch_class = NOTE_NAMES[(midi_note % 12) as usize];
    let octave = (midi_note / 12) as i32 - 1;
    format!("{}{}", pitch_class, octave)
}
