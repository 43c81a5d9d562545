//! Offline note rendering: WAV files per (instrument, note) pair.
//!
//! Not time-constrained; allocates freely and shares the oscillator and
//! envelope primitives with the real-time path.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};
use log::info;

use crate::core::config::RenderConfig;
use crate::core::oscillator::instrument::{Instrument, ALL};
use crate::core::oscillator::{duration_samples, render_partials};

/// Note-name-to-frequency table, equal tempered, C4 through C5.
pub const NOTES: [(&str, f32); 8] = [
    ("C4", 261.63),
    ("D4", 293.66),
    ("E4", 329.63),
    ("F4", 349.23),
    ("G4", 392.00),
    ("A4", 440.00),
    ("B4", 493.88),
    ("C5", 523.25),
];

/// Length of each rendered note file in seconds.
pub const NOTE_DURATION: f32 = 0.5;

/// Render one note through the instrument's harmonic table and envelope.
pub fn render_note(
    instrument: &Instrument,
    frequency: f32,
    duration: f32,
    config: &RenderConfig,
) -> Vec<f32> {
    let samples = duration_samples(duration, config.sample_rate);
    let mut tone = vec![0.0f32; samples];
    render_partials(
        &mut tone,
        frequency,
        1.0,
        config.sample_rate,
        instrument.harmonics,
    );

    let mut gains = vec![0.0f32; samples];
    instrument.envelope.fill(&mut gains);
    for (sample, gain) in tone.iter_mut().zip(&gains) {
        *sample *= gain;
    }
    tone
}

/// Write a mono 16-bit PCM WAV file. Samples are clamped to [-1, 1]
/// before conversion.
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for &sample in samples {
        let value = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        writer.write_sample(value)?;
    }
    writer
        .finalize()
        .with_context(|| format!("failed to finalize {}", path.display()))?;
    Ok(())
}

/// Render the full pack: `out_dir/<instrument>/<NOTE>.wav` for every
/// instrument and note.
pub fn render_note_pack(out_dir: &Path, config: &RenderConfig) -> Result<()> {
    for instrument in &ALL {
        let dir = out_dir.join(instrument.name);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;

        info!("rendering {} notes to {}", instrument.name, dir.display());
        for &(name, frequency) in &NOTES {
            let tone = render_note(instrument, frequency, NOTE_DURATION, config);
            write_wav(&dir.join(format!("{name}.wav")), &tone, config.sample_rate)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::oscillator::instrument::PIANO;

    #[test]
    fn half_second_note_has_22050_samples() {
        let config = RenderConfig::default();
        let tone = render_note(&PIANO, 440.0, 0.5, &config);
        assert_eq!(tone.len(), 22050);
    }

    #[test]
    fn rendered_note_starts_and_ends_near_silence() {
        let config = RenderConfig::default();
        let tone = render_note(&PIANO, 440.0, 0.5, &config);
        assert!(tone[0].abs() < 1e-6);
        assert!(tone.last().unwrap().abs() < 1e-2);
    }

    #[test]
    fn wav_file_is_mono_16_bit_with_expected_frames() {
        let config = RenderConfig::default();
        let tone = render_note(&PIANO, 440.0, 0.5, &config);

        let dir = std::env::temp_dir().join(format!("polytone-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("A4.wav");
        write_wav(&path, &tone, config.sample_rate).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(reader.duration(), 22050);

        fs::remove_dir_all(&dir).ok();
    }
}
