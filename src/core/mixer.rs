use std::sync::Arc;

use crate::core::config::RenderConfig;
use crate::core::notes::ActiveNotes;
use crate::core::oscillator::envelope::ArEnvelope;
use crate::core::oscillator::render_tone;

/// Combines every active frequency into one mono block per render
/// invocation.
///
/// All scratch storage is sized once at stream setup and reused, so the
/// steady-state callback does no heap work. An oversized callback still
/// renders, at the cost of a one-off reallocation.
pub struct Mixer {
    config: RenderConfig,
    notes: Arc<ActiveNotes>,
    envelope: ArEnvelope,
    /// Mixed output for the current invocation.
    block: Vec<f32>,
    /// Per-voice tone segment, reused for each frequency.
    tone: Vec<f32>,
    /// Envelope gains for the current block length.
    gains: Vec<f32>,
    /// Copy-out target for the shared note set.
    frequencies: Vec<f32>,
}

impl Mixer {
    pub fn new(config: RenderConfig, notes: Arc<ActiveNotes>, max_frames: usize) -> Self {
        let envelope = ArEnvelope::from_seconds(config.attack, config.release, config.sample_rate);
        Self {
            config,
            notes,
            envelope,
            block: Vec::with_capacity(max_frames),
            tone: Vec::with_capacity(max_frames),
            gains: Vec::with_capacity(max_frames),
            frequencies: Vec::with_capacity(32),
        }
    }

    /// Render `frames` samples and return the mixed block.
    ///
    /// An empty note set is the steady-state idle case: the block is
    /// zeroed and returned without touching the synthesis path. The note
    /// set itself is never mutated here.
    pub fn render_block(&mut self, frames: usize) -> &[f32] {
        self.block.clear();
        self.block.resize(frames, 0.0);

        if !self.notes.snapshot_into(&mut self.frequencies) || self.frequencies.is_empty() {
            return &self.block;
        }

        self.gains.clear();
        self.gains.resize(frames, 0.0);
        self.envelope.fill(&mut self.gains);

        self.tone.clear();
        self.tone.resize(frames, 0.0);

        let amplitude = self.config.amplitude;
        let sample_rate = self.config.sample_rate;
        for &frequency in self.frequencies.iter() {
            render_tone(&mut self.tone, frequency, amplitude, sample_rate);
            for ((out, &tone), &gain) in self.block.iter_mut().zip(&self.tone).zip(&self.gains) {
                *out += tone * gain;
            }
        }

        // Simple energy normalization: dividing by the current voice
        // count means a note added mid-sustain changes the perceived
        // loudness of the ones already sounding.
        let scale = 1.0 / self.frequencies.len() as f32;
        for sample in self.block.iter_mut() {
            *sample *= scale;
        }

        &self.block
    }
}
