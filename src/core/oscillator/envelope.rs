/// Linear attack/sustain/release gain curve over one block of samples.
///
/// Ramping each block in and out keeps note transitions free of audible
/// clicks at buffer boundaries. The curve is stateless and recomputed per
/// block.
#[derive(Debug, Clone, Copy)]
pub struct ArEnvelope {
    attack: usize,
    release: usize,
}

impl ArEnvelope {
    pub fn new(attack_samples: usize, release_samples: usize) -> Self {
        Self {
            attack: attack_samples,
            release: release_samples,
        }
    }

    pub fn from_seconds(attack: f32, release: f32, sample_rate: u32) -> Self {
        Self::new(
            (attack * sample_rate as f32) as usize,
            (release * sample_rate as f32) as usize,
        )
    }

    /// Write one gain per sample: 0→1 over the attack, 1 through the
    /// sustain, 1→0 over the release.
    pub fn fill(&self, gains: &mut [f32]) {
        let total = gains.len();
        if total == 0 {
            return;
        }
        let (attack, release) = self.segments(total);
        for (i, gain) in gains.iter_mut().enumerate() {
            *gain = if i < attack {
                i as f32 / attack as f32
            } else if i >= total - release {
                let into_release = i - (total - release);
                1.0 - (into_release + 1) as f32 / release as f32
            } else {
                1.0
            };
        }
    }

    // When attack + release exceed the block, shrink both proportionally;
    // the sustain segment disappears.
    fn segments(&self, total: usize) -> (usize, usize) {
        if self.attack + self.release <= total {
            (self.attack, self.release)
        } else {
            let sum = (self.attack + self.release) as f32;
            let attack = (self.attack as f32 / sum * total as f32) as usize;
            (attack, total - attack)
        }
    }
}

/// Proportional attack/decay/sustain/release curve over a whole note.
///
/// Segment lengths are fractions of the total sample count (`sustain` is
/// the held gain level, not a length). Used by the offline note renderer,
/// where the full note lifetime is known up front.
#[derive(Debug, Clone, Copy)]
pub struct AdsrEnvelope {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl AdsrEnvelope {
    pub const fn new(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack,
            decay,
            sustain,
            release,
        }
    }

    pub fn fill(&self, gains: &mut [f32]) {
        let total = gains.len();
        let attack = (self.attack * total as f32) as usize;
        let decay = (self.decay * total as f32) as usize;
        let release = (self.release * total as f32) as usize;
        let sustain_start = attack + decay;
        let release_start = total.saturating_sub(release);

        for (i, gain) in gains.iter_mut().enumerate() {
            *gain = if i < attack {
                i as f32 / attack as f32
            } else if i < sustain_start {
                1.0 - (1.0 - self.sustain) * ((i - attack) as f32 / decay as f32)
            } else if i < release_start {
                self.sustain
            } else {
                self.sustain * (1.0 - (i - release_start + 1) as f32 / release as f32)
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ar_starts_and_ends_at_zero() {
        let envelope = ArEnvelope::new(100, 200);
        let mut gains = vec![0.0f32; 1024];
        envelope.fill(&mut gains);

        assert_eq!(gains.len(), 1024);
        assert_eq!(gains[0], 0.0);
        assert!(gains[1023].abs() < 1e-6);
        assert!(gains.iter().all(|&g| (0.0..=1.0).contains(&g)));
    }

    #[test]
    fn ar_sustain_holds_full_gain() {
        let envelope = ArEnvelope::new(10, 10);
        let mut gains = vec![0.0f32; 100];
        envelope.fill(&mut gains);

        for &gain in &gains[10..90] {
            assert_eq!(gain, 1.0);
        }
    }

    #[test]
    fn ar_attack_is_monotonically_rising() {
        let envelope = ArEnvelope::new(50, 10);
        let mut gains = vec![0.0f32; 128];
        envelope.fill(&mut gains);

        for pair in gains[..50].windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn ar_clamps_when_segments_exceed_block() {
        // 441 + 4410 samples of ramp into a 1024-sample block.
        let envelope = ArEnvelope::from_seconds(0.01, 0.1, 44100);
        let mut gains = vec![0.0f32; 1024];
        envelope.fill(&mut gains);

        assert_eq!(gains.len(), 1024);
        assert_eq!(gains[0], 0.0);
        assert!(gains[1023].abs() < 1e-2);
        assert!(gains.iter().all(|&g| (0.0..=1.0).contains(&g)));
        // The peak still reaches the attack/release boundary.
        let peak = gains.iter().cloned().fold(0.0f32, f32::max);
        assert!(peak > 0.9);
    }

    #[test]
    fn ar_empty_block_is_a_no_op() {
        let envelope = ArEnvelope::new(10, 10);
        let mut gains: Vec<f32> = Vec::new();
        envelope.fill(&mut gains);
        assert!(gains.is_empty());
    }

    #[test]
    fn adsr_decays_to_sustain_level() {
        let envelope = AdsrEnvelope::new(0.1, 0.1, 0.7, 0.1);
        let mut gains = vec![0.0f32; 1000];
        envelope.fill(&mut gains);

        assert_eq!(gains[0], 0.0);
        // Between decay end and release start the gain sits at the
        // sustain level.
        for &gain in &gains[200..900] {
            assert!((gain - 0.7).abs() < 1e-6);
        }
        assert!(gains[999].abs() < 1e-2);
    }
}
