use super::envelope::AdsrEnvelope;

/// An instrument timbre: a harmonic table plus an envelope shape.
///
/// Timbres differ only in these two pieces; synthesis itself is shared
/// with the real-time path.
#[derive(Debug, Clone, Copy)]
pub struct Instrument {
    pub name: &'static str,
    /// (weight, frequency multiplier) pairs, fundamental first.
    pub harmonics: &'static [(f32, f32)],
    pub envelope: AdsrEnvelope,
}

/// Strong low harmonics, fast attack, long tail.
pub const PIANO: Instrument = Instrument {
    name: "piano",
    harmonics: &[(1.0, 1.0), (0.6, 2.0), (0.4, 3.0), (0.2, 4.0)],
    envelope: AdsrEnvelope::new(0.02, 0.1, 0.3, 0.3),
};

/// Slightly detuned fundamentals for width.
pub const SYNTH: Instrument = Instrument {
    name: "synth",
    harmonics: &[(1.0, 1.0), (0.5, 1.01), (0.5, 0.99), (0.3, 2.0)],
    envelope: AdsrEnvelope::new(0.1, 0.1, 0.6, 0.2),
};

/// Inharmonic partials, sharp attack, long decay.
pub const BELL: Instrument = Instrument {
    name: "bell",
    harmonics: &[(1.0, 1.0), (0.7, 2.4), (0.5, 3.0), (0.3, 4.7)],
    envelope: AdsrEnvelope::new(0.01, 0.1, 0.2, 0.5),
};

pub const ALL: [Instrument; 3] = [PIANO, SYNTH, BELL];
