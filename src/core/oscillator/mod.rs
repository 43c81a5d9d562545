pub mod envelope;
pub mod instrument;

use std::f32::consts::PI;

/// The fundamental alone, weight 1 at multiplier 1.
pub const FUNDAMENTAL: &[(f32, f32)] = &[(1.0, 1.0)];

/// Fill `out` with `amplitude * sin(2π·f·t)` evaluated at `t = i / sample_rate`.
///
/// The real-time mix path uses this directly; instrument timbres go
/// through [`render_partials`] with their own harmonic tables.
pub fn render_tone(out: &mut [f32], frequency: f32, amplitude: f32, sample_rate: u32) {
    render_partials(out, frequency, amplitude, sample_rate, FUNDAMENTAL);
}

/// Weighted sum of sine partials: one `(weight, frequency multiplier)`
/// pair per harmonic. Callers guarantee `frequency > 0`.
pub fn render_partials(
    out: &mut [f32],
    frequency: f32,
    amplitude: f32,
    sample_rate: u32,
    harmonics: &[(f32, f32)],
) {
    let sample_rate = sample_rate as f32;
    for (i, sample) in out.iter_mut().enumerate() {
        let t = i as f32 / sample_rate;
        let mut value = 0.0;
        for &(weight, multiplier) in harmonics {
            value += weight * (2.0 * PI * frequency * multiplier * t).sin();
        }
        *sample = amplitude * value;
    }
}

/// Number of samples covering `duration` seconds at `sample_rate`.
pub fn duration_samples(duration: f32, sample_rate: u32) -> usize {
    (duration * sample_rate as f32).round() as usize
}
