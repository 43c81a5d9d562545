use std::sync::RwLock;

use log::warn;

/// The set of currently sounding frequencies, shared between the control
/// and render contexts.
///
/// `replace` and `clear` come from the command dispatcher; the audio
/// callback calls `snapshot_into` once per invocation and mixes from its
/// own copy. The lock is only ever held long enough to copy contents in
/// or out, so neither context can stall the other mid-mix.
#[derive(Debug, Default)]
pub struct ActiveNotes {
    frequencies: RwLock<Vec<f32>>,
}

impl ActiveNotes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the previous contents and install `frequencies` wholesale.
    ///
    /// Non-finite and non-positive values are skipped; duplicates
    /// collapse, since a frequency is the unit of note identity.
    pub fn replace(&self, frequencies: &[f32]) {
        let mut next: Vec<f32> = frequencies
            .iter()
            .copied()
            .filter(|f| {
                let valid = f.is_finite() && *f > 0.0;
                if !valid {
                    warn!("ignoring invalid frequency {f}");
                }
                valid
            })
            .collect();
        next.sort_by(f32::total_cmp);
        next.dedup();

        match self.frequencies.write() {
            Ok(mut guard) => *guard = next,
            Err(_) => warn!("note set lock poisoned, replace dropped"),
        }
    }

    /// Atomically empty the set.
    pub fn clear(&self) {
        match self.frequencies.write() {
            Ok(mut guard) => guard.clear(),
            Err(_) => warn!("note set lock poisoned, clear dropped"),
        }
    }

    /// Copy the current contents into `out`.
    ///
    /// Returns false when the lock is unavailable; `out` is left empty
    /// and the caller should render silence for this invocation.
    pub fn snapshot_into(&self, out: &mut Vec<f32>) -> bool {
        out.clear();
        match self.frequencies.read() {
            Ok(guard) => {
                out.extend_from_slice(&guard);
                true
            }
            Err(_) => false,
        }
    }

    /// Owned snapshot, for callers outside the render path.
    pub fn snapshot(&self) -> Vec<f32> {
        let mut out = Vec::new();
        self.snapshot_into(&mut out);
        out
    }
}
