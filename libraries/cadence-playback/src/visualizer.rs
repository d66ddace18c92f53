//! Visualizer sampling
//!
//! Pulls amplitude snapshots from a frequency analyser while audio is
//! playing. Drawing them is up to the host.

/// Default analyser FFT size; yields `DEFAULT_FFT_SIZE / 2` frequency bins
pub const DEFAULT_FFT_SIZE: usize = 256;

/// Frequency analyser attached to the audio output
///
/// Mirrors a Web Audio `AnalyserNode`: byte-scaled magnitudes per bin and a
/// byte-scaled time-domain waveform.
pub trait FrequencyAnalyser {
    /// Number of frequency bins
    fn bin_count(&self) -> usize {
        DEFAULT_FFT_SIZE / 2
    }

    /// Fill `out` with the current magnitude per frequency bin
    fn frequency_data(&mut self, out: &mut [u8]);

    /// Fill `out` with the current waveform (128 = silence)
    fn waveform_data(&mut self, out: &mut [u8]);
}

/// One frame of analyser output
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AmplitudeSnapshot {
    pub frequency: Vec<u8>,
    pub waveform: Vec<u8>,
}

impl AmplitudeSnapshot {
    /// Mean frequency magnitude, normalized to 0.0..=1.0
    pub fn average_level(&self) -> f32 {
        if self.frequency.is_empty() {
            return 0.0;
        }

        let sum: u32 = self.frequency.iter().map(|&v| u32::from(v)).sum();
        sum as f32 / (self.frequency.len() as f32 * 255.0)
    }

    /// Loudest frequency bin
    pub fn peak(&self) -> u8 {
        self.frequency.iter().copied().max().unwrap_or(0)
    }
}

/// Samples an analyser while playback is active
pub struct VisualizerSampler<A: FrequencyAnalyser> {
    analyser: A,
    active: bool,
}

impl<A: FrequencyAnalyser> VisualizerSampler<A> {
    pub fn new(analyser: A) -> Self {
        Self {
            analyser,
            active: false,
        }
    }

    /// Begin sampling (playback started or resumed)
    pub fn start(&mut self) {
        self.active = true;
    }

    /// Stop sampling; any running [`Snapshots`] iterator ends
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Take a single snapshot, or `None` while stopped
    pub fn sample(&mut self) -> Option<AmplitudeSnapshot> {
        if !self.active {
            return None;
        }

        let bins = self.analyser.bin_count();
        let mut snapshot = AmplitudeSnapshot {
            frequency: vec![0; bins],
            waveform: vec![0; bins],
        };
        self.analyser.frequency_data(&mut snapshot.frequency);
        self.analyser.waveform_data(&mut snapshot.waveform);

        Some(snapshot)
    }

    /// Lazy stream of snapshots, one per pull, for as long as sampling is active
    pub fn snapshots(&mut self) -> Snapshots<'_, A> {
        Snapshots { sampler: self }
    }

    pub fn analyser(&self) -> &A {
        &self.analyser
    }

    pub fn analyser_mut(&mut self) -> &mut A {
        &mut self.analyser
    }
}

/// Iterator returned by [`VisualizerSampler::snapshots`]
pub struct Snapshots<'a, A: FrequencyAnalyser> {
    sampler: &'a mut VisualizerSampler<A>,
}

impl<A: FrequencyAnalyser> Snapshots<'_, A> {
    /// Stop sampling from inside a frame loop
    pub fn stop(&mut self) {
        self.sampler.stop();
    }
}

impl<A: FrequencyAnalyser> Iterator for Snapshots<'_, A> {
    type Item = AmplitudeSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        self.sampler.sample()
    }
}
