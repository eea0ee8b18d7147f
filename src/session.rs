//! Session orchestration.
//!
//! [`SessionState`] owns the current parameters, the noise RNG and the
//! four live arrays. Each parameter-change handler recomputes exactly the
//! arrays downstream of the change and returns an immutable [`Snapshot`].
//!
//! Staleness flows one way:
//!
//! ```text
//! waveform ─┐
//!           ├─> noisy ─> filtered
//! noise ────┘              ^
//! filter ──────────────────┘
//! ```
//!
//! A waveform change reuses the cached noise realization, so sweeping a
//! waveform parameter is always compared against the same noise.

use crate::config::{ResetPolicy, SessionConfig};
use crate::error::SignalResult;
use crate::fft::SpectralPlan;
use crate::filters::{FilterBank, FilterSpec};
use crate::grid::SampleGrid;
use crate::noise::{self, NoiseSpec};
use crate::oscillators::{self, WaveformSpec};
use crate::spectrum::{Spectrum, SpectrumAnalyzer};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One of the arrays a session keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalView {
    Clean,
    Noise,
    Noisy,
    Filtered,
}

/// An input event from the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", content = "spec", rename_all = "snake_case")]
pub enum ParameterChange {
    Waveform(WaveformSpec),
    Noise(NoiseSpec),
    Filter(FilterSpec),
    Reset,
}

/// The four arrays, all of grid length.
///
/// `noisy` is always `clean + noise` pointwise and `filtered` is always the
/// current filter applied to `noisy`. Arrays are shared, never mutated in
/// place; a recomputation swaps in new ones.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalState {
    pub clean: Arc<[f64]>,
    pub noise: Arc<[f64]>,
    pub noisy: Arc<[f64]>,
    pub filtered: Arc<[f64]>,
}

impl SignalState {
    fn empty() -> Self {
        let empty: Arc<[f64]> = Arc::from(Vec::new());
        Self {
            clean: Arc::clone(&empty),
            noise: Arc::clone(&empty),
            noisy: Arc::clone(&empty),
            filtered: empty,
        }
    }

    pub fn view(&self, view: SignalView) -> &Arc<[f64]> {
        match view {
            SignalView::Clean => &self.clean,
            SignalView::Noise => &self.noise,
            SignalView::Noisy => &self.noisy,
            SignalView::Filtered => &self.filtered,
        }
    }
}

/// Read-only copy of a session's parameters and arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub waveform: WaveformSpec,
    pub noise: NoiseSpec,
    pub filter: FilterSpec,
    pub signals: SignalState,
}

impl Snapshot {
    pub fn view(&self, view: SignalView) -> &[f64] {
        self.signals.view(view)
    }
}

/// Which stages a recomputation must redo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Stale {
    waveform: bool,
    noise: bool,
    filter: bool,
}

impl Stale {
    const ALL: Stale = Stale {
        waveform: true,
        noise: true,
        filter: true,
    };

    fn noisy(&self) -> bool {
        self.waveform || self.noise
    }

    fn filtered(&self) -> bool {
        self.noisy() || self.filter
    }
}

/// Candidate parameters for a recomputation.
#[derive(Debug, Clone, Copy)]
struct Params {
    waveform: WaveformSpec,
    noise: NoiseSpec,
    filter: FilterSpec,
}

/// The engine's single mutable owner of parameters, randomness and arrays.
///
/// Mutating calls take `&mut self`; a multi-threaded host must serialize
/// them (for example behind a `Mutex`). Snapshots can be read from any
/// thread.
///
/// # Examples
///
/// ```
/// use wavebench::{NoiseFamily, NoiseSpec, SessionConfig, SessionState, WaveformSpec};
///
/// let mut session = SessionState::new(SessionConfig::seeded(42)).unwrap();
/// let before = session.snapshot();
///
/// let louder = WaveformSpec { amplitude: 2.0, ..session.waveform() };
/// let after = session.on_waveform_param_change(louder).unwrap();
/// assert_eq!(before.signals.noise, after.signals.noise);
///
/// let after = session
///     .on_noise_param_change(NoiseSpec::new(NoiseFamily::Uniform, 0.0, 0.1))
///     .unwrap();
/// assert_ne!(before.signals.noise, after.signals.noise);
/// ```
#[derive(Debug)]
pub struct SessionState {
    config: SessionConfig,
    grid: SampleGrid,
    bank: FilterBank,
    analyzer: SpectrumAnalyzer,
    rng: StdRng,
    params: Params,
    signals: SignalState,
}

impl SessionState {
    /// Creates a session with default parameters and computes every array.
    pub fn new(config: SessionConfig) -> SignalResult<Self> {
        config.validate()?;
        let grid = config.grid.build()?;
        let plan = Arc::new(SpectralPlan::new(grid.len()));
        let bank = FilterBank::with_plan(&grid, Arc::clone(&plan), config.iir_reference_rate);
        let analyzer = SpectrumAnalyzer::with_plan(plan, grid.spacing())?;
        let rng = seed_rng(config.seed);

        let mut session = Self {
            config,
            grid,
            bank,
            analyzer,
            rng: rng.clone(),
            params: Self::default_params(&config),
            signals: SignalState::empty(),
        };
        session.recompute(session.params, Stale::ALL, rng)?;
        debug!(samples = session.grid.len(), seed = ?config.seed, "session created");
        Ok(session)
    }

    /// Creates a session with the default configuration and a fixed seed.
    pub fn with_seed(seed: u64) -> SignalResult<Self> {
        Self::new(SessionConfig::seeded(seed))
    }

    fn default_params(config: &SessionConfig) -> Params {
        Params {
            waveform: WaveformSpec::default(),
            noise: NoiseSpec::default(),
            filter: config.filter_family.default_filter(),
        }
    }

    /// Applies a new waveform. The cached noise realization is reused.
    pub fn on_waveform_param_change(&mut self, spec: WaveformSpec) -> SignalResult<Snapshot> {
        let next = Params {
            waveform: spec,
            ..self.params
        };
        let stale = Stale {
            waveform: true,
            ..Stale::default()
        };
        self.update("waveform", next, stale, self.rng.clone())
    }

    /// Applies new noise parameters and draws a fresh realization.
    pub fn on_noise_param_change(&mut self, spec: NoiseSpec) -> SignalResult<Snapshot> {
        let next = Params {
            noise: spec,
            ..self.params
        };
        let stale = Stale {
            noise: true,
            ..Stale::default()
        };
        self.update("noise", next, stale, self.rng.clone())
    }

    /// Applies a new filter to the cached noisy signal.
    pub fn on_filter_param_change(&mut self, spec: FilterSpec) -> SignalResult<Snapshot> {
        let next = Params {
            filter: spec,
            ..self.params
        };
        let stale = Stale {
            filter: true,
            ..Stale::default()
        };
        self.update("filter", next, stale, self.rng.clone())
    }

    /// Restores default parameters, draws new noise according to the
    /// configured [`ResetPolicy`], and recomputes everything.
    pub fn reset(&mut self) -> SignalResult<Snapshot> {
        info!(policy = ?self.config.reset_policy, "resetting session");
        let rng = match self.config.reset_policy {
            ResetPolicy::Reseed => seed_rng(self.config.seed),
            ResetPolicy::Continue => self.rng.clone(),
        };
        let next = Self::default_params(&self.config);
        self.update("reset", next, Stale::ALL, rng)
    }

    /// Dispatches a tagged change to the matching handler.
    pub fn apply(&mut self, change: ParameterChange) -> SignalResult<Snapshot> {
        match change {
            ParameterChange::Waveform(spec) => self.on_waveform_param_change(spec),
            ParameterChange::Noise(spec) => self.on_noise_param_change(spec),
            ParameterChange::Filter(spec) => self.on_filter_param_change(spec),
            ParameterChange::Reset => self.reset(),
        }
    }

    fn update(
        &mut self,
        what: &'static str,
        next: Params,
        stale: Stale,
        rng: StdRng,
    ) -> SignalResult<Snapshot> {
        self.recompute(next, stale, rng)
            .inspect_err(|e| warn!(update = what, error = %e, "update rejected"))?;
        Ok(self.snapshot())
    }

    /// Recomputes the stale arrays from `next` and commits them together.
    ///
    /// All new arrays and the advanced RNG are built in locals first, so a
    /// failure leaves the session exactly as it was.
    fn recompute(&mut self, next: Params, stale: Stale, mut rng: StdRng) -> SignalResult<()> {
        let waveform = next.waveform.validate()?;
        next.noise.validate()?;
        self.bank.validate(&next.filter)?;

        let clean: Arc<[f64]> = if stale.waveform {
            oscillators::generate(&self.grid, &waveform)?.into()
        } else {
            Arc::clone(&self.signals.clean)
        };
        let noise: Arc<[f64]> = if stale.noise {
            noise::generate(&self.grid, &next.noise, &mut rng)?.into()
        } else {
            Arc::clone(&self.signals.noise)
        };
        let noisy: Arc<[f64]> = if stale.noisy() {
            clean.iter().zip(noise.iter()).map(|(c, n)| c + n).collect()
        } else {
            Arc::clone(&self.signals.noisy)
        };
        let filtered: Arc<[f64]> = if stale.filtered() {
            self.bank.apply(&noisy, &next.filter)?.into()
        } else {
            Arc::clone(&self.signals.filtered)
        };

        debug!(
            waveform = stale.waveform,
            noise = stale.noise,
            filtered = stale.filtered(),
            filter = %next.filter.kind(),
            "recomputed signals"
        );

        self.params = Params { waveform, ..next };
        self.rng = rng;
        self.signals = SignalState {
            clean,
            noise,
            noisy,
            filtered,
        };
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            waveform: self.params.waveform,
            noise: self.params.noise,
            filter: self.params.filter,
            signals: self.signals.clone(),
        }
    }

    pub fn signal(&self, view: SignalView) -> Arc<[f64]> {
        Arc::clone(self.signals.view(view))
    }

    pub fn clean(&self) -> Arc<[f64]> {
        self.signal(SignalView::Clean)
    }

    pub fn noise(&self) -> Arc<[f64]> {
        self.signal(SignalView::Noise)
    }

    pub fn noisy(&self) -> Arc<[f64]> {
        self.signal(SignalView::Noisy)
    }

    pub fn filtered(&self) -> Arc<[f64]> {
        self.signal(SignalView::Filtered)
    }

    pub fn waveform(&self) -> WaveformSpec {
        self.params.waveform
    }

    pub fn noise_spec(&self) -> NoiseSpec {
        self.params.noise
    }

    pub fn filter(&self) -> FilterSpec {
        self.params.filter
    }

    pub fn grid(&self) -> &SampleGrid {
        &self.grid
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Magnitude spectrum of one of the live arrays.
    pub fn spectrum(&self, view: SignalView) -> SignalResult<Spectrum> {
        self.analyzer.spectrum(self.signals.view(view))
    }
}

fn seed_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseFamily;
    use crate::oscillators::WaveShape;
    use crate::SignalError;

    fn session() -> SessionState {
        SessionState::with_seed(1234).unwrap()
    }

    fn assert_consistent(snapshot: &Snapshot) {
        let s = &snapshot.signals;
        for ((c, n), y) in s.clean.iter().zip(s.noise.iter()).zip(s.noisy.iter()) {
            assert_eq!(c + n, *y);
        }
    }

    #[test]
    fn test_initial_state() {
        let session = session();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.waveform, WaveformSpec::default());
        assert_eq!(snapshot.noise, NoiseSpec::default());
        assert_eq!(snapshot.filter, FilterSpec::MovingAverage { window: 11 });
        let views = [
            SignalView::Clean,
            SignalView::Noise,
            SignalView::Noisy,
            SignalView::Filtered,
        ];
        for view in views {
            assert_eq!(snapshot.view(view).len(), 1000);
        }
        assert_consistent(&snapshot);
    }

    #[test]
    fn test_waveform_change_keeps_noise() {
        let mut session = session();
        let before = session.noise();
        let spec = WaveformSpec::new(WaveShape::Triangle, 3.0, 2.5, 1.0);
        let after = session.on_waveform_param_change(spec).unwrap();
        assert_eq!(before, after.signals.noise);
        assert!(Arc::ptr_eq(&before, &after.signals.noise));
        assert_consistent(&after);
    }

    #[test]
    fn test_noise_change_redraws() {
        let mut session = session();
        let before = session.snapshot();
        let after = session.on_noise_param_change(NoiseSpec::default()).unwrap();
        assert_ne!(before.signals.noise, after.signals.noise);
        assert!(Arc::ptr_eq(&before.signals.clean, &after.signals.clean));
        assert_consistent(&after);
    }

    #[test]
    fn test_filter_change_only_touches_filtered() {
        let mut session = session();
        let before = session.snapshot();
        let median = FilterSpec::Median { window: 5 };
        let after = session.on_filter_param_change(median).unwrap();
        assert!(Arc::ptr_eq(&before.signals.noisy, &after.signals.noisy));
        assert!(Arc::ptr_eq(&before.signals.noise, &after.signals.noise));
        assert_ne!(before.signals.filtered, after.signals.filtered);
    }

    #[test]
    fn test_rejected_update_leaves_state() {
        let mut session = session();
        let before = session.snapshot();

        let bad_wave = WaveformSpec::new(WaveShape::Sine, -1.0, 1.0, 0.0);
        assert!(session.on_waveform_param_change(bad_wave).is_err());
        let bad_noise = NoiseSpec::new(NoiseFamily::Gaussian, 0.0, -1.0);
        assert!(session.on_noise_param_change(bad_noise).is_err());
        let bad_filter = FilterSpec::MovingAverage { window: 10 };
        assert!(matches!(
            session.on_filter_param_change(bad_filter),
            Err(SignalError::InvalidParameter { .. })
        ));

        assert_eq!(session.snapshot(), before);
        // The RNG did not advance either
        let mut twin = SessionState::with_seed(1234).unwrap();
        let spec = NoiseSpec::default();
        let ours = session.on_noise_param_change(spec).unwrap();
        let theirs = twin.on_noise_param_change(spec).unwrap();
        assert_eq!(ours.signals.noise, theirs.signals.noise);
    }

    #[test]
    fn test_overflowing_filter_output_is_rejected() {
        let mut session = session();
        session.on_noise_param_change(NoiseSpec::none()).unwrap();
        let huge = WaveformSpec::new(WaveShape::Square, 1e307, 1.0, 0.0);
        session.on_waveform_param_change(huge).unwrap();
        let before = session.snapshot();

        let result = session.on_filter_param_change(FilterSpec::LowPass { cutoff: 2.0 });
        assert!(matches!(
            result,
            Err(SignalError::InvalidParameter { name: "signal", .. })
        ));
        assert_eq!(session.snapshot(), before);
        assert!(session.spectrum(SignalView::Clean).is_err());
    }

    #[test]
    fn test_overflowing_uniform_noise_is_rejected() {
        let mut session = session();
        let before = session.snapshot();
        for spec in [
            NoiseSpec::new(NoiseFamily::Uniform, 0.0, 1e308),
            NoiseSpec::new(NoiseFamily::Uniform, 0.0, f64::MAX),
        ] {
            assert!(matches!(
                session.on_noise_param_change(spec),
                Err(SignalError::InvalidParameter {
                    name: "variance",
                    ..
                })
            ));
        }
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_phase_is_normalized_on_commit() {
        let mut session = session();
        let spec = WaveformSpec {
            phase: std::f64::consts::TAU + 0.5,
            ..WaveformSpec::default()
        };
        let snapshot = session.on_waveform_param_change(spec).unwrap();
        assert!((snapshot.waveform.phase - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_apply_dispatches() {
        let mut session = session();
        let spec = FilterSpec::LowPass { cutoff: 3.0 };
        let snapshot = session.apply(ParameterChange::Filter(spec)).unwrap();
        assert_eq!(snapshot.filter, spec);
        assert_eq!(session.filter(), spec);
    }

    #[test]
    fn test_change_json() {
        let change: ParameterChange = serde_json::from_str(
            r#"{"change":"filter","spec":{"kind":"median","window":7}}"#,
        )
        .unwrap();
        let median = FilterSpec::Median { window: 7 };
        assert_eq!(change, ParameterChange::Filter(median));
        let reset: ParameterChange = serde_json::from_str(r#"{"change":"reset"}"#).unwrap();
        assert_eq!(reset, ParameterChange::Reset);
    }

    #[test]
    fn test_snapshot_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Snapshot>();
        assert_send_sync::<SessionState>();
    }
}
