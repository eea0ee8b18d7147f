use anyhow::Result;
use wavebench::{
    FilterFamily, FilterSpec, NoiseFamily, NoiseSpec, ParameterChange, ResetPolicy, SessionConfig,
    SessionState, SignalError, SignalView, WaveShape, WaveformSpec, peak_to_peak,
};

fn seeded(seed: u64) -> Result<SessionState> {
    Ok(SessionState::with_seed(seed)?)
}

#[test]
fn test_default_session_smooths_noise() -> Result<()> {
    let session = seeded(7)?;
    let snapshot = session.snapshot();

    assert_eq!(session.grid().len(), 1000);
    assert_eq!(snapshot.waveform.shape, WaveShape::Sine);
    assert_eq!(snapshot.noise.family, NoiseFamily::Gaussian);
    assert_eq!(snapshot.filter, FilterSpec::MovingAverage { window: 11 });

    let noisy = peak_to_peak(snapshot.view(SignalView::Noisy));
    let filtered = peak_to_peak(snapshot.view(SignalView::Filtered));
    assert!(filtered < noisy, "filtered {filtered} >= noisy {noisy}");
    Ok(())
}

#[test]
fn test_noise_survives_waveform_sweep() -> Result<()> {
    let mut session = seeded(11)?;
    let noise = session.noise();

    for shape in WaveShape::ALL {
        for amplitude in [0.5, 1.0, 4.0] {
            let spec = WaveformSpec::new(shape, amplitude, 2.0, 0.3);
            let snapshot = session.on_waveform_param_change(spec)?;
            assert_eq!(snapshot.signals.noise, noise);
        }
    }

    let snapshot = session.on_noise_param_change(NoiseSpec::new(NoiseFamily::Gaussian, 0.0, 0.2))?;
    assert_ne!(snapshot.signals.noise, noise);
    Ok(())
}

#[test]
fn test_noiseless_session_is_clean() -> Result<()> {
    let mut session = seeded(3)?;
    let snapshot = session.on_noise_param_change(NoiseSpec::none())?;
    assert!(snapshot.view(SignalView::Noise).iter().all(|&n| n == 0.0));
    assert_eq!(snapshot.signals.noisy, snapshot.signals.clean);
    Ok(())
}

#[test]
fn test_window_validation() -> Result<()> {
    let mut session = seeded(5)?;
    let before = session.snapshot();

    for window in [0, 1, 2, 10] {
        let result = session.on_filter_param_change(FilterSpec::Median { window });
        let rejected = matches!(
            result,
            Err(SignalError::InvalidParameter { name: "window", .. })
        );
        assert!(rejected, "window {window} accepted");
    }
    assert_eq!(session.snapshot(), before);

    let snapshot = session.on_filter_param_change(FilterSpec::Median { window: 3 })?;
    assert_eq!(snapshot.view(SignalView::Filtered).len(), 1000);
    Ok(())
}

#[test]
fn test_every_filter_kind_runs() -> Result<()> {
    let mut session = seeded(9)?;
    let keys = [
        "moving_average",
        "gaussian_kernel",
        "median",
        "low_pass",
        "high_pass",
        "zero_phase_iir",
        "none",
    ];
    for key in keys {
        let spec = FilterSpec::from_key(key, &Default::default())?;
        let snapshot = session.apply(ParameterChange::Filter(spec))?;
        let filtered = snapshot.view(SignalView::Filtered);
        assert_eq!(filtered.len(), 1000);
        assert!(
            filtered.iter().all(|y| y.is_finite()),
            "{key} produced non-finite output"
        );
    }
    assert!(matches!(
        FilterSpec::from_key("wiener", &Default::default()),
        Err(SignalError::UnsupportedFilter(_))
    ));
    Ok(())
}

#[test]
fn test_none_filter_is_identity() -> Result<()> {
    let mut session = seeded(13)?;
    let snapshot = session.on_filter_param_change(FilterSpec::None)?;
    assert_eq!(snapshot.signals.filtered, snapshot.signals.noisy);
    Ok(())
}

#[test]
fn test_complementary_masks() -> Result<()> {
    let mut session = seeded(17)?;
    let low = session.on_filter_param_change(FilterSpec::LowPass { cutoff: 2.0 })?;
    let high = session.on_filter_param_change(FilterSpec::HighPass { cutoff: 2.0 })?;

    let noisy = low.view(SignalView::Noisy);
    for ((l, h), x) in low
        .view(SignalView::Filtered)
        .iter()
        .zip(high.view(SignalView::Filtered))
        .zip(noisy)
    {
        assert!((l + h - x).abs() < 1e-9);
    }
    Ok(())
}

#[test]
fn test_zero_phase_filter_tracks_clean_signal() -> Result<()> {
    let mut session = seeded(19)?;
    session.on_noise_param_change(NoiseSpec::none())?;
    let snapshot = session.on_filter_param_change(FilterSpec::ZeroPhaseIir {
        order: 3,
        cutoff: 2.0,
    })?;

    let clean = snapshot.view(SignalView::Clean);
    let filtered = snapshot.view(SignalView::Filtered);
    let worst = (100..900)
        .map(|i| (clean[i] - filtered[i]).abs())
        .fold(0.0, f64::max);
    assert!(
        worst < 0.05,
        "zero-phase output strays {worst} from the input"
    );
    Ok(())
}

#[test]
fn test_reseed_reset_reproduces_noise() -> Result<()> {
    let mut session = seeded(23)?;
    let initial = session.snapshot();

    session.on_waveform_param_change(WaveformSpec::new(WaveShape::Square, 2.0, 3.0, 0.0))?;
    session.on_noise_param_change(NoiseSpec::new(NoiseFamily::Uniform, 1.0, 0.5))?;
    session.on_filter_param_change(FilterSpec::HighPass { cutoff: 5.0 })?;

    let reset = session.reset()?;
    assert_eq!(reset, initial);
    Ok(())
}

#[test]
fn test_continue_reset_draws_new_noise() -> Result<()> {
    let config = SessionConfig {
        reset_policy: ResetPolicy::Continue,
        ..SessionConfig::seeded(23)
    };
    let mut session = SessionState::new(config)?;
    let initial = session.snapshot();

    let reset = session.apply(ParameterChange::Reset)?;
    assert_eq!(reset.waveform, initial.waveform);
    assert_eq!(reset.noise, initial.noise);
    assert_eq!(reset.signals.clean, initial.signals.clean);
    assert_ne!(reset.signals.noise, initial.signals.noise);
    Ok(())
}

#[test]
fn test_recursive_family_resets_to_butterworth() -> Result<()> {
    let config = SessionConfig {
        filter_family: FilterFamily::Recursive,
        ..SessionConfig::seeded(29)
    };
    let mut session = SessionState::new(config)?;
    session.on_filter_param_change(FilterSpec::Median { window: 5 })?;
    let reset = session.reset()?;
    assert_eq!(
        reset.filter,
        FilterSpec::ZeroPhaseIir {
            order: 3,
            cutoff: 2.0
        }
    );
    Ok(())
}

#[test]
fn test_spectrum_of_clean_sine() -> Result<()> {
    let session = seeded(31)?;
    let spectrum = session.spectrum(SignalView::Clean)?;

    assert_eq!(spectrum.len(), 1000);
    assert_eq!(spectrum.frequencies[0], 0.0);
    assert!(spectrum.frequencies[500] < 0.0);
    let dominant = spectrum.dominant_frequency().unwrap_or_default();
    assert!((dominant - 1.0).abs() < 0.1, "dominant bin at {dominant}");
    Ok(())
}

#[test]
fn test_unseeded_session() -> Result<()> {
    let mut session = SessionState::new(SessionConfig::default())?;
    let snapshot = session.reset()?;
    assert_eq!(snapshot.view(SignalView::Noise).len(), 1000);
    Ok(())
}
