//! Integration tests for the diagnostics pipeline
//!
//! These tests exercise the public API end to end:
//! - sRGB to Lab conversion at the gamut extremes
//! - Shade matching and step arithmetic
//! - Whitening plans, harmony checks and progress tracking
//! - Gum inflammation scoring
//! - External report normalization and result caching
//! - Configuration loading and error handling

use dental_shade::analysis::{analyze_gum_health, analyze_tooth_color};
use dental_shade::gum::RegionSeverity;
use dental_shade::shade::step_difference_codes;
use dental_shade::whitening::harmony_verdict;
use dental_shade::{
    assess_gum_health, calculate_whitening_goal, find_best_match, is_over_whitening,
    step_difference, track_progress, AnalysisCache, AnalysisSource, ColorConverter, DeltaEBand,
    DesiredLevel, DiagnosticsError, DiagnosticsSession, EngineConfig, ExternalGumReport,
    ExternalShadeReport, GumStatus, LabColor, RgbColor, Season, Shade,
};

// ============================================================================
// Color Conversion
// ============================================================================

#[test]
fn test_white_and_black_conversion() {
    let converter = ColorConverter::new();

    let white = converter.rgb_to_lab(RgbColor::new(255, 255, 255));
    assert!((white.l - 100.0).abs() < 0.01, "white L* = {}", white.l);
    assert!(white.a.abs() < 0.01);
    assert!(white.b.abs() < 0.01);

    let black = converter.rgb_to_lab(RgbColor::new(0, 0, 0));
    assert!(black.l.abs() < 0.01, "black L* = {}", black.l);
    assert!(black.a.abs() < 0.01);
    assert!(black.b.abs() < 0.01);

    assert_eq!(converter.lab_to_hex(white), "#FFFFFF");
    assert_eq!(converter.lab_to_hex(black), "#000000");
}

#[test]
fn test_hex_parsing_errors() {
    let converter = ColorConverter::new();
    assert_eq!(
        converter.hex_to_rgb("#E8DABE").unwrap(),
        RgbColor::new(0xE8, 0xDA, 0xBE)
    );
    assert!(converter.hex_to_rgb("#E8DA").is_err());
    assert!(converter.hex_to_rgb("#GGGGGG").is_err());
    assert!(converter.hex_to_rgb("#+F+F+F").is_err());
    assert!(converter.hex_to_rgb("##FFFFFF").is_err());
    assert_eq!(converter.hex_to_rgb("e8dabe").unwrap(), RgbColor::new(0xE8, 0xDA, 0xBE));
}

// ============================================================================
// Shade Matching
// ============================================================================

#[test]
fn test_reference_colors_match_themselves() {
    for shade in Shade::ALL {
        let result = find_best_match(shade.reference_lab(), false);
        assert_eq!(result.shade, shade);
        assert_eq!(result.delta_e, 0.0);
        assert_eq!(result.band, DeltaEBand::Imperceptible);
    }
}

#[test]
fn test_current_shade_never_bleached() {
    let result = find_best_match(Shade::Bleached1.reference_lab(), true);
    assert!(!result.shade.is_bleached());
    assert_eq!(result.shade, Shade::B1);
}

#[test]
fn test_step_difference_examples() {
    assert_eq!(step_difference(Shade::A2, Shade::B1), 4);
    assert_eq!(step_difference(Shade::B1, Shade::A2), -4);
    assert_eq!(step_difference(Shade::C4, Shade::C4), 0);
    assert_eq!(step_difference_codes("A3.5", "0M1").unwrap(), 14);
}

#[test]
fn test_unknown_shade_code_is_rejected() {
    let err = Shade::from_code("Z9").unwrap_err();
    assert!(matches!(err, DiagnosticsError::UnknownShade { ref code } if code == "Z9"));
    assert!(!err.is_recoverable());

    assert!(step_difference_codes("A2", "Z9").is_err());
}

// ============================================================================
// Whitening Plans
// ============================================================================

#[test]
fn test_a2_summer_moderate_plan() {
    let goal = calculate_whitening_goal(Shade::A2, Season::Summer, DesiredLevel::Moderate);

    assert_eq!(goal.target_shade, Shade::B1);
    assert_eq!(goal.steps_needed, 4);
    assert!(goal.is_realistic);
    assert!(!goal.is_over_whitening);
    assert_eq!(goal.summary, "4-step whitening plan, 4–8 weeks");
    assert_eq!(goal.methods.len(), 4);
    assert!(goal
        .methods
        .windows(2)
        .all(|pair| pair[0].suitability >= pair[1].suitability));
}

#[test]
fn test_target_never_exceeds_season_ceiling() {
    for season in Season::ALL {
        let ceiling = season.harmony().max_brightest.brightness_rank();
        for current in Shade::ALL {
            for level in [
                DesiredLevel::Subtle,
                DesiredLevel::Moderate,
                DesiredLevel::Dramatic,
            ] {
                let goal = calculate_whitening_goal(current, season, level);
                assert!(goal.target_shade.brightness_rank() <= current.brightness_rank());
                if goal.steps_needed > 0 {
                    assert!(goal.target_shade.brightness_rank() >= ceiling);
                    assert!(season.harmony().is_recommended(goal.target_shade));
                }
            }
        }
    }
}

#[test]
fn test_autumn_bleached_is_over_whitening() {
    let check = is_over_whitening(Shade::Bleached1, Season::Autumn);
    assert!(check.is_over);
    assert!(check.reason.is_some());

    let verdict = harmony_verdict(Shade::Bleached1, Season::Autumn);
    assert!(verdict.is_avoided);
    assert!(verdict.note.starts_with("Over-whitening"));

    assert!(!is_over_whitening(Shade::Bleached1, Season::Winter).is_over);
}

#[test]
fn test_season_names_parse() {
    assert_eq!("winter".parse::<Season>().unwrap(), Season::Winter);
    assert_eq!("Fall".parse::<Season>().unwrap(), Season::Autumn);
    assert!(matches!(
        "monsoon".parse::<Season>(),
        Err(DiagnosticsError::InvalidParameter { .. })
    ));
}

#[test]
fn test_progress_at_target() {
    let report = track_progress(Shade::A3, Shade::B1, Shade::B1);
    assert!(report.is_goal_reached);
    assert_eq!(report.percentage, 100.0);
    assert_eq!(report.steps_remaining, 0);
}

#[test]
fn test_progress_halfway() {
    // A3 (rank 11) toward B1 (rank 3), currently D4 (rank 10) then A1 (rank 4)
    let early = track_progress(Shade::A3, Shade::D4, Shade::B1);
    assert_eq!(early.total_steps, 8);
    assert_eq!(early.steps_completed, 1);
    assert!(!early.is_goal_reached);

    let late = track_progress(Shade::A3, Shade::A1, Shade::B1);
    assert_eq!(late.steps_remaining, 1);
    assert!(late.percentage > early.percentage);
}

// ============================================================================
// Gum Health
// ============================================================================

#[test]
fn test_empty_gum_sample_is_healthy() {
    let result = assess_gum_health(&[]);
    assert_eq!(result.metrics.mean_redness, 0.0);
    assert_eq!(result.metrics.std_redness, 0.0);
    assert_eq!(result.metrics.redness_percentage, 0.0);
    assert_eq!(result.metrics.swelling_indicator, 0.0);
    assert_eq!(result.status, GumStatus::Healthy);
    assert!(!result.needs_clinical_visit);
}

#[test]
fn test_inflamed_gums_need_visit() {
    let pixels: Vec<LabColor> = (0..50)
        .map(|i| LabColor::new(48.0, 26.0 + f64::from(i % 5), 14.0))
        .collect();
    let result = assess_gum_health(&pixels);

    assert_eq!(result.status, GumStatus::SevereInflammation);
    assert!(result.needs_clinical_visit);
    assert_eq!(result.metrics.redness_percentage, 100.0);
    assert_eq!(result.affected_regions.len(), 4);
    assert_eq!(
        result.affected_regions.last().map(|r| r.severity),
        Some(RegionSeverity::Severe)
    );
    assert!(!result.recommendations.is_empty());
}

// ============================================================================
// Sources, Bridge and Cache
// ============================================================================

#[test]
fn test_external_and_internal_sources_share_shape() {
    let config = EngineConfig::default();
    let mut cache = AnalysisCache::new();

    let external = AnalysisSource::External(ExternalShadeReport {
        shade_code: "A2".into(),
        confidence: Some(0.9),
        measured_lab: None,
    });
    let from_service = analyze_tooth_color(&external, &config, &mut cache).unwrap();
    assert_eq!(from_service.shade_match.shade, Shade::A2);
    assert_eq!(from_service.confidence, 0.9);

    let internal = AnalysisSource::Internal(vec![RgbColor::new(230, 216, 188)]);
    let measured = analyze_tooth_color(&internal, &config, &mut cache).unwrap();
    assert!(!measured.shade_match.shade.is_bleached());
    assert_eq!(
        cache.fingerprint(),
        Some(&internal.fingerprint(&config.matching).unwrap())
    );
}

#[test]
fn test_external_unknown_shade_fails_cleanly() {
    let config = EngineConfig::default();
    let mut cache = AnalysisCache::new();
    let source = AnalysisSource::External(ExternalShadeReport {
        shade_code: "X1".into(),
        confidence: None,
        measured_lab: None,
    });

    assert!(matches!(
        analyze_tooth_color(&source, &config, &mut cache),
        Err(DiagnosticsError::UnknownShade { .. })
    ));
    assert!(cache.is_empty());
}

#[test]
fn test_gum_external_report() {
    let config = EngineConfig::default();
    let mut cache = AnalysisCache::new();
    let source = AnalysisSource::External(ExternalGumReport {
        status: GumStatus::SevereInflammation,
        inflammation_score: 82.0,
        confidence: None,
        metrics: None,
    });

    let result = analyze_gum_health(&source, &config, &mut cache).unwrap();
    assert!(result.needs_clinical_visit);
    assert_eq!(result.inflammation_score, 82.0);
}

#[test]
fn test_session_lifecycle() {
    let mut session = DiagnosticsSession::default();
    let source = AnalysisSource::Internal(vec![
        RgbColor::new(226, 208, 172),
        RgbColor::new(222, 204, 168),
    ]);

    let tooth = session.analyze_tooth(&source).unwrap();
    let again = session.analyze_tooth(&source).unwrap();
    assert_eq!(tooth, again);

    let goal = session.plan_whitening(
        tooth.shade_match.shade,
        Season::Winter,
        DesiredLevel::Subtle,
    );
    let progress =
        session.track_progress(goal.current_shade, goal.current_shade, goal.target_shade);
    assert_eq!(progress.steps_completed, 0);

    session.reset();
    assert!(session.tooth_cache().is_empty());
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("engine.json");

    let mut config = EngineConfig::default();
    config.planning.realistic_step_limit = 5;
    config.to_json_file(&path).unwrap();

    let loaded = EngineConfig::from_json_file(&path).unwrap();
    assert_eq!(loaded, config);

    let mut session = DiagnosticsSession::new(loaded);
    let goal = session.plan_whitening(Shade::C4, Season::Winter, DesiredLevel::Dramatic);
    assert!(!goal.is_realistic);
    assert!(goal.warning.is_some());
    session.reset();
}

#[test]
fn test_invalid_config_is_rejected() {
    let err = EngineConfig::from_json_str(r#"{"matching": {"alternatives": 9}}"#).unwrap_err();
    assert!(matches!(err, DiagnosticsError::InvalidParameter { .. }));
    assert!(EngineConfig::from_json_str("not json").is_err());
}
