//! Analyze a tooth and gum sample, then plan whitening for a season
//!
//! ```text
//! cargo run --example whitening_plan -- winter dramatic
//! RUST_LOG=dental_shade=trace cargo run --example whitening_plan
//! ```

use dental_shade::{
    AnalysisSource, DesiredLevel, DiagnosticsSession, EngineConfig, RgbColor, Season,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> dental_shade::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dental_shade=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let season: Season = args.next().as_deref().unwrap_or("summer").parse()?;
    let level: DesiredLevel = args.next().as_deref().unwrap_or("moderate").parse()?;

    let config = match std::env::var("DENTAL_SHADE_CONFIG") {
        Ok(path) => EngineConfig::from_json_file(std::path::Path::new(&path))?,
        Err(_) => EngineConfig::default(),
    };
    let mut session = DiagnosticsSession::new(config);

    let tooth_sample = AnalysisSource::Internal(vec![
        RgbColor::new(224, 206, 170),
        RgbColor::new(220, 201, 166),
        RgbColor::new(228, 210, 176),
        RgbColor::new(222, 204, 169),
    ]);
    let tooth = session.analyze_tooth(&tooth_sample)?;
    println!("Tooth: {} {}", tooth.hex, tooth.summary);
    for alternative in &tooth.shade_match.alternatives {
        println!("  also close: {} (ΔE {:.2})", alternative.shade, alternative.delta_e);
    }

    let goal = session.plan_whitening(tooth.shade_match.shade, season, level);
    println!(
        "\n{} -> {} for {}: {}",
        goal.current_shade, goal.target_shade, season, goal.summary
    );
    if let Some(reason) = &goal.over_whitening_reason {
        println!("  over-whitening: {}", reason);
    }
    if let Some(warning) = &goal.warning {
        println!("  warning: {}", warning);
    }
    for method in &goal.methods {
        println!("  {:<16} {:>3}", method.method.display_name(), method.suitability);
    }

    let gum_sample = AnalysisSource::Internal(vec![
        RgbColor::new(196, 104, 112),
        RgbColor::new(188, 96, 106),
        RgbColor::new(204, 118, 124),
    ]);
    let gums = session.analyze_gum(&gum_sample)?;
    println!("\nGums: {}", gums.summary);
    for recommendation in &gums.recommendations {
        println!("  - {}", recommendation);
    }

    session.reset();
    Ok(())
}
