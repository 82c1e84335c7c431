//! End-to-end tests: bundled catalog, build files and session runs together.

use lcd_builder::application::session::{BuildSession, StackLimits};
use lcd_builder::infrastructure::storage::build_file::BuildFile;
use lcd_builder::infrastructure::storage::levels::BundledLevels;
use lcd_core::{ArchetypeId, BacklightType, FailureCategory, GlassType};

const CINEMA_TV: u32 = 4;
const OUTDOOR_LAPTOP: u32 = 2;

fn bundled_session() -> BuildSession {
    BuildSession::from_source(&BundledLevels, StackLimits::default()).expect("bundled catalog loads")
}

fn laptop_build(glass: &str) -> String {
    format!(
        r#"
level = {OUTDOOR_LAPTOP}

[display]
size_width = 32
size_height = 18
res_width = 1920
res_height = 1080

[[layers]]
archetype = "standard-backlight"
[[layers]]
archetype = "polarizer"
[[layers]]
archetype = "tft-array"
[[layers]]
archetype = "liquid-crystal"
[[layers]]
archetype = "polarizer"
[[layers]]
archetype = "{glass}"
"#
    )
}

fn check(session: &mut BuildSession, content: &str) -> lcd_builder::application::session::RunReport {
    let build = BuildFile::parse(content).expect("build file parses");
    build.apply(session).expect("build applies");
    let [w, h, rw, rh] = build.display_fields();
    session.run_raw(&w, &h, &rw, &rh).expect("display fields are integers")
}

// ── Outdoor laptop ────────────────────────────────────────────────────────────

#[test]
fn test_outdoor_laptop_passes_with_low_reflective_glass() {
    // Arrange
    let mut session = bundled_session();

    // Act
    let report = check(&mut session, &laptop_build("low-reflective-glass"));

    // Assert
    assert!(report.passed(), "unexpected verdict: {}", report.report.verdict.message);
    assert_eq!(report.report.metrics.ppi, 152);
    assert_eq!(report.report.metrics.glass_type, GlassType::LowReflective);
    assert!(session.levels().get(OUTDOOR_LAPTOP).unwrap().completed);
}

#[test]
fn test_outdoor_laptop_rejects_standard_glass() {
    let mut session = bundled_session();

    let report = check(&mut session, &laptop_build("standard-glass"));

    assert!(!report.passed());
    assert_eq!(report.report.verdict.message, "Requirements Error: wrong outer glass type.");
    assert_eq!(report.report.verdict.category(), Some(FailureCategory::Requirements));
    assert_eq!(session.levels().completed_count(), 0);
}

// ── Cinema TV ─────────────────────────────────────────────────────────────────

#[test]
fn test_cinema_tv_needs_mini_led_and_thickness() {
    // Arrange
    let mut session = bundled_session();
    session.select_level(CINEMA_TV).unwrap();
    for id in [
        ArchetypeId::MiniLedBacklight,
        ArchetypeId::Polarizer,
        ArchetypeId::TftArray,
        ArchetypeId::LiquidCrystal,
        ArchetypeId::Polarizer,
        ArchetypeId::StandardGlass,
    ] {
        session.add_layer(id);
    }

    // Act: too thin at minimum thicknesses
    let thin = session.run_raw("112", "63", "3840", "2160").unwrap();

    // Assert
    assert!(!thin.passed());
    assert!(thin.report.verdict.message.contains("too thin"));

    // Act: thicker glass brings the stack over the minimum
    session.set_layer_thickness(5, 1.5).unwrap();
    let report = session.run_raw("112", "63", "3840", "2160").unwrap();

    // Assert
    assert!(report.passed(), "unexpected verdict: {}", report.report.verdict.message);
    assert_eq!(report.report.metrics.backlight_type, BacklightType::MiniLedLcd);
    assert!(report.describe().starts_with("Type: Mini-LED LCD\nResolution: 3840x2160\n"));
    assert!(report.describe().contains("Contrast ratio: 1 000 000:1"));
    assert!(report.level_completed);
}

// ── Structure ─────────────────────────────────────────────────────────────────

#[test]
fn test_misordered_stack_fails_before_requirements() {
    let mut session = bundled_session();
    for id in [
        ArchetypeId::StandardBacklight,
        ArchetypeId::TftArray,
        ArchetypeId::Polarizer,
        ArchetypeId::LiquidCrystal,
        ArchetypeId::Polarizer,
        ArchetypeId::StandardGlass,
    ] {
        session.add_layer(id);
    }

    let report = session.run_raw("16", "9", "1920", "1080").unwrap();

    assert_eq!(
        report.report.verdict.message,
        "Structure Error: Display's layers are not placed correctly."
    );
    assert_eq!(report.report.metrics.ppi, 0);
}
