use std::fs;

use muhurta_config::{ConfigError, Settings};
use muhurta_core::Domain;
use muhurta_search::SearchConfig;

const CUSTOM_CATALOG: &str = r#"
name = "career-custom"
version = 7

[[categories]]
name = "all"
weight = 1.0
kinds = ["transit"]

[planets]
Shani = 1.0
"#;

#[test]
fn file_overrides_reach_the_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("muhurta.toml");
    fs::write(
        &path,
        r#"
        [logging]
        level = "debug"

        [search]
        horizon_days = 45

        [domains.career]
        favorable_threshold = 75
        max_optimal_dates = 5
        "#,
    )
    .unwrap();

    let settings = Settings::load_from_file(&path).unwrap();
    assert_eq!(settings.logging.level, "debug");
    assert!(settings.warnings().is_empty());

    let profile = settings.profile(Domain::Career).unwrap();
    assert_eq!(profile.search.horizon_days, 45);
    assert_eq!(profile.search.favorable_threshold, 75.0);
    assert_eq!(profile.search.max_optimal_dates, 5);
    assert_eq!(profile.catalog.label(), "career@v1");

    let marriage = settings.profile(Domain::Marriage).unwrap();
    assert_eq!(marriage.search.horizon_days, 45);
    assert_eq!(
        marriage.search.favorable_threshold,
        SearchConfig::default().favorable_threshold
    );
}

#[test]
fn relative_catalog_resolves_against_settings_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("catalogs")).unwrap();
    fs::write(dir.path().join("catalogs/career.toml"), CUSTOM_CATALOG).unwrap();
    let path = dir.path().join("muhurta.toml");
    fs::write(&path, "[domains.career]\ncatalog = \"catalogs/career.toml\"\n").unwrap();

    let settings = Settings::load_from_file(&path).unwrap();
    assert_eq!(
        settings.catalog_path(Domain::Career),
        Some(dir.path().join("catalogs/career.toml"))
    );
    let profile = settings.profile(Domain::Career).unwrap();
    assert_eq!(profile.catalog.label(), "career-custom@v7");
    assert!(settings.catalog_path(Domain::Finance).is_none());
}

#[test]
fn missing_catalog_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("muhurta.toml");
    fs::write(&path, "[domains.finance]\ncatalog = \"nowhere.toml\"\n").unwrap();

    let settings = Settings::load_from_file(&path).unwrap();
    assert!(matches!(
        settings.profile(Domain::Finance),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn invalid_catalog_is_catalog_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("bad.toml"),
        "name = \"bad\"\nversion = 1\n[[categories]]\nname = \"x\"\nweight = 1.0\nkinds = [\"horoscope\"]\n",
    )
    .unwrap();
    let path = dir.path().join("muhurta.toml");
    fs::write(&path, "[domains.charity]\ncatalog = \"bad.toml\"\n").unwrap();

    let settings = Settings::load_from_file(&path).unwrap();
    assert!(matches!(
        settings.profile(Domain::Charity),
        Err(ConfigError::Catalog(_))
    ));
}

#[test]
fn typo_is_warned_with_suggestion() {
    let settings = Settings::from_toml_str("[search]\nhorizn_days = 30\n").unwrap();
    let warnings = settings.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field, "search.horizn_days");
    assert_eq!(warnings[0].suggestion.as_deref(), Some("search.horizon_days"));
}

#[test]
fn inverted_thresholds_fail_validation() {
    let err = Settings::from_toml_str(
        "[domains.fasting]\nfavorable_threshold = 30\nchallenging_threshold = 60\n",
    )
    .unwrap_err();
    match err {
        ConfigError::Validation(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].starts_with("domains.fasting"), "{}", errors[0]);
        }
        other => panic!("unexpected {other}"),
    }
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        Settings::load_from_file(&dir.path().join("absent.toml")),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn load_first_skips_broken_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[search]\nstep_days = 0\n").unwrap();
    let good = dir.path().join("good.toml");
    fs::write(&good, "[search]\nhorizon_days = 12\n").unwrap();
    let absent = dir.path().join("absent.toml");

    let settings = Settings::load_first(&[absent.clone(), broken.clone(), good.clone()]);
    assert_eq!(settings.source(), Some(good.as_path()));
    assert_eq!(settings.search_config(Domain::Career).horizon_days, 12);

    let fallback = Settings::load_first(&[absent, broken]);
    assert_eq!(fallback.source(), None);
    assert_eq!(fallback, Settings::default());
}
