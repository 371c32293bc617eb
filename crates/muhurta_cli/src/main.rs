use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use muhurta_config::Settings;
use muhurta_core::{
    AlignmentPredicate, ChartSpec, Domain, FactorCatalog, NatalChart, Paksha, RatingTable,
    mean_panchang,
};
use muhurta_search::{
    DEFAULT_PROGRESSION_ORB_DEG, DEFAULT_TRANSIT_ORB_DEG, MeanMotionProvider, TimingEngine,
};
use tracing::{debug, warn};
use tracing_subscriber::{
    EnvFilter, Registry, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Level used until settings are loaded.
const BOOTSTRAP_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "muhurta", about = "Muhurta timing engine CLI")]
struct Cli {
    /// Settings file (default: $MUHURTA_CONFIG, then ./muhurta.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full timing analysis as JSON
    Analyze {
        /// marriage, career, finance, charity or fasting
        #[arg(long)]
        domain: Domain,
        /// Reference date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
        /// Natal chart TOML (birth_date, ascendant, optional [positions])
        #[arg(long)]
        chart: Option<PathBuf>,
        /// Birth date for a mean-motion chart when --chart is absent
        #[arg(long, default_value = "1990-01-01")]
        birth_date: NaiveDate,
        /// Sidereal ascendant in degrees when --chart is absent
        #[arg(long, default_value = "0")]
        ascendant: f64,
        /// Search horizon in days
        #[arg(long)]
        horizon: Option<u32>,
        /// Sample the horizon in parallel
        #[arg(long)]
        parallel: bool,
        /// Transit aspect orb in degrees
        #[arg(long, default_value_t = DEFAULT_TRANSIT_ORB_DEG, value_parser = parse_orb)]
        transit_orb: f64,
        /// Progressed aspect orb in degrees
        #[arg(long, default_value_t = DEFAULT_PROGRESSION_ORB_DEG, value_parser = parse_orb)]
        progression_orb: f64,
    },
    /// Rating for a 0-100 score
    Classify {
        score: f64,
        /// Use this domain's catalog rating table instead of the reference one
        #[arg(long)]
        domain: Option<Domain>,
    },
    /// Mean-motion panchang for a date
    Panchang {
        /// Civil date (YYYY-MM-DD)
        #[arg(long)]
        date: NaiveDate,
    },
    /// Whether a date is aligned for a domain
    Aligned {
        #[arg(long)]
        domain: Domain,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Validate a catalog TOML file
    CatalogCheck { file: PathBuf },
}

fn main() {
    let cli = Cli::parse();

    let filter = init_logging();
    let settings = match &cli.config {
        Some(path) => Settings::load_from_file(path).unwrap_or_else(|e| fail(e)),
        None => Settings::load(),
    };
    if let Some(handle) = filter {
        if let Err(e) = handle.reload(EnvFilter::new(&settings.logging.level)) {
            warn!(error = %e, "could not apply settings log level");
        }
    }
    debug!(source = ?settings.source(), "settings ready");

    match cli.command {
        Commands::Analyze {
            domain,
            date,
            chart,
            birth_date,
            ascendant,
            horizon,
            parallel,
            transit_orb,
            progression_orb,
        } => {
            let mut profile = settings.profile(domain).unwrap_or_else(|e| fail(e));
            if let Some(h) = horizon {
                profile.search.horizon_days = h;
            }
            profile.search.parallel |= parallel;

            let chart = match chart {
                Some(path) => load_chart(&path),
                None => NatalChart::from_mean_motion(birth_date, ascendant)
                    .unwrap_or_else(|e| fail(e)),
            };
            debug!(birth = %chart.birth_date(), "natal chart ready");

            let engine = TimingEngine::new(profile).unwrap_or_else(|e| fail(e));
            let provider =
                MeanMotionProvider::new(chart).with_orbs(transit_orb, progression_orb);
            let analysis = engine.analyze(&provider, date).unwrap_or_else(|e| fail(e));
            print_json(&analysis);
        }

        Commands::Classify { score, domain } => {
            let table = match domain {
                Some(d) => settings
                    .profile(d)
                    .unwrap_or_else(|e| fail(e))
                    .catalog
                    .ratings()
                    .clone(),
                None => RatingTable::reference(),
            };
            let rating = table.classify(score).unwrap_or_else(|e| fail(e));
            match table.lower_bound(rating) {
                Some(lower) => println!("{score:.1} -> {rating} (band from {lower:.1})"),
                None => println!("{score:.1} -> {rating}"),
            }
        }

        Commands::Panchang { date } => {
            let p = mean_panchang(date);
            println!("Date:      {}", p.date);
            println!(
                "Tithi:     {} ({} paksha, day {}, {:.2} deg elapsed)",
                p.tithi.tithi.name(),
                match p.tithi.paksha {
                    Paksha::Shukla => "Shukla",
                    Paksha::Krishna => "Krishna",
                },
                p.tithi.tithi_in_paksha,
                p.tithi.degrees_in_tithi
            );
            println!(
                "Nakshatra: {} (pada {}, {:.2} deg elapsed)",
                p.nakshatra.nakshatra.name(),
                p.nakshatra.pada,
                p.nakshatra.degrees_in_nakshatra
            );
            println!("Yoga:      {}", p.yoga.name());
            println!("Karana:    {}", p.karana.karana.name());
            println!("Vaar:      {} (lord {})", p.vaar.name(), p.vaar.lord());
        }

        Commands::Aligned { domain, date } => {
            let profile = settings.profile(domain).unwrap_or_else(|e| fail(e));
            let alignment: &dyn AlignmentPredicate = profile.alignment.as_ref();
            let verdict = if alignment.is_aligned(date) {
                "aligned"
            } else {
                "not aligned"
            };
            println!("{date} {domain}: {verdict} ({})", alignment.label());
        }

        Commands::CatalogCheck { file } => {
            let text = read_file(&file);
            let catalog = FactorCatalog::from_toml_str(&text).unwrap_or_else(|e| fail(e));
            println!("{}: ok", catalog.label());
            for c in catalog.categories() {
                let kinds: Vec<String> = c.kinds.iter().map(ToString::to_string).collect();
                println!(
                    "  {:<14} weight {:.2}  saturation {:.2}  [{}]",
                    c.name,
                    c.weight,
                    c.saturation,
                    kinds.join(", ")
                );
            }
        }
    }
}

/// Installs the subscriber before anything can log. `RUST_LOG` wins and is
/// final; otherwise the returned handle swaps in the settings level later.
fn init_logging() -> Option<reload::Handle<EnvFilter, Registry>> {
    let from_env = EnvFilter::try_from_default_env().ok();
    let pinned = from_env.is_some();
    let (layer, handle) =
        reload::Layer::new(from_env.unwrap_or_else(|| EnvFilter::new(BOOTSTRAP_LEVEL)));
    tracing_subscriber::registry()
        .with(layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .init();
    (!pinned).then_some(handle)
}

fn parse_orb(s: &str) -> Result<f64, String> {
    let orb: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if orb.is_finite() && orb > 0.0 && orb <= 30.0 {
        Ok(orb)
    } else {
        Err(format!("orb {orb} must be in (0, 30] degrees"))
    }
}

fn load_chart(path: &Path) -> NatalChart {
    let text = read_file(path);
    let spec: ChartSpec = toml::from_str(&text)
        .unwrap_or_else(|e| fail(format!("invalid chart {}: {e}", path.display())));
    spec.into_chart().unwrap_or_else(|e| fail(e))
}

fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(format!("failed to read {}: {e}", path.display())))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => fail(e),
    }
}

fn fail(msg: impl Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analyze_arguments_parse() {
        let cli = Cli::try_parse_from([
            "muhurta", "analyze", "--domain", "career", "--date", "2026-03-01", "--horizon", "30",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze {
                domain,
                date,
                horizon,
                parallel,
                chart,
                ..
            } => {
                assert_eq!(domain, Domain::Career);
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
                assert_eq!(horizon, Some(30));
                assert!(!parallel);
                assert!(chart.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn unknown_domain_rejected() {
        let args = ["muhurta", "aligned", "--domain", "travel", "--date", "2026-03-01"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn orbs_default_and_validate() {
        let args = ["muhurta", "analyze", "--domain", "finance", "--date", "2026-03-01"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Analyze {
                transit_orb,
                progression_orb,
                ..
            } => {
                assert_eq!(transit_orb, DEFAULT_TRANSIT_ORB_DEG);
                assert_eq!(progression_orb, DEFAULT_PROGRESSION_ORB_DEG);
            }
            _ => panic!("expected analyze"),
        }

        let orbs = ["--transit-orb", "8", "--progression-orb", "0.5"];
        let cli = Cli::try_parse_from(args.into_iter().chain(orbs)).unwrap();
        match cli.command {
            Commands::Analyze {
                transit_orb,
                progression_orb,
                ..
            } => {
                assert_eq!(transit_orb, 8.0);
                assert_eq!(progression_orb, 0.5);
            }
            _ => panic!("expected analyze"),
        }

        for bad in ["0", "-2", "45", "NaN", "wide"] {
            assert!(parse_orb(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn global_config_flag() {
        let cli =
            Cli::try_parse_from(["muhurta", "classify", "72.5", "--config", "alt.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
    }
}
