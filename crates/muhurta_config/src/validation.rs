//! Unknown-key detection for settings files.
//!
//! The raw TOML is walked as a `toml::Value` tree and every dotted key path
//! is compared with the keys the settings structs accept. Unknown keys are
//! warnings with a "did you mean" suggestion; they never fail a load.

use std::collections::BTreeSet;

use muhurta_core::{ALL_DOMAINS, Domain};

/// A non-fatal settings warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub field: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown config key '{}'", self.field)?;
        if let Some(s) = &self.suggestion {
            write!(f, ", did you mean '{s}'?")?;
        }
        Ok(())
    }
}

/// Keys accepted in `[search]` and `[domains.<name>]`.
pub const SEARCH_KEYS: [&str; 9] = [
    "horizon_days",
    "step_days",
    "favorable_threshold",
    "challenging_threshold",
    "max_favorable_windows",
    "max_challenging_windows",
    "peak_threshold",
    "max_optimal_dates",
    "parallel",
];

/// Every valid dotted key path.
pub fn known_config_keys() -> BTreeSet<String> {
    let mut keys: BTreeSet<String> = ["logging", "logging.level", "search", "domains"]
        .into_iter()
        .map(String::from)
        .collect();
    keys.extend(SEARCH_KEYS.iter().map(|k| format!("search.{k}")));
    for d in ALL_DOMAINS {
        let base = format!("domains.{}", d.name());
        keys.extend(SEARCH_KEYS.iter().map(|k| format!("{base}.{k}")));
        keys.insert(format!("{base}.catalog"));
        keys.insert(base);
    }
    keys
}

/// All dotted key paths in a TOML value, tables included.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Closest known key within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &BTreeSet<String>) -> Option<String> {
    known
        .iter()
        .map(|k| (k, levenshtein(unknown, k)))
        .filter(|(_, d)| *d <= 3)
        .min_by_key(|(_, d)| *d)
        .map(|(k, _)| k.clone())
}

/// `domains.<name>...` with the domain segment in its canonical spelling,
/// matching how settings resolve domain sections.
fn canonical_domain_key(key: &str) -> String {
    let mut parts = key.splitn(3, '.');
    let (Some("domains"), Some(name)) = (parts.next(), parts.next()) else {
        return key.to_string();
    };
    let Some(domain) = Domain::from_name(name) else {
        return key.to_string();
    };
    match parts.next() {
        Some(rest) => format!("domains.{domain}.{rest}"),
        None => format!("domains.{domain}"),
    }
}

/// Warnings for every unknown key in a raw TOML document.
///
/// Parse errors yield no warnings; deserialization reports them.
pub fn unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let Ok(value) = raw_toml.parse::<toml::Value>() else {
        return Vec::new();
    };
    let known = known_config_keys();
    walk_toml_keys(&value, "")
        .into_iter()
        .filter(|k| !known.contains(&canonical_domain_key(k)))
        .map(|field| ValidationWarning {
            suggestion: suggest_correction(&field, &known),
            field,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn typo_gets_suggestion() {
        let w = unknown_keys("[search]\nhorizn_days = 30\n");
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].field, "search.horizn_days");
        assert_eq!(w[0].suggestion.as_deref(), Some("search.horizon_days"));
    }

    #[test]
    fn valid_file_has_no_warnings() {
        let raw = r#"
            [logging]
            level = "debug"
            [search]
            parallel = true
            [domains.marriage]
            catalog = "m.toml"
            horizon_days = 30
        "#;
        assert!(unknown_keys(raw).is_empty());
    }

    #[test]
    fn domain_sections_match_case_insensitively() {
        let raw = "[domains.Career]\nhorizon_days = 30\n[domains.FASTING]\ncatalog = \"f.toml\"\n";
        assert!(unknown_keys(raw).is_empty());

        let w = unknown_keys("[domains.Career]\nhorizn_days = 30\n");
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].field, "domains.Career.horizn_days");
    }

    #[test]
    fn unknown_domain_is_flagged() {
        let w = unknown_keys("[domains.travel]\nhorizon_days = 3\n");
        assert!(w.iter().any(|w| w.field == "domains.travel"));
    }
}
