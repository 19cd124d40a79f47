//! Reference stable fixture.
//!
//! # Example
//!
//! ```
//! use horsematch_test::stable;
//!
//! assert_eq!(stable::horses().len(), 7);
//! assert!(stable::riders().iter().all(|r| r.prefs.len() == 7));
//! ```

use horsematch_core::{Horse, Preferences, Rider};

pub const HORSE_NAMES: [&str; 7] = [
    "Czejen", "Parys", "Bella", "Jadzia", "Dzidzia", "Bracio", "Lady",
];

/// Every horse of the stable, without workload overrides.
pub fn horses() -> Vec<Horse> {
    HORSE_NAMES.iter().map(|&name| Horse::new(name)).collect()
}

/// Builds preferences from five category slices.
pub fn prefs(best: &[&str], nice: &[&str], isok: &[&str], limp: &[&str], excl: &[&str]) -> Preferences {
    let owned = |names: &[&str]| names.iter().map(|n| n.to_string()).collect::<Vec<_>>();
    Preferences {
        best: owned(best),
        nice: owned(nice),
        isok: owned(isok),
        limp: owned(limp),
        excl: owned(excl),
    }
}

/// Looks up one rider of the reference stable by name.
pub fn rider(name: &str) -> Option<Rider> {
    riders().into_iter().find(|r| r.name == name)
}

/// Every rider of the stable with complete preferences.
pub fn riders() -> Vec<Rider> {
    vec![
        Rider::new(
            "Emilka",
            prefs(
                &["Dzidzia"],
                &["Lady", "Jadzia"],
                &["Parys", "Bracio"],
                &["Czejen", "Bella"],
                &[],
            ),
        ),
        Rider::new(
            "Weronika",
            prefs(
                &["Bella"],
                &["Bracio", "Jadzia"],
                &["Lady", "Czejen"],
                &["Parys"],
                &["Dzidzia"],
            ),
        ),
        Rider::new(
            "Maja",
            prefs(
                &["Lady", "Czejen"],
                &["Jadzia", "Bella"],
                &["Parys"],
                &["Dzidzia"],
                &["Bracio"],
            ),
        ),
        Rider::new(
            "Julka Duza",
            prefs(
                &["Bella"],
                &["Lady", "Jadzia"],
                &["Parys", "Czejen"],
                &["Dzidzia"],
                &["Bracio"],
            ),
        ),
        Rider::new(
            "Julka Mala",
            prefs(
                &["Czejen"],
                &["Lady", "Jadzia"],
                &["Parys", "Bella"],
                &["Dzidzia"],
                &["Bracio"],
            ),
        ),
        Rider::new(
            "Paula",
            prefs(
                &["Dzidzia", "Czejen"],
                &["Lady"],
                &["Bracio"],
                &["Jadzia", "Parys"],
                &["Bella"],
            ),
        ),
        Rider::new(
            "Julka Lonza",
            prefs(
                &["Jadzia"],
                &["Bracio"],
                &["Czejen"],
                &["Lady"],
                &["Parys", "Bella", "Dzidzia"],
            ),
        ),
        Rider::new(
            "Ola C",
            prefs(
                &["Parys", "Bella"],
                &["Lady", "Jadzia"],
                &["Dzidzia"],
                &["Czejen"],
                &["Bracio"],
            ),
        ),
        Rider::new(
            "Kalina",
            prefs(
                &["Dzidzia", "Bella"],
                &["Bracio", "Jadzia"],
                &["Lady"],
                &["Czejen", "Parys"],
                &[],
            ),
        ),
    ]
}
