use std::fmt;

use serde::{Deserialize, Serialize};

/// Preference category of a horse for a rider, from most to least wanted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrefCategory {
    Best,
    Nice,
    Isok,
    Limp,
    Excl,
}

impl PrefCategory {
    /// Categories whose horses may be assigned, best first.
    pub const ACTIVE: [PrefCategory; 4] = [
        PrefCategory::Best,
        PrefCategory::Nice,
        PrefCategory::Isok,
        PrefCategory::Limp,
    ];

    /// Every category, including excludes.
    pub const ALL: [PrefCategory; 5] = [
        PrefCategory::Best,
        PrefCategory::Nice,
        PrefCategory::Isok,
        PrefCategory::Limp,
        PrefCategory::Excl,
    ];

    /// Base weight of the category in penalty scores. Strictly increasing
    /// over [`PrefCategory::ACTIVE`]; `None` for excludes.
    pub fn weight(self) -> Option<u64> {
        match self {
            PrefCategory::Best => Some(0),
            PrefCategory::Nice => Some(1),
            PrefCategory::Isok => Some(2),
            PrefCategory::Limp => Some(3),
            PrefCategory::Excl => None,
        }
    }

    pub fn is_active(self) -> bool {
        self != PrefCategory::Excl
    }
}

impl fmt::Display for PrefCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrefCategory::Best => "best",
            PrefCategory::Nice => "nice",
            PrefCategory::Isok => "isok",
            PrefCategory::Limp => "limp",
            PrefCategory::Excl => "excl",
        };
        f.write_str(name)
    }
}

/// A rider's horses split into the five preference categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub best: Vec<String>,
    #[serde(default)]
    pub nice: Vec<String>,
    #[serde(default)]
    pub isok: Vec<String>,
    #[serde(default)]
    pub limp: Vec<String>,
    #[serde(default)]
    pub excl: Vec<String>,
}

impl Preferences {
    /// Preferences of a rider nobody has ranked yet: every horse is acceptable.
    ///
    /// # Example
    ///
    /// ```
    /// use horsematch_core::{PrefCategory, Preferences};
    ///
    /// let prefs = Preferences::new_rider(["Bella", "Lady"]);
    /// assert_eq!(prefs.category(PrefCategory::Isok), ["Bella", "Lady"]);
    /// assert!(prefs.category(PrefCategory::Best).is_empty());
    /// ```
    pub fn new_rider<I, S>(horses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            isok: horses.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn category(&self, category: PrefCategory) -> &[String] {
        match category {
            PrefCategory::Best => &self.best,
            PrefCategory::Nice => &self.nice,
            PrefCategory::Isok => &self.isok,
            PrefCategory::Limp => &self.limp,
            PrefCategory::Excl => &self.excl,
        }
    }

    pub fn category_mut(&mut self, category: PrefCategory) -> &mut Vec<String> {
        match category {
            PrefCategory::Best => &mut self.best,
            PrefCategory::Nice => &mut self.nice,
            PrefCategory::Isok => &mut self.isok,
            PrefCategory::Limp => &mut self.limp,
            PrefCategory::Excl => &mut self.excl,
        }
    }

    /// Returns the first category naming `horse`, if any.
    pub fn category_of(&self, horse: &str) -> Option<PrefCategory> {
        PrefCategory::ALL
            .into_iter()
            .find(|&c| self.category(c).iter().any(|h| h == horse))
    }

    /// Iterates over `(category, horse)` pairs in category order.
    pub fn iter(&self) -> impl Iterator<Item = (PrefCategory, &str)> + '_ {
        PrefCategory::ALL
            .into_iter()
            .flat_map(move |c| self.category(c).iter().map(move |h| (c, h.as_str())))
    }

    /// Total number of names across all five categories.
    pub fn len(&self) -> usize {
        PrefCategory::ALL
            .into_iter()
            .map(|c| self.category(c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of these preferences keeping only horses accepted by `keep`.
    pub fn retained(&self, mut keep: impl FnMut(&str) -> bool) -> Self {
        let mut out = self.clone();
        for category in PrefCategory::ALL {
            out.category_mut(category).retain(|h| keep(h));
        }
        out
    }
}

/// A rider ("kido") with ranked horse preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rider {
    pub name: String,
    pub prefs: Preferences,
}

impl Rider {
    pub fn new(name: impl Into<String>, prefs: Preferences) -> Self {
        Self {
            name: name.into(),
            prefs,
        }
    }
}
