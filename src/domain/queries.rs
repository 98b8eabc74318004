//! Read-side helpers over store snapshots. Pure: never mutate inputs.

use crate::domain::{Application, Casting, CastingId, CastingStatus};
use std::collections::{BTreeMap, HashMap};

/// Category selector for the casting list. `All` disables category filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

/// Browse-screen filter: free-text search AND category.
#[derive(Debug, Clone, Default)]
pub struct CastingFilter {
    pub search: String,
    pub category: CategoryFilter,
}

impl CastingFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            category: CategoryFilter::All,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = CategoryFilter::Only(category.into());
        self
    }

    /// Case-insensitive substring match over title, production and location.
    pub fn matches(&self, casting: &Casting) -> bool {
        let term = self.search.trim().to_lowercase();
        let matches_search = term.is_empty()
            || [&casting.title, &casting.production, &casting.location]
                .iter()
                .any(|field| field.to_lowercase().contains(&term));
        let matches_category = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(cat) => casting.category == *cat,
        };
        matches_search && matches_category
    }
}

/// Castings matching `filter`, in input order.
pub fn filter_castings<'a>(castings: &'a [Casting], filter: &CastingFilter) -> Vec<&'a Casting> {
    castings.iter().filter(|c| filter.matches(c)).collect()
}

/// Category slug for a free-text production type ("Série TV" -> "tv", "Cinéma" -> "film").
/// Unknown types fall back to the lowercased, accent-folded text.
pub fn category_for_type(casting_type: &str) -> String {
    let folded: String = casting_type
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            other => other,
        })
        .collect();

    match folded.as_str() {
        "tv" | "tv series" | "serie tv" | "television" | "serie" => "tv".to_string(),
        "film" | "feature film" | "cinema" | "short film" | "court metrage" => {
            "film".to_string()
        }
        "theater" | "theatre" => "theater".to_string(),
        "commercial" | "publicite" | "advertising" => "commercial".to_string(),
        _ => folded,
    }
}

/// Applications sharing one (casting, role) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleApplications<'a> {
    pub casting_id: CastingId,
    pub role_id: &'a str,
    pub applications: Vec<&'a Application>,
}

/// Groups by (casting_id, role_id). Groups appear in order of their first application;
/// members keep insertion order.
pub fn group_applications_by_role(applications: &[Application]) -> Vec<RoleApplications<'_>> {
    let mut index: HashMap<(CastingId, &str), usize> = HashMap::new();
    let mut groups: Vec<RoleApplications<'_>> = Vec::new();

    for app in applications {
        let key = (app.casting_id, app.role_id.as_str());
        match index.get(&key) {
            Some(&i) => groups[i].applications.push(app),
            None => {
                index.insert(key, groups.len());
                groups.push(RoleApplications {
                    casting_id: app.casting_id,
                    role_id: app.role_id.as_str(),
                    applications: vec![app],
                });
            }
        }
    }
    groups
}

pub fn total_views(castings: &[Casting]) -> u64 {
    castings.iter().map(|c| u64::from(c.views)).sum()
}

pub fn total_applications(castings: &[Casting]) -> u64 {
    castings.iter().map(|c| u64::from(c.applications)).sum()
}

pub fn count_by_status(castings: &[Casting]) -> BTreeMap<CastingStatus, usize> {
    let mut counts = BTreeMap::new();
    for c in castings {
        *counts.entry(c.status).or_insert(0) += 1;
    }
    counts
}

/// Producer dashboard summary cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_castings: usize,
    pub active_castings: usize,
    pub total_applications: u64,
    pub total_views: u64,
}

impl DashboardStats {
    pub fn from_castings(castings: &[Casting]) -> Self {
        Self {
            total_castings: castings.len(),
            active_castings: count_by_status(castings)
                .get(&CastingStatus::Active)
                .copied()
                .unwrap_or(0),
            total_applications: total_applications(castings),
            total_views: total_views(castings),
        }
    }
}
