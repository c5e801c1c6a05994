//! Structured listing filters, applied before relevance ranking.

use crate::index::MatchIndex;
use crate::model::{AccommodationType, Candidate};
use crate::normalize::normalize;
use serde::{Deserialize, Serialize};

/// Exact and containment constraints on candidate fields.
///
/// Unset fields do not constrain. All set fields must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilter {
    /// Property type
    #[serde(rename = "type")]
    pub kind: Option<AccommodationType>,
    /// Listing status code
    pub status: Option<i32>,
    /// Substring of the province, accents and case ignored
    pub province: Option<String>,
    /// Substring of the district, accents and case ignored
    pub district: Option<String>,
    /// Approximate name; resolved to the closest known name
    pub name: Option<String>,
    /// Star category
    #[serde(rename = "num")]
    pub star_category: Option<u32>,
    /// Number of beds
    pub num_bed: Option<u32>,
    /// Number of bathrooms
    pub num_tolet: Option<u32>,
    /// Guest capacity
    pub people: Option<u32>,
    /// Candidate must offer at least one of these benefit ids
    pub benefit_ids: Vec<u64>,
}

impl SearchFilter {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Candidates of `corpus` passing the filter, in corpus order.
    ///
    /// `names` resolves the approximate name filter; it should index the
    /// names of the whole corpus.
    pub fn apply<'a>(&self, corpus: &'a [Candidate], names: &MatchIndex) -> Vec<&'a Candidate> {
        let compiled = CompiledFilter::new(self, names);
        corpus.iter().filter(|c| compiled.matches(c)).collect()
    }
}

/// Filter with its text constraints normalized once.
struct CompiledFilter<'f> {
    filter: &'f SearchFilter,
    province: Option<String>,
    district: Option<String>,
    /// `Some(None)`: a name was asked for but nothing in the corpus resembles it
    name: Option<Option<String>>,
}

impl<'f> CompiledFilter<'f> {
    fn new(filter: &'f SearchFilter, names: &MatchIndex) -> Self {
        let text = |value: &Option<String>| {
            value.as_deref().map(normalize).filter(|v| !v.is_empty())
        };

        let name = text(&filter.name).map(|wanted| names.closest(&wanted).map(str::to_string));

        Self {
            filter,
            province: text(&filter.province),
            district: text(&filter.district),
            name,
        }
    }

    fn matches(&self, candidate: &Candidate) -> bool {
        let f = self.filter;

        if f.kind.is_some() && f.kind != candidate.kind {
            return false;
        }
        if f.status.is_some_and(|s| s != candidate.status) {
            return false;
        }
        if f.star_category.is_some() && f.star_category != candidate.star_category {
            return false;
        }
        if f.num_bed.is_some_and(|n| n != candidate.num_bed)
            || f.num_tolet.is_some_and(|n| n != candidate.num_tolet)
            || f.people.is_some_and(|n| n != candidate.people)
        {
            return false;
        }
        if let Some(province) = &self.province {
            if !normalize(&candidate.province).contains(province.as_str()) {
                return false;
            }
        }
        if let Some(district) = &self.district {
            if !normalize(&candidate.district).contains(district.as_str()) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            match name {
                Some(closest) if *closest == normalize(&candidate.name) => {}
                _ => return false,
            }
        }
        if !f.benefit_ids.is_empty()
            && !candidate.benefits.iter().any(|b| f.benefit_ids.contains(&b.id))
        {
            return false;
        }

        true
    }
}
