//! National provider/organization registry lookups and the selections they feed.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::validation::require_min_chars;

pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Name filters shorter than this are rejected before any request is made
pub const MIN_NAME_CHARS: usize = 2;

/// Denormalized hospital snapshot chosen by a patient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct HospitalSelection {
    pub name: String,
    /// CMS certification number
    pub ccn: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
}

/// Denormalized provider snapshot chosen by a patient
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct ProviderSelection {
    pub npi: String,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub phone: Option<String>,
    pub taxonomy_desc: Option<String>,
}

/// One page of registry results
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegistryPage<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> RegistryPage<T> {
    /// Whether a page after this one exists. Without a total, a full page means maybe.
    pub fn has_more(&self, skip: u32, limit: u32) -> bool {
        let seen = u64::from(skip) + self.results.len() as u64;
        match self.count {
            Some(count) => seen < count,
            None => self.results.len() as u64 >= u64::from(limit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HospitalSearch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub limit: u32,
    pub skip: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSearch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub taxonomy: Option<String>,
    pub limit: u32,
    pub skip: u32,
}

impl Default for HospitalSearch {
    fn default() -> Self {
        Self {
            name: None,
            city: None,
            state: None,
            zip: None,
            limit: DEFAULT_PAGE_LIMIT,
            skip: 0,
        }
    }
}

impl Default for ProviderSearch {
    fn default() -> Self {
        Self {
            first_name: None,
            last_name: None,
            organization: None,
            city: None,
            state: None,
            taxonomy: None,
            limit: DEFAULT_PAGE_LIMIT,
            skip: 0,
        }
    }
}

fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn push_filter(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = trimmed(value) {
        pairs.push((key, v.to_string()));
    }
}

fn check_name(value: &Option<String>) -> Result<()> {
    if let Some(v) = trimmed(value) {
        require_min_chars(v, MIN_NAME_CHARS)?;
    }
    Ok(())
}

impl HospitalSearch {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Query parameters, empty filters omitted, paging last
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_filter(&mut pairs, "name", &self.name);
        push_filter(&mut pairs, "city", &self.city);
        push_filter(&mut pairs, "state", &self.state);
        push_filter(&mut pairs, "zip", &self.zip);
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("skip", self.skip.to_string()));
        pairs
    }

    pub fn validate(&self) -> Result<()> {
        if [&self.name, &self.city, &self.state, &self.zip]
            .iter()
            .all(|f| trimmed(f).is_none())
        {
            return Err(CoreError::validation("Enter a hospital name, city, state or ZIP"));
        }
        check_name(&self.name)
    }

    pub fn next_page(&mut self) {
        self.skip = self.skip.saturating_add(self.limit);
    }

    pub fn prev_page(&mut self) {
        self.skip = self.skip.saturating_sub(self.limit);
    }
}

impl ProviderSearch {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_filter(&mut pairs, "first_name", &self.first_name);
        push_filter(&mut pairs, "last_name", &self.last_name);
        push_filter(&mut pairs, "organization", &self.organization);
        push_filter(&mut pairs, "city", &self.city);
        push_filter(&mut pairs, "state", &self.state);
        push_filter(&mut pairs, "taxonomy", &self.taxonomy);
        pairs.push(("limit", self.limit.to_string()));
        pairs.push(("skip", self.skip.to_string()));
        pairs
    }

    pub fn validate(&self) -> Result<()> {
        let filters = [
            &self.first_name,
            &self.last_name,
            &self.organization,
            &self.city,
            &self.state,
            &self.taxonomy,
        ];
        if filters.iter().all(|f| trimmed(f).is_none()) {
            return Err(CoreError::validation("Enter at least one search field"));
        }
        check_name(&self.first_name)?;
        check_name(&self.last_name)?;
        check_name(&self.organization)
    }

    pub fn next_page(&mut self) {
        self.skip = self.skip.saturating_add(self.limit);
    }

    pub fn prev_page(&mut self) {
        self.skip = self.skip.saturating_sub(self.limit);
    }
}
