//! Hospital and provider selections plus the registry search that feeds them.
//!
//! Reads are two-tier: the backend is asked first and its answer overwrites
//! the local cache (or removes it when the backend holds nothing). The cached
//! copy is only returned when the backend read fails for a reason other than
//! authentication.

use consentgate_core::{
    HospitalSearch, HospitalSelection, ProviderSearch, ProviderSelection, RegistryPage,
};
use consentgate_store::{Result as StoreResult, SelectionCache};

use super::{Controller, StatusLine};
use crate::api::ApiClient;
use crate::error::{ApiError, Result};
use crate::session::{SessionBound, SessionEpoch};

/// Where a selection value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Backend,
    Cache,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub value: T,
    pub origin: Origin,
}

/// Registry paging direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Next,
    Prev,
}

#[derive(Debug)]
pub struct SelectionWorkflow {
    api: ApiClient,
    cache: SelectionCache,
    status: StatusLine,
    epoch: SessionEpoch,
    hospital: Option<Sourced<HospitalSelection>>,
    provider: Option<Sourced<ProviderSelection>>,
    hospital_search: Option<HospitalSearch>,
    hospital_results: Option<RegistryPage<HospitalSelection>>,
    provider_search: Option<ProviderSearch>,
    provider_results: Option<RegistryPage<ProviderSelection>>,
}

impl SelectionWorkflow {
    pub fn new(api: ApiClient, cache: SelectionCache) -> Self {
        Self {
            epoch: SessionEpoch::new(api.session()),
            api,
            cache,
            status: StatusLine::default(),
            hospital: None,
            provider: None,
            hospital_search: None,
            hospital_results: None,
            provider_search: None,
            provider_results: None,
        }
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn hospital(&self) -> Option<&Sourced<HospitalSelection>> {
        self.hospital.as_ref().filter(|_| self.epoch.is_current())
    }

    pub fn provider(&self) -> Option<&Sourced<ProviderSelection>> {
        self.provider.as_ref().filter(|_| self.epoch.is_current())
    }

    pub fn hospital_results(&self) -> Option<&RegistryPage<HospitalSelection>> {
        self.hospital_results.as_ref().filter(|_| self.epoch.is_current())
    }

    pub fn provider_results(&self) -> Option<&RegistryPage<ProviderSelection>> {
        self.provider_results.as_ref().filter(|_| self.epoch.is_current())
    }

    /// Cached hospital, shown before the backend answers
    pub fn cached_hospital(&self) -> Option<HospitalSelection> {
        read_cache(SelectionCache::hospital(&self.cache))
    }

    pub fn cached_provider(&self) -> Option<ProviderSelection> {
        read_cache(SelectionCache::provider(&self.cache))
    }

    pub async fn load_hospital(&mut self) -> Result<Option<Sourced<HospitalSelection>>> {
        self.begin()?;
        let backend = self.api.get_my_hospital_selection().await;
        let loaded = self.reconcile(backend, SelectionCache::hospital, |cache, value| match value {
            Some(selection) => cache.set_hospital(selection),
            None => cache.clear_hospital(),
        })?;
        self.hospital = loaded.clone();
        Ok(loaded)
    }

    pub async fn load_provider(&mut self) -> Result<Option<Sourced<ProviderSelection>>> {
        self.begin()?;
        let backend = self.api.get_my_provider_selection().await;
        let loaded = self.reconcile(backend, SelectionCache::provider, |cache, value| match value {
            Some(selection) => cache.set_provider(selection),
            None => cache.clear_provider(),
        })?;
        self.provider = loaded.clone();
        Ok(loaded)
    }

    /// Cache first, then the backend. A failed backend write leaves the cached copy.
    pub async fn set_hospital(&mut self, selection: HospitalSelection) -> Result<HospitalSelection> {
        if selection.name.trim().is_empty() {
            return Err(self.fail(ApiError::validation("Select a hospital")));
        }
        self.begin()?;
        write_cache(self.cache.set_hospital(&selection));

        let result = self.api.set_my_hospital_selection(&selection).await;
        let saved = self.settle(result)?;
        self.status
            .finish(Some(format!("Hospital saved: {}", saved.name)));
        self.hospital = Some(Sourced {
            value: saved.clone(),
            origin: Origin::Backend,
        });
        Ok(saved)
    }

    pub async fn set_provider(&mut self, selection: ProviderSelection) -> Result<ProviderSelection> {
        if selection.npi.trim().is_empty() {
            return Err(self.fail(ApiError::validation("Select a provider")));
        }
        self.begin()?;
        write_cache(self.cache.set_provider(&selection));

        let result = self.api.set_my_provider_selection(&selection).await;
        let saved = self.settle(result)?;
        self.status
            .finish(Some(format!("Provider saved: {}", saved.name)));
        self.provider = Some(Sourced {
            value: saved.clone(),
            origin: Origin::Backend,
        });
        Ok(saved)
    }

    pub async fn clear_provider(&mut self) -> Result<()> {
        self.begin()?;
        write_cache(self.cache.clear_provider());

        let result = self.api.clear_my_provider_selection().await;
        self.settle(result)?;
        self.provider = None;
        self.status.finish(Some("Provider cleared".to_string()));
        Ok(())
    }

    pub async fn search_hospitals(
        &mut self,
        search: HospitalSearch,
    ) -> Result<&RegistryPage<HospitalSelection>> {
        self.settle(search.validate().map_err(ApiError::from))?;
        self.begin()?;

        let result = self.api.search_hospitals_cms(&search).await;
        let page = self.settle(result)?;
        self.status.finish(Some(found_message(&page, "hospital")));
        self.hospital_search = Some(search);
        Ok(self.hospital_results.insert(page))
    }

    pub async fn search_providers(
        &mut self,
        search: ProviderSearch,
    ) -> Result<&RegistryPage<ProviderSelection>> {
        self.settle(search.validate().map_err(ApiError::from))?;
        self.begin()?;

        let result = self.api.search_providers_cms(&search).await;
        let page = self.settle(result)?;
        self.status.finish(Some(found_message(&page, "provider")));
        self.provider_search = Some(search);
        Ok(self.provider_results.insert(page))
    }

    /// Re-run the last hospital search one page forward or back
    pub async fn page_hospitals(&mut self, step: PageStep) -> Result<&RegistryPage<HospitalSelection>> {
        self.sync_session();
        let Some(mut search) = self.hospital_search.clone() else {
            return Err(self.fail(ApiError::validation("Search for a hospital first")));
        };
        let more = self
            .hospital_results
            .as_ref()
            .is_some_and(|page| page.has_more(search.skip, search.limit));
        match step {
            PageStep::Next if !more => return Err(self.fail(ApiError::validation("No more results"))),
            PageStep::Next => search.next_page(),
            PageStep::Prev => search.prev_page(),
        }
        self.search_hospitals(search).await
    }

    pub async fn page_providers(&mut self, step: PageStep) -> Result<&RegistryPage<ProviderSelection>> {
        self.sync_session();
        let Some(mut search) = self.provider_search.clone() else {
            return Err(self.fail(ApiError::validation("Search for a provider first")));
        };
        let more = self
            .provider_results
            .as_ref()
            .is_some_and(|page| page.has_more(search.skip, search.limit));
        match step {
            PageStep::Next if !more => return Err(self.fail(ApiError::validation("No more results"))),
            PageStep::Next => search.next_page(),
            PageStep::Prev => search.prev_page(),
        }
        self.search_providers(search).await
    }

    fn reconcile<T>(
        &mut self,
        backend: Result<Option<T>>,
        cached: impl FnOnce(&SelectionCache) -> StoreResult<Option<T>>,
        store: impl FnOnce(&SelectionCache, Option<&T>) -> StoreResult<()>,
    ) -> Result<Option<Sourced<T>>> {
        match backend {
            Ok(value) => {
                write_cache(store(&self.cache, value.as_ref()));
                self.status.finish(None);
                Ok(value.map(|value| Sourced {
                    value,
                    origin: Origin::Backend,
                }))
            }
            Err(err) if self.api.recovery().detection().matches(&err) => Err(self.fail(err)),
            Err(err) => match read_cache(cached(&self.cache)) {
                Some(value) => {
                    tracing::warn!(error = %err, "Backend selection unavailable, using cached copy");
                    self.status
                        .finish(Some(format!("Showing saved selection ({})", err)));
                    Ok(Some(Sourced {
                        value,
                        origin: Origin::Cache,
                    }))
                }
                None => Err(self.fail(err)),
            },
        }
    }
}

fn read_cache<T>(result: StoreResult<Option<T>>) -> Option<T> {
    result.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to read cached selection");
        None
    })
}

fn write_cache(result: StoreResult<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "Failed to update cached selection");
    }
}

fn found_message<T>(page: &RegistryPage<T>, noun: &str) -> String {
    let total = page.count.unwrap_or(page.results.len() as u64);
    match total {
        0 => format!("No {}s found", noun),
        1 => format!("1 {} found", noun),
        n => format!("{} {}s found", n, noun),
    }
}

impl SessionBound for SelectionWorkflow {
    fn reset_session_state(&mut self) {
        self.hospital = None;
        self.provider = None;
        self.hospital_results = None;
        self.provider_results = None;
        self.hospital_search = None;
        self.provider_search = None;
    }
}

impl Controller for SelectionWorkflow {
    fn api(&self) -> &ApiClient {
        &self.api
    }

    fn status_mut(&mut self) -> &mut StatusLine {
        &mut self.status
    }

    fn epoch_mut(&mut self) -> &mut SessionEpoch {
        &mut self.epoch
    }
}
