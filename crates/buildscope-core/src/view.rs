//! Asset browser state: a record list plus column sort and search results

use crate::config::SearchConfig;
use crate::error::Result;
use crate::fuzzy::MetricOptionSet;
use crate::list::{Partition, RecordList};
use crate::records::{AuxSource, Record};
use crate::search::{rank_by_search_in_place, search};
use crate::sort::{sort_records, SortField, SortSpec, SortState};

#[derive(Debug, Clone)]
struct ActiveSearch<R> {
    query: String,
    metrics: MetricOptionSet,
    results: Vec<R>,
}

/// What a list screen shows: search results while a search is active,
/// otherwise the selected partition of the list.
#[derive(Debug, Clone)]
pub struct AssetView<R> {
    list: RecordList<R>,
    sort: SortState,
    search: Option<ActiveSearch<R>>,
}

impl<R: Record + Clone> AssetView<R> {
    pub fn new(list: RecordList<R>) -> Self {
        let sort = SortState::new(list.last_sort().cloned());
        Self {
            list,
            sort,
            search: None,
        }
    }

    pub fn list(&self) -> &RecordList<R> {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut RecordList<R> {
        &mut self.list
    }

    pub fn current_sort(&self) -> Option<&SortSpec> {
        self.sort.current()
    }

    /// Run `query` over `partition`. Results start in search-rank order, so
    /// the column sort is reset. An empty query clears the search.
    pub fn update_search(&mut self, query: &str, partition: Partition, config: &SearchConfig) -> Result<()> {
        if query.is_empty() {
            self.clear_search();
            return Ok(());
        }
        let results = search(self.list.records(partition)?, query, config);
        self.search = Some(ActiveSearch {
            query: query.to_owned(),
            metrics: config.metrics,
            results,
        });
        self.sort.set(None);
        Ok(())
    }

    /// Drop the search results and return to the list's last sort
    pub fn clear_search(&mut self) {
        if self.search.take().is_some() {
            self.sort.set(self.list.last_sort().cloned());
        }
    }

    pub fn search_results(&self) -> Option<&[R]> {
        self.search.as_ref().map(|s| s.results.as_slice())
    }

    pub fn search_query(&self) -> Option<&str> {
        self.search.as_ref().map(|s| s.query.as_str())
    }

    /// Handle a click on a sort column and return the resulting sort.
    ///
    /// Search results are sorted in place, or put back in rank order once the
    /// toggle reaches "no sort". Without a search the list partition is sorted.
    pub fn toggle_sort<A>(&mut self, field: SortField, partition: Partition, aux: &A) -> Result<Option<SortSpec>>
    where
        A: AuxSource + ?Sized,
    {
        let next = self.sort.toggle(field, self.search.is_some()).cloned();

        match (&mut self.search, &next) {
            (Some(active), Some(spec)) => sort_records(&mut active.results, spec, aux),
            (Some(active), None) => {
                rank_by_search_in_place(&mut active.results, &active.query, &active.metrics)
            }
            (None, Some(spec)) => self.list.sort(spec.clone(), partition, aux)?,
            (None, None) => {}
        }
        Ok(next)
    }

    /// Switch to `partition`, bringing it up to date with the last sort
    pub fn show_partition<A>(&mut self, partition: Partition, aux: &A) -> Result<&[R]>
    where
        A: AuxSource + ?Sized,
    {
        self.list.sort_if_needed(partition, aux)?;
        self.displayed(partition)
    }

    pub fn displayed(&self, partition: Partition) -> Result<&[R]> {
        match &self.search {
            Some(active) => Ok(&active.results),
            None => self.list.records(partition),
        }
    }
}
