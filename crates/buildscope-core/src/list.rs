//! Record list with per-partition sorting, top-largest and sum selection

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ListConfig;
use crate::error::{Error, Result};
use crate::records::{AuxSource, NoAux, Record};
use crate::sort::{sort_records, SortSpec};

/// A view over the record collection: everything, or one category.
///
/// Serialized as the category index, with `-1` meaning [`Partition::All`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Partition {
    #[default]
    All,
    Filter(usize),
}

impl From<i64> for Partition {
    fn from(index: i64) -> Self {
        if index < 0 {
            Self::All
        } else {
            Self::Filter(index as usize)
        }
    }
}

impl From<Partition> for i64 {
    fn from(partition: Partition) -> Self {
        match partition {
            Partition::All => -1,
            Partition::Filter(idx) => idx as i64,
        }
    }
}

/// The authoritative record arrays of one report section.
///
/// Sorting only touches the requested partition. The other partitions are
/// brought up to date lazily through [`RecordList::sort_if_needed`], which
/// consults the set of partitions already sorted since the last sort call.
#[derive(Debug, Clone)]
pub struct RecordList<R> {
    all: Vec<R>,
    per_category: Vec<Vec<R>>,
    top_largest: Vec<R>,
    view_offsets: Vec<usize>,
    labels: Vec<String>,

    last_sort: Option<SortSpec>,
    sorted: AHashSet<Partition>,

    selection: AHashSet<String>,
    last_selected: Option<String>,
}

impl<R: Record + Clone> RecordList<R> {
    /// Build a list and apply the configured default sort to `active`
    pub fn new(
        all: Vec<R>,
        per_category: Vec<Vec<R>>,
        config: &ListConfig,
        active: Partition,
    ) -> Result<Self> {
        let view_offsets = vec![0; per_category.len() + 1];
        let mut list = Self {
            all,
            per_category,
            top_largest: Vec::new(),
            view_offsets,
            labels: Vec::new(),
            last_sort: None,
            sorted: AHashSet::new(),
            selection: AHashSet::new(),
            last_selected: None,
        };
        list.refresh_top_largest(config.number_of_top_largest);
        list.sort(config.default_sort.clone(), active, &NoAux)?;
        Ok(list)
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Sort one partition and start a new sort round: every other partition
    /// is considered stale until `sort_if_needed` visits it.
    pub fn sort<A>(&mut self, spec: SortSpec, partition: Partition, aux: &A) -> Result<()>
    where
        A: AuxSource + ?Sized,
    {
        let records = self.records_mut(partition)?;
        sort_records(records, &spec, aux);

        self.sorted.clear();
        self.sorted.insert(partition);
        self.last_sort = Some(spec);
        Ok(())
    }

    /// Re-apply the last sort to `partition` unless it was already sorted
    /// this round. Returns whether a sort pass ran.
    pub fn sort_if_needed<A>(&mut self, partition: Partition, aux: &A) -> Result<bool>
    where
        A: AuxSource + ?Sized,
    {
        let Some(spec) = self.last_sort.clone() else {
            return Ok(false);
        };
        if self.sorted.contains(&partition) {
            debug!(partition = i64::from(partition), "partition already sorted");
            return Ok(false);
        }

        let records = self.records_mut(partition)?;
        sort_records(records, &spec, aux);
        self.sorted.insert(partition);
        Ok(true)
    }

    pub fn last_sort(&self) -> Option<&SortSpec> {
        self.last_sort.as_ref()
    }

    /// Whether `partition` has been sorted since the last `sort` call
    pub fn is_sorted(&self, partition: Partition) -> bool {
        self.sorted.contains(&partition)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn records(&self, partition: Partition) -> Result<&[R]> {
        match partition {
            Partition::All => Ok(&self.all),
            Partition::Filter(idx) => self
                .per_category
                .get(idx)
                .map(Vec::as_slice)
                .ok_or(Error::UnknownPartition(idx as i64)),
        }
    }

    fn records_mut(&mut self, partition: Partition) -> Result<&mut [R]> {
        match partition {
            Partition::All => Ok(&mut self.all),
            Partition::Filter(idx) => self
                .per_category
                .get_mut(idx)
                .map(Vec::as_mut_slice)
                .ok_or(Error::UnknownPartition(idx as i64)),
        }
    }

    pub fn all(&self) -> &[R] {
        &self.all
    }

    pub fn per_category(&self) -> &[Vec<R>] {
        &self.per_category
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Sum of the usable sizes in the All partition
    pub fn total_size(&self) -> u64 {
        self.all.iter().map(Record::usable_size).sum()
    }

    // ========================================================================
    // Top largest
    // ========================================================================

    /// Recompute the `count` largest records by raw size.
    ///
    /// All is temporarily sorted by raw size descending, then put back in the
    /// last sort order. An auxiliary last sort cannot be restored without its
    /// lookup, so All is marked stale instead.
    pub fn refresh_top_largest(&mut self, count: usize) {
        sort_records(&mut self.all, &SortSpec::default(), &NoAux);
        self.top_largest = self.all.iter().take(count).cloned().collect();

        match &self.last_sort {
            Some(spec) if !spec.field.is_aux() => sort_records(&mut self.all, spec, &NoAux),
            Some(_) => {
                self.sorted.remove(&Partition::All);
            }
            None => {}
        }
    }

    pub fn top_largest(&self) -> &[R] {
        &self.top_largest
    }

    // ========================================================================
    // Percentages and labels
    // ========================================================================

    /// Set every record's percentage of the All total, rounded to two decimals
    pub fn recalculate_percentages(&mut self) {
        let total = self.total_size() as f64;
        let percent_of = |size: u64| {
            if total > 0.0 {
                round_to_hundredths(size as f64 / total * 100.0)
            } else {
                0.0
            }
        };

        for record in self.all.iter_mut().chain(self.per_category.iter_mut().flatten()) {
            let pct = percent_of(record.usable_size());
            record.set_percentage(pct);
        }
        for record in &mut self.top_largest {
            let pct = percent_of(record.usable_size());
            record.set_percentage(pct);
        }
    }

    /// Rebuild the partition labels: `All (n)`, then one `<label> (n)` per
    /// category. The last category holds unrecognized files and is always
    /// labeled `Unknown (n)`.
    pub fn refresh_filter_labels<S: AsRef<str>>(&mut self, labels: &[S]) -> &[String] {
        let mut out = Vec::with_capacity(self.per_category.len() + 1);
        out.push(format!("All ({})", self.all.len()));
        for (idx, category) in self.per_category.iter().enumerate() {
            let is_last = idx + 1 == self.per_category.len();
            let label = match labels.get(idx) {
                _ if is_last => "Unknown",
                Some(label) => label.as_ref(),
                None => "Unknown",
            };
            out.push(format!("{} ({})", label, category.len()));
        }
        self.labels = out;
        &self.labels
    }

    pub fn filter_labels(&self) -> &[String] {
        &self.labels
    }

    // ========================================================================
    // View offsets
    // ========================================================================

    fn offset_slot(&self, partition: Partition) -> Option<usize> {
        match partition {
            Partition::All => Some(0),
            Partition::Filter(idx) if idx < self.per_category.len() => Some(idx + 1),
            Partition::Filter(_) => None,
        }
    }

    /// Scroll offset of a partition; unknown partitions read as 0
    pub fn view_offset(&self, partition: Partition) -> usize {
        self.offset_slot(partition)
            .and_then(|slot| self.view_offsets.get(slot).copied())
            .unwrap_or(0)
    }

    pub fn set_view_offset(&mut self, partition: Partition, offset: usize) -> Result<()> {
        let slot = self
            .offset_slot(partition)
            .ok_or(Error::UnknownPartition(i64::from(partition)))?;
        self.view_offsets[slot] = offset;
        Ok(())
    }

    // ========================================================================
    // Sum selection
    // ========================================================================

    // The selection holds names only; sizes and percentages are read from
    // the All partition so they track `recalculate_percentages`.

    pub fn in_selection(&self, record: &R) -> bool {
        self.selection.contains(record.name())
    }

    pub fn toggle_selection(&mut self, record: &R) {
        if self.in_selection(record) {
            self.remove_from_selection(record);
        } else {
            self.add_to_selection(record);
        }
    }

    pub fn add_to_selection(&mut self, record: &R) {
        if self.in_selection(record) {
            return;
        }
        self.selection.insert(record.name().to_owned());
        self.last_selected = Some(record.name().to_owned());
    }

    pub fn remove_from_selection(&mut self, record: &R) {
        self.selection.remove(record.name());
    }

    /// Select `len` records of `partition` starting at `offset`, clamped to
    /// the partition bounds
    pub fn add_range_to_selection(&mut self, partition: Partition, offset: usize, len: usize) -> Result<()> {
        let records = self.records(partition)?;
        let start = offset.min(records.len());
        let end = offset.saturating_add(len).min(records.len());
        let picked: Vec<String> = records[start..end]
            .iter()
            .map(|r| r.name().to_owned())
            .collect();
        self.select_names(picked);
        Ok(())
    }

    pub fn add_all_to_selection(&mut self, partition: Partition) -> Result<()> {
        let picked: Vec<String> = self
            .records(partition)?
            .iter()
            .map(|r| r.name().to_owned())
            .collect();
        self.select_names(picked);
        Ok(())
    }

    fn select_names(&mut self, names: Vec<String>) {
        for name in names {
            if !self.selection.contains(&name) {
                self.selection.insert(name.clone());
                self.last_selected = Some(name);
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.last_selected = None;
    }

    pub fn selected_count(&self) -> usize {
        self.selection.len()
    }

    /// Selected records of the All partition, one per name
    pub fn selected(&self) -> impl Iterator<Item = &R> + '_ {
        let mut seen = AHashSet::new();
        self.all
            .iter()
            .filter(move |r| self.selection.contains(r.name()) && seen.insert(r.name()))
    }

    /// Total usable size of the selected records
    pub fn selection_size(&self) -> u64 {
        self.selected().map(Record::usable_size).sum()
    }

    /// Sum of the positive percentages of the selected records
    pub fn selection_percentage(&self) -> f64 {
        self.selected()
            .map(Record::percentage)
            .filter(|pct| *pct > 0.0)
            .fold(0.0, |acc, pct| acc + pct)
    }

    /// Most recently added record; survives removal from the selection
    pub fn last_selected(&self) -> Option<&R> {
        let name = self.last_selected.as_deref()?;
        self.all.iter().find(|r| r.name() == name)
    }
}

/// Round to two decimals, halves away from zero
fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
