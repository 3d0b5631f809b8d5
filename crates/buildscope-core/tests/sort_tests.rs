//! Sorting and record list tests

use std::cell::Cell;

use buildscope_core::list::{Partition, RecordList};
use buildscope_core::records::{AssetEntry, AuxField, AuxSource, AuxTable, AuxValue, NoAux};
use buildscope_core::sort::{sort_records, SortField, SortOrder, SortSpec};
use buildscope_core::ListConfig;
use pretty_assertions::assert_eq;

/// Helper to create records from (name, size) pairs
fn entries(items: &[(&str, u64)]) -> Vec<AssetEntry> {
    items.iter().map(|(name, size)| AssetEntry::new(*name, *size)).collect()
}

fn names(records: &[AssetEntry]) -> Vec<&str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

/// Aux source that counts lookups, i.e. sort passes over an aux field
struct CountingAux {
    table: AuxTable,
    lookups: Cell<usize>,
}

impl AuxSource for CountingAux {
    fn lookup(&self, record: &str, field: &str) -> Option<AuxValue> {
        self.lookups.set(self.lookups.get() + 1);
        self.table.lookup(record, field)
    }
}

// ============================================================================
// Comparators
// ============================================================================

#[test]
fn test_equal_size_orders_by_name_in_descending_sort() {
    let mut records = entries(&[("Assets/Zebra.png", 100), ("Assets/Apple.png", 100)]);
    sort_records(&mut records, &SortSpec::descending(SortField::RawSize), &NoAux);
    assert_eq!(names(&records), vec!["Assets/Apple.png", "Assets/Zebra.png"]);
}

#[test]
fn test_ascending_is_reverse_of_descending_without_ties() {
    let fields = [
        SortField::RawSize,
        SortField::AssetFullPath,
        SortField::AssetFilename,
        SortField::ImportedSizeOrRawSize,
    ];
    let base = entries(&[
        ("Assets/a/mesh.fbx", 40),
        ("Assets/b/cloud.png", 10),
        ("Assets/c/tree.png", 90),
        ("Assets/d/atlas.png", 25),
    ]);

    for field in fields {
        let mut asc = base.clone();
        let mut desc = base.clone();
        sort_records(&mut asc, &SortSpec::ascending(field.clone()), &NoAux);
        sort_records(&mut desc, &SortSpec::descending(field.clone()), &NoAux);
        desc.reverse();
        assert_eq!(names(&asc), names(&desc), "field {}", field);
    }
}

#[test]
fn test_ties_resolved_by_full_name_in_both_directions() {
    // same size and same file name: only the full path differs
    let base = entries(&[("b/x.png", 5), ("a/x.png", 5), ("c/y.png", 5)]);
    let mut asc = base.clone();
    let mut desc = base;
    sort_records(&mut asc, &SortSpec::ascending(SortField::RawSize), &NoAux);
    sort_records(&mut desc, &SortSpec::descending(SortField::RawSize), &NoAux);
    assert_eq!(names(&desc), vec!["a/x.png", "b/x.png", "c/y.png"]);
    assert_eq!(names(&asc), vec!["c/y.png", "b/x.png", "a/x.png"]);
}

#[test]
fn test_exact_duplicates_keep_input_order_in_both_directions() {
    let mut base = entries(&[("dup.png", 5), ("dup.png", 5)]);
    base[0].percentage = 1.0;
    base[1].percentage = 2.0;

    let mut asc = base.clone();
    let mut desc = base;
    sort_records(&mut asc, &SortSpec::ascending(SortField::RawSize), &NoAux);
    sort_records(&mut desc, &SortSpec::descending(SortField::RawSize), &NoAux);

    // so descending is not the reverse of ascending here
    assert_eq!(asc[0].percentage, 1.0);
    assert_eq!(desc[0].percentage, 1.0);
}

#[test]
fn test_aux_float_descending_puts_smaller_first() {
    let table = AuxTable::new()
        .with("a.png", "ratio", AuxValue::Float(0.75))
        .with("b.png", "ratio", AuxValue::Float(0.25))
        .with("c.png", "ratio", AuxValue::Float(0.5));
    let mut records = entries(&[("a.png", 1), ("b.png", 1), ("c.png", 1)]);

    let spec = SortSpec::descending(SortField::Aux(AuxField::float("ratio")));
    sort_records(&mut records, &spec, &table);
    assert_eq!(names(&records), vec!["b.png", "c.png", "a.png"]);

    let spec = SortSpec::ascending(SortField::Aux(AuxField::float("ratio")));
    sort_records(&mut records, &spec, &table);
    assert_eq!(names(&records), vec!["a.png", "c.png", "b.png"]);
}

#[test]
fn test_pinned_sentinel_leads_descending_and_trails_ascending() {
    let field = AuxField::npot_scale("npot");
    let sentinel = buildscope_core::records::NPOT_SCALE_NONE_NOT_POT;
    let table = AuxTable::new()
        .with("a.png", "npot", AuxValue::Text("ToNearest".into()))
        .with("b.png", "npot", AuxValue::Text(sentinel.into()))
        .with("c.png", "npot", AuxValue::Text("None".into()));
    let mut records = entries(&[("a.png", 1), ("b.png", 1), ("c.png", 1), ("d.png", 1)]);

    sort_records(&mut records, &SortSpec::descending(SortField::Aux(field.clone())), &table);
    assert_eq!(names(&records), vec!["b.png", "d.png", "c.png", "a.png"]);

    sort_records(&mut records, &SortSpec::ascending(SortField::Aux(field)), &table);
    assert_eq!(names(&records), vec!["a.png", "c.png", "d.png", "b.png"]);
}

#[test]
fn test_aux_bool_sorts_as_int() {
    let table = AuxTable::new()
        .with("a.png", "readable", AuxValue::Bool(false))
        .with("b.png", "readable", AuxValue::Bool(true));
    let mut records = entries(&[("a.png", 1), ("b.png", 1)]);
    sort_records(
        &mut records,
        &SortSpec::descending(SortField::Aux(AuxField::int("readable"))),
        &table,
    );
    assert_eq!(names(&records), vec!["b.png", "a.png"]);
}

// ============================================================================
// Record list
// ============================================================================

fn textured_list() -> RecordList<AssetEntry> {
    let all = entries(&[("t/a.png", 10), ("t/b.png", 20), ("m/c.fbx", 30)]);
    let per_category = vec![
        entries(&[("t/a.png", 10), ("t/b.png", 20)]),
        entries(&[("m/c.fbx", 30)]),
        vec![],
    ];
    RecordList::new(all, per_category, &ListConfig::default(), Partition::All).unwrap()
}

#[test]
fn test_sort_if_needed_sorts_at_most_once() {
    let aux = CountingAux {
        table: AuxTable::new()
            .with("t/a.png", "max", AuxValue::Int(4096))
            .with("t/b.png", "max", AuxValue::Int(256)),
        lookups: Cell::new(0),
    };
    let mut list = textured_list();
    let spec = SortSpec::descending(SortField::Aux(AuxField::int("max")));

    list.sort(spec, Partition::All, &aux).unwrap();
    let after_sort = aux.lookups.get();
    assert_eq!(after_sort, 3);

    assert!(list.sort_if_needed(Partition::Filter(0), &aux).unwrap());
    let after_first = aux.lookups.get();
    assert_eq!(after_first, after_sort + 2);
    assert_eq!(names(list.records(Partition::Filter(0)).unwrap()), vec!["t/a.png", "t/b.png"]);

    assert!(!list.sort_if_needed(Partition::Filter(0), &aux).unwrap());
    assert_eq!(aux.lookups.get(), after_first);
}

#[test]
fn test_fresh_list_only_active_partition_is_sorted() {
    let mut list = textured_list();
    // a fresh list is sorted by the default spec; every other partition is stale
    assert!(list.sort_if_needed(Partition::Filter(1), &NoAux).unwrap());
    assert!(!list.sort_if_needed(Partition::All, &NoAux).unwrap());
}

#[test]
fn test_new_sort_clears_sorted_partitions() {
    let mut list = textured_list();
    list.sort_if_needed(Partition::Filter(0), &NoAux).unwrap();
    assert!(list.is_sorted(Partition::Filter(0)));

    list.sort(
        SortSpec::new(SortField::AssetFilename, SortOrder::Ascending),
        Partition::Filter(1),
        &NoAux,
    )
    .unwrap();
    assert!(list.is_sorted(Partition::Filter(1)));
    assert!(!list.is_sorted(Partition::Filter(0)));
    assert!(!list.is_sorted(Partition::All));
}

#[test]
fn test_top_largest_after_aux_sort_marks_all_stale() {
    let table = AuxTable::new().with("t/a.png", "max", AuxValue::Int(1));
    let mut list = textured_list();
    list.sort(
        SortSpec::descending(SortField::Aux(AuxField::int("max"))),
        Partition::All,
        &table,
    )
    .unwrap();
    list.refresh_top_largest(1);

    assert_eq!(names(list.top_largest()), vec!["m/c.fbx"]);
    assert!(!list.is_sorted(Partition::All));
    assert!(list.sort_if_needed(Partition::All, &table).unwrap());
    assert_eq!(list.all()[0].name, "t/a.png");
}
