//! Per-field comparators and the sort pass

use std::cmp::Ordering;

use ahash::AHashMap;
use tracing::debug;

use super::spec::{SortField, SortOrder, SortSpec};
use crate::records::{file_name_only, AuxKind, AuxSource, Record};

/// Scratch sort key for one record, resolved from the aux source
#[derive(Debug, Clone)]
enum AuxKey {
    Int(i64),
    Float(f64),
    Text(Option<String>),
}

type ScratchKeys = AHashMap<String, AuxKey>;

/// Case-insensitive ordinal comparison (upper-case folding per char)
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_uppercase)
        .cmp(b.chars().flat_map(char::to_uppercase))
}

/// Sort `records` in place by `spec`.
///
/// Auxiliary fields are looked up once per record through `aux`; other
/// fields never touch it.
pub fn sort_records<R, A>(records: &mut [R], spec: &SortSpec, aux: &A)
where
    R: Record,
    A: AuxSource + ?Sized,
{
    let keys = match &spec.field {
        SortField::Aux(field) => resolve_keys(records, &field.id, &field.kind, aux),
        _ => ScratchKeys::new(),
    };

    debug!(
        field = %spec.field,
        order = ?spec.order,
        records = records.len(),
        "sorting records"
    );

    records.sort_by(|a, b| {
        let ordering = compare_descending(a, b, &spec.field, &keys);
        match spec.order {
            SortOrder::Descending => ordering,
            SortOrder::Ascending => ordering.reverse(),
        }
    });
}

fn resolve_keys<R, A>(records: &[R], id: &str, kind: &AuxKind, aux: &A) -> ScratchKeys
where
    R: Record,
    A: AuxSource + ?Sized,
{
    let mut keys = ScratchKeys::with_capacity(records.len());
    for record in records {
        if keys.contains_key(record.name()) {
            continue;
        }
        let value = aux.lookup(record.name(), id);
        let key = match kind {
            AuxKind::Int => AuxKey::Int(value.and_then(|v| v.as_int()).unwrap_or(0)),
            AuxKind::Float => AuxKey::Float(value.and_then(|v| v.as_float()).unwrap_or(0.0)),
            AuxKind::Text | AuxKind::PinnedText { .. } => {
                AuxKey::Text(value.and_then(|v| v.as_text().map(str::to_owned)))
            }
        };
        keys.insert(record.name().to_owned(), key);
    }
    keys
}

/// Descending-orientation comparison, made total by the full-name tie-break
fn compare_descending<R: Record>(a: &R, b: &R, field: &SortField, keys: &ScratchKeys) -> Ordering {
    let ordering = match field {
        SortField::RawSize => b
            .usable_size()
            .cmp(&a.usable_size())
            .then_with(|| by_file_name(a, b)),
        SortField::ImportedSize => b
            .imported_size()
            .cmp(&a.imported_size())
            .then_with(|| by_file_name(a, b)),
        SortField::ImportedSizeOrRawSize => b
            .imported_size_or_raw_size()
            .cmp(&a.imported_size_or_raw_size())
            .then_with(|| by_file_name(a, b)),
        SortField::SizeBeforeBuild => b
            .size_before_build()
            .cmp(&a.size_before_build())
            .then_with(|| by_file_name(a, b)),
        SortField::PercentSize => b
            .percentage()
            .total_cmp(&a.percentage())
            .then_with(|| compare_ignore_case(a.name(), b.name())),
        SortField::AssetFullPath => compare_ignore_case(a.name(), b.name()),
        SortField::AssetFilename => by_file_name(a, b),
        SortField::Aux(aux_field) => {
            let primary = match (keys.get(a.name()), keys.get(b.name())) {
                (Some(AuxKey::Int(x)), Some(AuxKey::Int(y))) => y.cmp(x),
                // smaller values first, unlike every other numeric field
                (Some(AuxKey::Float(x)), Some(AuxKey::Float(y))) => x.total_cmp(y),
                (Some(AuxKey::Text(x)), Some(AuxKey::Text(y))) => match &aux_field.kind {
                    AuxKind::PinnedText { sentinel } => {
                        compare_pinned(x.as_deref(), y.as_deref(), sentinel)
                    }
                    _ => compare_optional_text(x.as_deref(), y.as_deref()),
                },
                _ => Ordering::Equal,
            };
            primary
                .then_with(|| b.usable_size().cmp(&a.usable_size()))
                .then_with(|| by_file_name(a, b))
        }
    };
    ordering.then_with(|| a.name().cmp(b.name()))
}

fn by_file_name<R: Record>(a: &R, b: &R) -> Ordering {
    compare_ignore_case(file_name_only(a.name()), file_name_only(b.name()))
}

/// Absent text first, then case-insensitive A to Z
fn compare_optional_text(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_ignore_case(a, b),
    }
}

fn compare_pinned(a: Option<&str>, b: Option<&str>, sentinel: &str) -> Ordering {
    let a_pinned = a == Some(sentinel);
    let b_pinned = b == Some(sentinel);
    match (a_pinned, b_pinned) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => compare_optional_text(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{AssetEntry, AuxField, AuxTable, AuxValue, NoAux};

    fn names(records: &[AssetEntry]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_compare_ignore_case() {
        assert_eq!(compare_ignore_case("apple", "BANANA"), Ordering::Less);
        assert_eq!(compare_ignore_case("Zebra", "zebra"), Ordering::Equal);
        assert_eq!(compare_ignore_case("straße", "STRASSE"), Ordering::Equal);
    }

    #[test]
    fn test_equal_sizes_break_ties_by_file_name() {
        let mut records = vec![
            AssetEntry::new("Assets/b/Zebra.png", 100),
            AssetEntry::new("Assets/a/apple.png", 100),
            AssetEntry::new("Assets/c/big.png", 500),
        ];
        sort_records(&mut records, &SortSpec::descending(SortField::RawSize), &NoAux);
        assert_eq!(
            names(&records),
            vec!["Assets/c/big.png", "Assets/a/apple.png", "Assets/b/Zebra.png"]
        );
    }

    #[test]
    fn test_missing_imported_size_sorts_last_descending() {
        let mut records = vec![
            AssetEntry::new("a", 10),
            AssetEntry::new("b", 10).with_imported_size(0),
            AssetEntry::new("c", 10).with_imported_size(5),
        ];
        sort_records(&mut records, &SortSpec::descending(SortField::ImportedSize), &NoAux);
        assert_eq!(names(&records), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_percent_ties_use_full_path() {
        let mut records = vec![AssetEntry::new("b/x.png", 1), AssetEntry::new("a/y.png", 1)];
        for r in &mut records {
            r.percentage = 12.5;
        }
        sort_records(&mut records, &SortSpec::descending(SortField::PercentSize), &NoAux);
        assert_eq!(names(&records), vec!["a/y.png", "b/x.png"]);
    }

    #[test]
    fn test_aux_int_falls_back_to_size_then_name() {
        let table = AuxTable::new()
            .with("a.png", "max", AuxValue::Int(1024))
            .with("b.png", "max", AuxValue::Int(2048))
            .with("c.png", "max", AuxValue::Int(1024));
        let mut records = vec![
            AssetEntry::new("a.png", 10),
            AssetEntry::new("b.png", 1),
            AssetEntry::new("c.png", 20),
            AssetEntry::new("d.png", 99),
        ];
        let spec = SortSpec::descending(SortField::Aux(AuxField::int("max")));
        sort_records(&mut records, &spec, &table);
        assert_eq!(names(&records), vec!["b.png", "c.png", "a.png", "d.png"]);
    }

    #[test]
    fn test_aux_text_absent_first() {
        let table = AuxTable::new()
            .with("a.png", "fmt", AuxValue::Text("RGBA32".into()))
            .with("b.png", "fmt", AuxValue::Text("dxt1".into()));
        let mut records = vec![
            AssetEntry::new("a.png", 1),
            AssetEntry::new("b.png", 1),
            AssetEntry::new("c.png", 1),
        ];
        let spec = SortSpec::descending(SortField::Aux(AuxField::text("fmt")));
        sort_records(&mut records, &spec, &table);
        assert_eq!(names(&records), vec!["c.png", "b.png", "a.png"]);
    }
}
