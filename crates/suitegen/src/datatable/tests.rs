//! Unit tests for data table reshaping.

use super::*;
use rstest::rstest;

fn people() -> DataTable {
    DataTable::new([["name", "age"], ["Alice", "30"], ["Bob", "25"]])
}

#[test]
fn raw_preserves_rows_in_order() {
    let table = people();
    assert_eq!(table.len(), 3);
    assert_eq!(
        table.raw(),
        [
            vec!["name".to_string(), "age".to_string()],
            vec!["Alice".to_string(), "30".to_string()],
            vec!["Bob".to_string(), "25".to_string()],
        ]
    );
}

#[test]
fn hashes_key_body_rows_by_header() {
    let records = people().hashes();
    let names: Vec<_> = records
        .iter()
        .filter_map(|record| record.get("name").map(String::as_str))
        .collect();
    assert_eq!(names, ["Alice", "Bob"]);
    assert_eq!(
        records.last().and_then(|r| r.get("age")).map(String::as_str),
        Some("25")
    );
}

#[test]
fn hashes_fill_missing_cells_with_empty_text() {
    let table = DataTable::new(vec![vec!["a", "b", "c"], vec!["1"]]);
    let records = table.hashes();
    let Some(record) = records.first() else {
        panic!("expected one record");
    };
    assert_eq!(record.get("a").map(String::as_str), Some("1"));
    assert_eq!(record.get("b").map(String::as_str), Some(""));
    assert_eq!(record.get("c").map(String::as_str), Some(""));
}

#[rstest]
#[case(DataTable::default())]
#[case(DataTable::new([["only", "header"]]))]
fn hashes_of_headerless_bodies_are_empty(#[case] table: DataTable) {
    assert!(table.hashes().is_empty());
}

#[test]
fn rows_hash_maps_two_column_rows() {
    let table = DataTable::new([["host", "localhost"], ["port", "8080"], ["port", "9090"]]);
    let map = table
        .rows_hash()
        .unwrap_or_else(|err| panic!("rows_hash should succeed: {err}"));
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("port").map(String::as_str), Some("9090"));
}

#[test]
fn reshapings_use_the_runtime_map_type() {
    let pairs: hashbrown::HashMap<String, String> = DataTable::new([["k", "v"]])
        .rows_hash()
        .unwrap_or_else(|err| panic!("rows_hash should succeed: {err}"));
    let records: Vec<hashbrown::HashMap<String, String>> = people().hashes();
    assert_eq!(pairs.get("k").map(String::as_str), Some("v"));
    assert_eq!(records.len(), 2);
}

#[test]
fn rows_hash_rejects_other_widths() {
    let table = DataTable::new(vec![vec!["a", "b"], vec!["c", "d", "e"]]);
    let Err(err) = table.rows_hash() else {
        panic!("expected an arity error");
    };
    assert_eq!(
        err,
        DataTableError::RowsHashArity {
            row_number: 2,
            actual: 3
        }
    );
    assert!(
        err.to_string()
            .starts_with("rowsHash requires exactly 2 columns per row, but got 3")
    );
}
