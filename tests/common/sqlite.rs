use sql_valet::prelude::*;

/// Scratch database file inside its own temp dir; keep the dir alive for the
/// duration of the test.
pub fn temp_db() -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir
        .path()
        .join("valet_test.db")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

/// Seed the scenario table: rows test0..test9 with `_str`, `_int`, and
/// `_float = _int + 0.5`.
pub async fn seed_test_table(valet: &SqlValet) {
    let ddl = QuerySpec::new_without_params(
        "CREATE TABLE test (
            id INTEGER PRIMARY KEY,
            _str TEXT NOT NULL,
            _int INTEGER NOT NULL,
            _float REAL NOT NULL
        )",
    )
    .and_commit();
    assert_eq!(valet.execute(ddl).await, QueryOutcome::Ack);

    for i in 0..10i64 {
        let insert = QuerySpec::new(
            "INSERT INTO test (_str, _int, _float) VALUES (?1, ?2, ?3)",
            vec![
                RowValues::Text(format!("test{i}")),
                RowValues::Int(i),
                RowValues::Float(i as f64 + 0.5),
            ],
        )
        .and_commit();
        assert_eq!(valet.execute(insert).await, QueryOutcome::Ack);
    }
}

/// Assert that `outcome` is a single-row result matching the seeded row for
/// `key` (e.g. "test3").
pub fn assert_singleton_row(outcome: &QueryOutcome, key: &str, int: i64) {
    let rows = outcome.rows().expect("expected rows");
    assert_eq!(rows.len(), 1, "expected exactly one row for {key}");
    let row = &rows.rows[0];
    assert_eq!(row.get("_str").and_then(|v| v.as_text()), Some(key));
    assert_eq!(row.get("_int"), Some(&RowValues::Int(int)));
    assert_eq!(
        row.get("_float").and_then(sql_valet::RowValues::as_float),
        Some(int as f64 + 0.5)
    );
}
