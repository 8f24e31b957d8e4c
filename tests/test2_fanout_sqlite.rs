#![cfg(feature = "sqlite")]

use sql_valet::prelude::*;
use tokio::runtime::Runtime;

mod common {
    pub mod sqlite;
}
use common::sqlite::{assert_singleton_row, seed_test_table, temp_db};

fn keyed_lookup(key: &str) -> QuerySpec {
    QuerySpec::new(
        "SELECT * FROM test WHERE _str = ?1",
        vec![RowValues::Text(key.into())],
    )
}

#[test]
fn fanout_preserves_input_order() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let (_dir, path) = temp_db();
        let valet = SqlValet::sqlite(&path);
        seed_test_table(&valet).await;

        let specs = vec![
            keyed_lookup("test1"),
            keyed_lookup("test2"),
            keyed_lookup("test3"),
        ];
        let outcomes = valet.execute_many(&specs).await?;
        assert_eq!(outcomes.len(), 3);
        assert_singleton_row(&outcomes[0], "test1", 1);
        assert_singleton_row(&outcomes[1], "test2", 2);
        assert_singleton_row(&outcomes[2], "test3", 3);
        Ok::<(), SqlValetError>(())
    })?;
    Ok(())
}

#[test]
fn fanout_isolates_a_failing_item() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let (_dir, path) = temp_db();
        let valet = SqlValet::sqlite(&path);
        seed_test_table(&valet).await;

        // Middle item targets a table that doesn't exist; its siblings must
        // come back intact and in place.
        let specs = vec![
            keyed_lookup("test1"),
            QuerySpec::new(
                "SELECT * FROM invalid_table WHERE _str = ?1",
                vec![RowValues::Text("test2".into())],
            ),
            keyed_lookup("test3"),
        ];
        let outcomes = valet.execute_many(&specs).await?;
        assert_eq!(outcomes.len(), 3);
        assert_singleton_row(&outcomes[0], "test1", 1);
        assert_eq!(outcomes[1], QueryOutcome::Failed);
        assert_singleton_row(&outcomes[2], "test3", 3);
        Ok::<(), SqlValetError>(())
    })?;
    Ok(())
}

#[test]
fn fanout_matching_no_rows_is_not_a_failure() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let (_dir, path) = temp_db();
        let valet = SqlValet::sqlite(&path);
        seed_test_table(&valet).await;

        let specs = vec![
            keyed_lookup("test1"),
            keyed_lookup("test11"), // seeded rows stop at test9
            keyed_lookup("test3"),
        ];
        let outcomes = valet.execute_many(&specs).await?;
        assert_singleton_row(&outcomes[0], "test1", 1);
        assert!(outcomes[1].rows().expect("rows").is_empty());
        assert_singleton_row(&outcomes[2], "test3", 3);
        Ok::<(), SqlValetError>(())
    })?;
    Ok(())
}

#[test]
fn fanout_rejects_empty_statement_text() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let (_dir, path) = temp_db();
        let valet = SqlValet::sqlite(&path);
        seed_test_table(&valet).await;

        let specs = vec![keyed_lookup("test1"), QuerySpec::new_without_params("  ")];
        let err = valet.execute_many(&specs).await.unwrap_err();
        assert!(matches!(err, SqlValetError::InvalidRequest(_)));
    });
    Ok(())
}

#[test]
fn fanout_accepts_a_json_batch_document() -> Result<(), Box<dyn std::error::Error>> {
    let rt = Runtime::new()?;
    rt.block_on(async {
        let (_dir, path) = temp_db();
        let valet = SqlValet::sqlite(&path);
        seed_test_table(&valet).await;

        // Omitted params/commit fields fill in with their defaults.
        let specs: Vec<QuerySpec> = serde_json::from_str(
            r#"[
                {"query": "SELECT * FROM test WHERE _str = ?1", "params": ["test4"]},
                {"query": "SELECT * FROM test WHERE _int = ?1", "params": [5]}
            ]"#,
        )?;
        let outcomes = valet.execute_many(&specs).await?;
        assert_singleton_row(&outcomes[0], "test4", 4);
        assert_singleton_row(&outcomes[1], "test5", 5);
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;
    Ok(())
}
