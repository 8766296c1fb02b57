use crate::utils::{batch_of, employee, write_parquet};
use engagement_reader::io::read_employee_parquet_async;
use engagement_reader::{
    DepartmentClassifier, DepartmentResult, ReaderConfig, Result, read_employees,
    read_employees_async,
};

/// Parquet files with wider integer types are conformed to the employee schema
#[tokio::test]
async fn test_async_parquet_with_wide_types() -> Result<()> {
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use arrow::record_batch::RecordBatch;

    let dir = tempfile::tempdir().expect("temp dir");
    let schema = Arc::new(Schema::new(vec![
        Field::new("EmployeeID", DataType::Int64, false),
        Field::new("Department", DataType::Utf8, true),
        Field::new("SatisfactionRating", DataType::Int64, true),
        Field::new("EngagementLevel", DataType::Utf8, true),
        Field::new("Notes", DataType::Utf8, true),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from(vec![1, 2, 3])),
            Arc::new(StringArray::from(vec!["Eng", "Eng", "Ops"])),
            Arc::new(Int64Array::from(vec![Some(5), Some(4), None])),
            Arc::new(StringArray::from(vec!["High", "Low", "High"])),
            Arc::new(StringArray::from(vec!["a", "b", "c"])),
        ],
    )?;
    let path = write_parquet(&dir.path().join("wide.parquet"), &[batch]);

    let batches = read_employee_parquet_async(&path, &ReaderConfig::default()).await?;
    assert_eq!(batches[0].num_columns(), 7);
    assert!(batches[0].column_by_name("Notes").is_none());

    let results = DepartmentClassifier::default().classify(&batches)?;
    assert_eq!(results, vec![DepartmentResult::new("Eng", 50.0)]);
    Ok(())
}

#[tokio::test]
async fn test_async_and_sync_loading_agree() -> Result<()> {
    let dir = tempfile::tempdir().expect("temp dir");
    for (index, department) in ["Eng", "Ops", "Sales"].iter().enumerate() {
        let id = i32::try_from(index).expect("small index") * 10;
        write_parquet(
            &dir.path().join(format!("{department}.parquet")),
            &[batch_of(&[
                employee(id + 1, department, 5, "High"),
                employee(id + 2, department, 4, "Medium"),
                employee(id + 3, department, 1, "Low"),
            ])?],
        );
    }

    let config = ReaderConfig::default().with_parallelism(2);
    let classifier = DepartmentClassifier::default();

    let async_results = classifier.classify(&read_employees_async(dir.path(), &config).await?)?;
    let sync_results = classifier.classify(&read_employees(dir.path(), &config)?)?;

    assert_eq!(async_results.len(), 3);
    assert!(async_results.iter().all(|r| r.high_satisfaction_percentage == 66.67));
    assert_eq!(async_results, sync_results);
    Ok(())
}

#[tokio::test]
async fn test_async_empty_directory() -> Result<()> {
    let dir = tempfile::tempdir().expect("temp dir");
    let batches = read_employees_async(dir.path(), &ReaderConfig::default()).await?;
    assert!(batches.is_empty());
    Ok(())
}
