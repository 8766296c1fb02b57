use std::collections::HashSet;
use std::sync::Arc;

use arrow::array::{Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::utils::{batch_of, employee};
use engagement_reader::algorithm::classification::qualification_expr;
use engagement_reader::utils::test::{SyntheticEmployees, split_batch};
use engagement_reader::{
    ClassifierConfig, DepartmentClassifier, DepartmentResult, EmployeeRecord, Result,
    identify_departments_high_satisfaction,
};

fn classifier_with_threshold(threshold: f64) -> DepartmentClassifier {
    DepartmentClassifier::new(ClassifierConfig::default().with_threshold(threshold))
        .expect("valid threshold")
}

/// Half of Eng qualifies: kept at 40, dropped at 50 because the comparison is strict
#[test]
fn test_half_qualifying_department() -> Result<()> {
    let batch = batch_of(&[employee(1, "Eng", 5, "High"), employee(2, "Eng", 3, "Low")])?;

    let at_forty = identify_departments_high_satisfaction(
        std::slice::from_ref(&batch),
        &ClassifierConfig::default(),
    )?;
    assert_eq!(at_forty, vec![DepartmentResult::new("Eng", 50.0)]);

    let at_fifty = classifier_with_threshold(50.0).classify(&[batch])?;
    assert!(at_fifty.is_empty());
    Ok(())
}

/// Plain arrays carry no validity buffer at all
#[test]
fn test_batch_without_validity_buffers() -> Result<()> {
    let schema = Schema::new(vec![
        Field::new("EmployeeID", DataType::Int32, false),
        Field::new("Department", DataType::Utf8, false),
        Field::new("SatisfactionRating", DataType::Int32, false),
        Field::new("EngagementLevel", DataType::Utf8, false),
    ]);
    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(Int32Array::from(vec![1, 2, 3, 4])),
            Arc::new(StringArray::from(vec!["Eng", "Eng", "Ops", "Ops"])),
            Arc::new(Int32Array::from(vec![5, 3, 4, 2])),
            Arc::new(StringArray::from(vec!["High", "Low", "Medium", "High"])),
        ],
    )?;

    let results = DepartmentClassifier::default().classify(&[batch])?;
    assert_eq!(
        results,
        vec![
            DepartmentResult::new("Eng", 50.0),
            DepartmentResult::new("Ops", 50.0),
        ]
    );
    Ok(())
}

#[test]
fn test_no_qualifying_employees() -> Result<()> {
    let batch = batch_of(&[
        employee(1, "Ops", 3, "High"),
        employee(2, "Ops", 1, "Medium"),
        employee(3, "Ops", 2, "Low"),
    ])?;

    let stats = DepartmentClassifier::default().department_stats(std::slice::from_ref(&batch))?;
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].high_satisfaction_count, 0);
    assert_eq!(stats[0].high_satisfaction_percentage, Some(0.0));

    assert!(classifier_with_threshold(0.01).classify(&[batch])?.is_empty());
    Ok(())
}

#[test]
fn test_all_qualifying_employees() -> Result<()> {
    let batch = batch_of(&[
        employee(1, "Sales", 4, "High"),
        employee(2, "Sales", 5, "Medium"),
        employee(3, "Sales", 4, "Medium"),
    ])?;

    let results = DepartmentClassifier::default().classify(&[batch])?;
    assert_eq!(results, vec![DepartmentResult::new("Sales", 100.0)]);
    Ok(())
}

#[test]
fn test_empty_input() -> Result<()> {
    let classifier = DepartmentClassifier::default();
    assert!(classifier.classify(&[])?.is_empty());
    assert!(classifier.classify_records(&[])?.is_empty());

    let empty = batch_of(&[employee(1, "Eng", 5, "High")])?.slice(0, 0);
    assert!(classifier.classify(&[empty])?.is_empty());
    Ok(())
}

#[test]
fn test_low_engagement_never_qualifies() -> Result<()> {
    let batch = batch_of(&[employee(1, "Eng", 5, "Low"), employee(2, "Eng", 5, "High")])?;

    let stats = DepartmentClassifier::default().department_stats(&[batch])?;
    assert_eq!(stats[0].total_employees, 2);
    assert_eq!(stats[0].high_satisfaction_count, 1);
    Ok(())
}

#[test]
fn test_high_only_levels() -> Result<()> {
    let records = [
        employee(1, "Eng", 5, "High"),
        employee(2, "Eng", 5, "Medium"),
        employee(3, "Eng", 1, "High"),
    ];

    let default = DepartmentClassifier::default().classify_records(&records)?;
    assert_eq!(default, vec![DepartmentResult::new("Eng", 66.67)]);

    let high_only = DepartmentClassifier::new(
        ClassifierConfig::default().with_qualifying_levels(["High"]),
    )?
    .classify_records(&records)?;
    assert!(high_only.is_empty());

    let expr = qualification_expr(&ClassifierConfig::default().with_qualifying_levels(["High"]));
    assert_eq!(expr.required_columns().len(), 2);
    Ok(())
}

#[test]
fn test_engagement_level_is_case_sensitive() -> Result<()> {
    let results = DepartmentClassifier::default()
        .classify_records(&[employee(1, "Eng", 5, "high"), employee(2, "Eng", 5, "HIGH")])?;
    assert!(results.is_empty());
    Ok(())
}

#[test]
fn test_results_sorted_by_department() -> Result<()> {
    let records = [
        employee(1, "Sales", 5, "High"),
        employee(2, "Eng", 5, "High"),
        employee(3, "Marketing", 5, "Medium"),
        employee(4, "Eng", 1, "Low"),
    ];

    let results = DepartmentClassifier::default().classify_records(&records)?;
    let names: Vec<&str> = results.iter().map(|r| r.department.as_str()).collect();
    assert_eq!(names, vec!["Eng", "Marketing", "Sales"]);
    assert_eq!(results[0].high_satisfaction_percentage, 50.0);
    Ok(())
}

#[test]
fn test_null_fields_are_not_qualifying() -> Result<()> {
    let records = [
        employee(1, "Eng", 5, "High"),
        EmployeeRecord {
            satisfaction_rating: None,
            ..employee(2, "Eng", 5, "High")
        },
        EmployeeRecord {
            engagement_level: None,
            ..employee(3, "Eng", 5, "High")
        },
        EmployeeRecord {
            department: None,
            ..employee(4, "Eng", 5, "High")
        },
    ];

    let (results, summary) =
        classifier_with_threshold(30.0).classify_with_summary(&[batch_of(&records)?])?;
    assert_eq!(results, vec![DepartmentResult::new("Eng", 33.33)]);
    assert_eq!(summary.records, 4);
    assert_eq!(summary.null_departments, 1);
    assert_eq!(summary.departments, 1);
    assert_eq!(summary.retained, 1);
    Ok(())
}

#[test]
fn test_output_properties_on_synthetic_data() -> Result<()> {
    let generator = SyntheticEmployees::new(42).with_null_rate(0.05);
    let records = generator.records(2_000);
    let batch = batch_of(&records)?;

    let input_departments: HashSet<String> =
        records.iter().filter_map(|r| r.department.clone()).collect();

    let classifier = classifier_with_threshold(0.0);
    let results = classifier.classify(std::slice::from_ref(&batch))?;

    for result in &results {
        assert!(input_departments.contains(&result.department));
        assert!((0.0..=100.0).contains(&result.high_satisfaction_percentage));
    }

    // Idempotence
    assert_eq!(results, classifier.classify(std::slice::from_ref(&batch))?);
    Ok(())
}

#[test]
fn test_raising_threshold_never_adds_departments() -> Result<()> {
    let batch = SyntheticEmployees::new(11).batch(1_000)?;
    let batches = [batch];

    let mut previous: Option<Vec<DepartmentResult>> = None;
    for threshold in [0.0, 20.0, 30.0, 35.0, 40.0, 45.0, 60.0, 100.0] {
        let results = classifier_with_threshold(threshold).classify(&batches)?;
        if let Some(previous) = &previous {
            assert!(results.len() <= previous.len());
            assert!(results.iter().all(|result| previous.contains(result)));
        }
        previous = Some(results);
    }
    Ok(())
}

#[test]
fn test_batch_split_does_not_change_results() -> Result<()> {
    let batch = SyntheticEmployees::new(5).with_null_rate(0.1).batch(997)?;
    let classifier = classifier_with_threshold(10.0);

    let whole = classifier.classify(std::slice::from_ref(&batch))?;
    assert!(!whole.is_empty());

    for rows in [1, 7, 64, 500, 997] {
        let parts = split_batch(&batch, rows);
        assert_eq!(classifier.classify(&parts)?, whole, "split into {rows}-row batches");
    }
    Ok(())
}
