use std::fs;

use crate::utils::{batch_of, employee, write_parquet, write_text};
use engagement_reader::io::{read_results_csv, write_employees_csv, write_results_csv};
use engagement_reader::utils::test::SyntheticEmployees;
use engagement_reader::{
    ClassifierConfig, DepartmentClassifier, DepartmentResult, EngagementError, OutputConfig,
    OutputFormat, ReaderConfig, Result, read_employees, write_results,
};

const HEADER: &str = concat!(
    "EmployeeID,Department,JobTitle,SatisfactionRating,",
    "EngagementLevel,ReportsConcerns,ProvidedSuggestions\n"
);

#[test]
fn test_csv_to_csv_pipeline() -> Result<()> {
    let dir = tempfile::tempdir().expect("temp dir");
    let input = write_text(
        &dir.path().join("employees.csv"),
        &format!(
            "{HEADER}\
             1,Eng,Engineer,5,High,false,true\n\
             2,Eng,Engineer,3,Low,false,false\n\
             3,Sales,Rep,4,Medium,true,false\n\
             4,Sales,Rep,5,High,false,true\n\
             5,Ops,Lead,2,Medium,false,false\n\
             6,,Temp,5,High,false,false\n"
        ),
    );

    let batches = read_employees(&input, &ReaderConfig::default())?;
    let results = DepartmentClassifier::default().classify(&batches)?;
    assert_eq!(
        results,
        vec![
            DepartmentResult::new("Eng", 50.0),
            DepartmentResult::new("Sales", 100.0),
        ]
    );

    let output = dir.path().join("outputs").join("task1").join("result.csv");
    write_results(&results, &OutputConfig::new(&output))?;

    let contents = fs::read_to_string(&output).expect("output written");
    assert!(contents.starts_with("Department,HighSatisfactionPercentage\n"));
    assert_eq!(read_results_csv(&output)?, results);
    Ok(())
}

#[test]
fn test_results_round_trip_through_csv() -> Result<()> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("result.csv");
    let results = vec![
        DepartmentResult::new("Engineering", 66.67),
        DepartmentResult::new("Human Resources", 41.5),
        DepartmentResult::new("Sales", 100.0),
    ];

    write_results_csv(&results, &path)?;
    assert_eq!(read_results_csv(&path)?, results);
    Ok(())
}

#[test]
fn test_employee_csv_round_trip_preserves_classification() -> Result<()> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("synthetic.csv");
    let batch = SyntheticEmployees::new(9).with_null_rate(0.05).batch(300)?;

    write_employees_csv(std::slice::from_ref(&batch), &path)?;
    let reloaded = read_employees(&path, &ReaderConfig::default().with_batch_size(64))?;

    let classifier = DepartmentClassifier::new(ClassifierConfig::default().with_threshold(0.0))?;
    assert_eq!(classifier.classify(&reloaded)?, classifier.classify(&[batch])?);
    Ok(())
}

#[test]
fn test_mixed_directory_of_csv_and_parquet() -> Result<()> {
    let dir = tempfile::tempdir().expect("temp dir");
    write_text(
        &dir.path().join("part-0.csv"),
        &format!("{HEADER}1,Eng,Engineer,5,High,false,true\n"),
    );
    write_parquet(
        &dir.path().join("part-1.parquet"),
        &[batch_of(&[employee(2, "Eng", 1, "Low"), employee(3, "Ops", 4, "High")])?],
    );

    let batches = read_employees(dir.path(), &ReaderConfig::default())?;
    assert_eq!(batches.iter().map(|b| b.num_rows()).sum::<usize>(), 3);

    let results = DepartmentClassifier::default().classify(&batches)?;
    assert_eq!(
        results,
        vec![
            DepartmentResult::new("Eng", 50.0),
            DepartmentResult::new("Ops", 100.0),
        ]
    );
    Ok(())
}

#[test]
fn test_json_output_format() -> Result<()> {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("result.json");
    let results = vec![DepartmentResult::new("Eng", 50.0)];

    write_results(&results, &OutputConfig::new(&path).with_format(OutputFormat::Json))?;
    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).expect("json written"))?;
    assert_eq!(parsed[0]["Department"], "Eng");
    assert_eq!(parsed[0]["HighSatisfactionPercentage"], 50.0);
    Ok(())
}

#[test]
fn test_missing_input_reports_path() {
    let err = read_employees(
        std::path::Path::new("/no/such/dir/employees.csv"),
        &ReaderConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, EngagementError::IoAt { .. }));
    assert!(err.to_string().contains("employees.csv"));
}
