//! Integration tests for the CSV anonymization pipeline

use anon_csv::anonymization::{resolve_secret, Anonymizer, SecretOrigin};
use anon_csv::config::{secret_string, ColumnsConfig, InvalidRowPolicy, ProcessingConfig};
use anon_csv::core::pipeline::{default_output_path, AnonymizationPipeline};
use anon_csv::domain::AnonCsvError;
use std::path::Path;
use tempfile::TempDir;

const GRADEBOOK: &str = "\
Last Name,First Name,Username,Student ID,UIN,Quiz 1,Comment
Doe,Alice,alice,S001,654321,9,\"good, on time\"
Roe,Bob,bob,S002,123456,7,
";

fn pipeline(secret: anon_csv::anonymization::ProjectSecret) -> AnonymizationPipeline {
    AnonymizationPipeline::new(
        Anonymizer::new(secret),
        ColumnsConfig::default(),
        ProcessingConfig {
            parallelism: 4,
            on_invalid_row: InvalidRowPolicy::Abort,
        },
    )
}

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let input = dir.join("gradebook.csv");
    std::fs::write(&input, contents).unwrap();
    input
}

#[tokio::test]
async fn test_gradebook_with_username_alias() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), GRADEBOOK);
    let secret_file = dir.path().join("cs101.secret");
    std::fs::write(&secret_file, "topsecret\n").unwrap();

    let resolved = resolve_secret(None, Some(&secret_file), dir.path()).unwrap();
    assert_eq!(resolved.origin, SecretOrigin::File(secret_file.clone()));

    let output = default_output_path(&input);
    let summary = pipeline(resolved.secret).run(&input, &output).await.unwrap();

    assert_eq!(summary.identifier_column, "Username");
    assert_eq!(
        summary.removed_columns,
        ["Last Name", "First Name", "Username", "Student ID", "UIN"]
    );
    assert_eq!(summary.rows_processed, 2);

    let written = std::fs::read_to_string(dir.path().join("gradebook-anonymized.csv")).unwrap();
    assert_eq!(
        written,
        "auid,Quiz 1,Comment\nJZ-gfzhz-4ui5ey,9,\"good, on time\"\nNT-qtitn-opinbh,7,\n"
    );
    for secret_value in ["Doe", "Alice", "alice", "S001", "654321"] {
        assert!(!written.contains(secret_value));
    }
}

#[tokio::test]
async fn test_same_secret_gives_joinable_outputs() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("quiz.csv");
    let second = dir.path().join("exam.csv");
    std::fs::write(&first, "netid,quiz\nbob,3\nalice,4\n").unwrap();
    std::fs::write(&second, "netid,exam\nalice,88\n").unwrap();

    let generated = resolve_secret(None, None, dir.path()).unwrap();
    let secret_path = match &generated.origin {
        SecretOrigin::Generated(path) => path.clone(),
        other => panic!("unexpected origin: {other:?}"),
    };

    pipeline(generated.secret)
        .run(&first, &default_output_path(&first))
        .await
        .unwrap();

    // A later run reuses the persisted secret
    let reused = resolve_secret(None, Some(&secret_path), dir.path()).unwrap();
    pipeline(reused.secret)
        .run(&second, &default_output_path(&second))
        .await
        .unwrap();

    let quiz = std::fs::read_to_string(dir.path().join("quiz-anonymized.csv")).unwrap();
    let exam = std::fs::read_to_string(dir.path().join("exam-anonymized.csv")).unwrap();

    let alice_quiz = quiz.lines().nth(2).unwrap().split(',').next().unwrap();
    let alice_exam = exam.lines().nth(1).unwrap().split(',').next().unwrap();
    assert_eq!(alice_quiz, alice_exam);
}

#[tokio::test]
async fn test_literal_secret_conflicts_with_file() {
    let dir = TempDir::new().unwrap();
    let secret_file = dir.path().join("cs101.secret");
    std::fs::write(&secret_file, "topsecret").unwrap();

    let err = resolve_secret(
        Some(secret_string("topsecret".to_string())),
        Some(&secret_file),
        dir.path(),
    )
    .unwrap_err();
    assert!(err.is_configuration());
}

#[tokio::test]
async fn test_missing_identifier_column_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "email,score\na@example.edu,1\n");
    let output = default_output_path(&input);

    let secret = resolve_secret(Some(secret_string("topsecret".to_string())), None, dir.path())
        .unwrap()
        .secret;
    let err = pipeline(secret).run(&input, &output).await.unwrap_err();

    assert!(matches!(err, AnonCsvError::Schema(_)));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_header_only_input() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path(), "netid,score\n");
    let output = default_output_path(&input);

    let secret = resolve_secret(Some(secret_string("topsecret".to_string())), None, dir.path())
        .unwrap()
        .secret;
    let summary = pipeline(secret).run(&input, &output).await.unwrap();

    assert_eq!(summary.rows_processed, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "auid,score\n");
}
