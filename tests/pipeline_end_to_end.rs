mod common;

use std::fs;

use review_features::{FEATURE_HEADER, SplitLabel, run};

use common::{read_rows, row_for, write_dataset};

const VOTE_RATE_COLUMNS: [&str; 12] = [
    "funnyProfileVotesPerReview",
    "usefulProfileVotesPerReview",
    "coolProfileVotesPerReview",
    "funnyProfileVotesPerReviewPerDay",
    "usefulProfileVotesPerReviewPerDay",
    "coolProfileVotesPerReviewPerDay",
    "funnyVotesPerReview",
    "usefulVotesPerReview",
    "coolVotesPerReview",
    "funnyVotesPerReviewPerDay",
    "usefulVotesPerReviewPerDay",
    "coolVotesPerReviewPerDay",
];

fn float(row: &std::collections::HashMap<String, String>, column: &str) -> f64 {
    row[column]
        .parse()
        .unwrap_or_else(|_| panic!("{column} is not numeric: {}", row[column]))
}

#[test]
fn writes_both_splits_with_fixed_header() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    let config = write_dataset(temp.path()).with_censor_probability(0.0);
    let summary = run(&config).expect("run failed");

    let training = summary.split(SplitLabel::Train).expect("training summary");
    let test = summary.split(SplitLabel::Test).expect("test summary");
    assert_eq!(training.rows, 5);
    assert_eq!(test.rows, 2);
    assert_eq!(training.censored_users, 0);
    assert!(summary.estimated_syllables);

    for path in [&config.training.output, &config.test.output] {
        let body = fs::read_to_string(path).expect("missing feature file");
        let header = body.lines().next().expect("empty feature file");
        assert_eq!(header, FEATURE_HEADER.join(","));
        for line in body.lines() {
            assert_eq!(line.split(',').count(), FEATURE_HEADER.len());
        }
    }
}

#[test]
fn rows_follow_source_order_and_profile_policy() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    let config = write_dataset(temp.path()).with_censor_probability(0.0);
    run(&config).expect("run failed");
    let rows = read_rows(&config.training.output);

    let users: Vec<&str> = rows.iter().map(|row| row["userId"].as_str()).collect();
    assert_eq!(users, vec!["u1", "u1", "u2", "u3", "u1"]);

    let first = &rows[0];
    assert!((float(first, "logUsefulVotes") - 5f64.ln()).abs() < 1e-12);
    assert_eq!(first["reviewSentences"], "3");
    assert_eq!(first["reviewAge"], "10");
    assert_eq!(first["userIsPublic"], "1");
    assert_eq!(first["userHasVotes"], "1");
    assert_eq!(first["numUserReviews"], "10");
    assert_eq!(first["numUserSampleReviews"], "2");
    assert_eq!(first["numUserSampleReviewsInCategory"], "1");
    assert_eq!(first["businessHasManyReviews"], "1");
    assert_eq!(first["earliestReview"], "30");
    assert_eq!(float(first, "usefulProfileVotesPerReview"), 2.0);
    assert!((float(first, "usefulProfileVotesPerReviewPerDay") - 2.0 / 30.0).abs() < 1e-12);
    assert_eq!(float(first, "usefulVotesPerReview"), 2.0);
    assert_eq!(float(first, "reviewVsUserAvg"), 1.0);
    assert_eq!(first["category"], "1");

    assert_eq!(rows[1]["reviewContainsClosed"], "1");
    assert_eq!(rows[1]["businessClosed"], "1");
}

#[test]
fn private_user_without_history_gets_not_available_vote_rates() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    let config = write_dataset(temp.path()).with_censor_probability(0.0);
    run(&config).expect("run failed");
    let rows = read_rows(&config.test.output);
    let row = row_for(&rows, "u4", "b3");

    assert_eq!(row["logUsefulVotes"], "-1.0");
    assert_eq!(row["userIsPublic"], "0");
    assert_eq!(row["userHasVotes"], "0");
    assert_eq!(row["numUserReviews"], "NA");
    assert_eq!(row["numUserSampleReviews"], "0");
    assert_eq!(row["earliestReview"], "NA");
    for column in VOTE_RATE_COLUMNS {
        assert_eq!(row[column], "NA", "{column}");
    }
    assert_eq!(row["userCharactersPerReview"], "0.0");
    assert_eq!(row["numBusinessSampleReviews"], "1");
}

#[test]
fn test_split_aggregates_over_training_reviews_too() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    let config = write_dataset(temp.path()).with_censor_probability(0.0);
    run(&config).expect("run failed");
    let rows = read_rows(&config.test.output);
    let row = row_for(&rows, "u2", "b2");

    // u2's only other review is in the training split.
    assert_eq!(row["numUserSampleReviews"], "1");
    assert_eq!(float(row, "usefulProfileVotesPerReview"), 1.2);
    assert_eq!(row["usefulProfileVotesPerReviewPerDay"], "NA");
    assert_eq!(row["usefulVotesPerReview"], "NA");
    assert_eq!(row["numBusinessSampleReviews"], "1");
    assert!(float(row, "businessCharactersPerReview") > 0.0);
    // One comparison review: every shared term has idf ln(1/1) = 0.
    assert_eq!(row["similarityToOtherReviews"], "0.0");
}

#[test]
fn single_review_business_has_zero_similarity() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    let config = write_dataset(temp.path());
    run(&config).expect("run failed");
    let rows = read_rows(&config.training.output);
    let row = row_for(&rows, "u3", "b3");

    assert_eq!(row["numBusinessSampleReviews"], "0");
    assert_eq!(row["similarityToOtherReviews"], "0.0");
    assert_eq!(row["businessCharactersPerReview"], "0.0");
    assert_eq!(row["earliestBusinessReview"], "NA");
    // Profile merged from the test split's user file.
    assert_eq!(row["userIsPublic"], "1");
    assert_eq!(row["userHasVotes"], "0");
}

#[test]
fn pronunciation_dictionary_clears_the_estimate_flag() {
    let temp = tempfile::tempdir().expect("failed creating tempdir");
    let dictionary = temp.path().join("cmudict.txt");
    fs::write(&dictionary, "TACOS  T AA1 K OW0 Z\nGREAT  G R EY1 T\n")
        .expect("failed writing dictionary");
    let config = write_dataset(temp.path())
        .with_censor_probability(0.0)
        .with_pronunciations(&dictionary);
    let summary = run(&config).expect("run failed");
    assert!(!summary.estimated_syllables);
    assert_eq!(summary.split(SplitLabel::Train).expect("training summary").rows, 5);
}
