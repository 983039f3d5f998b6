#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use review_features::PipelineConfig;

pub const CATEGORIES: &str = "business_id,cluster\nb1,1\nb2,2\nb3,3\n";

pub const TRAINING_REVIEWS: &[&str] = &[
    r#"{"review_id":"t1","user_id":"u1","business_id":"b1","stars":5,"date":"2013-01-09","text":"Great food! Service was SLOW.  Would go again.","votes":{"funny":0,"useful":4,"cool":1}}"#,
    r#"{"review_id":"t2","user_id":"u1","business_id":"b2","stars":3,"date":"2012-12-20","text":"The pasta was decent. Parking is closed on weekends.","votes":{"funny":1,"useful":1,"cool":0}}"#,
    r#"{"review_id":"t3","user_id":"u2","business_id":"b1","stars":4,"date":"2012-11-01","text":"Amazing tacos and friendly staff!","votes":{"funny":0,"useful":2,"cool":2}}"#,
    r#"{"review_id":"t4","user_id":"u3","business_id":"b3","stars":2,"date":"2013-01-18","text":"Slow service.","votes":{"funny":0,"useful":0,"cool":0}}"#,
    r#"{"review_id":"t5","user_id":"u1","business_id":"b1","stars":4,"date":"2012-10-01","text":"Tacos were fresh. Salsa was spicy.","votes":{"funny":2,"useful":3,"cool":1}}"#,
];

pub const TEST_REVIEWS: &[&str] = &[
    r#"{"review_id":"s1","user_id":"u4","business_id":"b3","stars":3,"date":"2013-03-01","text":"Just okay."}"#,
    r#"{"review_id":"s2","user_id":"u2","business_id":"b2","stars":4,"date":"2013-02-10","text":"Pasta again. Still decent."}"#,
];

pub const TRAINING_USERS: &[&str] = &[
    r#"{"user_id":"u1","name":"A","average_stars":4.0,"review_count":10,"votes":{"funny":5,"useful":20,"cool":8}}"#,
    r#"{"user_id":"u2","name":"B","average_stars":3.5,"review_count":5,"votes":{"funny":1,"useful":6,"cool":2}}"#,
];

pub const TEST_USERS: &[&str] =
    &[r#"{"user_id":"u3","name":"C","average_stars":2.0,"review_count":1}"#];

pub const TRAINING_BUSINESSES: &[&str] = &[
    r#"{"business_id":"b1","name":"Taqueria","open":true,"stars":4.0,"review_count":20,"categories":["Mexican"]}"#,
    r#"{"business_id":"b2","name":"Trattoria","open":false,"stars":3.0,"review_count":4,"categories":["Italian"]}"#,
];

pub const TEST_BUSINESSES: &[&str] = &[
    r#"{"business_id":"b3","name":"Diner","open":true,"stars":2.5,"review_count":9,"categories":["Diners"]}"#,
];

pub fn write_lines(path: &Path, lines: &[&str]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed creating fixture dir");
    }
    let mut body = lines.join("\n");
    body.push('\n');
    fs::write(path, body).expect("failed writing fixture");
}

/// Write the fixture dataset under `root` in the default layout.
pub fn write_dataset(root: &Path) -> PipelineConfig {
    let config = PipelineConfig::in_data_dir(root);
    fs::write(&config.categories, CATEGORIES).expect("failed writing categories");
    write_lines(&config.training.reviews, TRAINING_REVIEWS);
    write_lines(&config.training.users, TRAINING_USERS);
    write_lines(&config.training.businesses, TRAINING_BUSINESSES);
    write_lines(&config.test.reviews, TEST_REVIEWS);
    write_lines(&config.test.users, TEST_USERS);
    write_lines(&config.test.businesses, TEST_BUSINESSES);
    config
}

/// Feature rows keyed by column name.
pub fn read_rows(path: &Path) -> Vec<HashMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).expect("failed opening features");
    let headers = reader.headers().expect("missing header").clone();
    reader
        .records()
        .map(|record| {
            let record = record.expect("bad feature row");
            headers
                .iter()
                .zip(record.iter())
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect()
        })
        .collect()
}

pub fn row_for<'a>(
    rows: &'a [HashMap<String, String>],
    user_id: &str,
    business_id: &str,
) -> &'a HashMap<String, String> {
    rows.iter()
        .find(|row| row["userId"] == user_id && row["businessId"] == business_id)
        .expect("row not found")
}
