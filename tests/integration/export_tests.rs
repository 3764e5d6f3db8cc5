//! Integration tests for configuration loading and CSV export
//!
//! These go through the public API only: load a config file from disk, build
//! records the way the scraper does, and read the exported CSV back.

use mapscout::config::{load_config_with_hash, FieldKind, ReadMode};
use mapscout::output::{save_csv, write_csv};
use mapscout::{Coordinates, Record};
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_custom_field_table_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(
        br#"
[directory]
base-url = "https://maps.example.test"

[delays]
after-click-ms = 1000

[[field]]
name = "phone_number"
xpath = "//span[@class='phone']"
read = "text"

[[field]]
name = "reviews_average"
xpath = "//div[@class='stars']"
read = "attribute"
attribute = "title"
"#,
    )
    .unwrap();
    file.flush().unwrap();

    let (config, hash) = load_config_with_hash(file.path()).unwrap();

    assert_eq!(hash.len(), 64);
    assert_eq!(config.directory.base_url, "https://maps.example.test");
    assert_eq!(config.delays.after_click_ms, 1000);
    // untouched sections keep their defaults
    assert_eq!(config.delays.page_load_ms, 5000);
    assert_eq!(config.discovery.max_retries, 3);

    let fields: Vec<_> = config.fields.iter().collect();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, FieldKind::PhoneNumber);
    assert_eq!(fields[1].read, ReadMode::Attribute);
    assert_eq!(fields[1].attribute.as_deref(), Some("title"));
}

#[test]
fn test_exported_csv_reads_back_in_order() {
    let records = vec![
        Record::builder()
            .name("Alpha Pizza")
            .website("alphapizza.test")
            .reviews_count(1234)
            .reviews_average(4.5)
            .coordinates(Some(Coordinates {
                latitude: 40.7128,
                longitude: -74.006,
            }))
            .build(),
        Record::builder().build(),
        Record::builder()
            .name("Charlie \"The Crust\"")
            .address("3 Corner, Suite 4")
            .build(),
    ];

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pizza_google_maps_data.csv");
    save_csv(&records, &path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "name",
            "address",
            "website",
            "phone_number",
            "reviews_count",
            "reviews_average",
            "latitude",
            "longitude"
        ]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(&rows[0][0], "Alpha Pizza");
    assert_eq!(&rows[0][4], "1234");
    assert_eq!(&rows[0][6], "40.7128");
    assert!(rows[1].iter().all(|cell| cell.is_empty()));
    assert_eq!(&rows[2][0], "Charlie \"The Crust\"");
    assert_eq!(&rows[2][1], "3 Corner, Suite 4");
}

#[test]
fn test_write_csv_to_memory_matches_file() {
    let records = vec![Record::builder().phone_number("+1 212 555 0100").build()];

    let mut buffer = Vec::new();
    write_csv(&records, &mut buffer).unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");
    save_csv(&records, &path).unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), buffer);
}
