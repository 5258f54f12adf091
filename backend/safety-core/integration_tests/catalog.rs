use safety_core::catalog::{BuiltinCatalog, CatalogSource, TomlCatalog};
use safety_core::directory::SafeLocationDirectory;
use safety_core::error::CatalogError;

use models::LocationCategory;

use std::fs;

use tempfile::TempDir;

const TWO_ENTRY_CATALOG: &str = r#"
[[locations]]
id = "kicc"
name = "Kilimani Police Post"
category = "police"
address = "Argwings Kodhek Road"
phone = "+254-20-000000"
verified = true
hours = "24/7"
coordinate = { latitude = -1.2921, longitude = 36.7856 }

[[locations]]
id = "haven"
name = "Haven Drop-in Centre"
category = "safe_space"
address = "Ngong Road"
"#;

fn write_catalog(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("catalog.toml");
    fs::write(&path, contents).expect("write catalog");
    path
}

#[test]
fn given_builtin_catalog_when_loaded_then_five_verified_entries() {
    let locations = BuiltinCatalog.load().unwrap();

    assert_eq!(locations.len(), 5);
    assert!(locations.iter().all(|entry| entry.verified));
    assert!(locations.iter().all(|entry| entry.coordinate.is_some()));

    let count = |category| {
        locations
            .iter()
            .filter(|entry| entry.category == category)
            .count()
    };
    assert_eq!(count(LocationCategory::Police), 1);
    assert_eq!(count(LocationCategory::Hospital), 2);
    assert_eq!(count(LocationCategory::SafeSpace), 2);
}

/// **VALUE**: A deployment can ship its own catalog as TOML.
///
/// **BUG THIS CATCHES**: Would catch optional fields (phone, coordinate) being required
/// by the parser, which would reject hand-written entries for informal safe spaces.
#[test]
fn given_toml_catalog_when_loaded_then_entries_keep_file_order_and_defaults() {
    // GIVEN: A catalog file with one full and one minimal entry
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, TWO_ENTRY_CATALOG);

    // WHEN: Loading it into a directory
    let directory = SafeLocationDirectory::load(&TomlCatalog::new(&path)).unwrap();

    // THEN: Both entries, in file order, optional fields defaulted
    let all = directory.list_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, "kicc");
    assert_eq!(all[0].category, LocationCategory::Police);
    assert!(all[0].coordinate.is_some());
    assert_eq!(all[1].id, "haven");
    assert_eq!(all[1].phone, None);
    assert!(!all[1].verified);
    assert_eq!(all[1].coordinate, None);
}

#[test]
fn given_missing_file_when_loading_then_read_error() {
    let dir = TempDir::new().unwrap();
    let catalog = TomlCatalog::new(dir.path().join("absent.toml"));

    assert!(matches!(catalog.load(), Err(CatalogError::Read { .. })));
}

#[test]
fn given_malformed_toml_when_loading_then_parse_error_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, "[[locations]\nid = ");

    let error = TomlCatalog::new(&path).load().unwrap_err();

    assert!(matches!(error, CatalogError::Parse { .. }));
    assert!(error.to_string().contains("catalog.toml"));
}

#[test]
fn given_out_of_range_coordinate_when_loading_then_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(
        &dir,
        r#"
[[locations]]
id = "x"
name = "Nowhere"
category = "police"
address = "Somewhere"
coordinate = { latitude = 123.0, longitude = 0.0 }
"#,
    );

    assert!(matches!(
        TomlCatalog::new(&path).load(),
        Err(CatalogError::Parse { .. })
    ));
}

#[test]
fn given_blank_name_when_loading_then_validation_error() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(
        &dir,
        r#"
[[locations]]
id = "x"
name = "   "
category = "hospital"
address = "Somewhere"
"#,
    );

    assert!(matches!(
        TomlCatalog::new(&path).load(),
        Err(CatalogError::Validation { .. })
    ));
}

#[test]
fn given_duplicate_ids_in_file_when_building_directory_then_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(
        &dir,
        r#"
[[locations]]
id = "dup"
name = "One"
category = "police"
address = "A"

[[locations]]
id = "dup"
name = "Two"
category = "hospital"
address = "B"
"#,
    );

    assert!(matches!(
        SafeLocationDirectory::load(&TomlCatalog::new(&path)),
        Err(CatalogError::DuplicateId { .. })
    ));
}
