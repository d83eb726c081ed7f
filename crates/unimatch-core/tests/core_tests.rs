use std::fs;
use std::io::Write;
use tempfile::TempDir;

use unimatch_core::catalog::CatalogLoader;
use unimatch_core::config::{ColumnNames, Config};
use unimatch_core::error::Error;

#[test]
fn load_path_reads_a_small_dataset() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("sayisal.csv");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(f, "bolum_adi,Universite,Sehir,Aciklama,2025_Taban_Sıralama").unwrap();
    writeln!(f, "Tıp,Hacettepe Üniversitesi,Ankara,Hekimlik eğitimi,\"1.250\"").unwrap();
    writeln!(f, "Matematik,Ege Üniversitesi,İzmir,Soyut cebir ve analiz,\"98.400\"").unwrap();
    writeln!(f, "Fizik,Ege Üniversitesi,İzmir,,\"120.000\"").unwrap();

    let (catalog, report) = CatalogLoader::default().load_path(&path).expect("load");

    assert_eq!(catalog.len(), 2, "row without description is dropped");
    assert_eq!(report.missing_text, 1);
    assert_eq!(catalog.records()[1].name, "Matematik");
    assert_eq!(catalog.records()[1].rank, 98_400);
}

#[test]
fn load_path_with_custom_headers() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("custom.csv");
    fs::write(&path, "dept,school,town,about,rank\nLaw,Bilkent,Ankara,Legal studies,15000\n").unwrap();

    let columns = ColumnNames {
        name: "dept".into(),
        university: "school".into(),
        city: "town".into(),
        description: "about".into(),
        rank: "rank".into(),
    };
    let (catalog, _) = CatalogLoader::new(columns).load_path(&path).expect("load");

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.records()[0].university, "Bilkent");
}

#[test]
fn missing_dataset_is_an_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = CatalogLoader::default().load_path(&tmp.path().join("nope.csv")).expect_err("missing file");
    assert!(matches!(err, Error::Io(_)));
    assert!(err.is_internal());
}

#[test]
fn taxonomy_file_replaces_builtin() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("taxonomy.toml"),
        r#"
negation_words = ["hate"]
fallback_label = "general"

[[categories]]
label = "technology"
keywords = ["software", "coding"]
expansion = ["software", "computer", "programming"]
exclusion = ["computer"]
rules = [{ pattern = "software\\S*\\s+(?:developer|engineer)", intent = "career" }]
"#,
    )
    .unwrap();

    let cfg = Config::from_toml_str("taxonomy_path = \"taxonomy.toml\"\n", tmp.path()).expect("config");
    let tax = cfg.taxonomy().expect("taxonomy");

    assert_eq!(tax.fallback_label, "general");
    assert_eq!(tax.categories.len(), 1);
    assert_eq!(tax.categories[0].rules.len(), 1);
}
