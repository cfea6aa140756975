//! Интеграционные тесты стадии трансформации

use std::fs;
use std::path::Path;

use diamond_price::{
    load_preprocessor, CatalogEntry, CategoryCatalog, ColumnGroups, DataTransformation,
    PreprocessingError, Stage, Table, TransformationConfig, UnknownCategory,
};

const HEADER: &str = "id,carat,cut,color,clarity,depth,table,x,y,z,price";

fn write_csv(path: &Path, rows: &[&str]) {
    let mut content = String::from(HEADER);
    for row in rows {
        content.push('\n');
        content.push_str(row);
    }
    content.push('\n');
    fs::write(path, content).unwrap();
}

fn read(dir: &Path, name: &str, rows: &[&str]) -> Table {
    let path = dir.join(name);
    write_csv(&path, rows);
    Table::read_csv(&path).unwrap()
}

fn config(dir: &Path) -> TransformationConfig {
    TransformationConfig::default().with_preprocessor_path(dir.join("artifacts/preprocessor.json"))
}

const TRAIN: [&str; 2] = [
    "0,0.5,Fair,D,I1,60,55,5,5,3,1000",
    "1,1.5,Ideal,J,IF,62,59,7,7,5,3000",
];

fn assert_row(actual: ndarray::ArrayView1<f64>, expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!((a - e).abs() < 1e-9, "column {}: {} != {}", i, a, e);
    }
}

#[test]
fn two_row_dataset_has_expected_layout_and_values() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(dir.path(), "train.csv", &TRAIN);
    let test = read(
        dir.path(),
        "test.csv",
        &[
            "2,2.0,Good,J,VS2,64,55,6.5,4,4,2500",
            "3,,Ideal,J,IF,,59,7,7,5,3000",
        ],
    );

    let output = DataTransformation::new(config(dir.path()))
        .run(&train, &test)
        .unwrap();

    assert_eq!(output.train.dim(), (2, 10));
    assert_eq!(output.test.dim(), (2, 10));
    assert_eq!(
        output.preprocessor.feature_names(),
        vec!["carat", "depth", "table", "x", "y", "z", "cut", "color", "clarity"]
    );

    // [carat, depth, table, x, y, z, cut, color, clarity, price]
    assert_row(
        output.train.row(0),
        &[-1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, -1.0, 1000.0],
    );
    assert_row(
        output.train.row(1),
        &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 3000.0],
    );
    assert_row(
        output.test.row(0),
        &[2.0, 3.0, -1.0, 0.5, -2.0, 0.0, -0.5, 1.0, -0.5 / 3.5, 2500.0],
    );
    // Пропущенные carat и depth заменены медианами train (1.0 и 61)
    assert_row(
        output.test.row(1),
        &[0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 3000.0],
    );
}

#[test]
fn missing_depth_is_imputed_with_training_median() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(
        dir.path(),
        "train.csv",
        &[
            "0,0.3,Ideal,E,SI1,61.0,55,4.3,4.3,2.6,500",
            "1,0.9,Good,G,VS1,61.8,57,6.1,6.1,3.8,3000",
            "2,1.2,Premium,H,VS2,63.0,58,6.8,6.8,4.2,5000",
        ],
    );
    let test = read(dir.path(), "test.csv", &["3,0.3,Ideal,E,SI1,,55,4.3,4.3,2.6,600"]);

    let output = DataTransformation::new(config(dir.path()))
        .run(&train, &test)
        .unwrap();

    let numerical = output.preprocessor.numerical();
    assert_eq!(numerical.medians()[1], 61.8);

    let mean = numerical.normalizer().mean()[1];
    let std = numerical.normalizer().std()[1];
    assert!((output.test[[0, 1]] - (61.8 - mean) / std).abs() < 1e-12);
}

#[test]
fn test_set_never_refits_the_transformer() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(dir.path(), "train.csv", &TRAIN);
    let narrow = read(dir.path(), "a.csv", &["2,1.0,Good,E,SI2,61,57,6,6,4,100"]);
    let wide = read(
        dir.path(),
        "b.csv",
        &[
            "2,1.0,Good,E,SI2,61,57,6,6,4,100",
            "3,9.0,Premium,I,VVS1,70,80,20,20,12,90000",
            "4,0.1,Fair,D,I1,40,40,1,1,1,10",
        ],
    );

    let pipeline = DataTransformation::new(config(dir.path()));
    let a = pipeline.run(&train, &narrow).unwrap();
    let b = pipeline.run(&train, &wide).unwrap();

    assert_eq!(a.preprocessor, b.preprocessor);
    assert_eq!(a.test.row(0), b.test.row(0));
    assert_eq!(a.train, b.train);
}

#[test]
fn persisted_preprocessor_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(dir.path(), "train.csv", &TRAIN);
    let test = read(dir.path(), "test.csv", &["2,2.0,Good,J,VS2,64,55,6.5,4,4,2500"]);

    let output = DataTransformation::new(config(dir.path()))
        .run(&train, &test)
        .unwrap();
    assert!(output.preprocessor_path.exists());

    let loaded = load_preprocessor(&output.preprocessor_path).unwrap();
    let features = test.drop_columns(&["id".to_string(), "price".to_string()]).unwrap();
    assert_eq!(
        loaded.transform(&features).unwrap(),
        output.preprocessor.transform(&features).unwrap()
    );
}

#[test]
fn initiate_reads_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    let train_path = dir.path().join("train.csv");
    let test_path = dir.path().join("test.csv");
    write_csv(&train_path, &TRAIN);
    write_csv(&test_path, &["2,2.0,Good,J,VS2,64,55,6.5,4,4,2500"]);

    let output = DataTransformation::new(config(dir.path()))
        .initiate_data_transformation(&train_path, &test_path)
        .unwrap();
    assert_eq!(output.train.dim(), (2, 10));
    assert_eq!(output.test.dim(), (1, 10));
}

#[test]
fn unknown_category_fails_transform_stage() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(dir.path(), "train.csv", &TRAIN);
    let test = read(dir.path(), "test.csv", &["2,1.0,Excellent,E,SI2,61,57,6,6,4,100"]);

    let err = DataTransformation::new(config(dir.path()))
        .run(&train, &test)
        .unwrap_err();
    assert_eq!(err.stage, Stage::Transform);
    assert!(matches!(err.source, PreprocessingError::Encoding { .. }));
    // Артефакт не записан
    assert!(!dir.path().join("artifacts/preprocessor.json").exists());
}

#[test]
fn sentinel_policy_encodes_unknown_category() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(dir.path(), "train.csv", &TRAIN);
    let test = read(dir.path(), "test.csv", &["2,1.0,Excellent,E,SI2,61,57,6,6,4,100"]);

    let config = TransformationConfig {
        unknown_category: UnknownCategory::UseEncodedValue(-2.0),
        ..config(dir.path())
    };
    let output = DataTransformation::new(config).run(&train, &test).unwrap();

    // cut: ранги 0 и 4 -> mean 2, std 2; (-2 - 2) / 2 = -2
    assert!((output.test[[0, 6]] + 2.0).abs() < 1e-12);
}

#[test]
fn errors_carry_the_failing_stage() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(dir.path(), "train.csv", &TRAIN);
    let test = read(dir.path(), "test.csv", &["2,2.0,Good,J,VS2,64,55,6.5,4,4,2500"]);
    let pipeline = DataTransformation::new(config(dir.path()));

    let no_clarity = train.drop_columns(&["clarity".to_string()]).unwrap();
    let err = pipeline.run(&no_clarity, &test).unwrap_err();
    assert_eq!(err.stage, Stage::Fit);
    assert!(matches!(err.source, PreprocessingError::Schema { ref column } if column == "clarity"));

    let no_price = test.drop_columns(&["price".to_string()]).unwrap();
    let err = pipeline.run(&train, &no_price).unwrap_err();
    assert_eq!(err.stage, Stage::Transform);
    assert!(err.to_string().contains("'price'"));

    let err = pipeline
        .initiate_data_transformation(&dir.path().join("nope.csv"), &dir.path().join("test.csv"))
        .unwrap_err();
    assert_eq!(err.stage, Stage::ReadData);
}

#[test]
fn unwritable_artifact_path_fails_persist_stage() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(dir.path(), "train.csv", &TRAIN);
    let test = read(dir.path(), "test.csv", &["2,2.0,Good,J,VS2,64,55,6.5,4,4,2500"]);

    let blocker = dir.path().join("blocker");
    fs::write(&blocker, b"").unwrap();
    let config = TransformationConfig::default().with_preprocessor_path(blocker.join("p.json"));

    let err = DataTransformation::new(config).run(&train, &test).unwrap_err();
    assert_eq!(err.stage, Stage::Persist);
}

#[test]
fn infinite_cell_fails_fit_and_writes_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(
        dir.path(),
        "train.csv",
        &["0,inf,Fair,D,I1,60,55,5,5,3,1000", TRAIN[1]],
    );
    let test = read(dir.path(), "test.csv", &["2,2.0,Good,J,VS2,64,55,6.5,4,4,2500"]);

    let err = DataTransformation::new(config(dir.path()))
        .run(&train, &test)
        .unwrap_err();
    assert_eq!(err.stage, Stage::Fit);
    assert!(matches!(
        err.source,
        PreprocessingError::InvalidNumber { ref column, row: 0, .. } if column == "carat"
    ));
    assert!(!dir.path().join("artifacts/preprocessor.json").exists());
}

#[test]
fn custom_catalog_and_column_groups_are_used() {
    let dir = tempfile::tempdir().unwrap();
    let train = read(dir.path(), "train.csv", &TRAIN);
    let test = read(dir.path(), "test.csv", &["2,2.0,Good,J,VS2,64,55,6.5,4,4,2500"]);

    let config = TransformationConfig {
        columns: ColumnGroups {
            numerical: vec!["carat".into()],
            categorical: vec!["cut".into()],
        },
        ..config(dir.path())
    };
    // Обратный порядок огранки: Ideal = 0, Fair = 4
    let reversed = CategoryCatalog::new(vec![CatalogEntry::new(
        "cut",
        &["Ideal", "Premium", "Very Good", "Good", "Fair"],
    )]);

    let output = DataTransformation::new(config)
        .with_catalog(reversed)
        .run(&train, &test)
        .unwrap();

    assert_eq!(output.preprocessor.n_features_out(), 2);
    assert_eq!(output.preprocessor.feature_names(), vec!["carat", "cut"]);
    assert_eq!(output.train.dim(), (2, 3));
    assert_row(output.train.row(0), &[-1.0, 1.0, 1000.0]);
    assert_row(output.train.row(1), &[1.0, -1.0, 3000.0]);
    // Good -> ранг 3: (3 - 2) / 2
    assert_row(output.test.row(0), &[2.0, 0.5, 2500.0]);
}
