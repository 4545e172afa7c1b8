//! Tests covering layout detection and error reporting.
use super::{DelimitedMatrixError, DelimitedMatrixReader, DelimitedMatrixWriter};
use rstest::rstest;

fn read(text: &str) -> Result<super::LabelledMatrix, DelimitedMatrixError> {
    DelimitedMatrixReader::new().read(text.as_bytes())
}

#[rstest]
#[case::bare("0,1\n1,0\n", None)]
#[case::header_only("a,b\n0,1\n1,0\n", Some(vec!["a", "b"]))]
#[case::index_only("a,0,1\nb,1,0\n", Some(vec!["a", "b"]))]
#[case::header_and_index(",a,b\na,0,1\nb,1,0\n", Some(vec!["a", "b"]))]
#[case::numeric_labels(",0,1\n0,0,1\n1,1,0\n", Some(vec!["0", "1"]))]
#[case::padded(" a , b \n 0 , 1 \n 1 , 0 \n", Some(vec!["a", "b"]))]
fn detects_layouts(#[case] text: &str, #[case] labels: Option<Vec<&str>>) {
    let parsed = read(text).expect("layout must parse");
    let expected: Option<Vec<String>> =
        labels.map(|labels| labels.into_iter().map(str::to_owned).collect());
    assert_eq!(parsed.labels().map(<[String]>::to_vec), expected);
    assert_eq!(parsed.matrix().order(), 2);
    assert_eq!(parsed.matrix().get(0, 1), Some(1.0));
    assert_eq!(parsed.matrix().get(1, 1), Some(0.0));
}

#[rstest]
fn honours_custom_delimiter() {
    let parsed = DelimitedMatrixReader::new()
        .with_delimiter(b'\t')
        .read("0\t3\n3\t0\n".as_bytes())
        .expect("tab-separated input parses");
    assert_eq!(parsed.matrix().get(1, 0), Some(3.0));
}

#[rstest]
fn mismatched_labels_are_rejected() {
    let err = read(",a,b\na,0,1\nc,1,0\n").expect_err("labels disagree");
    assert!(matches!(
        err,
        DelimitedMatrixError::LabelMismatch { position: 1, ref header, ref index }
            if header == "b" && index == "c"
    ));
}

#[rstest]
#[case::empty_input("", "Empty")]
#[case::header_without_rows("a,b\n", "Empty")]
#[case::ragged("0,1\n1\n", "RaggedRow")]
#[case::not_square("0,1,2,3\n1,0,2,3\n", "NotSquare")]
#[case::empty_cell("0,\n1,0\n", "EmptyCell")]
#[case::bad_number("0,1\n1,x1\n", "InvalidNumber")]
#[case::header_count("a,b,c\n0,1\n1,0\n", "LabelCount")]
fn rejects_malformed_input(#[case] text: &str, #[case] expected: &str) {
    let err = read(text).expect_err("input is malformed");
    let variant = format!("{err:?}");
    assert!(
        variant.starts_with(expected),
        "expected {expected}, got {variant}"
    );
}

#[rstest]
fn nan_cells_parse_as_nan() {
    let parsed = read("0,nan\nNaN,0\n").expect("nan is a number");
    assert!(parsed.matrix().get(0, 1).is_some_and(f64::is_nan));
    assert!(parsed.matrix().get(1, 0).is_some_and(f64::is_nan));
}

#[rstest]
fn empty_cells_can_be_read_as_missing() {
    let reader = DelimitedMatrixReader::new().with_missing_as_nan(true);
    assert!(reader.missing_as_nan());
    let parsed = reader
        .read(",a,b,c\na,0,1,\nb,1,0,2\nc,,2,0\n".as_bytes())
        .expect("empty cells are missing values");
    let matrix = parsed.matrix();
    assert!(matrix.get(0, 2).is_some_and(f64::is_nan));
    assert!(matrix.get(2, 0).is_some_and(f64::is_nan));
    assert_eq!(matrix.get(1, 2), Some(2.0));
    assert_eq!(parsed.labels().map(<[String]>::len), Some(3));
}

#[rstest]
fn reads_a_named_column() {
    let text = "Allen ID,Acronym,Brain Division\n\
        184,FRP,Isocortex\n\
        985,Mop,Isocortex\n\
        507,MOB,OLF\n";
    let column = DelimitedMatrixReader::new()
        .read_column(text.as_bytes(), "Brain Division")
        .expect("column exists");
    assert_eq!(column, ["Isocortex", "Isocortex", "OLF"]);
}

#[rstest]
#[case::absent("Acronym,Division\nFRP,Isocortex\n", "MissingColumn")]
#[case::short_row("Acronym,Brain Division\nFRP,Isocortex\nMOB\n", "RaggedRow")]
fn column_errors(#[case] text: &str, #[case] expected: &str) {
    let err = DelimitedMatrixReader::new()
        .read_column(text.as_bytes(), "Brain Division")
        .expect_err("column cannot be read");
    let variant = format!("{err:?}");
    assert!(
        variant.starts_with(expected),
        "expected {expected}, got {variant}"
    );
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

#[rstest]
fn writes_labelled_tables() {
    let mut out = Vec::new();
    DelimitedMatrixWriter::new()
        .with_delimiter(b';')
        .write_table(
            &mut out,
            &labels(&["Isocortex", "OLF"]),
            &labels(&["Isocortex-I", "OLF-I"]),
            &[vec![1.0, 0.25], vec![f64::NAN, -0.5]],
        )
        .expect("shapes agree");
    assert_eq!(
        String::from_utf8_lossy(&out),
        ";Isocortex-I;OLF-I\nIsocortex;1;0.25\nOLF;NaN;-0.5\n"
    );
}

#[rstest]
#[case::row_labels(&["a"], &["x", "y"], "LabelCount")]
#[case::ragged(&["a", "b"], &["x"], "RaggedRow")]
fn table_shape_errors(#[case] rows: &[&str], #[case] columns: &[&str], #[case] expected: &str) {
    let err = DelimitedMatrixWriter::new()
        .write_table(
            Vec::new(),
            &labels(rows),
            &labels(columns),
            &[vec![1.0, 2.0], vec![3.0, 4.0]],
        )
        .expect_err("shapes disagree");
    let variant = format!("{err:?}");
    assert!(
        variant.starts_with(expected),
        "expected {expected}, got {variant}"
    );
}
