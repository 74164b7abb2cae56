use thiserror::Error;

const SEPARATOR: &str = "----";

/// Why recorded lines did not match the expected ones.
///
/// Display is the full diagnostic dump handed to [`Tester::fatal`](crate::Tester::fatal).
#[derive(Error, Debug)]
pub enum Mismatch {
    #[error(
        "\nINVALID RECORDS\nEXPECTED:\n{}\nACTUAL:\n{}\n",
        dump_records(.expected),
        dump_records(.actual)
    )]
    Length {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error(
        "\nINVALID RECORD BY {index} INDEX\nEXPECTED:\n{}\nACTUAL:\n{}\n",
        dump_record(.expected),
        dump_record(.actual)
    )]
    Record {
        index: usize,
        expected: String,
        actual: String,
    },

    /// An expected operation could not be rendered
    #[error("render expected record: {0}")]
    Render(#[from] ctxlog::Error),
}

fn dump_records(records: &[String]) -> String {
    let mut out = String::from("[\n");
    for record in records {
        out.push_str(SEPARATOR);
        out.push_str("\n    ");
        out.push_str(record);
    }
    out.push_str(SEPARATOR);
    out.push_str("\n]");
    out
}

fn dump_record(record: &str) -> String {
    format!("{SEPARATOR}\n    {record}{SEPARATOR}")
}

/// Compare rendered lines, sorting both sides first unless `check_order`.
///
/// # Errors
///
/// Returns the first difference found: a length mismatch, or the first index
/// whose lines differ.
pub fn compare(
    mut expected: Vec<String>,
    mut actual: Vec<String>,
    check_order: bool,
) -> Result<(), Mismatch> {
    if !check_order {
        expected.sort();
        actual.sort();
    }

    if expected.len() != actual.len() {
        return Err(Mismatch::Length { expected, actual });
    }

    match expected
        .iter()
        .zip(actual.iter())
        .position(|(expected, actual)| expected != actual)
    {
        Some(index) => Err(Mismatch::Record {
            index,
            expected: expected.swap_remove(index),
            actual: actual.swap_remove(index),
        }),
        None => Ok(()),
    }
}
