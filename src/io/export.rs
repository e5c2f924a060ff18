//! CSV export for evaluation results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::eval::opportunity::Evaluation;

/// Schema v1 column header for CSV opportunity export.
const HEADER: &str = "option,capacity_mw,annual_saving,roi_percent,recommended";

/// Exports an evaluation to a CSV file at the given path.
///
/// Writes a header row followed by one data row per option using the
/// schema v1 column layout. Produces deterministic output for identical
/// inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(evaluation: &Evaluation, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(evaluation, buf)
}

/// Writes an evaluation as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(evaluation: &Evaluation, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(','))?;

    // Data rows
    for r in &evaluation.results {
        wtr.write_record(&[
            r.kind.id().to_string(),
            format!("{:.4}", r.capacity_mw),
            format!("{:.2}", r.annual_saving),
            format!("{:.4}", r.roi_percent),
            (r.kind == evaluation.recommended).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CostAssumptions;
    use crate::eval::evaluator::evaluate;
    use crate::profile::{ClientProfile, EvaluationParameters};

    fn make_evaluation() -> Evaluation {
        evaluate(
            &ClientProfile::textile_mill(),
            &EvaluationParameters::default(),
            &CostAssumptions::default(),
        )
        .expect("demo profile should evaluate")
    }

    #[test]
    fn header_matches_schema_v1() {
        let mut buf = Vec::new();
        write_csv(&make_evaluation(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "option,capacity_mw,annual_saving,roi_percent,recommended"
        );
    }

    #[test]
    fn row_count_is_one_per_option() {
        let mut buf = Vec::new();
        write_csv(&make_evaluation(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 4 option rows
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn deterministic_output() {
        let evaluation = make_evaluation();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&evaluation, &mut buf1).ok();
        write_csv(&evaluation, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn exactly_one_recommended_row() {
        let mut buf = Vec::new();
        write_csv(&make_evaluation(), &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let marked = output.lines().filter(|l| l.ends_with(",true")).count();
        assert_eq!(marked, 1);
    }

    #[test]
    fn round_trip_parseable() {
        let mut buf = Vec::new();
        write_csv(&make_evaluation(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(5));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref();
            // Numeric columns parse as f64
            for i in 1..4 {
                let val: Result<f64, _> = rec.unwrap()[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            // recommended parses as bool
            let rec_val: Result<bool, _> = rec.unwrap()[4].parse();
            assert!(rec_val.is_ok(), "recommended column should parse as bool");
            row_count += 1;
        }
        assert_eq!(row_count, 4);
    }
}
