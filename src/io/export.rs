//! CSV export of the project overview.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::model::Windpark;

/// Column header for the overview export, using the wire field names.
const HEADER: &str = "id,name,standort,baubeginn,inbetriebnahme,status,\
                      anlagen,gewinnProAnnum,investitionsvolumen,ekQuote,fkZins,roi";

/// Exports the project list to a CSV file at the given path.
///
/// Writes a header row followed by one row per project. The `anlagen`
/// column holds the total turbine count. Produces deterministic output for
/// identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(projects: &[Windpark], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(projects, buf)
}

/// Writes the project list as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(projects: &[Windpark], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for p in projects {
        wtr.write_record(&[
            p.id.clone(),
            p.name.clone(),
            p.standort.clone(),
            p.baubeginn.map(|d| d.to_string()).unwrap_or_default(),
            p.inbetriebnahme.map(|d| d.to_string()).unwrap_or_default(),
            p.status.to_string(),
            p.total_anlagen().to_string(),
            format!("{:.2}", p.gewinn_pro_annum),
            format!("{:.2}", p.investitionsvolumen),
            format!("{:.2}", p.ek_quote),
            format!("{:.2}", p.fk_zins),
            format!("{:.2}", p.roi),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_projects;

    #[test]
    fn header_uses_wire_names() {
        let mut buf = Vec::new();
        write_csv(&seed_projects(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let first_line = output.as_deref().unwrap_or("").lines().next().unwrap_or("");
        assert_eq!(
            first_line,
            "id,name,standort,baubeginn,inbetriebnahme,status,\
             anlagen,gewinnProAnnum,investitionsvolumen,ekQuote,fkZins,roi"
        );
    }

    #[test]
    fn row_count_matches_project_count() {
        let mut buf = Vec::new();
        write_csv(&seed_projects(), &mut buf).ok();
        let output = String::from_utf8(buf).ok();
        let lines: Vec<&str> = output.as_deref().unwrap_or("").lines().collect();
        // 1 header + 6 data rows
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn deterministic_output() {
        let projects = seed_projects();
        let mut buf1 = Vec::new();
        let mut buf2 = Vec::new();
        write_csv(&projects, &mut buf1).ok();
        write_csv(&projects, &mut buf2).ok();
        assert_eq!(buf1, buf2);
    }

    #[test]
    fn round_trip_parseable() {
        let mut buf = Vec::new();
        write_csv(&seed_projects(), &mut buf).ok();

        let mut rdr = csv::ReaderBuilder::new().from_reader(buf.as_slice());
        let headers = rdr.headers().cloned().ok();
        assert_eq!(headers.as_ref().map(csv::StringRecord::len), Some(12));

        let mut row_count = 0;
        for record in rdr.records() {
            let rec = record.ok();
            assert!(rec.is_some(), "every row should parse");
            let rec = rec.as_ref();
            // anlagen column parses as u32
            let count: Result<u32, _> = rec.unwrap()[6].parse();
            assert!(count.is_ok(), "anlagen column should parse as u32");
            // financial columns parse as f64
            for i in 7..12 {
                let val: Result<f64, _> = rec.unwrap()[i].parse();
                assert!(val.is_ok(), "column {i} should parse as f64");
            }
            row_count += 1;
        }
        assert_eq!(row_count, 6);
    }

    #[test]
    fn missing_dates_export_as_empty() {
        let mut park = seed_projects().remove(0);
        park.baubeginn = None;
        park.inbetriebnahme = None;
        let mut buf = Vec::new();
        write_csv(&[park], &mut buf).ok();
        let output = String::from_utf8(buf).unwrap_or_default();
        let row = output.lines().nth(1).unwrap_or("");
        assert!(row.contains(",,,"), "empty date columns expected: {row}");
    }
}
