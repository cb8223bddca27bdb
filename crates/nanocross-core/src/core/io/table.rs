use nalgebra::Vector3;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;
use thiserror::Error;

pub const TABLE_HEADER: [&str; 14] = [
    "# sep", "energy", "f1x", "f1y", "f1z", "f2x", "f2y", "f2z", "t1x", "t1y", "t1z", "t2x",
    "t2y", "t2z",
];

/// One separation's measurements: the engine's interaction reading plus per-tube net
/// force and torque.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub separation: f64,
    pub interaction: f64,
    pub force1: Vector3<f64>,
    pub force2: Vector3<f64>,
    pub torque1: Vector3<f64>,
    pub torque2: Vector3<f64>,
}

impl TableRow {
    fn fields(&self) -> Vec<String> {
        let mut fields = Vec::with_capacity(TABLE_HEADER.len());
        fields.push(format!("{:.3}", self.separation));
        fields.push(self.interaction.to_string());
        for v in [self.force1, self.force2, self.torque1, self.torque2] {
            fields.extend(v.iter().map(|c| c.to_string()));
        }
        fields
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Row {row} has {found} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("Invalid number in row {row}, column {column} (value: '{value}')")]
    InvalidNumber {
        row: usize,
        column: usize,
        value: String,
    },
}

/// Writes rows as a tab-separated table headed by a `#` comment line.
pub fn write_table(rows: &[TableRow], writer: impl Write) -> Result<(), TableError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(TABLE_HEADER)?;
    for row in rows {
        csv_writer.write_record(row.fields())?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_table_to_path<P: AsRef<Path>>(rows: &[TableRow], path: P) -> Result<(), TableError> {
    let file = File::create(path)?;
    write_table(rows, io::BufWriter::new(file))
}

/// Reads a table written by [`write_table`]. Lines starting with `#` are skipped.
pub fn read_table(reader: impl Read) -> Result<Vec<TableRow>, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (row_idx, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = row_idx + 1;
        if record.len() != TABLE_HEADER.len() {
            return Err(TableError::ColumnCount {
                row,
                found: record.len(),
                expected: TABLE_HEADER.len(),
            });
        }
        let values = record
            .iter()
            .enumerate()
            .map(|(column, field)| {
                field.trim().parse::<f64>().map_err(|_| TableError::InvalidNumber {
                    row,
                    column: column + 1,
                    value: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;
        let vec3 = |start: usize| Vector3::new(values[start], values[start + 1], values[start + 2]);
        rows.push(TableRow {
            separation: values[0],
            interaction: values[1],
            force1: vec3(2),
            force2: vec3(5),
            torque1: vec3(8),
            torque2: vec3(11),
        });
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(separation: f64) -> TableRow {
        TableRow {
            separation,
            interaction: -0.25,
            force1: Vector3::new(1.0, 2.0, 3.0),
            force2: Vector3::new(-1.0, -2.0, -3.0),
            torque1: Vector3::new(0.5, 0.0, 0.0),
            torque2: Vector3::new(0.0, 0.0, -0.5),
        }
    }

    #[test]
    fn table_starts_with_comment_header() {
        let mut buffer = Vec::new();
        write_table(&[sample_row(10.1)], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "# sep\tenergy\tf1x\tf1y\tf1z\tf2x\tf2y\tf2z\tt1x\tt1y\tt1z\tt2x\tt2y\tt2z"
        );
        assert_eq!(
            lines.next().unwrap(),
            "10.100\t-0.25\t1\t2\t3\t-1\t-2\t-3\t0.5\t0\t0\t0\t0\t-0.5"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn written_table_reads_back() {
        let rows = vec![sample_row(10.1), sample_row(10.2)];
        let mut buffer = Vec::new();
        write_table(&rows, &mut buffer).unwrap();
        let parsed = read_table(buffer.as_slice()).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].separation, 10.2);
        assert_eq!(parsed[1].torque2, Vector3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn short_row_is_rejected() {
        let text = "# sep\tenergy\n10.0\t1.0\n";
        assert!(matches!(
            read_table(text.as_bytes()),
            Err(TableError::ColumnCount { row: 1, found: 2, .. })
        ));
    }
}
