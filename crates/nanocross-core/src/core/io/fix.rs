use crate::core::io::traits::RecordFile;
use std::io::{self, BufRead};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Line {line} has no value column")]
    MissingColumn { line: usize },
    #[error("Invalid float on line {line} (value: '{value}')")]
    InvalidFloat { line: usize, value: String },
    #[error("Fix output contains no data lines")]
    Empty,
}

/// Output of a LAMMPS `fix ave/time` style file holding a scalar per step.
///
/// Comment lines start with `#`. The record is the second column of the first data
/// line, i.e. the value at the first sampled timestep.
pub struct FixFile;

impl RecordFile for FixFile {
    type Record = f64;
    type Error = FixError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Record, Self::Error> {
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let value = trimmed
                .split_whitespace()
                .nth(1)
                .ok_or(FixError::MissingColumn { line: line_num })?;
            return value.parse().map_err(|_| FixError::InvalidFloat {
                line: line_num,
                value: value.into(),
            });
        }
        Err(FixError::Empty)
    }
}
