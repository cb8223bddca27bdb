use crate::core::io::traits::RecordFile;
use crate::core::models::geometry::TubeId;
use nalgebra::{Point3, Vector3};
use std::io::{self, BufRead};
use thiserror::Error;

/// One per-atom record of a dump frame: `id tag x y z fx fy fz`. The id column is
/// checked but not kept; atoms are told apart by tag only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DumpAtom {
    pub tag: u32,
    pub position: Point3<f64>,
    pub force: Vector3<f64>,
}

impl DumpAtom {
    pub fn tube(&self) -> TubeId {
        TubeId::from_tag(self.tag)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DumpFrame {
    pub timestep: Option<u64>,
    pub atoms: Vec<DumpAtom>,
}

impl DumpFrame {
    pub fn atoms_of(&self, tube: TubeId) -> impl Iterator<Item = &DumpAtom> + '_ {
        self.atoms.iter().filter(move |a| a.tube() == tube)
    }
}

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: DumpParseErrorKind },
    #[error("Dump contains no 'ITEM: ATOMS' section")]
    MissingAtoms,
}

#[derive(Debug, Error)]
pub enum DumpParseErrorKind {
    #[error("Atom record has {found} columns, expected at least 8")]
    TooFewColumns { found: usize },
    #[error("Invalid integer in column {column} (value: '{value}')")]
    InvalidInt { column: usize, value: String },
    #[error("Invalid float in column {column} (value: '{value}')")]
    InvalidFloat { column: usize, value: String },
}

/// LAMMPS custom dump holding positions and forces per atom.
///
/// Only the first frame is read: records start after the first `ITEM: ATOMS` header
/// and stop at the following `ITEM: TIMESTEP`.
pub struct DumpFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Header,
    Timestep,
    Atoms,
}

fn parse_atom(line: &str, line_num: usize) -> Result<DumpAtom, DumpError> {
    let cols: Vec<&str> = line.split_whitespace().collect();
    if cols.len() < 8 {
        return Err(DumpError::Parse {
            line: line_num,
            kind: DumpParseErrorKind::TooFewColumns { found: cols.len() },
        });
    }

    let int = |column: usize| -> Result<u64, DumpError> {
        cols[column].parse().map_err(|_| DumpError::Parse {
            line: line_num,
            kind: DumpParseErrorKind::InvalidInt {
                column: column + 1,
                value: cols[column].into(),
            },
        })
    };
    let float = |column: usize| -> Result<f64, DumpError> {
        cols[column].parse().map_err(|_| DumpError::Parse {
            line: line_num,
            kind: DumpParseErrorKind::InvalidFloat {
                column: column + 1,
                value: cols[column].into(),
            },
        })
    };

    int(0)?;
    let tag = int(1)?;
    Ok(DumpAtom {
        tag: u32::try_from(tag).map_err(|_| DumpError::Parse {
            line: line_num,
            kind: DumpParseErrorKind::InvalidInt {
                column: 2,
                value: cols[1].into(),
            },
        })?,
        position: Point3::new(float(2)?, float(3)?, float(4)?),
        force: Vector3::new(float(5)?, float(6)?, float(7)?),
    })
}

impl RecordFile for DumpFile {
    type Record = DumpFrame;
    type Error = DumpError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Record, Self::Error> {
        let mut frame = DumpFrame::default();
        let mut state = ReadState::Header;
        let mut saw_atoms = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let line = line.trim();

            if line.starts_with("ITEM: ATOMS") {
                state = ReadState::Atoms;
                saw_atoms = true;
                continue;
            }
            if line.starts_with("ITEM: TIMESTEP") {
                if state == ReadState::Atoms {
                    break;
                }
                state = ReadState::Timestep;
                continue;
            }
            if line.starts_with("ITEM:") {
                state = ReadState::Header;
                continue;
            }

            match state {
                ReadState::Timestep => {
                    if frame.timestep.is_none() {
                        frame.timestep = line.parse().ok();
                    }
                    state = ReadState::Header;
                }
                ReadState::Atoms if !line.is_empty() => {
                    frame.atoms.push(parse_atom(line, line_num)?);
                }
                _ => {}
            }
        }

        if !saw_atoms {
            return Err(DumpError::MissingAtoms);
        }
        Ok(frame)
    }
}
