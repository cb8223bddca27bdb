use crate::core::models::geometry::CombinedGeometry;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for writing a combined geometry to a simulation input format.
pub trait GeometryFile {
    /// Format-specific settings such as force-field coefficients or box bounds.
    type Options;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Writes a geometry with the given options to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the geometry cannot be represented.
    fn write_to(
        geometry: &CombinedGeometry,
        options: &Self::Options,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes a geometry with the given options to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        geometry: &CombinedGeometry,
        options: &Self::Options,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(geometry, options, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

/// Defines the interface for reading one measurement record from a simulation output.
pub trait RecordFile {
    /// The parsed content of one file.
    type Record;

    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads a record from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if parsing fails or I/O operations encounter issues.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Record, Self::Error>;

    /// Reads a record from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Record, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}
