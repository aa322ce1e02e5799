//! Error types for structure parsing with error codes and helpful messages.
//!
//! # Error Codes
//!
//! Each error variant has a unique code (G001-G003) for documentation lookup:
//!
//! - G001: `EmptyStructure` (Structure contains no rows)
//! - G002: `NotRectangular` (Rows have differing widths)
//! - G003: `NoFillableCells` (No cell in the grid is fillable)
//!
//! Unsatisfiability is *not* an error: a puzzle with no valid assignment is a
//! normal outcome and is reported as an absence by the solver, never through
//! this module.

use std::io;

/// Error raised while deriving a [`crate::grid::Crossword`] from a structure
/// string. These indicate a malformed problem instance; the caller must fix
/// the input, there is nothing to retry.
#[derive(Debug, thiserror::Error)]
pub enum StructureError {
    #[error("structure contains no rows")]
    EmptyStructure,

    #[error("structure is not rectangular: row {row} has {found} cells, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("structure contains no fillable cells")]
    NoFillableCells,
}

impl From<StructureError> for io::Error {
    fn from(se: StructureError) -> Self {
        // String version is the least fragile (no Send/Sync bounds issues)
        io::Error::new(io::ErrorKind::InvalidInput, se.to_string())
    }
}

impl StructureError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            StructureError::EmptyStructure => "G001",
            StructureError::NotRectangular { .. } => "G002",
            StructureError::NoFillableCells => "G003",
        }
    }

    /// Returns a helpful suggestion or example for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            StructureError::EmptyStructure => {
                Some("The structure file must contain at least one row of cells")
            }
            StructureError::NotRectangular { .. } => {
                Some("Every row of the structure must have the same number of characters; pad blocked cells explicitly (e.g., with '#')")
            }
            StructureError::NoFillableCells => {
                Some("Mark fillable cells with '_'; a grid of only blocked cells has nothing to solve")
            }
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(
    base_msg: &str,
    code: &str,
    help: Option<&str>,
) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_error_codes_and_help() {
        let err = StructureError::NoFillableCells;
        assert_eq!(err.code(), "G003");
        assert!(err.help().is_some());
        let detailed = err.display_detailed();
        assert!(detailed.contains("G003"));
        assert!(detailed.contains("fillable"));
    }

    #[test]
    fn test_not_rectangular_reports_widths() {
        let err = StructureError::NotRectangular {
            row: 2,
            expected: 5,
            found: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("row 2"));
        assert!(msg.contains('5') && msg.contains('3'));
    }

    #[test]
    fn test_all_error_codes_are_unique() {
        let errors = [
            StructureError::EmptyStructure,
            StructureError::NotRectangular {
                row: 0,
                expected: 1,
                found: 2,
            },
            StructureError::NoFillableCells,
        ];

        let mut codes = HashSet::new();
        for err in errors {
            let code = err.code();
            assert!(code.starts_with('G'), "code '{code}' should start with 'G'");
            assert!(codes.insert(code), "duplicate error code: {code}");
        }
        assert_eq!(codes.len(), 3);
    }

    #[test]
    fn test_io_error_conversion_preserves_message() {
        let err = StructureError::EmptyStructure;
        let io_err: std::io::Error = err.into();
        assert_eq!(io_err.kind(), std::io::ErrorKind::InvalidInput);
        assert!(io_err.to_string().contains("no rows"));
    }
}
