//! The run-length description of a single line (row or column).
//!
//! A description is an ordered sequence of positive run lengths. The empty
//! sequence is a legal description: it describes a line that is entirely
//! empty. We model it as a plain `Vec<u32>` rather than reaching for a
//! sentinel "empty node" the way a linked-list implementation might -- an
//! empty `Vec` already has exactly one, unambiguous meaning.

use crate::error::EncodeError;
use std::fmt;

/// An ordered, non-empty-run sequence of run lengths for one line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Description {
    runs: Vec<u32>,
}

impl Description {
    /// The description of a line with no filled runs at all.
    pub fn empty() -> Self {
        Description { runs: Vec::new() }
    }

    /// Builds a description from run lengths, rejecting any run of length 0
    /// (those are not meaningful; an empty line is [`Description::empty`]).
    pub fn new(runs: Vec<u32>) -> Result<Self, EncodeError> {
        if let Some(&bad) = runs.iter().find(|&&r| r == 0) {
            return Err(EncodeError::ZeroLengthRun(bad));
        }
        Ok(Description { runs })
    }

    pub fn runs(&self) -> &[u32] {
        &self.runs
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Sum of run lengths, i.e. the number of filled cells this line needs.
    pub fn sum(&self) -> u32 {
        self.runs.iter().sum()
    }

    /// Minimum line length this description can possibly fit in:
    /// `S(D) + t - 1` for `t` runs, 0 for an empty description.
    pub fn min_length(&self) -> u32 {
        if self.runs.is_empty() {
            0
        } else {
            self.sum() + self.run_count() as u32 - 1
        }
    }

    /// True when this description can be laid out in a line of `line_len`
    /// cells (with at least one blank separator between consecutive runs).
    pub fn fits(&self, line_len: u32) -> bool {
        self.min_length() <= line_len
    }

    /// Validates against a concrete line length, turning an infeasible fit
    /// into the corresponding [`EncodeError`].
    pub fn check_fits(&self, line_len: u32) -> Result<(), EncodeError> {
        if self.fits(line_len) {
            Ok(())
        } else {
            Err(EncodeError::InfeasibleDescription {
                line_len,
                run_sum: self.sum(),
                run_count: self.run_count(),
            })
        }
    }

    /// The description obtained by dropping the first run. Empty if there
    /// was at most one run.
    pub fn tail(&self) -> Description {
        if self.runs.is_empty() {
            Description::empty()
        } else {
            Description {
                runs: self.runs[1..].to_vec(),
            }
        }
    }

    /// The first run length, if any.
    pub fn first(&self) -> Option<u32> {
        self.runs.first().copied()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.runs.is_empty() {
            write!(f, "(empty)")
        } else {
            let parts: Vec<String> = self.runs.iter().map(u32::to_string).collect();
            write!(f, "{}", parts.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_description_fits_any_length() {
        let d = Description::empty();
        assert!(d.fits(0));
        assert!(d.fits(10));
        assert_eq!(d.min_length(), 0);
    }

    #[test]
    fn min_length_accounts_for_separators() {
        let d = Description::new(vec![2, 1, 3]).unwrap();
        assert_eq!(d.sum(), 6);
        assert_eq!(d.min_length(), 6 + 3 - 1);
        assert!(d.fits(8));
        assert!(!d.fits(7));
    }

    #[test]
    fn zero_length_run_is_rejected() {
        assert!(matches!(
            Description::new(vec![2, 0, 1]),
            Err(EncodeError::ZeroLengthRun(0))
        ));
    }

    #[test]
    fn tail_drops_first_run() {
        let d = Description::new(vec![2, 1, 3]).unwrap();
        assert_eq!(d.tail().runs(), &[1, 3]);
        let single = Description::new(vec![4]).unwrap();
        assert!(single.tail().is_empty());
    }
}
