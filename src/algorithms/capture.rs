use std::convert::Infallible;
use std::ops::Range;

use crate::algorithms::hook::DiffHook;

/// The kind of a [`DiffOp`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum DiffTag {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// A captured edit operation over index ranges.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum DiffOp {
    /// `len` items are the same on both sides.
    Equal {
        old_index: usize,
        new_index: usize,
        len: usize,
    },
    /// `old_len` items only exist on the old side.
    Delete {
        old_index: usize,
        old_len: usize,
        new_index: usize,
    },
    /// `new_len` items only exist on the new side.
    Insert {
        old_index: usize,
        new_index: usize,
        new_len: usize,
    },
    /// `old_len` old items were swapped for `new_len` new items.
    Replace {
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    },
}

impl DiffOp {
    /// Returns the tag of the operation.
    pub fn tag(&self) -> DiffTag {
        match *self {
            DiffOp::Equal { .. } => DiffTag::Equal,
            DiffOp::Delete { .. } => DiffTag::Delete,
            DiffOp::Insert { .. } => DiffTag::Insert,
            DiffOp::Replace { .. } => DiffTag::Replace,
        }
    }

    /// The range of old items the operation covers.
    ///
    /// This is empty for insertions.
    pub fn old_range(&self) -> Range<usize> {
        match *self {
            DiffOp::Equal { old_index, len, .. } => old_index..old_index + len,
            DiffOp::Delete {
                old_index, old_len, ..
            }
            | DiffOp::Replace {
                old_index, old_len, ..
            } => old_index..old_index + old_len,
            DiffOp::Insert { old_index, .. } => old_index..old_index,
        }
    }

    /// The range of new items the operation covers.
    ///
    /// This is empty for deletions.
    pub fn new_range(&self) -> Range<usize> {
        match *self {
            DiffOp::Equal { new_index, len, .. } => new_index..new_index + len,
            DiffOp::Insert {
                new_index, new_len, ..
            }
            | DiffOp::Replace {
                new_index, new_len, ..
            } => new_index..new_index + new_len,
            DiffOp::Delete { new_index, .. } => new_index..new_index,
        }
    }
}

/// A [`DiffHook`] that records every operation it is handed.
#[derive(Default, Clone)]
pub struct Capture(Vec<DiffOp>);

impl Capture {
    pub fn new() -> Capture {
        Capture::default()
    }

    /// Converts the hook into the recorded operations.
    pub fn into_ops(self) -> Vec<DiffOp> {
        self.0
    }

    /// The operations recorded so far.
    pub fn ops(&self) -> &[DiffOp] {
        &self.0
    }
}

impl DiffHook for Capture {
    type Error = Infallible;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Equal {
            old_index,
            new_index,
            len,
        });
        Ok(())
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Delete {
            old_index,
            old_len,
            new_index,
        });
        Ok(())
    }

    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Insert {
            old_index,
            new_index,
            new_len,
        });
        Ok(())
    }

    fn replace(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Replace {
            old_index,
            old_len,
            new_index,
            new_len,
        });
        Ok(())
    }
}

#[test]
fn test_op_ranges() {
    let op = DiffOp::Replace {
        old_index: 2,
        old_len: 3,
        new_index: 1,
        new_len: 1,
    };
    assert_eq!(op.tag(), DiffTag::Replace);
    assert_eq!(op.old_range(), 2..5);
    assert_eq!(op.new_range(), 1..2);

    let op = DiffOp::Insert {
        old_index: 4,
        new_index: 4,
        new_len: 2,
    };
    assert!(op.old_range().is_empty());
    assert_eq!(op.new_range(), 4..6);
}
