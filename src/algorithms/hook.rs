/// Receives the edit script that turns the old sequence into the new one.
///
/// The LCS implementation reports every run it finds through these
/// callbacks.  Indexes always refer to positions in the full old and new
/// sequences, never to the sub-ranges being diffed.
pub trait DiffHook: Sized {
    type Error;

    /// `len` items starting at `old` in the old sequence match the items
    /// starting at `new` in the new sequence.
    fn equal(&mut self, old: usize, new: usize, len: usize) -> Result<(), Self::Error> {
        let _ = (old, new, len);
        Ok(())
    }

    /// `old_len` items starting at `old` only exist in the old sequence.
    /// `new` is the position in the new sequence the deletion happens at.
    fn delete(&mut self, old: usize, old_len: usize, new: usize) -> Result<(), Self::Error> {
        let _ = (old, old_len, new);
        Ok(())
    }

    /// `new_len` items starting at `new` only exist in the new sequence
    /// and are inserted before `old`.
    fn insert(&mut self, old: usize, new: usize, new_len: usize) -> Result<(), Self::Error> {
        let _ = (old, new, new_len);
        Ok(())
    }

    /// `old_len` items at `old` were swapped for `new_len` items at `new`.
    ///
    /// Falls back to a delete followed by an insert.
    fn replace(
        &mut self,
        old: usize,
        old_len: usize,
        new: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.delete(old, old_len, new)?;
        self.insert(old, new, new_len)
    }

    /// Called once after the last operation.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<'a, D: DiffHook + 'a> DiffHook for &'a mut D {
    type Error = D::Error;

    fn equal(&mut self, old: usize, new: usize, len: usize) -> Result<(), Self::Error> {
        (**self).equal(old, new, len)
    }

    fn delete(&mut self, old: usize, old_len: usize, new: usize) -> Result<(), Self::Error> {
        (**self).delete(old, old_len, new)
    }

    fn insert(&mut self, old: usize, new: usize, new_len: usize) -> Result<(), Self::Error> {
        (**self).insert(old, new, new_len)
    }

    fn replace(
        &mut self,
        old: usize,
        old_len: usize,
        new: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        (**self).replace(old, old_len, new, new_len)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (**self).finish()
    }
}
