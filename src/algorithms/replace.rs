use crate::algorithms::DiffHook;

/// A [`DiffHook`] that coalesces runs of operations before forwarding them.
///
/// Consecutive equal runs are joined, consecutive deletions and insertions
/// are joined, and a deletion directly paired with an insertion is
/// forwarded as a single [`DiffHook::replace`].
pub struct Replace<D: DiffHook> {
    d: D,
    del: Option<(usize, usize, usize)>,
    ins: Option<(usize, usize, usize)>,
    eq: Option<(usize, usize, usize)>,
}

impl<D: DiffHook> Replace<D> {
    pub fn new(d: D) -> Self {
        Replace {
            d,
            del: None,
            ins: None,
            eq: None,
        }
    }

    pub fn into_inner(self) -> D {
        self.d
    }

    fn flush_equal(&mut self) -> Result<(), D::Error> {
        match self.eq.take() {
            Some((old, new, len)) => self.d.equal(old, new, len),
            None => Ok(()),
        }
    }

    fn flush_change(&mut self) -> Result<(), D::Error> {
        match (self.del.take(), self.ins.take()) {
            (Some((old, old_len, _)), Some((_, new, new_len))) => {
                self.d.replace(old, old_len, new, new_len)
            }
            (Some((old, old_len, new)), None) => self.d.delete(old, old_len, new),
            (None, Some((old, new, new_len))) => self.d.insert(old, new, new_len),
            (None, None) => Ok(()),
        }
    }
}

impl<D: DiffHook> AsRef<D> for Replace<D> {
    fn as_ref(&self) -> &D {
        &self.d
    }
}

impl<D: DiffHook> AsMut<D> for Replace<D> {
    fn as_mut(&mut self) -> &mut D {
        &mut self.d
    }
}

impl<D: DiffHook> DiffHook for Replace<D> {
    type Error = D::Error;

    fn equal(&mut self, old: usize, new: usize, len: usize) -> Result<(), D::Error> {
        self.flush_change()?;
        self.eq = Some(match self.eq.take() {
            Some((old0, new0, len0)) => (old0, new0, len0 + len),
            None => (old, new, len),
        });
        Ok(())
    }

    fn delete(&mut self, old: usize, old_len: usize, new: usize) -> Result<(), D::Error> {
        self.flush_equal()?;
        self.del = Some(match self.del.take() {
            Some((old0, len0, new0)) => {
                debug_assert_eq!(old, old0 + len0);
                (old0, len0 + old_len, new0)
            }
            None => (old, old_len, new),
        });
        Ok(())
    }

    fn insert(&mut self, old: usize, new: usize, new_len: usize) -> Result<(), D::Error> {
        self.flush_equal()?;
        self.ins = Some(match self.ins.take() {
            Some((old0, new0, len0)) => {
                debug_assert_eq!(new, new0 + len0);
                (old0, new0, len0 + new_len)
            }
            None => (old, new, new_len),
        });
        Ok(())
    }

    fn replace(
        &mut self,
        old: usize,
        old_len: usize,
        new: usize,
        new_len: usize,
    ) -> Result<(), D::Error> {
        self.flush_equal()?;
        self.flush_change()?;
        self.d.replace(old, old_len, new, new_len)
    }

    fn finish(&mut self) -> Result<(), D::Error> {
        self.flush_equal()?;
        self.flush_change()?;
        self.d.finish()
    }
}

#[test]
fn test_replace_lines() {
    use crate::algorithms::{diff, Algorithm};

    let a: &[&str] = &[
        ">>>>>>>>\n", "a\n", "b\n", "c\n", "========\n", "d\n", "e\n", "f\n", "<<<<<<<<\n",
    ];
    let b: &[&str] = &[
        ">>>>>>>>\n", "x\n", "b\n", "c\n", "========\n", "y\n", "e\n", "f\n", "<<<<<<<<\n",
    ];

    struct Log(Vec<String>);

    impl DiffHook for Log {
        type Error = ();

        fn equal(&mut self, o: usize, n: usize, len: usize) -> Result<(), ()> {
            self.0.push(format!("equal {} {} {}", o, n, len));
            Ok(())
        }

        fn delete(&mut self, o: usize, len: usize, n: usize) -> Result<(), ()> {
            self.0.push(format!("delete {} {} {}", o, len, n));
            Ok(())
        }

        fn insert(&mut self, o: usize, n: usize, len: usize) -> Result<(), ()> {
            self.0.push(format!("insert {} {} {}", o, n, len));
            Ok(())
        }

        fn replace(&mut self, o: usize, l: usize, n: usize, nl: usize) -> Result<(), ()> {
            self.0.push(format!("replace {} {} {} {}", o, l, n, nl));
            Ok(())
        }
    }

    for &alg in &[Algorithm::Myers, Algorithm::Lcs] {
        let mut d = Replace::new(Log(Vec::new()));
        diff(alg, &mut d, a, 0..a.len(), b, 0..b.len()).unwrap();
        assert_eq!(
            d.into_inner().0,
            vec![
                "equal 0 0 1",
                "replace 1 1 1 1",
                "equal 2 2 3",
                "replace 5 1 5 1",
                "equal 6 6 3",
            ]
        );
    }
}

#[test]
fn test_pure_insert_is_not_a_replace() {
    use crate::algorithms::{lcs, Capture, DiffOp};

    let a: &[&str] = &["a\n"];
    let b: &[&str] = &["a\n", "b\n"];
    let mut d = Replace::new(Capture::new());
    lcs::diff(&mut d, a, 0..a.len(), b, 0..b.len()).unwrap();
    assert_eq!(
        d.into_inner().into_ops(),
        vec![
            DiffOp::Equal {
                old_index: 0,
                new_index: 0,
                len: 1
            },
            DiffOp::Insert {
                old_index: 1,
                new_index: 1,
                new_len: 1
            },
        ]
    );
}
