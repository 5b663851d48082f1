use core::mem::MaybeUninit;

pub(crate) type Chunk<T, const CHUNK: usize> = Box<[MaybeUninit<T>; CHUNK]>;

/// Allocates a chunk with every slot uninitialized.
#[inline]
pub(crate) fn new_chunk<T, const CHUNK: usize>() -> Chunk<T, CHUNK> {
    // allocated in place, a chunk of large elements must not touch the stack
    //
    // SAFETY: an array of `MaybeUninit` needs no initialization.
    unsafe { Box::<[MaybeUninit<T>; CHUNK]>::new_uninit().assume_init() }
}

/// A logical position inside the chunk map: which chunk, and which slot
/// within it. Cursors are always kept normalized, i.e. `offset < CHUNK`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) chunk: usize,
    pub(crate) offset: usize,
}

impl Cursor {
    #[inline]
    pub(crate) const fn new(chunk: usize, offset: usize) -> Self {
        Self { chunk, offset }
    }

    /// Builds a normalized cursor from a flat slot number.
    #[inline]
    pub(crate) const fn from_linear<const CHUNK: usize>(pos: usize) -> Self {
        Self { chunk: pos / CHUNK, offset: pos % CHUNK }
    }

    /// Flat slot number across all chunks.
    #[inline]
    pub(crate) const fn linear<const CHUNK: usize>(self) -> usize {
        self.chunk * CHUNK + self.offset
    }

    /// One slot forward, rolling into the next chunk when this one fills.
    #[inline]
    pub(crate) fn advance<const CHUNK: usize>(&mut self) {
        self.offset += 1;
        if self.offset == CHUNK {
            self.offset = 0;
            self.chunk += 1;
        }
    }

    /// One slot back, rolling into the last slot of the previous chunk.
    ///
    /// The caller guarantees the cursor is not at `(0, 0)`.
    #[inline]
    pub(crate) fn retreat<const CHUNK: usize>(&mut self) {
        if self.offset == 0 {
            debug_assert!(self.chunk > 0, "retreat past the origin");
            self.chunk -= 1;
            self.offset = CHUNK - 1;
        } else {
            self.offset -= 1;
        }
    }

    #[inline]
    pub(crate) const fn is_origin(self) -> bool {
        self.chunk == 0 && self.offset == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_rolls_over() {
        let mut c = Cursor::new(0, 8);
        c.advance::<10>();
        assert_eq!(c, Cursor::new(0, 9));
        c.advance::<10>();
        assert_eq!(c, Cursor::new(1, 0));
    }

    #[test]
    fn retreat_rolls_back() {
        let mut c = Cursor::new(2, 0);
        c.retreat::<10>();
        assert_eq!(c, Cursor::new(1, 9));
        c.retreat::<10>();
        assert_eq!(c, Cursor::new(1, 8));
    }

    #[test]
    fn linear_round_trips() {
        for pos in [0, 1, 99, 100, 101, 12345] {
            let c = Cursor::from_linear::<100>(pos);
            assert!(c.offset < 100);
            assert_eq!(c.linear::<100>(), pos);
        }
    }

    #[test]
    fn single_slot_chunks() {
        let mut c = Cursor::default();
        assert!(c.is_origin());
        c.advance::<1>();
        assert_eq!(c, Cursor::new(1, 0));
        c.retreat::<1>();
        assert!(c.is_origin());
    }
}
