//! A double-ended queue stored as a growable map of fixed-size chunks.
//!
//! Elements live in heap blocks of `CHUNK` slots each. Two cursors, `begin`
//! and `end`, locate the live range as `(chunk, slot)` pairs, so indexing is
//! a division and a modulo away from the storage. Pushing at the back
//! allocates one chunk at a time; pushing at the front when there is no room
//! left triples the chunk map and parks the existing chunks in its last
//! third. Chunks are never freed before the deque itself.
//!
//! ```
//! use chunk_deque::Deque;
//!
//! let mut d: Deque<i32> = Deque::new();
//! d.push_front(3);
//! d.push_front(2);
//! d.push_back(4);
//! assert_eq!(d, [2, 3, 4]);
//! assert_eq!(d.at(1), Ok(&3));
//! assert!(d.at(3).is_err());
//! ```

mod cursor;
mod error;

use core::{
    fmt, mem,
    ops::{Index, IndexMut},
};

use cursor::{new_chunk, Chunk, Cursor};

pub use error::OutOfRange;

/// Number of slots per chunk unless a different `CHUNK` is picked.
pub const DEFAULT_CHUNK: usize = 100;

pub struct Deque<T, const CHUNK: usize = DEFAULT_CHUNK> {
    chunks: Vec<Chunk<T, CHUNK>>,
    begin: Cursor,
    end: Cursor,
}

impl<T, const CHUNK: usize> Deque<T, CHUNK> {
    pub const CHUNK_SIZE: usize = CHUNK;

    const CHUNK_NONZERO: () = assert!(CHUNK != 0, "chunk size must be non-zero");

    #[inline]
    pub const fn new() -> Self {
        let () = Self::CHUNK_NONZERO;
        Self { chunks: Vec::new(), begin: Cursor::new(0, 0), end: Cursor::new(0, 0) }
    }

    /// Creates an empty deque with `n` chunks already allocated.
    pub fn with_chunks(n: usize) -> Self {
        let mut this = Self::new();
        this.chunks.reserve_exact(n);
        for _ in 0..n {
            this.append_chunk();
        }
        this
    }

    /// Creates a deque holding `count` clones of `value`.
    ///
    /// Chunks are filled front to back, and the last one holds whatever is
    /// left over. A chunk is allocated even when `count` is zero.
    pub fn from_elem(count: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut this = Self::new();
        let mut remaining = count;
        loop {
            let take = remaining.min(CHUNK);
            this.append_chunk();
            for _ in 0..take {
                this.write_back(value.clone());
            }
            remaining -= take;
            if remaining == 0 {
                break;
            }
        }
        this
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end.linear::<CHUNK>() - self.begin.linear::<CHUNK>()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Number of chunks currently allocated.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.chunks.len() * CHUNK
    }

    #[inline]
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: non-empty, so begin lies in [begin, end)
            Some(unsafe { self.slot(self.begin) })
        }
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: non-empty, so begin lies in [begin, end)
            Some(unsafe { self.slot_mut(self.begin) })
        }
    }

    #[inline]
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: non-empty, so the slot before end is live
            Some(unsafe { self.slot(self.last()) })
        }
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.is_empty() {
            None
        } else {
            // SAFETY: non-empty, so the slot before end is live
            Some(unsafe { self.slot_mut(self.last()) })
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            // SAFETY: index < len
            Some(unsafe { self.slot(self.position(index)) })
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            // SAFETY: index < len
            Some(unsafe { self.slot_mut(self.position(index)) })
        } else {
            None
        }
    }

    /// Bounds-checked access. Fails for any `index >= self.len()`.
    #[inline]
    pub fn at(&self, index: usize) -> Result<&T, OutOfRange> {
        let len = self.len();
        self.get(index).ok_or(OutOfRange { index, len })
    }

    #[inline]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, OutOfRange> {
        let len = self.len();
        self.get_mut(index).ok_or(OutOfRange { index, len })
    }

    pub fn push_back(&mut self, value: T) {
        if self.end.chunk == self.chunks.len() {
            self.append_chunk();
        }
        self.write_back(value);
    }

    pub fn push_front(&mut self, value: T) {
        if self.chunks.is_empty() {
            // first element goes mid-chunk so both ends have room
            self.append_chunk();
            let mid = Cursor::new(0, CHUNK / 2);
            self.begin = mid;
            self.end = mid;
            self.write_back(value);
        } else if self.is_empty() {
            self.push_back(value);
        } else {
            if self.begin.is_origin() {
                self.grow_front();
            }
            self.begin.retreat::<CHUNK>();
            self.chunks[self.begin.chunk][self.begin.offset].write(value);
        }
    }

    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.end.retreat::<CHUNK>();
        let slot = &self.chunks[self.end.chunk][self.end.offset];
        // SAFETY: the slot was the last one of the live range, and the end
        // cursor no longer covers it, so it is read exactly once.
        Some(unsafe { slot.assume_init_read() })
    }

    /// Writes into the slot under the end cursor and moves the cursor past
    /// it. The chunk under the end cursor must already be allocated.
    #[inline]
    fn write_back(&mut self, value: T) {
        self.chunks[self.end.chunk][self.end.offset].write(value);
        self.end.advance::<CHUNK>();
    }

    fn append_chunk(&mut self) {
        log::trace!("appending chunk {}", self.chunks.len());
        self.chunks.push(new_chunk());
    }

    /// Triples the chunk map, moving the current chunks into its last third.
    /// Leaves the begin cursor at the start of the old first chunk.
    #[cold]
    fn grow_front(&mut self) {
        let old = self.chunks.len();
        let shift = old * 2;
        log::trace!("tripling chunk map from {} to {} chunks", old, old + shift);

        let mut grown = Vec::with_capacity(old + shift);
        grown.extend((0..shift).map(|_| new_chunk()));
        grown.append(&mut self.chunks);
        self.chunks = grown;

        self.begin.chunk += shift;
        self.end.chunk += shift;
    }

    #[inline]
    fn position(&self, index: usize) -> Cursor {
        Cursor::from_linear::<CHUNK>(self.begin.linear::<CHUNK>() + index)
    }

    /// Cursor of the last live element. Only meaningful when non-empty.
    #[inline]
    fn last(&self) -> Cursor {
        let mut at = self.end;
        at.retreat::<CHUNK>();
        at
    }

    /// # Safety
    /// `at` must lie within `[begin, end)`.
    #[inline]
    unsafe fn slot(&self, at: Cursor) -> &T {
        self.chunks[at.chunk][at.offset].assume_init_ref()
    }

    /// # Safety
    /// `at` must lie within `[begin, end)`.
    #[inline]
    unsafe fn slot_mut(&mut self, at: Cursor) -> &mut T {
        self.chunks[at.chunk][at.offset].assume_init_mut()
    }

    fn live(&self) -> impl Iterator<Item = &T> + '_ {
        // SAFETY: every i < len
        (0..self.len()).map(move |i| unsafe { self.slot(self.position(i)) })
    }
}

impl<T, const CHUNK: usize> Drop for Deque<T, CHUNK> {
    fn drop(&mut self) {
        // keeps dropping the rest if an element's destructor panics
        struct DropGuard<'a, T, const CHUNK: usize>(&'a mut Deque<T, CHUNK>);

        impl<'a, T, const CHUNK: usize> Drop for DropGuard<'a, T, CHUNK> {
            fn drop(&mut self) {
                while self.0.pop_back().is_some() {}
            }
        }

        while let Some(item) = self.pop_back() {
            let guard = DropGuard(self);
            drop(item);
            mem::forget(guard);
        }
    }
}

impl<T, const CHUNK: usize> Default for Deque<T, CHUNK> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, const CHUNK: usize> fmt::Debug for Deque<T, CHUNK> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.live()).finish()
    }
}

impl<T: Clone, const CHUNK: usize> Clone for Deque<T, CHUNK> {
    fn clone(&self) -> Self {
        self.live().cloned().collect()
    }
}

impl<T, const CHUNK: usize> Extend<T> for Deque<T, CHUNK> {
    #[inline]
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for val in iter {
            self.push_back(val);
        }
    }
}

impl<'a, T: 'a + Copy, const CHUNK: usize> Extend<&'a T> for Deque<T, CHUNK> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

impl<T, const CHUNK: usize> FromIterator<T> for Deque<T, CHUNK> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut this = Self::new();
        this.extend(iter);
        this
    }
}

impl<T, const CHUNK: usize> From<Vec<T>> for Deque<T, CHUNK> {
    #[inline]
    fn from(v: Vec<T>) -> Self {
        v.into_iter().collect()
    }
}

impl<T, const CHUNK: usize, const N: usize> From<[T; N]> for Deque<T, CHUNK> {
    #[inline]
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T: PartialEq<U>, U, const C1: usize, const C2: usize> PartialEq<Deque<U, C2>>
    for Deque<T, C1>
{
    fn eq(&self, other: &Deque<U, C2>) -> bool {
        self.len() == other.len() && self.live().zip(other.live()).all(|(a, b)| a == b)
    }
}

impl<T: Eq, const CHUNK: usize> Eq for Deque<T, CHUNK> {}

impl<T: PartialEq<U>, U, const CHUNK: usize> PartialEq<[U]> for Deque<T, CHUNK> {
    fn eq(&self, other: &[U]) -> bool {
        self.len() == other.len() && self.live().zip(other).all(|(a, b)| a == b)
    }
}

impl<T: PartialEq<U>, U, const CHUNK: usize, const N: usize> PartialEq<[U; N]>
    for Deque<T, CHUNK>
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self == other.as_slice()
    }
}

impl<T, const CHUNK: usize> Index<usize> for Deque<T, CHUNK> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("Out of bounds access")
    }
}

impl<T, const CHUNK: usize> IndexMut<usize> for Deque<T, CHUNK> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("Out of bounds access")
    }
}
