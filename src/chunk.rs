use super::CapacityExceeded;
use core::fmt;

/// A contiguous byte range of the backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chunk {
    pub start: usize,
    pub size: usize,
}

impl Chunk {
    pub const fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// One past the last byte of the chunk.
    #[inline]
    pub const fn end(&self) -> usize {
        self.start + self.size
    }

    /// Empty chunks never overlap anything.
    #[inline]
    pub const fn overlaps(&self, other: &Chunk) -> bool {
        self.size != 0
            && other.size != 0
            && self.start < other.end()
            && other.start < self.end()
    }
}

/// Bounded list of chunks, stored inline.
///
/// Entries are kept dense and in insertion order: `remove` shifts the tail
/// down by one slot instead of leaving holes, so iteration always walks
/// `len` contiguous entries.
pub struct ChunkList<const M: usize> {
    chunks: [Chunk; M],
    len: usize,
}

impl<const M: usize> ChunkList<M> {
    pub const fn new() -> Self {
        Self {
            chunks: [Chunk::new(0, 0); M],
            len: 0,
        }
    }

    /// Appends a chunk and hands back a reference to the stored entry.
    ///
    /// The reference borrows the list, so it cannot outlive a later
    /// `remove` or `reset`.
    pub fn add(&mut self, start: usize, size: usize) -> Result<&mut Chunk, CapacityExceeded> {
        if self.len + 1 > M {
            return Err(CapacityExceeded { capacity: M });
        }

        self.chunks[self.len] = Chunk::new(start, size);
        self.len += 1;

        Ok(&mut self.chunks[self.len - 1])
    }

    pub fn get(&self, start: usize) -> Option<&Chunk> {
        self.as_slice().iter().find(|chunk| chunk.start == start)
    }

    pub fn get_mut(&mut self, start: usize) -> Option<&mut Chunk> {
        self.as_mut_slice()
            .iter_mut()
            .find(|chunk| chunk.start == start)
    }

    /// Index of the first entry starting at `start`.
    pub fn position(&self, start: usize) -> Option<usize> {
        self.as_slice()
            .iter()
            .position(|chunk| chunk.start == start)
    }

    /// Removes the first entry starting at `start`. Does nothing if there is
    /// no such entry.
    pub fn remove(&mut self, start: usize) -> Option<Chunk> {
        let index = self.position(start)?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Chunk> {
        if index >= self.len {
            return None;
        }

        let removed = self.chunks[index];

        // shift the tail down to keep the entries dense
        self.chunks.copy_within(index + 1..self.len, index);
        self.len -= 1;

        Some(removed)
    }

    /// Forgets every entry. Slots are not cleared.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == M
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        M
    }

    pub fn as_slice(&self) -> &[Chunk] {
        &self.chunks[..self.len]
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [Chunk] {
        &mut self.chunks[..self.len]
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Chunk> {
        self.as_slice().iter()
    }

    /// Sum of the sizes of all entries.
    pub fn total_size(&self) -> usize {
        self.iter().map(|chunk| chunk.size).sum()
    }
}

impl<const M: usize> Default for ChunkList<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, const M: usize> IntoIterator for &'a ChunkList<M> {
    type Item = &'a Chunk;
    type IntoIter = core::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<const M: usize> fmt::Debug for ChunkList<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<const M: usize> fmt::Display for ChunkList<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Chunk list len: {}", self.len)?;
        for chunk in self {
            writeln!(f, "- start = {:#x}, size = {}", chunk.start, chunk.size)?;
        }
        Ok(())
    }
}
