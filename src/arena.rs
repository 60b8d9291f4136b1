use super::chunk::{Chunk, ChunkList};
use super::utils::array_size;
use super::{ArenaError, DEFAULT_ARENA_SIZE, MAX_NUM_CHUNKS};
use core::fmt;
use tracing::{debug, trace, warn};

/// Handle to an allocation: the byte offset of its first byte inside the
/// arena buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaPtr(usize);

impl ArenaPtr {
    pub const fn from_offset(offset: usize) -> Self {
        Self(offset)
    }

    #[inline]
    pub const fn offset(self) -> usize {
        self.0
    }
}

impl fmt::Display for ArenaPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// What `Arena::release` did with the returned range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// The range joined the free chunks on both sides.
    MergedBoth,
    /// The range extended the free chunk ending where it starts.
    MergedBefore,
    /// The range extended the free chunk starting where it ends.
    MergedAfter,
    /// The range became a new free chunk.
    Inserted,
    /// The free list was full; this many bytes are no longer tracked.
    Leaked(usize),
    /// The pointer was not a live allocation.
    Ignored,
}

/// First-fit allocator over a fixed buffer of `C` bytes.
///
/// Every byte of the buffer is described by a chunk in either the free list
/// or the used list; both lists hold at most `M` chunks. The buffer lives
/// inside the value and never grows.
pub struct Arena<const C: usize = DEFAULT_ARENA_SIZE, const M: usize = MAX_NUM_CHUNKS> {
    mem: [u8; C],
    free_chunks: ChunkList<M>,
    used_chunks: ChunkList<M>,
    leaked: usize,
}

impl<const C: usize, const M: usize> Arena<C, M> {
    /// Returned for zero-sized requests. It sits one past the end of the
    /// buffer, so no live allocation can ever share it.
    pub const DANGLING: ArenaPtr = ArenaPtr(C);

    pub fn new() -> Self {
        let mut arena = Self {
            mem: [0x00; C],
            free_chunks: ChunkList::new(),
            used_chunks: ChunkList::new(),
            leaked: 0,
        };
        arena.init();
        arena
    }

    /// Forgets every allocation and makes the whole buffer one free chunk.
    pub fn init(&mut self) {
        self.free_chunks.reset();
        self.used_chunks.reset();
        self.leaked = 0;

        if let Err(err) = self.free_chunks.add(0, C) {
            warn!(capacity = C, %err, "free list cannot hold the initial chunk");
            self.leaked = C;
        }
    }

    /// Carves `size` bytes out of the first free chunk large enough to hold
    /// them.
    pub fn allocate(&mut self, size: usize) -> Result<ArenaPtr, ArenaError> {
        if size == 0 {
            return Ok(Self::DANGLING);
        }

        let Some(index) = self.free_chunks.iter().position(|chunk| chunk.size >= size) else {
            trace!(size, "no free chunk large enough");
            return Err(ArenaError::AllocationFailed { requested: size });
        };

        let start = self.free_chunks.as_slice()[index].start;

        // the free list is only touched once the used entry is in place
        if let Err(err) = self.used_chunks.add(start, size) {
            trace!(size, %err, "used list is full");
            return Err(ArenaError::AllocationFailed { requested: size });
        }

        let free_chunk = &mut self.free_chunks.as_mut_slice()[index];
        free_chunk.start += size;
        free_chunk.size -= size;

        trace!(start, size, "allocated");
        Ok(ArenaPtr(start))
    }

    /// Gives an allocation back to the free list, merging it with the free
    /// chunks directly before and after it.
    ///
    /// Pointers that are not live allocations are ignored.
    pub fn release(&mut self, ptr: ArenaPtr) -> Release {
        let Some(used) = self.used_chunks.remove(ptr.offset()) else {
            trace!(%ptr, "release of untracked pointer ignored");
            return Release::Ignored;
        };

        let mut before = None;
        let mut after = None;
        for (index, chunk) in self.free_chunks.iter().enumerate() {
            if chunk.start == used.end() {
                after = Some(index);
            }
            if chunk.end() == used.start {
                before = Some(index);
            }
        }

        let free = self.free_chunks.as_mut_slice();
        let outcome = match (before, after) {
            (Some(before), Some(after)) => {
                let merged = used.size + free[after].size;
                free[before].size += merged;
                self.free_chunks.remove_at(after);
                Release::MergedBoth
            }
            (Some(before), None) => {
                free[before].size += used.size;
                Release::MergedBefore
            }
            (None, Some(after)) => {
                free[after].start = used.start;
                free[after].size += used.size;
                Release::MergedAfter
            }
            (None, None) => match self.free_chunks.add(used.start, used.size) {
                Ok(_) => Release::Inserted,
                Err(err) => {
                    warn!(
                        start = used.start,
                        size = used.size,
                        %err,
                        "free list full, range leaked"
                    );
                    self.leaked += used.size;
                    Release::Leaked(used.size)
                }
            },
        };

        trace!(start = used.start, size = used.size, ?outcome, "released");
        outcome
    }

    /// Allocates `count * elem_size` bytes and zeroes them.
    pub fn allocate_zeroed(
        &mut self,
        count: usize,
        elem_size: usize,
    ) -> Result<ArenaPtr, ArenaError> {
        let size = array_size(count, elem_size)?;
        let ptr = self.allocate(size)?;

        if let Some(bytes) = self.get_mut(ptr) {
            bytes.fill(0x00);
        }

        Ok(ptr)
    }

    /// Moves an allocation into a fresh block of `size` bytes.
    ///
    /// `None` and [`Self::DANGLING`] behave like [`Self::allocate`]. The old
    /// block is released only once the new one exists; on failure it is left
    /// exactly as it was.
    pub fn reallocate(
        &mut self,
        ptr: Option<ArenaPtr>,
        size: usize,
    ) -> Result<ArenaPtr, ArenaError> {
        let ptr = match ptr {
            Some(ptr) if ptr != Self::DANGLING => ptr,
            _ => return self.allocate(size),
        };

        let old: Chunk = *self
            .used_chunks
            .get(ptr.offset())
            .ok_or(ArenaError::InvalidPointer(ptr))?;

        let new = self.allocate(size)?;

        let len = old.size.min(size);
        if len > 0 {
            self.mem.copy_within(old.start..old.start + len, new.offset());
        }

        self.release(ptr);
        Ok(new)
    }

    /// [`Self::reallocate`] to `count * elem_size` bytes.
    pub fn reallocate_array(
        &mut self,
        ptr: Option<ArenaPtr>,
        count: usize,
        elem_size: usize,
    ) -> Result<ArenaPtr, ArenaError> {
        let size = array_size(count, elem_size)?;
        self.reallocate(ptr, size)
    }

    /// Bytes of a live allocation.
    pub fn get(&self, ptr: ArenaPtr) -> Option<&[u8]> {
        if ptr == Self::DANGLING {
            return Some(&self.mem[C..]);
        }

        let chunk = self.used_chunks.get(ptr.offset())?;
        Some(&self.mem[chunk.start..chunk.end()])
    }

    pub fn get_mut(&mut self, ptr: ArenaPtr) -> Option<&mut [u8]> {
        if ptr == Self::DANGLING {
            return Some(&mut self.mem[C..]);
        }

        let chunk = *self.used_chunks.get(ptr.offset())?;
        Some(&mut self.mem[chunk.start..chunk.end()])
    }

    /// Size of a live allocation.
    pub fn size_of(&self, ptr: ArenaPtr) -> Option<usize> {
        if ptr == Self::DANGLING {
            return Some(0);
        }
        self.used_chunks.get(ptr.offset()).map(|chunk| chunk.size)
    }

    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        C
    }

    pub fn free_chunks(&self) -> &ChunkList<M> {
        &self.free_chunks
    }

    pub fn used_chunks(&self) -> &ChunkList<M> {
        &self.used_chunks
    }

    pub fn free_bytes(&self) -> usize {
        self.free_chunks.total_size()
    }

    pub fn used_bytes(&self) -> usize {
        self.used_chunks.total_size()
    }

    /// Bytes dropped by releases that found the free list full. Only
    /// `init` gets them back.
    pub fn leaked_bytes(&self) -> usize {
        self.leaked
    }

    /// Logs both chunk lists at debug level.
    pub fn dump(&self) {
        debug!("arena state\n{}", self);
    }
}

impl<const C: usize, const M: usize> Default for Arena<C, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize, const M: usize> fmt::Debug for Arena<C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &C)
            .field("free_chunks", &self.free_chunks)
            .field("used_chunks", &self.used_chunks)
            .field("leaked", &self.leaked)
            .finish()
    }
}

impl<const C: usize, const M: usize> fmt::Display for Arena<C, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// Arena debug ----------------------------------------------//")?;
        write!(f, "Free {}", self.free_chunks)?;
        write!(f, "Used {}", self.used_chunks)?;
        writeln!(f, "// ----------------------------------------------------------//")
    }
}
