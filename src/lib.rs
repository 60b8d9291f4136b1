//! First-fit allocator that serves `malloc`/`free`/`calloc`/`realloc` style
//! requests out of a single fixed buffer.
//!
//! ```
//! use micro_arena::Arena;
//!
//! let mut arena: Arena = Arena::new();
//!
//! let ptr = arena.allocate(4 * 10).unwrap();
//! arena.get_mut(ptr).unwrap()[0] = 42;
//!
//! arena.release(ptr);
//! assert_eq!(arena.free_bytes(), arena.capacity());
//! ```

mod arena;
mod chunk;
mod error;
mod spin_lock;
mod utils;

pub use arena::{Arena, ArenaPtr, Release};
pub use chunk::{Chunk, ChunkList};
pub use error::{ArenaError, CapacityExceeded};
pub use spin_lock::{Guard, SharedArena, SpinLock};

/// Default size in bytes of the arena buffer.
pub const DEFAULT_ARENA_SIZE: usize = 4096;

/// Default number of chunks each of the free and used lists can track.
pub const MAX_NUM_CHUNKS: usize = 1024;

pub const MAJOR: u32 = 0;
pub const MINOR: u32 = 1;
pub const VERSION: u32 = (MAJOR << 8) | MINOR;

pub const fn major() -> u32 {
    MAJOR
}

pub const fn minor() -> u32 {
    MINOR
}

pub const fn version() -> u32 {
    VERSION
}
