//! Replays a small allocate/release session with logging enabled.
//!
//! Run with `RUST_LOG=trace cargo run --example basic` to see every carve
//! and merge.

use micro_arena::{Arena, Release};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("debug".parse().unwrap()))
        .with_target(false)
        .init();

    let mut arena: Arena = Arena::new();
    arena.dump();

    let ints = arena.allocate_zeroed(10, 4).unwrap();
    let chars = arena.allocate(10).unwrap();
    let blob = arena.allocate(69).unwrap();
    println!(
        "ints = {ints}, chars = {chars}, blob = {blob}, version = {}.{}",
        micro_arena::major(),
        micro_arena::minor()
    );
    arena.dump();

    for ptr in [ints, blob, chars] {
        let outcome = arena.release(ptr);
        println!("release {ptr}: {outcome:?}");
        assert_ne!(outcome, Release::Ignored);
    }

    // the three releases coalesce back into the original chunk
    assert_eq!(arena.free_chunks().len(), 1);
    assert!(arena.used_chunks().is_empty());
    arena.dump();
}
