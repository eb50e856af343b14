//! Greeting: the classic two-string list-stack walk.
//!
//! Demonstrates:
//!   1. Building a stack over a fixed 500-byte buffer (over-declared as 1000,
//!      which is clamped with a warning)
//!   2. Reserving blank records and filling them in place
//!   3. Walking the chain with start / is_end / head / tail
//!   4. Running out of space, then popping to make room
//!
//! Run with:
//!   cargo run --example greeting
//!
//! Set `RUST_LOG=warn` (the default) to see diagnostics, `RUST_LOG=off` to hide them.

use liststack::{ListStack, ListStackError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const HELLO_WORLD: &[u8] = b"Hello World.   \0";
const GREET: &[u8] = b"How are you today? \0";

fn main() -> Result<(), ListStackError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();

    println!("Pointer size is: {}", std::mem::size_of::<usize>());

    let mut mem = [0u8; 500];
    let mut stack = ListStack::new(&mut mem[..], 1000)?;

    stack.push_blank(GREET.len())?.copy_from_slice(GREET);
    stack.push_blank(HELLO_WORLD.len())?.copy_from_slice(HELLO_WORLD);

    let mut line = String::new();
    let mut i = stack.start();
    while !i.is_end() {
        if let Some(payload) = i.head() {
            line.push_str(&String::from_utf8_lossy(until_nul(payload)));
        }
        i = i.tail();
    }
    println!("{line}");

    // Fill the rest of the region, then recover by popping.
    let mut pushed = 0usize;
    while stack.push(GREET).is_ok() {
        pushed += 1;
    }
    println!(
        "pushed {pushed} more records; {} bytes used of {}",
        stack.used(),
        stack.declared_size()
    );
    while stack.len() > 2 {
        stack.pop();
    }
    println!("back to {} records", stack.len());
    Ok(())
}

fn until_nul(bytes: &[u8]) -> &[u8] {
    bytes
        .iter()
        .position(|&b| b == 0)
        .map_or(bytes, |end| &bytes[..end])
}
