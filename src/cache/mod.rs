// Cache module.
// Short-TTL caching of GitHub API results: a transient in-memory map and a
// persistent variant backed by the platform cache directory.

pub mod disk;
pub mod memory;

pub use disk::{DEFAULT_DISK_TTL, DiskCache};
pub use memory::{CacheEntry, DEFAULT_MEMORY_TTL, MemoryCache};
