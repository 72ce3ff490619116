//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for per-entity risk tags (rarely more than 3).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

/// SmallVec sized for per-entity pattern roles (at most 3).
pub type SmallVec3<T> = SmallVec<[T; 3]>;
