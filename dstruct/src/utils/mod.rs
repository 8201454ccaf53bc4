//! Utility functions and helper macros used throughout the crate.
//!
//! - Statistical helpers: mean, median, sample standard deviation, the
//!   Wilcoxon signed-rank test and Benjamini-Hochberg adjustment of
//!   partially missing p-values (feature `tools`).
//! - The shared Rayon [`THREAD_POOL`], sized by the `DSTRUCT_NUM_THREADS`
//!   environment variable.
//! - The builder-style `with_*` method macro.

use once_cell::sync::Lazy;
use rayon::{
    ThreadPool,
    ThreadPoolBuilder,
};

#[cfg(feature = "tools")]
mod stats;
#[cfg(feature = "tools")]
pub use stats::*;

pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var("DSTRUCT_NUM_THREADS")
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

pub fn n_threads() -> usize { THREAD_POOL.current_num_threads() }

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
                self.$field_name = value;
                self
            }
        }
    };
}
