//! Core data structures shared by every analysis stage.
//!
//! - [`ReactivityTable`]: per-nucleotide reactivities of all replicates of
//!   one transcript, with a validated label → column map.
//! - [`ReplicateLabel`] and [`Group`]: typed `A1`/`B2` style column labels.
//! - [`Combination`] and [`CombinationSet`]: replicate regroupings used for
//!   the within- and between-group dissimilarity estimates.
//! - [`Region`]: closed interval of nucleotide positions.
//! - [`typedef`]: aliases for positions, scores and masked sequences.

mod combination;
mod region;
mod table;
pub mod typedef;

#[cfg(test)]
mod tests;

pub use combination::{
    Combination,
    CombinationSet,
};
pub use region::Region;
pub use table::{
    Group,
    ReactivityTable,
    ReplicateLabel,
};
