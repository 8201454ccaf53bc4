pub use crate::data_structs::typedef::{
    MaskedSeq,
    PosType,
    ScoreType,
};
pub use crate::data_structs::{
    Combination,
    CombinationSet,
    Group,
    ReactivityTable,
    Region,
    ReplicateLabel,
};
pub use crate::error::DStructError;
#[cfg(feature = "tools")]
pub use crate::io::{
    dscore_writer,
    write_dscores,
    write_records,
    ReportRow,
};
pub use crate::io::{
    read_combinations,
    read_combinations_file,
    read_regions,
    read_table,
    read_tables,
    TableReadOptions,
};
#[cfg(feature = "tools")]
pub use crate::tools::dstruct::{
    dstructome,
    dstructome_with,
    run_unit,
    DScores,
    DStruct,
    DStructConfig,
    DStructRecord,
    DiscoveryMode,
    NotTestedReason,
    Quality,
    RegionTest,
    TestOutcome,
    TestResult,
    Unit,
};
