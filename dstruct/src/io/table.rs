use std::fs::File;
use std::io::Read;
use std::path::Path;

use itertools::Itertools;
use log::debug;
use polars::prelude::*;
use serde::Deserialize;

use crate::data_structs::typedef::PosType;
use crate::data_structs::{
    Combination,
    CombinationSet,
    ReactivityTable,
    Region,
};
use crate::error::Result;
use crate::schema_bail;

#[derive(Debug, Clone)]
pub struct TableReadOptions {
    pub separator:       u8,
    /// Column holding the transcript id. Without it the file is one table.
    pub id_column:       Option<String>,
    /// Column holding 1-based positions, which must increase by one.
    pub position_column: Option<String>,
    /// Strings read as unavailable values.
    pub null_values:     Vec<String>,
}

impl Default for TableReadOptions {
    fn default() -> Self {
        Self {
            separator:       b'\t',
            id_column:       None,
            position_column: None,
            null_values:     vec!["NA".into(), "NaN".into(), "nan".into(), "".into()],
        }
    }
}

impl TableReadOptions {
    crate::with_field_fn!(separator, u8);
    crate::with_field_fn!(id_column, Option<String>);
    crate::with_field_fn!(position_column, Option<String>);

    fn csv_options(&self) -> CsvReadOptions {
        let nulls = self
            .null_values
            .iter()
            .map(|s| PlSmallStr::from(s.as_str()))
            .collect_vec();
        CsvReadOptions::default()
            .with_has_header(true)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(self.separator)
                    .with_null_values(Some(NullValues::AllColumns(nulls))),
            )
    }
}

/// Reads a delimited file into a [`DataFrame`].
pub fn read_dataframe(
    path: &Path,
    options: &TableReadOptions,
) -> Result<DataFrame> {
    let df = options
        .csv_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    debug!("Read {} rows from {}", df.height(), path.display());
    Ok(df)
}

/// Converts a data frame with replicate columns into a table. The id column
/// is ignored; the position column, if set, defines the coordinates.
pub fn table_from_dataframe(
    df: &DataFrame,
    options: &TableReadOptions,
) -> Result<ReactivityTable> {
    let skip = [options.id_column.as_deref(), options.position_column.as_deref()];
    let names = df
        .get_column_names()
        .into_iter()
        .map(|n| n.as_str())
        .filter(|n| !skip.contains(&Some(*n)))
        .map(str::to_string)
        .collect_vec();

    let columns = names
        .iter()
        .map(|name| {
            let col = df.column(name)?.cast(&DataType::Float64)?;
            Ok(col.f64()?.into_iter().collect_vec())
        })
        .collect::<Result<Vec<_>>>()?;
    let table = ReactivityTable::try_from_named(&names, columns)?;

    match options.position_column.as_deref() {
        Some(pos_col) => {
            let first = first_position(df, pos_col)?;
            Ok(table.with_first_position(first))
        },
        None => Ok(table),
    }
}

fn first_position(
    df: &DataFrame,
    pos_col: &str,
) -> Result<PosType> {
    let col = df.column(pos_col)?.cast(&DataType::Int64)?;
    let positions = col.i64()?.into_iter().collect_vec();
    let Some(Some(first)) = positions.first().copied() else {
        schema_bail!("position column '{}' is empty or starts with a missing value", pos_col)
    };
    if first < 1 {
        schema_bail!("positions are 1-based, got {}", first)
    }
    let last = first + positions.len() as i64 - 1;
    if last > PosType::MAX as i64 {
        schema_bail!("position {} exceeds the maximum of {}", last, PosType::MAX)
    }
    for (i, pos) in positions.iter().enumerate() {
        if *pos != Some(first + i as i64) {
            schema_bail!(
                "positions must be consecutive: expected {} at row {}, found {:?}",
                first + i as i64,
                i + 1,
                pos
            )
        }
    }
    Ok(first as PosType)
}

/// Reads a single table from `path`.
pub fn read_table(
    path: &Path,
    options: &TableReadOptions,
) -> Result<ReactivityTable> {
    table_from_dataframe(&read_dataframe(path, options)?, options)
}

/// Reads one or more tables from `path`.
///
/// With [`TableReadOptions::id_column`] set, the file is partitioned by id
/// keeping the order of first appearance; otherwise the file stem is used as
/// the id of the single table. Tables are returned as `Result`s so that a
/// malformed transcript does not hide the others.
pub fn read_tables(
    path: &Path,
    options: &TableReadOptions,
) -> Result<Vec<(String, Result<ReactivityTable>)>> {
    let df = read_dataframe(path, options)?;
    match options.id_column.as_deref() {
        None => {
            let id = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            Ok(vec![(id, table_from_dataframe(&df, options))])
        },
        Some(id_col) => {
            df.partition_by_stable([id_col], true)?
                .into_iter()
                .map(|part| {
                    let ids = part.column(id_col)?.cast(&DataType::String)?;
                    let id = ids
                        .str()?
                        .get(0)
                        .unwrap_or_default()
                        .to_string();
                    let table = table_from_dataframe(&part, options);
                    Ok((id, table))
                })
                .collect()
        },
    }
}

#[derive(Debug, Deserialize)]
struct RegionRow {
    id:    String,
    start: PosType,
    end:   PosType,
}

/// Reads user-defined regions from a delimited file with an `id`, `start`
/// and `end` header.
pub fn read_regions<R: Read>(
    reader: R,
    separator: u8,
) -> Result<Vec<(String, Region)>> {
    csv::ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(true)
        .comment(Some(b'#'))
        .from_reader(reader)
        .deserialize::<RegionRow>()
        .map(|row| {
            let row = row?;
            Ok((row.id, Region::try_new(row.start, row.end)?))
        })
        .collect()
}

/// Reads a combination set, one combination per line. Labels may be
/// separated by the delimiter, commas or whitespace.
pub fn read_combinations<R: Read>(
    reader: R,
    separator: u8,
) -> Result<CombinationSet> {
    let combs = csv::ReaderBuilder::new()
        .delimiter(separator)
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader)
        .records()
        .map(|record| {
            let record = record?;
            record.iter().join(",").parse::<Combination>()
        })
        .collect::<Result<Vec<_>>>()?;
    CombinationSet::try_new(combs)
}

/// Opens `path` and reads a combination set from it.
pub fn read_combinations_file(
    path: &Path,
    separator: u8,
) -> Result<CombinationSet> {
    read_combinations(File::open(path)?, separator)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::data_structs::Group;
    use crate::error::DStructError;

    fn write_tmp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_single_table() {
        let file = write_tmp("A1\tA2\tB1\n0.1\t0.2\t0.3\nNA\t0.5\t0.6\n0.7\t-0.1\t0.9\n");
        let table = read_table(file.path(), &TableReadOptions::default()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.reps(Group::A), 2);
        assert_eq!(table.reps(Group::B), 1);
        let a1 = table.column(&"A1".parse().unwrap()).unwrap();
        assert_eq!(a1, &[Some(0.1), None, Some(0.7)]);
        let a2 = table.column(&"A2".parse().unwrap()).unwrap();
        assert_eq!(a2[2], Some(0.0));
    }

    #[test]
    fn test_read_partitioned_tables() {
        let file = write_tmp(
            "transcript\tpos\tA1\tB1\tA2\n\
             tx2\t5\t0.1\t0.2\t0.3\n\
             tx2\t6\t0.4\t0.5\t0.6\n\
             tx1\t1\t0.7\t0.8\t0.9\n\
             tx3\t1\t0.7\t0.8\t0.9\n\
             tx3\t3\t0.7\t0.8\t0.9\n",
        );
        let options = TableReadOptions::default()
            .with_id_column(Some("transcript".into()))
            .with_position_column(Some("pos".into()));
        let tables = read_tables(file.path(), &options).unwrap();
        let ids = tables
            .iter()
            .map(|(id, _)| id.as_str())
            .collect_vec();
        assert_eq!(ids, vec!["tx2", "tx1", "tx3"]);

        let tx2 = tables[0].1.as_ref().unwrap();
        assert_eq!(tx2.len(), 2);
        assert_eq!(tx2.first_position(), 5);
        assert_eq!(tx2.full_region(), Some(Region::new(5, 6)));

        assert!(matches!(
            tables[2].1,
            Err(DStructError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_read_bad_header() {
        let file = write_tmp("A1\tX1\tB1\n0.1\t0.2\t0.3\n");
        assert!(matches!(
            read_table(file.path(), &TableReadOptions::default()),
            Err(DStructError::SchemaViolation(_))
        ));
    }

    #[rstest]
    #[case::last_row_overflows(4_294_967_295)]
    #[case::first_row_overflows(5_000_000_000)]
    fn test_read_position_overflow(#[case] first: i64) {
        let file = write_tmp(&format!(
            "pos\tA1\tB1\n{}\t0.1\t0.2\n{}\t0.3\t0.4\n",
            first,
            first + 1
        ));
        let options = TableReadOptions::default().with_position_column(Some("pos".into()));
        assert!(matches!(
            read_table(file.path(), &options),
            Err(DStructError::SchemaViolation(_))
        ));
    }

    #[test]
    fn test_read_regions() {
        let data = "id\tstart\tend\n# comment\ntx1\t10\t20\ntx2\t5\t5\n";
        let regions = read_regions(data.as_bytes(), b'\t').unwrap();
        assert_eq!(
            regions,
            vec![
                ("tx1".to_string(), Region::new(10, 20)),
                ("tx2".to_string(), Region::new(5, 5)),
            ]
        );
        assert!(read_regions("id\tstart\tend\ntx\t9\t3\n".as_bytes(), b'\t').is_err());
    }

    #[test]
    fn test_read_combinations() {
        let set = read_combinations("A1\tA2\tA3\nA3,B1,B2\n".as_bytes(), b'\t').unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.arity(), 3);
        assert!(read_combinations("A1\tA2\nA3\tB1\tB2\n".as_bytes(), b'\t').is_err());
        assert!(read_combinations("".as_bytes(), b'\t').is_err());
    }
}
