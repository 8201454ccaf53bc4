use std::io::Write;

use serde::{
    Serialize,
    Serializer,
};

use crate::data_structs::typedef::PosType;
use crate::data_structs::Region;
use crate::error::Result;
use crate::tools::dstruct::{
    DScores,
    DStructRecord,
};

const NA: &str = "NA";

/// One line of the tab-separated result report.
///
/// Pooled records list the starts and ends of all their regions as
/// comma-joined values. Missing values are written as `NA`.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow<'a> {
    pub id:          &'a str,
    pub start:       String,
    pub end:         String,
    #[serde(serialize_with = "serialize_scientific")]
    pub p_value:     Option<f64>,
    #[serde(serialize_with = "serialize_plain")]
    pub effect_size: Option<f64>,
    #[serde(serialize_with = "serialize_scientific")]
    pub fdr:         Option<f64>,
    pub status:      String,
}

impl<'a> From<&'a DStructRecord> for ReportRow<'a> {
    fn from(record: &'a DStructRecord) -> Self {
        let join = |f: fn(&Region) -> PosType| {
            if record.regions.is_empty() {
                NA.to_string()
            }
            else {
                record
                    .regions
                    .iter()
                    .map(|r| f(r).to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            }
        };
        Self {
            id:          &record.id,
            start:       join(Region::start),
            end:         join(Region::end),
            p_value:     record.result.p_value(),
            effect_size: record.result.effect_size,
            fdr:         record.fdr,
            status:      record
                .result
                .reason()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "tested".to_string()),
        }
    }
}

fn serialize_scientific<S>(
    x: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer, {
    match x {
        Some(x) => serializer.serialize_str(&format!("{:e}", x)),
        None => serializer.serialize_str(NA),
    }
}

fn serialize_plain<S>(
    x: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer, {
    match x {
        Some(x) => serializer.serialize_str(&x.to_string()),
        None => serializer.serialize_str(NA),
    }
}

fn tsv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_writer(writer)
}

/// Writes batch records as a tab-separated report with a header.
pub fn write_records<W: Write>(
    writer: W,
    records: &[DStructRecord],
) -> Result<()> {
    let mut writer = tsv_writer(writer);
    for record in records {
        writer.serialize(ReportRow::from(record))?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct DScoreRow<'a> {
    id:         &'a str,
    position:   PosType,
    #[serde(serialize_with = "serialize_plain")]
    within:     Option<f64>,
    #[serde(serialize_with = "serialize_plain")]
    between:    Option<f64>,
    #[serde(serialize_with = "serialize_plain")]
    difference: Option<f64>,
}

/// Writes per-nucleotide d-scores of one transcript. Rows are numbered from
/// `first_position`.
pub fn write_dscores<W: Write>(
    writer: &mut csv::Writer<W>,
    id: &str,
    first_position: PosType,
    dscores: &DScores,
) -> Result<()> {
    let differences = dscores.differences();
    for (i, ((within, between), difference)) in dscores
        .within
        .iter()
        .zip(dscores.between.iter())
        .zip(differences)
        .enumerate()
    {
        writer.serialize(DScoreRow {
            id,
            position: first_position + i as PosType,
            within: *within,
            between: *between,
            difference,
        })?;
    }
    Ok(())
}

/// Tab-separated writer for [`write_dscores`].
pub fn dscore_writer<W: Write>(writer: W) -> csv::Writer<W> { tsv_writer(writer) }
