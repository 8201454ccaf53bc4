use assert_approx_eq::assert_approx_eq;
use dstruct::prelude::*;
use rstest::*;

mod common;
use common::*;

#[fixture]
fn units() -> Vec<Unit> {
    read_tables(&data_path("multi.tsv"), &long_options())
        .unwrap()
        .into_iter()
        .map(|(id, table)| Unit::new(id, table.unwrap()))
        .collect()
}

/// A table with a single replicate per group cannot form within-group
/// combinations.
fn failing_unit() -> Unit {
    let table = ReactivityTable::try_from_named(
        &["A1", "B1"],
        vec![vec![Some(0.5); 30], vec![Some(0.7); 30]],
    )
    .unwrap();
    Unit::new("single", table)
}

#[rstest]
fn test_long_table(units: Vec<Unit>) {
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].id, "tx1");
    assert_eq!(units[0].table.len(), 120);
    assert_eq!(units[1].id, "tx2");
    assert_eq!(units[1].table.first_position(), 5);
    assert_eq!(units[1].table.full_region(), Some(Region::new(5, 34)));
}

#[rstest]
fn test_dstructome_denovo(mut units: Vec<Unit>) {
    units.push(failing_unit());
    let records = dstructome(&units, &batch_config(), DiscoveryMode::DeNovo);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].id, "tx1");
    assert_eq!(records[0].regions, vec![Region::new(11, 35)]);
    assert_eq!(records[1].regions, vec![Region::new(61, 90)]);

    // BH over 2^-25 and 2^-30.
    assert_approx_eq!(records[0].fdr.unwrap(), 0.5f64.powi(25), 1e-15);
    assert_approx_eq!(records[1].fdr.unwrap(), 0.5f64.powi(29), 1e-15);

    assert_eq!(records[2].id, "single");
    assert!(records[2].regions.is_empty());
    assert!(matches!(
        records[2].result.reason(),
        Some(NotTestedReason::Failed(_))
    ));
    assert_eq!(records[2].fdr, None);
}

#[rstest]
fn test_dstructome_guided(units: Vec<Unit>) -> anyhow::Result<()> {
    let regions = read_regions(
        std::fs::File::open(data_path("regions.tsv"))?,
        b'\t',
    )?;
    let guided_units = regions
        .into_iter()
        .map(|(id, region)| {
            let unit = units
                .iter()
                .find(|u| u.id == id)
                .unwrap();
            unit.clone().with_region(region)
        })
        .collect::<Vec<_>>();

    let records = dstructome(&guided_units, &batch_config(), DiscoveryMode::Guided);
    assert_eq!(records.len(), 3);
    assert_approx_eq!(records[0].result.p_value().unwrap(), 0.5f64.powi(25), 1e-15);
    assert_approx_eq!(records[1].result.effect_size.unwrap(), DENOVO_EFFECTS[1], 1e-9);

    assert_eq!(records[2].regions, vec![Region::new(5, 34)]);
    assert_eq!(
        records[2].result.reason(),
        Some(&NotTestedReason::EvidenceGate)
    );
    assert!(records[2].result.effect_size.unwrap() < 0.0);
    assert_eq!(records[2].fdr, None);
    Ok(())
}

#[rstest]
fn test_denovo_unit_region(units: Vec<Unit>) {
    let unit = units[0].clone().with_region(Region::new(40, 120));
    let tests = run_unit(&unit, &batch_config(), DiscoveryMode::DeNovo).unwrap();
    assert_eq!(tests.len(), 1);
    assert_eq!(tests[0].regions, vec![Region::new(61, 90)]);
}

#[rstest]
fn test_report(units: Vec<Unit>) -> anyhow::Result<()> {
    let records = dstructome(&units, &batch_config(), DiscoveryMode::DeNovo);
    let mut buf = Vec::new();
    write_records(&mut buf, &records)?;
    let text = String::from_utf8(buf)?;
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("tx1\t11\t35\t"));
    assert!(lines[2].ends_with("\ttested"));
    Ok(())
}

#[test]
fn test_malformed_partition() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        "transcript\tposition\tA1\tA2\tB1\nok\t1\t0.1\t0.2\t0.3\nbad\t1\t0.1\t0.2\t0.3\nbad\t3\t0.1\t0.2\t0.3\n",
    )
    .unwrap();
    let tables = read_tables(file.path(), &long_options()).unwrap();
    assert!(tables[0].1.is_ok());
    assert!(matches!(
        tables[1].1,
        Err(DStructError::SchemaViolation(_))
    ));
}
