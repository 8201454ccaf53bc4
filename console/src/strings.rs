macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod io {
    define_strings! {
        INPUT =
            "Paths to reactivity tables. Columns are named A1..An and B1..Bm \
            for the replicates of the two groups. Wildcards are expanded.";
        OUTPUT =
            "Prefix for the generated output files.";
        SEPARATOR =
            "Field separator of the input tables.";
        ID_COLUMN =
            "Column holding transcript ids. Without it every file is a single \
            transcript named after the file.";
        POSITION_COLUMN =
            "Column holding 1-based nucleotide positions. Positions of each \
            transcript must be consecutive.";
        DSCORES =
            "Also write per-nucleotide within- and between-group d-scores to \
            <OUTPUT>.dscores.tsv.";
    }
}

pub mod analysis {
    define_strings! {
        BATCHES =
            "Replicates sharing a number were processed in the same batch. \
            Between-group combinations never contain two replicates of one batch.";
        MIN_LENGTH =
            "Minimum length of a de novo region. Also the minimum number of \
            nucleotides with both d-scores when --check-nucs is set.";
        QUALITY =
            "Maximum mean within-group d-score of a tested region. Defaults to 0.5 \
            when both groups have at least two replicates and 0.2 otherwise.";
        EVIDENCE =
            "Minimum median of between- minus within-group d-score of a tested region.";
        SIGNAL_STRENGTH =
            "Minimum highest mean reactivity of a tested region. Not checked by default.";
        CHECK_NUCS =
            "Skip regions with fewer than --min-length nucleotides where both \
            d-scores are available.";
        WITHIN =
            "File with within-group combinations, one per line, e.g. 'A1 A2 A3'.";
        BETWEEN =
            "File with between-group combinations, one per line, e.g. 'A3 B1 B2'.";
        PMETHOD =
            "Multiple testing correction applied to the p-values of all tested regions.";
    }
}

pub mod denovo {
    define_strings! {
        GAP =
            "Maximum distance between flagged nucleotides of one region. \
            1 requires strictly contiguous runs.";
        POOLED =
            "Test all regions of a transcript together instead of one by one.";
    }
}

pub mod guided {
    define_strings! {
        REGIONS =
            "File with 'id', 'start' and 'end' columns. Each row is tested as one \
            region. Without it every transcript is tested as a whole.";
    }
}

pub mod utils {
    define_strings! {
        THREADS =
            "Number of worker threads. Defaults to the number of logical cores.";
        VERBOSE =
            "Print debug messages.";
        PROGRESS =
            "Display a progress bar.";
    }
}
