use clade::render::{DendrogramRenderer, ImageFormat, SvgSurface};
use clade::{format_tree, DataTable, HierarchicalClustering};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Word counts per blog -> correlation clustering -> dendrogram SVG.
    //
    // Usage: cargo run --example blog_dendrogram --features svg -- [blogdata.txt] [out.svg]
    // Without arguments a small built-in table is used.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let table = match args.next() {
        Some(path) => DataTable::from_reader(BufReader::new(File::open(path)?))?,
        None => DataTable::parse(SAMPLE)?,
    };
    let out = PathBuf::from(args.next().unwrap_or_else(|| "blogclust.svg".to_owned()));

    let report = HierarchicalClustering::new().fit_report(&table.rows)?;
    println!(
        "rows={} cols={} distance_evaluations={}",
        table.n_rows(),
        table.n_cols(),
        report.distance_evaluations
    );
    print!("{}", format_tree(&report.root, Some(&table.row_labels[..])));

    let format = ImageFormat::from_path(&out).unwrap_or(ImageFormat::Svg);
    let mut surface = SvgSurface::new();
    DendrogramRenderer::new().render(&report.root, &table.row_labels, &mut surface, &out, format)?;
    println!("wrote {}", out.display());

    Ok(())
}

const SAMPLE: &str = "Blog\tgame\tplay\tscore\tvote\tparty\telection\tcode\trust\n\
                      Sports Daily\t9\t8\t7\t0\t1\t0\t0\t0\n\
                      The Ballot\t0\t1\t0\t8\t9\t9\t0\t1\n\
                      Box Score\t8\t9\t6\t1\t0\t0\t1\t0\n\
                      Capitol Notes\t1\t0\t0\t9\t7\t8\t0\t0\n\
                      Systems Weekly\t0\t1\t0\t0\t1\t0\t9\t8\n\
                      Borrow Checked\t1\t0\t1\t0\t0\t1\t7\t9\n";
