// File: crates/booklet-demo/src/main.rs
// Summary: Demo loads a stats CSV, computes one value axis per series group and prints/exports the results.

use anyhow::{Context, Result};
use booklet_axis::{
    compute_axis_bounds_traced, derive_axis_stats, AxisOptions, AxisPolicy, ChartAxis, DebugRecord, LabelStyle,
    ManualScaleStore, NoopSink, Series, StatDescriptor,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: booklet-axis-demo <stats.csv> [--policy p.toml] [--overrides o.json] [--json out.json] [--trace] [--verbose]";

#[derive(Debug, Default)]
struct Args {
    input: Option<String>,
    policy: Option<PathBuf>,
    overrides: Option<PathBuf>,
    json: Option<PathBuf>,
    trace: bool,
    verbose: bool,
}

/// One statistic as read from the CSV, before axis derivation.
struct LoadedStat {
    name: String,
    stat: StatDescriptor,
}

fn main() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let raw = args.input.as_deref().unwrap_or("crates/booklet-demo/data/sample_stats.csv");
    let (path, used_alt) = resolve_path(raw)?;
    println!("Using input file: {}", path.display());
    if used_alt {
        println!("  (extension swapped between .csv/.cvs)");
    }

    let policy = match &args.policy {
        Some(p) => AxisPolicy::load(p).with_context(|| format!("failed to load policy '{}'", p.display()))?,
        None => AxisPolicy::default(),
    };
    let store = match &args.overrides {
        Some(p) => ManualScaleStore::load(p).with_context(|| format!("failed to load overrides '{}'", p.display()))?,
        None => ManualScaleStore::new(),
    };
    if !store.is_empty() {
        tracing::info!(charts = store.len(), "loaded manual scale overrides");
    }

    let stats = load_stats_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    if stats.is_empty() {
        anyhow::bail!("no statistics loaded; check the stat/value headers.");
    }
    println!("Loaded {} statistics", stats.len());

    let mut exported = Vec::new();
    for loaded in &stats {
        for (index, axis_stat) in derive_axis_stats(&loaded.stat).iter().enumerate() {
            let axis_key = format!("y{index}");
            let mut options = AxisOptions::new().with_policy(policy);
            let manual = store.apply_to(&loaded.name, &axis_key, &mut options);

            let mut records: Vec<DebugRecord> = Vec::new();
            let bounds = if args.trace {
                compute_axis_bounds_traced(axis_stat, &options, &mut records)
            } else {
                compute_axis_bounds_traced(axis_stat, &options, &mut NoopSink)
            };
            let style = if axis_stat.is_percent { LabelStyle::percent() } else { LabelStyle::default() };
            let axis = ChartAxis::from_bounds(&bounds, style);

            println!(
                "{} [{}]{}: [{}, {}] ticks {} -> {}",
                loaded.name,
                axis_key,
                if manual { " (manual)" } else { "" },
                bounds.min,
                bounds.max,
                bounds.ticks.len(),
                axis.labels.join(" | ")
            );
            for record in &records {
                println!("    {}", serde_json::to_string(record)?);
            }

            exported.push(serde_json::json!({
                "stat": loaded.name,
                "axis": axis_key,
                "manual": manual,
                "bounds": bounds,
                "chart_axis": axis,
            }));
        }
    }

    if let Some(out) = &args.json {
        if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(&exported)?;
        std::fs::write(out, text).with_context(|| format!("writing {}", out.display()))?;
        println!("Wrote {}", out.display());
    }

    Ok(())
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        let mut value = |flag: &str| it.next().with_context(|| format!("{flag} needs a value\n{USAGE}"));
        match arg.as_str() {
            "--policy" => args.policy = Some(PathBuf::from(value("--policy")?)),
            "--overrides" => args.overrides = Some(PathBuf::from(value("--overrides")?)),
            "--json" => args.json = Some(PathBuf::from(value("--json")?)),
            "--trace" => args.trace = true,
            "--verbose" | "-v" => args.verbose = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            flag if flag.starts_with("--") => anyhow::bail!("unknown option {flag}\n{USAGE}"),
            other if args.input.is_none() => args.input = Some(other.to_string()),
            other => anyhow::bail!("unexpected argument {other}\n{USAGE}"),
        }
    }
    Ok(args)
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}

#[derive(Default)]
struct StatRows {
    is_percent: bool,
    upside_down: bool,
    min: Option<f64>,
    max: Option<f64>,
    /// Series name -> (date, row order, value).
    series: BTreeMap<String, Vec<(Option<NaiveDate>, usize, Option<f64>)>>,
}

/// Load a long-format stats sheet: one row per (stat, series, date) sample.
fn load_stats_csv(path: &Path) -> Result<Vec<LoadedStat>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect::<Vec<_>>();
    tracing::debug!(?headers, "csv headers");

    let idx = |names: &[&str]| -> Option<usize> { headers.iter().position(|h| names.contains(&h.as_str())) };

    let i_stat = idx(&["stat", "statistic", "name"]).context("missing 'stat' column")?;
    let i_value = idx(&["value", "val", "y"]).context("missing 'value' column")?;
    let i_date = idx(&["date", "week", "period"]);
    let i_series = idx(&["series", "line"]);
    let i_percent = idx(&["percent", "is_percent"]);
    let i_upside = idx(&["upside_down", "reversed"]);
    let i_min = idx(&["min"]);
    let i_max = idx(&["max"]);

    let mut order: Vec<String> = Vec::new();
    let mut grouped: BTreeMap<String, StatRows> = BTreeMap::new();

    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let cell = |i: Option<usize>| i.and_then(|ix| rec.get(ix)).map(str::trim).unwrap_or("");
        let name = cell(Some(i_stat));
        if name.is_empty() {
            continue;
        }
        if !grouped.contains_key(name) {
            order.push(name.to_string());
        }
        let entry = grouped.entry(name.to_string()).or_default();
        entry.is_percent |= parse_flag(cell(i_percent));
        entry.upside_down |= parse_flag(cell(i_upside));
        entry.min = entry.min.or_else(|| parse_value(cell(i_min)));
        entry.max = entry.max.or_else(|| parse_value(cell(i_max)));

        let raw_value = cell(Some(i_value));
        let value = parse_value(raw_value);
        if value.is_none() && !raw_value.is_empty() {
            tracing::warn!(row = row + 2, value = raw_value, "unparsable value treated as a gap");
        }
        let date = parse_date(cell(i_date));
        let series = cell(i_series);
        entry
            .series
            .entry(if series.is_empty() { name.to_string() } else { series.to_string() })
            .or_default()
            .push((date, row, value));
    }

    let stats = order
        .into_iter()
        .filter_map(|name| {
            let rows = grouped.remove(&name)?;
            let series = rows
                .series
                .into_values()
                .map(|mut points| {
                    points.sort_by_key(|(date, row, _)| (*date, *row));
                    Series::new(points.into_iter().map(|(_, _, v)| v).collect())
                })
                .collect();
            let mut stat = StatDescriptor::new(series).with_bounds(rows.min, rows.max);
            stat.is_percent = rows.is_percent;
            stat.upside_down = rows.upside_down;
            Some(LoadedStat { name, stat })
        })
        .collect();
    Ok(stats)
}

fn parse_flag(s: &str) -> bool {
    matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "y" | "x")
}

/// Accepts `1,234.5`, `45%` and `(12)` for negatives; blank is a gap.
fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let (negative, body) = match s.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
        Some(inner) => (true, inner),
        None => (false, s),
    };
    let cleaned: String = body.chars().filter(|c| !matches!(c, ',' | '%' | '$' | ' ')).collect();
    let v = cleaned.parse::<f64>().ok().filter(|v| v.is_finite())?;
    Some(if negative { -v } else { v })
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    if s.is_empty() {
        return None;
    }
    ["%Y-%m-%d", "%m/%d/%Y", "%d.%m.%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
