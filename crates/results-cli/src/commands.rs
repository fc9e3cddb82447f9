use std::collections::BTreeMap;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, warn};

use results_cli::io::{read_results, read_riders, render_export_csv, write_export};
use results_cli::logging::redact_value;
use results_match::{IdentityResolver, MatchOptions};
use results_model::{RiderId, RiderRecord};
use results_standings::{PointsTable, aggregate};

use crate::cli::{DuplicatesArgs, PointsArgs, StandingsArgs};
use crate::summary::{
    print_class_standings, print_duplicate_groups, print_point_tables, print_team_standings,
};

pub fn run_duplicates(args: &DuplicatesArgs) -> Result<()> {
    let span = info_span!("duplicates", riders = %args.riders.display());
    let _guard = span.enter();

    let mut options = if args.strict {
        MatchOptions::strict()
    } else if args.relaxed {
        MatchOptions::relaxed()
    } else {
        MatchOptions::default()
    };
    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            bail!("threshold must be between 0.0 and 1.0, got {threshold}");
        }
        options = options.with_threshold(threshold);
    }
    if let Some(prefix) = &args.provisional_prefix {
        options = options.with_provisional_prefix(prefix.as_str());
    }

    let resolver = IdentityResolver::new(options);
    let riders = read_riders(&args.riders)?;
    info!(
        count = riders.len(),
        threshold = resolver.options().threshold,
        "loaded riders"
    );
    let groups = resolver.resolve(&riders);
    for group in &groups {
        let names = group
            .rider_ids
            .iter()
            .filter_map(|id| riders.iter().find(|rider| &rider.id == id))
            .map(RiderRecord::display_name)
            .collect::<Vec<_>>()
            .join(" / ");
        debug!(
            size = group.rider_ids.len(),
            similarity = group.similarity,
            names = redact_value(&names),
            "duplicate group"
        );
    }
    print_duplicate_groups(&groups, riders.as_slice());
    Ok(())
}

pub fn run_standings(args: &StandingsArgs) -> Result<()> {
    let span = info_span!("standings", results = %args.results.display());
    let _guard = span.enter();

    let points = load_points(args.points_config.as_deref())?;
    if let Some(system) = args.system.as_deref()
        && points.table(system).is_none()
    {
        bail!("unknown point system: {system}");
    }
    let riders: BTreeMap<RiderId, RiderRecord> = read_riders(&args.riders)?
        .into_iter()
        .map(|rider| (rider.id.clone(), rider))
        .collect();
    let results = read_results(&args.results, &points, args.system.as_deref())?;
    let unknown = results
        .iter()
        .filter(|result| !riders.contains_key(&result.rider_id))
        .count();
    if unknown > 0 {
        warn!(count = unknown, "results reference riders missing from the rider file");
    }
    info!(
        riders = riders.len(),
        results = results.len(),
        team = args.team,
        "computing standings"
    );

    let standings = aggregate(&results, &riders, args.team);
    if standings.is_empty() {
        println!("No valid results.");
        return Ok(());
    }

    if let Some(class_name) = args.class.as_deref()
        && !standings.class_names().contains(class_name)
    {
        bail!("no results in class: {class_name}");
    }
    let classes = standings.by_class();
    let wanted = |class_name: &str| args.class.as_deref().is_none_or(|c| c == class_name);
    for (class_name, rows) in classes.iter().filter(|(name, _)| wanted(name.as_str())) {
        print_class_standings(class_name, rows, &riders);
    }
    for (class_name, rows) in standings
        .team_by_class()
        .iter()
        .filter(|(name, _)| wanted(name.as_str()))
    {
        print_team_standings(class_name, rows);
    }

    if let Some(path) = &args.export {
        let rows: Vec<_> = standings
            .export_rows()
            .into_iter()
            .filter(|row| wanted(row.class_name.as_str()))
            .collect();
        let csv = render_export_csv(&rows, &riders)?;
        write_export(path, &csv)?;
        info!(path = %path.display(), rows = rows.len(), "wrote standings export");
    }
    Ok(())
}

pub fn run_points(args: &PointsArgs) -> Result<()> {
    let points = load_points(args.points_config.as_deref())?;
    match (args.system.as_deref(), args.position) {
        (Some(system), Some(position)) => {
            if points.table(system).is_none() {
                bail!("unknown point system: {system}");
            }
            println!("{}", points.points_for(position, system));
        }
        _ => print_point_tables(&points),
    }
    Ok(())
}

fn load_points(path: Option<&std::path::Path>) -> Result<PointsTable> {
    match path {
        Some(path) => {
            let table = PointsTable::load(path)
                .with_context(|| format!("load points config: {}", path.display()))?;
            debug!(path = %path.display(), "loaded points config");
            Ok(table)
        }
        None => Ok(PointsTable::builtin()),
    }
}
