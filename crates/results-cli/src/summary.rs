use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use results_model::{DuplicateGroup, RiderLookup, RiderRecord, StandingRow, TeamStandingRow};
use results_standings::{PointSystem, PointsTable};

pub fn print_duplicate_groups<L>(groups: &[DuplicateGroup], riders: &L)
where
    L: RiderLookup + ?Sized,
{
    if groups.is_empty() {
        println!("No duplicate candidates found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Group"),
        header_cell("Rider"),
        header_cell("Name"),
        header_cell("Club"),
        header_cell("Licence"),
        header_cell("Similarity"),
        header_cell("Reasons"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    for (index, group) in groups.iter().enumerate() {
        let reasons = group
            .reasons
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        for (position, id) in group.rider_ids.iter().enumerate() {
            let rider = riders.rider(id);
            let first = position == 0;
            table.add_row(vec![
                if first {
                    Cell::new(index + 1).add_attribute(Attribute::Bold)
                } else {
                    dim_cell("")
                },
                Cell::new(id),
                Cell::new(rider.map_or_else(|| "-".to_string(), RiderRecord::display_name)),
                optional_cell(rider.and_then(RiderRecord::club)),
                optional_cell(rider.and_then(RiderRecord::external_id)),
                if first {
                    similarity_cell(group.similarity)
                } else {
                    dim_cell("")
                },
                if first {
                    Cell::new(&reasons)
                } else {
                    dim_cell("")
                },
            ]);
        }
    }
    println!("{table}");
    println!(
        "{} group(s), {} rider(s) involved",
        groups.len(),
        groups.iter().map(|g| g.rider_ids.len()).sum::<usize>()
    );
}

pub fn print_class_standings<L>(class_name: &str, rows: &[StandingRow], riders: &L)
where
    L: RiderLookup + ?Sized,
{
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("Name"),
        header_cell("Club"),
        header_cell("Points"),
        header_cell("Events"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for row in rows {
        let rider = riders.rider(&row.rider_id);
        table.add_row(vec![
            rank_cell(row.rank),
            Cell::new(rider.map_or_else(|| row.rider_id.to_string(), RiderRecord::display_name)),
            optional_cell(rider.and_then(RiderRecord::club)),
            Cell::new(row.total_points),
            Cell::new(row.event_count),
        ]);
    }
    println!();
    println!("Class: {class_name}");
    println!("{table}");
}

pub fn print_team_standings(class_name: &str, rows: &[TeamStandingRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rank"),
        header_cell("Team"),
        header_cell("Points"),
        header_cell("Riders"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in rows {
        table.add_row(vec![
            rank_cell(row.rank),
            Cell::new(&row.team_name),
            Cell::new(row.total_points),
            Cell::new(row.rider_count),
        ]);
    }
    println!();
    println!("Teams: {class_name}");
    println!("{table}");
}

pub fn print_point_tables(points: &PointsTable) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("System"),
        header_cell("Name"),
        header_cell("Positions"),
        header_cell("Winner"),
        header_cell("Last scoring"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    let custom = points
        .custom()
        .map(|table| (PointSystem::Custom.as_str(), table));
    for (id, values) in points.systems().chain(custom) {
        let name = PointSystem::parse(id).map_or(id, |system| system.display_name());
        table.add_row(vec![
            Cell::new(id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(name),
            Cell::new(values.len()),
            optional_cell(values.first()),
            optional_cell(values.last()),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn rank_cell(rank: usize) -> Cell {
    match rank {
        1 => Cell::new(rank)
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        2 | 3 => Cell::new(rank).add_attribute(Attribute::Bold),
        _ => Cell::new(rank),
    }
}

fn similarity_cell(similarity: f64) -> Cell {
    let color = if similarity >= 0.95 {
        Color::Red
    } else if similarity >= 0.85 {
        Color::Yellow
    } else {
        Color::Reset
    };
    Cell::new(format!("{:.0}%", similarity * 100.0)).fg(color)
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
