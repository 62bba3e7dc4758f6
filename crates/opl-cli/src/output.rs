//! Terminal rendering.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use opl_match::ScoreBreakdown;
use opl_model::{Candidate, Confidence, DataStatus, LookupEnvelope, Resolution, SearchPage};

pub fn print_status(status: &DataStatus) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let yes_no = |value: bool| if value { "yes" } else { "no" };
    table.add_row(vec![header_cell("Index loaded"), Cell::new(yes_no(status.data_loaded))]);
    table.add_row(vec![header_cell("Records"), Cell::new(status.total_records)]);
    table.add_row(vec![header_cell("Indexed names"), Cell::new(status.indexed_names)]);
    table.add_row(vec![
        header_cell("Last update"),
        Cell::new(
            status
                .last_update
                .map_or_else(|| "never".to_string(), |at| at.to_rfc3339()),
        ),
    ]);
    table.add_row(vec![
        header_cell("Fingerprint"),
        Cell::new(status.fingerprint.as_deref().unwrap_or("-")),
    ]);
    table.add_row(vec![
        header_cell("Cache size"),
        Cell::new(format!("{:.1} MB", status.cache_size_mb)),
    ]);
    println!("{table}");
}

pub fn print_envelope(name: &str, envelope: &LookupEnvelope) {
    println!("{name}: {}", confidence_label(envelope.confidence));
    if !envelope.found {
        return;
    }
    let stats = &envelope.stats;
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Squat"),
        header_cell("Bench"),
        header_cell("Deadlift"),
        header_cell("Total"),
        header_cell("Dots"),
        header_cell("Class"),
        header_cell("Meet"),
        header_cell("Date"),
        header_cell("Federation"),
    ]);
    for column in 1..=6 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(&stats.name),
        Cell::new(kg(stats.squat_kg)),
        Cell::new(kg(stats.bench_kg)),
        Cell::new(kg(stats.deadlift_kg)),
        Cell::new(kg(stats.total_kg)).add_attribute(Attribute::Bold),
        Cell::new(format!("{:.2}", stats.dots)),
        Cell::new(kg(stats.weight_class_kg)),
        Cell::new(&stats.meet_name),
        Cell::new(&stats.date),
        Cell::new(&stats.federation),
    ]);
    println!("{table}");

    if let Some(warning) = &envelope.warning {
        println!("warning: {warning}");
    }
    if !envelope.alternatives.is_empty() {
        let mut alternatives = Table::new();
        apply_table_style(&mut alternatives);
        alternatives.set_header(vec![
            header_cell("Alternative"),
            header_cell("Meet"),
            header_cell("Date"),
            header_cell("Class"),
            header_cell("Total"),
            header_cell("Score"),
        ]);
        for column in 3..=5 {
            align_column(&mut alternatives, column, CellAlignment::Right);
        }
        for alternative in &envelope.alternatives {
            alternatives.add_row(vec![
                Cell::new(&alternative.name),
                Cell::new(&alternative.meet_name),
                Cell::new(&alternative.date),
                Cell::new(kg(alternative.weight_class_kg)),
                Cell::new(kg(alternative.total_kg)),
                Cell::new(format!("{:.3}", alternative.score)),
            ]);
        }
        println!("{alternatives}");
    }
}

pub fn print_candidates(candidates: &[(Candidate, Option<ScoreBreakdown>)]) {
    let explain = candidates.iter().any(|(_, breakdown)| breakdown.is_some());
    let mut table = Table::new();
    apply_table_style(&mut table);
    let mut header = vec![
        header_cell("Name"),
        header_cell("Match"),
        header_cell("Score"),
        header_cell("Similarity"),
        header_cell("Class"),
        header_cell("Total"),
        header_cell("Meet"),
        header_cell("Date"),
    ];
    if explain {
        header.extend([
            header_cell("Name pts"),
            header_cell("Class pts"),
            header_cell("Recency pts"),
            header_cell("Complete pts"),
        ]);
    }
    table.set_header(header);
    for column in 2..=5 {
        align_column(&mut table, column, CellAlignment::Right);
    }

    for (candidate, breakdown) in candidates {
        let record = &candidate.record;
        let mut row = vec![
            Cell::new(&record.name),
            Cell::new(candidate.match_type),
            Cell::new(format!("{:.3}", candidate.score)),
            Cell::new(format!("{:.3}", candidate.name_similarity)),
            Cell::new(kg(record.weight_class_kg)),
            Cell::new(kg(record.total_kg)),
            Cell::new(&record.meet_name),
            Cell::new(&record.date),
        ];
        if explain {
            match breakdown {
                Some(parts) => row.extend(
                    [
                        parts.name_similarity,
                        parts.weight_class,
                        parts.recency,
                        parts.completeness,
                    ]
                    .map(|value| Cell::new(format!("{value:.3}"))),
                ),
                None => row.extend((0..4).map(|_| Cell::new("-"))),
            }
        }
        table.add_row(row);
    }
    println!("{table}");
}

pub fn print_batch<'a>(results: impl IntoIterator<Item = (&'a String, &'a Resolution)>) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Result"),
        header_cell("Matched name"),
        header_cell("Total"),
        header_cell("Dots"),
    ]);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for (input, resolution) in results {
        let stats = resolution.envelope().stats;
        table.add_row(vec![
            Cell::new(input),
            confidence_cell(resolution.confidence()),
            Cell::new(stats.name),
            Cell::new(kg(stats.total_kg)),
            Cell::new(format!("{:.2}", stats.dots)),
        ]);
    }
    println!("{table}");
}

pub fn print_search(page: &SearchPage) {
    println!(
        "{} matches for {:?} (showing {} from offset {})",
        page.total_count,
        page.term,
        page.lifters.len(),
        page.offset
    );
    if page.lifters.is_empty() {
        return;
    }
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Dots"),
        header_cell("Total"),
        header_cell("Class"),
        header_cell("Division"),
        header_cell("Meet"),
        header_cell("Date"),
    ]);
    for column in 1..=3 {
        align_column(&mut table, column, CellAlignment::Right);
    }
    for hit in &page.lifters {
        table.add_row(vec![
            Cell::new(&hit.name),
            Cell::new(format!("{:.2}", hit.dots)),
            Cell::new(kg(hit.total_kg)),
            Cell::new(kg(hit.weight_class_kg)),
            Cell::new(&hit.division),
            Cell::new(&hit.meet_name),
            Cell::new(&hit.date),
        ]);
    }
    println!("{table}");
}

fn kg(value: f64) -> String {
    if value == 0.0 {
        "-".to_string()
    } else {
        format!("{value}")
    }
}

fn confidence_label(confidence: Confidence) -> String {
    format!("{} ({})", confidence, confidence.description())
}

fn confidence_cell(confidence: Confidence) -> Cell {
    let color = match confidence {
        Confidence::Exact | Confidence::High => Color::Green,
        Confidence::Medium => Color::Yellow,
        Confidence::Low => Color::DarkYellow,
        Confidence::NotFound => Color::Red,
    };
    Cell::new(confidence).fg(color)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
