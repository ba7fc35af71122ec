use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width};

use defscan_model::DuplicateReport;

use defscan_cli::types::{PackageSummary, ScanResult};

pub fn print_summary(result: &ScanResult) {
    println!("Source: {}", result.source.display());
    println!("Reports: {}", result.summary.reports_dir.display());
    println!("Policy: {}", result.policy);
    println!(
        "Definitions scanned: {} in {} ms",
        result.definitions,
        result.summary.duration.as_millis()
    );
    if !result.packages.is_empty() {
        print_package_table(&result.packages);
    }
    if result.duplicates.is_empty() {
        println!("No duplicate definitions found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Severity"),
        header_cell("Count"),
        header_cell("Packages"),
        header_cell("Report"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    for (report, path) in result.duplicates.iter().zip(&result.summary.written) {
        let report_name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        table.add_row(vec![
            Cell::new(report.name()).add_attribute(Attribute::Bold),
            severity_cell(report),
            Cell::new(report.len()),
            Cell::new(package_list(report)),
            dim_cell(report_name),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} critical / {} ignorable",
            result.summary.critical, result.summary.ignorable
        ))
        .add_attribute(Attribute::Bold),
        Cell::new(result.duplicates.iter().map(DuplicateReport::len).sum::<usize>())
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
}

pub fn print_packages(packages: &[PackageSummary]) {
    if packages.is_empty() {
        println!("No packages in manifest.");
        return;
    }
    print_package_table(packages);
}

fn print_package_table(packages: &[PackageSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Package"),
        header_cell("Name"),
        header_cell("Files"),
        header_cell("Definitions"),
        header_cell("Folder"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for package in packages {
        table.add_row(vec![
            Cell::new(&package.origin.package_id)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&package.origin.name),
            count_cell(package.files),
            package
                .definitions
                .map_or_else(|| dim_cell("-"), count_cell),
            dim_cell(package.defs_dir.display()),
        ]);
    }
    println!("{table}");
}

fn package_list(report: &DuplicateReport) -> String {
    report.package_ids().join(", ")
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
        .set_width(140);
    if table.column_count() >= 5 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Percentage(35)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(report: &DuplicateReport) -> Cell {
    if report.is_critical() {
        Cell::new("CRITICAL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("IGNORABLE").fg(Color::Yellow)
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
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
