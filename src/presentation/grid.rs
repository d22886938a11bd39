//! Plain-text rendering of a list view [`Grid`].

use std::fmt::Write as _;

use crate::application::list_view::Grid;

const SEPARATOR: &str = " | ";

/// Render the grid as an aligned table followed by a page footer.
///
/// While loading, the last rows stay visible under a `loading...` line. A
/// failed fetch adds an inline error with a reload hint.
pub fn render_grid(grid: &Grid) -> String {
    let mut widths: Vec<usize> = grid.headers.iter().map(|header| header.chars().count()).collect();
    for row in &grid.rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", grid.title);
    if grid.loading {
        out.push_str("loading...\n");
    }
    if let Some(message) = &grid.error {
        let _ = writeln!(
            out,
            "Failed to load {}: {message} (reload to retry)",
            grid.title
        );
    }

    push_line(&mut out, grid.headers.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    push_line(&mut out, rule.iter().map(String::as_str), &widths);

    if grid.rows.is_empty() && !grid.loading {
        out.push_str("(no rows)\n");
    }
    for row in &grid.rows {
        push_line(&mut out, row.cells.iter().map(String::as_str), &widths);
    }

    let pages = page_count(grid.total, grid.page_size);
    let _ = write!(
        out,
        "page {} of {} ({} total, {} per page)",
        u64::from(grid.page) + 1,
        pages.max(1),
        grid.total,
        grid.page_size
    );
    out
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize]) {
    let mut line = String::new();
    for (index, (cell, width)) in cells.zip(widths).enumerate() {
        if index > 0 {
            line.push_str(SEPARATOR);
        }
        let _ = write!(line, "{cell:<width$}");
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn page_count(total: u64, page_size: u32) -> u64 {
    total.div_ceil(u64::from(page_size.max(1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::list_view::GridRow;

    fn grid() -> Grid {
        Grid {
            title: "Tags",
            headers: vec!["Id", "Name", "Actions"],
            rows: vec![
                GridRow {
                    id: 1,
                    cells: vec!["1".into(), "rust".into(), "edit | delete".into()],
                },
                GridRow {
                    id: 12,
                    cells: vec!["12".into(), "async".into(), "edit | delete".into()],
                },
            ],
            page: 0,
            page_size: 25,
            total: 2,
            loading: false,
            error: None,
        }
    }

    #[test]
    fn renders_aligned_table() {
        insta::assert_snapshot!(render_grid(&grid()), @r"
        Tags
        Id | Name  | Actions
        -- | ----- | -------------
        1  | rust  | edit | delete
        12 | async | edit | delete
        page 1 of 1 (2 total, 25 per page)
        ");
    }

    #[test]
    fn error_keeps_rows_and_offers_reload() {
        let mut grid = grid();
        grid.error = Some("server responded with status 500".into());
        let rendered = render_grid(&grid);
        assert!(rendered.contains("Failed to load Tags: server responded with status 500 (reload to retry)"));
        assert!(rendered.contains("12 | async"));
    }

    #[test]
    fn page_count_rounds_up() {
        assert_eq!(page_count(0, 25), 0);
        assert_eq!(page_count(26, 25), 2);
        assert_eq!(page_count(5, 0), 5);
    }
}
