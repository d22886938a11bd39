//! Grid column definitions.

/// One data column of a resource grid.
pub struct Column<T> {
    pub key: &'static str,
    pub title: &'static str,
    render: fn(&T) -> String,
}

impl<T> Column<T> {
    pub fn new(key: &'static str, title: &'static str, render: fn(&T) -> String) -> Self {
        Self { key, title, render }
    }

    pub fn render(&self, row: &T) -> String {
        (self.render)(row)
    }
}

/// Cell text for boolean columns.
pub fn flag_cell(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}
