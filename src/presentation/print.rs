//! Line formatting for records, notifications and validation failures.

use serde::Serialize;

use crate::application::toasts::Toast;
use crate::domain::resource::ResourceKind;
use crate::domain::validation::ValidationErrors;

pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn toast_line(toast: &Toast) -> String {
    format!("[{}] {}", toast.kind.as_str(), toast.text)
}

/// One line per failing field, sorted by field name.
pub fn validation_lines(errors: &ValidationErrors) -> Vec<String> {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect()
}

/// Navigation entries: title, route and command name.
pub fn module_lines(kinds: &[ResourceKind], command: impl Fn(ResourceKind) -> String) -> Vec<String> {
    let width = kinds
        .iter()
        .map(|kind| kind.title().len())
        .max()
        .unwrap_or(0);
    kinds
        .iter()
        .map(|kind| format!("{:<width$}  {:<16}  {}", kind.title(), kind.route(), command(*kind)))
        .map(|line| line.trim_end().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::toasts::Toasts;

    #[test]
    fn validation_lines_sorted_by_field() {
        let mut errors = ValidationErrors::new();
        errors.insert("title", "Title is required");
        errors.insert("content", "Content is required");
        assert_eq!(
            validation_lines(&errors),
            vec!["  content: Content is required", "  title: Title is required"]
        );
    }

    #[test]
    fn toast_line_names_kind() {
        let toasts = Toasts::default();
        toasts.error("Something went wrong");
        let line = toast_line(&toasts.drain()[0]);
        assert_eq!(line, "[error] Something went wrong");
    }

    #[test]
    fn module_lines_align_titles() {
        let lines = module_lines(
            &[ResourceKind::Blogs, ResourceKind::BlogCategories],
            |kind| kind.path().to_string(),
        );
        assert_eq!(lines[0], "Blogs            /blogs            blogs");
        assert_eq!(
            lines[1],
            "Blog Categories  /blogCategories   blogCategories"
        );
    }
}
