use crate::domain::AppError;

/// Port for interactive operator input.
///
/// Every call blocks until the operator answers; there is no timeout.
pub trait Prompter {
    /// Free text input. An empty answer is rejected when `required` is set.
    fn text(&self, label: &str, default: Option<&str>, required: bool) -> Result<String, AppError>;

    /// Masked text input.
    fn password(&self, label: &str, required: bool) -> Result<String, AppError>;

    /// Single choice; returns the chosen option.
    fn select(&self, label: &str, options: &[String], default: usize) -> Result<String, AppError>;

    /// Multiple choice; returns the chosen options in option order.
    fn multiselect(&self, label: &str, options: &[String]) -> Result<Vec<String>, AppError>;

    /// Multiple choice narrowed by search queries over `options`.
    fn multisearch(
        &self,
        label: &str,
        options: &[String],
        placeholder: &str,
    ) -> Result<Vec<String>, AppError>;

    /// Yes/no question.
    fn confirm(&self, label: &str, default: bool) -> Result<bool, AppError>;

    /// Surface an error message to the operator without aborting.
    fn error(&self, message: &str);
}
