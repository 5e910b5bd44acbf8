mod apply_error;
mod code_applicator;

pub use apply_error::ApplyError;
pub use code_applicator::AppliedFile;
pub use code_applicator::FileEdit;
pub use code_applicator::SkippedEdit;
pub use code_applicator::apply_file;
pub use code_applicator::edit_for;

#[cfg(test)]
mod tests;
