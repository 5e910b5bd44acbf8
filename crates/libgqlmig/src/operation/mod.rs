mod extracted_fragment;
mod extracted_operation;
mod interpolation;
mod operation_kind;
mod operation_name;
mod variable_info;
mod variant;

pub use extracted_fragment::ExtractedFragment;
pub use extracted_operation::ExtractedOperation;
pub use extracted_operation::OperationParseError;
pub use interpolation::Interpolation;
pub use interpolation::InterpolationKind;
pub use interpolation::InterpolationSlot;
pub(crate) use interpolation::find_ternary_split;
pub use operation_kind::OperationKind;
pub use operation_name::OperationName;
pub use variable_info::VariableInfo;
pub use variant::QueryVariant;
pub use variant::SwitchAssignment;
pub use variant::SwitchKind;
pub use variant::SwitchValue;
pub use variant::VariantSwitch;

#[cfg(test)]
mod tests;
