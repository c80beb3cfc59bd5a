//! Step-expression utilities shared by the suitegen runtime and code generator.
//!
//! Expressions such as `I have {int} cucumbers` are lexed into literal text and
//! parameter tokens, compiled into anchored regular expressions, and matched
//! captures are converted back into typed values. Precompiled regular
//! expressions are accepted as well; their captures carry no type metadata and
//! pass through as text.

mod capture;
mod convert;
mod errors;
mod keyword;
mod kind;
mod pattern;

pub use capture::{Capture, extract_captured_values};
pub use convert::{CapturedValue, convert, unescape_string};
pub use errors::{ConversionError, PatternError};
pub use keyword::{StepKeyword, StepKeywordParseError, UnsupportedStepType};
pub use kind::{ParameterInfo, ParameterKind};
pub use pattern::{
    CompiledExpression, StepPattern, build_regex_from_expression, extract_parameter_types,
};
