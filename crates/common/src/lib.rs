//! Brewin common types.
//!
//! This crate provides the data structures shared by the lexer, the
//! interpreter and the CLI:
//!
//! - [`Value`] and [`Type`] — the three scalar types of the language
//! - [`Keyword`] — statement keywords, plus builtin and result-slot names
//! - [`Program`] — tokenized lines with their indentation
//! - [`InterpError`] — the fatal errors a run can end with
//!
//! # Dependencies
//!
//! This crate uses `thiserror` and has no other dependencies.

pub mod error;
pub mod keyword;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::{ErrorKind, InterpError};
pub use keyword::Keyword;
pub use program::{Line, Program};
pub use value::{Type, Value};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::Int),
            "[a-z ]{0,12}".prop_map(Value::Str),
            any::<bool>().prop_map(Value::Bool),
        ]
    }

    proptest! {
        /// Integer display form parses back to the same integer.
        #[test]
        fn int_display_parses_back(n in any::<i64>()) {
            prop_assert_eq!(Value::Int(n).to_string().parse::<i64>().unwrap(), n);
        }

        /// The zero value of a value's type has that same type.
        #[test]
        fn zero_value_preserves_type(v in arb_value()) {
            prop_assert_eq!(v.ty().zero_value().ty(), v.ty());
        }
    }
}
