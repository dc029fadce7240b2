//! Value classes and the expression-level type rules
//!
//! Every evaluable node is tagged with a [`ValueType`] when it is built.
//! There is no symbol table, so identifiers and function calls are tagged
//! [`ValueType::Unconstrained`] and are accepted wherever a number or a
//! boolean is expected.
//!
//! # Compatibility
//!
//! | operand type    | number context | boolean context |
//! |-----------------|----------------|-----------------|
//! | `Number`        | yes            | no              |
//! | `Boolean`       | no             | yes             |
//! | `Unconstrained` | yes            | yes             |
//! | none            | no             | no              |
//!
//! Operands with no value type at all (`if_expr`, `fun_expr`) fit neither
//! context.

use std::fmt;
use thiserror::Error;

/// Static classification of an expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Number,
    Boolean,
    /// Identifiers and calls; the real type needs name resolution.
    Unconstrained,
}

impl ValueType {
    /// Whether a value of this type may be used where `class` is expected.
    pub fn fits(self, class: TypeClass) -> bool {
        match (self, class) {
            (ValueType::Unconstrained, _) => true,
            (ValueType::Number, TypeClass::Number) => true,
            (ValueType::Boolean, TypeClass::Boolean) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Number => write!(f, "number"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Unconstrained => write!(f, "unconstrained"),
        }
    }
}

/// The two operand classes an operator can demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Number,
    Boolean,
}

impl TypeClass {
    /// The concrete type that pins this class down.
    pub fn concrete(self) -> ValueType {
        match self {
            TypeClass::Number => ValueType::Number,
            TypeClass::Boolean => ValueType::Boolean,
        }
    }
}

impl fmt::Display for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeClass::Number => write!(f, "number"),
            TypeClass::Boolean => write!(f, "boolean"),
        }
    }
}

/// A type-consistency violation raised by an AST factory function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// An operand does not belong to the class its position requires.
    #[error("{context}: expect '{expected}' but got '{found}'")]
    Mismatch {
        /// Operator symbol, or `if test expr` for conditionals.
        context: String,
        expected: TypeClass,
        /// Value type name, or the node kind for untyped operands.
        found: String,
    },

    /// The members of an expression list share no operand class.
    #[error("all arguments must be of the same type, got {}", .found.join(", "))]
    MixedList { found: Vec<String> },
}

/// Check that every operand fits `class`.
///
/// `operands` pairs each operand's value type with the name reported when
/// it has none.
pub fn require_class<'a, I>(context: &str, class: TypeClass, operands: I) -> Result<(), TypeError>
where
    I: IntoIterator<Item = (Option<ValueType>, &'a str)>,
{
    for (value_type, kind_name) in operands {
        match value_type {
            Some(vt) if vt.fits(class) => {}
            Some(vt) => {
                return Err(TypeError::Mismatch {
                    context: context.to_string(),
                    expected: class,
                    found: vt.to_string(),
                });
            }
            None => {
                return Err(TypeError::Mismatch {
                    context: context.to_string(),
                    expected: class,
                    found: kind_name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Compute the shared type of an expression list.
///
/// The number class is tried first, then the boolean class. The result is
/// the concrete type of the matching class when at least one member is
/// concrete, and `Unconstrained` when every member is.
pub fn common_type<'a, I>(operands: I) -> Result<ValueType, TypeError>
where
    I: IntoIterator<Item = (Option<ValueType>, &'a str)>,
{
    let operands: Vec<(Option<ValueType>, &str)> = operands.into_iter().collect();

    for class in [TypeClass::Number, TypeClass::Boolean] {
        let all_fit = operands
            .iter()
            .all(|(vt, _)| vt.is_some_and(|vt| vt.fits(class)));
        if all_fit {
            let concrete = operands
                .iter()
                .any(|(vt, _)| *vt == Some(class.concrete()));
            return Ok(if concrete {
                class.concrete()
            } else {
                ValueType::Unconstrained
            });
        }
    }

    Err(TypeError::MixedList {
        found: operands
            .iter()
            .map(|(vt, kind)| match vt {
                Some(vt) => vt.to_string(),
                None => kind.to_string(),
            })
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconstrained_fits_both_classes() {
        assert!(ValueType::Unconstrained.fits(TypeClass::Number));
        assert!(ValueType::Unconstrained.fits(TypeClass::Boolean));
        assert!(!ValueType::Number.fits(TypeClass::Boolean));
        assert!(!ValueType::Boolean.fits(TypeClass::Number));
    }

    #[test]
    fn test_require_class_reports_found_type() {
        let err = require_class(
            "+",
            TypeClass::Number,
            [(Some(ValueType::Number), "number"), (Some(ValueType::Boolean), "not")],
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "+: expect 'number' but got 'boolean'");
    }

    #[test]
    fn test_require_class_names_untyped_operand_kind() {
        let err = require_class("and", TypeClass::Boolean, [(None, "if_expr")]).unwrap_err();
        assert!(matches!(err, TypeError::Mismatch { ref found, .. } if found == "if_expr"));
    }

    #[test]
    fn test_common_type_prefers_concrete_member() {
        let vt = common_type([
            (Some(ValueType::Unconstrained), "id"),
            (Some(ValueType::Boolean), "boolean"),
        ])
        .unwrap();
        assert_eq!(vt, ValueType::Boolean);

        let vt = common_type([
            (Some(ValueType::Unconstrained), "id"),
            (Some(ValueType::Unconstrained), "fun_call"),
        ])
        .unwrap();
        assert_eq!(vt, ValueType::Unconstrained);
    }

    #[test]
    fn test_common_type_rejects_mixed_members() {
        let err = common_type([
            (Some(ValueType::Number), "number"),
            (Some(ValueType::Boolean), "boolean"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            TypeError::MixedList {
                found: vec!["number".to_string(), "boolean".to_string()]
            }
        );
    }
}
