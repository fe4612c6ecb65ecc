use miette::Diagnostic;
use thiserror::Error;

use crate::{coercion::CoercionError, value::ValueKind};


/// Why a strict lookup (`try_get*`) failed.
///
/// The default getters fold all of these into the zero value of the requested type.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum LookupError {
    #[error("no value at {path:?}")]
    #[diagnostic(code(nestcfg::lookup::not_found))]
    NotFound { path: String },

    #[error("value at {path:?} is a {found}, expected a {expected}")]
    #[diagnostic(code(nestcfg::lookup::shape_mismatch))]
    ShapeMismatch {
        path: String,
        expected: ValueKind,
        found: ValueKind,
    },

    #[error("value at {path:?} could not be converted")]
    #[diagnostic(code(nestcfg::lookup::coercion))]
    Coercion {
        path: String,
        #[source]
        source: CoercionError,
    },
}
