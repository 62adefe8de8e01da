//! Result and detector types.

mod detector;
mod result;

pub use detector::{Detector, DetectorFn};
pub use result::{CheckResult, CheckerKind, CheckerRef};
