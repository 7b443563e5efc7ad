pub mod description;
pub mod error;
pub mod fa;
pub mod input_symbol;
pub mod language;
pub mod regex;

pub use error::{Error, Result};
pub use fa::equivalence::{check_equivalence, equivalent, Equivalence};
pub use regex::compile;
