//! URL generation for site routes.

mod url_generator;

pub use url_generator::PathUrlGenerator;
