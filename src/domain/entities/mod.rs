//! Core domain entities of the classifieds taxonomy.
//!
//! Entities are plain immutable values loaded by repositories. The two
//! hierarchies are closed sum types: every consumer matches them
//! exhaustively, so adding a level is a compile error until handled.
//!
//! # Entity Types
//!
//! - [`Location`] - Area → Country → City → Region
//! - [`Classification`] - Section → Category → SubCategory
//! - [`Advertisement`] - A classified ad filed under one of each
//! - [`Domain`] - A tenant site

pub mod advertisement;
pub mod classification;
pub mod domain;
pub mod location;

pub use advertisement::Advertisement;
pub use classification::{Category, Classification, ClassificationKind, Section, SubCategory};
pub use domain::Domain;
pub use location::{Area, City, Country, Location, LocationKind, Region};
