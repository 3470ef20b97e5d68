//! Analyses over function bodies.

pub mod body_classifier;

pub use body_classifier::{BodyClassifier, Classification, Finding, Violation};
