//! Structural elements and their section properties

mod element;
mod material;
mod section;

pub use element::{Element, ElementKind};
pub use material::Material;
pub use section::{Profile, Section, SectionProperties};
