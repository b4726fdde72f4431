//! Common types for udon5e.
//!
//! This crate provides the foundation shared by the extractor and both output
//! generators:
//!
//! - [`CharacterRecord`] - The strongly-typed result of scraping one sheet
//! - [`Ability`] / [`Skill`] - The fixed ability and skill vocabularies
//! - [`format_modifier`] - Signed display of ability and skill modifiers
//! - [`Error`] - Errors shared across the pipeline

mod error;
mod modifier;
mod record;

pub use error::{Error, Result};
pub use modifier::format_modifier;
pub use record::{
    Abilities, Ability, Attack, CharacterRecord, Notes, Skill, Skills, SpellLevel, Spellbook,
};
