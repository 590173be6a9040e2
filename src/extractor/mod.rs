pub mod assembler;
pub mod classify;
pub mod contact;
pub mod dates;
pub mod diacritics;
pub mod documents;
pub mod feedback;
pub mod model;
pub mod title;

#[cfg(test)]
mod tests;

pub use assembler::{ExtractionMode, IdentifierMode, PipelineConfig, PublicationAssembler, slugify};
pub use model::{
    Announcement, ContactInfo, DocumentLink, InstrumentType, Publication, RawLink,
};
