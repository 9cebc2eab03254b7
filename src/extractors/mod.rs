pub mod metadata_extractor;
