pub mod batch;
pub mod svg_text;
pub mod taxon_label;
pub mod utility;
