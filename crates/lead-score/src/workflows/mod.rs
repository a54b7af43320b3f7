pub mod import;
pub mod leads;
