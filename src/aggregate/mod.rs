mod catalogue;

pub use catalogue::Catalogue;
