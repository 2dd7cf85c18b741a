pub mod coordinate;
pub mod lnglat;
