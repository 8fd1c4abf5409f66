pub mod bitmap;
pub mod standard;
pub mod table;
