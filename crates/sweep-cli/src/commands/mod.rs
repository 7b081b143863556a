pub mod geom;
pub mod plan;
pub mod run;
pub mod source;
pub mod version;
