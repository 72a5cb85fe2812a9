pub mod skin;
#[cfg(feature = "skin-analysis")]
pub mod face;
