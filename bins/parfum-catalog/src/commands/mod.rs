pub mod normalize;
pub mod search;
pub mod validate;
