pub mod model;
pub mod mutation;
pub mod view;
