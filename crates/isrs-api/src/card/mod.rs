pub mod review;
mod routes;

pub use routes::routes;
