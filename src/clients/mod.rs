pub mod school;

pub use school::SchoolClient;
