pub mod school;
pub mod student;
pub mod user;

pub use school::{NewSchool, School};
pub use student::{NewStudent, Student};
pub use user::User;
