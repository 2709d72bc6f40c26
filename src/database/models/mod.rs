pub mod employee;

pub use employee::{Employee, EmployeePatch, NewEmployee};
