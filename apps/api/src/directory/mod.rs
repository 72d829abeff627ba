// Read-only views over schools, companies, roles and students.

pub mod handlers;
pub mod queries;
