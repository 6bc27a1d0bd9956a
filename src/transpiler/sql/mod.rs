pub mod oracle;
pub mod postgres;
pub mod sqlite;
