pub mod check;
pub mod common;
pub mod health;
pub mod lookup;
pub mod quote;
pub mod schedule;
pub mod statement;
