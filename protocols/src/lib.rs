//! Wire formats spoken by ptrmap. Currently only DNS PTR queries and answers.

pub mod dns;
