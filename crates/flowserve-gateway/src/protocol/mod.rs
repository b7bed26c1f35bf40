//! Wire format types

pub mod openai;
