mod book;

pub use book::*;
