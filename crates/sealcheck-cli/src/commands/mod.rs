pub mod check;
pub mod completion;
pub mod facts;
pub mod load;
