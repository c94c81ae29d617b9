pub mod literal;
pub use literal::Literal;

pub mod parse;

pub mod serializer;
pub use serializer::Serializer;

pub mod stmt;
pub use stmt::Statement;
