mod arithmetic_sequence;
mod constant_sequence;
mod geometric_sequence;
mod luby_sequence;
mod sequence_generator;

pub(crate) use arithmetic_sequence::ArithmeticSequence;
pub(crate) use constant_sequence::ConstantSequence;
pub(crate) use geometric_sequence::GeometricSequence;
pub(crate) use luby_sequence::LubySequence;
pub(crate) use sequence_generator::SequenceGenerator;
pub use sequence_generator::SequenceGeneratorType;
