pub(crate) mod ease;
pub(crate) mod interp;
pub(crate) mod seeded;
pub(crate) mod spring;
pub(crate) mod text;
