pub(crate) mod blend;
pub(crate) mod transitions;
