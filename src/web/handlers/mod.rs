// Request handlers, one module per resource.

pub mod flags;
pub mod moderate;
pub mod words;
